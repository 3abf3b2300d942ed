//! Path navigation: resolve dotted names like
//! `moov.trak[2].mdia.hdlr.handlerType` to atoms or properties.
//!
//! Grammar: `segment ( "." segment )*` with
//! `segment := name [ "[" index "]" ]`. The root's empty type matches
//! any first segment. Atom names compare on their first four
//! characters, space padding permitted. A non-matching path is simply
//! not found, never a diagnostic.

use crate::{Atom, FourCC, Property};

/// One parsed path segment.
struct Segment<'a> {
    name: &'a str,
    index: Option<u32>,
    /// Path remainder after the dot, if any.
    rest: Option<&'a str>,
}

fn split_segment(path: &str) -> Segment<'_> {
    let (seg, rest) = match path.find('.') {
        Some(dot) => (&path[..dot], Some(&path[dot + 1..])),
        None => (path, None),
    };
    match seg.find('[') {
        Some(open) => {
            let index = seg[open + 1..]
                .trim_end_matches(']')
                .parse::<u32>()
                .ok();
            Segment { name: &seg[..open], index, rest }
        }
        None => Segment { name: seg, index: None, rest },
    }
}

/// Atom type match: first four characters significant, shorter names
/// space padded.
fn name_matches(typ: FourCC, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut padded = [b' '; 4];
    for (i, c) in name.chars().take(4).enumerate() {
        padded[i] = c as u8;
    }
    FourCC::new(padded) == typ
}

impl Atom {
    /// Resolves a dotted atom path relative to this atom. The terminal
    /// segment must name an atom.
    pub fn find_atom(&self, path: &str) -> Option<&Atom> {
        if !self.path_matches(path) {
            return None;
        }
        if self.is_root() {
            return self.find_child_atom(path);
        }
        let segment = split_segment(path);
        match segment.rest {
            None => Some(self),
            Some(rest) => self.find_child_atom(rest),
        }
    }

    /// Mutable variant of [`Atom::find_atom`].
    pub fn find_atom_mut(&mut self, path: &str) -> Option<&mut Atom> {
        if !self.path_matches(path) {
            return None;
        }
        if self.is_root() {
            return self.find_child_atom_mut(path);
        }
        let segment = split_segment(path);
        match segment.rest {
            None => Some(self),
            Some(rest) => self.find_child_atom_mut(rest),
        }
    }

    /// Resolves a dotted path whose terminal segment names a property,
    /// descending into table rows when the segment carries an index
    /// (`stts.entries[3].sampleCount`).
    pub fn find_property(&self, path: &str) -> Option<&Property> {
        if !self.path_matches(path) {
            return None;
        }
        if self.is_root() {
            return self.find_contained_property(path);
        }
        let segment = split_segment(path);
        segment.rest.and_then(|rest| self.find_contained_property(rest))
    }

    fn path_matches(&self, path: &str) -> bool {
        if self.is_root() {
            return !path.is_empty();
        }
        let segment = split_segment(path);
        name_matches(self.fourcc(), segment.name)
    }

    fn find_child_atom(&self, path: &str) -> Option<&Atom> {
        let segment = split_segment(path);
        let mut index = segment.index.unwrap_or(0);
        for child in self.children() {
            if name_matches(child.fourcc(), segment.name) {
                if index == 0 {
                    return child.find_atom(path);
                }
                index -= 1;
            }
        }
        None
    }

    fn find_child_atom_mut(&mut self, path: &str) -> Option<&mut Atom> {
        let segment = split_segment(path);
        let mut index = segment.index.unwrap_or(0);
        for child in self.children_mut() {
            if name_matches(child.fourcc(), segment.name) {
                if index == 0 {
                    return child.find_atom_mut(path);
                }
                index -= 1;
            }
        }
        None
    }

    fn find_contained_property(&self, path: &str) -> Option<&Property> {
        let segment = split_segment(path);

        // own properties first
        for property in self.properties() {
            if property.name() != segment.name {
                continue;
            }
            return match (segment.index, segment.rest) {
                (None, None) => Some(property),
                (Some(row), Some(rest)) => {
                    let column = split_segment(rest);
                    let table = property.table_value()?;
                    table
                        .rows
                        .get(row as usize)?
                        .iter()
                        .find(|p| p.name() == column.name)
                }
                _ => None,
            };
        }

        // else one of the children's properties
        let mut index = segment.index.unwrap_or(0);
        for child in self.children() {
            if name_matches(child.fourcc(), segment.name) {
                if index == 0 {
                    return child.find_property(path);
                }
                index -= 1;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_parsing() {
        let seg = split_segment("trak[2].mdia.hdlr");
        assert_eq!(seg.name, "trak");
        assert_eq!(seg.index, Some(2));
        assert_eq!(seg.rest, Some("mdia.hdlr"));
    }

    #[test]
    fn space_padded_match() {
        assert!(name_matches(FourCC::new(*b"url "), "url"));
        assert!(name_matches(FourCC::new(*b"moov"), "moov"));
        assert!(!name_matches(FourCC::new(*b"moov"), "trak"));
    }
}
