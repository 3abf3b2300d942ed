//! The atom tree: the node type, the factory and the path navigator.

mod atom;
mod factory;
mod find;

pub use atom::{Atom, AtomKind, ExpectedChild};
pub(crate) use atom::{ParseScope, TreeCtx};
pub(crate) use factory::create_atom;
