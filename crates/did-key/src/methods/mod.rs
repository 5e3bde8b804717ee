//! DID methods. Only [`key`] is implemented, since it is the only method that
//! can be resolved without network access.

pub mod key;
