//! Identifiers, entity references, name hashing and error types shared by all containers

pub mod entity_id;
pub mod errors;
pub mod hashing;
pub mod identifiers;

mod utf8;
