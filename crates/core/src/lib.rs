//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in here touches the database or HTTP: error taxonomy, id and
//! timestamp aliases, role names, input validators mirroring the schema's
//! check constraints, and the in-process TTL result cache.

pub mod cache;
pub mod error;
pub mod roles;
pub mod types;
pub mod validation;
