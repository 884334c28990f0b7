//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   table is editable
//!
//! Read-only projections (joined listings, reports) live next to the entity
//! they describe.

pub mod analytics;
pub mod association;
pub mod catalog;
pub mod contract;
pub mod dashboard;
pub mod episode;
pub mod feedback;
pub mod login;
pub mod password_reset;
pub mod producer;
pub mod production_house;
pub mod reference;
pub mod schedule;
pub mod user_account;
pub mod web_series;
