//! StreamVault API server library.
//!
//! Exposes config, state, error handling, auth primitives and the route tree
//! so integration tests and the binary entrypoint share one construction
//! path.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
