//! Flowgate API - REST front door
//!
//! Accepts HTTP-triggered questions, relays each to the managed flow
//! service through `flowgate-router`, and maps the outcome to the JSON
//! response envelope the clients depend on.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_router;
