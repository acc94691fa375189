//! HTTP/JSON API for the Alumina playground.
//!
//! Exposes two thin boundary handlers: one that compiles and runs submitted
//! source through [`playground_sandbox`], and one that shares snippets
//! through [`playground_storage`]. This crate contains the server framework,
//! API schema types, error handling, configuration, and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
