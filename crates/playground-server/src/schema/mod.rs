//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request and response types for one endpoint.
//! Bodies that are already domain types ([`playground_sandbox::ExecutionResult`],
//! [`playground_storage::Snippet`]) are used directly.

pub mod code;
pub mod run;

/// Largest request body the router buffers, in bytes. Anything bigger is
/// rejected with `413` before a handler sees it.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;
