// Module declarations
pub mod batch;
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod operations;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use batch::{run_batch, ItemOutput};
pub use client::{Credentials, GraphQLClient, PageLimit, RequestContext, Variables};
pub use config::Config;
pub use error::{TransportError, TwingateError, TwingateResult};
pub use operations::{build_request, run_operation, Operation, OperationRequest, Params, ResourceKind};
