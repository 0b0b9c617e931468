pub mod context;
pub mod graphql;
pub mod pagination;

pub use context::{Credentials, RequestContext};
pub use graphql::{GraphQLClient, Variables};
pub use pagination::PageLimit;
