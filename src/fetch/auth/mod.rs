//! Client wrappers that attach API credentials to outgoing requests.
//!
//! Operations-database gateways differ in where they expect the key: some
//! take an `Authorization` header, others a query parameter. Both wrappers
//! compose around any inner [`HttpClient`](crate::fetch::HttpClient).

mod api_key;
mod url_param;

pub use api_key::ApiKey;
pub use url_param::UrlParam;
