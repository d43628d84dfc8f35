//! Shopify Admin API order-fetch collaborator.
//!
//! The core never talks to the store itself: this module issues one
//! GraphQL request per navigation action and hands the parsed page to
//! `bundleboard-core` for grouping, filtering and export. Queries are
//! hand-written documents executed over plain HTTP.

mod client;
pub mod conversions;
pub mod wire;

pub use client::OrdersClient;

use bundleboard_core::{MalformedPriceError, OrderView, PageInfo};
use thiserror::Error;

/// One fetched page of orders.
#[derive(Debug, Clone)]
pub struct OrderPage {
    /// Orders in this page.
    pub orders: Vec<OrderView>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// Errors that can occur when fetching orders from the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A price field could not be parsed as a decimal amount.
    #[error(transparent)]
    MalformedPrice(#[from] MalformedPriceError),

    /// A timestamp field could not be parsed.
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
