//! GraphQL client for the order queries.

use std::sync::Arc;

use bundleboard_core::{FetchParams, OrderView};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::ShopifyConfig;

use super::conversions::{convert_order, convert_order_page};
use super::wire::{OrderData, OrdersData};
use super::{GraphQLError, GraphQLErrorLocation, OrderPage, ShopifyError};

/// Fields requested for every order: enough for the list row, the detail
/// page and the CSV export. Both bundle-detection mechanisms are fetched:
/// the structural `lineItemGroup` and the custom attributes.
const ORDER_FIELDS: &str = r"
    id
    name
    createdAt
    displayFinancialStatus
    displayFulfillmentStatus
    shippingLine {
        title
    }
    totalPriceSet {
        shopMoney {
            amount
            currencyCode
        }
    }
    lineItems(first: 100) {
        edges {
            node {
                id
                title
                quantity
                customAttributes {
                    key
                    value
                }
                originalUnitPriceSet {
                    shopMoney {
                        amount
                        currencyCode
                    }
                }
                lineItemGroup {
                    id
                    title
                    quantity
                }
            }
        }
    }
";

/// One page of orders, newest first, forward or backward from a cursor.
fn orders_query() -> String {
    format!(
        r"query Orders($first: Int, $last: Int, $after: String, $before: String, $query: String) {{
            orders(first: $first, last: $last, after: $after, before: $before, query: $query, reverse: true, sortKey: CREATED_AT) {{
                edges {{
                    node {{ {ORDER_FIELDS} }}
                }}
                pageInfo {{
                    hasNextPage
                    hasPreviousPage
                    startCursor
                    endCursor
                }}
            }}
        }}"
    )
}

fn order_query() -> String {
    format!(
        r"query Order($id: ID!) {{
            order(id: $id) {{ {ORDER_FIELDS} }}
        }}"
    )
}

/// Shopify Admin API client for the order queries.
///
/// Issues one blocking (awaited) request per navigation action; there is
/// no retry or caching here - a failed fetch is surfaced as-is and the
/// caller decides what to show.
#[derive(Clone)]
pub struct OrdersClient {
    inner: Arc<OrdersClientInner>,
}

struct OrdersClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: SecretString,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl OrdersClient {
    /// Create a new client from the Shopify configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            inner: Arc::new(OrdersClientInner {
                client: reqwest::Client::new(),
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    /// Fetch one page of orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports errors, or
    /// the page contains a malformed price or timestamp.
    #[instrument(skip(self))]
    pub async fn get_orders(&self, params: &FetchParams) -> Result<OrderPage, ShopifyError> {
        let variables = serde_json::json!({
            "first": params.first,
            "last": params.last,
            "after": params.after,
            "before": params.before,
            "query": params.query,
        });

        let data: OrdersData = self.execute(&orders_query(), variables).await?;

        convert_order_page(data)
    }

    /// Fetch a single order by GID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports errors, or
    /// the order contains a malformed price or timestamp.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &str) -> Result<Option<OrderView>, ShopifyError> {
        let variables = serde_json::json!({ "id": id });

        let data: OrderData = self.execute(&order_query(), variables).await?;

        data.order.map(convert_order).transpose()
    }

    /// Execute a GraphQL query.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        );

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header(
                "X-Shopify-Access-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(ShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}
