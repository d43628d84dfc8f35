//! Order detail page handler.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

use super::types::OrderDetailView;

/// Order detail page template.
#[derive(Template)]
#[template(path = "orders/detail.html")]
pub struct OrderDetailTemplate {
    /// The order with its grouped products.
    pub order: OrderDetailView,
}

/// Order detail page handler.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!("invalid order id: {id}")));
    }

    let gid = format!("gid://shopify/Order/{id}");
    let order = state
        .shopify()
        .get_order(&gid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let grouped = order.grouped();
    let template = OrderDetailTemplate {
        order: OrderDetailView::build(&order, &grouped),
    };

    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("template render error: {e}")))
}
