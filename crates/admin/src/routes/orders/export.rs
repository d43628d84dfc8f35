//! CSV export download handler.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use bundleboard_core::{export_filename, export_orders, filter_orders};
use chrono::Utc;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

use super::types::OrdersQuery;

/// Download the currently displayed page as a CSV report.
///
/// Re-fetches the page described by the URL state, applies the same
/// client-side status filter as the list, and streams the result as an
/// attachment with the date-stamped filename.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Response, AppError> {
    let page_state = query.page_state();
    let page = state.shopify().get_orders(&page_state.fetch_params()).await?;
    let orders = filter_orders(page.orders, &page_state);

    let csv = export_orders(&orders);
    let filename = export_filename(Utc::now().date_naive());

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
