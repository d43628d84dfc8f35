//! Orders list page handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use bundleboard_core::{FetchPhase, NavigationAction, PageInfo, filter_orders};
use tracing::instrument;

use crate::state::AppState;

use super::types::{
    FilterOption, OrderRowView, OrdersQuery, export_url, list_url, payment_status_options,
    status_options,
};

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    /// Whether the upstream fetch failed.
    pub fetch_error: bool,
    /// Whether the (filtered) page is empty.
    pub is_empty: bool,
    /// Message shown when the page is empty.
    pub empty_message: String,
    /// Orders to display.
    pub orders: Vec<OrderRowView>,
    /// Result-count line (e.g., "12 commandes • Page de 50 résultats").
    pub count_label: String,
    /// Current search value.
    pub query_value: String,
    /// Fulfillment status filter choices.
    pub status_options: Vec<FilterOption>,
    /// Payment status filter choices.
    pub payment_options: Vec<FilterOption>,
    /// Current date range bounds (ISO), empty when unset.
    pub date_from_value: String,
    pub date_to_value: String,
    /// Whether any filter is active.
    pub has_filters: bool,
    /// Previous page link, when one exists.
    pub has_previous: bool,
    pub previous_url: String,
    /// Next page link, when one exists.
    pub has_next: bool,
    pub next_url: String,
    /// CSV export link for the current page.
    pub export_url: String,
}

/// Orders list page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Html<String> {
    let page_state = query.page_state();
    let phase = FetchPhase::Idle.start_fetch();

    let (phase, orders, page_info) = match state.shopify().get_orders(&page_state.fetch_params()).await {
        Ok(page) => (
            phase.fetch_succeeded(),
            filter_orders(page.orders, &page_state),
            page.page_info,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            (phase.fetch_failed(), vec![], PageInfo::default())
        }
    };
    let fetch_error = phase == FetchPhase::Error;

    let shop = state.shopify().store();
    let rows: Vec<OrderRowView> = orders
        .iter()
        .map(|order| OrderRowView::build(order, shop))
        .collect();

    let count = rows.len();
    let count_label = format!(
        "{count} commande{} • Page de 50 résultats",
        if count > 1 { "s" } else { "" }
    );

    let empty_message = if page_state.has_filters() {
        "Aucune commande ne correspond à votre recherche.".to_string()
    } else {
        "Votre boutique n'a pas encore de commandes.".to_string()
    };

    // Navigation links come from the pager transitions, so a direction that
    // the page info reports as exhausted never yields a link.
    let previous_state = page_state.apply(NavigationAction::Previous, &page_info);
    let next_state = page_state.apply(NavigationAction::Next, &page_info);

    let template = OrdersIndexTemplate {
        fetch_error,
        is_empty: rows.is_empty() && !fetch_error,
        empty_message,
        orders: rows,
        count_label,
        query_value: page_state.query.clone().unwrap_or_default(),
        status_options: status_options(page_state.status),
        payment_options: payment_status_options(page_state.payment_status),
        date_from_value: page_state.date_from.map_or_else(String::new, |d| d.to_string()),
        date_to_value: page_state.date_to.map_or_else(String::new, |d| d.to_string()),
        has_filters: page_state.has_filters(),
        has_previous: page_info.has_previous_page,
        previous_url: list_url(&previous_state),
        has_next: page_info.has_next_page,
        next_url: list_url(&next_state),
        export_url: export_url(&page_state),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
