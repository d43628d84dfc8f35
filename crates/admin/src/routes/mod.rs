//! Route registration for the admin panel.

use axum::{Router, response::Redirect, routing::get};

use crate::state::AppState;

pub mod orders;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/orders") }))
        .route("/orders", get(orders::list::index))
        .route("/orders/export.csv", get(orders::export::download))
        .route("/orders/{id}", get(orders::detail::show))
}
