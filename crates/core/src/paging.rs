//! Cursor pagination and filter state.
//!
//! The order list is paged with opaque forward/backward cursors. All of
//! the page and filter state lives in one serializable [`PageState`]
//! value owned by the caller (mirrored into the URL query string); the
//! functions here derive the next fetch request from it and the next
//! state from a navigation action, never from accumulated history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::orders::OrderView;
use crate::status::{FinancialStatus, FulfillmentStatus};

/// Orders requested per page.
pub const PAGE_SIZE: i64 = 50;

/// Paging direction relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Page forward from the cursor.
    #[default]
    #[serde(rename = "next")]
    Next,
    /// Page backward from the cursor.
    #[serde(rename = "prev")]
    Previous,
}

impl Direction {
    /// URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "prev",
        }
    }
}

/// Pagination metadata reported by the order source for the fetched page.
///
/// Always taken from upstream, never inferred from row counts: the
/// client-side status post-filter can shrink a page without meaning the
/// neighbouring pages do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Page and filter state for the order list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageState {
    /// Opaque pagination cursor, absent on the first page.
    pub cursor: Option<String>,
    /// Which side of the cursor to fetch.
    pub direction: Direction,
    /// Free-text order search.
    pub query: Option<String>,
    /// Fulfillment status filter (applied client-side).
    pub status: Option<FulfillmentStatus>,
    /// Financial status filter (applied client-side).
    pub payment_status: Option<FinancialStatus>,
    /// Creation date lower bound, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Creation date upper bound, inclusive.
    pub date_to: Option<NaiveDate>,
}

/// Parameters for one page fetch from the order source.
///
/// Exactly one of `first`/`after` or `last`/`before` is populated,
/// matching cursor-connection semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchParams {
    /// Page size when paging forward.
    pub first: Option<i64>,
    /// Page size when paging backward.
    pub last: Option<i64>,
    /// Fetch items after this cursor.
    pub after: Option<String>,
    /// Fetch items before this cursor.
    pub before: Option<String>,
    /// Upstream search string (free text and date range only).
    pub query: Option<String>,
    /// Newest orders first.
    pub reverse: bool,
}

/// A navigation or filter action applied to the page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Go to the next page.
    Next,
    /// Go to the previous page.
    Previous,
    /// Set or clear the free-text search.
    SetQuery(Option<String>),
    /// Set or clear the fulfillment status filter.
    SetStatus(Option<FulfillmentStatus>),
    /// Set or clear the financial status filter.
    SetPaymentStatus(Option<FinancialStatus>),
    /// Set or clear the creation date range.
    SetDateRange {
        /// Lower bound, inclusive.
        from: Option<NaiveDate>,
        /// Upper bound, inclusive.
        to: Option<NaiveDate>,
    },
    /// Drop every filter and return to the unfiltered first page.
    ClearFilters,
}

impl PageState {
    /// Whether any filter is active.
    ///
    /// Distinguishes "no orders at all" from "no orders match filters"
    /// when a page comes back empty.
    #[must_use]
    pub const fn has_filters(&self) -> bool {
        self.query.is_some()
            || self.status.is_some()
            || self.payment_status.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// Build the fetch request for this state.
    ///
    /// The upstream query narrows only by free text and date range; the
    /// status filters are applied client-side after the fetch (see
    /// [`filter_orders`]).
    #[must_use]
    pub fn fetch_params(&self) -> FetchParams {
        let mut parts: Vec<String> = Vec::new();
        if let Some(query) = &self.query
            && !query.is_empty()
        {
            parts.push(format!("name:{query}"));
        }
        if let Some(from) = self.date_from {
            parts.push(format!("created_at:>='{from}'"));
        }
        if let Some(to) = self.date_to {
            parts.push(format!("created_at:<='{to}'"));
        }
        let query = (!parts.is_empty()).then(|| parts.join(" "));

        let (first, last, after, before) = match (self.direction, &self.cursor) {
            (Direction::Previous, Some(cursor)) => {
                (None, Some(PAGE_SIZE), None, Some(cursor.clone()))
            }
            (Direction::Next, Some(cursor)) => (Some(PAGE_SIZE), None, Some(cursor.clone()), None),
            (_, None) => (Some(PAGE_SIZE), None, None, None),
        };

        FetchParams {
            first,
            last,
            after,
            before,
            query,
            reverse: true,
        }
    }

    /// Apply a navigation or filter action, yielding the next state.
    ///
    /// Every filter mutation clears the cursor - changing filters always
    /// restarts pagination from the first page. `Next`/`Previous` are
    /// no-ops (identity) when the page info says that direction is
    /// exhausted, so no request is issued for a page that does not exist.
    #[must_use]
    pub fn apply(&self, action: NavigationAction, page_info: &PageInfo) -> Self {
        let mut next = self.clone();
        match action {
            NavigationAction::Next => {
                if page_info.has_next_page {
                    next.cursor = page_info.end_cursor.clone();
                    next.direction = Direction::Next;
                }
            }
            NavigationAction::Previous => {
                if page_info.has_previous_page {
                    next.cursor = page_info.start_cursor.clone();
                    next.direction = Direction::Previous;
                }
            }
            NavigationAction::SetQuery(query) => {
                next.query = query.filter(|q| !q.is_empty());
                next.reset_cursor();
            }
            NavigationAction::SetStatus(status) => {
                next.status = status;
                next.reset_cursor();
            }
            NavigationAction::SetPaymentStatus(status) => {
                next.payment_status = status;
                next.reset_cursor();
            }
            NavigationAction::SetDateRange { from, to } => {
                next.date_from = from;
                next.date_to = to;
                next.reset_cursor();
            }
            NavigationAction::ClearFilters => {
                next = Self::default();
            }
        }
        next
    }

    fn reset_cursor(&mut self) {
        self.cursor = None;
        self.direction = Direction::Next;
    }
}

/// Fetch lifecycle for one navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// No fetch in flight.
    #[default]
    Idle,
    /// A fetch was issued and is awaited.
    Fetching,
    /// The fetch failed; the page state was not advanced.
    Error,
}

impl FetchPhase {
    /// A navigation or filter action issued a fetch.
    #[must_use]
    pub const fn start_fetch(self) -> Self {
        Self::Fetching
    }

    /// The fetch returned a page.
    #[must_use]
    pub const fn fetch_succeeded(self) -> Self {
        Self::Idle
    }

    /// The fetch failed; the error is surfaced to the caller.
    #[must_use]
    pub const fn fetch_failed(self) -> Self {
        Self::Error
    }
}

/// Apply the client-side status filters to a fetched page.
///
/// The upstream query cannot narrow by display status, so a filtered page
/// may hold fewer rows than the nominal page size. Status codes compare
/// exactly against the filter's code.
#[must_use]
pub fn filter_orders(orders: Vec<OrderView>, state: &PageState) -> Vec<OrderView> {
    orders
        .into_iter()
        .filter(|order| {
            state
                .status
                .is_none_or(|status| order.fulfillment_status.as_deref() == Some(status.code()))
        })
        .filter(|order| {
            state
                .payment_status
                .is_none_or(|status| order.financial_status.as_deref() == Some(status.code()))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn paged_state() -> PageState {
        PageState {
            cursor: Some("cursor-42".to_string()),
            direction: Direction::Next,
            query: Some("1001".to_string()),
            status: Some(FulfillmentStatus::Unfulfilled),
            payment_status: None,
            date_from: None,
            date_to: None,
        }
    }

    fn page_info(has_next: bool, has_previous: bool) -> PageInfo {
        PageInfo {
            has_next_page: has_next,
            has_previous_page: has_previous,
            start_cursor: Some("start".to_string()),
            end_cursor: Some("end".to_string()),
        }
    }

    fn order(fulfillment: &str, financial: &str) -> OrderView {
        OrderView {
            id: "gid://shopify/Order/1".to_string(),
            name: "#1001".to_string(),
            created_at: "2026-03-14T09:30:00Z".parse().unwrap(),
            financial_status: Some(financial.to_string()),
            fulfillment_status: Some(fulfillment.to_string()),
            shipping_method: None,
            total: Money::parse("10.00", "EUR").unwrap(),
            line_items: Vec::new(),
        }
    }

    #[test]
    fn test_first_page_fetch_params() {
        let params = PageState::default().fetch_params();
        assert_eq!(params.first, Some(PAGE_SIZE));
        assert_eq!(params.last, None);
        assert_eq!(params.after, None);
        assert_eq!(params.before, None);
        assert_eq!(params.query, None);
        assert!(params.reverse);
    }

    #[test]
    fn test_forward_fetch_uses_first_and_after() {
        let params = paged_state().fetch_params();
        assert_eq!(params.first, Some(PAGE_SIZE));
        assert_eq!(params.after.as_deref(), Some("cursor-42"));
        assert_eq!(params.last, None);
        assert_eq!(params.before, None);
    }

    #[test]
    fn test_backward_fetch_uses_last_and_before() {
        let state = PageState {
            direction: Direction::Previous,
            ..paged_state()
        };
        let params = state.fetch_params();
        assert_eq!(params.last, Some(PAGE_SIZE));
        assert_eq!(params.before.as_deref(), Some("cursor-42"));
        assert_eq!(params.first, None);
        assert_eq!(params.after, None);
    }

    #[test]
    fn test_upstream_query_narrows_by_text_and_dates_only() {
        let state = PageState {
            query: Some("1001".to_string()),
            status: Some(FulfillmentStatus::Fulfilled),
            payment_status: Some(FinancialStatus::Paid),
            date_from: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            date_to: Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            ..PageState::default()
        };
        let params = state.fetch_params();
        assert_eq!(
            params.query.as_deref(),
            Some("name:1001 created_at:>='2026-01-01' created_at:<='2026-01-31'")
        );
    }

    #[test]
    fn test_next_advances_cursor() {
        let state = PageState::default().apply(NavigationAction::Next, &page_info(true, false));
        assert_eq!(state.cursor.as_deref(), Some("end"));
        assert_eq!(state.direction, Direction::Next);
    }

    #[test]
    fn test_previous_rewinds_cursor() {
        let state = paged_state().apply(NavigationAction::Previous, &page_info(true, true));
        assert_eq!(state.cursor.as_deref(), Some("start"));
        assert_eq!(state.direction, Direction::Previous);
    }

    #[test]
    fn test_next_is_noop_when_exhausted() {
        let state = paged_state();
        let next = state.apply(NavigationAction::Next, &page_info(false, true));
        assert_eq!(next, state);
    }

    #[test]
    fn test_previous_is_noop_when_exhausted() {
        let state = paged_state();
        let next = state.apply(NavigationAction::Previous, &page_info(true, false));
        assert_eq!(next, state);
    }

    #[test]
    fn test_every_filter_mutation_clears_cursor() {
        let info = page_info(true, true);
        let actions = [
            NavigationAction::SetQuery(Some("1002".to_string())),
            NavigationAction::SetStatus(Some(FulfillmentStatus::Fulfilled)),
            NavigationAction::SetStatus(None),
            NavigationAction::SetPaymentStatus(Some(FinancialStatus::Paid)),
            NavigationAction::SetDateRange {
                from: Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
                to: None,
            },
            NavigationAction::ClearFilters,
        ];
        for action in actions {
            let next = paged_state().apply(action, &info);
            assert_eq!(next.cursor, None);
            assert_eq!(next.direction, Direction::Next);
        }
    }

    #[test]
    fn test_clear_filters_resets_to_unfiltered_first_page() {
        let state = paged_state().apply(NavigationAction::ClearFilters, &page_info(true, true));
        assert_eq!(state, PageState::default());
        assert!(!state.has_filters());
    }

    #[test]
    fn test_empty_query_counts_as_no_filter() {
        let state =
            PageState::default().apply(NavigationAction::SetQuery(Some(String::new())), &page_info(false, false));
        assert_eq!(state.query, None);
        assert!(!state.has_filters());
    }

    #[test]
    fn test_post_filter_by_status() {
        let state = PageState {
            status: Some(FulfillmentStatus::Fulfilled),
            ..PageState::default()
        };
        let orders = vec![
            order("FULFILLED", "PAID"),
            order("UNFULFILLED", "PAID"),
            order("FULFILLED", "PENDING"),
        ];
        let filtered = filter_orders(orders, &state);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_post_filter_by_both_statuses() {
        let state = PageState {
            status: Some(FulfillmentStatus::Fulfilled),
            payment_status: Some(FinancialStatus::Paid),
            ..PageState::default()
        };
        let orders = vec![
            order("FULFILLED", "PAID"),
            order("UNFULFILLED", "PAID"),
            order("FULFILLED", "PENDING"),
        ];
        let filtered = filter_orders(orders, &state);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_post_filter_without_filters_keeps_everything() {
        let orders = vec![order("FULFILLED", "PAID"), order("ON_HOLD", "VOIDED")];
        let filtered = filter_orders(orders, &PageState::default());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_fetch_phase_transitions() {
        let phase = FetchPhase::Idle.start_fetch();
        assert_eq!(phase, FetchPhase::Fetching);
        assert_eq!(phase.fetch_succeeded(), FetchPhase::Idle);
        assert_eq!(phase.fetch_failed(), FetchPhase::Error);
    }
}
