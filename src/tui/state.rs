//! Order page view state and its reducer.

use crate::models::Order;

/// Local, transient state of the order page.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// An order fetch is in flight.
    pub loading: bool,
    /// Why the last fetch failed.
    pub error: Option<String>,
    /// `None` until a fetch succeeds.
    pub order: Option<Order>,
    /// A payment was just recorded; cleared once the order is re-fetched.
    pub success_pay: bool,
    /// The backend is recording a payment.
    pub loading_pay: bool,
    /// Why the last payment failed.
    pub error_pay: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            order: None,
            success_pay: false,
            loading_pay: false,
            error_pay: None,
        }
    }
}

/// Transitions of [`ViewState`].
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    FetchRequest,
    FetchSuccess(Order),
    FetchFail(String),
    PayRequest,
    /// Carries the order as updated by the backend.
    PaySuccess(Order),
    PayFail(String),
    PayReset,
}

/// Applies `action` to `state`.
pub fn reduce(state: ViewState, action: ViewAction) -> ViewState {
    match action {
        ViewAction::FetchRequest => ViewState {
            loading: true,
            ..state
        },
        ViewAction::FetchSuccess(order) => ViewState {
            loading: false,
            order: Some(order),
            error: None,
            ..state
        },
        ViewAction::FetchFail(error) => ViewState {
            loading: false,
            error: Some(error),
            ..state
        },
        ViewAction::PayRequest => ViewState {
            loading_pay: true,
            ..state
        },
        ViewAction::PaySuccess(order) => ViewState {
            loading_pay: false,
            success_pay: true,
            order: Some(order),
            ..state
        },
        ViewAction::PayFail(error) => ViewState {
            loading_pay: false,
            error_pay: Some(error),
            ..state
        },
        ViewAction::PayReset => ViewState {
            loading_pay: false,
            success_pay: false,
            ..state
        },
    }
}
