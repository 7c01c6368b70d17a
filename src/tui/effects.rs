//! Side-effect planning for the order page.
//!
//! The planner is pure: it looks at the app and returns the effects the
//! runtime should perform. It is re-run whenever [`EffectDeps`] change.

use super::app::{App, Route};

/// The inputs the planner depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectDeps {
    pub signed_in: bool,
    pub route: Route,
    pub order_revision: u64,
    pub success_pay: bool,
}

impl EffectDeps {
    pub fn of(app: &App) -> Self {
        Self {
            signed_in: app.session.is_signed_in(),
            route: app.route.clone(),
            order_revision: app.order_revision,
            success_pay: app.view.success_pay,
        }
    }
}

/// Work the runtime performs on the planner's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Navigate(Route),
    /// Fetch the order with this identifier.
    FetchOrder(String),
    /// Clear the payment-success cycle.
    ResetPayment,
    /// Fetch the provider client id and load the payment buttons.
    LoadPaymentScript,
}

/// Decides which effects the current state calls for.
///
/// - nobody signed in on the order page: go to the login view, nothing else;
/// - no order, a different order, or a payment just recorded: fetch the
///   route's order (and end the payment-success cycle);
/// - otherwise load the payment buttons unless they already are.
pub fn plan(app: &App) -> Vec<Effect> {
    let Some(route_id) = app.route_order_id() else {
        return Vec::new();
    };

    if !app.session.is_signed_in() {
        return vec![Effect::Navigate(Route::Login)];
    }

    let stale = match &app.view.order {
        None => true,
        Some(order) => order.id != route_id,
    };

    if stale || app.view.success_pay {
        let mut effects = vec![Effect::FetchOrder(route_id.to_string())];
        if app.view.success_pay {
            effects.push(Effect::ResetPayment);
        }
        return effects;
    }

    if app.script.status.is_loaded_or_loading() {
        return Vec::new();
    }
    vec![Effect::LoadPaymentScript]
}
