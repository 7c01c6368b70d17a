//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::checkout::{ScriptAction, ScriptState};
use crate::models::{ProviderOrder, Session};

use super::input::text_input::TextInput;
use super::state::{ViewAction, ViewState, reduce};

/// How long a notification stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    // -- Routing --
    /// Current view.
    pub route: Route,
    /// Order identifier from the command line.
    pub order_id: String,

    // -- Session --
    pub session: Session,

    // -- Order Page --
    /// Reducer-managed page state.
    pub view: ViewState,
    /// Hosted payment integration loader.
    pub script: ScriptState,
    /// Provider order waiting for buyer approval.
    pub checkout: CheckoutState,
    /// Bumped on every fetch so late results can be recognized.
    pub fetch_generation: u64,
    /// Bumped whenever the stored order changes.
    pub order_revision: u64,

    // -- Login Page --
    pub login: LoginForm,

    // -- UI State --
    /// Transient notification.
    pub toast: Option<Toast>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app for `order_id`, starting on the order page.
    ///
    /// Redirecting an anonymous session to the login view is left to the
    /// effect planner.
    pub fn new(order_id: impl Into<String>, session: Session) -> Self {
        let order_id = order_id.into();
        Self {
            route: Route::Order(order_id.clone()),
            order_id,
            session,
            view: ViewState::default(),
            script: ScriptState::default(),
            checkout: CheckoutState::default(),
            fetch_generation: 0,
            order_revision: 0,
            login: LoginForm::default(),
            toast: None,
            should_quit: false,
        }
    }

    /// Runs `action` through the page reducer.
    pub fn dispatch(&mut self, action: ViewAction) {
        if matches!(action, ViewAction::FetchSuccess(_) | ViewAction::PaySuccess(_)) {
            self.order_revision += 1;
        }
        let state = std::mem::take(&mut self.view);
        self.view = reduce(state, action);
    }

    /// Runs `action` through the payment script loader.
    pub fn dispatch_script(&mut self, action: ScriptAction) {
        let state = std::mem::take(&mut self.script);
        self.script = state.reduce(action);
    }

    /// Starts a new order fetch and returns its generation.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.dispatch(ViewAction::FetchRequest);
        self.fetch_generation
    }

    /// Whether a fetch result belongs to the latest fetch.
    pub fn is_current_fetch(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = %route.path(), "navigating");
        self.route = route;
    }

    /// Order identifier of the current route, if it is an order page.
    pub fn route_order_id(&self) -> Option<&str> {
        match &self.route {
            Route::Order(id) => Some(id),
            Route::Login => None,
        }
    }

    /// Shows a success notification.
    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(ToastLevel::Success, message));
    }

    /// Shows an error notification.
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(ToastLevel::Error, message));
    }

    /// Clears notifications older than five seconds.
    pub fn clear_stale_toasts(&mut self) {
        if let Some(ref toast) = self.toast
            && toast.timestamp.elapsed() > TOAST_TTL
        {
            self.toast = None;
        }
    }

    /// Terminal window title for the current view.
    pub fn title(&self) -> String {
        match &self.route {
            Route::Login => "Sign In".to_string(),
            Route::Order(id) => match (&self.view.error, self.view.loading) {
                (Some(error), false) => error.clone(),
                _ => format!("Order {id}"),
            },
        }
    }

    /// Whether the pay key should start a new payment right now.
    pub fn can_start_payment(&self) -> bool {
        let unpaid = self.view.order.as_ref().is_some_and(|o| !o.is_paid);
        unpaid
            && !self.view.loading
            && !self.view.loading_pay
            && !self.checkout.creating
            && !self.checkout.capturing
            && self.script.status == crate::checkout::ScriptStatus::Resolved
    }
}

/// Views the app can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Order detail page for an identifier.
    Order(String),
    Login,
}

impl Route {
    /// Storefront path of the view.
    pub fn path(&self) -> String {
        match self {
            Route::Order(id) => format!("/order/{id}"),
            Route::Login => "/login".to_string(),
        }
    }
}

/// Provider-side checkout progress.
#[derive(Clone, Debug, Default)]
pub struct CheckoutState {
    /// A provider order is being created.
    pub creating: bool,
    /// Created provider order, waiting for approval.
    pub pending: Option<ProviderOrder>,
    /// A capture of `pending` is in flight.
    pub capturing: bool,
}

/// Which login field has focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Sign-in form state.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: TextInput,
    pub password: TextInput,
    pub field: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    /// Moves focus to the other field.
    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// The input that has focus.
    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Notification with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// When the notification was shown.
    pub timestamp: Instant,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Instant::now(),
        }
    }
}
