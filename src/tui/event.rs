//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::checkout::{PAYMENT_CURRENCY, ScriptAction, ScriptOptions, ScriptStatus};
use crate::models::{Order, ProviderOrder, UserInfo};

use super::app::{App, Route};
use super::state::ViewAction;

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Result of an order fetch, tagged with the fetch generation.
    OrderFetched {
        generation: u64,
        result: Result<Order, String>,
    },
    /// A reducer action produced by a background task.
    View(ViewAction),
    /// Provider client id fetched from the backend.
    ClientId(Result<String, String>),
    /// Payment buttons finished loading.
    ScriptLoaded(Result<(), String>),
    /// Provider order created for the buyer to approve.
    PaymentCreated(Result<ProviderOrder, String>),
    /// The backend recorded the payment.
    PaymentRecorded,
    /// The payment provider reported an error.
    PaymentError(String),

    /// Sign-in attempt finished.
    SignedIn(Result<UserInfo, String>),

    /// Request to quit the application.
    Quit,
}

/// Actions that require external handling (network calls, keychain).
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Initialize the payment buttons with these options.
    LoadButtons(ScriptOptions),
    /// Create a provider order for the loaded order's total.
    CreatePayment,
    /// Capture an approved provider order and record it.
    Approve(String),
    /// Re-fetch the order.
    Reload,
    /// Sign in with the login form's credentials.
    SignIn { email: String, password: String },
    /// Persist the session after a successful sign-in.
    SaveSession,
    /// Forget the session.
    SignOut,
}

/// Spawns a task that reads terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            let message = match event {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    Message::Input(Event::Key(key))
                }
                Ok(CrosstermEvent::Resize(w, h)) => Message::Input(Event::Resize(w, h)),
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal event stream failed");
                    break;
                }
            };
            if tx.send(message).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::OrderFetched { generation, result } => {
            if !app.is_current_fetch(generation) {
                debug!(generation, "dropping superseded order fetch");
                return None;
            }
            match result {
                Ok(order) => app.dispatch(ViewAction::FetchSuccess(order)),
                Err(error) => app.dispatch(ViewAction::FetchFail(error)),
            }
            None
        }
        Message::View(action) => {
            app.dispatch(action);
            None
        }
        Message::ClientId(Ok(client_id)) => {
            let options = ScriptOptions {
                client_id,
                currency: PAYMENT_CURRENCY.to_string(),
            };
            app.dispatch_script(ScriptAction::ResetOptions(options.clone()));
            app.dispatch_script(ScriptAction::SetLoadingStatus(ScriptStatus::Pending));
            Some(Action::LoadButtons(options))
        }
        Message::ClientId(Err(error)) => {
            app.dispatch_script(ScriptAction::SetLoadingStatus(ScriptStatus::Rejected(
                error.clone(),
            )));
            app.notify_error(error);
            None
        }
        Message::ScriptLoaded(result) => {
            let status = match result {
                Ok(()) => ScriptStatus::Resolved,
                Err(error) => {
                    app.notify_error(error.clone());
                    ScriptStatus::Rejected(error)
                }
            };
            app.dispatch_script(ScriptAction::SetLoadingStatus(status));
            None
        }
        Message::PaymentCreated(result) => {
            app.checkout.creating = false;
            match result {
                Ok(order) => app.checkout.pending = Some(order),
                Err(error) => app.notify_error(error),
            }
            None
        }
        Message::PaymentRecorded => {
            app.checkout.pending = None;
            app.checkout.capturing = false;
            app.notify_success("Order is paid");
            None
        }
        Message::PaymentError(error) => {
            app.checkout.capturing = false;
            app.notify_error(error);
            None
        }
        Message::SignedIn(result) => {
            app.login.submitting = false;
            match result {
                Ok(user) => {
                    app.login.password.clear();
                    app.login.error = None;
                    app.session = crate::models::Session::signed_in(user);
                    app.navigate(Route::Order(app.order_id.clone()));
                    Some(Action::SaveSession)
                }
                Err(error) => {
                    app.login.error = Some(error);
                    None
                }
            }
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_toasts();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match app.route {
        Route::Order(_) => handle_order_keys(app, key),
        Route::Login => handle_login_keys(app, key),
    }
}

/// Handles keys on the order page.
fn handle_order_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('p') => {
            if !app.can_start_payment() {
                return None;
            }
            app.checkout.creating = true;
            app.checkout.pending = None;
            Some(Action::CreatePayment)
        }
        KeyCode::Char('a') => {
            if app.view.loading_pay || app.checkout.capturing {
                return None;
            }
            let provider_order_id = app.checkout.pending.as_ref()?.id.clone();
            app.checkout.capturing = true;
            Some(Action::Approve(provider_order_id))
        }
        KeyCode::Char('x') => {
            app.session.sign_out();
            app.checkout = Default::default();
            Some(Action::SignOut)
        }
        _ => None,
    }
}

/// Handles keys on the login page.
fn handle_login_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let form = &mut app.login;
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.toggle_field();
            None
        }
        KeyCode::Enter => {
            if form.submitting {
                return None;
            }
            if form.email.is_empty() || form.password.is_empty() {
                form.error = Some("Email and password are required".to_string());
                return None;
            }
            form.submitting = true;
            form.error = None;
            Some(Action::SignIn {
                email: form.email.as_str().trim().to_string(),
                password: form.password.as_str().to_string(),
            })
        }
        KeyCode::Char(c) => {
            form.focused_mut().insert(c);
            None
        }
        KeyCode::Backspace => {
            form.focused_mut().backspace();
            None
        }
        KeyCode::Delete => {
            form.focused_mut().delete();
            None
        }
        KeyCode::Left => {
            form.focused_mut().move_left();
            None
        }
        KeyCode::Right => {
            form.focused_mut().move_right();
            None
        }
        KeyCode::Home => {
            form.focused_mut().move_home();
            None
        }
        KeyCode::End => {
            form.focused_mut().move_end();
            None
        }
        _ => None,
    }
}
