//! Runs effects and actions for the UI loop.
//!
//! The UI loop owns the [`App`]; everything that talks to the network runs
//! in a task spawned here and reports back as a [`Message`]. Tasks live in
//! a [`JoinSet`] and are aborted when the runtime is dropped, so nothing
//! outlives the page.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, error_message};
use crate::checkout::{PaymentButtons, ScriptAction, ScriptStatus};
use crate::credentials;
use crate::models::CreateOrderRequest;

use super::app::App;
use super::effects::{Effect, EffectDeps, plan};
use super::event::{Action, Message, update};
use super::state::ViewAction;
use super::terminal::{Tui, set_title};
use super::ui::render;

/// Collaborators the page works with, passed in explicitly.
pub struct AppContext<B> {
    pub api: ApiClient,
    pub buttons: Arc<B>,
    /// Whether to write session changes to the OS keychain.
    pub persist_session: bool,
}

impl<B> Clone for AppContext<B> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            buttons: Arc::clone(&self.buttons),
            persist_session: self.persist_session,
        }
    }
}

/// Executes effects and actions, feeding results back as messages.
pub struct Runtime<B: PaymentButtons> {
    ctx: AppContext<B>,
    tx: mpsc::UnboundedSender<Message>,
    tasks: JoinSet<()>,
    last_deps: Option<EffectDeps>,
}

impl<B: PaymentButtons> Runtime<B> {
    /// Creates a runtime and the receiver its tasks report to.
    pub fn new(ctx: AppContext<B>) -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runtime = Self {
            ctx,
            tx,
            tasks: JoinSet::new(),
            last_deps: None,
        };
        (runtime, rx)
    }

    /// Sender for input sources (terminal events, ticks).
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.tx.clone()
    }

    /// Number of background tasks not yet reaped.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Reaps one finished task; pends forever when there are none.
    pub async fn reap(&mut self) {
        match self.tasks.join_next().await {
            Some(Err(e)) if e.is_panic() => warn!(error = %e, "background task panicked"),
            Some(_) => {}
            None => std::future::pending().await,
        }
    }

    /// Applies a message and runs whatever follows from it.
    pub fn process(&mut self, app: &mut App, message: Message) {
        if let Some(action) = update(app, message) {
            self.handle_action(app, action);
        }
        self.sync_effects(app);
    }

    /// Re-plans effects if their inputs changed since the last run.
    ///
    /// Effects can change the inputs themselves (a reset, a navigation), so
    /// this loops until they settle.
    pub fn sync_effects(&mut self, app: &mut App) {
        loop {
            let deps = EffectDeps::of(app);
            if self.last_deps.as_ref() == Some(&deps) {
                return;
            }
            self.last_deps = Some(deps);
            for effect in plan(app) {
                self.apply_effect(app, effect);
            }
        }
    }

    fn apply_effect(&mut self, app: &mut App, effect: Effect) {
        debug!(?effect, "applying effect");
        match effect {
            Effect::Navigate(route) => app.navigate(route),
            Effect::FetchOrder(order_id) => self.fetch_order(app, order_id),
            Effect::ResetPayment => app.dispatch(ViewAction::PayReset),
            Effect::LoadPaymentScript => {
                let Some(token) = app.session.token().map(str::to_string) else {
                    return;
                };
                // Marked pending right away so a re-plan before the key
                // arrives does not fetch it twice.
                app.dispatch_script(ScriptAction::SetLoadingStatus(ScriptStatus::Pending));
                let api = self.ctx.api.clone();
                let tx = self.tx.clone();
                self.tasks.spawn(async move {
                    let result = api.paypal_client_id(&token).await.map_err(|e| {
                        warn!(error = %e, "checkout client id fetch failed");
                        error_message(&e)
                    });
                    let _ = tx.send(Message::ClientId(result));
                });
            }
        }
    }

    fn fetch_order(&mut self, app: &mut App, order_id: String) {
        let Some(token) = app.session.token().map(str::to_string) else {
            return;
        };
        let generation = app.begin_fetch();
        let api = self.ctx.api.clone();
        let tx = self.tx.clone();
        self.tasks.spawn(async move {
            let result = api
                .fetch_order(&order_id, &token)
                .await
                .map_err(|e| {
                    warn!(order_id, error = %e, "order fetch failed");
                    error_message(&e)
                });
            let _ = tx.send(Message::OrderFetched { generation, result });
        });
    }

    fn handle_action(&mut self, app: &mut App, action: Action) {
        match action {
            Action::LoadButtons(options) => {
                let buttons = Arc::clone(&self.ctx.buttons);
                let tx = self.tx.clone();
                self.tasks.spawn(async move {
                    let result = buttons.load(&options).await.map_err(|e| error_message(&e));
                    let _ = tx.send(Message::ScriptLoaded(result));
                });
            }
            Action::CreatePayment => {
                let Some(order) = app.view.order.as_ref() else {
                    return;
                };
                let request = CreateOrderRequest::for_order(order);
                info!(order_id = %order.id, amount = ?request.amount(), "creating provider order");
                let buttons = Arc::clone(&self.ctx.buttons);
                let tx = self.tx.clone();
                self.tasks.spawn(async move {
                    let result = buttons
                        .create_order(&request)
                        .await
                        .map_err(|e| error_message(&e));
                    let _ = tx.send(Message::PaymentCreated(result));
                });
            }
            Action::Approve(provider_order_id) => self.approve(app, provider_order_id),
            Action::Reload => {
                if let Some(order_id) = app.route_order_id().map(str::to_string) {
                    self.fetch_order(app, order_id);
                }
            }
            Action::SignIn { email, password } => {
                let api = self.ctx.api.clone();
                let tx = self.tx.clone();
                self.tasks.spawn(async move {
                    let result = api
                        .sign_in(&email, &password)
                        .await
                        .map_err(|e| error_message(&e));
                    let _ = tx.send(Message::SignedIn(result));
                });
            }
            Action::SaveSession => {
                if !self.ctx.persist_session {
                    return;
                }
                if let Some(user) = app.session.user()
                    && let Err(e) = credentials::save_session(user)
                {
                    warn!(error = %e, "could not store session");
                    app.notify_error(error_message(&e));
                }
            }
            Action::SignOut => {
                info!("signed out");
                if self.ctx.persist_session
                    && let Err(e) = credentials::clear_session()
                {
                    warn!(error = %e, "could not clear stored session");
                }
            }
        }
    }

    /// On-approval: capture with the provider, then record the payment
    /// with the backend.
    fn approve(&mut self, app: &mut App, provider_order_id: String) {
        let order_id = app.view.order.as_ref().map(|o| o.id.clone());
        let token = app.session.token().map(str::to_string);
        let (Some(order_id), Some(token)) = (order_id, token) else {
            app.checkout.capturing = false;
            return;
        };
        let api = self.ctx.api.clone();
        let buttons = Arc::clone(&self.ctx.buttons);
        let tx = self.tx.clone();

        self.tasks.spawn(async move {
            let details = match buttons.capture(&provider_order_id).await {
                Ok(details) => details,
                Err(e) => {
                    let _ = tx.send(Message::PaymentError(error_message(&e)));
                    return;
                }
            };

            let _ = tx.send(Message::View(ViewAction::PayRequest));
            match api.pay_order(&order_id, &details, &token).await {
                Ok(updated) => {
                    info!(order_id, capture_id = %details.id, "order paid");
                    let _ = tx.send(Message::View(ViewAction::PaySuccess(updated)));
                    let _ = tx.send(Message::PaymentRecorded);
                }
                Err(e) => {
                    warn!(order_id, error = %e, "backend rejected payment");
                    let message = error_message(&e);
                    let _ = tx.send(Message::View(ViewAction::PayFail(message.clone())));
                    let _ = tx.send(Message::PaymentError(message));
                }
            }
        });
    }
}

/// Drives the UI until the user quits.
///
/// Draws after every message, keeps the terminal title in step with the
/// page, and reaps finished background tasks in between.
pub async fn run<B: PaymentButtons>(
    terminal: &mut Tui,
    app: &mut App,
    runtime: &mut Runtime<B>,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> crate::Result<()> {
    let mut title = String::new();
    runtime.sync_effects(app);

    while !app.should_quit {
        let next_title = app.title();
        if next_title != title {
            set_title(terminal, &next_title)?;
            title = next_title;
        }

        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| crate::StorefrontError::Io(format!("failed to draw: {e}")))?;

        tokio::select! {
            message = rx.recv() => match message {
                Some(message) => runtime.process(app, message),
                None => break,
            },
            () = runtime.reap() => {}
        }
    }

    debug!(pending = runtime.pending_tasks(), "leaving the UI loop");
    Ok(())
}
