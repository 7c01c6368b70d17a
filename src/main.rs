mod cli;

use std::sync::Arc;

use clap::Parser;
use storefront_order::StorefrontError;
use storefront_order::api::ApiClient;
use storefront_order::checkout::PayPalButtons;
use storefront_order::config::fetch_config;
use storefront_order::models::Session;
use storefront_order::tui::event::{spawn_event_reader, spawn_tick_timer};
use storefront_order::tui::{App, AppContext, Runtime, restore_terminal, run, setup_terminal};
use storefront_order::{credentials, logging, tls};

use cli::Cli;

/// Tick interval for clearing stale notifications.
const TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
    let cli = Cli::parse();

    if !cli.no_keychain {
        credentials::populate_env_from_keychain();
    }
    let mut app_config = fetch_config()?;
    if let Some(api_url) = cli.api_url {
        app_config.api.base_url = api_url.trim_end_matches('/').to_string();
    }

    logging::init(&app_config.log_file)?;

    let backend_tls = tls::backend_tls_config(app_config.api.ca_file.as_deref())?;
    let api = ApiClient::new(&app_config.api.base_url, backend_tls)?;

    let provider_http = reqwest::Client::builder()
        .use_preconfigured_tls(tls::build_tls_config())
        .build()
        .map_err(|e| StorefrontError::Tls(format!("failed to build HTTP client: {e}")))?;
    let buttons = PayPalButtons::new(
        provider_http,
        app_config.paypal.api_url.clone(),
        app_config.paypal.client_secret.clone(),
    );

    let session = match app_config.session.take() {
        Some(user) => Session::signed_in(user),
        None => Session::anonymous(),
    };

    tracing::info!(
        order_id = %cli.order_id,
        backend = %api.base_url(),
        signed_in = session.is_signed_in(),
        "starting order page"
    );

    let ctx = AppContext {
        api,
        buttons: Arc::new(buttons),
        persist_session: !cli.no_keychain,
    };
    let (mut runtime, mut rx) = Runtime::new(ctx);
    let mut app = App::new(cli.order_id, session);

    let mut terminal = setup_terminal()?;
    spawn_event_reader(runtime.sender());
    spawn_tick_timer(runtime.sender(), TICK_MS);

    let result = run(&mut terminal, &mut app, &mut runtime, &mut rx).await;
    restore_terminal(&mut terminal)?;
    result
}
