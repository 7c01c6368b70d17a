use clap::Parser;

/// Terminal order page for the storefront.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Identifier of the order to show.
    pub order_id: String,

    /// Storefront backend base URL; overrides `STOREFRONT_API_URL`.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Do not read or write the session in the OS keychain.
    #[arg(long)]
    pub no_keychain: bool,
}
