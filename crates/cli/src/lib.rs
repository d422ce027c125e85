//! Checkout demo: loads a catalog, replays cart actions and emits the
//! checkout snapshot as JSON.

pub mod action;
pub mod config;
pub mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use domain::{Cart, CartId, Catalog, CheckoutSnapshot};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use action::{CartAction, ParseActionError};
pub use config::{Config, LogFormat};
pub use error::CliError;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cart", about = "Replay cart actions and print the checkout snapshot")]
pub struct Args {
    /// Catalog file; overrides CATALOG_PATH.
    #[arg(long, short)]
    pub catalog: Option<PathBuf>,

    /// Cart id reported in logs and the snapshot; random when omitted.
    #[arg(long, value_name = "UUID")]
    pub cart_id: Option<CartId>,

    /// Actions applied in order: add:SKU[:QTY], change:SKU:QTY, remove:SKU, reset.
    #[arg(value_name = "ACTION")]
    pub actions: Vec<CartAction>,
}

/// Installs the global tracing subscriber. Logs go to stderr.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Applies `actions` to a fresh cart and returns its snapshot.
pub fn checkout(
    catalog: &Catalog,
    cart_id: CartId,
    actions: &[CartAction],
) -> Result<CheckoutSnapshot, CliError> {
    let mut cart = Cart::with_id(cart_id);

    for action in actions {
        action.apply(&mut cart, catalog)?;
    }

    let snapshot = cart.checkout_snapshot();
    tracing::info!(
        cart_id = %snapshot.cart_id,
        lines = snapshot.line_count,
        total = %snapshot.total,
        "checkout snapshot ready"
    );
    Ok(snapshot)
}

/// Loads the configured catalog, runs the actions and writes the snapshot
/// as pretty JSON to `out`.
pub fn run(
    config: &Config,
    cart_id: CartId,
    actions: &[CartAction],
    out: impl Write,
) -> Result<(), CliError> {
    let catalog = Catalog::load(&config.catalog_path)?;
    let snapshot = checkout(&catalog, cart_id, actions)?;
    serde_json::to_writer_pretty(out, &snapshot)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_actions() {
        let args = Args::try_parse_from(["cart", "-c", "shop.json", "add:C10:3", "change:C10:2"])
            .unwrap();
        assert_eq!(args.catalog, Some(PathBuf::from("shop.json")));
        assert_eq!(args.actions.len(), 2);
        assert_eq!(args.cart_id, None);
    }

    #[test]
    fn test_args_parse_cart_id() {
        let id = CartId::new();
        let args = Args::try_parse_from(["cart", "--cart-id", &id.to_string(), "reset"]).unwrap();
        assert_eq!(args.cart_id, Some(id));

        assert!(Args::try_parse_from(["cart", "--cart-id", "42", "reset"]).is_err());
    }

    #[test]
    fn test_checkout_uses_given_cart_id() {
        let catalog = Catalog::from_json(
            r#"[{"id": "C10", "title": "C10 Chair", "unit_price": 10000}]"#,
        )
        .unwrap();
        let id = CartId::new();
        let actions: [CartAction; 1] = ["add:C10:2".parse().unwrap()];

        let snapshot = checkout(&catalog, id, &actions).unwrap();
        assert_eq!(snapshot.cart_id, id);
        assert_eq!(snapshot.total.cents(), 20_000);
    }

    #[test]
    fn test_args_reject_bad_action() {
        assert!(Args::try_parse_from(["cart", "add:C10:zero"]).is_err());
    }
}
