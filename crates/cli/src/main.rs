//! Checkout demo entry point.

use std::process::ExitCode;

use clap::Parser;
use cli::{Args, Config};
use domain::CartId;
use metrics_exporter_prometheus::PrometheusBuilder;

fn main() -> ExitCode {
    let args = Args::parse();

    // 1. Configuration: environment first, flags override
    let mut config = Config::from_env();
    if let Some(path) = args.catalog {
        config.catalog_path = path;
    }

    // 2. Initialize tracing
    cli::init_tracing(&config);

    // 3. Install Prometheus metrics recorder when a dump was requested
    let metrics_handle = if config.print_metrics {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %err, "failed to install Prometheus recorder");
                None
            }
        }
    } else {
        None
    };

    // 4. Replay actions and print the snapshot
    let cart_id = args.cart_id.unwrap_or_else(CartId::new);
    let result = cli::run(&config, cart_id, &args.actions, std::io::stdout().lock());

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    match result {
        Ok(()) => {
            println!();
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "checkout demo failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
