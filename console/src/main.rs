//! Administrative console entry-point.
//!
//! Parses the command line, loads `ADMIN_CONSOLE_*` settings, and drives the
//! requested screen against the hosted backend's REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use admin_console::config::ConsoleSettings;
use admin_console::inbound::cli::{self, Cli};
use admin_console::outbound::rest::{RestCredentials, RestGateway};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build console runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Cli) -> Result<()> {
    // Command-line flags belong to clap; settings come from env and files only.
    let settings = ConsoleSettings::load_from_iter([OsString::from("admin-console")])
        .map_err(|err| eyre!("failed to load console settings: {err}"))?;
    let config = settings.resolve().wrap_err("invalid console settings")?;

    let gateway = RestGateway::new(
        config.gateway_url,
        RestCredentials {
            api_key: config.api_key,
            access_token: config.access_token,
        },
        config.request_timeout,
    )
    .wrap_err("failed to build REST gateway")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = cli::run(
        args,
        Arc::new(gateway),
        config.viewer.as_ref(),
        config.locale,
        &mut out,
    )
    .await;
    out.flush().wrap_err("failed to flush output")?;
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.is_retryable() => {
            Err(err).wrap_err("command failed; the backend may be unreachable, try again")
        }
        Err(err) => Err(err).wrap_err("command failed"),
    }
}
