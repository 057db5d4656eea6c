//! `alerts` entry point: loads settings, wires services and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod cli;

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use alerts::app::AlertsApp;
use alerts::config::AlertsSettings;

use crate::cli::{CliArgs, execute};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = AlertsSettings::load_from_iter([OsString::from("alerts")])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    let app = AlertsApp::from_settings(&settings, Arc::new(DefaultClock))
        .wrap_err("failed to start alerts")?;

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    let output = runtime.block_on(execute(&app, args.command))?;
    let rendered = serde_json::to_string_pretty(&output).wrap_err("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
