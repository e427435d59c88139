#![deny(unsafe_code)]

mod common;
mod config;
mod constants;
mod control;
mod input;
mod manager;
mod window;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Store;

#[derive(Parser)]
#[command(name = "sticky-notes")]
#[command(version)]
#[command(about = "Always-available desktop sticky notes with a global show/hide hotkey", long_about = None)]
struct Cli {
    /// Directory holding window-config.json and notes.json
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    debug: bool,

    /// Start with the window hidden; the hotkey brings it up
    #[arg(long)]
    hidden: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = Store::new(cli.data_dir.unwrap_or_else(Store::default_dir));
    common::debug::log_system_info(store.dir());

    info!(hidden = cli.hidden, "Starting sticky notes");
    manager::run_gui(store, cli.hidden)
}
