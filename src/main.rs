// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kwacha::{cli, commands, config::Settings, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    init_logger(level);

    let settings = Settings::load()?;
    let conn = db::open_or_init()?;
    debug!(insights_key = settings.api_key.is_some(), "ready");

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("profile", sub)) => commands::profile::handle(&conn, &settings, sub)?,
        Some(("income", sub)) => commands::transactions::handle_income(&conn, &settings, sub)?,
        Some(("expense", sub)) => commands::transactions::handle_expense(&conn, &settings, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &settings, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&conn, &settings, sub)?,
        Some(("insights", _)) => commands::insights::handle(&conn, &settings)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        Some(("reset", sub)) => commands::reset::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// RUST_LOG wins when set; otherwise `level` applies to this crate only.
fn init_logger(level: &str) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
