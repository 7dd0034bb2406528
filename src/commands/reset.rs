// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{AppState, Snapshot};
use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let demo = m.get_flag("demo");
    let state = reset(conn, demo);
    println!(
        "State reset to {} data for {}",
        if demo { "demo" } else { "default" },
        state.user_name
    );
    Ok(())
}

/// Overwrite the stored record, keeping the profile name.
pub fn reset(conn: &Connection, demo: bool) -> AppState {
    let user_name = db::load_or_default(conn).user_name;
    let financial_data = if demo { Snapshot::demo() } else { Snapshot::default() };
    let state = AppState {
        user_name,
        financial_data,
    };
    db::save_state(conn, &state);
    info!(demo, "state reset");
    state
}
