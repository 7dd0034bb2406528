// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AppState;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub(crate) static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Kwacha", "kwacha"));

/// Key of the persisted [`AppState`] record.
pub const STATE_KEY: &str = "financeTrackerData";
/// Key of the cached exchange rates.
pub const RATES_KEY: &str = "exchangeRates";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("kwacha.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
        .optional()
        .with_context(|| format!("Read key '{}'", key))?;
    Ok(v)
}

pub fn put_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![key, value],
    )
    .with_context(|| format!("Write key '{}'", key))?;
    Ok(())
}

/// Delete a record. Returns whether one was stored.
pub fn remove_value(conn: &Connection, key: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM kv WHERE key=?1", params![key])
        .with_context(|| format!("Delete key '{}'", key))?;
    Ok(n > 0)
}

/// Read and decode a JSON record. Absent, unreadable and undecodable records
/// all come back as `None`.
pub fn load_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Option<T> {
    let raw = match get_value(conn, key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored record");
            return None;
        }
        Err(e) => {
            warn!(key, "Could not load state: {e:#}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, "Discarding unreadable stored record: {e}");
            None
        }
    }
}

/// Encode and store a JSON record. Failures are logged and otherwise ignored.
pub fn save_json<T: Serialize>(conn: &Connection, key: &str, value: &T) {
    let res = serde_json::to_string(value)
        .context("Serialize record")
        .and_then(|raw| put_value(conn, key, &raw));
    match res {
        Ok(()) => debug!(key, "saved record"),
        Err(e) => warn!(key, "Could not save state: {e:#}"),
    }
}

pub fn load_state(conn: &Connection) -> Option<AppState> {
    load_json(conn, STATE_KEY)
}

pub fn load_or_default(conn: &Connection) -> AppState {
    load_state(conn).unwrap_or_default()
}

pub fn save_state(conn: &Connection, state: &AppState) {
    save_json(conn, STATE_KEY, state)
}
