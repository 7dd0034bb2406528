// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db::{self, RATES_KEY};
use crate::utils::{http_client, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

pub const SUPPORTED_CURRENCIES: [&str; 5] = ["ZMW", "USD", "EUR", "GBP", "ZAR"];

/// Units of each currency per 1 USD.
pub type Rates = BTreeMap<String, Decimal>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRates {
    pub fetched_at: DateTime<Utc>,
    pub rates: Rates,
}

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", _)) => match refresh(conn, settings) {
            Some(cached) => println!(
                "Fetched {} rates at {}",
                cached.rates.len(),
                cached.fetched_at.to_rfc3339()
            ),
            None => println!("Exchange rates are unavailable right now; keeping cached rates."),
        },
        Some(("list", _)) => list_rates(conn)?,
        Some(("clear", _)) => {
            if clear_cache(conn)? {
                println!("Cleared cached exchange rates.");
            } else {
                println!("No cached rates to clear.");
            }
        }
        Some(("convert", sub)) => convert_amount(conn, settings, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Latest {
    result: String,
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
}

/// Decode an `open.er-api.com` style body. Anything but a successful result
/// carrying a rates object is treated as a failure.
pub fn parse_latest(body: &str) -> Option<Rates> {
    let latest: Latest = match serde_json::from_str(body) {
        Ok(l) => l,
        Err(e) => {
            warn!("Unexpected exchange rate payload: {e}");
            return None;
        }
    };
    if latest.result != "success" {
        warn!(result = %latest.result, "Exchange rate API returned an error");
        return None;
    }
    let rates = latest.rates?;
    Some(
        rates
            .into_iter()
            .filter_map(|(code, rate)| Decimal::try_from(rate).ok().map(|d| (code, d)))
            .collect(),
    )
}

pub fn fetch_latest(client: &reqwest::blocking::Client, url: &str) -> Option<Rates> {
    let body = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text());
    match body {
        Ok(body) => parse_latest(&body),
        Err(e) => {
            warn!("Error fetching latest exchange rates: {e}");
            None
        }
    }
}

/// Fetch rates and cache them. Returns `None` (cache untouched) on failure.
pub fn refresh(conn: &Connection, settings: &Settings) -> Option<CachedRates> {
    let client = match http_client() {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not build HTTP client: {e:#}");
            return None;
        }
    };
    let rates = fetch_latest(&client, &settings.rates_url)?;
    let cached = CachedRates {
        fetched_at: Utc::now(),
        rates,
    };
    db::save_json(conn, RATES_KEY, &cached);
    info!(count = cached.rates.len(), "cached exchange rates");
    Some(cached)
}

pub fn cached_rates(conn: &Connection) -> Option<CachedRates> {
    db::load_json(conn, RATES_KEY)
}

pub fn clear_cache(conn: &Connection) -> Result<bool> {
    let removed = db::remove_value(conn, RATES_KEY)?;
    info!(removed, "cleared exchange rate cache");
    Ok(removed)
}

/// Convert through USD. `None` when either currency has no usable rate.
pub fn convert(rates: &Rates, amount: Decimal, from: &str, to: &str) -> Option<Decimal> {
    let rate_from = rates.get(from).filter(|r| !r.is_zero())?;
    let rate_to = rates.get(to).filter(|r| !r.is_zero())?;
    let usd = amount.checked_div(*rate_from)?;
    usd.checked_mul(*rate_to)
}

fn list_rates(conn: &Connection) -> Result<()> {
    let Some(cached) = cached_rates(conn) else {
        println!("No cached rates; run `kwacha fx fetch` first.");
        return Ok(());
    };
    let data = SUPPORTED_CURRENCIES
        .iter()
        .map(|code| {
            let rate = cached
                .rates
                .get(*code)
                .map(|r| format!("{:.4}", r))
                .unwrap_or_else(|| "N/A".to_string());
            vec![code.to_string(), rate]
        })
        .collect();
    println!("{}", pretty_table(&["Currency", "Per USD"], data));
    println!("As of {}", cached.fetched_at.to_rfc3339());
    Ok(())
}

fn convert_amount(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").context("amount is required")?)?;
    let from = sub
        .get_one::<String>("from")
        .context("from is required")?
        .trim()
        .to_uppercase();
    let to = sub
        .get_one::<String>("to")
        .context("to is required")?
        .trim()
        .to_uppercase();

    let cached = match cached_rates(conn) {
        Some(c) => Some(c),
        None => refresh(conn, settings),
    };
    let Some(cached) = cached else {
        println!("Exchange rates are unavailable; try `kwacha fx fetch` later.");
        return Ok(());
    };
    match convert(&cached.rates, amount, &from, &to) {
        Some(res) => println!("{} {} -> {:.2} {}", amount, from, res.round_dp(2), to),
        None => println!("{} {} -> N/A {}", amount, from, to),
    }
    Ok(())
}
