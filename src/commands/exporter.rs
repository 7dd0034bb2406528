// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::Transaction;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .context("format is required")?
        .to_lowercase();
    let out = sub.get_one::<String>("out").context("out is required")?;

    let state = db::load_or_default(conn);
    let txs = &state.financial_data.transactions;

    match fmt.as_str() {
        "csv" => write_csv(out, txs)?,
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "title": t.title,
                        "type": t.kind.as_str(),
                        "category": t.category,
                        "amount": t.amount.normalize().to_string(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => anyhow::bail!("Unsupported export format '{}'", other),
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}

fn write_csv(out: &str, txs: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    wtr.write_record(["id", "date", "title", "type", "category", "amount"])?;
    for t in txs {
        let amount = t.amount.normalize().to_string();
        wtr.write_record([
            t.id.as_str(),
            t.date.as_str(),
            t.title.as_str(),
            t.kind.as_str(),
            t.category.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
