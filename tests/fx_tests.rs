// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use kwacha::commands::fx::{cached_rates, clear_cache, convert, parse_latest, CachedRates, Rates};
use kwacha::db::{self, RATES_KEY};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn rates() -> Rates {
    let mut r = Rates::new();
    r.insert("USD".into(), Decimal::ONE);
    r.insert("ZMW".into(), Decimal::from(25));
    r.insert("EUR".into(), Decimal::new(80, 2));
    r.insert("XXX".into(), Decimal::ZERO);
    r
}

#[test]
fn parses_successful_payload() {
    let body = r#"{"result":"success","base_code":"USD","rates":{"USD":1,"ZMW":26.5,"EUR":0.92}}"#;
    let r = parse_latest(body).unwrap();
    assert_eq!(r.len(), 3);
    assert_eq!(r["USD"], Decimal::ONE);
    assert_eq!(r["ZMW"], Decimal::new(265, 1));
}

#[test]
fn rejects_error_and_malformed_payloads() {
    assert!(parse_latest(r#"{"result":"error","error-type":"invalid-key"}"#).is_none());
    assert!(parse_latest(r#"{"result":"success"}"#).is_none());
    assert!(parse_latest(r#"{"rates":{"USD":1}}"#).is_none());
    assert!(parse_latest("<html>502</html>").is_none());
}

#[test]
fn converts_through_usd() {
    let r = rates();
    // 100 ZMW -> 4 USD -> 3.20 EUR
    let res = convert(&r, Decimal::from(100), "ZMW", "EUR").unwrap();
    assert_eq!(format!("{:.2}", res.round_dp(2)), "3.20");
    let back = convert(&r, Decimal::from(4), "USD", "ZMW").unwrap();
    assert_eq!(back, Decimal::from(100));
}

#[test]
fn missing_or_zero_rate_is_not_convertible() {
    let r = rates();
    assert!(convert(&r, Decimal::ONE, "ZMW", "GBP").is_none());
    assert!(convert(&r, Decimal::ONE, "XXX", "USD").is_none());
    assert!(convert(&r, Decimal::ONE, "USD", "XXX").is_none());
}

#[test]
fn rate_cache_lives_in_the_kv_store() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    assert!(cached_rates(&conn).is_none());

    let cached = CachedRates {
        fetched_at: DateTime::<Utc>::from_timestamp(1_754_049_600, 0).unwrap(),
        rates: rates(),
    };
    db::save_json(&conn, RATES_KEY, &cached);
    assert_eq!(cached_rates(&conn), Some(cached));

    assert!(clear_cache(&conn).unwrap());
    assert!(cached_rates(&conn).is_none());
    assert!(!clear_cache(&conn).unwrap());
}

#[test]
fn cli_has_fx_clear() {
    let matches = kwacha::cli::build_cli().get_matches_from(["kwacha", "fx", "clear"]);
    let (_, fx_m) = matches.subcommand().unwrap();
    assert_eq!(fx_m.subcommand_name(), Some("clear"));
}
