// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kwacha::config::{Settings, DEFAULT_INSIGHTS_MODEL, DEFAULT_RATES_URL};
use tempfile::tempdir;

#[test]
fn missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.rates_url, DEFAULT_RATES_URL);
}

#[test]
fn partial_file_overrides_only_given_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"currency_symbol":"ZK"}"#).unwrap();
    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.currency_symbol, "ZK");
    assert_eq!(settings.insights_model, DEFAULT_INSIGHTS_MODEL);
    assert!(settings.api_key.is_none());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "currency_symbol = 'ZK'").unwrap();
    let err = Settings::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid config"));
}
