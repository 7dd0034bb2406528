// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kwacha::commands::insights::{
    build_prompt, list_items, GenerateResponse, InsightsClient, EMPTY_RESPONSE, UNAVAILABLE,
};
use kwacha::config::Settings;
use kwacha::models::Snapshot;

#[test]
fn prompt_embeds_the_snapshot() {
    let prompt = build_prompt(&Snapshot::demo()).unwrap();
    assert!(prompt.contains("Total Balance: 124500.50"));
    assert!(prompt.contains(r#""name":"Side Hustle""#));
    assert!(prompt.contains("Grocery Shopping"));
    assert!(prompt.contains("<li> tags"));
}

#[test]
fn missing_credential_degrades_to_fallback() {
    let settings = Settings {
        api_key: None,
        ..Settings::default()
    };
    let text = InsightsClient::from_settings(&settings).insights(&Snapshot::default());
    assert_eq!(text, UNAVAILABLE);
}

#[test]
fn response_text_is_joined_from_parts() {
    let resp: GenerateResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"parts":[{"text":"<li>Save more</li>"},{"text":"<li>Spend less</li>"}],"role":"model"}}]}"#,
    )
    .unwrap();
    assert_eq!(resp.text().as_deref(), Some("<li>Save more</li><li>Spend less</li>"));

    let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert!(empty.text().is_none());
    assert!(!EMPTY_RESPONSE.is_empty());
}

#[test]
fn list_items_strip_markup() {
    let items = list_items(
        "<li><strong>Build a buffer:</strong> keep 3 months aside.</li>\n<LI>Track Leisure.</LI>",
    );
    assert_eq!(
        items,
        vec!["Build a buffer: keep 3 months aside.", "Track Leisure."]
    );
}

#[test]
fn plain_text_falls_back_to_lines() {
    let items = list_items(&format!("{}\n\n", UNAVAILABLE));
    assert_eq!(items, vec![UNAVAILABLE.to_string()]);
}
