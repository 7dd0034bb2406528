// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::models::Snapshot;
use crate::utils::http_client;
use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

pub const EMPTY_RESPONSE: &str = "Unable to generate insights at this time.";
pub const UNAVAILABLE: &str =
    "AI insights are currently unavailable. Please check your connection.";

const SYSTEM_INSTRUCTION: &str = "You are a world-class personal finance advisor. \
Your advice is minimal, elegant, and highly practical.";

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li[^>]*>(.*?)</li>").expect("valid list item pattern"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

pub fn handle(conn: &Connection, settings: &Settings) -> Result<()> {
    let state = db::load_or_default(conn);
    let client = InsightsClient::from_settings(settings);
    let text = client.insights(&state.financial_data);
    for item in list_items(&text) {
        println!("• {}", item);
    }
    Ok(())
}

pub fn build_prompt(snapshot: &Snapshot) -> Result<String> {
    Ok(format!(
        "Analyze the following financial data for a user in Zambia (Currency: Kwacha).\n\
         \n\
         Data:\n\
         - Total Balance: {}\n\
         - Income Sources: {}\n\
         - Spending Categories: {}\n\
         - Recent Transactions: {}\n\
         \n\
         Provide 3 short, punchy, and professional insights or tips to improve their financial health.\n\
         Focus on the balance between business income and spending.\n\
         Keep the tone calm, encouraging, and professional.\n\
         Format as a simple HTML list using <li> tags, no <ul> wrapper.\n",
        snapshot.total_balance,
        serde_json::to_string(&snapshot.income_sources)?,
        serde_json::to_string(&snapshot.spending_categories)?,
        serde_json::to_string(&snapshot.transactions)?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, or `None` when it is missing or blank.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

pub struct InsightsClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl InsightsClient {
    pub fn from_settings(settings: &Settings) -> Self {
        InsightsClient {
            endpoint: settings.insights_endpoint.trim_end_matches('/').to_string(),
            model: settings.insights_model.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    /// Never fails: provider errors degrade to a fixed message.
    pub fn insights(&self, snapshot: &Snapshot) -> String {
        match self.generate(snapshot) {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_RESPONSE.to_string(),
            Err(e) => {
                warn!("Error fetching insights: {e:#}");
                UNAVAILABLE.to_string()
            }
        }
    }

    fn generate(&self, snapshot: &Snapshot) -> Result<Option<String>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no API key configured (set GEMINI_API_KEY)"))?;
        let prompt = build_prompt(snapshot)?;
        let body = json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        debug!(%url, "requesting insights");
        let resp: GenerateResponse = http_client()?
            .post(url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()
            .context("Decode insights response")?;
        Ok(resp.text())
    }
}

/// The `<li>` items of a response, tags stripped. Text without list markup
/// is split into non-empty lines instead.
pub fn list_items(text: &str) -> Vec<String> {
    let items: Vec<String> = LIST_ITEM
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| TAG.replace_all(m.as_str(), "").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !items.is_empty() {
        return items;
    }
    text.lines()
        .map(|l| TAG.replace_all(l, "").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
