use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::catalog::{Chain, Coin, count_on};

pub const FALLBACK_NAME: &str = "ThewClub Select Pack";
pub const FALLBACK_DESCRIPTION: &str =
    "A curated selection of high-value creator assets forged in the digital realm.";

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackLore {
    pub name: String,
    pub description: String,
}

impl PackLore {
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_NAME.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
        }
    }
}

/// Anything that can write flavor copy for a freshly minted pack.
pub trait LoreSource: Send + Sync {
    fn generate(&self, coins: &[&Coin], wallet: &str) -> Result<PackLore>;
}

/// Never reaches a model; every request ends in the fallback copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl LoreSource for Offline {
    fn generate(&self, _coins: &[&Coin], _wallet: &str) -> Result<PackLore> {
        Err(anyhow!("lore generation disabled"))
    }
}

pub fn generate_pack_lore(source: &dyn LoreSource, coins: &[&Coin], wallet: &str) -> PackLore {
    match source.generate(coins, wallet) {
        Ok(lore) => {
            tracing::info!(name = %lore.name, "pack lore generated");
            lore
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "lore generation failed, using fallback");
            PackLore::fallback()
        }
    }
}

/// Line shown under the AI copy describing the pack's chain mix.
pub fn forge_note(coins: &[&Coin]) -> String {
    format!(
        "Pack forged with {} Solana shards and {} Zora essence.",
        count_on(coins, Chain::Solana),
        count_on(coins, Chain::Zora)
    )
}

pub fn curator_prompt(coins: &[&Coin], wallet: &str) -> String {
    let coin_list = coins
        .iter()
        .map(|c| format!("{} ({})", c.name, c.chain))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a futuristic, cyberpunk curator for a high-end digital asset marketplace called \"ThewClub\".\n\
         A user (Wallet: {wallet}) has just minted a new \"Creator Pack\" containing the following coins: {coin_list}.\n\
         \n\
         Task:\n\
         1. Generate a creative, mystical, or high-tech name for this specific pack based on the combination of coins.\n\
         2. Write a short, engaging description (max 2 sentences) that describes the \"energy\" or \"utility\" of this pack. Use evocative language.\n\
         \n\
         Return JSON format:\n\
         {{\n  \"name\": \"Pack Name\",\n  \"description\": \"Pack Description\"\n}}"
    )
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(anyhow!("gemini api key empty"));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client for gemini")?;
        Ok(Self {
            http,
            api_key,
            model: model.into(),
        })
    }
}

impl LoreSource for GeminiClient {
    fn generate(&self, coins: &[&Coin], wallet: &str) -> Result<PackLore> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: curator_prompt(coins, wallet),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, self.model);
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .context("gemini request")?;
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            let snippet: String = body.chars().take(400).collect();
            return Err(anyhow!("gemini {}: {}", status.as_u16(), snippet));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).context("gemini json parse")?;
        let text = parsed.first_text().ok_or_else(|| anyhow!("no response from AI"))?;
        parse_lore(text)
    }
}

/// Decodes the model's JSON reply, tolerating a fenced code block around it.
pub fn parse_lore(text: &str) -> Result<PackLore> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();
    if unfenced.is_empty() {
        return Err(anyhow!("no response from AI"));
    }
    let lore: PackLore = serde_json::from_str(unfenced).context("lore json parse")?;
    if lore.name.trim().is_empty() || lore.description.trim().is_empty() {
        return Err(anyhow!("lore response missing name or description"));
    }
    Ok(lore)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    struct Canned(&'static str);

    impl LoreSource for Canned {
        fn generate(&self, _coins: &[&Coin], _wallet: &str) -> Result<PackLore> {
            parse_lore(self.0)
        }
    }

    fn coins() -> Vec<&'static Coin> {
        vec![&CATALOG[0], &CATALOG[5], &CATALOG[6]]
    }

    #[test]
    fn offline_source_falls_back() {
        let lore = generate_pack_lore(&Offline, &coins(), "0x71...3A9f");
        assert_eq!(lore, PackLore::fallback());
    }

    #[test]
    fn successful_reply_passes_through() {
        let source = Canned(r#"{"name":"Neon Vault","description":"Bright."}"#);
        let lore = generate_pack_lore(&source, &coins(), "0x71...3A9f");
        assert_eq!(lore.name, "Neon Vault");
        assert_eq!(lore.description, "Bright.");
    }

    #[test]
    fn malformed_or_empty_reply_falls_back() {
        for body in ["", "not json", r#"{"name":"","description":"x"}"#] {
            let lore = generate_pack_lore(&Canned(body), &coins(), "w");
            assert_eq!(lore, PackLore::fallback());
        }
    }

    #[test]
    fn fenced_json_is_accepted() {
        let lore = parse_lore("```json\n{\"name\":\"A\",\"description\":\"B\"}\n```").unwrap();
        assert_eq!(lore.name, "A");
    }

    #[test]
    fn prompt_lists_coins_with_chains() {
        let prompt = curator_prompt(&coins(), "0xabc");
        assert!(prompt.contains("Jacob.eth (Zora), Mad Lads Coin (Solana), Bonk Origins (Solana)"));
        assert!(prompt.contains("Wallet: 0xabc"));
    }

    #[test]
    fn forge_note_counts_chains() {
        assert_eq!(
            forge_note(&coins()),
            "Pack forged with 2 Solana shards and 1 Zora essence."
        );
    }

    #[test]
    fn response_text_extraction() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"name\":\"N\",\"description\":\"D\"}"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let lore = parse_lore(parsed.first_text().unwrap()).unwrap();
        assert_eq!(lore.name, "N");

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.first_text().is_none());
    }
}
