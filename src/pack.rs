use chrono::{DateTime, Utc};
use nanoid::nanoid;

use crate::catalog::Coin;
use crate::lore::{PackLore, forge_note};
use crate::market::PriceHistory;

pub const SHARE_BASE_URL: &str = "https://thewclub.app/pack";

#[derive(Debug, Clone)]
pub struct Pack {
    pub id: String,
    pub name: String,
    pub description: String,
    pub coins: Vec<&'static Coin>,
    pub created_at: DateTime<Utc>,
    pub owner: String,
    pub price_history: PriceHistory,
    pub current_price: f64,
    pub lore: String,
    /// Receipt of the simulated mint transaction.
    pub tx_hash: String,
}

impl Pack {
    /// A pack as it exists between the mint request and the lore reply.
    pub fn draft(coins: Vec<&'static Coin>, owner: &str, price_history: PriceHistory) -> Self {
        let id = nanoid!();
        let created_at = Utc::now();
        let tx_hash = mint_receipt(&id, &coins, created_at);
        let current_price = price_history.back().copied().unwrap_or_default();
        Self {
            id,
            name: "Processing...".to_string(),
            description: "Processing...".to_string(),
            coins,
            created_at,
            owner: owner.to_string(),
            price_history,
            current_price,
            lore: String::new(),
            tx_hash,
        }
    }

    pub fn finish(mut self, lore: PackLore) -> Self {
        self.name = lore.name;
        self.description = lore.description;
        self.lore = forge_note(&self.coins);
        self
    }

    pub fn share_link(&self) -> String {
        format!("{}/{}", SHARE_BASE_URL, self.id)
    }

    pub fn short_share_link(&self) -> String {
        let short: String = self.id.chars().take(8).collect();
        format!("{}/{}", SHARE_BASE_URL, short)
    }

    pub fn short_tx_hash(&self) -> String {
        let head: String = self.tx_hash.chars().take(10).collect();
        let tail: String = self
            .tx_hash
            .chars()
            .skip(self.tx_hash.len().saturating_sub(4))
            .collect();
        format!("{head}...{tail}")
    }
}

fn mint_receipt(id: &str, coins: &[&Coin], created_at: DateTime<Utc>) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(id.as_bytes());
    for coin in coins {
        hasher.update(coin.id.as_bytes());
    }
    hasher.update(created_at.to_rfc3339().as_bytes());
    format!("0x{}", hasher.finalize().to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    fn draft() -> Pack {
        let coins = CATALOG.iter().take(3).collect();
        Pack::draft(coins, "0x71...3A9f", PriceHistory::from(vec![0.05, 0.051]))
    }

    #[test]
    fn draft_tracks_latest_price() {
        let pack = draft();
        assert_eq!(pack.current_price, 0.051);
        assert_eq!(pack.name, "Processing...");
        assert_eq!(pack.tx_hash.len(), 66);
        assert!(pack.tx_hash.starts_with("0x"));
    }

    #[test]
    fn finish_applies_lore_and_forge_note() {
        let pack = draft().finish(PackLore::fallback());
        assert_eq!(pack.name, "ThewClub Select Pack");
        assert_eq!(pack.lore, "Pack forged with 0 Solana shards and 3 Zora essence.");
    }

    #[test]
    fn share_links_use_pack_id() {
        let pack = draft();
        assert_eq!(pack.share_link(), format!("https://thewclub.app/pack/{}", pack.id));
        assert!(pack.share_link().starts_with(&pack.short_share_link()));
        assert_eq!(pack.short_tx_hash().len(), 17);
    }
}
