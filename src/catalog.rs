use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Zora,
    Solana,
}

impl Chain {
    pub fn label(self) -> &'static str {
        match self {
            Chain::Zora => "Zora",
            Chain::Solana => "Solana",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub id: &'static str,
    pub name: &'static str,
    pub ticker: &'static str,
    pub chain: Chain,
    pub price: f64,
    pub image_url: &'static str,
    pub creator: &'static str,
}

/// Catalog filter tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainTab {
    #[default]
    All,
    Only(Chain),
}

impl ChainTab {
    pub fn next(self) -> Self {
        match self {
            ChainTab::All => ChainTab::Only(Chain::Zora),
            ChainTab::Only(Chain::Zora) => ChainTab::Only(Chain::Solana),
            ChainTab::Only(Chain::Solana) => ChainTab::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChainTab::All => "All",
            ChainTab::Only(chain) => chain.label(),
        }
    }

    fn admits(self, chain: Chain) -> bool {
        match self {
            ChainTab::All => true,
            ChainTab::Only(only) => only == chain,
        }
    }
}

pub static CATALOG: &[Coin] = &[
    Coin {
        id: "z1",
        name: "Jacob.eth",
        ticker: "$JACOB",
        chain: Chain::Zora,
        price: 0.45,
        image_url: "https://picsum.photos/100/100?random=1",
        creator: "Jacob",
    },
    Coin {
        id: "z2",
        name: "Colors of Noise",
        ticker: "$NOISE",
        chain: Chain::Zora,
        price: 0.12,
        image_url: "https://picsum.photos/100/100?random=2",
        creator: "Audiophile",
    },
    Coin {
        id: "z3",
        name: "Opepen Edition",
        ticker: "$OPEP",
        chain: Chain::Zora,
        price: 1.20,
        image_url: "https://picsum.photos/100/100?random=3",
        creator: "Jack Butcher",
    },
    Coin {
        id: "z4",
        name: "Zorb Sphere",
        ticker: "$ZORB",
        chain: Chain::Zora,
        price: 0.05,
        image_url: "https://picsum.photos/100/100?random=4",
        creator: "Zora",
    },
    Coin {
        id: "z5",
        name: "Digital Paint",
        ticker: "$PAINT",
        chain: Chain::Zora,
        price: 0.88,
        image_url: "https://picsum.photos/100/100?random=5",
        creator: "ArtistX",
    },
    Coin {
        id: "s1",
        name: "Mad Lads Coin",
        ticker: "$LAD",
        chain: Chain::Solana,
        price: 145.20,
        image_url: "https://picsum.photos/100/100?random=6",
        creator: "Armani",
    },
    Coin {
        id: "s2",
        name: "Bonk Origins",
        ticker: "$BONKO",
        chain: Chain::Solana,
        price: 0.0004,
        image_url: "https://picsum.photos/100/100?random=7",
        creator: "BonkDAO",
    },
    Coin {
        id: "s3",
        name: "Tensorian Shard",
        ticker: "$SHARD",
        chain: Chain::Solana,
        price: 22.50,
        image_url: "https://picsum.photos/100/100?random=8",
        creator: "Tensor",
    },
    Coin {
        id: "s4",
        name: "Claynosaurz dna",
        ticker: "$CLAY",
        chain: Chain::Solana,
        price: 55.00,
        image_url: "https://picsum.photos/100/100?random=9",
        creator: "Clayno",
    },
    Coin {
        id: "s5",
        name: "Smyths Gold",
        ticker: "$SMYTH",
        chain: Chain::Solana,
        price: 12.00,
        image_url: "https://picsum.photos/100/100?random=10",
        creator: "Blocksmith",
    },
    Coin {
        id: "s6",
        name: "Flash Drive",
        ticker: "$FLASH",
        chain: Chain::Solana,
        price: 1.00,
        image_url: "https://picsum.photos/100/100?random=11",
        creator: "Speedster",
    },
];

/// Catalog entries whose name or ticker contains `query` (case-insensitive)
/// and whose chain passes `tab`.
pub fn filter(query: &str, tab: ChainTab) -> Vec<&'static Coin> {
    let needle = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|coin| tab.admits(coin.chain))
        .filter(|coin| {
            needle.is_empty()
                || coin.name.to_lowercase().contains(&needle)
                || coin.ticker.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn count_on(coins: &[&Coin], chain: Chain) -> usize {
    coins.iter().filter(|c| c.chain == chain).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_both_chains() {
        assert_eq!(CATALOG.len(), 11);
        let all: Vec<&Coin> = CATALOG.iter().collect();
        assert_eq!(count_on(&all, Chain::Zora), 5);
        assert_eq!(count_on(&all, Chain::Solana), 6);
    }

    #[test]
    fn filter_matches_name_or_ticker() {
        let by_ticker = filter("bonko", ChainTab::All);
        assert_eq!(by_ticker.len(), 1);
        assert_eq!(by_ticker[0].id, "s2");

        let by_name = filter("SPHERE", ChainTab::All);
        assert_eq!(by_name[0].id, "z4");
    }

    #[test]
    fn filter_respects_chain_tab() {
        assert_eq!(filter("", ChainTab::Only(Chain::Zora)).len(), 5);
        assert!(filter("lad", ChainTab::Only(Chain::Zora)).is_empty());
        assert_eq!(ChainTab::All.next().next().next(), ChainTab::All);
    }

    #[test]
    fn query_whitespace_is_part_of_the_needle() {
        let spaced: Vec<&str> = filter("s ", ChainTab::All).iter().map(|c| c.id).collect();
        assert_eq!(spaced, vec!["z2", "s1", "s5"]);
        assert!(filter(" ", ChainTab::All).len() < CATALOG.len());
    }
}
