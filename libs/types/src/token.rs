//! Token record and section enumeration
//!
//! A `Token` is one tracked listing: stable identity, a fixed section
//! assigned at creation, and a set of numeric metrics of which only
//! `price`, `price_change`, and `last_update` are touched by the
//! mutation path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::TokenId;

/// Classification bucket for a token, assigned at creation.
///
/// There is no cross-section migration: a token stays in its section
/// for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenSection {
    #[serde(rename = "new-pairs")]
    NewPairs,
    #[serde(rename = "final-stretch")]
    FinalStretch,
    #[serde(rename = "migrated")]
    Migrated,
}

impl TokenSection {
    /// Fixed presentation order: new → final → migrated.
    ///
    /// Cross-section listings concatenate sections in this order.
    pub const ALL: [TokenSection; 3] = [
        TokenSection::NewPairs,
        TokenSection::FinalStretch,
        TokenSection::Migrated,
    ];

    /// Wire/path segment for this section.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSection::NewPairs => "new-pairs",
            TokenSection::FinalStretch => "final-stretch",
            TokenSection::Migrated => "migrated",
        }
    }
}

impl fmt::Display for TokenSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenSection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new-pairs" => Ok(TokenSection::NewPairs),
            "final-stretch" => Ok(TokenSection::FinalStretch),
            "migrated" => Ok(TokenSection::Migrated),
            _ => Err(()),
        }
    }
}

/// One tracked token listing.
///
/// Monetary and percentage metrics use `Decimal` for deterministic
/// arithmetic. Timestamps are Unix milliseconds from the process-local
/// clock; they are not comparable across restarts. `elapsed_time` is
/// seconds since launch, captured at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Stable unique identifier; never changes after creation.
    pub id: TokenId,
    pub name: String,
    pub symbol: String,
    /// Section assigned at creation; never changes.
    pub section: TokenSection,
    pub market_cap: Decimal,
    pub volume: Decimal,
    pub funding_metric: Decimal,
    pub transactions: u64,
    pub price: Decimal,
    /// Percentage price change from the most recent mutation.
    pub price_change: Decimal,
    /// Seconds since launch, captured at generation.
    pub elapsed_time: i64,
    /// Unix milliseconds when the token launched.
    pub launch_time: i64,
    /// Unix milliseconds of the last mutation (or generation).
    pub last_update: i64,
}

impl Token {
    /// Case-insensitive containment test against name OR symbol.
    ///
    /// The needle is expected to be lowercased by the caller so the
    /// query engine lowercases it once per query, not per record.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.symbol.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_token() -> Token {
        Token {
            id: TokenId::new(),
            name: "Nova Protocol".to_string(),
            symbol: "NOVA".to_string(),
            section: TokenSection::NewPairs,
            market_cap: Decimal::from(250_000u64),
            volume: Decimal::from(42_000u64),
            funding_metric: Decimal::from(55u64),
            transactions: 1_200,
            price: Decimal::from_str_exact("0.0421").unwrap(),
            price_change: Decimal::from_str_exact("1.25").unwrap(),
            elapsed_time: 7_200,
            launch_time: 1_760_000_000_000,
            last_update: 1_760_000_000_000,
        }
    }

    #[test]
    fn test_section_wire_names() {
        assert_eq!(TokenSection::NewPairs.as_str(), "new-pairs");
        assert_eq!(TokenSection::FinalStretch.as_str(), "final-stretch");
        assert_eq!(TokenSection::Migrated.as_str(), "migrated");
    }

    #[test]
    fn test_section_from_str_roundtrip() {
        for section in TokenSection::ALL {
            assert_eq!(section.as_str().parse::<TokenSection>(), Ok(section));
        }
        assert!("unknown".parse::<TokenSection>().is_err());
    }

    #[test]
    fn test_section_order_is_new_final_migrated() {
        assert_eq!(
            TokenSection::ALL,
            [
                TokenSection::NewPairs,
                TokenSection::FinalStretch,
                TokenSection::Migrated
            ]
        );
    }

    #[test]
    fn test_search_matches_name_or_symbol() {
        let token = sample_token();
        assert!(token.matches_search("nova"));
        assert!(token.matches_search("proto"));
        assert!(token.matches_search("ova"));
        assert!(!token.matches_search("doge"));
    }

    #[test]
    fn test_token_serializes_camel_case() {
        let token = sample_token();
        let json = serde_json::to_value(&token).unwrap();
        assert!(json.get("marketCap").is_some());
        assert!(json.get("priceChange").is_some());
        assert!(json.get("elapsedTime").is_some());
        assert_eq!(json["section"], "new-pairs");
    }

    #[test]
    fn test_token_serde_roundtrip() {
        let token = sample_token();
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
