//! Pure query engine
//!
//! Applies a `QuerySpec` to a token snapshot in a fixed pipeline:
//! substring filter → preset filter → sort → limit. Later stages must
//! operate on the already-reduced set for correct "top N of filtered"
//! semantics. No side effects; the store is never touched here.

use std::cmp::Ordering;

use types::query::{FilterPreset, QuerySpec, SortField, SortOrder};
use types::token::Token;

/// Preset A: volume strictly above this threshold.
pub const HIGH_VOLUME_THRESHOLD: u64 = 500_000;
/// Preset B: transaction count strictly above this threshold.
pub const HIGH_TRANSACTIONS_THRESHOLD: u64 = 5_000;
/// Preset C: elapsed time strictly below this window (seconds).
pub const RECENT_LAUNCH_WINDOW_SECS: i64 = 3_600;

/// Apply a query spec to a snapshot.
///
/// The empty spec returns the records unchanged, in store order.
pub fn apply(records: Vec<Token>, spec: &QuerySpec) -> Vec<Token> {
    let mut tokens = records;

    if let Some(search) = &spec.search {
        let needle = search.to_lowercase();
        tokens.retain(|t| t.matches_search(&needle));
    }

    if let Some(preset) = spec.preset {
        tokens.retain(|t| preset_matches(t, preset));
    }

    if let Some(field) = spec.sort_by {
        let order = spec.sort_order.unwrap_or_default();
        // Vec::sort_by is stable: equal keys keep their relative
        // order from the previous stage, for asc and desc alike
        tokens.sort_by(|a, b| {
            let ordering = compare_field(a, b, field);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    if let Some(limit) = spec.limit {
        tokens.truncate(limit);
    }

    tokens
}

fn preset_matches(token: &Token, preset: FilterPreset) -> bool {
    match preset {
        FilterPreset::A => token.volume > rust_decimal::Decimal::from(HIGH_VOLUME_THRESHOLD),
        FilterPreset::B => token.transactions > HIGH_TRANSACTIONS_THRESHOLD,
        FilterPreset::C => token.elapsed_time < RECENT_LAUNCH_WINDOW_SECS,
    }
}

fn compare_field(a: &Token, b: &Token, field: SortField) -> Ordering {
    match field {
        SortField::MarketCap => a.market_cap.cmp(&b.market_cap),
        SortField::Volume => a.volume.cmp(&b.volume),
        SortField::Transactions => a.transactions.cmp(&b.transactions),
        SortField::ElapsedTime => a.elapsed_time.cmp(&b.elapsed_time),
        SortField::PriceChange => a.price_change.cmp(&b.price_change),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::ids::TokenId;
    use types::token::TokenSection;

    fn token(name: &str, symbol: &str) -> Token {
        Token {
            id: TokenId::new(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            section: TokenSection::NewPairs,
            market_cap: Decimal::from(100_000u64),
            volume: Decimal::from(10_000u64),
            funding_metric: Decimal::from(50u64),
            transactions: 100,
            price: Decimal::ONE,
            price_change: Decimal::ZERO,
            elapsed_time: 10_000,
            launch_time: 0,
            last_update: 0,
        }
    }

    fn fixture() -> Vec<Token> {
        let mut a = token("Nova Protocol", "NOVA");
        a.volume = Decimal::from(750_000u64);
        a.transactions = 200;
        a.market_cap = Decimal::from(300_000u64);

        let mut b = token("Lunar Swap", "LUNA");
        b.volume = Decimal::from(20_000u64);
        b.transactions = 9_000;
        b.market_cap = Decimal::from(100_000u64);

        let mut c = token("Nova Vault", "NVLT");
        c.volume = Decimal::from(40_000u64);
        c.transactions = 300;
        c.elapsed_time = 1_200;
        c.market_cap = Decimal::from(300_000u64);

        vec![a, b, c]
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let records = fixture();
        let ids: Vec<TokenId> = records.iter().map(|t| t.id).collect();

        let out = apply(records, &QuerySpec::default());
        let out_ids: Vec<TokenId> = out.iter().map(|t| t.id).collect();
        assert_eq!(out_ids, ids);
    }

    #[test]
    fn test_limit_only_keeps_store_order() {
        let records = fixture();
        let first_two: Vec<TokenId> = records.iter().take(2).map(|t| t.id).collect();

        let spec = QuerySpec {
            limit: Some(2),
            ..QuerySpec::default()
        };
        let out = apply(records, &spec);
        let out_ids: Vec<TokenId> = out.iter().map(|t| t.id).collect();
        assert_eq!(out_ids, first_two);
    }

    #[test]
    fn test_limit_beyond_len_returns_all() {
        let spec = QuerySpec {
            limit: Some(100),
            ..QuerySpec::default()
        };
        assert_eq!(apply(fixture(), &spec).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_symbol() {
        let spec = QuerySpec {
            search: Some("nOvA".to_string()),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        assert_eq!(out.len(), 2);

        let spec = QuerySpec {
            search: Some("luna".to_string()),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "LUNA");
    }

    #[test]
    fn test_preset_a_high_volume() {
        let spec = QuerySpec {
            preset: Some(FilterPreset::A),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "NOVA");
    }

    #[test]
    fn test_preset_b_high_transactions() {
        let spec = QuerySpec {
            preset: Some(FilterPreset::B),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "LUNA");
    }

    #[test]
    fn test_preset_c_recent_launch() {
        let spec = QuerySpec {
            preset: Some(FilterPreset::C),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "NVLT");
    }

    #[test]
    fn test_preset_thresholds_are_strict() {
        let mut t = token("Edge Case", "EDGE");
        t.volume = Decimal::from(HIGH_VOLUME_THRESHOLD);
        t.transactions = HIGH_TRANSACTIONS_THRESHOLD;
        t.elapsed_time = RECENT_LAUNCH_WINDOW_SECS;

        let records = vec![t];
        for preset in [FilterPreset::A, FilterPreset::B, FilterPreset::C] {
            let spec = QuerySpec {
                preset: Some(preset),
                ..QuerySpec::default()
            };
            assert!(apply(records.clone(), &spec).is_empty());
        }
    }

    #[test]
    fn test_sort_desc_default_and_asc() {
        let spec = QuerySpec {
            sort_by: Some(SortField::Volume),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        let symbols: Vec<&str> = out.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["NOVA", "NVLT", "LUNA"]);

        let spec = QuerySpec {
            sort_by: Some(SortField::Volume),
            sort_order: Some(SortOrder::Asc),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        let symbols: Vec<&str> = out.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["LUNA", "NVLT", "NOVA"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        // NOVA and NVLT share the same market cap; their relative
        // store order must survive the sort in both directions
        let spec = QuerySpec {
            sort_by: Some(SortField::MarketCap),
            sort_order: Some(SortOrder::Desc),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        let symbols: Vec<&str> = out.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["NOVA", "NVLT", "LUNA"]);

        let spec = QuerySpec {
            sort_by: Some(SortField::MarketCap),
            sort_order: Some(SortOrder::Asc),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        let symbols: Vec<&str> = out.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["LUNA", "NOVA", "NVLT"]);
    }

    #[test]
    fn test_pipeline_order_filter_before_sort_and_limit() {
        // "Top 1 of filtered" semantics: the search reduces to the two
        // Nova tokens first, then sort by volume, then cap
        let spec = QuerySpec {
            search: Some("nova".to_string()),
            sort_by: Some(SortField::Volume),
            sort_order: Some(SortOrder::Desc),
            limit: Some(1),
            ..QuerySpec::default()
        };
        let out = apply(fixture(), &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "NOVA");
    }

    #[test]
    fn test_query_on_empty_input() {
        let spec = QuerySpec {
            search: Some("anything".to_string()),
            sort_by: Some(SortField::PriceChange),
            limit: Some(10),
            ..QuerySpec::default()
        };
        assert!(apply(Vec::new(), &spec).is_empty());
    }
}
