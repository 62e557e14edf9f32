//! Query specification types
//!
//! A `QuerySpec` is an immutable value describing one snapshot query:
//! optional free-text search, optional preset filter, optional sort,
//! optional result cap. The empty spec returns the collection in
//! store order.
//!
//! Parsing from the wire is best-effort: unrecognized sort fields,
//! orders, and presets fail `FromStr` and are dropped at the request
//! boundary instead of being rejected with an error.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sortable token metrics.
///
/// Wire values are the camelCase strings used in query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "marketCap")]
    MarketCap,
    #[serde(rename = "volume")]
    Volume,
    #[serde(rename = "transactions")]
    Transactions,
    #[serde(rename = "elapsedTime")]
    ElapsedTime,
    #[serde(rename = "priceChange")]
    PriceChange,
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marketCap" => Ok(SortField::MarketCap),
            "volume" => Ok(SortField::Volume),
            "transactions" => Ok(SortField::Transactions),
            "elapsedTime" => Ok(SortField::ElapsedTime),
            "priceChange" => Ok(SortField::PriceChange),
            _ => Err(()),
        }
    }
}

/// Sort direction; `desc` is the default when a sort field is given
/// without an explicit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Named pre-built filter predicates, evaluated independently of the
/// free-text search and of each other (no combination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterPreset {
    /// High-volume tokens: volume above the fixed threshold.
    A,
    /// High-activity tokens: transaction count above the fixed threshold.
    B,
    /// Recent launches: elapsed time below the fixed window.
    C,
}

impl FromStr for FilterPreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(FilterPreset::A),
            "B" => Ok(FilterPreset::B),
            "C" => Ok(FilterPreset::C),
            _ => Err(()),
        }
    }
}

/// Immutable description of one snapshot query.
///
/// No field is required; `QuerySpec::default()` is the empty spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    /// Case-insensitive substring filter over name + symbol.
    pub search: Option<String>,
    pub preset: Option<FilterPreset>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    /// Result-count cap; `None` means unlimited. Non-positive values
    /// never reach this type (dropped at the parse boundary).
    pub limit: Option<usize>,
}

impl QuerySpec {
    /// Whether this spec applies no filtering, sorting, or capping.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.preset.is_none()
            && self.sort_by.is_none()
            && self.sort_order.is_none()
            && self.limit.is_none()
    }
}
