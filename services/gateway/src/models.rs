use serde::{Deserialize, Serialize};
use types::query::QuerySpec;
use types::token::Token;

/// Raw query parameters as they arrive on the wire.
///
/// Every field is an optional string so a malformed value can never
/// fail extraction; `into_spec` drops anything unrecognized instead of
/// rejecting the request (best-effort query design).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQueryParams {
    pub search: Option<String>,
    pub preset: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<String>,
}

impl TokenQueryParams {
    /// Best-effort conversion into a query spec.
    ///
    /// Unknown presets and sort fields, unparsable orders, and
    /// non-positive limits are silently ignored.
    pub fn into_spec(self) -> QuerySpec {
        QuerySpec {
            search: self.search.filter(|s| !s.is_empty()),
            preset: self.preset.and_then(|s| s.parse().ok()),
            sort_by: self.sort_by.and_then(|s| s.parse().ok()),
            sort_order: self.sort_order.and_then(|s| s.parse().ok()),
            limit: self
                .limit
                .and_then(|s| s.parse::<i64>().ok())
                .filter(|&n| n > 0)
                .map(|n| n as usize),
        }
    }
}

/// Standard response envelope for token listings.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub data: Vec<Token>,
    pub total: usize,
}

impl TokenResponse {
    pub fn new(data: Vec<Token>) -> Self {
        let total = data.len();
        Self {
            success: true,
            data,
            total,
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}
