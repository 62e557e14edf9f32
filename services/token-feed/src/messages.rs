//! Push-channel message types
//!
//! Every outbound frame is a `PushMessage`: a type-discriminated
//! payload under `data`, plus the send timestamp. Payloads are
//! serialized once per broadcast so all subscribers receive identical
//! bytes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{SessionId, TokenId};

use crate::clock::now_millis;

/// One outbound push frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(flatten)]
    pub payload: PushPayload,
    /// Unix milliseconds when the frame was sent.
    pub timestamp: i64,
}

impl PushMessage {
    /// Wrap a payload with the current send timestamp.
    pub fn now(payload: PushPayload) -> Self {
        Self {
            payload,
            timestamp: now_millis(),
        }
    }
}

/// Type-discriminated push payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PushPayload {
    /// Sent once to a freshly registered subscriber, and to nobody else.
    #[serde(rename_all = "camelCase")]
    Connection {
        session_id: SessionId,
        message: String,
    },
    /// One record's price mutation; fanned out to every subscriber.
    #[serde(rename_all = "camelCase")]
    PriceUpdate {
        id: TokenId,
        new_price: Decimal,
        new_price_change: Decimal,
        previous_price: Decimal,
    },
}

impl PushPayload {
    /// Payload label for logging.
    pub fn type_label(&self) -> &'static str {
        match self {
            PushPayload::Connection { .. } => "connection",
            PushPayload::PriceUpdate { .. } => "price_update",
        }
    }
}
