//! Token Feed Service
//!
//! The real-time token store and broadcast engine:
//! - In-memory sectioned token store with snapshot reads
//! - Pure query engine (search, presets, sort, limit)
//! - Timer-driven mutation scheduler
//! - Subscriber registry with fan-out broadcasting
//! - Synthetic data generation (generate/mutate capability)
//!
//! # Architecture
//!
//! ```text
//!        tick                     register/unregister
//!   ┌──────────┐                     ┌──────────┐
//!   │Scheduler │                     │ Gateway  │
//!   └────┬─────┘                     └────┬─────┘
//!        │ sample + mutate               │
//!   ┌────▼─────┐   price updates   ┌─────▼─────┐
//!   │  Store   │──────────────────▶│ Registry  │
//!   └────┬─────┘                   └─────┬─────┘
//!        │ snapshot                      │ bounded per-
//!   ┌────▼─────┐                         │ subscriber
//!   │  Query   │                      ┌──▼──┐ ┌─────┐
//!   └──────────┘                      │ ws₁ │ │ wsₙ │
//!                                     └─────┘ └─────┘
//! ```
//!
//! The store is the single shared mutable resource; the query path
//! never blocks on the mutation path beyond one record's lock window.

pub mod broadcast;
pub mod clock;
pub mod config;
pub mod generator;
pub mod messages;
pub mod query;
pub mod scheduler;
pub mod store;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
