//! Types library for the token table service
//!
//! This library provides all core type definitions shared across the
//! token-feed core and the gateway surface, ensuring type safety and
//! a single source of truth for wire formats.
//!
//! # Modules
//! - `ids`: Unique identifiers (TokenId, SessionId)
//! - `token`: The token record and its section enumeration
//! - `query`: Query specification (search, presets, sort, limit)
//! - `errors`: Error taxonomy

// Public modules
pub mod errors;
pub mod ids;
pub mod query;
pub mod token;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::query::*;
    pub use crate::token::*;
}
