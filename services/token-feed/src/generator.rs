//! Synthetic token data generation
//!
//! The store and scheduler treat generation as a black-box capability
//! behind the `TokenGenerator` trait: `generate` mints a fresh record
//! for a section, `mutate` produces the updated record for one price
//! step. `SyntheticGenerator` implements it with a deterministic
//! seeded RNG so tests can reproduce exact data sets.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use types::errors::GeneratorError;
use types::ids::TokenId;
use types::token::{Token, TokenSection};

use crate::clock::now_millis;
use crate::config::FeedConfig;

/// External generate/mutate capability.
///
/// Implementations may fail; failures are fatal at store
/// initialization and logged-and-skipped per record during a tick.
pub trait TokenGenerator: Send {
    /// Mint a fresh token for the given section.
    fn generate(&mut self, section: TokenSection) -> Result<Token, GeneratorError>;

    /// Compute the updated record for one price step.
    ///
    /// Only `price`, `price_change`, and `last_update` may differ from
    /// the input; identity and all other metrics are preserved.
    fn mutate(&mut self, token: &Token) -> Result<Token, GeneratorError>;
}

const NAME_PREFIXES: &[&str] = &[
    "Nova", "Quantum", "Solar", "Lunar", "Turbo", "Hyper", "Astro", "Pixel",
    "Vapor", "Ember", "Frost", "Zenith", "Drift", "Echo", "Flux", "Onyx",
];

const NAME_SUFFIXES: &[&str] = &[
    "Protocol", "Labs", "Network", "Finance", "Swap", "Chain", "Vault",
    "Capital", "Engine", "Forge", "Works", "Index",
];

/// Deterministic synthetic token generator.
///
/// Value ranges come from `FeedConfig`; the RNG is ChaCha8 so a fixed
/// seed reproduces the same data set.
pub struct SyntheticGenerator {
    config: FeedConfig,
    rng: ChaCha8Rng,
}

impl SyntheticGenerator {
    /// Create a generator with a deterministic seed.
    pub fn seeded(config: FeedConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy(config: FeedConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    fn decimal_in(
        &mut self,
        min: f64,
        max: f64,
        dp: u32,
        field: &'static str,
    ) -> Result<Decimal, GeneratorError> {
        let value: f64 = self.rng.gen_range(min..=max);
        Decimal::from_f64(value)
            .map(|d| d.round_dp(dp))
            .ok_or(GeneratorError::Numeric { field })
    }

    fn random_name(&mut self) -> String {
        let prefix = NAME_PREFIXES[self.rng.gen_range(0..NAME_PREFIXES.len())];
        let suffix = NAME_SUFFIXES[self.rng.gen_range(0..NAME_SUFFIXES.len())];
        format!("{} {}", prefix, suffix)
    }

    fn random_symbol(&mut self) -> String {
        let len = self.rng.gen_range(3..=5);
        (0..len)
            .map(|_| char::from(b'A' + self.rng.gen_range(0..26u8)))
            .collect()
    }
}

impl TokenGenerator for SyntheticGenerator {
    fn generate(&mut self, section: TokenSection) -> Result<Token, GeneratorError> {
        let now = now_millis();
        let elapsed_time = self
            .rng
            .gen_range(self.config.launch_age_range.clone());

        let mc = self.config.market_cap_range;
        let vol = self.config.volume_range;
        let price = self.config.price_range;
        let change = self.config.price_change_range;

        Ok(Token {
            id: TokenId::new(),
            name: self.random_name(),
            symbol: self.random_symbol(),
            section,
            market_cap: self.decimal_in(mc.min, mc.max, 2, "marketCap")?,
            volume: self.decimal_in(vol.min, vol.max, 2, "volume")?,
            funding_metric: self.decimal_in(0.0, 100.0, 2, "fundingMetric")?,
            transactions: self.rng.gen_range(self.config.transaction_range.clone()),
            price: self.decimal_in(price.min, price.max, 8, "price")?,
            price_change: self.decimal_in(change.min, change.max, 2, "priceChange")?,
            elapsed_time,
            launch_time: now - elapsed_time * 1000,
            last_update: now,
        })
    }

    fn mutate(&mut self, token: &Token) -> Result<Token, GeneratorError> {
        // One tenth of the generation range: smaller steps for live updates
        let change = self.config.price_change_range;
        let step = self.decimal_in(change.min / 10.0, change.max / 10.0, 4, "priceChange")?;

        let factor = Decimal::ONE + step / Decimal::from(100u32);
        let floor = Decimal::from_f64(self.config.price_range.min)
            .ok_or(GeneratorError::Numeric { field: "price" })?;
        let new_price = (token.price * factor).round_dp(8).max(floor);

        Ok(Token {
            price: new_price,
            price_change: step,
            last_update: now_millis(),
            ..token.clone()
        })
    }
}
