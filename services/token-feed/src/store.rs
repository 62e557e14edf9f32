//! In-memory sectioned token store
//!
//! The single shared mutable resource of the feed. Readers always get
//! defensive snapshot copies; writes take the exclusive lock for one
//! record's read-copy/write only, never for a whole scheduler tick, so
//! a reader observes either the fully-old or fully-new record and
//! unrelated reads are not serialized behind a slow mutation source.
//!
//! Lookups and samples never fail for "not found" or "store smaller
//! than requested"; those are normal, representable outcomes.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rand::Rng;
use tracing::info;
use types::errors::FeedError;
use types::ids::TokenId;
use types::token::{Token, TokenSection};

use crate::config::FeedConfig;
use crate::generator::TokenGenerator;

/// Categorized collections of tokens behind one reader-writer lock.
///
/// Uses BTreeMap for deterministic section iteration.
pub struct TokenStore {
    sections: RwLock<BTreeMap<TokenSection, Vec<Token>>>,
}

impl TokenStore {
    /// Populate each section with freshly generated tokens.
    ///
    /// Runs once at startup; a generation failure here is fatal.
    pub fn initialize(
        config: &FeedConfig,
        generator: &mut dyn TokenGenerator,
    ) -> Result<Self, FeedError> {
        config.validate()?;

        let mut sections = BTreeMap::new();
        for section in TokenSection::ALL {
            let mut tokens = Vec::with_capacity(config.tokens_per_section);
            for _ in 0..config.tokens_per_section {
                tokens.push(generator.generate(section)?);
            }
            sections.insert(section, tokens);
        }

        info!(
            tokens_per_section = config.tokens_per_section,
            total = config.tokens_per_section * TokenSection::ALL.len(),
            "token store initialized"
        );

        Ok(Self {
            sections: RwLock::new(sections),
        })
    }

    /// Snapshot copy of one section, in insertion order.
    pub fn section(&self, section: TokenSection) -> Vec<Token> {
        self.sections
            .read()
            .get(&section)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of all sections concatenated in fixed order
    /// (new → final → migrated), per-section insertion order preserved.
    pub fn all(&self) -> Vec<Token> {
        let guard = self.sections.read();
        let total: usize = guard.values().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for section in TokenSection::ALL {
            if let Some(tokens) = guard.get(&section) {
                out.extend_from_slice(tokens);
            }
        }
        out
    }

    /// Find a token by id across all sections.
    pub fn find(&self, id: TokenId) -> Option<Token> {
        let guard = self.sections.read();
        for section in TokenSection::ALL {
            if let Some(token) = guard
                .get(&section)
                .and_then(|tokens| tokens.iter().find(|t| t.id == id))
            {
                return Some(token.clone());
            }
        }
        None
    }

    /// Locate the record, compute its replacement, and swap it in.
    ///
    /// Returns the updated record, or `None` for an unknown id. The
    /// write lock is held for this one record's update only; concurrent
    /// snapshot readers see the record fully-old or fully-new.
    pub fn apply_mutation(
        &self,
        id: TokenId,
        f: impl FnOnce(&Token) -> Token,
    ) -> Option<Token> {
        let mut guard = self.sections.write();
        for section in TokenSection::ALL {
            if let Some(tokens) = guard.get_mut(&section) {
                if let Some(slot) = tokens.iter_mut().find(|t| t.id == id) {
                    let updated = f(slot);
                    *slot = updated.clone();
                    return Some(updated);
                }
            }
        }
        None
    }

    /// Up to `n` distinct tokens drawn uniformly across the whole store.
    ///
    /// A store smaller than `n` yields all of its tokens; one call never
    /// returns the same id twice. Partial Fisher–Yates over an index
    /// snapshot, so only the selected records are cloned.
    pub fn random_sample<R: Rng>(&self, rng: &mut R, n: usize) -> Vec<Token> {
        let guard = self.sections.read();
        let mut slots: Vec<(TokenSection, usize)> = Vec::new();
        for section in TokenSection::ALL {
            if let Some(tokens) = guard.get(&section) {
                slots.extend((0..tokens.len()).map(|i| (section, i)));
            }
        }

        let count = n.min(slots.len());
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let j = rng.gen_range(i..slots.len());
            slots.swap(i, j);
            let (section, idx) = slots[i];
            // Index is valid: the read lock has been held throughout
            if let Some(token) = guard.get(&section).and_then(|t| t.get(idx)) {
                out.push(token.clone());
            }
        }
        out
    }

    /// Total number of tokens across all sections.
    pub fn len(&self) -> usize {
        self.sections.read().values().map(Vec::len).sum()
    }

    /// Whether the store holds no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
