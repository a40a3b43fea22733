//! Context-free (0L) rewriting of symbol strings.
//!
//! A [`Grammar`] maps single-character symbols to replacement strings. Every pass of
//! [`expand`] rewrites *all* symbols of the previous generation in parallel; symbols
//! without a production are terminals and are copied through unchanged.
//!
//! # Growth
//!
//! Recursive productions grow the string exponentially. After `n` passes the length is
//! bounded by `max_expansion_factor ^ n * axiom.len()`. Nothing here caps that growth;
//! callers bound it through the iteration count. [`RECOMMENDED_MAX_ITERATIONS`] is a
//! sensible ceiling for branching grammars such as the default tree, and
//! [`Grammar::expanded_len`] reports the exact size of a derivation before building it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Iteration count above which branching grammars become expensive to expand and draw.
pub const RECOMMENDED_MAX_ITERATIONS: u32 = 6;

/// A set of production rules keyed by symbol.
///
/// Serializes as a map from one-character strings to replacements, so it can sit
/// under a `[rules]` table in TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: BTreeMap<char, String>,
}

impl Grammar {
    /// Creates a grammar with no productions. Expanding with it is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a production, returning `self` (builder pattern).
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.set_rule(symbol, replacement);
        self
    }

    /// Inserts or replaces the production for `symbol`.
    ///
    /// Returns the previous replacement, if any.
    pub fn set_rule(&mut self, symbol: char, replacement: impl Into<String>) -> Option<String> {
        self.rules.insert(symbol, replacement.into())
    }

    /// Removes the production for `symbol`, turning it back into a terminal.
    pub fn remove_rule(&mut self, symbol: char) -> Option<String> {
        self.rules.remove(&symbol)
    }

    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn rules(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(&c, r)| (c, r.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Performs a single parallel rewrite of `input`.
    pub fn rewrite(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        self.rewrite_into(input, &mut output);
        output
    }

    /// Appends one rewrite pass of `input` to `output`.
    fn rewrite_into(&self, input: &str, output: &mut String) {
        for c in input.chars() {
            match self.rules.get(&c) {
                Some(replacement) => output.push_str(replacement),
                None => output.push(c),
            }
        }
    }

    /// Expands `axiom` for `iterations` passes. See [`expand`].
    pub fn expand(&self, axiom: &str, iterations: u32) -> String {
        let mut current = axiom.to_owned();
        for _ in 0..iterations {
            // Size the next generation up front so each pass is a single allocation.
            let next_len: usize = current.chars().map(|c| self.symbol_len(c)).sum();
            let mut next = String::with_capacity(next_len);
            self.rewrite_into(&current, &mut next);
            current = next;
        }
        current
    }

    /// Length in bytes of a single rewrite of `symbol`.
    fn symbol_len(&self, symbol: char) -> usize {
        match self.rules.get(&symbol) {
            Some(replacement) => replacement.len(),
            None => symbol.len_utf8(),
        }
    }

    /// Exact byte length of `expand(axiom, iterations)`, computed without building the string.
    ///
    /// Saturates at `u128::MAX`.
    pub fn expanded_len(&self, axiom: &str, iterations: u32) -> u128 {
        // lengths[c] = byte length of c after k passes, for every symbol reachable
        // from the axiom or the productions.
        let mut lengths: BTreeMap<char, u128> = BTreeMap::new();
        let alphabet = axiom
            .chars()
            .chain(self.rules.keys().copied())
            .chain(self.rules.values().flat_map(|r| r.chars()));
        for c in alphabet {
            lengths.insert(c, c.len_utf8() as u128);
        }

        for _ in 0..iterations {
            let previous = lengths.clone();
            for (c, len) in lengths.iter_mut() {
                if let Some(replacement) = self.rules.get(c) {
                    *len = replacement
                        .chars()
                        .map(|r| previous.get(&r).copied().unwrap_or(r.len_utf8() as u128))
                        .fold(0u128, u128::saturating_add);
                }
            }
        }

        axiom
            .chars()
            .map(|c| lengths.get(&c).copied().unwrap_or(c.len_utf8() as u128))
            .fold(0u128, u128::saturating_add)
    }

    /// Largest number of symbols any single production emits (at least 1).
    pub fn max_expansion_factor(&self) -> usize {
        self.rules
            .values()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Upper bound on the symbol count after `iterations` passes:
    /// `max_expansion_factor ^ iterations * axiom_symbols`. Saturates.
    pub fn growth_bound(&self, axiom: &str, iterations: u32) -> u128 {
        let factor = self.max_expansion_factor() as u128;
        factor
            .saturating_pow(iterations)
            .saturating_mul(axiom.chars().count() as u128)
    }
}

impl Serialize for Grammar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.rules.iter().map(|(c, r)| (c.to_string(), r)))
    }
}

impl<'de> Deserialize<'de> for Grammar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut rules = BTreeMap::new();
        for (key, replacement) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => {
                    rules.insert(symbol, replacement);
                }
                _ => {
                    return Err(D::Error::custom(format!(
                        "rule key {key:?} must be a single character"
                    )));
                }
            }
        }
        Ok(Self { rules })
    }
}

impl<const N: usize> From<[(char, &str); N]> for Grammar {
    fn from(rules: [(char, &str); N]) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(c, r)| (c, r.to_owned()))
                .collect(),
        }
    }
}

/// Expands `axiom` by `iterations` parallel rewrite passes of `grammar`.
///
/// With `iterations == 0` the axiom is returned unchanged. Pass `k + 1` rewrites the
/// complete output of pass `k`; each pass builds a fresh string.
pub fn expand(axiom: &str, grammar: &Grammar, iterations: u32) -> String {
    grammar.expand(axiom, iterations)
}
