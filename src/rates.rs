//! Pair-keyed conversion rate storage
//!
//! Rates are quoted in one direction; the reverse direction is derived as
//! the reciprocal at lookup time.

use std::collections::HashMap;
use thiserror::Error;

/// No rate is quoted for a pair in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no rate quoted for {from}/{to} in either direction")]
pub struct UnknownRate {
    pub from: String,
    pub to: String,
}

/// Directed conversion rates keyed by (from, to) currency pair.
///
/// One stored entry serves both directions: a miss on (from, to) falls back
/// to the reciprocal of (to, from). The fallback is a single reversal, never
/// a re-query — a naive "look up the reverse pair through the same table"
/// fallback recurses forever when neither direction is quoted, so that case
/// is an explicit [`UnknownRate`] error instead.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), f64>,
}

impl RateTable {
    /// Create an empty rate table
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Quote a rate: one unit of `from` equals `rate` units of `to`.
    ///
    /// Rates must be positive and finite; anything else is skipped with a
    /// warning so a bad quote cannot poison the reciprocal derivation.
    pub fn insert(&mut self, from: &str, to: &str, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            tracing::warn!("skipping quote {}/{} - invalid rate {}", from, to, rate);
            return;
        }
        self.rates.insert((from.to_string(), to.to_string()), rate);
    }

    /// Look up the conversion rate for a directed pair.
    ///
    /// Resolution order:
    /// 1. stored (from, to) entry — direct hits always win, a stored reverse
    ///    entry is never overridden by a computed reciprocal
    /// 2. identity pair -> 1
    /// 3. reciprocal of a stored (to, from) entry
    /// 4. [`UnknownRate`]
    pub fn rate(&self, from: &str, to: &str) -> Result<f64, UnknownRate> {
        if let Some(&rate) = self.rates.get(&(from.to_string(), to.to_string())) {
            return Ok(rate);
        }

        // Converting a currency to itself costs nothing
        if from == to {
            return Ok(1.0);
        }

        if let Some(&rate) = self.rates.get(&(to.to_string(), from.to_string())) {
            tracing::trace!("deriving {}/{} as reciprocal of {}/{}", from, to, to, from);
            return Ok(1.0 / rate);
        }

        Err(UnknownRate {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Number of directly quoted pairs
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no pairs are quoted
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
