use std::collections::BTreeMap;

use serde::Serialize;

use crate::alphabet::{Alphabet, Symbol};
use crate::decimal::{Decimal, RoundingMode};
use crate::error::{Error, Result};

/// One row of the probability table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry<S> {
    pub symbol: S,
    /// Number of occurrences in the word.
    pub count: usize,
    /// `count × unit`, see [`ProbabilityModel::unit`].
    pub frequency: Decimal,
}

/// Absolute and relative frequencies of the symbols of one word, in symbol order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbabilityModel<S: Symbol> {
    entries: Vec<Entry<S>>,
    word_length: usize,
    unit: Decimal,
}

impl<S: Symbol> ProbabilityModel<S> {
    /// Count the symbols of `word`.
    ///
    /// Every occurrence adds `1 / word.len()`, rounded half-up to `scale`
    /// fractional digits, to the symbol's frequency. The rounding error of that
    /// unit is carried by each occurrence, so the frequencies need not sum to
    /// exactly one. Scales so coarse that all but the last symbol already fill
    /// `[0, 1)` are rejected.
    pub fn build(word: &[S], scale: u32) -> Result<Self> {
        if word.is_empty() {
            return Err(Error::EmptyInput);
        }

        let unit = Decimal::one().checked_div(
            &Decimal::from(word.len()),
            scale,
            RoundingMode::HalfUp,
        )?;

        let mut accumulated: BTreeMap<S, (usize, Decimal)> = BTreeMap::new();
        for &symbol in word {
            let (count, frequency) = accumulated
                .entry(symbol)
                .or_insert_with(|| (0, Decimal::zero()));
            *count += 1;
            *frequency = &*frequency + &unit;
        }

        let entries: Vec<_> = accumulated
            .into_iter()
            .map(|(symbol, (count, frequency))| Entry {
                symbol,
                count,
                frequency,
            })
            .collect();

        // Only the last sub-interval may be cut short, so the others must fit.
        let total = entries
            .iter()
            .fold(Decimal::zero(), |sum, entry| &sum + &entry.frequency);
        let last = entries.last().map(|entry| &entry.frequency);
        if unit.is_zero() || last.is_some_and(|last| &total - last >= Decimal::one()) {
            return Err(Error::InvalidPrecision {
                scale,
                length: word.len(),
            });
        }

        log::debug!(
            "Built model of {} distinct symbols from a word of length {}",
            entries.len(),
            word.len()
        );

        Ok(Self {
            entries,
            word_length: word.len(),
            unit,
        })
    }

    pub fn entries(&self) -> &[Entry<S>] {
        &self.entries
    }

    /// Length of the word the model was built from.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// `1 / word_length` at the model's scale.
    pub fn unit(&self) -> &Decimal {
        &self.unit
    }

    pub fn count(&self, symbol: &S) -> Option<usize> {
        self.entry(symbol).map(|entry| entry.count)
    }

    fn entry(&self, symbol: &S) -> Option<&Entry<S>> {
        self.entries
            .binary_search_by(|entry| entry.symbol.cmp(symbol))
            .ok()
            .map(|index| &self.entries[index])
    }
}

impl<S: Symbol> Alphabet for ProbabilityModel<S> {
    type S = S;

    fn frequencies(&self) -> impl Iterator<Item = (&Self::S, &Decimal)> {
        self.entries
            .iter()
            .map(|entry| (&entry.symbol, &entry.frequency))
    }

    fn relative_frequency(&self, symbol: &S) -> Option<&Decimal> {
        self.entry(symbol).map(|entry| &entry.frequency)
    }
}
