use serde::Serialize;

use crate::Precision;
use crate::alphabet::Symbol;
use crate::codeword;
use crate::decimal::Decimal;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::model::{Entry, ProbabilityModel};
use crate::stats::Statistics;

/// Everything derived from encoding one word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Encoding<S> {
    /// `(symbol, count, frequency)` rows in alphabet order.
    pub table: Vec<Entry<S>>,
    pub interval: Interval,
    pub codeword: Decimal,
    /// Estimated information content of the word, in bits.
    pub entropy: Decimal,
    /// Bits needed for the codeword's digits.
    pub bit_length: usize,
}

impl<S> Encoding<S> {
    pub fn entropy_bits(&self) -> f64 {
        self.entropy.to_f64()
    }
}

/// Encode text with the default [`Precision`].
pub fn encode_text(input: &str) -> Result<Encoding<char>> {
    encode_text_with(input, Precision::default())
}

/// Encode the characters of `input`. Input that is empty or consists only of
/// ASCII whitespace (space, tab, line feed, vertical tab, form feed, carriage
/// return) is rejected. Other blanks, such as a no-break space, are symbols.
pub fn encode_text_with(input: &str, precision: Precision) -> Result<Encoding<char>> {
    if input.chars().all(is_blank) {
        return Err(Error::EmptyInput);
    }
    let word: Vec<char> = input.chars().collect();
    encode_symbols(&word, precision)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Model, encode, select a codeword and measure, in that order.
pub fn encode_symbols<S: Symbol>(word: &[S], precision: Precision) -> Result<Encoding<S>> {
    let model = ProbabilityModel::build(word, precision.probability_scale)?;
    let interval = Encoder::new(&model).encode(word.iter().copied())?;
    let codeword = codeword::select(&interval)?;
    let Statistics {
        entropy,
        bit_length,
    } = Statistics::new(&model, &codeword, precision.log_scale)?;

    Ok(Encoding {
        table: model.entries().to_vec(),
        interval,
        codeword,
        entropy,
        bit_length,
    })
}
