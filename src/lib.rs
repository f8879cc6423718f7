pub mod alphabet;
pub mod codeword;
pub mod decimal;
pub mod encoder;
pub mod error;
pub mod interval;
pub mod model;
pub mod stats;
pub mod summary;

#[cfg(test)]
mod example;

pub use decimal::{Decimal, RoundingMode};
pub use error::{Error, Result};
pub use interval::Interval;
pub use summary::{Encoding, encode_symbols, encode_text, encode_text_with};

/// Fractional digits of `1 / word length` in the probability model.
pub const PROBABILITY_SCALE: u32 = 20;
/// Fractional digits of the logarithms behind the entropy estimate.
pub const LOG_SCALE: u32 = 10;

/// Decimal precision used throughout one encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    pub probability_scale: u32,
    pub log_scale: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            probability_scale: PROBABILITY_SCALE,
            log_scale: LOG_SCALE,
        }
    }
}
