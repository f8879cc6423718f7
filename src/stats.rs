use biterator::Bit;
use serde::Serialize;

use crate::alphabet::Symbol;
use crate::decimal::{Decimal, RoundingMode};
use crate::error::Result;
use crate::model::ProbabilityModel;

/// Information content of a word next to the size of its codeword.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Estimated information content of the whole word, in bits.
    pub entropy: Decimal,
    /// Bits needed for the codeword's digits.
    pub bit_length: usize,
}

impl Statistics {
    pub fn new<S: Symbol>(
        model: &ProbabilityModel<S>,
        codeword: &Decimal,
        log_scale: u32,
    ) -> Result<Self> {
        Ok(Self {
            entropy: entropy(model, log_scale)?,
            bit_length: bit_length(codeword),
        })
    }
}

/// `Σ p × n × -log2(p)` over the alphabet, where `n` is the word length.
///
/// Logarithms are taken to `log_scale` fractional digits and `log2(p)` keeps
/// the scale of `ln(p)`.
pub fn entropy<S: Symbol>(model: &ProbabilityModel<S>, log_scale: u32) -> Result<Decimal> {
    let ln_2 = Decimal::from(2u32).ln(log_scale)?;
    let length = Decimal::from(model.word_length());

    let mut sum = Decimal::zero();
    for entry in model.entries() {
        let ln = entry.frequency.ln(log_scale)?;
        let log_2 = ln.checked_div(&ln_2, ln.scale(), RoundingMode::HalfUp)?;
        sum = &sum + &(&(&entry.frequency * &length) * &-log_2);
    }

    log::debug!("Entropy of the word is {sum} bits");
    Ok(sum)
}

/// Number of bits of the codeword's unscaled value, counted over its big-endian
/// bytes: leading zero bytes are skipped, the first nonzero byte contributes
/// its significant bits and every byte after it a full eight.
pub fn bit_length(codeword: &Decimal) -> usize {
    let bytes = codeword.unscaled().to_signed_bytes_be();
    let mut bytes = bytes.iter().skip_while(|&&byte| byte == 0);
    match bytes.next() {
        Some(leading) => (u8::BITS - leading.leading_zeros()) as usize + 8 * bytes.count(),
        None => 0,
    }
}

/// The significant bits of the codeword's unscaled magnitude, most significant
/// first. There are [`bit_length`] of them.
pub fn codeword_bits(codeword: &Decimal) -> Vec<Bit> {
    let magnitude = codeword.unscaled().magnitude();
    (0..magnitude.bits())
        .rev()
        .map(|index| if magnitude.bit(index) { Bit::One } else { Bit::Zero })
        .collect()
}
