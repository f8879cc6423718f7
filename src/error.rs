use thiserror::Error;

/// Errors that can occur while modelling, encoding or measuring a word.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Input must contain at least one non-whitespace symbol")]
    EmptyInput,

    #[error("Division by zero")]
    DivisionByZero,

    /// The bounds cannot describe a half-open interval inside which a
    /// codeword could be chosen.
    #[error("Malformed interval [{start}, {end})")]
    InvalidInterval { start: String, end: String },

    /// The rounded `1 / length` leaves no room for every symbol in `[0, 1)`.
    #[error("Scale {scale} is too coarse for a word of length {length}")]
    InvalidPrecision { scale: u32, length: usize },

    #[error("Symbol {0} is not part of the alphabet")]
    UnknownSymbol(String),

    #[error("Logarithm of non-positive value {0}")]
    NonPositiveLogarithm(String),

    #[error("Invalid decimal literal {0:?}")]
    InvalidDecimal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
