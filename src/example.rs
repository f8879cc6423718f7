use crate::alphabet::{Alphabet, Symbol};
use crate::decimal::Decimal;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum ExampleSymbol {
    A,
    B,
    C,
    D,
}

impl Symbol for ExampleSymbol {}

/// A fixed alphabet whose frequencies are small enough to check by hand.
pub struct ExampleAlphabet {
    frequencies: Vec<(ExampleSymbol, Decimal)>,
}

impl ExampleAlphabet {
    pub fn new() -> Self {
        // A: 0.25, B: 0.50, C: 0.15, D: 0.10
        let frequency = |unscaled: u32| Decimal::new(unscaled, 2);
        Self {
            frequencies: vec![
                (ExampleSymbol::A, frequency(25)),
                (ExampleSymbol::B, frequency(50)),
                (ExampleSymbol::C, frequency(15)),
                (ExampleSymbol::D, frequency(10)),
            ],
        }
    }
}

impl Alphabet for ExampleAlphabet {
    type S = ExampleSymbol;

    fn frequencies(&self) -> impl Iterator<Item = (&Self::S, &Decimal)> {
        self.frequencies
            .iter()
            .map(|(symbol, frequency)| (symbol, frequency))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ExampleSymbol::*;

    #[test]
    fn test_symbols() {
        let alphabet = ExampleAlphabet::new();
        assert_eq!(
            alphabet.symbols().collect::<Vec<_>>(),
            vec![&A, &B, &C, &D]
        );
    }

    #[test]
    fn test_relative_frequency() {
        let alphabet = ExampleAlphabet::new();
        assert_eq!(alphabet.relative_frequency(&A), Some(&Decimal::new(25, 2)));
        assert_eq!(alphabet.relative_frequency(&C), Some(&Decimal::new(15, 2)));
    }

    #[test]
    fn test_total_frequency() {
        let alphabet = ExampleAlphabet::new();
        assert_eq!(alphabet.total_frequency(), Decimal::one());
    }
}
