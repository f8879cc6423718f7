use std::fmt::Debug;

use crate::decimal::Decimal;

/// A single unit of an input word. The ordering decides where a symbol's
/// sub-interval is laid out, so encoder and any consumer must agree on it.
pub trait Symbol: Ord + Copy + Debug {}

impl Symbol for char {}
impl Symbol for u8 {}

pub trait Alphabet {
    type S: Symbol;

    /// Every symbol paired with its relative frequency, in the order in which
    /// sub-intervals are laid out.
    fn frequencies(&self) -> impl Iterator<Item = (&Self::S, &Decimal)>;

    /// An iterator over the symbols in the alphabet.
    fn symbols(&self) -> impl Iterator<Item = &Self::S> {
        self.frequencies().map(|(symbol, _)| symbol)
    }

    /// The share of the enclosing interval this symbol's sub-interval takes.
    fn relative_frequency(&self, symbol: &Self::S) -> Option<&Decimal> {
        self.frequencies()
            .find(|(s, _)| *s == symbol)
            .map(|(_, frequency)| frequency)
    }

    /// The sum of all relative frequencies. Close to, but not necessarily
    /// exactly, one.
    fn total_frequency(&self) -> Decimal {
        let mut sum = Decimal::zero();
        for (_, frequency) in self.frequencies() {
            sum = &sum + frequency;
        }
        sum
    }
}

impl<A: Alphabet> Alphabet for &A {
    type S = A::S;

    fn frequencies(&self) -> impl Iterator<Item = (&Self::S, &Decimal)> {
        (**self).frequencies()
    }

    fn relative_frequency(&self, symbol: &Self::S) -> Option<&Decimal> {
        (**self).relative_frequency(symbol)
    }
}
