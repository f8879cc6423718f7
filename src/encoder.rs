use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::interval::Interval;

/// Narrows `[0, 1)` symbol by symbol according to an alphabet's frequencies.
pub struct Encoder<A: Alphabet> {
    alphabet: A,
}

/// What happened while consuming one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S> {
    /// Index of the consumed symbol in the word.
    pub position: usize,
    pub symbol: S,
    /// The interval before this symbol was consumed.
    pub enclosing: Interval,
    /// The enclosing interval split into one sub-interval per symbol, in alphabet order.
    pub partition: Vec<(S, Interval)>,
    /// The sub-interval of `symbol`, which encloses every later interval.
    pub selected: Interval,
}

enum State {
    Initializing,
    Narrowing(Interval),
    Done,
}

/// The steps of encoding one word, computed lazily.
pub struct Steps<'e, A: Alphabet, I: Iterator<Item = A::S>> {
    input: I,
    encoder: &'e Encoder<A>,
    position: usize,
    state: State,
}

// Sub-interval layout
//
// For the current interval [start, end) and the alphabet a_1 < ... < a_m with
// relative frequencies p_1, ..., p_m:
//
// lower = start
// for j = 1, ..., m
//     upper = (end - start) * p_j + lower
//     upper = min(upper, end)
//     sub-interval of a_j = [lower, upper)
//     lower = upper
//
// The arithmetic is exact, so the width of the interval after consuming
// x_1, ..., x_k is the product of their frequencies, except where the cap
// cut the last sub-interval short.
impl<A: Alphabet, I: Iterator<Item = A::S>> Iterator for Steps<'_, A, I> {
    type Item = Result<Step<A::S>>;

    fn next(&mut self) -> Option<Self::Item> {
        let enclosing = match std::mem::replace(&mut self.state, State::Done) {
            State::Initializing => Interval::unit(),
            State::Narrowing(interval) => interval,
            State::Done => return None,
        };

        let Some(symbol) = self.input.next() else {
            log::debug!("Encoded {} symbols into {enclosing}", self.position);
            return None;
        };

        let (partition, selected) = match self.encoder.partition(&enclosing, &symbol) {
            Ok(split) => split,
            Err(error) => return Some(Err(error)),
        };
        log::trace!(
            "Symbol {symbol:?} at {} narrows {enclosing} to {selected}",
            self.position
        );

        let step = Step {
            position: self.position,
            symbol,
            enclosing,
            partition,
            selected: selected.clone(),
        };
        self.position += 1;
        self.state = State::Narrowing(selected);
        Some(Ok(step))
    }
}

impl<A: Alphabet> Encoder<A> {
    /// Create an encoder for words over the given alphabet.
    pub fn new(alphabet: A) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &A {
        &self.alphabet
    }

    /// The steps of encoding `input`. Nothing is computed until the iterator is
    /// advanced, and calling this again starts over from `[0, 1)`.
    pub fn steps<I>(&self, input: I) -> Steps<'_, A, I::IntoIter>
    where
        I: IntoIterator<Item = A::S>,
    {
        Steps {
            input: input.into_iter(),
            encoder: self,
            position: 0,
            state: State::Initializing,
        }
    }

    /// Encode a whole word, returning its final interval.
    pub fn encode<I>(&self, input: I) -> Result<Interval>
    where
        I: IntoIterator<Item = A::S>,
    {
        let mut last = None;
        for step in self.steps(input) {
            last = Some(step?.selected);
        }
        last.ok_or(Error::EmptyInput)
    }

    /// Split `enclosing` among the alphabet and pick out the part of `symbol`.
    fn partition(
        &self,
        enclosing: &Interval,
        symbol: &A::S,
    ) -> Result<(Vec<(A::S, Interval)>, Interval)> {
        let width = enclosing.width();
        let mut lower = enclosing.start().clone();
        let mut partition = Vec::new();
        let mut selected = None;

        for (candidate, frequency) in self.alphabet.frequencies() {
            // Frequencies may sum to slightly more than one when 1/n rounded up.
            let upper = (&(&width * frequency) + &lower).min(enclosing.end().clone());
            let sub_interval = Interval::new(lower, upper.clone())?;
            if candidate == symbol {
                selected = Some(sub_interval.clone());
            }
            partition.push((*candidate, sub_interval));
            lower = upper;
        }

        let selected = selected.ok_or_else(|| Error::UnknownSymbol(format!("{symbol:?}")))?;
        Ok((partition, selected))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decimal::Decimal;
    use crate::example::{ExampleAlphabet, ExampleSymbol};
    use ExampleSymbol::*;

    /// Convenience function for encoding a vector of symbols using the example
    /// alphabet, rendering the bounds as strings.
    fn encode(input: Vec<ExampleSymbol>) -> Result<(String, String)> {
        let encoder = Encoder::new(ExampleAlphabet::new());
        let (start, end) = encoder.encode(input)?.into_bounds();
        Ok((start.to_string(), end.to_string()))
    }

    fn bounds(start: &str, end: &str) -> Result<(String, String)> {
        Ok((start.to_owned(), end.to_owned()))
    }

    #[test]
    fn encode_single_symbol() {
        assert_eq!(encode(vec![B]), bounds("0.25", "0.75"));
        assert_eq!(encode(vec![D]), bounds("0.90", "1.00"));
    }

    #[test]
    fn encode_small_message() {
        assert_eq!(encode(vec![B, A, C]), bounds("0.343750", "0.362500"));
    }

    #[test]
    fn encode_repeated_last_symbol() {
        assert_eq!(encode(vec![D, D, D]), bounds("0.999000", "1.000000"));
    }

    #[test]
    fn empty_message_has_no_interval() {
        assert_eq!(encode(vec![]), Err(Error::EmptyInput));
    }

    #[test]
    fn steps_expose_partition() {
        let encoder = Encoder::new(ExampleAlphabet::new());
        let steps: Vec<_> = encoder
            .steps([B, A])
            .collect::<Result<_>>()
            .expect("Encoding failed");

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].position, 0);
        assert_eq!(steps[0].enclosing, Interval::unit());

        let boundaries: Vec<_> = steps[0]
            .partition
            .iter()
            .map(|(symbol, interval)| (*symbol, interval.end().to_string()))
            .collect();
        assert_eq!(
            boundaries,
            vec![
                (A, "0.25".to_owned()),
                (B, "0.75".to_owned()),
                (C, "0.90".to_owned()),
                (D, "1.00".to_owned()),
            ]
        );

        assert_eq!(steps[1].symbol, A);
        assert_eq!(steps[1].enclosing, steps[0].selected);
        assert_eq!(steps[1].selected.end(), &Decimal::new(375, 3));
    }

    #[test]
    fn steps_restart() {
        let encoder = Encoder::new(ExampleAlphabet::new());
        let first: Vec<_> = encoder.steps([C, B, D]).collect();
        let second: Vec<_> = encoder.steps([C, B, D]).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn steps_are_nested() {
        let encoder = Encoder::new(ExampleAlphabet::new());
        let mut outer = Interval::unit();
        for step in encoder.steps([A, D, B, B, C, A]) {
            let step = step.expect("Encoding failed");
            assert!(outer.encloses(&step.selected));
            assert!(step.selected.width() < outer.width());
            outer = step.selected;
        }
    }

    #[test]
    fn error_on_unknown_symbol() {
        let model = crate::model::ProbabilityModel::build(&['a', 'b'], 20).unwrap();
        let encoder = Encoder::new(&model);
        assert_eq!(
            encoder.encode("abc".chars()),
            Err(Error::UnknownSymbol("'c'".to_owned()))
        );

        let mut steps = encoder.steps("cab".chars());
        assert!(matches!(steps.next(), Some(Err(Error::UnknownSymbol(_)))));
        assert!(steps.next().is_none());
    }

    #[test]
    fn repeated_symbol_stays_in_unit_interval() {
        // 1/6 rounds up at twenty digits, so the lone frequency exceeds one
        let word: Vec<char> = "aaaaaa".chars().collect();
        let model = crate::model::ProbabilityModel::build(&word, 20).unwrap();
        assert!(model.total_frequency() > Decimal::one());

        let interval = Encoder::new(&model).encode(word).unwrap();
        assert_eq!(interval, Interval::unit());
    }

    #[test]
    fn last_sub_interval_is_capped() {
        let word: Vec<char> = "abbbbb".chars().collect();
        let model = crate::model::ProbabilityModel::build(&word, 20).unwrap();
        assert_eq!(
            model.total_frequency().to_string(),
            "1.00000000000000000002"
        );

        let encoder = Encoder::new(&model);
        for step in encoder.steps(word) {
            let step = step.expect("Encoding failed");
            assert!(step.enclosing.encloses(&step.selected));
            let (_, last) = step.partition.last().expect("Partition is not empty");
            assert_eq!(last.end(), step.enclosing.end());
        }
    }
}
