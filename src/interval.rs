use std::fmt;

use serde::Serialize;

use crate::decimal::Decimal;
use crate::error::{Error, Result};

/// A half-open range `[start, end)` with `start < end`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Interval {
    start: Decimal,
    end: Decimal,
}

impl Interval {
    pub fn new(start: Decimal, end: Decimal) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// `[0, 1)`, the state before any symbol has been consumed.
    pub fn unit() -> Self {
        Self {
            start: Decimal::zero(),
            end: Decimal::one(),
        }
    }

    pub fn start(&self) -> &Decimal {
        &self.start
    }

    pub fn end(&self) -> &Decimal {
        &self.end
    }

    pub fn width(&self) -> Decimal {
        &self.end - &self.start
    }

    pub fn contains(&self, value: &Decimal) -> bool {
        self.start <= *value && *value < self.end
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn into_bounds(self) -> (Decimal, Decimal) {
        (self.start, self.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
