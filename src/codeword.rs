use crate::decimal::{Decimal, RoundingMode};
use crate::error::{Error, Result};
use crate::interval::Interval;

// Least-digits selection
//
// Render start and end as digit strings and find the first index i at which
// they differ. If the two digits are adjacent (end[i] - start[i] == 1) rounding
// at i could land on end itself, so the cut moves one digit deeper. Without a
// differing digit the cut is at the length of the shorter string. The codeword
// is start rounded towards +infinity at that cut, which can only move it up
// and never below start.
//
// The cut is an index into the rendered string, which has "0." in front of the
// fractional digits, so the number of fractional digits kept is cut - 1.

/// The value inside `interval` that needs the fewest fractional digits.
pub fn select(interval: &Interval) -> Result<Decimal> {
    least_digits(interval.start(), interval.end())
}

/// The value inside `[start, end)` that needs the fewest fractional digits.
pub fn least_digits(start: &Decimal, end: &Decimal) -> Result<Decimal> {
    let invalid = || Error::InvalidInterval {
        start: start.to_string(),
        end: end.to_string(),
    };
    if start >= end {
        return Err(invalid());
    }

    let lower = start.to_string();
    let upper = end.to_string();
    let cut = rounding_position(lower.as_bytes(), upper.as_bytes());
    let mut places = u32::try_from(cut - 1).map_err(|_| invalid())?;

    loop {
        let candidate = start.with_scale(places, RoundingMode::Ceiling);
        if candidate < *end {
            log::debug!("Selected codeword {candidate} from [{start}, {end})");
            return Ok(candidate);
        }

        // Carrying into the cut digit reached end. At the scale of start the
        // candidate is start itself, so this terminates.
        log::debug!("Codeword {candidate} reaches {end}, keeping {} digits", places + 1);
        places += 1;
    }
}

/// Index into the rendered bounds at which to cut.
fn rounding_position(lower: &[u8], upper: &[u8]) -> i64 {
    let shortest = lower.len().min(upper.len());
    match lower.iter().zip(upper).position(|(l, u)| l != u) {
        Some(index) if i64::from(upper[index]) - i64::from(lower[index]) == 1 => {
            index as i64 + 1
        }
        Some(index) => index as i64,
        None => shortest as i64,
    }
}
