//! Drawing random fixed-length intervals from a [`ChromTable`].

use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::error::IntervalError;
use crate::index::ChromTable;
use crate::Position;

/// A sampled half-open interval `[start, end)` with a 0-based start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampledInterval {
    pub chrom: String,
    pub start: Position,
    pub end: Position,
}

impl SampledInterval {
    pub fn width(&self) -> Position {
        self.end - self.start
    }
}

impl fmt::Display for SampledInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Sample one interval of `length` basepairs.
///
/// The chromosome is drawn in proportion to its size, and the start is drawn
/// uniformly from every offset that leaves room for the full interval.
///
/// Errors if `length` is zero, or if the drawn chromosome is not strictly
/// longer than `length`. The latter means the table was loaded with a
/// minimum length that does not cover `length`; see [`ChromTable::can_hold`].
pub fn sample_interval<R: Rng + ?Sized>(
    rng: &mut R,
    table: &ChromTable,
    length: Position,
) -> Result<SampledInterval, IntervalError> {
    if length == 0 {
        return Err(IntervalError::ZeroLength);
    }
    let entry = table.choice().choose(rng);
    if entry.size <= length {
        return Err(IntervalError::ChromTooShort {
            chrom: entry.name.clone(),
            size: entry.size,
            length,
        });
    }
    let start = rng.random_range(0..entry.size - length);
    Ok(SampledInterval {
        chrom: entry.name.clone(),
        start,
        end: start + length,
    })
}

/// Sample `n` intervals in sequence from the same random source.
///
/// Either all `n` intervals are returned or the first error is.
pub fn sample_intervals<R: Rng + ?Sized>(
    rng: &mut R,
    table: &ChromTable,
    length: Position,
    n: usize,
) -> Result<Vec<SampledInterval>, IntervalError> {
    (0..n)
        .map(|_| sample_interval(&mut *rng, table, length))
        .collect()
}
