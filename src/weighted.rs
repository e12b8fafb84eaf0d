//! Weighted random choice over an ordered collection of items.
//!
//! [`WeightedChoice`] stores the items alongside the running sum of their
//! weights. A draw picks a uniform value in `[0, total)` and locates the first
//! item whose cumulative weight exceeds it, so each item is chosen with
//! probability `weight / total`.

use num_traits::{PrimInt, Unsigned};
use rand::distr::uniform::SampleUniform;
use rand::Rng;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum WeightedError {
    #[error("no items to choose from")]
    Empty,
    #[error("item {0} has zero weight")]
    ZeroWeight(usize),
    #[error("total weight overflows at item {0}")]
    Overflow(usize),
}

/// Items paired with the cumulative sum of their weights.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T, W> {
    items: Vec<T>,
    cum_weights: Vec<W>,
}

impl<T, W> WeightedChoice<T, W>
where
    W: PrimInt + Unsigned + SampleUniform + Debug,
{
    /// Build from `(item, weight)` pairs, keeping their order.
    ///
    /// Every weight must be positive, so the cumulative weights are strictly
    /// increasing.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, WeightedError>
    where
        I: IntoIterator<Item = (T, W)>,
    {
        let mut items = Vec::new();
        let mut cum_weights = Vec::new();
        let mut total = W::zero();
        for (i, (item, weight)) in pairs.into_iter().enumerate() {
            if weight.is_zero() {
                return Err(WeightedError::ZeroWeight(i));
            }
            total = total
                .checked_add(&weight)
                .ok_or(WeightedError::Overflow(i))?;
            items.push(item);
            cum_weights.push(total);
        }
        if items.is_empty() {
            return Err(WeightedError::Empty);
        }
        Ok(Self { items, cum_weights })
    }

    /// Return the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return if there are no items. Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cum_weights(&self) -> &[W] {
        &self.cum_weights
    }

    /// The sum of all weights.
    pub fn total(&self) -> W {
        // non-empty by construction
        self.cum_weights.last().copied().unwrap_or_else(W::zero)
    }

    /// Iterate over `(item, weight)` pairs, recovering each weight from the
    /// cumulative sums.
    pub fn iter(&self) -> impl Iterator<Item = (&T, W)> + '_ {
        let mut previous = W::zero();
        self.items
            .iter()
            .zip(self.cum_weights.iter())
            .map(move |(item, &cum)| {
                let weight = cum - previous;
                previous = cum;
                (item, weight)
            })
    }

    /// The index of the first item whose cumulative weight is strictly
    /// greater than `draw`, or `None` if `draw` is not below the total.
    pub fn index_at(&self, draw: W) -> Option<usize> {
        // a draw equal to a boundary belongs to the next item
        let idx = self.cum_weights.partition_point(|&w| w <= draw);
        (idx < self.len()).then_some(idx)
    }

    /// Draw an index with probability proportional to its weight.
    pub fn choose_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let draw = rng.random_range(W::zero()..self.total());
        // draw < total, so the lookup always succeeds
        self.index_at(draw).unwrap_or(self.len() - 1)
    }

    /// Draw an item with probability proportional to its weight.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.choose_index(rng)]
    }
}
