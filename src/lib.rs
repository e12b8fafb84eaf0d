//! Sample random fixed-length genomic intervals.
//!
//! Chromosomes are drawn with probability proportional to their length, and
//! positions uniformly within the chosen chromosome. This is useful for
//! building background or control regions.
//!
//! A [`ChromTable`] is loaded once from a sequence index (e.g. a `.fai` file
//! or a two-column genome file), skipping excluded and short chromosomes.
//! Intervals are then drawn from it with an explicit random source.
//!
//! ```no_run
//! use randinterval::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let length = parse_length("5k").expect("bad length");
//! let table = ChromTable::from_index("hg38.fa.fai", &LoadOptions::new(length + 1))
//!                 .expect("could not read index");
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! for interval in sample_intervals(&mut rng, &table, length, 10).unwrap() {
//!     println!("{}", interval);
//! }
//! ```
//!
//! The weighted draw itself is available for any items through
//! [`weighted::WeightedChoice`].
//!
//! ```
//! use randinterval::weighted::WeightedChoice;
//!
//! let choice = WeightedChoice::from_pairs(vec![("a", 1u64), ("b", 3)]).unwrap();
//! assert_eq!(choice.cum_weights(), &[1, 4]);
//! assert_eq!(choice.index_at(0), Some(0));
//! assert_eq!(choice.index_at(1), Some(1));
//! ```

pub mod error;
pub mod file;
pub mod index;
pub mod length;
pub mod sampler;
pub mod weighted;

/// The integer type for genomic positions and chromosome sizes.
pub type Position = u64;

pub use error::IntervalError;
pub use index::{normalize_chrom_name, read_seqlens, ChromEntry, ChromTable, LoadOptions};
pub use length::parse_length;
pub use sampler::{sample_interval, sample_intervals, SampledInterval};

pub mod prelude {
    pub use crate::error::IntervalError;
    pub use crate::index::{ChromTable, LoadOptions, DEFAULT_EXCLUDE};
    pub use crate::length::parse_length;
    pub use crate::sampler::{sample_interval, sample_intervals, SampledInterval};
    pub use crate::Position;
}
