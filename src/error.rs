use std::io;
use thiserror::Error;

use crate::file::FileError;
use crate::weighted::WeightedError;
use crate::Position;

#[derive(Error, Debug)]
pub enum IntervalError {
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("File error: {0}")]
    FileError(#[from] FileError),
    #[error("Output writing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Weighting error: {0}")]
    WeightedError(#[from] WeightedError),
    #[error("Missing field on line {0}")]
    MissingField(usize),
    #[error("Failed to parse a column of the index file: {0}")]
    ParseError(String),
    #[error("Chromosome '{0}' appears more than once")]
    DuplicateChrom(String),
    #[error("{path}: no chromosomes found (min_length={min_length}, exclude={exclude})")]
    NoChromosomes {
        path: String,
        min_length: Position,
        exclude: String,
    },
    #[error("Chromosome '{chrom}' (size {size}) is not longer than the interval length {length}")]
    ChromTooShort {
        chrom: String,
        size: Position,
        length: Position,
    },
    #[error("Interval length must be greater than zero")]
    ZeroLength,
    #[error("Invalid length '{0}': must be an integer, with optional suffix 'k' or 'm'")]
    InvalidLength(String),
}
