//! Plaintext and gzip-compressed file input and output.
//!
//! [`InputFile`] reads sequence index files that may or may not be
//! gzip-compressed, and [`OutputFile`] writes sampled intervals, compressing
//! them when the output path ends in `.gz`.
//!
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error on '{}': {1}", .0.display())]
    IOError(PathBuf, #[source] io::Error),
}

/// Check if a file is gzipped by looking for the magic numbers.
///
/// Files shorter than the magic number are treated as plaintext.
fn is_gzipped_file(filepath: &Path) -> io::Result<bool> {
    let file = File::open(filepath)?;
    let mut buffer = Vec::with_capacity(GZIP_MAGIC.len());
    file.take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut buffer)?;
    Ok(buffer == GZIP_MAGIC)
}

/// An input file, possibly gzip-compressed.
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    pub fn new<P: AsRef<Path>>(filepath: P) -> Self {
        Self {
            filepath: filepath.as_ref().to_path_buf(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// Compression is detected from the file contents rather than the
    /// extension, so a `.fai.gz` and a renamed gzip file both decompress.
    pub fn reader(&self) -> Result<BufReader<Box<dyn Read>>, FileError> {
        let wrap = |e| FileError::IOError(self.filepath.clone(), e);
        let is_gzipped = is_gzipped_file(&self.filepath).map_err(wrap)?;
        let file = File::open(&self.filepath).map_err(wrap)?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

/// An output file, gzip-compressed if the path ends in `.gz`.
pub struct OutputFile {
    pub filepath: PathBuf,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    pub fn new<P: AsRef<Path>>(filepath: P) -> Self {
        Self {
            filepath: filepath.as_ref().to_path_buf(),
        }
    }

    fn is_gzip(&self) -> bool {
        self.filepath
            .extension()
            .is_some_and(|ext| ext == "gz")
    }

    /// Creates the file and returns a buffered writer.
    pub fn writer(&self) -> Result<Box<dyn Write>, FileError> {
        let file = File::create(&self.filepath)
            .map_err(|e| FileError::IOError(self.filepath.clone(), e))?;
        let writer: Box<dyn Write> = if self.is_gzip() {
            Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            Box::new(BufWriter::new(file))
        };
        Ok(writer)
    }
}
