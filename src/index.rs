//! Reading sequence index files into a size-weighted chromosome table.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::error::IntervalError;
use crate::file::InputFile;
use crate::weighted::WeightedChoice;
use crate::Position;

/// Normalized names of the chromosomes excluded by default: the sex
/// chromosomes and the mitochondrial genome.
pub const DEFAULT_EXCLUDE: [&str; 4] = ["x", "y", "m", "mt"];

/// Normalize a chromosome name for exclusion matching.
///
/// A leading `chr` (case-sensitive) is removed and the remainder lowercased,
/// so `chrX`, `X` and `x` all become `x`.
pub fn normalize_chrom_name(name: &str) -> String {
    name.strip_prefix("chr").unwrap_or(name).to_lowercase()
}

/// Read a whitespace-delimited index of sequence names and their lengths.
///
/// Only the first two columns are used, so both `.fai` files and
/// two-column genome files work. Gzip-compressed input is supported. Blank
/// lines and lines starting with `#` are skipped.
pub fn read_seqlens<P: AsRef<Path>>(filepath: P) -> Result<IndexMap<String, Position>, IntervalError> {
    let reader = InputFile::new(filepath).reader()?;
    let mut seqlens = IndexMap::new();

    for (i, result) in reader.lines().enumerate() {
        let line = result?;
        let line_number = i + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let chrom = fields
            .next()
            .ok_or(IntervalError::MissingField(line_number))?;
        let size_str = fields
            .next()
            .ok_or(IntervalError::MissingField(line_number))?;
        let size: Position = size_str.parse().map_err(|_| {
            IntervalError::ParseError(format!(
                "line {}: failed to parse size from string: {}",
                line_number, size_str
            ))
        })?;
        if seqlens.insert(chrom.to_string(), size).is_some() {
            return Err(IntervalError::DuplicateChrom(chrom.to_string()));
        }
    }

    Ok(seqlens)
}

/// Filters applied when loading a [`ChromTable`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Chromosomes shorter than this are skipped.
    pub min_length: Position,
    /// Normalized names (see [`normalize_chrom_name`]) to skip.
    pub exclude: HashSet<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            min_length: 1,
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadOptions {
    pub fn new(min_length: Position) -> Self {
        Self {
            min_length,
            ..Default::default()
        }
    }

    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = names
            .into_iter()
            .map(|name| normalize_chrom_name(name.as_ref()))
            .collect();
        self
    }

    /// The exclusion set as a sorted, brace-delimited list.
    fn exclude_display(&self) -> String {
        let mut names: Vec<&str> = self.exclude.iter().map(String::as_str).collect();
        names.sort_unstable();
        format!("{{{}}}", names.join(", "))
    }

    /// Whether a chromosome passes the filters, logging why if not.
    fn keep(&self, chrom: &str, size: Position) -> bool {
        if self.exclude.contains(&normalize_chrom_name(chrom)) {
            debug!("skipping excluded chromosome {}", chrom);
            return false;
        }
        if size == 0 || size < self.min_length {
            debug!(
                "skipping chromosome {} of size {} (min_length={})",
                chrom, size, self.min_length
            );
            return false;
        }
        true
    }
}

/// A chromosome's name and length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChromEntry {
    pub name: String,
    pub size: Position,
}

/// Chromosomes sorted by ascending size, weighted by their size.
#[derive(Debug, Clone)]
pub struct ChromTable {
    choice: WeightedChoice<ChromEntry, Position>,
}

impl ChromTable {
    /// Load and filter the chromosomes in an index file.
    ///
    /// # Arguments
    ///  * `filepath`: the index (e.g. `ref.fa.fai`), plaintext or gzipped.
    ///  * `options`: the minimum length and exclusion set.
    pub fn from_index<P: AsRef<Path>>(
        filepath: P,
        options: &LoadOptions,
    ) -> Result<ChromTable, IntervalError> {
        let seqlens = read_seqlens(&filepath)?;
        ChromTable::from_seqlens(seqlens, options).map_err(|e| match e {
            IntervalError::NoChromosomes {
                min_length,
                exclude,
                ..
            } => IntervalError::NoChromosomes {
                path: filepath.as_ref().display().to_string(),
                min_length,
                exclude,
            },
            other => other,
        })
    }

    /// Build a table from sequence names and lengths, in file order.
    pub fn from_seqlens<I>(seqlens: I, options: &LoadOptions) -> Result<ChromTable, IntervalError>
    where
        I: IntoIterator<Item = (String, Position)>,
    {
        let mut entries: Vec<ChromEntry> = seqlens
            .into_iter()
            .filter(|(name, size)| options.keep(name, *size))
            .map(|(name, size)| ChromEntry { name, size })
            .collect();

        if entries.is_empty() {
            return Err(IntervalError::NoChromosomes {
                path: "<input>".to_string(),
                min_length: options.min_length,
                exclude: options.exclude_display(),
            });
        }

        // Smaller chromosomes first, keeping file order among equal sizes.
        entries.sort_by_key(|entry| entry.size);

        let choice = WeightedChoice::from_pairs(entries.into_iter().map(|entry| {
            let size = entry.size;
            (entry, size)
        }))?;
        let table = ChromTable { choice };
        info!(
            "loaded {} chromosomes totalling {} bp",
            table.len(),
            table.total_size()
        );
        Ok(table)
    }

    /// Return the number of chromosomes.
    pub fn len(&self) -> usize {
        self.choice.len()
    }

    /// Return if the table is empty; never true for a loaded table.
    pub fn is_empty(&self) -> bool {
        self.choice.is_empty()
    }

    pub fn entries(&self) -> &[ChromEntry] {
        self.choice.items()
    }

    /// The running sum of chromosome sizes, in table order.
    pub fn cum_weights(&self) -> &[Position] {
        self.choice.cum_weights()
    }

    pub fn total_size(&self) -> Position {
        self.choice.total()
    }

    /// Whether every chromosome is strictly longer than `length`, i.e. an
    /// interval of that length fits no matter which chromosome is drawn.
    pub fn can_hold(&self, length: Position) -> bool {
        // entries are sorted by size
        self.entries().first().is_some_and(|entry| entry.size > length)
    }

    pub(crate) fn choice(&self) -> &WeightedChoice<ChromEntry, Position> {
        &self.choice
    }

    /// Iterate over the chromosomes in ascending size order.
    pub fn iter(&self) -> impl Iterator<Item = &ChromEntry> {
        self.entries().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const TEST_FAI: &str = "tests/data/test.fai";

    fn write_index(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn names(table: &ChromTable) -> Vec<&str> {
        table.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn test_normalize_chrom_name() {
        assert_eq!(normalize_chrom_name("chrX"), "x");
        assert_eq!(normalize_chrom_name("chrMT"), "mt");
        assert_eq!(normalize_chrom_name("chrM"), "m");
        assert_eq!(normalize_chrom_name("Y"), "y");
        assert_eq!(normalize_chrom_name("chr1"), "1");
        // the prefix match is case-sensitive
        assert_eq!(normalize_chrom_name("ChrX"), "chrx");
        assert_eq!(normalize_chrom_name("chr"), "");
        assert_eq!(normalize_chrom_name("scaffold_12"), "scaffold_12");
    }

    #[test]
    fn test_read_seqlens() {
        let seqlens = read_seqlens(TEST_FAI).unwrap();
        assert_eq!(seqlens.len(), 3);
        assert_eq!(seqlens.get("chr1"), Some(&10000));
        assert_eq!(seqlens.get("chr2"), Some(&5000));
        assert_eq!(seqlens.get("chrX"), Some(&8000));
        // file order is kept
        let order: Vec<_> = seqlens.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["chr1", "chr2", "chrX"]);
    }

    #[test]
    fn test_load_concrete_index() {
        let table = ChromTable::from_index(TEST_FAI, &LoadOptions::new(1000)).unwrap();
        assert_eq!(
            table.entries(),
            &[
                ChromEntry {
                    name: "chr2".to_string(),
                    size: 5000
                },
                ChromEntry {
                    name: "chr1".to_string(),
                    size: 10000
                },
            ]
        );
        assert_eq!(table.cum_weights(), &[5000, 15000]);
        assert_eq!(table.total_size(), 15000);
    }

    #[test]
    fn test_filters_and_invariants() {
        let file = write_index(
            "chr1\t248956422\t112\t70\t71\n\
             chr2\t242193529\t252513167\t70\t71\n\
             chr21\t46709983\t2889318\t70\t71\n\
             chrX\t156040895\t3\t70\t71\n\
             chrY\t57227415\t3\t70\t71\n\
             chrM\t16569\t3\t70\t71\n\
             chrUn_KI270302v1\t2274\t3\t70\t71\n\
             chr22_KI270731v1_random\t150754\t3\t70\t71\n",
        );
        let options = LoadOptions::new(100_000);
        let table = ChromTable::from_index(file.path(), &options).unwrap();
        assert_eq!(
            names(&table),
            vec!["chr22_KI270731v1_random", "chr21", "chr2", "chr1"]
        );

        for entry in table.iter() {
            assert!(entry.size >= options.min_length);
            assert!(!options.exclude.contains(&normalize_chrom_name(&entry.name)));
        }
        let weights = table.cum_weights();
        assert!(weights.windows(2).all(|pair| pair[0] < pair[1]));
        let total: Position = table.iter().map(|entry| entry.size).sum();
        assert_eq!(*weights.last().unwrap(), total);
    }

    #[test]
    fn test_custom_exclude() {
        let file = write_index("chr1 300\nchr2 200\nchrX 100\n");
        let options = LoadOptions::new(1).with_exclude(["chr2"]);
        let table = ChromTable::from_index(file.path(), &options).unwrap();
        assert_eq!(names(&table), vec!["chrX", "chr1"]);

        let keep_all = LoadOptions::new(1).with_exclude(Vec::<String>::new());
        let table = ChromTable::from_index(file.path(), &keep_all).unwrap();
        assert_eq!(names(&table), vec!["chrX", "chr2", "chr1"]);
    }

    #[test]
    fn test_equal_sizes_keep_file_order() {
        let file = write_index("b 100\na 100\nc 50\n");
        let table = ChromTable::from_index(file.path(), &LoadOptions::new(1)).unwrap();
        assert_eq!(names(&table), vec!["c", "b", "a"]);
        assert_eq!(table.cum_weights(), &[50, 150, 250]);
    }

    #[test]
    fn test_zero_size_skipped() {
        let file = write_index("empty 0\nchr1 10\n");
        let table = ChromTable::from_index(file.path(), &LoadOptions::new(0)).unwrap();
        assert_eq!(names(&table), vec!["chr1"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let file = write_index("# a header\n\nchr1 10\n   \nchr2 20 extra fields\n");
        let seqlens = read_seqlens(file.path()).unwrap();
        assert_eq!(seqlens.len(), 2);
        assert_eq!(seqlens.get("chr2"), Some(&20));
    }

    #[test]
    fn test_no_chromosomes() {
        let file = write_index("chrX 8000\nchrY 9000\nchr1 500\n");
        let err = ChromTable::from_index(file.path(), &LoadOptions::new(1000)).unwrap_err();
        match &err {
            IntervalError::NoChromosomes {
                path,
                min_length,
                exclude,
            } => {
                assert_eq!(path, &file.path().display().to_string());
                assert_eq!(*min_length, 1000);
                assert_eq!(exclude, "{m, mt, x, y}");
            }
            other => panic!("unexpected error: {}", other),
        }
        let message = err.to_string();
        assert!(message.contains("min_length=1000"));
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_empty_index() {
        let file = write_index("");
        let err = ChromTable::from_index(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, IntervalError::NoChromosomes { .. }));
    }

    #[test]
    fn test_malformed_lines() {
        let file = write_index("chr1 100\nchr2\n");
        let err = read_seqlens(file.path()).unwrap_err();
        assert!(matches!(err, IntervalError::MissingField(2)));

        let file = write_index("chr1 100\nchr2 1e5\n");
        let err = read_seqlens(file.path()).unwrap_err();
        assert!(matches!(err, IntervalError::ParseError(_)));
        assert!(err.to_string().contains("line 2"));

        let file = write_index("chr1 -100\n");
        assert!(matches!(
            read_seqlens(file.path()).unwrap_err(),
            IntervalError::ParseError(_)
        ));

        let file = write_index("chr1 100\nchr1 200\n");
        assert!(matches!(
            read_seqlens(file.path()).unwrap_err(),
            IntervalError::DuplicateChrom(name) if name == "chr1"
        ));
    }

    #[test]
    fn test_gzipped_index() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.fai.gz");
        {
            let mut writer = crate::file::OutputFile::new(&path).writer().unwrap();
            writer
                .write_all(std::fs::read_to_string(TEST_FAI).unwrap().as_bytes())
                .unwrap();
            writer.flush().unwrap();
        }
        let plain = ChromTable::from_index(TEST_FAI, &LoadOptions::new(1000)).unwrap();
        let gzipped = ChromTable::from_index(&path, &LoadOptions::new(1000)).unwrap();
        assert_eq!(plain.entries(), gzipped.entries());
        assert_eq!(plain.cum_weights(), gzipped.cum_weights());
    }

    #[test]
    fn test_can_hold() {
        let table = ChromTable::from_index(TEST_FAI, &LoadOptions::new(1000)).unwrap();
        assert!(table.can_hold(4999));
        assert!(!table.can_hold(5000));
    }
}
