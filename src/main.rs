use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use randinterval::file::OutputFile;
use randinterval::index::DEFAULT_EXCLUDE;
use randinterval::{
    parse_length, sample_intervals, ChromTable, IntervalError, LoadOptions, Position,
    SampledInterval,
};
use std::io::{self, BufWriter, Write};

const INFO: &str = "\
randinterval: randomly sample genomic intervals

Chromosomes are drawn in proportion to their length, and start
positions uniformly within the chosen chromosome. Each interval is
printed as chrom:start-end (0-based, half-open).
";

#[derive(Parser)]
#[clap(name = "randinterval")]
#[clap(about = INFO)]
struct Cli {
    /// Increase logging verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Number of intervals to print
    #[arg(short = 'n', default_value_t = 1)]
    n: usize,

    /// Seed for the random number generator (if not set, seeds from the OS)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip chromosomes shorter than this (default: one more than the length)
    #[arg(long, value_parser = parse_length)]
    min_length: Option<Position>,

    /// Comma-separated chromosome names to skip, compared without a 'chr'
    /// prefix and ignoring case
    #[arg(short = 'x', long, value_delimiter = ',', default_values = DEFAULT_EXCLUDE)]
    exclude: Vec<String>,

    /// Keep every chromosome, including those in --exclude
    #[arg(long, conflicts_with = "exclude")]
    keep_all: bool,

    /// The output file path (if not set, uses standard out); '.gz' paths are
    /// gzip-compressed
    #[arg(short, long)]
    output: Option<String>,

    /// Write tab-separated BED3 rows instead of chrom:start-end
    #[arg(long, default_value_t = false)]
    bed: bool,

    /// Fast index for the genome reference, or any file of chromosome names
    /// and lengths
    #[arg(value_name = "ref.fai", required = true)]
    index: String,

    /// Length of the desired genomic interval, with optional suffix 'k' or 'm'
    #[arg(value_parser = parse_length, required = true)]
    length: Position,
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn write_intervals(
    writer: Box<dyn Write>,
    intervals: &[SampledInterval],
    bed: bool,
) -> Result<(), IntervalError> {
    if bed {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        for interval in intervals {
            wtr.serialize(interval)?;
        }
        wtr.flush()?;
    } else {
        let mut writer = writer;
        for interval in intervals {
            writeln!(writer, "{}", interval)?;
        }
        writer.flush()?;
    }
    Ok(())
}

fn run() -> Result<(), IntervalError> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let min_length = cli.min_length.unwrap_or(cli.length.saturating_add(1));
    if min_length <= cli.length {
        warn!(
            "min length {} does not exceed the interval length {}; \
             sampling fails if a chromosome too short to hold an interval is drawn",
            min_length, cli.length
        );
    }
    let exclude = if cli.keep_all { Vec::new() } else { cli.exclude };
    let options = LoadOptions::new(min_length).with_exclude(exclude);
    let table = ChromTable::from_index(&cli.index, &options)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // sample everything before writing, so a failure leaves no partial output
    let intervals = sample_intervals(&mut rng, &table, cli.length, cli.n)?;
    info!("sampled {} intervals of length {}", intervals.len(), cli.length);

    let writer: Box<dyn Write> = match &cli.output {
        Some(filepath) => OutputFile::new(filepath).writer()?,
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_intervals(writer, &intervals, cli.bed)
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
