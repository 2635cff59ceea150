use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use memmap2::Mmap;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use suffreq::query::naive::naive_frequencies;
use suffreq::query::{FrequencyReport, QueryConfig};
use suffreq::tree::{construct, validate};
use suffreq::utils::{self, Spinner, DEFAULT_PATTERN, DEFAULT_REPEATS, DEFAULT_WORDS};
use suffreq::output;
use termcolor::ColorChoice;
use tracing::info;

#[derive(Parser)]
#[command(name = "suffreq")]
#[command(about = "Substring frequency analysis with suffix trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show diagnostic logs on stderr (honours RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all logs and the progress spinner
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the most frequent letter-only substrings of a file
    Count(CountArgs),
    /// Print a pattern repeated a number of times
    Repeat {
        /// Number of repetitions
        #[arg(default_value_t = DEFAULT_REPEATS)]
        repeats: u64,

        /// Pattern to repeat
        #[arg(default_value = DEFAULT_PATTERN)]
        pattern: String,
    },
    /// Print rounds of shuffled words
    Shuffle {
        /// Number of shuffled rounds
        #[arg(default_value_t = DEFAULT_REPEATS)]
        repeats: u64,

        /// Words to shuffle (defaults to "hall " "feels " "heels ")
        words: Vec<String>,

        /// Random seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args)]
struct CountArgs {
    /// Text file to analyze
    file: PathBuf,

    /// Number of substrings to report; zero or negative reports all
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    top: Option<i64>,

    /// Shortest substring length to consider
    #[arg(short, long, allow_negative_numbers = true)]
    min_length: Option<i64>,

    /// JSON file with `top_n` and `min_length` defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// When to color the table and chart
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,

    /// Print every tree edge before the report
    #[arg(long, conflicts_with = "naive")]
    dump_tree: bool,

    /// Count by enumerating words instead of building a suffix tree
    #[arg(long)]
    naive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl ColorArg {
    fn choice(self) -> ColorChoice {
        match self {
            ColorArg::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
            ColorArg::Auto => ColorChoice::Never,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

fn init_tracing(cli: &Cli) {
    // --quiet: off, --verbose: RUST_LOG or info, default: warnings only
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Count(ref args) => run_count(args, cli.quiet)?,
        Commands::Repeat { repeats, pattern } => {
            let repeats = usize::try_from(repeats).context("Repeat count too large")?;
            write_stdout(&utils::repeat_pattern(&pattern, repeats))?;
        }
        Commands::Shuffle {
            repeats,
            words,
            seed,
        } => {
            let repeats = usize::try_from(repeats).context("Repeat count too large")?;
            let seed = seed.unwrap_or_else(clock_seed);
            info!(seed, "shuffling words");

            let mut rng = SmallRng::seed_from_u64(seed);
            let text = if words.is_empty() {
                utils::shuffled_words(&DEFAULT_WORDS, repeats, &mut rng)
            } else {
                utils::shuffled_words(&words, repeats, &mut rng)
            };
            write_stdout(&text)?;
        }
    }

    Ok(())
}

fn run_count(args: &CountArgs, quiet: bool) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => QueryConfig::default(),
    };
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(min_length) = args.min_length {
        config.min_length = min_length;
    }
    let (limit, min_length) = config.limits()?;

    let banners = !args.json;
    if banners {
        println!("Reading file '{}'", args.file.display());
    }

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", args.file.display()))?
        .len();
    // Mapping a zero-length file fails on some platforms
    let mmap = if len == 0 {
        None
    } else {
        Some(unsafe { Mmap::map(&file) }.with_context(|| format!("Failed to map {}", args.file.display()))?)
    };
    let text: &[u8] = mmap.as_deref().unwrap_or(&[]);
    info!(bytes = text.len(), file = %args.file.display(), "read input");

    let report = if args.naive {
        validate(text)?;
        print_computation_banner(banners, limit, min_length);
        naive_frequencies(text, limit, min_length)
    } else {
        let spinner = Spinner::start(
            "Constructing suffix tree...",
            !quiet && io::stderr().is_terminal(),
        );
        let tree = construct(text);
        spinner.finish();
        let tree = tree?;

        if banners {
            println!("Suffix tree constructed.");
        }
        if args.dump_tree {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            tree.dump(&mut out)?;
            out.flush()?;
        }

        print_computation_banner(banners, limit, min_length);
        config.run(&tree)?
    };

    print_report(&report, args)
}

fn print_computation_banner(enabled: bool, limit: usize, min_length: usize) {
    if !enabled {
        return;
    }
    if limit == 0 {
        println!(
            "Performing computation of all substrings longer or equal to {} by occurrence frequency.",
            min_length
        );
    } else {
        println!(
            "Performing computation of top {} substrings longer or equal to {} by occurrence frequency.",
            limit, min_length
        );
    }
}

fn print_report(report: &FrequencyReport, args: &CountArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(report)?;
        println!("{}", json);
        return Ok(());
    }
    output::print_report(report, args.color.choice())?;
    Ok(())
}

fn load_config(path: &Path) -> Result<QueryConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config {}", path.display()))?;
    let config = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
