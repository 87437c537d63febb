//! Run one or more outcome patterns through a saturating-counter table and
//! report per-step predictions and accuracy.

use std::process;

use clap::{ Parser, ValueEnum };
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use satpred::*;
use satpred::error::Result;

/// Patterns used when none are given on the command line.
const DEMO_PATTERNS: [(&str, &str); 4] = [
    ("Always Taken",     "TTTTTTTT"),
    ("Always Not Taken", "NNNNNNNN"),
    ("Alternating",      "TNTNTNTN"),
    ("Biased Taken",     "TTTNTTTNTTTTN"),
];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IndexArg {
    /// Slot is the step number modulo the table size
    Aliased,
    /// Each pattern owns one slot of a shared table
    PerEntity,
}
impl From<IndexArg> for IndexStrategy {
    fn from(x: IndexArg) -> Self {
        match x {
            IndexArg::Aliased => Self::Aliased,
            IndexArg::PerEntity => Self::PerEntity,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "satpred",
    version,
    about = "Saturating-counter branch predictor simulator",
    long_about = None,
)]
struct Cli {
    /// Patterns as `NAME=PATTERN` or `PATTERN`, over the symbols T and N.
    patterns: Vec<String>,

    /// JSON predictor configuration; flags below override its fields.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of counters in the table.
    #[arg(short, long)]
    size: Option<usize>,

    /// Largest counter value.
    #[arg(long)]
    max: Option<u8>,

    /// Initial counter value.
    #[arg(long)]
    init: Option<u8>,

    /// Strategy for selecting a counter.
    #[arg(long, value_enum)]
    index: Option<IndexArg>,

    /// Append a random pattern of this length.
    #[arg(long)]
    random: Option<usize>,

    /// Probability that a random outcome is taken.
    #[arg(long, default_value_t = 0.75, requires = "random")]
    bias: f64,

    /// Seed for the random pattern.
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Only print summaries, not every step.
    #[arg(short, long)]
    quiet: bool,
}

fn load_config(cli: &Cli) -> Result<PredictorConfig> {
    let mut cfg = match &cli.config {
        Some(path) => PredictorConfig::from_file(path)?,
        None => PredictorConfig::default(),
    };
    if let Some(size) = cli.size { cfg.size = size; }
    if let Some(max) = cli.max { cfg.ctr.max = max; }
    if let Some(init) = cli.init { cfg.ctr.init = init; }
    if let Some(index) = cli.index { cfg.index = index.into(); }
    cfg.validate()?;
    Ok(cfg)
}

fn build_experiment(cli: &Cli, cfg: PredictorConfig) -> Result<Experiment> {
    let mut exp = Experiment::new(cfg);
    if cli.patterns.is_empty() && cli.random.is_none() {
        for (name, pat) in DEMO_PATTERNS {
            exp.add_pattern(name, pat.parse()?);
        }
    }
    for (i, arg) in cli.patterns.iter().enumerate() {
        let (name, pat) = match arg.split_once('=') {
            Some((name, pat)) => (name.to_string(), pat),
            None => (format!("Pattern {}", i + 1), arg.as_str()),
        };
        exp.add_pattern(name, pat.parse()?);
    }
    if let Some(len) = cli.random {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pat = Pattern::random(&mut rng, len, cli.bias);
        exp.add_pattern(format!("Random ({:.0}% bias)", cli.bias * 100.0), pat);
    }
    Ok(exp)
}

fn fmt_accuracy(stats: &AccuracyStats) -> String {
    match stats.accuracy() {
        Some(pct) => format!("{:.2}%", pct),
        None => "n/a".to_string(),
    }
}

fn print_run(run: &NamedRun, quiet: bool) {
    println!();
    println!("--- {} ---", run.name);
    println!("Pattern: {}", run.pattern);
    if !quiet {
        println!("Step | Index | Counter | Prediction | Actual | Correct?");
        println!("-------------------------------------------------------");
        for t in run.report.trials.iter() {
            println!(" {:3} |  {:3}  |   {:3}   |     {}      |   {}    |   {}",
                t.step + 1, t.slot, t.ctr, t.prediction, t.outcome,
                if t.hit { "Yes" } else { "No" }
            );
        }
    }
    println!("Accuracy: {} ({}/{})",
        fmt_accuracy(&run.report.stats),
        run.report.stats.hits(),
        run.report.stats.total(),
    );
    println!("Final counter states:");
    for s in run.report.final_state.iter() {
        println!("  Counter {:3}: {} ({})", s.slot, s.value, s.state);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    let exp = build_experiment(&cli, cfg)?;
    info!("running {} patterns with {:?}", exp.num_patterns(), cfg);

    println!("{}-entry table of {}-bit saturating counters (0-{}), {:?} indexing",
        cfg.size, cfg.ctr.storage_bits(), cfg.ctr.max, cfg.index
    );
    println!("Taken if counter > {}, initial value {}", cfg.ctr.max / 2, cfg.ctr.init);

    let report = exp.run()?;
    for r in report.runs.iter() {
        print_run(r, cli.quiet);
    }

    println!();
    println!("===== TEAM RESULTS =====");
    println!("Total predictions:   {}", report.stats.total());
    println!("Correct predictions: {}", report.stats.hits());
    println!("Overall accuracy:    {}", fmt_accuracy(&report.stats));
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
