mod analyze;
mod config;
mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bench", about = "strsearch benchmark suite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time every algorithm on every configured text and write the report
    Run {
        /// TOML config (default: bench.toml in the benchmark dir, else built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pattern to search for (overrides the config)
        #[arg(long)]
        pattern: Option<String>,
        /// Markdown report path (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Number of repetitions; the fastest is reported (overrides the config)
        #[arg(long)]
        reps: Option<u32>,
        /// Benchmark texts concurrently
        #[arg(long)]
        parallel: bool,
        /// Print detailed output for debugging
        #[arg(long)]
        verbose: bool,
    },
    /// Generate markdown report from JSONL results
    Analyze {
        /// Path to JSONL results file
        results_file: PathBuf,
        /// Output path for markdown report (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            config,
            pattern,
            output,
            reps,
            parallel,
            verbose,
        } => config::BenchConfig::load(config.as_deref()).and_then(|mut cfg| {
            if let Some(p) = pattern {
                if p.is_empty() {
                    return Err("pattern must not be empty".into());
                }
                cfg.pattern = p;
            }
            if let Some(o) = output {
                cfg.output = o;
            }
            if let Some(r) = reps {
                cfg.reps = r.max(1);
            }
            run::run(&cfg, parallel, verbose)
        }),
        Commands::Analyze {
            results_file,
            output,
        } => analyze::analyze(&results_file, output.as_deref()),
    };

    if let Err(e) = outcome {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
