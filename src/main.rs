use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use strsearch::{Algorithm, Corpus, Decoding, FindReport, HashParams, SearchError};

/// strsearch: Boyer-Moore, Knuth-Morris-Pratt and Rabin-Karp, side by side.
#[derive(Parser)]
#[command(
    name = "strsearch",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STRSEARCH_BUILD_COMMIT"), ")"),
    about
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Find the first occurrence of PATTERN with every selected algorithm.
    Find {
        /// Text to search for. Must not be empty.
        pattern: String,

        /// File to search. Reads stdin when omitted.
        file: Option<PathBuf>,

        /// Algorithm to run.
        #[arg(long, short, value_enum, default_value_t = AlgorithmArg::All)]
        algorithm: AlgorithmArg,

        /// Drop invalid UTF-8 instead of failing.
        #[arg(long)]
        lossy: bool,

        /// Rabin-Karp hash base.
        #[arg(long, default_value_t = strsearch::search::rabin_karp::DEFAULT_BASE)]
        base: u64,

        /// Rabin-Karp hash modulus.
        #[arg(long, default_value_t = strsearch::search::rabin_karp::DEFAULT_MODULUS)]
        modulus: u64,

        /// Machine-readable JSON output.
        #[arg(long)]
        json: bool,
    },
    /// Binary search for TARGET in ascending VALUES, counting iterations.
    #[command(allow_negative_numbers = true)]
    Bisect {
        target: f64,

        #[arg(required = true)]
        values: Vec<f64>,

        /// Machine-readable JSON output.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Bm,
    Kmp,
    Rk,
    All,
}

impl AlgorithmArg {
    fn selected(self) -> Vec<Algorithm> {
        match self {
            Self::Bm => vec![Algorithm::BoyerMoore],
            Self::Kmp => vec![Algorithm::KnuthMorrisPratt],
            Self::Rk => vec![Algorithm::RabinKarp],
            Self::All => Algorithm::ALL.to_vec(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Shell completions
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "strsearch", &mut io::stdout());
        return;
    }

    let Some(command) = cli.command else {
        eprintln!("usage: strsearch find <pattern> [file] | strsearch bisect <target> <values>...");
        process::exit(3);
    };

    let result = match command {
        Command::Find {
            pattern,
            file,
            algorithm,
            lossy,
            base,
            modulus,
            json,
        } => {
            let decoding = if lossy { Decoding::Lossy } else { Decoding::Strict };
            find(&pattern, file.as_deref(), &algorithm.selected(), decoding, base, modulus)
                .map(|report| {
                    let agree = report.comparison.agree();
                    let output = if json {
                        serde_json::to_string_pretty(&report.to_json())
                            .expect("serde_json::Value is always serializable")
                    } else {
                        report.render()
                    };
                    (output, agree)
                })
        }
        Command::Bisect {
            target,
            values,
            json,
        } => strsearch::run_bisect(&values, target, json).map(|output| (output, true)),
    };

    match result {
        Ok((output, agree)) => {
            println!("{output}");
            if !agree {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
    }
}

fn find(
    pattern: &str,
    file: Option<&Path>,
    algorithms: &[Algorithm],
    decoding: Decoding,
    base: u64,
    modulus: u64,
) -> Result<FindReport, SearchError> {
    let params = HashParams::new(base, modulus)?;
    let corpus = match file {
        Some(path) => Corpus::load(path, decoding)?,
        None => {
            let stdin = Path::new("<stdin>");
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| SearchError::IoError {
                    path: stdin.to_path_buf(),
                    source: e,
                })?;
            Corpus::from_bytes("stdin", stdin, &bytes, decoding)?
        }
    };
    FindReport::build(&corpus, pattern, algorithms, params)
}
