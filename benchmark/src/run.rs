use crate::analyze;
use crate::config::BenchConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::hint::black_box;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use strsearch::{Algorithm, Corpus, Pattern};

/// Elapsed time for one algorithm on one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub algorithm: Algorithm,
    pub seconds: f64,
    pub position: Option<usize>,
}

/// All timings for one text, in `Algorithm::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct TextResult {
    pub name: String,
    pub chars: usize,
    pub timings: Vec<Timing>,
}

impl TextResult {
    pub fn agree(&self) -> bool {
        self.timings
            .windows(2)
            .all(|w| w[0].position == w[1].position)
    }

    /// Fastest algorithm. Ties go to the one listed first.
    pub fn winner(&self) -> Option<Algorithm> {
        self.timings
            .iter()
            .fold(None::<&Timing>, |best, t| match best {
                Some(b) if b.seconds <= t.seconds => Some(b),
                _ => Some(t),
            })
            .map(|t| t.algorithm)
    }
}

/// One line of the JSONL results file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub text: String,
    pub chars: usize,
    pub pattern: String,
    pub algorithm: Algorithm,
    pub seconds: f64,
    /// -1 when not found.
    pub index: i64,
    pub reps: u32,
}

/// Wall-clock seconds for a single call.
pub fn time_once<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let start = Instant::now();
    let result = black_box(f());
    (result, start.elapsed().as_secs_f64())
}

/// Time every algorithm on `corpus`. With `reps > 1` the fastest sample is kept.
pub fn bench_text(name: &str, corpus: &Corpus, pattern: &Pattern<'_, char>, reps: u32) -> TextResult {
    let timings = Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let mut best = f64::INFINITY;
            let mut position = None;
            for _ in 0..reps.max(1) {
                let (found, seconds) =
                    time_once(|| algorithm.find(black_box(&corpus.chars), pattern));
                best = best.min(seconds);
                position = found;
            }
            Timing {
                algorithm,
                seconds: best,
                position,
            }
        })
        .collect();

    TextResult {
        name: name.to_string(),
        chars: corpus.char_count(),
        timings,
    }
}

fn records(result: &TextResult, pattern: &str, reps: u32) -> Vec<Record> {
    result
        .timings
        .iter()
        .map(|t| Record {
            text: result.name.clone(),
            chars: result.chars,
            pattern: pattern.to_string(),
            algorithm: t.algorithm,
            seconds: t.seconds,
            index: strsearch::types::sentinel(t.position),
            reps,
        })
        .collect()
}

/// Load every configured text and time all three algorithms on each.
pub fn collect(config: &BenchConfig, parallel: bool, verbose: bool) -> Result<Vec<TextResult>, String> {
    let corpora = config
        .texts
        .iter()
        .map(|t| {
            if verbose {
                eprintln!("  Loading {} ({:?})", t.path.display(), t.decoding);
            }
            Corpus::load(&t.path, t.decoding)
                .map(|c| (t.name.as_str(), c))
                .map_err(|e| e.to_string())
        })
        .collect::<Result<Vec<_>, String>>()?;

    let needle: Vec<char> = config.pattern.chars().collect();
    let pattern = Pattern::new(&needle).map_err(|e| e.to_string())?;

    let bench = |(name, corpus): &(&str, Corpus)| {
        let result = bench_text(name, corpus, &pattern, config.reps);
        if verbose {
            for t in &result.timings {
                eprintln!(
                    "  {name}: {} {:.6}s index {}",
                    t.algorithm,
                    t.seconds,
                    strsearch::types::sentinel(t.position)
                );
            }
        }
        result
    };

    // parallelism is across texts only; algorithms on one text stay sequential
    Ok(if parallel {
        corpora.par_iter().map(bench).collect()
    } else {
        corpora.iter().map(bench).collect()
    })
}

fn write_records(path: &Path, results: &[TextResult], pattern: &str, reps: u32) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for result in results {
        for record in records(result, pattern, reps) {
            let line = serde_json::to_string(&record).map_err(|e| e.to_string())?;
            writeln!(writer, "{line}").map_err(|e| e.to_string())?;
        }
    }
    writer.flush().map_err(|e| e.to_string())
}

/// Main benchmark runner.
pub fn run(config: &BenchConfig, parallel: bool, verbose: bool) -> Result<(), String> {
    let results_dir = &config.results_dir;
    fs::create_dir_all(results_dir)
        .map_err(|e| format!("Failed to create results directory: {e}"))?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let results_file = results_dir.join(format!("search_{timestamp}.jsonl"));

    println!("{}", "=".repeat(70));
    println!("Substring Search Benchmark");
    println!("{}", "=".repeat(70));
    println!("Pattern:     {}", config.pattern);
    let names: Vec<&str> = config.texts.iter().map(|t| t.name.as_str()).collect();
    println!("Texts:       {}", names.join(", "));
    println!("Repetitions: {}", config.reps);
    println!("Parallel:    {parallel}");
    println!("Report:      {}", config.output.display());
    println!("{}", "=".repeat(70));
    println!();

    let results = collect(config, parallel, verbose)?;

    for result in &results {
        println!("[{}] {} chars", result.name, result.chars);
        for t in &result.timings {
            println!("  {:<20} {:.6}s", t.algorithm.name(), t.seconds);
        }
        if !result.agree() {
            println!("  \u{2717} algorithms disagree on the match position");
        }
    }

    write_records(&results_file, &results, &config.pattern, config.reps)?;

    let report = analyze::generate_report(&config.pattern, &results);
    if let Some(parent) = config.output.parent() {
        fs::create_dir_all(parent).ok();
    }
    fs::write(&config.output, &report)
        .map_err(|e| format!("Failed to write {}: {e}", config.output.display()))?;

    println!();
    println!("{}", "=".repeat(70));
    println!("Benchmark complete!");
    println!("Results saved to: {}", results_file.display());
    println!("Report written to: {}", config.output.display());
    println!("{}", "=".repeat(70));

    if results.iter().all(TextResult::agree) {
        Ok(())
    } else {
        Err("algorithms disagree on at least one text".into())
    }
}
