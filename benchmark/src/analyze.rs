use crate::run::{Record, TextResult, Timing};
use std::fs;
use std::path::Path;

pub fn load_results(path: &Path) -> Result<Vec<Record>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    Ok(content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect())
}

/// Group records by text, keeping the order texts first appear in.
pub fn group_by_text(records: &[Record]) -> Vec<TextResult> {
    let mut results: Vec<TextResult> = Vec::new();
    for r in records {
        let timing = Timing {
            algorithm: r.algorithm,
            seconds: r.seconds,
            position: usize::try_from(r.index).ok(),
        };
        match results.iter_mut().find(|t| t.name == r.text) {
            Some(existing) => existing.timings.push(timing),
            None => results.push(TextResult {
                name: r.text.clone(),
                chars: r.chars,
                timings: vec![timing],
            }),
        }
    }
    for result in &mut results {
        result.timings.sort_by_key(|t| t.algorithm);
    }
    results
}

fn format_index(position: Option<usize>) -> String {
    position.map_or_else(|| "-1".into(), |i| i.to_string())
}

pub fn generate_report(pattern: &str, results: &[TextResult]) -> String {
    if results.is_empty() {
        return "# Error\n\nNo valid results found.\n".into();
    }

    let mut lines = Vec::new();

    lines.push("# Substring Search Benchmark Results".into());
    lines.push(String::new());
    lines.push(format!(
        "**Generated:** {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(String::new());
    lines.push(format!("**Pattern:** `{pattern}`"));
    lines.push(String::new());

    for result in results {
        lines.push(format!("## {}", result.name));
        lines.push(String::new());
        lines.push(format!("*{} chars*", result.chars));
        lines.push(String::new());
        lines.push("| Algorithm          | Time (s) | Index |".into());
        lines.push("|--------------------|----------|-------|".into());
        for t in &result.timings {
            lines.push(format!(
                "| {:<18} | {:.6} | {} |",
                t.algorithm.name(),
                t.seconds,
                format_index(t.position)
            ));
        }
        if !result.agree() {
            lines.push(String::new());
            lines.push("**Warning:** algorithms disagree on the match position.".into());
        }
        lines.push(String::new());
    }

    lines.push("## Conclusions".into());
    lines.push(String::new());
    for result in results {
        if let Some(winner) = result.winner() {
            lines.push(format!(
                "For {} the fastest algorithm is {winner}.",
                result.name
            ));
        }
    }
    lines.push(String::new());

    lines.join("\n")
}

pub fn analyze(results_path: &Path, output_path: Option<&Path>) -> Result<(), String> {
    if !results_path.exists() {
        return Err(format!("File not found: {}", results_path.display()));
    }

    let records = load_results(results_path)?;
    let pattern = records.first().map_or("", |r| r.pattern.as_str());
    let report = generate_report(pattern, &group_by_text(&records));

    if let Some(out) = output_path {
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(out, &report).map_err(|e| format!("Failed to write report: {e}"))?;
        println!("Report written to: {}", out.display());
    } else {
        println!("{report}");
    }
    Ok(())
}
