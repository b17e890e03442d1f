use std::fmt::{Display, Write};

use serde_json::{Value, json};

use crate::FindReport;
use crate::bisect::{Bisect, Hit};
use crate::types::sentinel;

/// Header line: `# Search: "pattern" in name (N chars, M lines)`
pub fn search_header(pattern: &str, corpus: &str, chars: usize, lines: usize) -> String {
    format!("# Search: \"{pattern}\" in {corpus} ({chars} chars, {lines} lines)")
}

/// One line per algorithm, index column right-aligned, -1 for not found.
pub fn find_report(report: &FindReport) -> String {
    let mut out = search_header(
        &report.pattern,
        &report.corpus,
        report.char_count,
        report.line_count,
    );
    out.push('\n');

    let width = report
        .comparison
        .outcomes
        .iter()
        .map(|o| o.algorithm.name().len())
        .max()
        .unwrap_or(0);

    for outcome in &report.comparison.outcomes {
        let _ = write!(
            out,
            "\n{:<width$}  {:>8}",
            outcome.algorithm.name(),
            sentinel(outcome.position)
        );
        if let (crate::Algorithm::RabinKarp, Some(scan)) = (outcome.algorithm, report.rabin_karp) {
            let _ = write!(
                out,
                "  (hash hits: {}, collisions: {})",
                scan.hash_hits, scan.spurious_hits
            );
        }
    }

    out.push_str("\n\n");
    if report.comparison.agree() {
        out.push_str("all algorithms agree");
    } else {
        out.push_str("MISMATCH: algorithms disagree");
    }
    out
}

pub fn find_report_json(report: &FindReport) -> Value {
    let results: Vec<Value> = report
        .comparison
        .outcomes
        .iter()
        .map(|o| {
            json!({
                "algorithm": o.algorithm,
                "index": sentinel(o.position),
            })
        })
        .collect();

    let mut value = json!({
        "pattern": report.pattern,
        "corpus": report.corpus,
        "chars": report.char_count,
        "lines": report.line_count,
        "results": results,
        "agree": report.comparison.agree(),
    });
    if let Some(scan) = report.rabin_karp {
        value["rabin_karp"] = json!({
            "base": report.params.base(),
            "modulus": report.params.modulus(),
            "hash_hits": scan.hash_hits,
            "collisions": scan.spurious_hits,
        });
    }
    value
}

pub fn bisect<T: Display>(target: T, result: &Bisect<T>) -> String {
    let detail = match &result.hit {
        Hit::Found(i) => format!("found at index {i}"),
        Hit::UpperBound(Some(bound)) => format!("not found, upper bound {bound}"),
        Hit::UpperBound(None) => "not found, no upper bound".to_string(),
    };
    format!(
        "# Bisect: {target} — {detail} ({} iterations)",
        result.iterations
    )
}

pub fn bisect_json(target: f64, result: &Bisect<f64>) -> Value {
    match result.hit {
        Hit::Found(i) => json!({
            "target": target,
            "iterations": result.iterations,
            "index": i,
        }),
        Hit::UpperBound(bound) => json!({
            "target": target,
            "iterations": result.iterations,
            "index": crate::types::NOT_FOUND,
            "upper_bound": bound,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::rabin_karp::{HashParams, Scan};
    use crate::search::{Algorithm, Comparison, Outcome};

    fn sample_report(agree: bool) -> FindReport {
        let rk_position = if agree { Some(15) } else { None };
        FindReport {
            pattern: "abcdabcy".into(),
            corpus: "sample".into(),
            char_count: 23,
            line_count: 1,
            comparison: Comparison {
                outcomes: vec![
                    Outcome {
                        algorithm: Algorithm::BoyerMoore,
                        position: Some(15),
                    },
                    Outcome {
                        algorithm: Algorithm::RabinKarp,
                        position: rk_position,
                    },
                ],
            },
            params: HashParams::default(),
            rabin_karp: Some(Scan {
                position: rk_position,
                hash_hits: 2,
                spurious_hits: 1,
            }),
        }
    }

    #[test]
    fn find_report_text() {
        let out = find_report(&sample_report(true));
        assert!(out.starts_with("# Search: \"abcdabcy\" in sample (23 chars, 1 lines)"));
        assert!(out.contains("Boyer-Moore"));
        assert!(out.contains("collisions: 1"));
        assert!(out.ends_with("all algorithms agree"));
    }

    #[test]
    fn find_report_flags_mismatch() {
        let out = find_report(&sample_report(false));
        assert!(out.contains("-1"));
        assert!(out.contains("MISMATCH"));
    }

    #[test]
    fn find_report_json_shape() {
        let v = find_report_json(&sample_report(true));
        assert_eq!(v["results"][0]["algorithm"], "Boyer-Moore");
        assert_eq!(v["results"][1]["index"], 15);
        assert_eq!(v["agree"], true);
        assert_eq!(v["rabin_karp"]["collisions"], 1);
        assert_eq!(v["rabin_karp"]["base"], 256);
        assert_eq!(v["rabin_karp"]["modulus"], 101);
    }

    #[test]
    fn bisect_lines() {
        let found = Bisect {
            iterations: 2,
            hit: Hit::Found(4),
        };
        assert!(bisect(9.6, &found).contains("found at index 4 (2 iterations)"));

        let absent = Bisect {
            iterations: 3,
            hit: Hit::UpperBound(Some(6.3)),
        };
        assert!(bisect(5.0, &absent).contains("upper bound 6.3"));
        assert_eq!(bisect_json(5.0, &absent)["index"], -1);
    }
}
