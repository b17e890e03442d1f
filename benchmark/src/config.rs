use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use strsearch::Decoding;

pub const DEFAULT_PATTERN: &str = "International Journal on Software Tools";
pub const DEFAULT_OUTPUT: &str = "results.md";
pub const DEFAULT_REPS: u32 = 1;
pub const CONFIG_FILE: &str = "bench.toml";
pub const RESULTS_DIR: &str = "results";

/// One corpus to benchmark against.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TextConfig {
    /// Heading used in the report, e.g. "Text 1".
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub decoding: Decoding,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_reps")]
    pub reps: u32,
    #[serde(default = "default_texts")]
    pub texts: Vec<TextConfig>,
    /// Where JSONL results go; always next to the config file.
    #[serde(skip, default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(RESULTS_DIR)
}

fn default_reps() -> u32 {
    DEFAULT_REPS
}

/// The classroom setup: article 1 decoded permissively, article 2 strictly.
fn default_texts() -> Vec<TextConfig> {
    vec![
        TextConfig {
            name: "Text 1".into(),
            path: PathBuf::from("text/article_1.txt"),
            decoding: Decoding::Lossy,
        },
        TextConfig {
            name: "Text 2".into(),
            path: PathBuf::from("text/article_2.txt"),
            decoding: Decoding::Strict,
        },
    ]
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            output: default_output(),
            reps: default_reps(),
            texts: default_texts(),
            results_dir: default_results_dir(),
        }
    }
}

impl BenchConfig {
    /// Parse TOML and resolve relative paths against `base_dir`.
    pub fn parse(contents: &str, base_dir: &Path) -> Result<Self, String> {
        let mut config: Self =
            toml::from_str(contents).map_err(|e| format!("Invalid config: {e}"))?;
        config.resolve(base_dir);
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or `bench.toml` in the benchmark dir when `path` is None.
    /// Without either, the built-in defaults apply relative to the benchmark dir.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let (file, base_dir) = match path {
            Some(p) => (
                p.to_path_buf(),
                p.parent().map(Path::to_path_buf).unwrap_or_default(),
            ),
            None => {
                let dir = benchmark_dir();
                (dir.join(CONFIG_FILE), dir)
            }
        };

        if !file.exists() {
            if path.is_some() {
                return Err(format!("Config not found: {}", file.display()));
            }
            let mut config = Self::default();
            config.resolve(&base_dir);
            return Ok(config);
        }

        let contents = fs::read_to_string(&file)
            .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
        Self::parse(&contents, &base_dir)
    }

    fn resolve(&mut self, base_dir: &Path) {
        for text in &mut self.texts {
            if text.path.is_relative() {
                text.path = base_dir.join(&text.path);
            }
        }
        if self.output.is_relative() {
            self.output = base_dir.join(&self.output);
        }
        self.results_dir = base_dir.join(RESULTS_DIR);
    }

    fn validate(&self) -> Result<(), String> {
        if self.pattern.is_empty() {
            return Err("Invalid config: pattern must not be empty".into());
        }
        if self.reps == 0 {
            return Err("Invalid config: reps must be at least 1".into());
        }
        if self.texts.is_empty() {
            return Err("Invalid config: at least one [[texts]] entry is required".into());
        }
        Ok(())
    }
}

/// Resolve benchmark directory from the current dir.
pub fn benchmark_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_default();
    if cwd.join(CONFIG_FILE).exists() {
        return cwd;
    }
    if cwd.join("benchmark").join(CONFIG_FILE).exists() {
        return cwd.join("benchmark");
    }
    cwd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classroom_setup() {
        let config = BenchConfig::default();
        assert_eq!(config.pattern, DEFAULT_PATTERN);
        assert_eq!(config.reps, 1);
        assert_eq!(config.texts.len(), 2);
        assert_eq!(config.texts[0].decoding, Decoding::Lossy);
        assert_eq!(config.texts[1].decoding, Decoding::Strict);
    }

    #[test]
    fn parse_resolves_relative_paths() {
        let toml = r#"
            pattern = "needle"
            [[texts]]
            name = "A"
            path = "a.txt"
            decoding = "lossy"
        "#;
        let config = BenchConfig::parse(toml, Path::new("/data")).unwrap();
        assert_eq!(config.pattern, "needle");
        assert_eq!(config.texts[0].path, PathBuf::from("/data/a.txt"));
        assert_eq!(config.output, PathBuf::from("/data/results.md"));
        assert_eq!(config.results_dir, PathBuf::from("/data/results"));
    }

    #[test]
    fn decoding_defaults_to_strict() {
        let toml = r#"
            [[texts]]
            name = "A"
            path = "/abs/a.txt"
        "#;
        let config = BenchConfig::parse(toml, Path::new("/data")).unwrap();
        assert_eq!(config.texts[0].decoding, Decoding::Strict);
        assert_eq!(config.texts[0].path, PathBuf::from("/abs/a.txt"));
    }

    #[test]
    fn rejects_empty_pattern_and_zero_reps() {
        assert!(BenchConfig::parse("pattern = \"\"", Path::new(".")).is_err());
        assert!(BenchConfig::parse("reps = 0", Path::new(".")).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = BenchConfig::parse("modulus = 7", Path::new(".")).unwrap_err();
        assert!(err.contains("Invalid config"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = BenchConfig::load(Some(Path::new("/nonexistent/bench.toml"))).unwrap_err();
        assert!(err.contains("Config not found"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "pattern = \"Tools\"\nreps = 3\n").unwrap();
        let config = BenchConfig::load(Some(&path)).unwrap();
        assert_eq!(config.reps, 3);
        assert_eq!(config.texts[0].path, dir.path().join("text/article_1.txt"));
        assert_eq!(config.results_dir, dir.path().join("results"));
    }

    #[test]
    fn results_dir_ignores_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("elsewhere");
        fs::create_dir_all(&nested).unwrap();
        let path = nested.join("bench.toml");
        fs::write(&path, "output = \"report.md\"\n").unwrap();
        let config = BenchConfig::load(Some(&path)).unwrap();
        assert_eq!(config.results_dir, nested.join("results"));
        assert_eq!(config.output.parent(), config.results_dir.parent());
    }
}
