//! Annotator configuration from environment variables and command-line arguments.
//!
//! Arguments win over the environment.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::AnnotatorError;

pub const DEFAULT_OPENINGS_PATH: &str = "data/openings.json";

pub const USAGE: &str = "usage: annotate [INPUT|-] [--openings PATH] [--output PATH] [--pretty]";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatorConfig {
    /// Positions JSON; `None` reads stdin
    pub input: Option<PathBuf>,

    /// Opening reference data (JSON, or bincode when it ends in `.bin`)
    pub openings_path: PathBuf,

    /// Report destination; `None` writes stdout
    pub output: Option<PathBuf>,

    /// Pretty-print the report
    pub pretty: bool,
}

impl AnnotatorConfig {
    /// Load configuration from the process environment and arguments.
    pub fn load() -> Result<Self, AnnotatorError> {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Build configuration from explicit arguments (program name excluded)
    /// and an environment lookup.
    pub fn from_sources<I, F>(args: I, lookup: F) -> Result<Self, AnnotatorError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            input: None,
            openings_path: lookup("ANNOTATOR_OPENINGS")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OPENINGS_PATH)),
            output: None,
            pretty: lookup("ANNOTATOR_PRETTY").is_some_and(|v| is_truthy(&v)),
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--openings" => config.openings_path = PathBuf::from(flag_value(&mut args, "--openings")?),
                "--output" => config.output = Some(PathBuf::from(flag_value(&mut args, "--output")?)),
                "--pretty" => config.pretty = true,
                "-" if config.input.is_none() => {}
                flag if flag.starts_with("--") => {
                    return Err(AnnotatorError::Config(format!("unknown flag {flag}\n{USAGE}")));
                }
                path => {
                    if config.input.is_some() {
                        return Err(AnnotatorError::Config(format!("unexpected argument {path}\n{USAGE}")));
                    }
                    config.input = Some(PathBuf::from(path));
                }
            }
        }

        debug!(?config, "Configuration loaded");
        Ok(config)
    }
}

fn flag_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, AnnotatorError> {
    args.next()
        .ok_or_else(|| AnnotatorError::Config(format!("{flag} needs a value\n{USAGE}")))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(args: &[&str], vars: &[(&str, &str)]) -> Result<AnnotatorConfig, AnnotatorError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AnnotatorConfig::from_sources(args.iter().map(|a| a.to_string()), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[], &[]).unwrap();
        assert_eq!(c.input, None);
        assert_eq!(c.output, None);
        assert_eq!(c.openings_path, PathBuf::from(DEFAULT_OPENINGS_PATH));
        assert!(!c.pretty);
    }

    #[test]
    fn test_env_values() {
        let c = config(&[], &[("ANNOTATOR_OPENINGS", "book.bin"), ("ANNOTATOR_PRETTY", "true")]).unwrap();
        assert_eq!(c.openings_path, PathBuf::from("book.bin"));
        assert!(c.pretty);

        let c = config(&[], &[("ANNOTATOR_PRETTY", "0")]).unwrap();
        assert!(!c.pretty);
    }

    #[test]
    fn test_args_override_env() {
        let c = config(
            &["game.json", "--openings", "other.json", "--output", "report.json", "--pretty"],
            &[("ANNOTATOR_OPENINGS", "book.bin")],
        )
        .unwrap();
        assert_eq!(c.input, Some(PathBuf::from("game.json")));
        assert_eq!(c.openings_path, PathBuf::from("other.json"));
        assert_eq!(c.output, Some(PathBuf::from("report.json")));
        assert!(c.pretty);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let c = config(&["-"], &[]).unwrap();
        assert_eq!(c.input, None);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(config(&["--openings"], &[]), Err(AnnotatorError::Config(_))));
        assert!(matches!(config(&["--verbose"], &[]), Err(AnnotatorError::Config(_))));
        assert!(matches!(config(&["a.json", "b.json"], &[]), Err(AnnotatorError::Config(_))));
    }
}
