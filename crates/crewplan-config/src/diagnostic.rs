// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment extraction errors are mapped onto [`ConfigError`] so the CLI can
//! render them with miette: the offending key is underlined in the JSON
//! source and close misspellings get a "did you mean" hint from strsim.

#![allow(unused_assignments)] // emitted by the miette Diagnostic derive

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a known name must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading or validating `crewplan.json`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(crewplan::config::unknown_key),
        help("{}", key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Comma-separated keys accepted at this level.
        valid_keys: String,
        #[label("not a key of this section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A tier or strategy name outside its closed set.
    #[error("unknown value `{value}` for key `{key}`")]
    #[diagnostic(
        code(crewplan::config::unknown_value),
        help("{}", value_help(suggestion.as_deref(), valid_values))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        valid_values: String,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(crewplan::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path, e.g. `budget_constraints.cost_limits.low`.
        key: String,
        detail: String,
        expected: String,
        #[label("this value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(crewplan::config::missing_key),
        help("add `\"{key}\": <value>` to crewplan.json")
    )]
    MissingKey { key: String },

    /// A cross-reference or range check failed after deserialization.
    #[error("validation error: {message}")]
    #[diagnostic(code(crewplan::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(crewplan::config::other))]
    Other(String),
}

fn key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let hint = suggestion.map(|s| format!("did you mean `{s}`? ")).unwrap_or_default();
    format!("{hint}keys allowed here: {valid_keys}")
}

fn value_help(suggestion: Option<&str>, valid_values: &str) -> String {
    let hint = suggestion.map(|s| format!("did you mean `{s}`? ")).unwrap_or_default();
    format!("{hint}expected one of: {valid_values}")
}

/// Splits a `figment::Error` into one [`ConfigError`] per underlying error.
///
/// `sources` pairs a display path with file content; when the error can be
/// traced to one of them the diagnostic gets a span into that content.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, field, sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::UnknownVariant(value, expected) => ConfigError::UnknownValue {
                key: error.path.join("."),
                value: value.clone(),
                suggestion: suggest_key(value, expected),
                valid_values: expected.join(", "),
            },
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
                span: None,
                src: None,
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Span of `field` within whichever source produced `error`.
fn locate(
    error: &figment::error::Error,
    field: &str,
    sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline JSON has no file metadata. With one source there is no doubt.
    let found = match (file, sources) {
        (Some(file), _) => sources.iter().find(|(p, _)| *p == file),
        (None, [only]) => Some(only),
        (None, _) => None,
    };
    let Some((path, content)) = found else {
        return (None, None);
    };

    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Find the byte offset of a key in JSON content, relative to a section path.
///
/// For `path = ["fallback_settings"]` and `field = "fallback_modle"`, finds the
/// `"fallback_settings"` key then the first `"fallback_modle":` after it. The
/// offset points at the key name, past its opening quote.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let mut search_start = 0;
    for section in path {
        let quoted = format!("\"{section}\"");
        search_start += content[search_start..].find(&quoted)? + quoted.len();
    }

    let quoted = format!("\"{field}\"");
    let mut from = search_start;
    while let Some(pos) = content[from..].find(&quoted) {
        let key_start = from + pos;
        let after = &content[key_start + quoted.len()..];
        if after.trim_start().starts_with(':') {
            return Some(key_start + 1);
        }
        from = key_start + quoted.len();
    }

    None
}

/// Closest entry of `candidates` to `unknown` by Jaro-Winkler similarity,
/// if any scores above [`SUGGESTION_THRESHOLD`]. Ties keep the earlier entry.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|&c| (strsim::jaro_winkler(unknown, c), c))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .fold(None, |best: Option<(f64, &str)>, (score, c)| match best {
            Some((b, _)) if b >= score => best,
            _ => Some((score, c)),
        })
        .map(|(_, c)| c.to_string())
}

/// Prints each error to stderr as a miette report, falling back to the
/// plain message if the report cannot be drawn.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
