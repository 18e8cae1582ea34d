use crate::constants::ORIGIN_WILDCARD;
use crate::logger::CorsLogger;
use crate::util::normalize_lower;
use regex_automata::meta::{BuildError, Regex};
use std::time::{Duration, Instant};
use thiserror::Error;

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;

/// Reasons a wildcard origin could not be turned into a matcher.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern '{pattern}'")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("compiling origin pattern took {elapsed:?}, exceeding the {budget:?} budget")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
    #[error("invalid nested repetition operator in origin pattern '{pattern}'")]
    NestedRepetition { pattern: String },
}

/// Translates a wildcard origin into an anchored pattern: literal dots are
/// escaped and the first wildcard becomes `.*`.
pub fn wildcard_pattern(origin: &str) -> String {
    let escaped = origin.replace('.', "\\.");
    let expanded = escaped.replacen(ORIGIN_WILDCARD, ".*", 1);
    format!("^{expanded}$")
}

/// Compiles a wildcard origin entry such as `https://*.example.com`.
pub fn compile_wildcard(origin: &str) -> Result<Regex, PatternError> {
    compile_pattern(&wildcard_pattern(origin), PATTERN_COMPILE_BUDGET)
}

fn compile_pattern(pattern: &str, budget: Duration) -> Result<Regex, PatternError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(PatternError::TooLong {
            length: pattern.len(),
            max: MAX_PATTERN_LENGTH,
        });
    }

    if has_nested_repetition(pattern) {
        return Err(PatternError::NestedRepetition {
            pattern: pattern.to_owned(),
        });
    }

    let started = Instant::now();
    let regex = Regex::new(pattern).map_err(|err| PatternError::Build {
        pattern: pattern.to_owned(),
        source: Box::new(err),
    })?;
    let elapsed = started.elapsed();
    if elapsed > budget {
        return Err(PatternError::Timeout { elapsed, budget });
    }

    Ok(regex)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Repetition {
    None,
    Counted,
    Quantified,
    Lazy,
}

/// A quantifier applied to another quantifier (`**`, `*+`, `{2}*`, `*??`).
/// Such patterns are rejected rather than left to collapse into match-all.
fn has_nested_repetition(pattern: &str) -> bool {
    let mut state = Repetition::None;
    let mut escaped = false;
    let mut in_class = false;

    for ch in pattern.chars() {
        if escaped {
            escaped = false;
            state = Repetition::None;
            continue;
        }
        if in_class {
            if ch == ']' {
                in_class = false;
            }
            state = Repetition::None;
            continue;
        }

        state = match (ch, state) {
            ('*' | '+' | '{', Repetition::Quantified | Repetition::Lazy) => return true,
            ('?', Repetition::Lazy) => return true,
            ('?', Repetition::Quantified) => Repetition::Lazy,
            ('*' | '+' | '?', _) => Repetition::Quantified,
            ('{', _) => Repetition::Counted,
            ('}', Repetition::Counted) => Repetition::Quantified,
            (_, Repetition::Counted) => Repetition::Counted,
            ('\\', _) => {
                escaped = true;
                Repetition::None
            }
            ('[', _) => {
                in_class = true;
                Repetition::None
            }
            _ => Repetition::None,
        };
    }

    false
}

/// Allowed origins split into literal entries and compiled wildcard patterns.
#[derive(Clone, Debug, Default)]
pub struct OriginMatcher {
    literals: Vec<String>,
    patterns: Vec<Regex>,
}

impl OriginMatcher {
    /// Builds the matcher once; wildcard entries that fail to compile are
    /// logged and left out.
    pub fn compile<I, S>(origins: I, logger: &dyn CorsLogger) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::default();
        for origin in origins {
            let origin = origin.as_ref();
            if !origin.contains(ORIGIN_WILDCARD) {
                matcher.literals.push(origin.to_owned());
                continue;
            }

            match compile_wildcard(origin) {
                Ok(regex) => matcher.patterns.push(regex),
                Err(err) => logger.error(format_args!(
                    "Invalid origin pattern for '{origin}', entry ignored. {}",
                    error_chain(&err)
                )),
            }
        }
        matcher
    }

    #[cfg(test)]
    pub(crate) fn compile_with_budget(origin: &str, budget: Duration) -> Result<Regex, PatternError> {
        compile_pattern(&wildcard_pattern(origin), budget)
    }

    /// Lower-cases the incoming origin, then checks literals as configured and
    /// every compiled pattern.
    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = normalize_lower(origin);
        let origin = origin.as_ref();

        self.literals.iter().any(|literal| literal == origin)
            || self.patterns.iter().any(|regex| regex.is_match(origin))
    }

    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
