//! Line filters and the character inserter
//!
//! Filters decide per trimmed line whether it is kept. They never touch the
//! line content; [`CharInserter`] is the only line rewriter.

use crate::error::{PipelineError, Result};

use ahash::RandomState;
use hashbrown::HashSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Most prefixes a [`PrefixFilter`] accepts
pub const MAX_PREFIXES: usize = 4;

/// Keeps lines starting with any of up to four prefixes
#[derive(Debug, Clone)]
pub struct PrefixFilter {
    prefixes: Vec<String>,
}

impl PrefixFilter {
    /// Build from user input. Blank prefixes are dropped before counting.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self> {
        let prefixes: Vec<String> = prefixes
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        if prefixes.is_empty() {
            return Err(PipelineError::invalid("no filter prefixes supplied"));
        }
        if prefixes.len() > MAX_PREFIXES {
            return Err(PipelineError::invalid(format!(
                "at most {} prefixes are supported, got {}",
                MAX_PREFIXES,
                prefixes.len()
            )));
        }

        Ok(Self { prefixes })
    }

    #[inline]
    pub fn matches(&self, line: &str) -> bool {
        !line.is_empty() && self.prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// Outcome of [`NumberFilter::check`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberMatch {
    Keep,
    Drop,
    NotNumeric,
}

/// Keeps lines whose integer value is in a fixed set
#[derive(Debug, Clone)]
pub struct NumberFilter {
    numbers: HashSet<i64, RandomState>,
}

impl NumberFilter {
    pub fn new<I: IntoIterator<Item = i64>>(numbers: I) -> Result<Self> {
        let numbers: HashSet<i64, RandomState> = numbers.into_iter().collect();
        if numbers.is_empty() {
            return Err(PipelineError::invalid("no filter numbers supplied"));
        }
        Ok(Self { numbers })
    }

    pub fn check(&self, line: &str) -> NumberMatch {
        match line.parse::<i64>() {
            Ok(n) if self.numbers.contains(&n) => NumberMatch::Keep,
            Ok(_) => NumberMatch::Drop,
            Err(_) => NumberMatch::NotNumeric,
        }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Logs the first few skipped lines individually, then only a total.
#[derive(Debug)]
pub struct SkipWarnings {
    what: &'static str,
    limit: u64,
    count: u64,
}

impl SkipWarnings {
    pub fn new(what: &'static str, limit: u64) -> Self {
        Self { what, limit, count: 0 }
    }

    pub fn record(&mut self, line_no: u64, line: &str) {
        self.count += 1;
        if self.count <= self.limit {
            log::warn!("Skipping {} on line {}: '{}'", self.what, line_no, preview(line));
        } else if self.count == self.limit + 1 {
            log::warn!("Further {} warnings suppressed", self.what);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Log the total if anything was suppressed
    pub fn finish(&self) {
        if self.count > self.limit {
            log::warn!("Skipped {} lines in total ({})", self.count, self.what);
        }
    }
}

fn preview(line: &str) -> String {
    const MAX: usize = 40;
    if line.chars().count() <= MAX {
        line.to_string()
    } else {
        let head: String = line.chars().take(MAX).collect();
        format!("{}...", head)
    }
}

/// Insert `text` before the character at `offset`.
///
/// Offset 0 prepends; an offset at or past the end appends. Offsets count
/// characters, never bytes.
pub fn insert_at(line: &str, offset: usize, text: &str) -> String {
    let at = line
        .char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());

    let mut out = String::with_capacity(line.len() + text.len());
    out.push_str(&line[..at]);
    out.push_str(text);
    out.push_str(&line[at..]);
    out
}

/// Per-line insertion of fixed text, or of a random digit when no text is set.
pub struct CharInserter {
    offset: usize,
    text: Option<String>,
    rng: SmallRng,
}

impl CharInserter {
    /// `seed` makes the random digits reproducible.
    pub fn new(offset: usize, text: &str, seed: Option<u64>) -> Result<Self> {
        if text.contains(['\n', '\r']) {
            return Err(PipelineError::invalid("insert text must not contain line breaks"));
        }

        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Ok(Self {
            offset,
            text: (!text.is_empty()).then(|| text.to_string()),
            rng,
        })
    }

    pub fn is_random(&self) -> bool {
        self.text.is_none()
    }

    pub fn apply(&mut self, line: &str) -> String {
        match &self.text {
            Some(text) => insert_at(line, self.offset, text),
            None => {
                let digit = char::from(b'0' + self.rng.gen_range(0..10u8));
                let mut buf = [0u8; 4];
                insert_at(line, self.offset, digit.encode_utf8(&mut buf))
            }
        }
    }
}
