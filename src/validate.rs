//! Pre-flight check that a file looks like a phone number list
//!
//! Only samples the head of the file. Pipelines never call this; it is a
//! gate run before one starts.

use crate::error::{PipelineError, Result};
use crate::stream::{LineStream, DEFAULT_MAX_LINE};

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Non-blank lines sampled from the head of the file
pub const SAMPLE_LINES: usize = 100;

/// Minimum share of phone-shaped lines
pub const MIN_PLAUSIBLE_RATIO: f64 = 0.5;

/// Outcome of a passing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validation {
    pub sampled: usize,
    pub plausible: usize,
}

impl Validation {
    pub fn ratio(&self) -> f64 {
        if self.sampled == 0 {
            0.0
        } else {
            self.plausible as f64 / self.sampled as f64
        }
    }
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"))
}

/// True for an optional '+' followed by 7 to 15 digits
#[inline]
pub fn is_phone_like(token: &str) -> bool {
    phone_pattern().is_match(token)
}

/// Sample `path` and fail unless at least half the sampled lines are
/// phone-shaped.
pub fn validate_file(path: &Path) -> Result<Validation> {
    let mut stream = LineStream::with_max_line(path, DEFAULT_MAX_LINE)?;
    let mut result = Validation {
        sampled: 0,
        plausible: 0,
    };

    while result.sampled < SAMPLE_LINES {
        let Some(line) = stream.next().transpose()? else {
            break;
        };
        result.sampled += 1;
        if is_phone_like(&line) {
            result.plausible += 1;
        }
    }

    if result.sampled == 0 {
        return Err(PipelineError::EmptyInput(path.to_path_buf()));
    }

    log::debug!(
        "{}: {}/{} sampled lines are phone-shaped",
        path.display(),
        result.plausible,
        result.sampled
    );

    if result.ratio() < MIN_PLAUSIBLE_RATIO {
        return Err(PipelineError::NotPhoneList {
            path: path.to_path_buf(),
            plausible: result.plausible,
            sampled: result.sampled,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_is_phone_like() {
        assert!(is_phone_like("13800000000"));
        assert!(is_phone_like("+447911123456"));
        assert!(is_phone_like("1234567"));
        assert!(!is_phone_like("123456"));
        assert!(!is_phone_like("1234567890123456"));
        assert!(!is_phone_like("++1234567"));
        assert!(!is_phone_like("138-0000-0000"));
    }

    #[test]
    fn test_phone_list_passes() {
        let file = file_with("13800000000\n\n+447911123456\nhello\n");
        let result = validate_file(file.path()).unwrap();
        assert_eq!(result.sampled, 3);
        assert_eq!(result.plausible, 2);
    }

    #[test]
    fn test_exactly_half_passes() {
        let file = file_with("13800000000\nhello\n");
        assert!(validate_file(file.path()).is_ok());
    }

    #[test]
    fn test_text_file_rejected() {
        let file = file_with("hello\nworld\n13800000000\n");
        match validate_file(file.path()).unwrap_err() {
            PipelineError::NotPhoneList { plausible, sampled, .. } => {
                assert_eq!(plausible, 1);
                assert_eq!(sampled, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_only_head_is_sampled() {
        let mut content = "13800000000\n".repeat(SAMPLE_LINES);
        content.push_str(&"not a number\n".repeat(500));
        let file = file_with(&content);

        let result = validate_file(file.path()).unwrap();
        assert_eq!(result.sampled, SAMPLE_LINES);
        assert_eq!(result.ratio(), 1.0);
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = file_with("\n  \n");
        assert!(matches!(
            validate_file(file.path()).unwrap_err(),
            PipelineError::EmptyInput(_)
        ));
    }
}
