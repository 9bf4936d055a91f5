//! Command-line interface definition for phonelist-kit
//!
//! Provides argument parsing and validation. Each subcommand maps onto one
//! pipeline request.

use crate::output::DEFAULT_FLUSH_EVERY;
use crate::processor::{
    AreaSplitRequest, CompareRequest, CountrySplitRequest, FilterRequest, InsertRequest,
    MergeRequest, NumberFilterRequest, Request, SplitRequest,
};
use crate::progress::DEFAULT_PROGRESS_INTERVAL;
use crate::stream::MIN_MAX_LINE;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bulk editing for large phone number lists
#[derive(Parser, Debug, Clone)]
#[command(
    name = "phonelist-kit",
    author = "m0h1nd4",
    version,
    about = "Bulk editing for large phone number lists",
    long_about = r#"
╔══════════════════════════════════════════════════════════════╗
║                    PHONELIST-KIT v1.0.0                      ║
║          Bulk editing for large phone number lists           ║
╚══════════════════════════════════════════════════════════════╝

Merge, split, filter and compare plain text files of phone numbers,
one number per line, and sort them into per-country or per-area files
by longest calling code / area code match.

EXAMPLES:
    # Merge two lists and drop duplicates
    phonelist-kit merge a.txt b.txt -o merged.txt --dedup

    # Split into 5 files next to the input
    phonelist-kit split numbers.txt -n 5

    # Keep numbers starting with 138 or 139
    phonelist-kit filter numbers.txt -o out.txt -p 138,139

    # Same / different lines of two lists
    phonelist-kit compare old.txt new.txt -o ./cmp

    # One file per country, or per area of one country
    phonelist-kit country-split numbers.txt -o ./by-country
    phonelist-kit area-split numbers.txt -c US -o ./by-area

    # Prepend "+" to every line
    phonelist-kit insert numbers.txt -o plus.txt -p 0 -t +
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Write buffer size per output file (e.g. "8MB")
    #[arg(long, global = true, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Flush outputs every N lines
    #[arg(long, global = true, value_name = "LINES", default_value_t = DEFAULT_FLUSH_EVERY)]
    pub flush_every: usize,

    /// Report progress every N lines
    #[arg(long, global = true, value_name = "LINES", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Longest accepted input line (at least 2MB)
    #[arg(long, global = true, value_name = "SIZE", default_value = "8MB")]
    pub max_line_length: String,

    /// Check that every input looks like a phone number list before starting
    #[arg(long, global = true, default_value_t = false)]
    pub validate: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge files (or directories of .txt files) into one
    Merge {
        /// Input files or directories, in merge order
        #[arg(required = true, value_name = "PATH")]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Keep only the first occurrence of each line
        #[arg(long, default_value_t = false)]
        dedup: bool,

        /// Descend into subdirectories of directory inputs
        #[arg(short, long, default_value_t = false)]
        recursive: bool,
    },

    /// Split a file into N parts named {name}_partK.txt
    Split {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of parts
        #[arg(short = 'n', long, value_name = "N")]
        parts: usize,

        /// Drop duplicate lines before splitting
        #[arg(long, default_value_t = false)]
        dedup: bool,

        /// Output directory (default: the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Two passes over the file instead of holding it in memory
        #[arg(long, default_value_t = false)]
        streaming: bool,
    },

    /// Keep lines starting with any of up to 4 prefixes
    Filter {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Prefixes, comma separated or repeated
        #[arg(short, long = "prefix", value_name = "PREFIX", value_delimiter = ',', required = true)]
        prefixes: Vec<String>,
    },

    /// Keep lines whose integer value is one of the given numbers
    FilterNumbers {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Numbers to keep, comma separated or repeated
        #[arg(
            short,
            long = "number",
            value_name = "N",
            value_delimiter = ',',
            required = true,
            allow_hyphen_values = true
        )]
        numbers: Vec<i64>,
    },

    /// Write lines common to both files and lines unique to either
    Compare {
        #[arg(value_name = "FIRST")]
        first: PathBuf,

        #[arg(value_name = "SECOND")]
        second: PathBuf,

        /// Output directory (default: the first file's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// One output file per country
    CountrySplit {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (default: the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// One output file per area of a single country
    AreaSplit {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Country name or ISO code (see `countries`)
        #[arg(short, long, value_name = "COUNTRY")]
        country: String,

        /// Output directory (default: the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Insert text at a fixed character position of every line
    Insert {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Zero-based character position (past the end appends)
        #[arg(short, long, value_name = "POS", default_value_t = 0)]
        position: usize,

        /// Text to insert (empty: a random digit per line)
        #[arg(short, long, value_name = "TEXT", default_value = "", allow_hyphen_values = true)]
        text: String,

        /// Drop blank lines instead of copying them through
        #[arg(long, default_value_t = false)]
        drop_empty: bool,

        /// Seed for random digits
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },

    /// Check that files look like phone number lists
    Validate {
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<PathBuf>,
    },

    /// List the built-in countries and their prefixes
    Countries {
        /// Only report prefixes claimed by more than one area
        #[arg(long, default_value_t = false)]
        ambiguous: bool,
    },
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            anyhow::bail!("Buffer size must be greater than zero");
        }
        Ok(size)
    }

    /// Parse the line length cap, rejecting values under 2MB
    pub fn parse_max_line_length(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.max_line_length)?;
        if size < MIN_MAX_LINE {
            anyhow::bail!(
                "--max-line-length must be at least 2MB, got '{}'",
                self.max_line_length
            );
        }
        Ok(size)
    }

    /// The pipeline request for this invocation, if the subcommand runs one
    pub fn request(&self) -> Option<Request> {
        let request = match &self.command {
            Command::Merge {
                inputs,
                output,
                dedup,
                recursive,
            } => Request::Merge(MergeRequest {
                inputs: inputs.clone(),
                output: output.clone(),
                dedup: *dedup,
                recursive: *recursive,
            }),
            Command::Split {
                input,
                parts,
                dedup,
                output_dir,
                streaming,
            } => Request::Split(SplitRequest {
                input: input.clone(),
                parts: *parts,
                dedup: *dedup,
                output_dir: output_dir.clone(),
                streaming: *streaming,
            }),
            Command::Filter {
                input,
                output,
                prefixes,
            } => Request::Filter(FilterRequest {
                input: input.clone(),
                output: output.clone(),
                prefixes: prefixes.clone(),
            }),
            Command::FilterNumbers {
                input,
                output,
                numbers,
            } => Request::FilterNumbers(NumberFilterRequest {
                input: input.clone(),
                output: output.clone(),
                numbers: numbers.clone(),
            }),
            Command::Compare {
                first,
                second,
                output_dir,
            } => Request::Compare(CompareRequest {
                first: first.clone(),
                second: second.clone(),
                output_dir: output_dir.clone(),
            }),
            Command::CountrySplit { input, output_dir } => {
                Request::CountrySplit(CountrySplitRequest {
                    input: input.clone(),
                    output_dir: output_dir.clone(),
                })
            }
            Command::AreaSplit {
                input,
                country,
                output_dir,
            } => Request::AreaSplit(AreaSplitRequest {
                input: input.clone(),
                country: country.clone(),
                output_dir: output_dir.clone(),
            }),
            Command::Insert {
                input,
                output,
                position,
                text,
                drop_empty,
                seed,
            } => Request::Insert(InsertRequest {
                input: input.clone(),
                output: output.clone(),
                offset: *position,
                text: text.clone(),
                drop_empty: *drop_empty,
                seed: *seed,
            }),
            Command::Validate { .. } | Command::Countries { .. } => return None,
        };
        Some(request)
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if size_str.ends_with("GB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024 * 1024)
    } else if size_str.ends_with("MB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024)
    } else if size_str.ends_with("KB") {
        (&size_str[..size_str.len() - 2], 1024)
    } else if size_str.ends_with('B') {
        (&size_str[..size_str.len() - 1], 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Size too large: '{}'", size_str))
}
