//! # phonelist-kit
//!
//! Bulk editing for plain text phone number lists, one number per line.
//!
//! ## Features
//!
//! - **Merge**: Concatenate files or directories, optionally deduplicated
//! - **Split**: Even split into N part files, in memory or in two streaming passes
//! - **Filter**: Keep lines by prefix, or by integer value
//! - **Compare**: Lines common to two files and lines unique to either
//! - **Country / area split**: Longest-prefix classification over a built-in table
//! - **Insert**: Add text or a random digit at a fixed character position
//! - **Encoding detection**: Inputs are decoded to UTF-8 before processing
//!
//! ## Usage
//!
//! ```bash
//! # Merge and deduplicate
//! phonelist-kit merge a.txt b.txt -o merged.txt --dedup
//!
//! # One file per area of the United States
//! phonelist-kit area-split numbers.txt -c US -o ./by-area
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use phonelist_kit::processor::{CountrySplitRequest, Processor, ProcessorConfig, Request};
//! use std::path::PathBuf;
//!
//! let processor = Processor::new(ProcessorConfig::default());
//! let request = Request::CountrySplit(CountrySplitRequest {
//!     input: PathBuf::from("numbers.txt"),
//!     output_dir: Some(PathBuf::from("./by-country")),
//! });
//! // let summary = processor.run(&request).unwrap();
//! ```

pub mod classify;
pub mod cli;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod output;
mod prefix_data;
pub mod prefixes;
pub mod processor;
pub mod progress;
pub mod split;
pub mod stream;
pub mod validate;

pub use cli::Args;
pub use error::{PipelineError, Result};
pub use processor::{Processor, ProcessorConfig, Request, RunSummary};
