//! Core processing engine
//!
//! One method per operation. Each run takes a request struct, streams its
//! input(s) through the matching filter, set operation, partitioner or
//! classifier, and writes the results. Runs are single-threaded and own all
//! of their state; progress goes out through an optional channel.

use crate::classify::Classifier;
use crate::cli::Args;
use crate::dedup::{create_deduplicator, dedupe, diff_and_intersect, Deduplicator, MemoryDeduplicator};
use crate::error::{io_at, PipelineError, Result};
use crate::filter::{CharInserter, NumberFilter, NumberMatch, PrefixFilter, SkipWarnings};
use crate::output::{
    ensure_output_dir, input_stem, is_same_file, parent_dir, part_paths, BucketWriter, OutputFile, OutputWriter,
    PartWriters, DEFAULT_BUFFER_SIZE, DEFAULT_FLUSH_EVERY,
};
use crate::prefixes::PrefixTable;
use crate::progress::{ProgressEvent, ProgressReporter, RunStats, DEFAULT_PROGRESS_INTERVAL};
use crate::split::{plan_parts, StreamingPartitioner};
use crate::stream::{count_lines, read_all_lines, LineStream, DEFAULT_MAX_LINE};

use crossbeam_channel::Sender;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Non-numeric lines logged individually before switching to a summary
const NUMBER_WARNING_LIMIT: u64 = 10;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub buffer_size: usize,
    pub flush_every: usize,
    pub progress_interval: u64,
    pub max_line_len: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_every: DEFAULT_FLUSH_EVERY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_line_len: DEFAULT_MAX_LINE,
        }
    }
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            buffer_size: args.parse_buffer_size()?,
            flush_every: args.flush_every,
            progress_interval: args.progress_interval,
            max_line_len: args.parse_max_line_length()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Files or directories, merged in this order
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub dedup: bool,
    /// Expand directory inputs recursively
    pub recursive: bool,
}

#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub input: PathBuf,
    pub parts: usize,
    pub dedup: bool,
    /// Defaults to the input's directory
    pub output_dir: Option<PathBuf>,
    /// Two passes over the file instead of reading it into memory
    pub streaming: bool,
}

#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NumberFilterRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub numbers: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub first: PathBuf,
    pub second: PathBuf,
    /// Defaults to the first file's directory
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CountrySplitRequest {
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AreaSplitRequest {
    pub input: PathBuf,
    /// Country name or ISO code
    pub country: String,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct InsertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Zero-based character offset
    pub offset: usize,
    /// Empty means a random digit per line
    pub text: String,
    pub drop_empty: bool,
    pub seed: Option<u64>,
}

/// Any pipeline request
#[derive(Debug, Clone)]
pub enum Request {
    Merge(MergeRequest),
    Split(SplitRequest),
    Filter(FilterRequest),
    FilterNumbers(NumberFilterRequest),
    Compare(CompareRequest),
    CountrySplit(CountrySplitRequest),
    AreaSplit(AreaSplitRequest),
    Insert(InsertRequest),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Merge(_) => "merge",
            Request::Split(_) => "split",
            Request::Filter(_) => "filter",
            Request::FilterNumbers(_) => "filter-numbers",
            Request::Compare(_) => "compare",
            Request::CountrySplit(_) => "country-split",
            Request::AreaSplit(_) => "area-split",
            Request::Insert(_) => "insert",
        }
    }

    /// Input paths as given (directories are not expanded)
    pub fn inputs(&self) -> Vec<&Path> {
        match self {
            Request::Merge(r) => r.inputs.iter().map(PathBuf::as_path).collect(),
            Request::Split(r) => vec![r.input.as_path()],
            Request::Filter(r) => vec![r.input.as_path()],
            Request::FilterNumbers(r) => vec![r.input.as_path()],
            Request::Compare(r) => vec![r.first.as_path(), r.second.as_path()],
            Request::CountrySplit(r) => vec![r.input.as_path()],
            Request::AreaSplit(r) => vec![r.input.as_path()],
            Request::Insert(r) => vec![r.input.as_path()],
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub stats: RunStats,
    pub outputs: Vec<OutputFile>,
}

/// Main processor
pub struct Processor<'t> {
    config: ProcessorConfig,
    classifier: Classifier<'t>,
    progress: Option<Sender<ProgressEvent>>,
}

impl Processor<'static> {
    /// Processor over the built-in prefix table
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            classifier: Classifier::builtin(),
            progress: None,
        }
    }
}

impl<'t> Processor<'t> {
    /// Classify against `table` instead of the built-in one
    pub fn with_table<'a>(self, table: &'a PrefixTable) -> Processor<'a> {
        Processor {
            config: self.config,
            classifier: Classifier::new(table),
            progress: self.progress,
        }
    }

    /// Send progress events to `sender`
    pub fn with_progress(mut self, sender: Sender<ProgressEvent>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Run any request
    pub fn run(&self, request: &Request) -> Result<RunSummary> {
        log::info!("Starting {}", request.name());
        let summary = match request {
            Request::Merge(r) => self.run_merge(r),
            Request::Split(r) => self.run_split(r),
            Request::Filter(r) => self.run_filter(r),
            Request::FilterNumbers(r) => self.run_filter_numbers(r),
            Request::Compare(r) => self.run_compare(r),
            Request::CountrySplit(r) => self.run_country_split(r),
            Request::AreaSplit(r) => self.run_area_split(r),
            Request::Insert(r) => self.run_insert(r),
        }?;

        let s = &summary.stats;
        log::info!(
            "{} complete: {} processed, {} written, {} skipped, {} output files",
            request.name(),
            s.processed,
            s.matched,
            s.skipped,
            summary.outputs.len()
        );
        Ok(summary)
    }

    /// Concatenate inputs into one file, optionally keeping only first
    /// occurrences across all of them.
    pub fn run_merge(&self, req: &MergeRequest) -> Result<RunSummary> {
        if req.inputs.is_empty() {
            return Err(PipelineError::invalid("no input files to merge"));
        }

        let files = collect_inputs(&req.inputs, req.recursive, &req.output)?;
        if files.is_empty() {
            return Err(PipelineError::EmptyInput(req.inputs[0].clone()));
        }
        for file in &files {
            reject_same_file(file, &req.output)?;
        }

        let mut any_usable = false;
        for file in &files {
            if self.has_usable_line(file)? {
                any_usable = true;
                break;
            }
        }
        if !any_usable {
            return Err(PipelineError::EmptyInput(files[0].clone()));
        }

        let mut total = 0;
        for file in &files {
            total += count_lines(file)?;
        }
        log::debug!("Merging {} files, {} lines", files.len(), total);

        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let mut seen = create_deduplicator(req.dedup);

        ensure_output_dir(&parent_dir(&req.output))?;
        let mut writer = self.writer(&req.output)?;

        progress.stage("Merging", 1.0, total);
        for file in &files {
            for line in self.open(file)? {
                let line = line?;
                stats.add_line();
                progress.tick();

                if seen.insert(&line) {
                    writer.write_line(&line)?;
                    stats.add_match();
                } else {
                    stats.add_skip();
                }
            }
        }

        if req.dedup {
            stats.unique = seen.len() as u64;
        }
        let output = writer.finish()?;
        progress.finish();

        Ok(RunSummary {
            stats,
            outputs: vec![output],
        })
    }

    /// Split into `parts` contiguous files `{stem}_partK.txt`.
    pub fn run_split(&self, req: &SplitRequest) -> Result<RunSummary> {
        if req.parts == 0 {
            return Err(PipelineError::invalid("number of parts must be at least 1"));
        }

        let output_dir = req
            .output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&req.input));

        if req.streaming {
            self.split_streaming(req, &output_dir)
        } else {
            self.split_in_memory(req, &output_dir)
        }
    }

    fn split_in_memory(&self, req: &SplitRequest, output_dir: &Path) -> Result<RunSummary> {
        let mut progress = self.reporter();
        let mut stats = RunStats::new();

        progress.stage("Reading", 0.5, count_lines(&req.input)?);
        let mut lines = read_all_lines(&req.input, self.config.max_line_len, |_| progress.tick())?;
        stats.processed = lines.len() as u64;

        if req.dedup {
            lines = dedupe(lines);
            stats.unique = lines.len() as u64;
            stats.skipped = stats.processed - stats.unique;
        }
        if lines.is_empty() {
            return Err(PipelineError::EmptyInput(req.input.clone()));
        }

        ensure_output_dir(output_dir)?;
        let paths = part_paths(&req.input, output_dir, req.parts);
        let mut parts = PartWriters::create(paths, self.config.buffer_size, self.config.flush_every)?;

        progress.stage("Writing parts", 1.0, lines.len() as u64);
        for (part, range) in plan_parts(lines.len() as u64, req.parts)?.into_iter().enumerate() {
            for line in &lines[range.start as usize..range.end as usize] {
                parts.write(part, line)?;
                stats.add_match();
                progress.tick();
            }
        }

        let outputs = parts.finish()?;
        progress.finish();
        Ok(RunSummary { stats, outputs })
    }

    fn split_streaming(&self, req: &SplitRequest, output_dir: &Path) -> Result<RunSummary> {
        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let raw_total = count_lines(&req.input)?;

        // Pass 1: count what will be written. With dedup the set holds every
        // distinct line; pass 2 removes each on its first occurrence.
        let mut seen = if req.dedup {
            MemoryDeduplicator::with_capacity(raw_total as usize)
        } else {
            MemoryDeduplicator::new()
        };
        let mut stream = self.open(&req.input)?;
        let mut usable = 0u64;

        progress.stage("Counting", 0.3, raw_total);
        for line in stream.by_ref() {
            let line = line?;
            progress.tick();
            if !req.dedup || seen.insert(&line) {
                usable += 1;
            }
        }
        if usable == 0 {
            return Err(PipelineError::EmptyInput(req.input.clone()));
        }
        log::debug!("{} lines to split into {} parts", usable, req.parts);

        ensure_output_dir(output_dir)?;
        let paths = part_paths(&req.input, output_dir, req.parts);
        let mut parts = PartWriters::create(paths, self.config.buffer_size, self.config.flush_every)?;
        let mut partitioner = StreamingPartitioner::even(usable, req.parts)?;

        // Pass 2
        if let Err(e) = stream.reopen() {
            parts.rollback();
            return Err(e);
        }
        progress.stage("Writing parts", 1.0, raw_total);
        for line in stream {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    parts.rollback();
                    return Err(e);
                }
            };
            stats.add_line();
            progress.tick();

            if req.dedup && !seen.remove(&line) {
                stats.add_skip();
                continue;
            }
            parts.write(partitioner.assign(), &line)?;
            stats.add_match();
        }

        if req.dedup {
            stats.unique = usable;
        }
        let outputs = parts.finish()?;
        progress.finish();
        Ok(RunSummary { stats, outputs })
    }

    /// Keep lines starting with one of the request's prefixes.
    ///
    /// Matching and output both use the trimmed line, so surrounding
    /// whitespace of kept lines is not preserved.
    pub fn run_filter(&self, req: &FilterRequest) -> Result<RunSummary> {
        let filter = PrefixFilter::new(&req.prefixes)?;
        reject_same_file(&req.input, &req.output)?;
        self.ensure_usable(&req.input)?;

        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let total = count_lines(&req.input)?;

        ensure_output_dir(&parent_dir(&req.output))?;
        let mut writer = self.writer(&req.output)?;

        progress.stage("Filtering", 1.0, total);
        for line in self.open(&req.input)? {
            let line = line?;
            stats.add_line();
            progress.tick();

            if filter.matches(&line) {
                writer.write_line(&line)?;
                stats.add_match();
            } else {
                stats.add_skip();
            }
        }

        let output = writer.finish()?;
        progress.finish();
        Ok(RunSummary {
            stats,
            outputs: vec![output],
        })
    }

    /// Keep lines whose integer value is in the request's set. Non-numeric
    /// lines are skipped with a bounded number of warnings.
    pub fn run_filter_numbers(&self, req: &NumberFilterRequest) -> Result<RunSummary> {
        let filter = NumberFilter::new(req.numbers.iter().copied())?;
        reject_same_file(&req.input, &req.output)?;
        self.ensure_usable(&req.input)?;

        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let mut warnings = SkipWarnings::new("non-numeric line", NUMBER_WARNING_LIMIT);
        let total = count_lines(&req.input)?;

        ensure_output_dir(&parent_dir(&req.output))?;
        let mut writer = self.writer(&req.output)?;
        let mut stream = self.open(&req.input)?;

        progress.stage("Filtering", 1.0, total);
        while let Some(line) = stream.next().transpose()? {
            stats.add_line();
            progress.tick();

            match filter.check(&line) {
                NumberMatch::Keep => {
                    writer.write_line(&line)?;
                    stats.add_match();
                }
                NumberMatch::Drop => stats.add_skip(),
                NumberMatch::NotNumeric => {
                    warnings.record(stream.line_no(), &line);
                    stats.add_skip();
                }
            }
        }
        warnings.finish();

        let output = writer.finish()?;
        progress.finish();
        Ok(RunSummary {
            stats,
            outputs: vec![output],
        })
    }

    /// Write `{a}_{b}_same.txt` (lines in both) and `{a}_{b}_diff.txt`
    /// (lines in only one).
    pub fn run_compare(&self, req: &CompareRequest) -> Result<RunSummary> {
        let output_dir = req
            .output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&req.first));

        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let max_line = self.config.max_line_len;

        progress.stage("Reading first file", 0.35, count_lines(&req.first)?);
        let first = read_all_lines(&req.first, max_line, |_| progress.tick())?;
        progress.stage("Reading second file", 0.7, count_lines(&req.second)?);
        let second = read_all_lines(&req.second, max_line, |_| progress.tick())?;

        stats.processed = (first.len() + second.len()) as u64;
        if stats.processed == 0 {
            return Err(PipelineError::EmptyInput(req.first.clone()));
        }

        let cmp = diff_and_intersect(&first, &second);
        stats.unique = (cmp.same.len() + dedupe(cmp.diff.iter().map(String::as_str)).len()) as u64;
        drop(first);
        drop(second);

        let base = format!("{}_{}", input_stem(&req.first), input_stem(&req.second));
        ensure_output_dir(&output_dir)?;

        progress.stage("Writing", 1.0, (cmp.same.len() + cmp.diff.len()) as u64);
        let mut outputs = Vec::with_capacity(2);
        for (suffix, lines) in [("same", &cmp.same), ("diff", &cmp.diff)] {
            let mut writer = self.writer(&output_dir.join(format!("{}_{}.txt", base, suffix)))?;
            for line in lines {
                writer.write_line(line)?;
                stats.add_match();
                progress.tick();
            }
            outputs.push(writer.finish()?);
        }
        stats.skipped = stats.processed - stats.matched;

        progress.finish();
        Ok(RunSummary { stats, outputs })
    }

    /// One file per country of the longest matching calling code, plus
    /// an unknown-country file.
    pub fn run_country_split(&self, req: &CountrySplitRequest) -> Result<RunSummary> {
        self.ensure_usable(&req.input)?;

        let output_dir = req
            .output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&req.input));
        ensure_output_dir(&output_dir)?;

        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let mut buckets = BucketWriter::new(output_dir, self.config.buffer_size, self.config.flush_every)
            .protect(&req.input);

        progress.stage("Classifying by country", 1.0, count_lines(&req.input)?);
        for line in self.open(&req.input)? {
            let line = line?;
            stats.add_line();
            progress.tick();

            buckets.write(self.classifier.identify_country(&line), &line)?;
            stats.add_match();
        }

        let outputs = buckets.finish()?;
        progress.finish();
        Ok(RunSummary { stats, outputs })
    }

    /// One file per area of the requested country, plus unknown-area and
    /// unknown-country files.
    pub fn run_area_split(&self, req: &AreaSplitRequest) -> Result<RunSummary> {
        let country = self.classifier.resolve_country(&req.country)?;
        self.ensure_usable(&req.input)?;

        let output_dir = req
            .output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&req.input));
        ensure_output_dir(&output_dir)?;

        let mut progress = self.reporter();
        let mut stats = RunStats::new();
        let mut buckets = BucketWriter::new(output_dir, self.config.buffer_size, self.config.flush_every)
            .protect(&req.input);

        progress.stage("Classifying by area", 1.0, count_lines(&req.input)?);
        for line in self.open(&req.input)? {
            let line = line?;
            stats.add_line();
            progress.tick();

            let outcome = self.classifier.classify_area(&line, country);
            buckets.write(outcome.bucket(), &line)?;
            stats.add_match();
        }

        let outputs = buckets.finish()?;
        progress.finish();
        Ok(RunSummary { stats, outputs })
    }

    /// Insert text (or a random digit) at a character offset of every line.
    pub fn run_insert(&self, req: &InsertRequest) -> Result<RunSummary> {
        let mut inserter = CharInserter::new(req.offset, &req.text, req.seed)?;
        reject_same_file(&req.input, &req.output)?;

        let total = count_lines(&req.input)?;
        if total == 0 {
            return Err(PipelineError::EmptyInput(req.input.clone()));
        }

        let mut progress = self.reporter();
        let mut stats = RunStats::new();

        ensure_output_dir(&parent_dir(&req.output))?;
        let mut writer = self.writer(&req.output)?;
        let mut stream = self.open(&req.input)?;

        progress.stage("Inserting", 1.0, total);
        while let Some(line) = stream.next_line()? {
            stats.add_line();
            progress.tick();

            if line.is_empty() {
                if req.drop_empty {
                    stats.add_skip();
                } else {
                    writer.write_line("")?;
                    stats.add_match();
                }
                continue;
            }

            writer.write_line(&inserter.apply(&line))?;
            stats.add_match();
        }

        let output = writer.finish()?;
        progress.finish();
        Ok(RunSummary {
            stats,
            outputs: vec![output],
        })
    }

    fn reporter(&self) -> ProgressReporter {
        ProgressReporter::new(self.progress.clone(), self.config.progress_interval)
    }

    fn open(&self, path: &Path) -> Result<LineStream> {
        LineStream::with_max_line(path, self.config.max_line_len)
    }

    fn writer(&self, path: &Path) -> Result<OutputWriter> {
        OutputWriter::new(path.to_path_buf(), self.config.buffer_size, self.config.flush_every)
    }

    fn has_usable_line(&self, path: &Path) -> Result<bool> {
        match self.open(path)?.next() {
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => Err(e),
            None => Ok(false),
        }
    }

    fn ensure_usable(&self, path: &Path) -> Result<()> {
        if self.has_usable_line(path)? {
            Ok(())
        } else {
            Err(PipelineError::EmptyInput(path.to_path_buf()))
        }
    }
}

/// Expand directory inputs to their `.txt` files, sorted by path.
fn collect_inputs(inputs: &[PathBuf], recursive: bool, output: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let meta = fs::metadata(input).map_err(io_at(input))?;
        if meta.is_file() {
            files.push(input.clone());
            continue;
        }

        let walker = if recursive {
            WalkDir::new(input)
        } else {
            WalkDir::new(input).max_depth(1)
        };

        let mut found = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| PipelineError::io(input, e.into()))?;
            let path = entry.path();

            let is_txt = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("txt"))
                .unwrap_or(false);

            if entry.file_type().is_file() && is_txt && !is_same_file(path, output) {
                found.push(path.to_path_buf());
            }
        }
        found.sort();
        log::debug!("{}: {} input files", input.display(), found.len());
        files.extend(found);
    }

    Ok(files)
}

/// Truncating an input to write the output would destroy it
fn reject_same_file(input: &Path, output: &Path) -> Result<()> {
    if is_same_file(input, output) {
        return Err(PipelineError::invalid(format!(
            "output {} is the same file as input",
            output.display()
        )));
    }
    Ok(())
}
