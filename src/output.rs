//! Output management module
//!
//! Buffered writers for single outputs, lazily created per-bucket outputs
//! and split part files. Writers flush every `flush_every` lines so large
//! runs make steady progress on disk without growing the buffer.

use crate::error::{io_at, PipelineError, Result};

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Default number of lines between explicit flushes
pub const DEFAULT_FLUSH_EVERY: usize = 5000;

/// A finished output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub lines: u64,
    pub bytes: u64,
}

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
    flush_every: usize,
    pending: usize,
}

impl OutputWriter {
    /// Create (or truncate) the output file
    pub fn new(path: PathBuf, buffer_size: usize, flush_every: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(io_at(&path))?;

        let writer = BufWriter::with_capacity(buffer_size.max(8 * 1024), file);

        Ok(Self {
            writer,
            path,
            lines_written: 0,
            bytes_written: 0,
            flush_every,
            pending: 0,
        })
    }

    /// Write a line followed by a single '\n'
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(io_at(&self.path))?;

        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        self.pending += 1;

        if self.flush_every > 0 && self.pending >= self.flush_every {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.pending = 0;
        self.writer.flush().map_err(io_at(&self.path))
    }

    /// Flush and close, returning what was written
    pub fn finish(mut self) -> Result<OutputFile> {
        self.flush()?;
        Ok(OutputFile {
            path: self.path.clone(),
            lines: self.lines_written,
            bytes: self.bytes_written,
        })
    }

    /// Close and delete the file
    pub fn discard(self) {
        let path = self.path.clone();
        drop(self);
        if let Err(e) = std::fs::remove_file(&path) {
            log::warn!("Could not remove {}: {}", path.display(), e);
        }
    }

}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// One output file per bucket, created on the bucket's first line.
///
/// File names come from [`sanitize_file_name`]. Distinct buckets that
/// sanitize to the same name get `_2`, `_3`, ... suffixes.
pub struct BucketWriter {
    output_dir: PathBuf,
    buffer_size: usize,
    flush_every: usize,
    writers: Vec<(String, OutputWriter)>,
    index: HashMap<String, usize, RandomState>,
    taken: HashSet<String, RandomState>,
    protected: Vec<PathBuf>,
}

impl BucketWriter {
    pub fn new(output_dir: PathBuf, buffer_size: usize, flush_every: usize) -> Self {
        Self {
            output_dir,
            buffer_size,
            flush_every,
            writers: Vec::new(),
            index: HashMap::with_hasher(RandomState::new()),
            taken: HashSet::with_hasher(RandomState::new()),
            protected: Vec::new(),
        }
    }

    /// Refuse to create a bucket file that is `path`
    pub fn protect(mut self, path: &Path) -> Self {
        self.protected.push(path.to_path_buf());
        self
    }

    /// Append `line` to `bucket`, creating its file if needed.
    ///
    /// A failed write deletes that bucket's file. Other buckets are untouched.
    pub fn write(&mut self, bucket: &str, line: &str) -> Result<()> {
        let idx = match self.index.get(bucket) {
            Some(&idx) => idx,
            None => self.open_bucket(bucket)?,
        };

        if let Err(e) = self.writers[idx].1.write_line(line) {
            let (_, writer) = self.writers.remove(idx);
            writer.discard();
            self.index.remove(bucket);
            for slot in self.index.values_mut() {
                if *slot > idx {
                    *slot -= 1;
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn open_bucket(&mut self, bucket: &str) -> Result<usize> {
        let file_name = self.unique_file_name(bucket);
        let path = self.output_dir.join(file_name);
        if let Some(input) = self.protected.iter().find(|p| is_same_file(p, &path)) {
            return Err(PipelineError::invalid(format!(
                "bucket '{}' would overwrite input {}",
                bucket,
                input.display()
            )));
        }
        log::debug!("Creating bucket '{}' at {}", bucket, path.display());

        let writer = OutputWriter::new(path, self.buffer_size, self.flush_every)?;
        let idx = self.writers.len();
        self.writers.push((bucket.to_string(), writer));
        self.index.insert(bucket.to_string(), idx);
        Ok(idx)
    }

    fn unique_file_name(&mut self, bucket: &str) -> String {
        let stem = sanitize_file_name(bucket);
        let mut candidate = stem.clone();
        let mut n = 1;
        // Case-insensitive so buckets don't clash on Windows or macOS
        while !self.taken.insert(candidate.to_lowercase()) {
            n += 1;
            candidate = format!("{}_{}", stem, n);
        }
        format!("{}.txt", candidate)
    }

    /// Flush and close every bucket, in creation order
    pub fn finish(self) -> Result<Vec<OutputFile>> {
        self.writers
            .into_iter()
            .map(|(_, writer)| writer.finish())
            .collect()
    }
}

/// A fixed set of part files that is created and removed as a unit.
pub struct PartWriters {
    writers: Vec<OutputWriter>,
}

impl PartWriters {
    /// Create every part file. If one fails, the ones already created are
    /// closed and deleted.
    pub fn create(paths: Vec<PathBuf>, buffer_size: usize, flush_every: usize) -> Result<Self> {
        let mut writers = Vec::with_capacity(paths.len());

        for path in paths {
            match OutputWriter::new(path, buffer_size, flush_every) {
                Ok(writer) => writers.push(writer),
                Err(e) => {
                    Self { writers }.rollback();
                    return Err(e);
                }
            }
        }

        Ok(Self { writers })
    }

    /// Write to part `part` (0-based). On failure all parts are deleted.
    pub fn write(&mut self, part: usize, line: &str) -> Result<()> {
        let result = match self.writers.get_mut(part) {
            Some(writer) => writer.write_line(line),
            None => Err(PipelineError::invalid(format!("no part {}", part + 1))),
        };

        if result.is_err() {
            self.discard_all();
        }
        result
    }

    /// Flush and close every part. On failure all parts are deleted.
    pub fn finish(mut self) -> Result<Vec<OutputFile>> {
        let failed = self
            .writers
            .iter_mut()
            .map(OutputWriter::flush)
            .find_map(Result::err);
        if let Some(e) = failed {
            self.discard_all();
            return Err(e);
        }

        std::mem::take(&mut self.writers)
            .into_iter()
            .map(OutputWriter::finish)
            .collect()
    }

    /// Close and delete every part file
    pub fn rollback(mut self) {
        self.discard_all();
    }

    fn discard_all(&mut self) {
        let count = self.writers.len();
        for writer in self.writers.drain(..) {
            writer.discard();
        }
        if count > 0 {
            log::warn!("Removed {} partial part files", count);
        }
    }
}

/// Characters that can't appear in a file name on common platforms
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Map a free-form bucket name to a safe file stem.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        return "_".to_string();
    }

    // "NUL.backup" is as reserved as "NUL"
    let device = trimmed.split('.').next().unwrap_or(trimmed);
    if RESERVED.iter().any(|r| r.eq_ignore_ascii_case(device)) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}

/// File stem of `input`, or "output" when it has none
pub fn input_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Generate output filename from input filename
pub fn generate_output_name(input: &Path, suffix: &str) -> String {
    format!("{}_{}.txt", input_stem(input), suffix)
}

/// Paths `{stem}_part1.txt` ... `{stem}_partN.txt` in `output_dir`
pub fn part_paths(input: &Path, output_dir: &Path, parts: usize) -> Vec<PathBuf> {
    (1..=parts)
        .map(|k| output_dir.join(generate_output_name(input, &format!("part{}", k))))
        .collect()
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(io_at(path))?;
    }
    Ok(())
}

/// True when both paths exist and resolve to the same file
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Directory of `path`, or "." for a bare file name
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::new(path.clone(), 1024, 2).unwrap();
        writer.write_line("13800000000").unwrap();
        writer.write_line("13900000000").unwrap();
        // Batch flush after two lines
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "13800000000\n13900000000\n");

        writer.write_line("1").unwrap();
        let out = writer.finish().unwrap();

        assert_eq!(out.lines, 3);
        assert_eq!(out.bytes, 26);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "13800000000\n13900000000\n1\n");
    }

    #[test]
    fn test_output_writer_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, "old content\n").unwrap();

        let mut writer = OutputWriter::new(path.clone(), 1024, 0).unwrap();
        writer.write_line("new").unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_bucket_writer_creates_lazily() {
        let temp_dir = TempDir::new().unwrap();
        let mut buckets = BucketWriter::new(temp_dir.path().to_path_buf(), 1024, 100);

        buckets.write("英国", "447911123456").unwrap();
        buckets.write("中国", "8613800000000").unwrap();
        buckets.write("英国", "442071234567").unwrap();

        let outputs = buckets.finish().unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].path, temp_dir.path().join("英国.txt"));
        assert_eq!(outputs[0].lines, 2);
        assert_eq!(outputs[1].path, temp_dir.path().join("中国.txt"));
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("英国.txt")).unwrap(),
            "447911123456\n442071234567\n"
        );
        assert!(!temp_dir.path().join("日本.txt").exists());
    }

    #[test]
    fn test_bucket_name_collisions() {
        let temp_dir = TempDir::new().unwrap();
        let mut buckets = BucketWriter::new(temp_dir.path().to_path_buf(), 1024, 100);

        buckets.write("a/b", "1").unwrap();
        buckets.write("a:b", "2").unwrap();
        buckets.write("A_B", "3").unwrap();
        let outputs = buckets.finish().unwrap();

        let names: Vec<String> = outputs
            .iter()
            .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_b.txt", "a_b_2.txt", "A_B_3.txt"]);
    }

    #[test]
    fn test_part_writers_rollback_on_create_failure() {
        let temp_dir = TempDir::new().unwrap();
        let paths = vec![
            temp_dir.path().join("x_part1.txt"),
            temp_dir.path().join("x_part2.txt"),
            temp_dir.path().join("missing").join("x_part3.txt"),
        ];

        assert!(PartWriters::create(paths.clone(), 1024, 10).is_err());
        for path in &paths {
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_part_writers() {
        let temp_dir = TempDir::new().unwrap();
        let paths = part_paths(Path::new("/data/numbers.txt"), temp_dir.path(), 2);
        let mut parts = PartWriters::create(paths, 1024, 10).unwrap();

        parts.write(0, "1").unwrap();
        parts.write(1, "2").unwrap();
        assert!(parts.write(5, "3").is_err());
        // A failed write removes every part
        assert!(parts.write(0, "4").is_err());
        assert!(!temp_dir.path().join("numbers_part1.txt").exists());
    }

    #[test]
    fn test_bucket_writer_refuses_protected_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("英国.txt");
        std::fs::write(&input, "447911123456\n").unwrap();

        let mut buckets = BucketWriter::new(temp_dir.path().to_path_buf(), 1024, 1).protect(&input);
        buckets.write("中国", "8613800000000").unwrap();
        assert!(buckets.write("英国", "447911123456").unwrap_err().is_parameter_error());
        buckets.write("中国", "8613900000000").unwrap();

        let outputs = buckets.finish().unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "447911123456\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_bucket_write_failure_keeps_other_buckets() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(full, temp_dir.path().join("bad.txt")).unwrap();

        // No batch flushes: writes to /dev/full only fail once the buffer spills
        let mut buckets = BucketWriter::new(temp_dir.path().to_path_buf(), 1024, 0);
        buckets.write("a", "1").unwrap();
        buckets.write("bad", "x").unwrap();
        buckets.write("c", "3").unwrap();

        let long_line = "9".repeat(64 * 1024);
        assert!(matches!(
            buckets.write("bad", &long_line).unwrap_err(),
            PipelineError::Io { .. }
        ));
        assert!(std::fs::symlink_metadata(temp_dir.path().join("bad.txt")).is_err());

        // Buckets created before and after the failed one still route correctly
        buckets.write("c", "4").unwrap();
        buckets.write("a", "2").unwrap();

        let outputs = buckets.finish().unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "1\n2\n");
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("c.txt")).unwrap(), "3\n4\n");
        assert_eq!(outputs[1].lines, 2);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("安大略省-多伦多"), "安大略省-多伦多");
        assert_eq!(sanitize_file_name("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
        assert_eq!(sanitize_file_name("name. . "), "name");
        assert_eq!(sanitize_file_name("..."), "_");
        assert_eq!(sanitize_file_name(""), "_");
        assert_eq!(sanitize_file_name("con"), "_con");
        assert_eq!(sanitize_file_name("LPT1.list"), "_LPT1.list");
        assert_eq!(sanitize_file_name("CONSOLE"), "CONSOLE");
    }

    #[test]
    fn test_generate_output_name() {
        let input = Path::new("/path/to/numbers.txt");
        assert_eq!(generate_output_name(input, "part3"), "numbers_part3.txt");
        assert_eq!(input_stem(Path::new("list")), "list");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("numbers.txt")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("/data/numbers.txt")), PathBuf::from("/data"));
    }
}
