//! Line streaming with encoding detection
//!
//! [`LineStream`] reads a text file as a sequence of trimmed lines. Input is
//! sniffed once on open: a BOM wins, otherwise `chardetng` guesses from the
//! first 64 KiB. Anything that is not UTF-8 is transcoded on the fly.

use crate::error::{io_at, PipelineError, Result};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Default per-line cap
pub const DEFAULT_MAX_LINE: usize = 8 * 1024 * 1024;

/// Smallest per-line cap a stream accepts
pub const MIN_MAX_LINE: usize = 2 * 1024 * 1024;

const SAMPLE_SIZE: usize = 64 * 1024;
const READ_BUFFER: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a file by sampling its first 64 KiB
pub fn detect_encoding(path: &Path) -> Result<EncodingInfo> {
    let file = File::open(path).map_err(io_at(path))?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
        .map_err(io_at(path))?;

    if sample.is_empty() {
        return Ok(EncodingInfo::default());
    }

    if let Some(encoding) = detect_bom(&sample) {
        return Ok(EncodingInfo {
            name: encoding.name(),
            encoding,
        });
    }

    // A sample cut in the middle of a multi-byte sequence is still UTF-8
    match std::str::from_utf8(&sample) {
        Ok(_) => return Ok(EncodingInfo::default()),
        Err(e) if e.error_len().is_none() => return Ok(EncodingInfo::default()),
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&sample, true);
    let encoding = detector.guess(None, true);

    Ok(EncodingInfo {
        name: encoding.name(),
        encoding,
    })
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

/// Lazy, restartable sequence of trimmed lines from one file.
///
/// Iterating yields only non-empty lines. [`next_line`](Self::next_line)
/// also yields blank lines as empty strings, for operations that keep them.
pub struct LineStream {
    path: PathBuf,
    encoding: &'static Encoding,
    max_line: usize,
    reader: BufReader<DecodeReaderBytes<File, Vec<u8>>>,
    buf: Vec<u8>,
    line_no: u64,
}

impl LineStream {
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_max_line(path, DEFAULT_MAX_LINE)
    }

    /// Open with a per-line cap in bytes, raised to [`MIN_MAX_LINE`] if lower.
    pub fn with_max_line(path: &Path, max_line: usize) -> Result<Self> {
        let info = detect_encoding(path)?;
        if info.encoding != encoding_rs::UTF_8 {
            log::debug!("{}: reading as {}", path.display(), info.name);
        }

        Ok(Self {
            path: path.to_path_buf(),
            encoding: info.encoding,
            max_line: max_line.max(MIN_MAX_LINE),
            reader: open_reader(path, info.encoding)?,
            buf: Vec::with_capacity(4096),
            line_no: 0,
        })
    }

    /// Restart from the first line.
    pub fn reopen(&mut self) -> Result<()> {
        self.reader = open_reader(&self.path, self.encoding)?;
        self.line_no = 0;
        Ok(())
    }

    pub fn max_line(&self) -> usize {
        self.max_line
    }

    /// Lines read so far, blank ones included
    pub fn line_no(&self) -> u64 {
        self.line_no
    }

    /// Next trimmed line, blank lines included. `None` at end of file.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();

        // Room for the content, '\r' and '\n'
        let limit = self.max_line as u64 + 2;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .map_err(io_at(&self.path))?;

        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let terminated = self.buf.last() == Some(&b'\n');
        if terminated {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        if (!terminated && read as u64 == limit) || self.buf.len() > self.max_line {
            return Err(PipelineError::LineTooLong {
                path: self.path.clone(),
                line: self.line_no,
                limit: self.max_line,
            });
        }

        let line = match std::str::from_utf8(&self.buf) {
            Ok(s) => s.trim().to_string(),
            Err(_) => String::from_utf8_lossy(&self.buf).trim().to_string(),
        };
        Ok(Some(line))
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_line() {
                Ok(Some(line)) if line.is_empty() => continue,
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn open_reader(path: &Path, encoding: &'static Encoding) -> Result<BufReader<DecodeReaderBytes<File, Vec<u8>>>> {
    let file = File::open(path).map_err(io_at(path))?;

    // `None` passes UTF-8 through untouched; a BOM still selects its encoding
    let explicit = (encoding != encoding_rs::UTF_8).then_some(encoding);
    let decoder = DecodeReaderBytesBuilder::new()
        .encoding(explicit)
        .bom_sniffing(true)
        .build(file);

    Ok(BufReader::with_capacity(READ_BUFFER, decoder))
}

/// Count raw newline-separated lines, blank ones included.
///
/// Works on the undecoded bytes through a memory map, so it is meant for
/// progress totals rather than exact counts of usable lines.
pub fn count_lines(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(io_at(path))?;
    let len = file.metadata().map_err(io_at(path))?.len();
    if len == 0 {
        return Ok(0);
    }

    let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(io_at(path))?;
    let newlines = memchr::memchr_iter(b'\n', &mmap).count() as u64;
    let unterminated = u64::from(mmap.last() != Some(&b'\n'));

    Ok(newlines + unterminated)
}

/// Read every non-empty trimmed line of `path` into memory, calling
/// `on_line` for each one as it arrives.
pub fn read_all_lines<F>(path: &Path, max_line: usize, mut on_line: F) -> Result<Vec<String>>
where
    F: FnMut(&str),
{
    let mut lines = Vec::new();
    for line in LineStream::with_max_line(path, max_line)? {
        let line = line?;
        on_line(&line);
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_utf8_detection() {
        let file = file_with("13800000000\n北京 13900000000\n".as_bytes());
        let info = detect_encoding(file.path()).unwrap();
        assert_eq!(info.name, "UTF-8");
        assert_eq!(info.encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_skipped() {
        let file = file_with(b"  123 \r\n\r\n\t\n456\n   \n789");
        let lines = read_all_lines(file.path(), DEFAULT_MAX_LINE, |_| {}).unwrap();
        assert_eq!(lines, vec!["123", "456", "789"]);
    }

    #[test]
    fn test_next_line_keeps_blank_lines() {
        let file = file_with(b"a\n\n  \nb\n");
        let mut stream = LineStream::open(file.path()).unwrap();

        let mut lines = Vec::new();
        while let Some(line) = stream.next_line().unwrap() {
            lines.push(line);
        }
        assert_eq!(lines, vec!["a", "", "", "b"]);
        assert_eq!(stream.line_no(), 4);
    }

    #[test]
    fn test_reopen_restarts() {
        let file = file_with(b"1\n2\n3\n");
        let mut stream = LineStream::open(file.path()).unwrap();
        assert_eq!(stream.next().unwrap().unwrap(), "1");
        assert_eq!(stream.next().unwrap().unwrap(), "2");

        stream.reopen().unwrap();
        let all: Vec<String> = stream.by_ref().map(|l| l.unwrap()).collect();
        assert_eq!(all, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_very_long_line_is_accepted() {
        let long = "7".repeat(3 * 1024 * 1024);
        let file = file_with(format!("1\n{}\n2\n", long).as_bytes());

        let lines = read_all_lines(file.path(), 4 * 1024 * 1024, |_| {}).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), long.len());
    }

    #[test]
    fn test_line_over_cap_fails() {
        let long = "7".repeat(MIN_MAX_LINE + 10);
        let file = file_with(format!("1\n{}\n", long).as_bytes());

        let err = read_all_lines(file.path(), 0, |_| {}).unwrap_err();
        match err {
            PipelineError::LineTooLong { line, limit, .. } => {
                assert_eq!(line, 2);
                assert_eq!(limit, MIN_MAX_LINE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cap_is_raised_to_minimum() {
        let file = file_with(b"1\n");
        let stream = LineStream::with_max_line(file.path(), 16).unwrap();
        assert_eq!(stream.max_line(), MIN_MAX_LINE);
    }

    #[test]
    fn test_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "13800000000\r\n447911123456\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = file_with(&bytes);

        let info = detect_encoding(file.path()).unwrap();
        assert_eq!(info.encoding, encoding_rs::UTF_16LE);

        let lines = read_all_lines(file.path(), DEFAULT_MAX_LINE, |_| {}).unwrap();
        assert_eq!(lines, vec!["13800000000", "447911123456"]);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let file = file_with(b"\xEF\xBB\xBF8613800000000\n");
        let lines = read_all_lines(file.path(), DEFAULT_MAX_LINE, |_| {}).unwrap();
        assert_eq!(lines, vec!["8613800000000"]);
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(file_with(b"").path()).unwrap(), 0);
        assert_eq!(count_lines(file_with(b"a\nb\n").path()).unwrap(), 2);
        assert_eq!(count_lines(file_with(b"a\nb").path()).unwrap(), 2);
        assert_eq!(count_lines(file_with(b"\n\n\n").path()).unwrap(), 3);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = LineStream::open(Path::new("/nonexistent/numbers.txt")).err().unwrap();
        assert!(err.to_string().contains("numbers.txt"));
    }
}
