//! Encoding detection and transcoding module
//!
//! Word lists come in all sorts of encodings. Lines are transcoded to UTF-8
//! before normalization so that letters outside ASCII are still recognized.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::rc::Rc;

/// Number of bytes sampled for detection
const SAMPLE_SIZE: usize = 64 * 1024;

/// Smallest read buffer; the decoder needs room for a whole UTF-8 sequence
const MIN_BUFFER_SIZE: usize = 16;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a file by sampling its content
pub fn detect_encoding(path: &Path) -> io::Result<EncodingInfo> {
    let mut file = File::open(path)?;

    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    (&mut file).take(SAMPLE_SIZE as u64).read_to_end(&mut sample)?;

    Ok(detect_from_sample(&sample))
}

fn detect_from_sample(sample: &[u8]) -> EncodingInfo {
    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some(encoding) = detect_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    // Pure ASCII would be guessed as windows-1252, which breaks any UTF-8
    // further down the file. A sample cut mid-character still counts as valid.
    let valid_utf8 = match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    if valid_utf8 {
        return EncodingInfo::default();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let encoding = detector.guess(None, true);

    let confidence = if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 };

    EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

/// Reader that tallies the raw bytes pulled from the file
struct CountingReader<R> {
    inner: R,
    count: Rc<Cell<u64>>,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.set(self.count.get() + n as u64);
        Ok(n)
    }
}

/// Line iterator that transcodes the file to UTF-8 on the fly
///
/// Lines end at `\n`, `\r\n` or a lone `\r`.
pub struct EncodedLineIterator {
    reader: BufReader<DecodeReaderBytes<CountingReader<File>, Vec<u8>>>,
    encoding: &'static Encoding,
    source_bytes: Rc<Cell<u64>>,
    line_buffer: Vec<u8>,
}

impl EncodedLineIterator {
    /// Create a new line iterator for a file with automatic encoding detection
    pub fn new(path: &Path, buffer_size: usize) -> io::Result<Self> {
        let info = detect_encoding(path)?;
        log::debug!(
            "Detected encoding {} (confidence {:.1}) for {:?}",
            info.name,
            info.confidence,
            path
        );
        Self::with_encoding(path, info.encoding, buffer_size)
    }

    /// Create with a specific encoding
    pub fn with_encoding(
        path: &Path,
        encoding: &'static Encoding,
        buffer_size: usize,
    ) -> io::Result<Self> {
        let source_bytes = Rc::new(Cell::new(0));
        let file = CountingReader {
            inner: File::open(path)?,
            count: Rc::clone(&source_bytes),
        };
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .build(file);

        Ok(Self {
            reader: BufReader::with_capacity(buffer_size.max(MIN_BUFFER_SIZE), decoder),
            encoding,
            source_bytes,
            line_buffer: Vec::with_capacity(256),
        })
    }

    /// Get the encoding used for transcoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Shared counter of raw (undecoded) bytes read from the file so far.
    ///
    /// Reads happen in buffer-sized chunks, so the value runs ahead of the
    /// lines handed out and equals the file size once iteration is done.
    pub fn source_bytes(&self) -> Rc<Cell<u64>> {
        Rc::clone(&self.source_bytes)
    }

    /// Fill `line_buffer` with the next line, without its terminator.
    /// Returns false at end of input.
    fn read_line(&mut self) -> io::Result<bool> {
        self.line_buffer.clear();
        let mut read_any = false;

        loop {
            let (terminator, used) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    return Ok(read_any);
                }
                read_any = true;

                match memchr::memchr2(b'\n', b'\r', available) {
                    Some(i) => {
                        self.line_buffer.extend_from_slice(&available[..i]);
                        (Some(available[i]), i + 1)
                    }
                    None => {
                        self.line_buffer.extend_from_slice(available);
                        (None, available.len())
                    }
                }
            };
            self.reader.consume(used);

            match terminator {
                Some(b'\r') => {
                    if self.reader.fill_buf()?.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(true);
                }
                Some(_) => return Ok(true),
                None => {}
            }
        }
    }
}

impl Iterator for EncodedLineIterator {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(false) => None,
            // Decoder output is UTF-8 and the split bytes are ASCII
            Ok(true) => Some(Ok(String::from_utf8_lossy(&self.line_buffer).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}
