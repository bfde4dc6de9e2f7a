//! Bounded stream reading with scoped release
//!
//! A metadata document is read through a [`CappedReader`] that refuses to hand
//! out more than a fixed number of bytes, while a [`StreamGuard`] makes sure the
//! underlying stream is closed exactly once, whatever the outcome of the read.

use crate::metadata::MetadataError;
use std::fs::File;
use std::io::{self, Cursor, Read};

/// Default upper bound for a metadata document (50 KiB)
pub const PROTECTED_LENGTH: u64 = 51_200;

const READ_CHUNK: usize = 2048;

/// A readable metadata stream with an explicit, fallible release step
pub trait MetadataStream: Read {
    /// Release the underlying resource.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MetadataStream for File {}

impl<T: AsRef<[u8]>> MetadataStream for Cursor<T> {}

impl MetadataStream for &[u8] {}

impl MetadataStream for reqwest::blocking::Response {}

impl<S: MetadataStream + ?Sized> MetadataStream for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Reader adapter that passes through at most `limit` bytes.
///
/// Observing byte `limit + 1` marks the reader as exceeded and fails the read.
pub struct CappedReader<R> {
    inner: R,
    limit: u64,
    consumed: u64,
    exceeded: bool,
}

impl<R: Read> CappedReader<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            limit,
            consumed: 0,
            exceeded: false,
        }
    }

    /// Whether the source held more than `limit` bytes
    pub fn exceeded(&self) -> bool {
        self.exceeded
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl<R: Read> Read for CappedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.exceeded {
            return Err(overflow_error(self.limit));
        }
        // One byte of headroom lets us tell "exactly limit" from "more than limit".
        let allowed = self.limit.saturating_add(1).saturating_sub(self.consumed);
        let max = buf.len().min(usize::try_from(allowed).unwrap_or(usize::MAX));
        if max == 0 {
            return Ok(0);
        }
        let n = self.inner.read(&mut buf[..max])?;
        self.consumed += n as u64;
        if self.consumed > self.limit {
            self.exceeded = true;
            return Err(overflow_error(self.limit));
        }
        Ok(n)
    }
}

fn overflow_error(limit: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("stream exceeds {} byte limit", limit),
    )
}

/// Scoped acquisition of a metadata stream.
///
/// [`StreamGuard::release`] closes the stream and reports the outcome; if the
/// guard is dropped without being released, the stream is closed on drop.
pub struct StreamGuard<S: MetadataStream> {
    stream: S,
    released: bool,
}

impl<S: MetadataStream> StreamGuard<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            released: false,
        }
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn release(mut self) -> io::Result<()> {
        self.released = true;
        self.stream.close()
    }
}

impl<S: MetadataStream> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(e) = self.stream.close() {
                tracing::warn!(error = %e, "failed to close metadata stream on drop");
            }
        }
    }
}

/// Read a whole stream as UTF-8 text, consuming at most `limit` bytes.
///
/// The stream is closed on every path. When both the read and the close fail,
/// the read error wins and the close failure is logged.
pub fn read_bounded<S: MetadataStream>(
    stream: Option<S>,
    limit: u64,
) -> Result<String, MetadataError> {
    let stream = stream.ok_or_else(|| MetadataError::NoInput {
        origin: "stream".to_string(),
        hint: None,
    })?;

    let mut guard = StreamGuard::new(stream);
    let mut capped = CappedReader::new(guard.stream_mut(), limit);
    let mut bytes = Vec::with_capacity(READ_CHUNK);
    let outcome = capped.read_to_end(&mut bytes);
    let exceeded = capped.exceeded();
    let released = guard.release();

    if let Err(e) = outcome {
        if let Err(close_err) = released {
            tracing::warn!(error = %close_err, "failed to close metadata stream after read error");
        }
        return Err(if exceeded {
            MetadataError::SizeLimitExceeded { limit }
        } else {
            MetadataError::ReadFailure(e)
        });
    }
    released.map_err(MetadataError::CloseFailure)?;

    tracing::debug!(bytes = bytes.len(), limit, "read metadata stream");
    String::from_utf8(bytes).map_err(MetadataError::DecodingFailure)
}
