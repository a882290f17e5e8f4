use crate::error::EncodeError;
use crate::format::Format;
use crate::header::{HEADER_LEN, Header};
use crate::streamer::{Pulled, Streamer};
use alloc::vec;
use alloc::vec::Vec;
use log::{debug, trace, warn};

/// Default size of the buffer between the streamer and the sink
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Buffer the streamer is pulled into and the sink is written from
struct ChunkBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl ChunkBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity.max(1)],
            len: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.len == self.bytes.len()
    }

    fn filled(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    /// Pull once from `streamer` into the spare capacity.
    fn pull<S, W>(&mut self, streamer: &mut S) -> Result<Pulled, EncodeError<W, S::Error>>
    where
        S: Streamer + ?Sized,
    {
        let spare = &mut self.bytes[self.len..];
        let capacity = spare.len();
        let pulled = streamer.stream(spare);

        let reported = pulled.bytes();
        if reported > capacity {
            warn!("wav: streamer reported {reported} bytes for a {capacity} byte buffer");
            return Err(EncodeError::ChunkOverrun { reported, capacity });
        }
        self.len += reported;

        Ok(pulled)
    }
}

fn verify<W, P>(format: &Format, written: u64) -> Result<(), EncodeError<W, P>> {
    let declared = format.data_size();
    if written != declared as u64 {
        warn!("wav: declared {declared} data bytes but the streamer produced {written}");
        return Err(EncodeError::DataSizeMismatch { declared, written });
    }
    debug!("wav: encoded {written} data bytes");
    Ok(())
}

/// Writes wav files from [`Streamer`]s
///
/// ```
/// use wavstream::{Encoder, Format};
/// use wavstream::sources::SliceStreamer;
///
/// let samples = [0x01, 0x00, 0xff, 0xff];
/// let format = Format::new(48_000, 1, 2, samples.len() as u32);
///
/// let mut out: Vec<u8> = vec![];
/// Encoder::new(256)
///     .encode(&mut out, SliceStreamer::new(&samples), &format)
///     .unwrap();
///
/// assert_eq!(out.len(), 44 + samples.len());
/// assert_eq!(&out[44..], &samples);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    buffer_size: usize,
}

impl Encoder {
    /// Encoder that buffers up to `buffer_size` bytes (at least 1) before
    /// writing to the sink.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Size of the buffer between streamer and sink
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Write the header for `format`, then everything `streamer` produces.
    ///
    /// Fails without writing anything if the format is invalid. Once the
    /// streamer is drained the sink is flushed and the number of bytes
    /// produced is compared to `format.data_size()`. On failure the sink may
    /// hold a partial file; nothing is rolled back.
    pub fn encode<W, S>(
        &self,
        mut sink: W,
        mut streamer: S,
        format: &Format,
    ) -> Result<(), EncodeError<W::Error, S::Error>>
    where
        W: embedded_io::Write,
        S: Streamer,
    {
        let header = Header::from_format(format)?;
        sink.write_all(&header.to_bytes())
            .map_err(EncodeError::HeaderWrite)?;
        debug!(
            "wav: wrote {HEADER_LEN} byte header ({} ch, {} Hz, {} bit, {} bytes)",
            header.num_channels, header.sample_rate, header.bits_per_sample, header.data_size
        );

        let mut buffer = ChunkBuffer::new(self.buffer_size);
        let mut written: u64 = 0;
        loop {
            if buffer.is_full() {
                trace!("wav: writing {} buffered bytes", buffer.len);
                if let Err(e) = sink.write_all(buffer.filled()) {
                    warn!("wav: sink rejected samples after {written} bytes");
                    let _ = sink.flush();
                    return Err(EncodeError::SinkWrite(e));
                }
                buffer.clear();
            }

            let pulled = match buffer.pull(&mut streamer) {
                Ok(pulled) => pulled,
                Err(e) => {
                    flush_best_effort(&mut sink, &buffer);
                    return Err(e);
                }
            };
            written += pulled.bytes() as u64;
            if pulled.is_drained() {
                break;
            }
        }

        if let Some(e) = streamer.err() {
            warn!("wav: streamer failed after {written} bytes");
            flush_best_effort(&mut sink, &buffer);
            return Err(EncodeError::Producer(e));
        }

        if let Err(e) = sink.write_all(buffer.filled()) {
            warn!("wav: sink rejected the last {} bytes", buffer.len);
            let _ = sink.flush();
            return Err(EncodeError::SinkWrite(e));
        }
        sink.flush().map_err(EncodeError::SinkWrite)?;

        verify(format, written)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

/// Write whatever is buffered and flush, ignoring errors. Only used when the
/// encode is already failing for another reason.
fn flush_best_effort<W: embedded_io::Write>(sink: &mut W, buffer: &ChunkBuffer) {
    let _ = sink.write_all(buffer.filled());
    let _ = sink.flush();
}

/// Write `format`'s header and everything `streamer` produces to `sink`,
/// using the default buffer size.
///
/// See [`Encoder::encode`].
pub fn encode<W, S>(
    sink: W,
    streamer: S,
    format: &Format,
) -> Result<(), EncodeError<W::Error, S::Error>>
where
    W: embedded_io::Write,
    S: Streamer,
{
    Encoder::default().encode(sink, streamer, format)
}

#[cfg(feature = "std")]
impl Encoder {
    /// Create (or truncate) the file at `path` and encode into it.
    ///
    /// The format is checked before the file is created. Failing to create
    /// the file is reported as [`EncodeError::HeaderWrite`].
    pub fn encode_to_file<S: Streamer>(
        &self,
        path: impl AsRef<std::path::Path>,
        streamer: S,
        format: &Format,
    ) -> Result<(), EncodeError<FileError, S::Error>> {
        Header::from_format(format)?;
        let file =
            std::fs::File::create(path).map_err(|e| EncodeError::HeaderWrite(FileError(e)))?;
        self.encode(File(file), streamer, format)
    }
}

/// Encode into a newly created file at `path` with the default buffer size.
///
/// See [`Encoder::encode_to_file`].
#[cfg(feature = "std")]
pub fn encode_to_file<S: Streamer>(
    path: impl AsRef<std::path::Path>,
    streamer: S,
    format: &Format,
) -> Result<(), EncodeError<FileError, S::Error>> {
    Encoder::default().encode_to_file(path, streamer, format)
}

#[cfg(feature = "std")]
mod file_wrapper {
    use std::fs;
    use std::io::Write;

    /// Wrapper for std::fs::File, used as the sink of [`encode_to_file`](fn@crate::encode_to_file)
    pub struct File(pub fs::File);

    /// I/O error of a file sink
    #[derive(Debug)]
    pub struct FileError(pub std::io::Error);

    impl embedded_io::Error for FileError {
        fn kind(&self) -> embedded_io::ErrorKind {
            embedded_io::ErrorKind::Other
        }
    }

    impl embedded_io::ErrorType for File {
        type Error = FileError;
    }

    impl embedded_io::Write for File {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.0.write(buf).map_err(FileError)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.0.flush().map_err(FileError)
        }
    }
}

#[cfg(feature = "std")]
pub use file_wrapper::{File, FileError};

//-----------------------------------
// MARK: Async

/// Encoding into async sinks
///
/// Streamers are still pulled synchronously; only writes to the sink are
/// awaited.
pub mod asynch {
    use super::*;

    impl Encoder {
        /// Async version of [`Encoder::encode`]
        pub async fn encode_async<W, S>(
            &self,
            mut sink: W,
            mut streamer: S,
            format: &Format,
        ) -> Result<(), EncodeError<W::Error, S::Error>>
        where
            W: embedded_io_async::Write,
            S: Streamer,
        {
            let header = Header::from_format(format)?;
            sink.write_all(&header.to_bytes())
                .await
                .map_err(EncodeError::HeaderWrite)?;
            debug!(
                "wav: wrote {HEADER_LEN} byte header ({} ch, {} Hz, {} bit, {} bytes)",
                header.num_channels, header.sample_rate, header.bits_per_sample, header.data_size
            );

            let mut buffer = ChunkBuffer::new(self.buffer_size);
            let mut written: u64 = 0;
            loop {
                if buffer.is_full() {
                    trace!("wav: writing {} buffered bytes", buffer.len);
                    if let Err(e) = sink.write_all(buffer.filled()).await {
                        warn!("wav: sink rejected samples after {written} bytes");
                        let _ = sink.flush().await;
                        return Err(EncodeError::SinkWrite(e));
                    }
                    buffer.clear();
                }

                let pulled = match buffer.pull(&mut streamer) {
                    Ok(pulled) => pulled,
                    Err(e) => {
                        flush_best_effort(&mut sink, &buffer).await;
                        return Err(e);
                    }
                };
                written += pulled.bytes() as u64;
                if pulled.is_drained() {
                    break;
                }
            }

            if let Some(e) = streamer.err() {
                warn!("wav: streamer failed after {written} bytes");
                flush_best_effort(&mut sink, &buffer).await;
                return Err(EncodeError::Producer(e));
            }

            if let Err(e) = sink.write_all(buffer.filled()).await {
                warn!("wav: sink rejected the last {} bytes", buffer.len);
                let _ = sink.flush().await;
                return Err(EncodeError::SinkWrite(e));
            }
            sink.flush().await.map_err(EncodeError::SinkWrite)?;

            verify(format, written)
        }
    }

    async fn flush_best_effort<W: embedded_io_async::Write>(sink: &mut W, buffer: &ChunkBuffer) {
        let _ = sink.write_all(buffer.filled()).await;
        let _ = sink.flush().await;
    }

    /// Async version of [`encode`](fn@crate::encode)
    pub async fn encode<W, S>(
        sink: W,
        streamer: S,
        format: &Format,
    ) -> Result<(), EncodeError<W::Error, S::Error>>
    where
        W: embedded_io_async::Write,
        S: Streamer,
    {
        Encoder::default().encode_async(sink, streamer, format).await
    }

    #[cfg(feature = "std")]
    mod tokio_file {
        use super::super::FileError;
        use tokio::io::AsyncWriteExt;

        /// Wrapper for tokio::fs::File, used as the sink of [`encode_to_file`](super::encode_to_file)
        pub struct TokioFile(pub tokio::fs::File);

        impl embedded_io_async::ErrorType for TokioFile {
            type Error = FileError;
        }

        impl embedded_io_async::Write for TokioFile {
            async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
                self.0.write(buf).await.map_err(FileError)
            }

            async fn flush(&mut self) -> Result<(), Self::Error> {
                self.0.flush().await.map_err(FileError)
            }
        }
    }

    #[cfg(feature = "std")]
    pub use tokio_file::TokioFile;

    /// Async version of [`encode_to_file`](fn@crate::encode_to_file)
    #[cfg(feature = "std")]
    pub async fn encode_to_file<S: Streamer>(
        path: impl AsRef<std::path::Path>,
        streamer: S,
        format: &Format,
    ) -> Result<(), EncodeError<FileError, S::Error>> {
        Header::from_format(format)?;
        let file = tokio::fs::File::create(path)
            .await
            .map_err(|e| EncodeError::HeaderWrite(FileError(e)))?;
        Encoder::default()
            .encode_async(TokioFile(file), streamer, format)
            .await
    }
}

//-----------------------------------
// MARK: Tests
