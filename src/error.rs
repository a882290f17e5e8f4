use core::fmt;

/// Reasons a [`Format`](crate::Format) can't be encoded
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormatError {
    /// Channel count is less than 1
    InvalidChannelCount(u16),
    /// Precision is neither 1 nor 2 bytes
    UnsupportedPrecision(u16),
    /// Sample rate is zero
    InvalidSampleRate(u32),
    /// Declared data size does not fit the signed 32 bit file size field
    DataSizeTooLarge(u32),
    /// `num_channels * precision` does not fit in 16 bits
    BlockAlignOverflow,
    /// `sample_rate * num_channels * precision` does not fit in 32 bits
    ByteRateOverflow,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidChannelCount(n) => {
                write!(f, "invalid number of channels ({n}), at least 1 is required")
            }
            FormatError::UnsupportedPrecision(p) => {
                write!(f, "unsupported precision ({p}), 1 or 2 is supported")
            }
            FormatError::InvalidSampleRate(r) => write!(f, "invalid sample rate ({r})"),
            FormatError::DataSizeTooLarge(n) => {
                write!(f, "data size ({n}) does not fit in a wav header")
            }
            FormatError::BlockAlignOverflow => {
                write!(f, "block align does not fit in a wav header")
            }
            FormatError::ByteRateOverflow => write!(f, "byte rate does not fit in a wav header"),
        }
    }
}

impl core::error::Error for FormatError {}

/// The stage of an encode in which an [`EncodeError`] happened
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    /// Checking the format, before anything is written
    Validation,
    /// Writing the 44 byte header
    Header,
    /// Pulling samples and writing them to the sink
    Streaming,
    /// Comparing the written byte count against the declared data size
    Verification,
}

/// Error returned by the encoder
///
/// `W` is the error type of the sink, `P` the error type of the streamer.
#[derive(Debug, PartialEq)]
pub enum EncodeError<W, P> {
    /// The format was rejected, nothing has been written
    InvalidFormat(FormatError),
    /// The sink rejected the header
    HeaderWrite(W),
    /// The streamer reported an error after it stopped producing
    Producer(P),
    /// The sink rejected sample data
    SinkWrite(W),
    /// The streamer claimed to have produced more bytes than it was offered
    ChunkOverrun {
        /// Length reported by the streamer
        reported: usize,
        /// Length of the buffer handed to the streamer
        capacity: usize,
    },
    /// The number of bytes produced differs from the declared data size
    DataSizeMismatch {
        /// `data_size` of the format
        declared: u32,
        /// Bytes actually written after the header
        written: u64,
    },
}

impl<W, P> EncodeError<W, P> {
    /// The stage of the encode that failed
    pub fn phase(&self) -> Phase {
        match self {
            EncodeError::InvalidFormat(_) => Phase::Validation,
            EncodeError::HeaderWrite(_) => Phase::Header,
            EncodeError::Producer(_)
            | EncodeError::SinkWrite(_)
            | EncodeError::ChunkOverrun { .. } => Phase::Streaming,
            EncodeError::DataSizeMismatch { .. } => Phase::Verification,
        }
    }
}

impl<W, P> From<FormatError> for EncodeError<W, P> {
    fn from(e: FormatError) -> Self {
        EncodeError::InvalidFormat(e)
    }
}

impl<W: fmt::Debug, P: fmt::Debug> fmt::Display for EncodeError<W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidFormat(e) => write!(f, "wav: {e}"),
            EncodeError::HeaderWrite(e) => write!(f, "wav: failed writing header: {e:?}"),
            EncodeError::Producer(e) => write!(f, "wav: streamer failed: {e:?}"),
            EncodeError::SinkWrite(e) => write!(f, "wav: failed writing samples: {e:?}"),
            EncodeError::ChunkOverrun { reported, capacity } => write!(
                f,
                "wav: streamer reported {reported} bytes for a {capacity} byte buffer"
            ),
            EncodeError::DataSizeMismatch { declared, written } => write!(
                f,
                "wav: format data size ({declared}) does not match actual written bytes ({written})"
            ),
        }
    }
}

impl<W: fmt::Debug, P: fmt::Debug> core::error::Error for EncodeError<W, P> {}
