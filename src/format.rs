use crate::error::FormatError;
use core::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Number of samples per second
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Duration of `n` samples, truncated to whole nanoseconds.
    ///
    /// ```
    /// use core::time::Duration;
    /// use wavstream::SampleRate;
    ///
    /// assert_eq!(SampleRate(48_000).duration(24_000), Duration::from_millis(500));
    /// ```
    pub fn duration(self, n: u64) -> Duration {
        if self.0 == 0 {
            return Duration::ZERO;
        }
        let nanos = n as u128 * NANOS_PER_SEC / self.0 as u128;
        Duration::new(
            (nanos / NANOS_PER_SEC) as u64,
            (nanos % NANOS_PER_SEC) as u32,
        )
    }

    /// Number of whole samples that fit in `d`, saturating at `u64::MAX`.
    ///
    /// ```
    /// use core::time::Duration;
    /// use wavstream::SampleRate;
    ///
    /// assert_eq!(SampleRate(44_100).sample_count(Duration::from_secs(2)), 88_200);
    /// ```
    pub fn sample_count(self, d: Duration) -> u64 {
        u64::try_from(d.as_nanos() * self.0 as u128 / NANOS_PER_SEC).unwrap_or(u64::MAX)
    }
}

impl From<u32> for SampleRate {
    fn from(rate: u32) -> Self {
        SampleRate(rate)
    }
}

/// Byte width of a single sample in a single channel
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Precision {
    /// 8 bit unsigned samples
    Bits8 = 1,
    /// 16 bit signed little endian samples
    Bits16 = 2,
}

impl Precision {
    /// Bytes per sample
    pub fn bytes(self) -> u16 {
        self as u16
    }

    /// Bits per sample
    pub fn bits(self) -> u16 {
        self.bytes() * 8
    }
}

impl TryFrom<u16> for Precision {
    type Error = FormatError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Precision::Bits8),
            2 => Ok(Precision::Bits16),
            _ => Err(FormatError::UnsupportedPrecision(value)),
        }
    }
}

/// Description of the audio that is going to be encoded
///
/// `data_size` is a promise: the streamer handed to the encoder must produce
/// exactly that many bytes. The encoder writes it into the header before
/// any sample has been produced and checks it once the streamer is drained.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Format {
    sample_rate: u32,
    num_channels: u16,
    precision: u16,
    data_size: u32,
}

impl Format {
    /// Create a new format. Values are only checked when encoding.
    ///
    /// ```
    /// use wavstream::Format;
    ///
    /// let format = Format::new(48_000, 2, 2, 192_000);
    /// assert_eq!(format.frame_width(), 4);
    /// ```
    pub const fn new(sample_rate: u32, num_channels: u16, precision: u16, data_size: u32) -> Self {
        Format {
            sample_rate,
            num_channels,
            precision,
            data_size,
        }
    }

    /// Samples per second
    pub fn sample_rate(&self) -> SampleRate {
        SampleRate(self.sample_rate)
    }

    /// Number of interleaved channels, 1 is mono and 2 is stereo
    pub fn num_channels(&self) -> u16 {
        self.num_channels
    }

    /// Bytes used for one sample of one channel
    pub fn precision(&self) -> u16 {
        self.precision
    }

    /// Declared number of sample data bytes
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Bytes per frame (one sample in every channel)
    pub fn frame_width(&self) -> u32 {
        self.num_channels as u32 * self.precision as u32
    }

    /// Check that the format can be written as a canonical PCM header.
    pub fn validate(&self) -> Result<Precision, FormatError> {
        if self.num_channels < 1 {
            return Err(FormatError::InvalidChannelCount(self.num_channels));
        }
        let precision = Precision::try_from(self.precision)?;
        if self.sample_rate == 0 {
            return Err(FormatError::InvalidSampleRate(self.sample_rate));
        }
        if self.data_size > i32::MAX as u32 - crate::HEADER_LEN as u32 {
            return Err(FormatError::DataSizeTooLarge(self.data_size));
        }
        if self.frame_width() > u16::MAX as u32 {
            return Err(FormatError::BlockAlignOverflow);
        }
        self.sample_rate
            .checked_mul(self.frame_width())
            .ok_or(FormatError::ByteRateOverflow)?;

        Ok(precision)
    }
}
