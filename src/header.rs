use crate::error::FormatError;
use crate::format::Format;

/// Size of the canonical PCM wav header in bytes
pub const HEADER_LEN: usize = 44;

/// Canonical 44 byte PCM wav header
///
/// Built once from a [`Format`] and serialized in one go with
/// [`Header::to_bytes`]. For the layout see [`here`].
///
/// [`here`]: http://soundfile.sapp.org/doc/WaveFormat/
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    /// Declared data size plus the header length
    pub file_size: i32,
    /// Always 16 for PCM
    pub format_size: u32,
    /// Always 1, linear PCM
    pub format_type: u16,
    /// Number of interleaved channels
    pub num_channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// Bytes per second
    pub byte_rate: u32,
    /// Bytes per frame
    pub block_align: u16,
    /// Bits per sample of one channel
    pub bits_per_sample: u16,
    /// Declared number of sample data bytes
    pub data_size: u32,
}

impl Header {
    /// Validate `format` and derive the header fields from it.
    pub fn from_format(format: &Format) -> Result<Self, FormatError> {
        let precision = format.validate()?;
        let block_align = format.num_channels() * precision.bytes();

        Ok(Header {
            file_size: (format.data_size() + HEADER_LEN as u32) as i32,
            format_size: 16,
            format_type: 1,
            num_channels: format.num_channels(),
            sample_rate: format.sample_rate().0,
            byte_rate: format.sample_rate().0 * block_align as u32,
            block_align,
            bits_per_sample: precision.bits(),
            data_size: format.data_size(),
        })
    }

    /// Serialize the header, all fields little endian.
    ///
    /// ```
    /// use wavstream::{Format, Header};
    ///
    /// let header = Header::from_format(&Format::new(48_000, 2, 2, 8)).unwrap();
    ///
    /// let bytes: [u8; 44] = [
    ///     0x52, 0x49, 0x46, 0x46, // RIFF
    ///     0x34, 0x00, 0x00, 0x00, // file size
    ///     0x57, 0x41, 0x56, 0x45, // WAVE
    ///     0x66, 0x6d, 0x74, 0x20, // fmt_
    ///     0x10, 0x00, 0x00, 0x00, // chunk size
    ///     0x01, 0x00, // audio format
    ///     0x02, 0x00, // num channels
    ///     0x80, 0xbb, 0x00, 0x00, // sample rate
    ///     0x00, 0xee, 0x02, 0x00, // byte rate
    ///     0x04, 0x00, // block align
    ///     0x10, 0x00, // bits per sample
    ///     0x64, 0x61, 0x74, 0x61, // data
    ///     0x08, 0x00, 0x00, 0x00, // data size
    /// ];
    ///
    /// assert_eq!(header.to_bytes(), bytes);
    /// ```
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let fs = self.file_size.to_le_bytes();
        let cs = self.format_size.to_le_bytes();
        let af = self.format_type.to_le_bytes();
        let nc = self.num_channels.to_le_bytes();
        let sr = self.sample_rate.to_le_bytes();
        let br = self.byte_rate.to_le_bytes();
        let ba = self.block_align.to_le_bytes();
        let bd = self.bits_per_sample.to_le_bytes();
        let ds = self.data_size.to_le_bytes();

        [
            b'R', b'I', b'F', b'F', // RIFF
            fs[0], fs[1], fs[2], fs[3], // file size
            b'W', b'A', b'V', b'E', // WAVE
            b'f', b'm', b't', b' ', // fmt_
            cs[0], cs[1], cs[2], cs[3], // chunk size
            af[0], af[1], // audio format
            nc[0], nc[1], // num channels
            sr[0], sr[1], sr[2], sr[3], // sample rate
            br[0], br[1], br[2], br[3], // byte rate
            ba[0], ba[1], // block align
            bd[0], bd[1], // bits per sample
            b'd', b'a', b't', b'a', // data
            ds[0], ds[1], ds[2], ds[3], // data size
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_8_bit() {
        let header = Header::from_format(&Format::new(8_000, 1, 1, 100)).unwrap();

        let bytes: [u8; 44] = [
            0x52, 0x49, 0x46, 0x46, // RIFF
            0x90, 0x00, 0x00, 0x00, // file size
            0x57, 0x41, 0x56, 0x45, // WAVE
            0x66, 0x6d, 0x74, 0x20, // fmt_
            0x10, 0x00, 0x00, 0x00, // chunk size
            0x01, 0x00, // audio format
            0x01, 0x00, // num channels
            0x40, 0x1f, 0x00, 0x00, // sample rate
            0x40, 0x1f, 0x00, 0x00, // byte rate
            0x01, 0x00, // block align
            0x08, 0x00, // bits per sample
            0x64, 0x61, 0x74, 0x61, // data
            0x64, 0x00, 0x00, 0x00, // data size
        ];

        assert_eq!(header.to_bytes(), bytes);
    }

    #[test]
    fn stereo_16_bit_empty() {
        let header = Header::from_format(&Format::new(44_100, 2, 2, 0)).unwrap();

        let bytes: [u8; 44] = [
            0x52, 0x49, 0x46, 0x46, // RIFF
            0x2c, 0x00, 0x00, 0x00, // file size
            0x57, 0x41, 0x56, 0x45, // WAVE
            0x66, 0x6d, 0x74, 0x20, // fmt_
            0x10, 0x00, 0x00, 0x00, // chunk size
            0x01, 0x00, // audio format
            0x02, 0x00, // num channels
            0x44, 0xac, 0x00, 0x00, // sample rate
            0x10, 0xb1, 0x02, 0x00, // byte rate
            0x04, 0x00, // block align
            0x10, 0x00, // bits per sample
            0x64, 0x61, 0x74, 0x61, // data
            0x00, 0x00, 0x00, 0x00, // data size
        ];

        assert_eq!(header.to_bytes(), bytes);
    }

    #[test]
    fn high_sample_rate_multichannel() {
        // 192kHz, 6 channels, 16 bit
        let header = Header::from_format(&Format::new(192_000, 6, 2, 0x0001_2345)).unwrap();

        assert_eq!(header.file_size, 0x0001_2345 + 44);
        assert_eq!(header.byte_rate, 2_304_000);
        assert_eq!(header.block_align, 12);

        let bytes: [u8; 44] = [
            0x52, 0x49, 0x46, 0x46, // RIFF
            0x71, 0x23, 0x01, 0x00, // file size
            0x57, 0x41, 0x56, 0x45, // WAVE
            0x66, 0x6d, 0x74, 0x20, // fmt_
            0x10, 0x00, 0x00, 0x00, // chunk size
            0x01, 0x00, // audio format
            0x06, 0x00, // num channels
            0x00, 0xee, 0x02, 0x00, // sample rate
            0x00, 0x28, 0x23, 0x00, // byte rate
            0x0c, 0x00, // block align
            0x10, 0x00, // bits per sample
            0x64, 0x61, 0x74, 0x61, // data
            0x45, 0x23, 0x01, 0x00, // data size
        ];

        assert_eq!(header.to_bytes(), bytes);
    }

    #[test]
    fn rejects_invalid_formats() {
        assert_eq!(
            Header::from_format(&Format::new(48_000, 0, 2, 0)),
            Err(FormatError::InvalidChannelCount(0))
        );
        assert_eq!(
            Header::from_format(&Format::new(48_000, 2, 3, 0)),
            Err(FormatError::UnsupportedPrecision(3))
        );
    }
}
