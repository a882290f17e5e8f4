use crate::format::Precision;

/// Trait for converting sample values into PCM bytes
pub trait IntoPcm: Copy {
    /// Convert to an unsigned 8 bit sample, silence is 128
    fn to_u8(self) -> u8;
    /// Convert to a signed 16 bit sample
    fn to_i16(self) -> i16;

    /// Write the sample as `precision` little endian bytes into `out`,
    /// returning how many bytes were used.
    fn write_pcm(self, precision: Precision, out: &mut [u8; 2]) -> usize {
        match precision {
            Precision::Bits8 => {
                out[0] = self.to_u8();
                1
            }
            Precision::Bits16 => {
                *out = self.to_i16().to_le_bytes();
                2
            }
        }
    }
}

impl IntoPcm for f32 {
    fn to_u8(self) -> u8 {
        ((self + 1.0) * 127.5).clamp(0.0, 255.0) as u8
    }
    fn to_i16(self) -> i16 {
        (self * 32767.5).clamp(-32768.0, 32767.0) as i16
    }
}

impl IntoPcm for f64 {
    fn to_u8(self) -> u8 {
        ((self + 1.0) * 127.5).clamp(0.0, 255.0) as u8
    }
    fn to_i16(self) -> i16 {
        (self * 32767.5).clamp(-32768.0, 32767.0) as i16
    }
}

impl IntoPcm for u8 {
    fn to_u8(self) -> u8 {
        self
    }
    fn to_i16(self) -> i16 {
        (self as i16 - 128) << 8
    }
}

impl IntoPcm for i16 {
    fn to_u8(self) -> u8 {
        ((self >> 8) + 128) as u8
    }
    fn to_i16(self) -> i16 {
        self
    }
}
