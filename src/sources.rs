//! Ready made [`Streamer`]s.

use crate::conversion::IntoPcm;
use crate::format::Precision;
use crate::streamer::{Pulled, Streamer};
use core::convert::Infallible;

/// Streams the bytes of a slice as they are
pub struct SliceStreamer<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceStreamer<'a> {
    /// Stream `bytes`, which should already be interleaved PCM data
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl Streamer for SliceStreamer<'_> {
    type Error = Infallible;

    fn stream(&mut self, buf: &mut [u8]) -> Pulled {
        if self.bytes.is_empty() {
            return Pulled::Drained;
        }
        let n = buf.len().min(self.bytes.len());
        let (head, tail) = self.bytes.split_at(n);
        buf[..n].copy_from_slice(head);
        self.bytes = tail;

        if self.bytes.is_empty() && n < buf.len() {
            Pulled::Last(n)
        } else {
            Pulled::More(n)
        }
    }
}

/// A fixed number of bytes of silence
pub struct Silence {
    value: u8,
    remaining: u64,
}

impl Silence {
    /// `len` bytes of silence for samples of the given precision
    ///
    /// ```
    /// use wavstream::{Precision, Pulled, Streamer};
    /// use wavstream::sources::Silence;
    ///
    /// let mut silence = Silence::new(Precision::Bits8, 3);
    /// let mut buf = [0; 4];
    /// assert_eq!(silence.stream(&mut buf), Pulled::Last(3));
    /// assert_eq!(buf, [0x80, 0x80, 0x80, 0x00]);
    /// ```
    pub fn new(precision: Precision, len: u64) -> Self {
        let value = match precision {
            Precision::Bits8 => 0x80,
            Precision::Bits16 => 0x00,
        };
        Self {
            value,
            remaining: len,
        }
    }
}

impl Streamer for Silence {
    type Error = Infallible;

    fn stream(&mut self, buf: &mut [u8]) -> Pulled {
        if self.remaining == 0 {
            return Pulled::Drained;
        }
        let n = (buf.len() as u64).min(self.remaining) as usize;
        buf[..n].fill(self.value);
        self.remaining -= n as u64;

        if self.remaining == 0 && n < buf.len() {
            Pulled::Last(n)
        } else {
            Pulled::More(n)
        }
    }
}

/// Encoded bytes of one sample that did not fit the previous buffer
#[derive(Default)]
struct Pending {
    bytes: [u8; 2],
    pos: usize,
    len: usize,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.pos == self.len
    }

    fn drain_into(&mut self, buf: &mut [u8]) -> usize {
        let n = (self.len - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    fn load<T: IntoPcm>(&mut self, sample: T, precision: Precision) {
        self.len = sample.write_pcm(precision, &mut self.bytes);
        self.pos = 0;
    }
}

/// Fill `buf` from `pending` and `next`, returning the number of bytes
/// written and whether the samples ran out.
fn fill<T, F>(buf: &mut [u8], pending: &mut Pending, precision: Precision, mut next: F) -> (usize, bool)
where
    T: IntoPcm,
    F: FnMut() -> Option<T>,
{
    let mut n = 0;
    while n < buf.len() {
        if pending.is_empty() {
            match next() {
                Some(sample) => pending.load(sample, precision),
                None => return (n, true),
            }
        }
        n += pending.drain_into(&mut buf[n..]);
    }
    (n, false)
}

fn pulled(n: usize, exhausted: bool) -> Pulled {
    match (n, exhausted) {
        (0, true) => Pulled::Drained,
        (n, true) => Pulled::Last(n),
        (n, false) => Pulled::More(n),
    }
}

/// Streams samples from an iterator as PCM bytes
///
/// The iterator yields interleaved samples, one value per channel. A sample
/// that straddles two buffers is split between them.
///
/// ```
/// use wavstream::{Precision, Pulled, Streamer};
/// use wavstream::sources::Samples;
///
/// let mut samples = Samples::new([1i16, -1].into_iter(), Precision::Bits16);
/// let mut buf = [0; 3];
/// assert_eq!(samples.stream(&mut buf), Pulled::More(3));
/// assert_eq!(buf, [0x01, 0x00, 0xff]);
/// assert_eq!(samples.stream(&mut buf), Pulled::Last(1));
/// assert_eq!(buf[0], 0xff);
/// assert_eq!(samples.stream(&mut buf), Pulled::Drained);
/// ```
pub struct Samples<I> {
    samples: I,
    precision: Precision,
    pending: Pending,
    drained: bool,
}

impl<I> Samples<I>
where
    I: Iterator,
    I::Item: IntoPcm,
{
    /// Stream `samples` with the given precision
    pub fn new(samples: I, precision: Precision) -> Self {
        Self {
            samples,
            precision,
            pending: Pending::default(),
            drained: false,
        }
    }
}

impl<I> Streamer for Samples<I>
where
    I: Iterator,
    I::Item: IntoPcm,
{
    type Error = Infallible;

    fn stream(&mut self, buf: &mut [u8]) -> Pulled {
        if self.drained {
            return Pulled::Drained;
        }
        let samples = &mut self.samples;
        let (n, exhausted) = fill(buf, &mut self.pending, self.precision, || samples.next());
        self.drained = exhausted;
        pulled(n, exhausted)
    }
}

/// Streams samples from a fallible iterator as PCM bytes
///
/// Stops at the first `Err`, which is then reported by
/// [`Streamer::err`]. Bytes produced before the error are still handed out.
pub struct TrySamples<I, E> {
    samples: I,
    precision: Precision,
    pending: Pending,
    drained: bool,
    err: Option<E>,
}

impl<I, T, E> TrySamples<I, E>
where
    I: Iterator<Item = Result<T, E>>,
    T: IntoPcm,
{
    /// Stream `samples` with the given precision
    pub fn new(samples: I, precision: Precision) -> Self {
        Self {
            samples,
            precision,
            pending: Pending::default(),
            drained: false,
            err: None,
        }
    }
}

impl<I, T, E> Streamer for TrySamples<I, E>
where
    I: Iterator<Item = Result<T, E>>,
    T: IntoPcm,
    E: Clone,
{
    type Error = E;

    fn stream(&mut self, buf: &mut [u8]) -> Pulled {
        if self.drained {
            return Pulled::Drained;
        }
        let samples = &mut self.samples;
        let err = &mut self.err;
        let (n, exhausted) = fill(buf, &mut self.pending, self.precision, || {
            match samples.next()? {
                Ok(sample) => Some(sample),
                Err(e) => {
                    *err = Some(e);
                    None
                }
            }
        });
        self.drained = exhausted;
        pulled(n, exhausted)
    }

    fn err(&self) -> Option<E> {
        self.err.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn drain<S: Streamer>(mut s: S, chunk: usize) -> (Vec<u8>, S) {
        let mut out = vec![];
        let mut buf = vec![0; chunk];
        loop {
            let pulled = s.stream(&mut buf);
            out.extend_from_slice(&buf[..pulled.bytes()]);
            if pulled.is_drained() {
                break;
            }
        }
        (out, s)
    }

    #[test]
    fn slice_streamer() {
        let bytes = [1, 2, 3, 4, 5];
        let mut s = SliceStreamer::new(&bytes);
        let mut buf = [0; 2];
        assert_eq!(s.stream(&mut buf), Pulled::More(2));
        assert_eq!(s.stream(&mut buf), Pulled::More(2));
        assert_eq!(s.stream(&mut buf), Pulled::Last(1));
        assert_eq!(buf[0], 5);
        assert_eq!(s.stream(&mut buf), Pulled::Drained);
        assert_eq!(s.stream(&mut buf), Pulled::Drained);
    }

    #[test]
    fn slice_streamer_even_split() {
        let bytes = [1, 2, 3, 4];
        let mut s = SliceStreamer::new(&bytes);
        let mut buf = [0; 2];
        assert_eq!(s.stream(&mut buf), Pulled::More(2));
        assert_eq!(s.stream(&mut buf), Pulled::More(2));
        assert_eq!(s.stream(&mut buf), Pulled::Drained);
    }

    #[test]
    fn silence() {
        let (out, _) = drain(Silence::new(Precision::Bits16, 7), 3);
        assert_eq!(out, vec![0; 7]);

        let (out, _) = drain(Silence::new(Precision::Bits8, 5), 2);
        assert_eq!(out, vec![0x80; 5]);

        let mut empty = Silence::new(Precision::Bits8, 0);
        assert_eq!(empty.stream(&mut [0; 4]), Pulled::Drained);
    }

    #[test]
    fn samples_split_across_buffers() {
        let input = [0x0102i16, 0x0304, -2];
        for chunk in 1..8 {
            let (out, _) = drain(Samples::new(input.into_iter(), Precision::Bits16), chunk);
            assert_eq!(out, vec![0x02, 0x01, 0x04, 0x03, 0xfe, 0xff], "chunk {chunk}");
        }
    }

    #[test]
    fn samples_8_bit_from_float() {
        let (out, _) = drain(
            Samples::new([-1.0f32, 0.0, 1.0].into_iter(), Precision::Bits8),
            16,
        );
        assert_eq!(out, vec![0, 127, 255]);
    }

    #[test]
    fn try_samples_reports_error() {
        let input = vec![Ok(1i16), Ok(2), Err("decoder broke"), Ok(3)];
        let (out, s) = drain(TrySamples::new(input.into_iter(), Precision::Bits16), 3);
        assert_eq!(out, vec![0x01, 0x00, 0x02, 0x00]);
        assert_eq!(s.err(), Some("decoder broke"));
        assert_eq!(s.err(), Some("decoder broke"));
    }

    #[test]
    fn try_samples_without_error() {
        let input: Vec<Result<u8, ()>> = vec![Ok(1), Ok(2)];
        let (out, mut s) = drain(TrySamples::new(input.into_iter(), Precision::Bits8), 4);
        assert_eq!(out, vec![1, 2]);
        assert_eq!(s.err(), None);
        assert_eq!(s.stream(&mut [0; 4]), Pulled::Drained);
    }
}
