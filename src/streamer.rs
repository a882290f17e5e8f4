/// Outcome of a single [`Streamer::stream`] call
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pulled {
    /// The whole buffer was filled, more bytes may follow
    More(usize),
    /// This many bytes were written and the streamer is now drained
    Last(usize),
    /// Nothing was written and nothing ever will be
    Drained,
}

impl Pulled {
    /// Number of bytes written into the buffer
    pub fn bytes(self) -> usize {
        match self {
            Pulled::More(n) | Pulled::Last(n) => n,
            Pulled::Drained => 0,
        }
    }

    /// Whether the streamer is drained after this call
    ///
    /// `More(0)` counts as drained: a streamer offered a non-empty buffer
    /// that produces nothing has nothing left to give.
    pub fn is_drained(self) -> bool {
        !matches!(self, Pulled::More(n) if n > 0)
    }
}

/// A finite or infinite source of interleaved sample bytes.
///
/// The encoder pulls from a streamer, it never pushes. There are 3 valid
/// return patterns of [`Streamer::stream`]:
///
/// 1. `More(n)` with `n == buf.len()`
///
///    All of the requested bytes were produced. Any pattern may follow.
///
/// 2. `Last(n)` with `n <= buf.len()`
///
///    `n` bytes were produced and the streamer is drained. Only `Drained`
///    may follow.
///
/// 3. `Drained`
///
///    Nothing was produced and nothing more will come. Only `Drained` may
///    follow.
///
/// When an error occurs the streamer becomes drained and reports the
/// error through [`Streamer::err`]. This keeps the pull loop down to one
/// termination check; the error is looked at once, after the loop.
pub trait Streamer {
    /// Error reported by [`Streamer::err`]
    type Error;

    /// Copy at most `buf.len()` next bytes into `buf`.
    ///
    /// Must not touch anything outside `buf[..n]`. Bytes are interleaved
    /// samples in the byte layout of the format being encoded.
    fn stream(&mut self, buf: &mut [u8]) -> Pulled;

    /// The error that drained the streamer, if any.
    ///
    /// Has no side effects; asking twice gives the same answer.
    fn err(&self) -> Option<Self::Error> {
        None
    }
}

impl<S: Streamer + ?Sized> Streamer for &mut S {
    type Error = S::Error;

    fn stream(&mut self, buf: &mut [u8]) -> Pulled {
        (**self).stream(buf)
    }

    fn err(&self) -> Option<Self::Error> {
        (**self).err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulled_bytes() {
        assert_eq!(Pulled::More(4).bytes(), 4);
        assert_eq!(Pulled::Last(3).bytes(), 3);
        assert_eq!(Pulled::Drained.bytes(), 0);
    }

    #[test]
    fn pulled_drained() {
        assert!(!Pulled::More(1).is_drained());
        assert!(Pulled::More(0).is_drained());
        assert!(Pulled::Last(5).is_drained());
        assert!(Pulled::Last(0).is_drained());
        assert!(Pulled::Drained.is_drained());
    }
}
