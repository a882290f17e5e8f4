//! Basic `no_std` library for streaming audio into WAV files.
//!
//! Samples are pulled from a [`Streamer`] and written after a canonical
//! 44 byte PCM header. The header carries the data size, so it has to be
//! known up front and is checked once the streamer is drained.
//!
//! Writing a WAV file:
//! ```
//! use wavstream::{Format, Precision, encode};
//! use wavstream::sources::Samples;
//!
//! let num_samples = 48_000;
//! let format = Format::new(48_000, 1, 2, num_samples * 2);
//!
//! // One second of a 440 Hz sine
//! let sine = (0..num_samples).map(|i| {
//!     (i as f32 * 440.0 * 2.0 * core::f32::consts::PI / 48_000.0).sin() * 0.5
//! });
//!
//! let mut bytes: Vec<u8> = vec![];
//! encode(&mut bytes, Samples::new(sine, Precision::Bits16), &format).unwrap();
//!
//! assert_eq!(bytes.len(), 44 + 96_000);
//! ```
//!
//! Writing your own streamer:
//! ```
//! use core::convert::Infallible;
//! use wavstream::{Format, Pulled, Streamer, encode};
//!
//! // 8 bit square wave, `remaining` bytes long
//! struct Square {
//!     n: usize,
//!     remaining: usize,
//! }
//!
//! impl Streamer for Square {
//!     type Error = Infallible;
//!
//!     fn stream(&mut self, buf: &mut [u8]) -> Pulled {
//!         if self.remaining == 0 {
//!             return Pulled::Drained;
//!         }
//!         let len = buf.len().min(self.remaining);
//!         for b in &mut buf[..len] {
//!             *b = if (self.n / 50) % 2 == 0 { 0x40 } else { 0xc0 };
//!             self.n += 1;
//!         }
//!         self.remaining -= len;
//!
//!         if len < buf.len() { Pulled::Last(len) } else { Pulled::More(len) }
//!     }
//! }
//!
//! let format = Format::new(8_000, 1, 1, 100);
//! let mut out: Vec<u8> = vec![];
//! encode(&mut out, Square { n: 0, remaining: 100 }, &format).unwrap();
//! assert_eq!(out[44..94], [0x40; 50]);
//! assert_eq!(out[94..], [0xc0; 50]);
//!
//! // Promising more than the streamer delivers is an error
//! let format = Format::new(8_000, 1, 1, 101);
//! assert!(encode(&mut Vec::<u8>::new(), Square { n: 0, remaining: 100 }, &format).is_err());
//! ```
//!
//! Writing to a file (requires the "std" feature):
//! ```
//! #[cfg(feature = "std")]
//! fn main() {
//!     use wavstream::{Format, Precision, encode_to_file};
//!     use wavstream::sources::Silence;
//!
//!     // Enjoy the silence
//!     let format = Format::new(48_000, 2, 2, 192_000);
//!     let path = std::env::temp_dir().join("silence.wav");
//!     encode_to_file(&path, Silence::new(Precision::Bits16, 192_000), &format).unwrap();
//! }
//!
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod conversion;
mod error;
mod format;
mod header;
pub mod sources;
mod streamer;

#[cfg(feature = "io")]
mod encode;

pub use conversion::IntoPcm;
pub use error::{EncodeError, FormatError, Phase};
pub use format::{Format, Precision, SampleRate};
pub use header::{HEADER_LEN, Header};
pub use streamer::{Pulled, Streamer};

#[cfg(feature = "io")]
pub use encode::{DEFAULT_BUFFER_SIZE, Encoder, asynch, encode};

#[cfg(feature = "std")]
pub use encode::{File, FileError, encode_to_file};
