//! Systematic Reed-Solomon forward error correction over GF(2^8)
//!
//! A `Fec` configured with k required and n total pieces encodes an input
//! whose length is a multiple of k into n shares of `len / k` bytes each.
//! Any k uncorrupted shares rebuild the input, and with more than k shares
//! available the Berlekamp-Welch corrector detects and repairs byte-level
//! corruption, up to floor((available - k) / 2) bad shares per byte
//! column.
//!
//! ```
//! use rsfec::{Fec, Share};
//!
//! let fec = Fec::new(2, 4).unwrap();
//!
//! let mut shares = Vec::new();
//! fec.encode(&[1, 2, 3, 4], |num, data| {
//!     shares.push(Share::new(num, data.to_vec()));
//! })
//! .unwrap();
//!
//! // any two shares recover the input, even the parity-only pair
//! let mut shares = shares.split_off(2);
//! let mut recovered = vec![0u8; 4];
//! let written = fec.decode(&mut shares, &mut recovered).unwrap();
//! assert_eq!(&recovered[..written], &[1, 2, 3, 4]);
//! ```

pub mod codec;
mod correction;
pub mod error;
pub mod galois;
pub mod matrix;
pub mod poly;
pub mod scalar;
pub mod simd;

pub use codec::{Fec, Share};
pub use error::{FecError, Result};
