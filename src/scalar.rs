//! Scalar Galois field row operations
//!
//! This module provides the baseline scalar implementation of the GF(2^8)
//! multiply-accumulate row primitive `z[i] ^= y * x[i]`, the single inner
//! loop everything in the codec leans on. SIMD implementations (in the
//! `simd` module) build on top of it and must stay byte-exact with it.

use crate::galois::mul_table;
use crate::simd;

/// Rows shorter than this go straight to the scalar loop; setting up the
/// nibble tables and entering a vector kernel costs more than it saves.
const SIMD_THRESHOLD: usize = 64;

/// Multiply-accumulate a row: `z[i] ^= y * x[i]` over the common prefix
///
/// Dispatches to the best available vector kernel for long rows and falls
/// back to [`addmul_row_scalar`] otherwise. The two are interchangeable
/// byte for byte.
pub fn addmul_row(z: &mut [u8], x: &[u8], y: u8) {
    if y == 0 {
        return;
    }

    let len = z.len().min(x.len());
    if len >= SIMD_THRESHOLD && simd::addmul_row_simd(&mut z[..len], &x[..len], y) {
        return;
    }

    addmul_row_scalar(z, x, y);
}

/// Scalar reference implementation of the row primitive
pub fn addmul_row_scalar(z: &mut [u8], x: &[u8], y: u8) {
    let row = &mul_table()[y as usize];
    for (zi, &xi) in z.iter_mut().zip(x.iter()) {
        *zi ^= row[xi as usize];
    }
}
