//! Berlekamp-Welch error detection and correction
//!
//! `correct` first runs a cheap syndrome check over every byte column;
//! only columns with a non-zero syndrome pay for the full error-locator
//! solve. The locator recovers the codeword polynomial while tolerating
//! up to floor((r - k) / 2) wrong shares per column, then every supplied
//! share is patched at that column from the re-evaluated codeword.

use log::debug;

use crate::codec::{Fec, Share};
use crate::error::{FecError, Result};
use crate::galois::{dot, Gf8};
use crate::matrix::GfMat;
use crate::poly::GfPoly;
use crate::scalar::addmul_row;

/// Evaluation point assigned to a share number
///
/// Share 0 maps to 0 and share j to 2^(j-1); the encoder matrix is
/// constructed so that systematic encoding agrees with polynomial
/// evaluation on this domain.
fn eval_point(num: usize) -> Gf8 {
    if num == 0 {
        Gf8::ZERO
    } else {
        Gf8::GENERATOR.pow(num - 1)
    }
}

impl Fec {
    /// Detect and repair corrupted shares in place
    ///
    /// Requires at least k shares of equal length. Shares are sorted by
    /// number and their bytes are overwritten at every column where
    /// corruption is detected. On error the shares may be left partially
    /// corrected and must be treated as invalid.
    pub fn correct(&self, shares: &mut [Share]) -> Result<()> {
        if shares.len() < self.k {
            return Err(FecError::InvalidArgument(
                "must specify at least the number of required shares".into(),
            ));
        }

        shares.sort_unstable_by_key(|s| s.num);

        let share_size = shares[0].data.len();
        if shares.iter().any(|s| s.data.len() != share_size) {
            return Err(FecError::InvalidArgument(
                "shares must all be the same length".into(),
            ));
        }

        // fast path: check for the absence of errors by evaluating the
        // shares against the syndrome matrix
        let synd = self.syndrome_matrix(shares)?;
        let mut buf = vec![0u8; share_size];

        for i in 0..synd.rows() {
            buf.fill(0);

            for j in 0..synd.cols() {
                addmul_row(&mut buf, &shares[j].data, synd.get(i, j).value());
            }

            for col in 0..share_size {
                if buf[col] == 0 {
                    continue;
                }
                debug!("non-zero syndrome at column {col}, solving for the error locator");
                let corrected = self.berlekamp_welch(shares, col)?;
                for share in shares.iter_mut() {
                    share.data[col] = corrected[share.num];
                }
            }
        }

        Ok(())
    }

    /// Solve for the codeword bytes of one column across all n shares
    ///
    /// Returns a vector of length n holding the corrected byte at
    /// `index` for every share number, tolerating up to
    /// floor((r - k) / 2) errors among the supplied shares.
    pub(crate) fn berlekamp_welch(&self, shares: &[Share], index: usize) -> Result<Vec<u8>> {
        let r = shares.len(); // required + redundancy size
        let e = (r - self.k) / 2; // deg of E polynomial
        let q = e + self.k; // deg of Q polynomial

        if e == 0 {
            return Err(FecError::NotEnoughShares);
        }

        let dim = q + e;

        // build the system of equations s * u = f
        let mut s = GfMat::new(dim, dim); // constraint matrix
        let mut a = GfMat::new(dim, dim); // augmented matrix
        let mut f = vec![0u8; dim]; // constant column vector
        let mut u = vec![0u8; dim]; // solution vector

        for i in 0..dim {
            let x_i = eval_point(shares[i].num);
            let r_i = Gf8::new(shares[i].data[index]);
            f[i] = (x_i.pow(e) * r_i).value();

            for j in 0..q {
                s.set(i, j, x_i.pow(j));
                if i == j {
                    a.set(i, j, Gf8::ONE);
                }
            }

            for l in 0..e {
                let j = l + q;
                s.set(i, j, x_i.pow(l) * r_i);
                if i == j {
                    a.set(i, j, Gf8::ONE);
                }
            }
        }

        // invert and put the result in a
        s.invert_with(&mut a)?;

        // multiply the inverted matrix by the column vector
        for i in 0..dim {
            u[i] = dot(a.row(i), &f).value();
        }

        // reverse u for easier construction of the polynomials
        u.reverse();

        let q_poly = GfPoly::from(&u[e..]);
        let mut e_coeffs = Vec::with_capacity(e + 1);
        e_coeffs.push(1u8);
        e_coeffs.extend_from_slice(&u[..e]);
        let e_poly = GfPoly::from(e_coeffs);

        let (p_poly, rem) = q_poly.div(&e_poly)?;
        if !rem.is_zero() {
            return Err(FecError::TooManyErrors);
        }

        let mut out = vec![0u8; self.n];
        for (i, out_byte) in out.iter_mut().enumerate() {
            *out_byte = p_poly.eval(eval_point(i)).value();
        }

        Ok(out)
    }

    /// Parity form of the Vandermonde matrix restricted to present shares
    ///
    /// Rows of the result annihilate any valid codeword, so a non-zero
    /// product against the share data flags a corrupted column.
    fn syndrome_matrix(&self, shares: &[Share]) -> Result<GfMat> {
        // figure out which share numbers are present
        let mut keepers = vec![false; self.n];
        let mut share_count = 0;
        for share in shares {
            if share.num >= self.n {
                return Err(FecError::InvalidArgument(format!(
                    "invalid share id: {}",
                    share.num
                )));
            }
            if !keepers[share.num] {
                keepers[share.num] = true;
                share_count += 1;
            }
        }

        // create a vandermonde matrix but skip columns where the share
        // is missing
        let mut out = GfMat::new(self.k, share_count);
        for i in 0..self.k {
            let mut skipped = 0;
            for j in 0..self.n {
                if !keepers[j] {
                    skipped += 1;
                    continue;
                }
                out.set(i, j - skipped, Gf8::new(self.vand_matrix[i * self.n + j]));
            }
        }

        // standardize the output and convert into parity form
        out.standardize()?;
        Ok(out.parity())
    }
}
