//! Systematic Reed-Solomon encoder and rebuilder
//!
//! A `Fec` built with (k, n) turns an input of k equal blocks into n
//! shares: the first k are verbatim slices of the input, the remaining
//! n - k are parity rows of the encoder matrix. Any k error-free shares
//! reconstruct the original blocks through `rebuild`; `decode` layers the
//! Berlekamp-Welch corrector on top for inputs that may be corrupted.

use log::debug;

use crate::error::{FecError, Result};
use crate::galois::{mul_table, tables};
use crate::matrix::{create_inverted_vdm, invert_matrix};
use crate::scalar::addmul_row;

/// Largest supported value for both k and n
const BYTE_MAX: usize = 256;

/// One encoded piece: a share number and its data
///
/// Shares numbered below k are primary (they carry original data); the
/// rest are parity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Share {
    pub num: usize,
    pub data: Vec<u8>,
}

impl Share {
    pub fn new(num: usize, data: Vec<u8>) -> Self {
        Self { num, data }
    }
}

/// Reed-Solomon forward error correction code with k required pieces out
/// of n total
///
/// Encoding data generates n pieces, and decoding requires k uncorrupted
/// pieces. If more than k pieces are available during decode, corrupted
/// data can be detected and recovered from.
#[derive(Debug, Clone)]
pub struct Fec {
    pub(crate) k: usize,
    pub(crate) n: usize,
    pub(crate) enc_matrix: Vec<u8>,
    pub(crate) vand_matrix: Vec<u8>,
}

impl Fec {
    /// Create a code with k required pieces and n total pieces,
    /// 1 <= k <= n <= 256
    pub fn new(k: usize, n: usize) -> Result<Self> {
        if k < 1 || n < 1 || k > BYTE_MAX || n > BYTE_MAX || k > n {
            return Err(FecError::Domain("requires 1 <= k <= n <= 256".into()));
        }

        let t = tables();
        let mul = mul_table();

        // the encoder's precursor: inverted Vandermonde on top, the raw
        // Vandermonde rows below
        let mut temp_matrix = vec![0u8; n * k];
        create_inverted_vdm(&mut temp_matrix, k)?;
        for i in (k * k)..(n * k) {
            temp_matrix[i] = t.exp[((i / k) * (i % k)) % 255];
        }

        // systematic encoder: identity on top, the product of the bottom
        // block with the inverted Vandermonde below
        let mut enc_matrix = vec![0u8; n * k];
        for i in 0..k {
            enc_matrix[i * (k + 1)] = 1;
        }
        for row in k..n {
            for col in 0..k {
                let mut acc = 0u8;
                for i in 0..k {
                    acc ^= mul[temp_matrix[row * k + i] as usize]
                        [temp_matrix[i * k + col] as usize];
                }
                enc_matrix[row * k + col] = acc;
            }
        }

        // vand_matrix has more columns than rows: k rows, n columns.
        // Column j is the power column of share j's evaluation point, so
        // column 0 is (1, 0, ..) and column j >= 1 holds (2^(j-1))^row.
        let mut vand_matrix = vec![0u8; k * n];
        vand_matrix[0] = 1;
        let mut g = 1u8;
        for row in 0..k {
            let mut a = 1u8;
            for col in 1..n {
                vand_matrix[row * n + col] = a;
                a = mul[g as usize][a as usize];
            }
            g = mul[2][g as usize];
        }

        Ok(Self {
            k,
            n,
            enc_matrix,
            vand_matrix,
        })
    }

    /// Number of pieces required for reconstruction: the k value
    pub fn required(&self) -> usize {
        self.k
    }

    /// Number of total pieces generated during encoding: the n value
    pub fn total(&self) -> usize {
        self.n
    }

    /// Encode input data into n shares, invoking `output` once per share
    ///
    /// The input length must be a multiple of k; padding to that multiple
    /// is up to the caller. The byte slice handed to `output` may be
    /// reused when the callback returns.
    pub fn encode<F>(&self, input: &[u8], mut output: F) -> Result<()>
    where
        F: FnMut(usize, &[u8]),
    {
        if input.len() % self.k != 0 {
            return Err(FecError::InvalidArgument(
                "input length must be a multiple of k".into(),
            ));
        }
        let block_size = input.len() / self.k;

        for i in 0..self.k {
            output(i, &input[i * block_size..(i + 1) * block_size]);
        }

        let mut fec_buf = vec![0u8; block_size];
        for i in self.k..self.n {
            fec_buf.fill(0);

            for j in 0..self.k {
                addmul_row(
                    &mut fec_buf,
                    &input[j * block_size..(j + 1) * block_size],
                    self.enc_matrix[i * self.k + j],
                );
            }

            output(i, &fec_buf);
        }

        Ok(())
    }

    /// Encode only the share numbered `num` into `output`
    ///
    /// The input length must be a multiple of k, `output` must be exactly
    /// `input.len() / k` bytes, and `num` must be below n.
    pub fn encode_single(&self, num: usize, input: &[u8], output: &mut [u8]) -> Result<()> {
        if num >= self.n {
            return Err(FecError::InvalidArgument("num must be less than n".into()));
        }
        if input.len() % self.k != 0 {
            return Err(FecError::InvalidArgument(
                "input length must be a multiple of k".into(),
            ));
        }
        let block_size = input.len() / self.k;

        if output.len() != block_size {
            return Err(FecError::InvalidArgument(format!(
                "output length must be equal to {block_size}"
            )));
        }

        if num < self.k {
            output.copy_from_slice(&input[num * block_size..(num + 1) * block_size]);
            return Ok(());
        }

        output.fill(0);
        for i in 0..self.k {
            addmul_row(
                output,
                &input[i * block_size..(i + 1) * block_size],
                self.enc_matrix[num * self.k + i],
            );
        }

        Ok(())
    }

    /// Reconstruct the k original data pieces from any k error-free shares
    ///
    /// `output` is called k times with 1/k of the original data each time
    /// and the index of that data piece, not necessarily in piece order.
    /// The byte slice handed to `output` may be reused when the callback
    /// returns.
    ///
    /// Rebuild assumes `correct` has already run, or was not needed.
    pub fn rebuild<F>(&self, shares: &mut [Share], mut output: F) -> Result<()>
    where
        F: FnMut(usize, &[u8]),
    {
        let k = self.k;
        if shares.len() < k {
            return Err(FecError::NotEnoughShares);
        }

        shares.sort_unstable_by_key(|s| s.num);
        let share_size = shares[0].data.len();

        let mut m_dec = vec![0u8; k * k];
        let mut indexes = vec![0usize; k];
        let mut basis = vec![0usize; k];

        // two cursors: primaries are taken from the front when their
        // number matches the slot, parity shares from the back otherwise
        let mut b_iter = 0usize;
        let mut e_iter = shares.len() - 1;

        for i in 0..k {
            let pos = if shares[b_iter].num == i {
                b_iter += 1;
                b_iter - 1
            } else {
                let pos = e_iter;
                // wraps only on a final back-side pick, never read after
                e_iter = e_iter.wrapping_sub(1);
                pos
            };

            let share_num = shares[pos].num;
            if share_num >= self.n {
                return Err(FecError::InvalidArgument(format!(
                    "invalid share id: {share_num}"
                )));
            }

            if share_num < k {
                m_dec[i * (k + 1)] = 1;
                output(share_num, &shares[pos].data);
            } else {
                m_dec[i * k..(i + 1) * k]
                    .copy_from_slice(&self.enc_matrix[share_num * k..(share_num + 1) * k]);
            }

            basis[i] = pos;
            indexes[i] = share_num;
        }

        let missing = indexes.iter().filter(|&&num| num >= k).count();
        if missing == 0 {
            return Ok(());
        }

        debug!("rebuilding {missing} data pieces from parity shares");
        invert_matrix(&mut m_dec, k)?;

        let mut buf = vec![0u8; share_size];
        for i in 0..k {
            if indexes[i] >= k {
                buf.fill(0);

                for col in 0..k {
                    addmul_row(&mut buf, &shares[basis[col]].data, m_dec[i * k + col]);
                }

                output(i, &buf);
            }
        }

        Ok(())
    }

    /// Correct shares, rebuild, and concatenate the data into `dst`
    ///
    /// Shares are corrected (mutated and reordered) first; the return
    /// value is the number of bytes written to `dst`. When the data is
    /// known to be error-free, `rebuild` is faster.
    pub fn decode(&self, shares: &mut [Share], dst: &mut [u8]) -> Result<usize> {
        self.correct(shares)?;

        if shares.is_empty() {
            return Err(FecError::InvalidArgument(
                "must specify at least one share".into(),
            ));
        }
        let piece_len = shares[0].data.len();
        let result_len = piece_len * self.k;
        if dst.len() < result_len {
            return Err(FecError::InvalidArgument(format!(
                "dst buffer must have at least {result_len} bytes available"
            )));
        }

        self.rebuild(shares, |num, output| {
            dst[num * piece_len..num * piece_len + output.len()].copy_from_slice(output);
        })?;

        Ok(result_len)
    }

    /// Correct shares in place, then rebuild through the callback
    pub fn decode_to<F>(&self, shares: &mut [Share], output: F) -> Result<()>
    where
        F: FnMut(usize, &[u8]),
    {
        self.correct(shares)?;
        self.rebuild(shares, output)
    }
}
