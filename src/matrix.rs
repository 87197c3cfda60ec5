//! Matrices over GF(2^8) and the Vandermonde machinery
//!
//! `GfMat` is a dense row-major matrix used by the syndrome path and the
//! per-column error-locator solve. The rebuilder works on raw k×k byte
//! buffers instead, through `invert_matrix` (Gauss-Jordan with full
//! pivoting) and `create_inverted_vdm`, which seeds the systematic
//! encoder's precursor matrix.

use crate::error::{FecError, Result};
use crate::galois::{mul_table, tables, Gf8};
use crate::scalar::addmul_row;

/// Dense row-major matrix of field elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GfMat {
    d: Vec<u8>,
    r: usize,
    c: usize,
}

impl GfMat {
    /// Create a new zero matrix
    pub fn new(r: usize, c: usize) -> Self {
        Self {
            d: vec![0; r * c],
            r,
            c,
        }
    }

    pub fn rows(&self) -> usize {
        self.r
    }

    pub fn cols(&self) -> usize {
        self.c
    }

    fn idx(&self, i: usize, j: usize) -> usize {
        self.c * i + j
    }

    pub fn get(&self, i: usize, j: usize) -> Gf8 {
        Gf8::new(self.d[self.idx(i, j)])
    }

    pub fn set(&mut self, i: usize, j: usize, val: Gf8) {
        let idx = self.idx(i, j);
        self.d[idx] = val.value();
    }

    /// Row `i` as raw bytes
    pub fn row(&self, i: usize) -> &[u8] {
        &self.d[self.idx(i, 0)..self.idx(i + 1, 0)]
    }

    pub fn swap_row(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for col in 0..self.c {
            let a = self.idx(i, col);
            let b = self.idx(j, col);
            self.d.swap(a, b);
        }
    }

    pub fn scale_row(&mut self, i: usize, val: Gf8) {
        let row = &mul_table()[val.value() as usize];
        let start = self.idx(i, 0);
        for b in &mut self.d[start..start + self.c] {
            *b = row[*b as usize];
        }
    }

    /// Row `dst` accumulates `val` times row `src`
    pub fn addmul_row(&mut self, src: usize, dst: usize, val: Gf8) {
        let (src_row, dst_row) = self.row_pair_mut(src, dst);
        addmul_row(dst_row, src_row, val.value());
    }

    /// Disjoint borrows of one row to read and another to mutate
    fn row_pair_mut(&mut self, src: usize, dst: usize) -> (&[u8], &mut [u8]) {
        let c = self.c;
        if src < dst {
            let (head, tail) = self.d.split_at_mut(dst * c);
            (&head[src * c..src * c + c], &mut tail[..c])
        } else {
            let (head, tail) = self.d.split_at_mut(src * c);
            (&tail[..c], &mut head[dst * c..dst * c + c])
        }
    }

    /// In-place inversion: `a` must enter as the identity and exits as the
    /// inverse, while `self` exits as the identity.
    ///
    /// Pivot selection searches down the column from the diagonal for the
    /// first non-zero entry; an all-zero pivot column is skipped.
    pub fn invert_with(&mut self, a: &mut GfMat) -> Result<()> {
        for i in 0..self.r {
            let mut p_row = i;
            let mut p_val = self.get(i, i);
            for j in (i + 1)..self.r {
                if !p_val.is_zero() {
                    break;
                }
                p_row = j;
                p_val = self.get(j, i);
            }
            if p_val.is_zero() {
                continue;
            }

            if p_row != i {
                self.swap_row(i, p_row);
                a.swap_row(i, p_row);
            }

            let inv = p_val.inv()?;
            self.scale_row(i, inv);
            a.scale_row(i, inv);

            for j in (i + 1)..self.r {
                let leading = self.get(j, i);
                self.addmul_row(i, j, leading);
                a.addmul_row(i, j, leading);
            }
        }

        for i in (1..self.r).rev() {
            for j in (0..i).rev() {
                let trailing = self.get(j, i);
                self.addmul_row(i, j, trailing);
                a.addmul_row(i, j, trailing);
            }
        }

        Ok(())
    }

    /// In-place reduction to standard form [I_r | P]
    pub fn standardize(&mut self) -> Result<()> {
        for i in 0..self.r {
            let mut p_row = i;
            let mut p_val = self.get(i, i);
            for j in (i + 1)..self.r {
                if !p_val.is_zero() {
                    break;
                }
                p_row = j;
                p_val = self.get(j, i);
            }
            if p_val.is_zero() {
                continue;
            }

            if p_row != i {
                self.swap_row(i, p_row);
            }

            let inv = p_val.inv()?;
            self.scale_row(i, inv);

            for j in (i + 1)..self.r {
                let leading = self.get(j, i);
                self.addmul_row(i, j, leading);
            }
        }

        for i in (1..self.r).rev() {
            for j in (0..i).rev() {
                let trailing = self.get(j, i);
                self.addmul_row(i, j, trailing);
            }
        }

        Ok(())
    }

    /// Parity form of a standardized matrix
    ///
    /// Assumes `self` is [I_r | P] and returns [P^T | I_(c-r)], a new
    /// (c-r)×c matrix. No negation is needed in characteristic 2.
    pub fn parity(&self) -> GfMat {
        let (r, c) = (self.r, self.c);
        let mut out = GfMat::new(c - r, c);

        // the identity block starts at column offset r
        for i in 0..(c - r) {
            out.set(i, i + r, Gf8::ONE);
        }

        // transposed P block; i and j are in terms of out
        for i in 0..(c - r) {
            for j in 0..r {
                out.set(i, j, self.get(j, i + r));
            }
        }

        out
    }
}

impl std::fmt::Display for GfMat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.r {
            for &b in self.row(i) {
                write!(f, "{b:02x}")?;
            }
            if i + 1 < self.r {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Pivot bookkeeping for `invert_matrix`
struct PivotSearcher {
    k: usize,
    ipiv: Vec<bool>,
}

impl PivotSearcher {
    fn new(k: usize) -> Self {
        Self {
            k,
            ipiv: vec![false; k],
        }
    }

    fn search(&mut self, col: usize, matrix: &[u8]) -> Result<(usize, usize)> {
        let k = self.k;
        if !self.ipiv[col] && matrix[col * k + col] != 0 {
            self.ipiv[col] = true;
            return Ok((col, col));
        }

        for row in 0..k {
            if self.ipiv[row] {
                continue;
            }
            for i in 0..k {
                if !self.ipiv[i] && matrix[row * k + i] != 0 {
                    self.ipiv[i] = true;
                    return Ok((row, i));
                }
            }
        }

        Err(FecError::Domain("pivot not found".into()))
    }
}

/// Invert a k×k row-major matrix in place via Gauss-Jordan elimination
/// with full pivoting
pub fn invert_matrix(matrix: &mut [u8], k: usize) -> Result<()> {
    let mut pivot_searcher = PivotSearcher::new(k);
    let mut indxc = vec![0usize; k];
    let mut indxr = vec![0usize; k];
    let mut id_row = vec![0u8; k];
    let mut pivot_row = vec![0u8; k];

    for col in 0..k {
        let (icol, irow) = pivot_searcher.search(col, matrix)?;

        if irow != icol {
            for i in 0..k {
                matrix.swap(irow * k + i, icol * k + i);
            }
        }

        indxr[col] = irow;
        indxc[col] = icol;

        let c = matrix[icol * k + icol];
        if c == 0 {
            return Err(FecError::Domain("singular matrix".into()));
        }

        if c != 1 {
            let c_inv = Gf8::new(c).inv()?.value();
            let mul_c = &mul_table()[c_inv as usize];
            matrix[icol * k + icol] = 1;
            for i in 0..k {
                let idx = icol * k + i;
                matrix[idx] = mul_c[matrix[idx] as usize];
            }
        }

        pivot_row.copy_from_slice(&matrix[icol * k..icol * k + k]);
        id_row[icol] = 1;
        if pivot_row != id_row {
            for i in 0..k {
                if i == icol {
                    continue;
                }
                let row = &mut matrix[i * k..i * k + k];
                let c = row[icol];
                row[icol] = 0;
                addmul_row(row, &pivot_row, c);
            }
        }
        id_row[icol] = 0;
    }

    for i in 0..k {
        if indxr[i] != indxc[i] {
            for row in 0..k {
                matrix.swap(row * k + indxr[i], row * k + indxc[i]);
            }
        }
    }

    Ok(())
}

/// Fill a k×k buffer with the inverse of the Vandermonde matrix whose
/// (i, j) entry is 2^(i*j)
///
/// Uses the product polynomial of the evaluation points and its
/// Lagrange-basis dual instead of a generic inversion.
pub fn create_inverted_vdm(vdm: &mut [u8], k: usize) -> Result<()> {
    if k == 1 {
        vdm[0] = 1;
        return Ok(());
    }

    let t = tables();
    let mul = mul_table();

    let mut b = vec![0u8; k];
    let mut c = vec![0u8; k];

    // c holds the coefficients of prod_i (x - exp[i]), built incrementally
    for i in 1..k {
        let mul_p_i = &mul[t.exp[i] as usize];
        for j in (k - 1 - (i - 1))..(k - 1) {
            c[j] ^= mul_p_i[c[j + 1] as usize];
        }
        c[k - 1] ^= t.exp[i];
    }

    for row in 0..k {
        let index = if row != 0 { t.exp[row] as usize } else { 0 };
        let mul_p_row = &mul[index];

        let mut tmp = 1u8;
        b[k - 1] = 1;
        for i in (0..k - 1).rev() {
            b[i] = c[i + 1] ^ mul_p_row[b[i + 1] as usize];
            tmp = b[i] ^ mul_p_row[tmp as usize];
        }

        let mul_t_inv = &mul[Gf8::new(tmp).inv()?.value() as usize];
        for col in 0..k {
            vdm[col * k + row] = mul_t_inv[b[col] as usize];
        }
    }

    Ok(())
}
