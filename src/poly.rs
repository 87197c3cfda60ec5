//! Polynomials with coefficients in GF(2^8)
//!
//! Coefficients are stored highest-degree first, so `index(p)` maps the
//! coefficient of x^p to position `len - 1 - p`. Division requires and
//! maintains the normal form in which the coefficient sequence is either
//! empty (the zero polynomial) or starts with a non-zero leading term.

use crate::error::{FecError, Result};
use crate::galois::Gf8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GfPoly {
    coeffs: Vec<u8>,
}

impl GfPoly {
    /// The zero polynomial represented with `size` zero coefficients
    pub fn zero(size: usize) -> Self {
        Self {
            coeffs: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Degree of the stored representation; requires a non-empty polynomial
    pub fn deg(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Coefficient of x^power, with out-of-range powers reading as zero
    pub fn index(&self, power: usize) -> Gf8 {
        if power >= self.coeffs.len() {
            return Gf8::ZERO;
        }
        Gf8::new(self.coeffs[self.coeffs.len() - 1 - power])
    }

    /// Pointwise multiply by a factor
    pub fn scale(&self, factor: Gf8) -> GfPoly {
        GfPoly {
            coeffs: self
                .coeffs
                .iter()
                .map(|&c| (Gf8::new(c) * factor).value())
                .collect(),
        }
    }

    /// Assign the coefficient of x^pow, growing with leading zeros if the
    /// polynomial is too short to hold that power
    pub fn set(&mut self, pow: usize, coef: Gf8) {
        if pow >= self.coeffs.len() {
            let mut grown = vec![0; pow + 1 - self.coeffs.len()];
            grown.append(&mut self.coeffs);
            self.coeffs = grown;
        }
        let which = self.coeffs.len() - 1 - pow;
        self.coeffs[which] = coef.value();
    }

    /// Sum of two polynomials, aligned by power
    pub fn add(&self, b: &GfPoly) -> GfPoly {
        let len = self.coeffs.len().max(b.coeffs.len());
        let mut out = GfPoly::zero(len);
        for i in 0..len {
            out.set(i, self.index(i) + b.index(i));
        }
        out
    }

    /// Synthetic long division: returns (quotient, remainder)
    ///
    /// Fails with a domain error when the divisor is zero, or when the
    /// leading term fails to cancel during a reduction step (which cannot
    /// happen for well-formed inputs).
    pub fn div(&self, b: &GfPoly) -> Result<(GfPoly, GfPoly)> {
        // sanitize the divisor by removing leading zeros
        let mut b = b.clone();
        while !b.coeffs.is_empty() && b.coeffs[0] == 0 {
            b.coeffs.remove(0);
        }
        if b.coeffs.is_empty() {
            return Err(FecError::Domain("divide by zero".into()));
        }

        // sanitize the dividend as well
        let mut p = self.clone();
        while !p.coeffs.is_empty() && p.coeffs[0] == 0 {
            p.coeffs.remove(0);
        }
        if p.coeffs.is_empty() {
            return Ok((GfPoly::zero(1), GfPoly::zero(1)));
        }

        let mut q = GfPoly::default();
        // degree comparison via lengths, which also exits when p runs out
        while b.len() <= p.len() {
            let leading_p = p.index(p.deg());
            let leading_b = b.index(b.deg());

            let coef = leading_p.checked_div(leading_b)?;
            q.coeffs.push(coef.value());

            let mut padded = b.scale(coef);
            padded.coeffs.resize(padded.coeffs.len() + p.deg() - padded.deg(), 0);

            p = p.add(&padded);
            if p.coeffs[0] != 0 {
                return Err(FecError::Domain(format!("algebraic error: {p}")));
            }
            p.coeffs.remove(0);
        }

        while p.coeffs.len() > 1 && p.coeffs[0] == 0 {
            p.coeffs.remove(0);
        }

        Ok((q, p))
    }

    /// Evaluate the polynomial at x
    pub fn eval(&self, x: Gf8) -> Gf8 {
        let mut out = Gf8::ZERO;
        for power in 0..self.coeffs.len() {
            out += self.index(power) * x.pow(power);
        }
        out
    }
}

impl From<Vec<u8>> for GfPoly {
    fn from(coeffs: Vec<u8>) -> Self {
        Self { coeffs }
    }
}

impl From<&[u8]> for GfPoly {
    fn from(coeffs: &[u8]) -> Self {
        Self {
            coeffs: coeffs.to_vec(),
        }
    }
}

impl std::fmt::Display for GfPoly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &c in &self.coeffs {
            write!(f, "{c:02x}")?;
        }
        Ok(())
    }
}
