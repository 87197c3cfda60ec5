//! Galois Field GF(2^8) arithmetic for Reed-Solomon operations
//!
//! Field elements are bytes interpreted as polynomial coefficients modulo
//! the AES primitive polynomial 0x11D (x⁸ + x⁴ + x³ + x² + 1). Addition is
//! XOR; multiplication goes through precomputed log/exp tables and a full
//! 256x256 product table so that the row primitive in `scalar` can index a
//! single table row per coefficient.
//!
//! Tables are generated once, on first use, behind `OnceLock`.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use std::sync::OnceLock;

use crate::error::{FecError, Result};

/// GF(2^8) primitive polynomial: 0x11D (x⁸ + x⁴ + x³ + x² + 1)
const GF8_POLYNOMIAL: u32 = 0x11D;

/// Order of the multiplicative group, 2^8 - 1
const GROUP_ORDER: usize = 255;

/// Galois field lookup tables for fast arithmetic
///
/// `exp` is tiled to twice the group order so that inverse and
/// difference-of-logs lookups need no modulo reduction.
pub struct GaloisTables {
    pub log: [u8; 256],
    pub exp: [u8; 512],
}

impl GaloisTables {
    fn new() -> Self {
        let mut tables = GaloisTables {
            log: [0; 256],
            exp: [0; 512],
        };
        tables.build();
        tables
    }

    fn build(&mut self) {
        let mut b = 1u32;

        for l in 0..GROUP_ORDER {
            self.log[b as usize] = l as u8;
            self.exp[l] = b as u8;

            b <<= 1;
            if b & 0x100 != 0 {
                b ^= GF8_POLYNOMIAL;
            }
        }

        // log of zero is never consulted on legitimate paths; park it at
        // the group order.
        self.log[0] = GROUP_ORDER as u8;

        for i in GROUP_ORDER..512 {
            self.exp[i] = self.exp[i - GROUP_ORDER];
        }
    }
}

/// Get the process-wide log/exp tables
pub(crate) fn tables() -> &'static GaloisTables {
    static TABLES: OnceLock<GaloisTables> = OnceLock::new();
    TABLES.get_or_init(GaloisTables::new)
}

/// Get the process-wide 256x256 multiplication table
///
/// Row `y` holds the products `y * x` for every byte `x`, which is the
/// shape the `addmul_row` inner loop wants.
pub(crate) fn mul_table() -> &'static [[u8; 256]; 256] {
    static MUL_TABLE: OnceLock<Box<[[u8; 256]; 256]>> = OnceLock::new();
    MUL_TABLE.get_or_init(|| {
        let t = tables();
        let mut m = Box::new([[0u8; 256]; 256]);
        for i in 1..256 {
            for j in 1..256 {
                let log_sum = t.log[i] as usize + t.log[j] as usize;
                m[i][j] = t.exp[log_sum % GROUP_ORDER];
            }
        }
        m
    })
}

/// Galois field element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gf8 {
    value: u8,
}

impl Gf8 {
    pub const ZERO: Gf8 = Gf8 { value: 0 };
    pub const ONE: Gf8 = Gf8 { value: 1 };

    /// Generator of the multiplicative group
    pub const GENERATOR: Gf8 = Gf8 { value: 2 };

    pub fn new(value: u8) -> Self {
        Self { value }
    }

    pub fn value(self) -> u8 {
        self.value
    }

    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Power operation: `self` multiplied into 1 `exponent` times
    pub fn pow(self, exponent: usize) -> Self {
        let row = &mul_table()[self.value as usize];
        let mut out = 1u8;
        for _ in 0..exponent {
            out = row[out as usize];
        }
        Self::new(out)
    }

    /// Multiplicative inverse; inverting zero is a domain error
    pub fn inv(self) -> Result<Self> {
        if self.value == 0 {
            return Err(FecError::Domain("inverse of zero".into()));
        }
        let t = tables();
        Ok(Self::new(
            t.exp[GROUP_ORDER - t.log[self.value as usize] as usize],
        ))
    }

    /// Division; dividing by zero is a domain error
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.value == 0 {
            return Err(FecError::Domain("divide by zero".into()));
        }
        if self.value == 0 {
            return Ok(Self::ZERO);
        }
        let t = tables();
        let index =
            GROUP_ORDER + t.log[self.value as usize] as usize - t.log[rhs.value as usize] as usize;
        Ok(Self::new(t.exp[index]))
    }
}

/// Dot product of two equal-length coefficient rows
pub(crate) fn dot(a: &[u8], b: &[u8]) -> Gf8 {
    let mul = mul_table();
    let mut out = 0u8;
    for (&ai, &bi) in a.iter().zip(b) {
        out ^= mul[ai as usize][bi as usize];
    }
    Gf8::new(out)
}

// Addition (XOR in Galois fields)
impl Add for Gf8 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value ^ rhs.value)
    }
}

impl AddAssign for Gf8 {
    fn add_assign(&mut self, rhs: Self) {
        self.value ^= rhs.value;
    }
}

// Subtraction (same as addition in GF(2^n))
impl Sub for Gf8 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value ^ rhs.value)
    }
}

impl SubAssign for Gf8 {
    fn sub_assign(&mut self, rhs: Self) {
        self.value ^= rhs.value;
    }
}

// Multiplication using the product table
impl Mul for Gf8 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(mul_table()[self.value as usize][rhs.value as usize])
    }
}

impl MulAssign for Gf8 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Conversion traits
impl From<u8> for Gf8 {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Gf8> for u8 {
    fn from(val: Gf8) -> Self {
        val.value
    }
}

impl std::fmt::Display for Gf8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x}", self.value)
    }
}
