//! Built-in bytebeat formulas.
//!
//! Formulas are grouped like the catalog:
//!
//! - [`classic`] - the canonical one-liners and layered mixes
//! - [`musical`] - basslines and leads
//! - [`ambient`] - drones and textures
//! - [`experimental`] - dense, noisy formulas flagged as experimental
//!
//! Every formula is written against [`Word`], a 32-bit signed integer whose
//! operators wrap exactly like the signed 32-bit truncation bytebeat formulas
//! are designed around. Operator precedence in Rust matches the one these
//! formulas were written for (`*` > `+` > shifts > `&` > `^` > `|`), so each
//! body is a literal transcription.

use core::ops::{Add, BitAnd, BitOr, BitXor, Mul, Shl, Shr, Sub};

use crate::algorithm::Algorithm;

pub mod ambient;
pub mod classic;
pub mod experimental;
pub mod musical;

/// All built-in algorithms in catalog order.
pub fn builtin() -> impl Iterator<Item = Algorithm> {
    classic::ALGORITHMS
        .into_iter()
        .chain(musical::ALGORITHMS)
        .chain(ambient::ALGORITHMS)
        .chain(experimental::ALGORITHMS)
}

/// A 32-bit word with wrapping arithmetic.
///
/// Multiplication, addition and subtraction wrap modulo 2^32. Shift counts
/// are taken modulo 32 and `>>` is arithmetic (sign-propagating).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Word(pub i32);

impl Word {
    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for Word {
    #[inline]
    fn from(v: i32) -> Self {
        Word(v)
    }
}

macro_rules! word_op {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait for Word {
            type Output = Word;
            #[inline]
            fn $method(self, rhs: Word) -> Word {
                let ($a, $b) = (self.0, rhs.0);
                Word($body)
            }
        }

        impl $trait<i32> for Word {
            type Output = Word;
            #[inline]
            fn $method(self, rhs: i32) -> Word {
                let ($a, $b) = (self.0, rhs);
                Word($body)
            }
        }

        impl $trait<Word> for i32 {
            type Output = Word;
            #[inline]
            fn $method(self, rhs: Word) -> Word {
                let ($a, $b) = (self, rhs.0);
                Word($body)
            }
        }
    };
}

word_op!(Add, add, |a, b| a.wrapping_add(b));
word_op!(Sub, sub, |a, b| a.wrapping_sub(b));
word_op!(Mul, mul, |a, b| a.wrapping_mul(b));
word_op!(BitAnd, bitand, |a, b| a & b);
word_op!(BitOr, bitor, |a, b| a | b);
word_op!(BitXor, bitxor, |a, b| a ^ b);
word_op!(Shl, shl, |a, b| a.wrapping_shl(b as u32));
word_op!(Shr, shr, |a, b| a.wrapping_shr(b as u32));
