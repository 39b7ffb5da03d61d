//! Algorithm metadata and evaluation.

/// A bytebeat formula: one 32-bit time value in, one 32-bit word out.
///
/// Formulas are pure. The result is masked to a byte by [`Algorithm::evaluate`],
/// so a formula may return anything, including negative values.
pub type Formula = fn(i32) -> i32;

/// Catalog grouping, in the order the built-in catalog registers them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Classic,
    Musical,
    Ambient,
    Experimental,
}

/// A named bytebeat formula.
///
/// Algorithms are plain `Copy` values: a name, a description, a category, an
/// experimental flag and a function pointer. Once registered they never change.
///
/// ```
/// use bytebeat_engine::{Algorithm, Category};
///
/// fn saw(t: i32) -> i32 { t }
///
/// let algo = Algorithm::new("Saw", "Raw time counter", Category::Classic, saw);
/// assert_eq!(algo.evaluate(0x1_42), 0x42);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Algorithm {
    name: &'static str,
    description: &'static str,
    category: Category,
    experimental: bool,
    formula: Formula,
}

impl Algorithm {
    /// Create an algorithm. Algorithms in [`Category::Experimental`] are flagged
    /// experimental; use [`with_experimental`](Self::with_experimental) to override.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        category: Category,
        formula: Formula,
    ) -> Self {
        Self {
            name,
            description,
            category,
            experimental: matches!(category, Category::Experimental),
            formula,
        }
    }

    pub const fn with_experimental(mut self, experimental: bool) -> Self {
        self.experimental = experimental;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn is_experimental(&self) -> bool {
        self.experimental
    }

    #[inline]
    pub fn formula(&self) -> Formula {
        self.formula
    }

    /// Evaluate the formula at `t` and mask the result into `0..=255`.
    ///
    /// `t` is reinterpreted as a signed 32-bit word, so any value is safe.
    #[inline]
    pub fn evaluate(&self, t: u32) -> u8 {
        ((self.formula)(t as i32) & 0xFF) as u8
    }
}
