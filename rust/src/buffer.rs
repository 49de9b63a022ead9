//! Resizable vector of `f64` values that the benchmark writes and reads back.

use std::fmt;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{Error, Result};

/// Default lower bound for [`NumericBuffer::populate_default`].
pub const DEFAULT_LOWER: f64 = 0.0;
/// Default upper bound for [`NumericBuffer::populate_default`].
pub const DEFAULT_UPPER: f64 = 10.0;

/// Owned array of doubles.
///
/// The length only changes through [`resize`](Self::resize) and
/// [`clear`](Self::clear); everything else touches contents only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericBuffer {
    values: Vec<f64>,
}

impl NumericBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-filled buffer of `len` elements.
    pub fn zeroed(len: usize) -> Self {
        let mut buf = Self::new();
        buf.resize(len);
        buf
    }

    /// Set the length to `len` and zero every element.
    pub fn resize(&mut self, len: usize) {
        self.values.clear();
        self.values.resize(len, 0.0);
    }

    /// Fill every element with an independent draw from `U[lower, upper]`.
    pub fn populate(&mut self, lower: f64, upper: f64) -> Result<()> {
        let mut rng = rand::thread_rng();
        self.populate_with(&mut rng, lower, upper)
    }

    /// [`populate`](Self::populate) over `[0, 10]`.
    pub fn populate_default(&mut self) -> Result<()> {
        self.populate(DEFAULT_LOWER, DEFAULT_UPPER)
    }

    /// Same as [`populate`](Self::populate) with a caller-supplied generator.
    pub fn populate_with<R: Rng + ?Sized>(&mut self, rng: &mut R, lower: f64, upper: f64) -> Result<()> {
        // Uniform::new_inclusive panics on these, so reject them up front.
        if !(lower <= upper) || !(upper - lower).is_finite() {
            return Err(Error::InvalidConfig(format!(
                "invalid populate range [{lower}, {upper}]"
            )));
        }
        let dist = Uniform::new_inclusive(lower, upper);
        for v in self.values.iter_mut() {
            *v = dist.sample(rng);
        }
        Ok(())
    }

    pub fn zero(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Drop all elements and release the allocation.
    pub fn clear(&mut self) {
        self.values.clear();
        self.values.shrink_to_fit();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Size of the contents in bytes (`len * 8`).
    #[inline]
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.values.as_slice())
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Mutable view; a slice cannot change the buffer's length.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl From<Vec<f64>> for NumericBuffer {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// One value per line.
impl fmt::Display for NumericBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.values {
            writeln!(f, "{}", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_resize_zero_fills() {
        let mut buf = NumericBuffer::from(vec![1.0, 2.0, 3.0]);
        buf.resize(5);
        assert_eq!(buf.as_slice(), &[0.0; 5]);

        buf.resize(5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.byte_len(), 40);
    }

    #[test]
    fn test_populate_stays_in_range() {
        let mut buf = NumericBuffer::zeroed(10_000);
        buf.populate_default().unwrap();
        assert!(buf
            .as_slice()
            .iter()
            .all(|v| (DEFAULT_LOWER..=DEFAULT_UPPER).contains(v)));
        // 10k draws from U[0, 10] are never all zero.
        assert!(buf.as_slice().iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_populate_with_seed_is_repeatable() {
        let mut a = NumericBuffer::zeroed(64);
        let mut b = NumericBuffer::zeroed(64);
        a.populate_with(&mut StdRng::seed_from_u64(7), -1.0, 1.0).unwrap();
        b.populate_with(&mut StdRng::seed_from_u64(7), -1.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_populate_rejects_bad_range() {
        let mut buf = NumericBuffer::zeroed(4);
        assert!(matches!(buf.populate(5.0, 1.0), Err(Error::InvalidConfig(_))));
        assert!(matches!(buf.populate(0.0, f64::NAN), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            buf.populate(f64::MIN, f64::MAX),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(buf.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn test_degenerate_range() {
        let mut buf = NumericBuffer::zeroed(8);
        buf.populate(3.5, 3.5).unwrap();
        assert!(buf.as_slice().iter().all(|&v| v == 3.5));
    }

    #[test]
    fn test_zero_and_clear() {
        let mut buf = NumericBuffer::zeroed(16);
        buf.populate_default().unwrap();
        buf.zero();
        assert_eq!(buf.len(), 16);
        assert!(buf.as_slice().iter().all(|&v| v == 0.0));

        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.byte_len(), 0);
    }

    #[test]
    fn test_display_one_per_line() {
        let buf = NumericBuffer::from(vec![1.5, -2.0]);
        assert_eq!(buf.to_string(), "1.5\n-2\n");
    }
}
