//! Injectable random source for the progression generator

/// Source of the random draws the generator needs.
///
/// Implemented for `fastrand::Rng`; seed it with `fastrand::Rng::with_seed`
/// for reproducible output.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool;
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn coin_flip(&mut self) -> bool {
        self.bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            assert_eq!(a.index(5), b.index(5));
            assert_eq!(a.coin_flip(), b.coin_flip());
        }
    }

    #[test]
    fn test_index_within_bounds() {
        let mut rng = fastrand::Rng::with_seed(99);
        for _ in 0..1000 {
            assert!(rng.index(4) < 4);
        }
    }
}
