use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Map a probability onto the `u64` range, so that a single `next_u64` decides an event
#[inline]
pub fn threshold(p: f64) -> u64 {
    if p.is_nan() || p <= 0. {
        0
    } else if p >= 1. {
        u64::MAX
    } else {
        (p * u64::MAX as f64) as u64
    }
}

pub trait Happens: RngCore {
    /// Bernoulli draw that comes up true with probability `p`. Values outside [0, 1] are
    /// treated as never / always.
    fn happens(&mut self, p: f64) -> bool;
}

impl<T: RngCore + ?Sized> Happens for T {
    fn happens(&mut self, p: f64) -> bool {
        if p >= 1. {
            return true;
        }
        threshold(p) > self.next_u64()
    }
}

/// Draw from `Normal(mean, sigma)`. A sigma that is not finite and positive yields `mean`.
pub fn gauss(rng: &mut impl RngCore, mean: f64, sigma: f64) -> f64 {
    if !sigma.is_finite() || sigma <= 0. {
        return mean;
    }
    match Normal::new(mean, sigma) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}

/// Small and fast wyrand generator
#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::seeded(state)
    }
}

/// A [WyRng] seeded from the thread rng
pub fn default_rng() -> WyRng {
    WyRng::seeded(rand::rng().random())
}

#[cfg(test)]
mod test {
    use super::*;
    use core::iter::once;
    use rand::rngs::StdRng;

    fn assert_within_deviation(chance: f64, range: f64, rng: &mut impl Happens) {
        let samples = 10_000.;
        let expected = chance * samples;
        let max_deviation = expected * range;
        for _ in 0..20 {
            let incidence = once(())
                .cycle()
                .take(samples as usize)
                .filter(|()| rng.happens(chance))
                .count() as f64;
            assert!(
                (expected - incidence).abs() < max_deviation,
                "{chance}: {incidence} != {expected} ± {max_deviation}"
            );
        }
    }

    // control test - we are confident that rand generates good random numbers
    #[test]
    fn test_deviation_rand() {
        let mut rng = StdRng::seed_from_u64(1);
        for chance in [0.03, 0.05, 0.5, 0.8, 0.9] {
            assert_within_deviation(chance, 0.33, &mut rng);
        }
    }

    #[test]
    fn test_deviation_wyrand() {
        let mut rng = WyRng::seeded(0x5eed);
        for chance in [0.03, 0.05, 0.5, 0.8, 0.9] {
            assert_within_deviation(chance, 0.33, &mut rng);
        }
    }

    #[test]
    fn test_happens_bounds() {
        let mut rng = WyRng::seeded(3);
        for _ in 0..1_000 {
            assert!(!rng.happens(0.));
            assert!(!rng.happens(-1.));
            assert!(!rng.happens(f64::NAN));
            assert!(rng.happens(1.));
            assert!(rng.happens(2.));
        }
    }

    #[test]
    fn test_gauss() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(gauss(&mut rng, 3., -1.), 3.);
        assert_eq!(gauss(&mut rng, 3., f64::NAN), 3.);
        assert_eq!(gauss(&mut rng, 3., 0.), 3.);
        assert_eq!(gauss(&mut rng, 3., f64::INFINITY), 3.);
        for _ in 0..100 {
            assert_eq!(gauss(&mut rng, -2., -0.5), -2.);
        }

        let mean = (0..10_000).map(|_| gauss(&mut rng, 1., 2.)).sum::<f64>() / 10_000.;
        assert!((mean - 1.).abs() < 0.1, "{mean}");
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut l = WyRng::seeded(42);
        let mut r = WyRng::seeded(42);
        let mut buf = [0u8; 11];
        l.fill_bytes(&mut buf);
        let first = r.next_u64().to_le_bytes();
        let second = r.next_u64().to_le_bytes();
        assert_eq!(&buf[..8], &first);
        assert_eq!(&buf[8..], &second[..3]);
    }
}
