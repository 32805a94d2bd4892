//! Numerical primitives shared by the pricers.

pub mod arena;

pub use arena::PricingArena;

/// Standard normal density.
#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution.
///
/// `normal_cdf(-x) == 1 - normal_cdf(x)` holds to rounding, which keeps put-call parity
/// exact for the closed-form pricer. The polynomial misses 0.5 by about 5e-10 at zero, so
/// zero (of either sign) is pinned to 0.5.
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    if x == 0.0 {
        return 0.5;
    }
    // Abramowitz & Stegun 7.1.26
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 { approx } else { 1.0 - approx }
}

/// `points` evenly spaced values from `start` to `end` inclusive.
///
/// Returns an empty vector for zero points and `[start]` for one point.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i + 1 == points {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdf_is_symmetric() {
        for &x in &[0.0, 0.1, 0.35, 1.0, 2.5, 6.0] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-15);
        }
        assert_eq!(normal_cdf(0.0), 0.5);
        assert_eq!(normal_cdf(-0.0), 0.5);
    }

    #[test]
    fn linspace_hits_both_endpoints() {
        let xs = linspace(60.0, 140.0, 5);
        assert_eq!(xs, vec![60.0, 80.0, 100.0, 120.0, 140.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }
}
