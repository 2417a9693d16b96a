//! Factorials and binomial coefficients.
//!
//! Everything is accumulated in `f64` so high-degree curves saturate to
//! infinity instead of silently wrapping.

/// Computes `n!`.
#[must_use]
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, i| acc * f64::from(i))
}

/// Computes the binomial coefficient `C(n, k) = n! / (k! * (n - k)!)`.
///
/// Built up multiplicatively over the smaller of `k` and `n - k`, so every
/// partial product is itself a binomial coefficient. Stays finite up to about
/// `n = 1029` and exact for every coefficient below 2^53.
/// Returns `0.0` when `k > n`.
#[must_use]
pub fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    (0..k.min(n - k)).fold(1.0, |c, i| c * f64::from(n - i) / f64::from(i + 1))
}
