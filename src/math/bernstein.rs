use super::combinatorics::binomial;

/// Bernstein basis weight of control point `k` in a curve of degree `n`.
///
/// `B(n, k, t) = C(n, k) * (1 - t)^(n - k) * t^k`. Returns `0.0` when
/// `k > n`. `0^0` is taken as `1`, so the endpoint weights are exact.
#[must_use]
pub fn weight(n: u32, k: u32, t: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    binomial(n, k) * pow(1.0 - t, n - k) * pow(t, k)
}

fn pow(base: f64, exp: u32) -> f64 {
    match i32::try_from(exp) {
        Ok(e) => base.powi(e),
        Err(_) => base.powf(f64::from(exp)),
    }
}
