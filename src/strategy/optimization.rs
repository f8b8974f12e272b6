// src/strategy/optimization.rs

//! Standard-normal building blocks for the Newsvendor model.
//!
//! Everything here is a pure function of its arguments: the quantile function
//! turns a critical fractile into a z-score, and the loss function turns a
//! z-score into expected units short (or, mirrored, units left over) per unit
//! of demand standard deviation.

use statrs::function::erf::erfc;
use std::f64::consts::{PI, SQRT_2};

/// Lowest critical fractile the optimizer will target.
pub const FRACTILE_MIN: f64 = 0.01;
/// Highest critical fractile the optimizer will target.
pub const FRACTILE_MAX: f64 = 0.99;

/// Calculates the Critical Fractile (target service level).
///
/// The fractile balances the cost of understocking (`shortage_cost`, Cu)
/// against overstocking (`overstock_cost`, Co).
///
/// Formula: p = Cu / (Cu + Co), clipped to [0.01, 0.99].
///
/// One-sided costs pin p to the nearest bound and two zero costs give 0.5.
/// Callers are expected to pass non-negative costs.
pub fn critical_fractile(shortage_cost: f64, overstock_cost: f64) -> f64 {
    match (shortage_cost > 0.0, overstock_cost > 0.0) {
        (false, false) => 0.5,
        (true, false) => FRACTILE_MAX,
        (false, true) => FRACTILE_MIN,
        // Cu + Co overflows for huge costs; the ratio form does not.
        (true, true) => {
            (1.0 / (1.0 + overstock_cost / shortage_cost)).clamp(FRACTILE_MIN, FRACTILE_MAX)
        }
    }
}

/// Inverse Cumulative Distribution Function (quantile function) of the
/// Standard Normal Distribution.
///
/// Peter J. Acklam's rational approximation, relative error below 1.15e-9.
/// `p <= 0` maps to negative infinity and `p >= 1` to positive infinity.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    // Tails share one polynomial; the upper tail is the mirrored lower tail.
    let tail = |q: f64| {
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > P_HIGH {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}

/// Standard normal density.
pub fn normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Upper tail `1 - Φ(z)`, computed without cancellation for large `z`.
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Standard normal loss function.
///
/// Formula: L(z) = φ(z) - z·(1 - Φ(z))
///
/// `sigma * L(z)` is the expected shortfall of demand beyond `mu + z * sigma`;
/// `sigma * L(-z)` is the expected surplus below it.
pub fn normal_loss(z: f64) -> f64 {
    normal_pdf(z) - z * normal_sf(z)
}
