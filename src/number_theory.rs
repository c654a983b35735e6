// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Least common multiples over rationals with bounded decimal precision.
//!
//! Periods such as `1.775` and `17.75` have no integer LCM. Scaling every
//! value by the smallest factor that clears its decimals (`×40`, giving
//! `71` and `710`) makes the usual prime-exponent construction apply; the
//! result is then divided by the same factor (`710 / 40 = 17.75`).
//!
//! ```
//! use phasecycle::number_theory::{greatest_common_divider, least_common_multiple};
//!
//! assert_eq!(least_common_multiple(&[0.2, 0.5, 2.5], 3).unwrap(), 5.0);
//! assert_eq!(greatest_common_divider(&[15, 25, 100]), 5);
//! ```

use crate::error::ArithmeticError;
use std::collections::BTreeMap;

/// Decimal digits kept when scaling rationals to naturals.
pub const DEFAULT_PRECISION: u32 = 3;

/// Most decimal digits accepted; above this the scale reference
/// `10^precision` would overflow `u64` once multiplied by realistic values.
pub const MAX_PRECISION: u32 = 9;

/// Prime → exponent, ascending by prime.
pub type PrimeFactors = BTreeMap<u64, u32>;

/// Values multiplied by the smallest factor that makes them natural.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledValues {
    pub factor: u64,
    pub values: Vec<f64>,
}

/// Prime factorization by trial division. Empty for `0` and `1`.
pub fn prime_factors(mut n: u64) -> PrimeFactors {
    let mut factors = PrimeFactors::new();
    let mut divisor = 2u64;
    while divisor.saturating_mul(divisor) <= n {
        while n % divisor == 0 {
            *factors.entry(divisor).or_insert(0) += 1;
            n /= divisor;
        }
        divisor += 1;
    }
    if n > 1 {
        *factors.entry(n).or_insert(0) += 1;
    }
    factors
}

/// Smallest positive factor `k` so that every `value · k` has no decimals
/// at `precision` digits.
///
/// The remainder of each value is `round(v · 10^p) mod 10^p`; the factor is
/// `10^p / gcd(remainders ∪ {10^p})`. A precision of `0` declares the values
/// natural already and yields `k = 1`. Precisions above
/// [`MAX_PRECISION`] are read as [`MAX_PRECISION`].
///
/// ```
/// use phasecycle::number_theory::scale_to_natural_numbers;
///
/// let scaled = scale_to_natural_numbers(&[0.2, 0.4, 2.2], 3);
/// assert_eq!(scaled.factor, 5);
/// ```
pub fn scale_to_natural_numbers(values: &[f64], precision: u32) -> ScaledValues {
    if precision == 0 {
        return ScaledValues {
            factor: 1,
            values: values.to_vec(),
        };
    }
    let reference = precision_reference(precision);
    let mut remainders: Vec<u64> = values
        .iter()
        .map(|v| (v * reference as f64).round() as u64 % reference)
        .collect();
    remainders.push(reference);
    let factor = reference / greatest_common_divider(&remainders);
    ScaledValues {
        factor,
        values: values.iter().map(|v| v * factor as f64).collect(),
    }
}

/// Least common multiple of positive rationals known to `precision`
/// decimal digits (`0`: the values must already be natural numbers).
///
/// A single value is returned unchanged. Precisions above
/// [`MAX_PRECISION`] are rejected.
pub fn least_common_multiple(values: &[f64], precision: u32) -> Result<f64, ArithmeticError> {
    if precision > MAX_PRECISION {
        return Err(ArithmeticError::Precision(precision));
    }
    let first = *values.first().ok_or(ArithmeticError::Empty)?;
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(ArithmeticError::NonPositive(*bad));
    }
    if values.len() == 1 {
        return Ok(first);
    }

    let (factor, naturals) = to_naturals(values, precision)?;
    let factored: Vec<PrimeFactors> = naturals.iter().map(|&n| prime_factors(n)).collect();
    let lcm = reconstitute(&max_exponents(&factored)).ok_or(ArithmeticError::Overflow)?;
    Ok(lcm as f64 / factor as f64)
}

/// Greatest common divider of natural numbers.
///
/// The exponents of the LCM's prime factors are lowered to the minimum
/// found across the inputs. Zeros are divisible by everything and never
/// lower the result; an empty input yields `1`.
pub fn greatest_common_divider(values: &[u64]) -> u64 {
    let factored: Vec<PrimeFactors> = values
        .iter()
        .filter(|&&v| v != 0)
        .map(|&v| prime_factors(v))
        .collect();
    max_exponents(&factored)
        .keys()
        .map(|&prime| {
            let exponent = factored
                .iter()
                .map(|f| f.get(&prime).copied().unwrap_or(0))
                .min()
                .unwrap_or(0);
            prime.pow(exponent)
        })
        .product()
}

fn precision_reference(precision: u32) -> u64 {
    10u64.pow(precision.min(MAX_PRECISION))
}

/// Scale factor plus the exact natural numbers it produces.
fn to_naturals(values: &[f64], precision: u32) -> Result<(u64, Vec<u64>), ArithmeticError> {
    if precision == 0 {
        let naturals = values
            .iter()
            .map(|&v| {
                if v.fract() == 0.0 && v <= u64::MAX as f64 {
                    Ok(v as u64)
                } else {
                    Err(ArithmeticError::NotNatural(v))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok((1, naturals));
    }

    let reference = precision_reference(precision);
    let factor = scale_to_natural_numbers(values, precision).factor;
    let naturals = values
        .iter()
        .map(|&v| {
            // round(v · 10^p) · k is a multiple of 10^p by construction of k.
            let units = (v * reference as f64).round() as u128;
            let natural = units * u128::from(factor) / u128::from(reference);
            match u64::try_from(natural) {
                Ok(0) => Err(ArithmeticError::NonPositive(v)),
                Ok(n) => Ok(n),
                Err(_) => Err(ArithmeticError::Overflow),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((factor, naturals))
}

fn max_exponents(factored: &[PrimeFactors]) -> PrimeFactors {
    let mut out = PrimeFactors::new();
    for factors in factored {
        for (&prime, &exponent) in factors {
            let slot = out.entry(prime).or_insert(0);
            *slot = (*slot).max(exponent);
        }
    }
    out
}

fn reconstitute(factors: &PrimeFactors) -> Option<u128> {
    factors.iter().try_fold(1u128, |acc, (&prime, &exponent)| {
        u128::from(prime)
            .checked_pow(exponent)
            .and_then(|power| acc.checked_mul(power))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
