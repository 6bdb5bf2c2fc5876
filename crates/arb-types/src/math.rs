//! 18-decimal fixed-point arithmetic.
//!
//! All cross-token amounts in the bot are normalized to an implicit 1e18
//! unit scale and rescaled to native token decimals only at the encoding
//! boundary. Division always truncates toward zero so that results match
//! the on-chain interpreter bit for bit.

use alloy::primitives::{U256, U512};
use std::cmp::Ordering;

/// 1.0 in 18-decimal fixed point.
pub const ONE18: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Fixed-point multiply: `a * b / 1e18`, truncating.
///
/// The intermediate product is widened to 512 bits so ratios near the
/// `U256::MAX` sentinel cannot overflow; a result that does not fit back
/// into 256 bits saturates to `U256::MAX`.
pub fn mul_18(a: U256, b: U256) -> U256 {
	let wide: U512 = a.widening_mul(b);
	(wide / U512::from(ONE18)).saturating_to()
}

/// Fixed-point divide: `a * 1e18 / b`, truncating.
///
/// A zero divisor yields `U256::MAX`, the "free price" sentinel used for
/// zero-ratio orders.
pub fn div_18(a: U256, b: U256) -> U256 {
	if b.is_zero() {
		return U256::MAX;
	}
	let wide: U512 = a.widening_mul(ONE18);
	(wide / U512::from(b)).saturating_to()
}

/// Scale a native-decimals token amount up (or down) to 18 decimals.
pub fn scale_18(amount: U256, decimals: u8) -> U256 {
	match decimals.cmp(&18) {
		Ordering::Less => amount.saturating_mul(exp10(18 - decimals)),
		Ordering::Equal => amount,
		Ordering::Greater => amount / exp10(decimals - 18),
	}
}

/// Scale an 18-decimal amount back down (or up) to native token decimals,
/// truncating any sub-unit dust.
pub fn scale_from_18(amount: U256, decimals: u8) -> U256 {
	match decimals.cmp(&18) {
		Ordering::Less => amount / exp10(18 - decimals),
		Ordering::Equal => amount,
		Ordering::Greater => amount.saturating_mul(exp10(decimals - 18)),
	}
}

fn exp10(n: u8) -> U256 {
	U256::from(10).pow(U256::from(n))
}
