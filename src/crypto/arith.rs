use num::traits::Zero;
use num::{BigInt, BigUint, Integer};

/// Reduction of a signed value into `[0, modulus)`. Unlike `%` on a `BigInt`, which truncates
/// towards zero, a negative `value` wraps around to the top of the range.
pub fn reduce(value: &BigInt, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "reduction modulo zero");
    let modulus = BigInt::from(modulus.clone());
    // `mod_floor` takes the sign of the divisor, so the magnitude is the residue.
    let (_, magnitude) = value.mod_floor(&modulus).into_parts();
    magnitude
}

/// Exponentiation `base^exponent mod modulus` by repeated squaring.
pub fn power_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "exponentiation modulo zero");
    base.modpow(exponent, modulus)
}

/// Number of bits needed to write `value` in binary; zero for zero.
pub fn bit_length(value: &BigUint) -> u64 {
    value.bits()
}
