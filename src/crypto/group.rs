use lazy_static::*;
use num::traits::{Num, One};
use num::{BigInt, BigUint};
use serde::{Deserialize, Serialize};

use crate::crypto::arith::{power_mod, reduce};
use crate::errors::Error;

/// The multiplicative group of integers modulo an election's prime `p`, together with the
/// election generator `g`. Exponents live in the additive group of integers modulo `p - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    prime: BigUint,
    generator: BigUint,
    modulus: BigUint,
}

/// An element of the multiplicative group: an integer in `[0, p)`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element {
    #[serde(with = "crate::serialize::big_uint")]
    element: BigUint,
}

/// An exponent in the additive group of integers modulo the prime minus one: an integer in
/// `[0, p - 1)`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exponent {
    #[serde(with = "crate::serialize::big_uint")]
    exponent: BigUint,
}

impl Group {
    /// Build the group for an election. The prime must be at least three (so that `p - 1` is a
    /// usable modulus) and the generator must lie strictly between one and the prime.
    ///
    /// Primality of `p` and primitivity of `g` are not checked.
    pub fn new(prime: BigUint, generator: BigUint) -> Result<Group, Error> {
        if prime < BigUint::from(3_u8) {
            return Err(Error::InvalidGroup("prime must be at least 3"));
        }
        if generator <= BigUint::one() || generator >= prime {
            return Err(Error::InvalidGroup("generator must lie in (1, prime)"));
        }
        let modulus = &prime - 1_u8;
        Ok(Group {
            prime,
            generator,
            modulus,
        })
    }

    /// The 2048-bit MODP group of RFC 3526, with generator 2.
    pub fn modp_2048() -> &'static Group {
        &*MODP_2048
    }

    /// The prime `p`.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// The generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// The modulus `p - 1` of the exponent group.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Inject an integer, possibly negative, into the exponent group.
    pub fn exponent(&self, value: &BigInt) -> Exponent {
        Exponent {
            exponent: reduce(value, &self.modulus),
        }
    }

    /// Raise the generator to an arbitrary non-negative exponent.
    pub fn gen_pow(&self, exponent: &BigUint) -> Element {
        Element {
            element: power_mod(&self.generator, exponent, &self.prime),
        }
    }

    /// Raise a group element to an arbitrary non-negative exponent.
    pub fn pow(&self, base: &Element, exponent: &BigUint) -> Element {
        Element {
            element: power_mod(&base.element, exponent, &self.prime),
        }
    }
}

impl Element {
    pub fn as_uint(&self) -> &BigUint {
        &self.element
    }
}

impl Exponent {
    pub fn as_uint(&self) -> &BigUint {
        &self.exponent
    }
}

lazy_static! {
    static ref MODP_2048: Group = Group {
        prime: parse_biguint_hex_or_panic(PRIME_HEX_2048),
        generator: BigUint::from(2_u8),
        modulus: parse_biguint_hex_or_panic(PRIME_HEX_2048) - 1_u8,
    };
}

/// Parse a hex string (which might contain spaces, tabs, or newlines) into a
/// BigUint or panic if it can't be done (this is meant to be used for
/// hard-coded constants)
fn parse_biguint_hex_or_panic(hex: &str) -> BigUint {
    BigUint::from_str_radix(
        &hex.replace(" ", "").replace("\n", "").replace("\t", ""),
        16,
    )
    .expect("Invalid hex input for parse_biguint_hex_or_panic")
}

/// The prime modulus for the 2048-bit group
const PRIME_HEX_2048: &str = "FFFFFFFF FFFFFFFF C90FDAA2 2168C234 C4C6628B 80DC1CD1
     29024E08 8A67CC74 020BBEA6 3B139B22 514A0879 8E3404DD
     EF9519B3 CD3A431B 302B0A6D F25F1437 4FE1356D 6D51C245
     E485B576 625E7EC6 F44C42E9 A637ED6B 0BFF5CB6 F406B7ED
     EE386BFB 5A899FA5 AE9F2411 7C4B1FE6 49286651 ECE45B3D
     C2007CB8 A163BF05 98DA4836 1C55D39A 69163FA8 FD24CF5F
     83655D23 DCA3AD96 1C62F356 208552BB 9ED52907 7096966D
     670C354E 4ABC9804 F1746C08 CA18217C 32905E46 2E36CE3B
     E39E772C 180E8603 9B2783A2 EC07A28F B5C55DF0 6F4C52C9
     DE2BCBF6 95581718 3995497C EA956AE5 15D22618 98FA0510
     15728E5A 8AACAA68 FFFFFFFF FFFFFFFF";
