//! Primitive root check
//!
//! `g` is a primitive root modulo a prime `n` when its powers
//! `g^0, g^1, ..., g^(n-2)` hit every non-zero residue exactly once. The
//! check here walks those powers and stops at the first repeated residue,
//! which proves the order of `g` is smaller than `n - 1`.
//!
//! This costs O(n) multiplications and O(n) memory. It is meant for small,
//! explanatory moduli.

use std::collections::HashMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Two exponents whose powers of `g` land on the same residue
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootCollision {
    /// The exponent at which the repeat was seen
    pub current: BigInt,
    /// `g^current mod n`, equal to `g^previous mod n`
    pub remainder: BigInt,
    /// The first exponent that produced `remainder`
    pub previous: BigInt,
}

/// Outcome of a primitive root check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootCheck {
    /// `g` generates the whole multiplicative group modulo `n`
    PrimitiveRoot,
    /// `g` cycles early, as witnessed by the collision
    NotPrimitiveRoot(RootCollision),
}

impl RootCheck {
    /// Whether `g` is a primitive root
    pub fn is_primitive_root(&self) -> bool {
        matches!(self, RootCheck::PrimitiveRoot)
    }

    /// The collision witness, if `g` is not a primitive root
    pub fn collision(&self) -> Option<&RootCollision> {
        match self {
            RootCheck::PrimitiveRoot => None,
            RootCheck::NotPrimitiveRoot(collision) => Some(collision),
        }
    }
}

/// Check whether `g` is a primitive root modulo `n`
///
/// Residues are reduced with floored modulo, so they always lie in `[0, n)`
/// even for a negative `g`. For `n < 2` there are no exponents to try and the
/// result is [`RootCheck::PrimitiveRoot`].
pub fn is_primitive_root_modulo_n(g: &BigInt, n: &BigInt) -> RootCheck {
    let last = n - 1u32;
    let mut seen: HashMap<BigInt, BigInt> = HashMap::new();
    let mut exponent = BigInt::zero();
    let mut residue: Option<BigInt> = None;

    while exponent < last {
        // g^i = g^(i-1) * g
        let next = match residue {
            None => BigInt::one().mod_floor(n),
            Some(previous) => (previous * g).mod_floor(n),
        };

        if let Some(previous) = seen.get(&next) {
            return RootCheck::NotPrimitiveRoot(RootCollision {
                current: exponent,
                remainder: next,
                previous: previous.clone(),
            });
        }
        seen.insert(next.clone(), exponent.clone());

        residue = Some(next);
        exponent += 1u32;
    }

    RootCheck::PrimitiveRoot
}
