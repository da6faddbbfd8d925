//! Public Diffie-Hellman parameters
//!
//! A [`ParameterSet`] is the pair `(g, n)` both parties agree on in the
//! open: a prime modulus `n` and a generator `g` that is a primitive root
//! modulo `n`. The only way to get one is through a validating constructor,
//! so every value of the type upholds both properties.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{DhError, DhResult, ModulusError};
use super::prime::{is_prime, PrimeCheck};
use super::root::{is_primitive_root_modulo_n, RootCheck};

/// Minimum modulus size considered reasonable for real traffic, in bits
pub const RECOMMENDED_N_BIT_LENGTH: u64 = 2048;

/// Tunables applied while validating parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Moduli shorter than this trigger a [`WeakModulus`] advisory
    pub recommended_bits: u64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            recommended_bits: RECOMMENDED_N_BIT_LENGTH,
        }
    }
}

/// Advisory raised when the modulus is shorter than recommended
///
/// Never fatal: the parameters are still accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeakModulus {
    /// The modulus
    pub n: BigInt,
    /// Its bit length
    pub bits: u64,
    /// The recommended bit length
    pub recommended: u64,
}

impl fmt::Display for WeakModulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} has a bit length of {} which is less than the recommended {} bits.",
            self.n, self.bits, self.recommended
        )
    }
}

/// Validated public parameters `(g, n)`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawParameterSet", into = "RawParameterSet")]
pub struct ParameterSet {
    g: BigInt,
    n: BigInt,
}

impl ParameterSet {
    /// Validate `(g, n)` with the default policy
    ///
    /// A weak-modulus advisory is logged at `warn` level.
    pub fn new(g: impl Into<BigInt>, n: impl Into<BigInt>) -> DhResult<Self> {
        Self::with_advisory(g, n, ValidationPolicy::default(), |advisory| {
            warn!(bits = advisory.bits, recommended = advisory.recommended, "{}", advisory);
        })
    }

    /// Validate `(g, n)`, handing any advisory to `on_advisory`
    ///
    /// Checks run in order: `n` must be prime, then the modulus size is
    /// compared against `policy`, then `g` must be a primitive root modulo
    /// `n`. The advisory therefore fires even when `g` is later rejected.
    pub fn with_advisory<F>(
        g: impl Into<BigInt>,
        n: impl Into<BigInt>,
        policy: ValidationPolicy,
        mut on_advisory: F,
    ) -> DhResult<Self>
    where
        F: FnMut(WeakModulus),
    {
        let g = g.into();
        let n = n.into();

        check_modulus(&n)?;

        let bits = n.bits();
        if bits < policy.recommended_bits {
            on_advisory(WeakModulus {
                n: n.clone(),
                bits,
                recommended: policy.recommended_bits,
            });
        }

        if let RootCheck::NotPrimitiveRoot(collision) = is_primitive_root_modulo_n(&g, &n) {
            return Err(DhError::InvalidGenerator { g, n, collision });
        }

        Ok(ParameterSet { g, n })
    }

    /// The generator
    pub fn g(&self) -> &BigInt {
        &self.g
    }

    /// The prime modulus
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Bit length of the modulus
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(g={}, n={})", self.g, self.n)
    }
}

fn check_modulus(n: &BigInt) -> Result<(), ModulusError> {
    match is_prime(n) {
        PrimeCheck::Prime => Ok(()),
        PrimeCheck::NotPrime { .. } if n.is_zero() => Err(ModulusError::Zero),
        PrimeCheck::NotPrime { .. } if n.is_one() => Err(ModulusError::One),
        PrimeCheck::NotPrime {
            divisor: Some(divisor),
        } => Err(ModulusError::Composite {
            n: n.clone(),
            cofactor: n / &divisor,
            divisor,
        }),
        PrimeCheck::NotPrime { divisor: None } => Err(ModulusError::NotPrime { n: n.clone() }),
    }
}

/// Wire form of a [`ParameterSet`]; deserializing goes back through validation
#[derive(Serialize, Deserialize)]
struct RawParameterSet {
    #[serde(with = "decimal")]
    g: BigInt,
    #[serde(with = "decimal")]
    n: BigInt,
}

impl TryFrom<RawParameterSet> for ParameterSet {
    type Error = DhError;

    fn try_from(raw: RawParameterSet) -> DhResult<Self> {
        ParameterSet::new(raw.g, raw.n)
    }
}

impl From<ParameterSet> for RawParameterSet {
    fn from(params: ParameterSet) -> Self {
        RawParameterSet {
            g: params.g,
            n: params.n,
        }
    }
}

/// Serialize big integers as decimal strings
///
/// JSON numbers lose precision well before a 2048-bit modulus.
pub(crate) mod decimal {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
