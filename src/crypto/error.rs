//! Error types for parameter validation and the exchange itself

use num_bigint::BigInt;
use thiserror::Error;

use super::params::ParameterSet;
use super::root::RootCollision;

/// Reasons a modulus is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModulusError {
    /// The modulus is zero
    #[error("n cannot be zero, it isn't even prime.")]
    Zero,

    /// The modulus is one
    #[error("n cannot be one, it isn't even prime.")]
    One,

    /// The modulus is not prime and no divisor witness exists (negative input)
    #[error("n={n} needs to be prime")]
    NotPrime {
        /// The rejected modulus
        n: BigInt,
    },

    /// The modulus is composite
    #[error("n={n} needs to be prime, found {n} / {divisor} = {cofactor}")]
    Composite {
        /// The rejected modulus
        n: BigInt,
        /// A divisor found by trial division
        divisor: BigInt,
        /// `n / divisor`
        cofactor: BigInt,
    },
}

/// Reasons a private secret is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// The secret is below 1
    #[error("secret={secret} needs to be at least 1")]
    TooSmall {
        /// The rejected secret
        secret: BigInt,
    },

    /// The secret is above the modulus
    ///
    /// The bound is inclusive: a secret equal to `n` is accepted.
    #[error("secret={secret} needs to be less than n={n}")]
    TooLarge {
        /// The rejected secret
        secret: BigInt,
        /// The modulus it was checked against
        n: BigInt,
    },
}

/// Errors that can occur while setting up or running an exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DhError {
    /// The modulus is zero, one, or not prime
    #[error(transparent)]
    InvalidModulus(#[from] ModulusError),

    /// The generator is not a primitive root of the modulus
    #[error(
        "g={g} is not a primitive root modulo n={n}, g**{}%n={} which was already found at g**{}%n.",
        .collision.current,
        .collision.remainder,
        .collision.previous
    )]
    InvalidGenerator {
        /// The rejected generator
        g: BigInt,
        /// The modulus
        n: BigInt,
        /// Two exponents that land on the same residue
        collision: RootCollision,
    },

    /// A participant's secret lies outside `[1, n]`
    #[error(transparent)]
    SecretOutOfRange(#[from] SecretError),

    /// The two participants do not share the same parameters
    #[error(
        "Alice and Bob need to be using the same parameters, got: Alice={alice}, Bob={bob}"
    )]
    ParameterMismatch {
        /// Alice's parameters
        alice: ParameterSet,
        /// Bob's parameters
        bob: ParameterSet,
    },

    /// Both sides computed different shared secrets
    ///
    /// `(g^a)^b = (g^b)^a (mod n)` always holds, so this is a bug rather than
    /// bad input.
    #[error("internal invariant violated: shared secrets disagree (alice={alice}, bob={bob})")]
    InternalInvariantViolation {
        /// Shared value computed by Alice
        alice: BigInt,
        /// Shared value computed by Bob
        bob: BigInt,
    },
}

impl DhError {
    /// Whether this error signals a defect in this crate rather than invalid input
    pub fn is_internal(&self) -> bool {
        matches!(self, DhError::InternalInvariantViolation { .. })
    }
}

/// Result type for parameter validation and exchange operations
pub type DhResult<T> = Result<T, DhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_message() {
        let err = DhError::from(ModulusError::Composite {
            n: BigInt::from(10),
            divisor: BigInt::from(2),
            cofactor: BigInt::from(5),
        });
        assert_eq!(err.to_string(), "n=10 needs to be prime, found 10 / 2 = 5");
    }

    #[test]
    fn test_generator_message() {
        let err = DhError::InvalidGenerator {
            g: BigInt::from(4),
            n: BigInt::from(23),
            collision: RootCollision {
                current: BigInt::from(11),
                remainder: BigInt::from(1),
                previous: BigInt::from(0),
            },
        };
        assert_eq!(
            err.to_string(),
            "g=4 is not a primitive root modulo n=23, g**11%n=1 which was already found at g**0%n."
        );
    }

    #[test]
    fn test_secret_messages() {
        let small = DhError::from(SecretError::TooSmall {
            secret: BigInt::from(-3),
        });
        assert_eq!(small.to_string(), "secret=-3 needs to be at least 1");

        let large = DhError::from(SecretError::TooLarge {
            secret: BigInt::from(100),
            n: BigInt::from(23),
        });
        assert_eq!(large.to_string(), "secret=100 needs to be less than n=23");
    }

    #[test]
    fn test_secret_equal_to_modulus_is_not_too_large() {
        let params = ParameterSet::new(5, 23).unwrap();
        assert!(crate::crypto::Participant::new(&params, 23).is_ok());
        assert_eq!(
            crate::crypto::Participant::new(&params, 24),
            Err(DhError::SecretOutOfRange(SecretError::TooLarge {
                secret: BigInt::from(24),
                n: BigInt::from(23),
            }))
        );
    }

    #[test]
    fn test_only_invariant_violation_is_internal() {
        let internal = DhError::InternalInvariantViolation {
            alice: BigInt::from(1),
            bob: BigInt::from(2),
        };
        assert!(internal.is_internal());
        assert!(!DhError::from(ModulusError::Zero).is_internal());
    }
}
