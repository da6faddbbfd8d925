//! Modular-exponentiation key exchange
//!
//! Each participant raises the public generator to its private secret and
//! publishes the result. Raising the peer's public value to one's own secret
//! then yields the same number on both sides, since
//! `(g^a)^b = (g^b)^a (mod n)`.

use std::fmt;

use num_bigint::BigInt;
use num_traits::One;
use serde::Serialize;
use tracing::{debug, error};

use super::error::{DhError, DhResult, SecretError};
use super::params::{decimal, ParameterSet};

/// One side of an exchange: shared public parameters plus a private secret
///
/// Borrows its [`ParameterSet`], so both participants of an exchange can
/// point at the same parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant<'p> {
    parameters: &'p ParameterSet,
    secret: BigInt,
}

impl<'p> Participant<'p> {
    /// Create a participant, checking `1 <= secret <= n`
    pub fn new(parameters: &'p ParameterSet, secret: impl Into<BigInt>) -> DhResult<Self> {
        let secret = secret.into();

        if secret < BigInt::one() {
            return Err(SecretError::TooSmall { secret }.into());
        }
        if &secret > parameters.n() {
            return Err(SecretError::TooLarge {
                secret,
                n: parameters.n().clone(),
            }
            .into());
        }

        Ok(Participant { parameters, secret })
    }

    /// The public parameters this participant uses
    pub fn parameters(&self) -> &'p ParameterSet {
        self.parameters
    }

    /// The private secret
    pub fn secret(&self) -> &BigInt {
        &self.secret
    }

    /// `g^secret mod n`, the value sent to the peer
    pub fn public_value(&self) -> BigInt {
        self.parameters
            .g()
            .modpow(&self.secret, self.parameters.n())
    }

    /// `peer_public^secret mod n`, the agreed secret
    pub fn shared_secret(&self, peer_public: &BigInt) -> BigInt {
        peer_public.modpow(&self.secret, self.parameters.n())
    }
}

impl fmt::Display for Participant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Participant(g={}, n={}, secret={})",
            self.parameters.g(),
            self.parameters.n(),
            self.secret
        )
    }
}

/// Everything observable about a completed exchange
///
/// Output only: a transcript is produced by [`KeyExchange::transcript`] and
/// is never decoded back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// Parameters both sides used
    pub parameters: ParameterSet,
    /// Alice's public value
    #[serde(with = "decimal")]
    pub alice_public: BigInt,
    /// Bob's public value
    #[serde(with = "decimal")]
    pub bob_public: BigInt,
    /// The secret both sides arrived at
    #[serde(with = "decimal")]
    pub shared: BigInt,
}

/// Key exchange operations
pub struct KeyExchange;

impl KeyExchange {
    /// Compute a participant's public value
    pub fn compute_public(participant: &Participant<'_>) -> BigInt {
        participant.public_value()
    }

    /// Compute the shared secret from a participant and its peer's public value
    pub fn compute_shared(participant: &Participant<'_>, peer_public: &BigInt) -> BigInt {
        participant.shared_secret(peer_public)
    }

    /// Run a full exchange between Alice and Bob and return the shared secret
    pub fn run(alice: &Participant<'_>, bob: &Participant<'_>) -> DhResult<BigInt> {
        Self::transcript(alice, bob).map(|transcript| transcript.shared)
    }

    /// Run a full exchange and keep the public values alongside the result
    ///
    /// Fails with [`DhError::ParameterMismatch`] when the two participants do
    /// not use equal parameters.
    pub fn transcript(alice: &Participant<'_>, bob: &Participant<'_>) -> DhResult<Transcript> {
        if alice.parameters() != bob.parameters() {
            return Err(DhError::ParameterMismatch {
                alice: alice.parameters().clone(),
                bob: bob.parameters().clone(),
            });
        }

        let alice_public = Self::compute_public(alice);
        debug!(%alice_public, "alice computed public value");
        let bob_public = Self::compute_public(bob);
        debug!(%bob_public, "bob computed public value");

        // (g^b)^a and (g^a)^b
        let alice_shared = Self::compute_shared(alice, &bob_public);
        let bob_shared = Self::compute_shared(bob, &alice_public);
        let shared = agree(alice_shared, bob_shared)?;

        Ok(Transcript {
            parameters: alice.parameters().clone(),
            alice_public,
            bob_public,
            shared,
        })
    }
}

fn agree(alice: BigInt, bob: BigInt) -> DhResult<BigInt> {
    if alice != bob {
        error!(%alice, %bob, "shared secrets disagree, aborting exchange");
        return Err(DhError::InternalInvariantViolation { alice, bob });
    }
    Ok(alice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ParameterSet {
        ParameterSet::new(5, 23).unwrap()
    }

    #[test]
    fn test_secret_too_small() {
        let params = params();
        for secret in [-3, 0, -100] {
            assert_eq!(
                Participant::new(&params, secret),
                Err(DhError::SecretOutOfRange(SecretError::TooSmall {
                    secret: BigInt::from(secret)
                }))
            );
        }
    }

    #[test]
    fn test_secret_too_large() {
        let params = params();
        for secret in [100, 1000, 20000] {
            assert_eq!(
                Participant::new(&params, secret),
                Err(DhError::SecretOutOfRange(SecretError::TooLarge {
                    secret: BigInt::from(secret),
                    n: BigInt::from(23),
                }))
            );
        }
    }

    #[test]
    fn test_secret_bounds_are_inclusive() {
        let params = params();
        assert!(Participant::new(&params, 1).is_ok());
        assert!(Participant::new(&params, 23).is_ok());
        assert!(Participant::new(&params, 24).is_err());
    }

    #[test]
    fn test_public_value() {
        let params = params();
        for (secret, public) in [(4, 4), (3, 10)] {
            let participant = Participant::new(&params, secret).unwrap();
            assert_eq!(KeyExchange::compute_public(&participant), BigInt::from(public));
        }
    }

    #[test]
    fn test_public_value_with_secret_equal_to_modulus() {
        // Fermat: g^n = g (mod n)
        let params = params();
        let participant = Participant::new(&params, 23).unwrap();
        assert_eq!(participant.public_value(), BigInt::from(5));
    }

    #[test]
    fn test_shared_secret() {
        let params = params();
        for (secret, public, shared) in [(4, 10, 18), (3, 4, 18)] {
            let participant = Participant::new(&params, secret).unwrap();
            assert_eq!(
                KeyExchange::compute_shared(&participant, &BigInt::from(public)),
                BigInt::from(shared)
            );
        }
    }

    #[test]
    fn test_basic_key_exchange() {
        let params = params();
        let alice = Participant::new(&params, 4).unwrap();
        let bob = Participant::new(&params, 3).unwrap();

        assert_eq!(KeyExchange::run(&alice, &bob), Ok(BigInt::from(18)));
    }

    #[test]
    fn test_exchange_is_symmetric() {
        let params = params();
        for a in 1..=23 {
            for b in 1..=23 {
                let alice = Participant::new(&params, a).unwrap();
                let bob = Participant::new(&params, b).unwrap();
                assert_eq!(KeyExchange::run(&alice, &bob), KeyExchange::run(&bob, &alice));
            }
        }
    }

    #[test]
    fn test_different_parameters_rejected() {
        let params = params();
        let other = ParameterSet::new(7, 23).unwrap();

        let alice = Participant::new(&params, 4).unwrap();
        let bob = Participant::new(&other, 3).unwrap();

        assert_eq!(
            KeyExchange::run(&alice, &bob),
            Err(DhError::ParameterMismatch {
                alice: params.clone(),
                bob: other.clone(),
            })
        );
    }

    #[test]
    fn test_equal_but_distinct_parameters_accepted() {
        let first = params();
        let second = params();

        let alice = Participant::new(&first, 4).unwrap();
        let bob = Participant::new(&second, 3).unwrap();

        assert_eq!(KeyExchange::run(&alice, &bob), Ok(BigInt::from(18)));
    }

    #[test]
    fn test_transcript() {
        let params = params();
        let alice = Participant::new(&params, 4).unwrap();
        let bob = Participant::new(&params, 3).unwrap();

        let transcript = KeyExchange::transcript(&alice, &bob).unwrap();
        assert_eq!(transcript.parameters, params);
        assert_eq!(transcript.alice_public, BigInt::from(4));
        assert_eq!(transcript.bob_public, BigInt::from(10));
        assert_eq!(transcript.shared, BigInt::from(18));
    }

    #[test]
    fn test_transcript_serialization() {
        let params = params();
        let alice = Participant::new(&params, 4).unwrap();
        let bob = Participant::new(&params, 3).unwrap();
        let transcript = KeyExchange::transcript(&alice, &bob).unwrap();

        let value = serde_json::to_value(&transcript).unwrap();
        assert_eq!(value["parameters"]["g"], "5");
        assert_eq!(value["parameters"]["n"], "23");
        assert_eq!(value["alice_public"], "4");
        assert_eq!(value["bob_public"], "10");
        assert_eq!(value["shared"], "18");
    }

    #[test]
    fn test_disagreement_is_internal_error() {
        let err = agree(BigInt::from(1), BigInt::from(2)).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(agree(BigInt::from(18), BigInt::from(18)), Ok(BigInt::from(18)));
    }

    #[test]
    fn test_display() {
        let params = params();
        let alice = Participant::new(&params, 4).unwrap();
        assert_eq!(alice.to_string(), "Participant(g=5, n=23, secret=4)");
    }
}
