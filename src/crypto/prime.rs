//! Trial-division primality test
//!
//! Checks candidates of the form `6k ± 1` up to `√n`. This is exact but
//! slow: fine for the small moduli used to explain the protocol, hopeless
//! for real 2048-bit groups.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Outcome of a primality check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrimeCheck {
    /// The number is prime
    Prime,
    /// The number is not prime
    NotPrime {
        /// A number that divides the input evenly, when one was found.
        /// `None` for inputs at or below 3 (0, 1 and negatives).
        divisor: Option<BigInt>,
    },
}

impl PrimeCheck {
    /// Whether the checked number is prime
    pub fn is_prime(&self) -> bool {
        matches!(self, PrimeCheck::Prime)
    }

    /// The witness divisor, if any
    pub fn divisor(&self) -> Option<&BigInt> {
        match self {
            PrimeCheck::Prime => None,
            PrimeCheck::NotPrime { divisor } => divisor.as_ref(),
        }
    }

    fn witness(divisor: BigInt) -> Self {
        PrimeCheck::NotPrime {
            divisor: Some(divisor),
        }
    }
}

/// Determine whether `n` is prime
///
/// Anything at or below 3 is prime exactly when it is greater than 1; there
/// is no separate guard for negative numbers.
pub fn is_prime(n: &BigInt) -> PrimeCheck {
    if *n <= BigInt::from(3) {
        return if *n > BigInt::one() {
            PrimeCheck::Prime
        } else {
            PrimeCheck::NotPrime { divisor: None }
        };
    }
    if n.is_even() {
        return PrimeCheck::witness(BigInt::from(2));
    }
    if (n % 3u32).is_zero() {
        return PrimeCheck::witness(BigInt::from(3));
    }

    let mut i = BigInt::from(5);
    while &i * &i <= *n {
        if (n % &i).is_zero() {
            return PrimeCheck::witness(i);
        }
        let j = &i + 2u32;
        if (n % &j).is_zero() {
            return PrimeCheck::witness(j);
        }
        i += 6u32;
    }
    PrimeCheck::Prime
}
