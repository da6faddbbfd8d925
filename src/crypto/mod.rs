//! Diffie-Hellman building blocks
//!
//! - `prime`: trial-division primality test
//! - `root`: primitive root check
//! - `params`: validated public parameters `(g, n)`
//! - `exchange`: participants and the exchange protocol
//! - `error`: error types shared by all of the above

pub mod error;
pub mod exchange;
pub mod params;
pub mod prime;
pub mod root;

// Re-export commonly used types
pub use error::{DhError, DhResult, ModulusError, SecretError};
pub use exchange::{KeyExchange, Participant, Transcript};
pub use params::{ParameterSet, ValidationPolicy, WeakModulus, RECOMMENDED_N_BIT_LENGTH};
pub use prime::{is_prime, PrimeCheck};
pub use root::{is_primitive_root_modulo_n, RootCheck, RootCollision};
