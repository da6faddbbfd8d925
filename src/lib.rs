//! # dhke
//!
//! An explanatory Diffie-Hellman key exchange over arbitrary-precision
//! integers.
//!
//! Two parties agree on public parameters `(g, n)`, each picks a private
//! secret, and both end up with the same shared secret without ever sending
//! it. The parameters are validated exhaustively (trial-division primality,
//! exhaustive primitive-root search), which keeps every step easy to follow
//! but is only practical for small moduli.
//!
//! This is **not** a secure implementation: there is no constant-time
//! arithmetic and no secret generation.
//!
//! ## Quick Start
//!
//! ```rust
//! use dhke::{KeyExchange, ParameterSet, Participant};
//!
//! // Public parameters
//! let params = ParameterSet::new(5, 23).unwrap();
//!
//! // Private secrets
//! let alice = Participant::new(&params, 4).unwrap();
//! let bob = Participant::new(&params, 3).unwrap();
//!
//! // Public values are exchanged, the shared secret never is
//! let shared = KeyExchange::run(&alice, &bob).unwrap();
//! assert_eq!(shared.to_string(), "18");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! raw integers ─▶ ParameterSet ─▶ Participant ─▶ KeyExchange ─▶ shared secret
//!                 (prime, root)   (1 <= s <= n)  (g^a)^b = (g^b)^a
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod crypto;

// Re-export main types at crate root
pub use crypto::{
    DhError, DhResult, KeyExchange, ParameterSet, Participant, Transcript, ValidationPolicy,
    WeakModulus,
};
