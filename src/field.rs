//! Finite field.
//!
//! Base field of edwards25519: integers modulo p = 2^255 - 19. The type
//! is provided by the backend; it is re-exported here along with its
//! "not reduced" companion type.

pub use crate::backend::{GF25519, GF25519NotReduced};
