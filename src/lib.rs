//! Edwards25519 arithmetic behind a generic elliptic curve interface.
//!
//! This library implements the group law and scalar multiplication on
//! the twisted Edwards curve edwards25519 (the curve used by Ed25519
//! signatures), and exposes it through a generic, coordinate-agnostic
//! curve interface where points are pairs of arbitrary-precision affine
//! coordinates.
//!
//! The crate is organized in layers:
//!
//!  - `backend` (re-exported through `field`) implements the base field
//!    GF(2^255 - 19) with 51-bit limbs.
//!
//!  - `ed25519` implements curve points in extended coordinates, the
//!    complete addition law, doublings, and scalar multiplication (for
//!    any point, and for the conventional base point with a lazily
//!    computed table). It also defines `Ed25519Curve`, the implementation
//!    of the generic interface.
//!
//!  - `radix` converts between field elements and `BigUint` values.
//!
//!  - `curve` defines the generic `Curve` trait, the curve parameters
//!    and affine point types, and the uncompressed point encoding
//!    (`marshal()` and `unmarshal()`).
//!
//! # Usage
//!
//! ```
//! use ed25519_curve::curve::{Curve, marshal, unmarshal};
//! use ed25519_curve::ed25519::Ed25519Curve;
//!
//! let curve = Ed25519Curve::new();
//! let k = [0x2Au8; 32];
//! let pk = curve.scalar_base_mult(&k);
//! assert!(curve.is_on_curve(&pk));
//! let enc = marshal(&curve, &pk);
//! assert!(unmarshal(&curve, &enc).unwrap() == pk);
//! ```
//!
//! # Conventions
//!
//! Operations on field elements and on curve points are constant-time
//! with regard to the values being processed (only the length of
//! variable-length inputs, such as scalars given as byte slices, may
//! leak). To avoid unwanted side-channel leaks, Booleans are avoided in
//! the field and point layers: functions that return a potentially
//! secret Boolean value use the `u32` type, with 0xFFFFFFFF meaning
//! "true" and 0x00000000 meaning "false". The generic curve interface,
//! which works on `BigUint` values, is not constant-time (big integer
//! arithmetic is not).
//!
//! Functions that modify the object on which they are called have a name
//! in `set_*()` (e.g. for a curve point `P`, `P.set_double()` modifies
//! the point in place, while `P.double()` returns the double as a new
//! instance).
//!
//! # Features
//!
//! The library is `no_std` and requires heap allocation (`alloc`).
//! Feature `std` (enabled by default) provides the synchronization for
//! the lazily built base point table, and implements
//! `std::error::Error` on the error type. On targets without `std`,
//! feature `critical-section` must be enabled instead.

#![no_std]

#[cfg(not(any(feature = "std", feature = "critical-section")))]
compile_error!("either the `std` or the `critical-section` feature must be enabled");

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod backend;
pub mod field;
pub mod error;
pub mod ed25519;
pub mod radix;
pub mod curve;

pub use error::{Error, Result};
