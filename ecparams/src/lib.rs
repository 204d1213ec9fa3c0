#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Logging
//!
//! Decoding emits [`tracing`] events: `debug` at each decision of the
//! `ECParameters` decoder and `warn` when explicit parameters do not match
//! any registered curve. No subscriber is installed by this crate.

pub mod bytes;
pub mod curve;
pub mod edwards;
pub mod equation;
pub mod field;
pub mod parameters;
pub mod point;
pub mod projective;
pub mod registry;
pub mod shake;

mod error;
mod keccak;
mod lookup_table;

pub use crate::{
    bytes::{ByteOrder, bytes_to_int, int_to_bytes},
    curve::{Curve, ParameterEncoding},
    equation::{CurveAlgebra, CurveEdTw, CurveFp},
    error::{Error, Result},
    field::PrimeField,
    parameters::CurveSeed,
    point::{Point, PointEncoding},
    shake::{Shake256, shake_256},
};
pub use der::asn1::ObjectIdentifier;
pub use num_bigint::BigUint;
