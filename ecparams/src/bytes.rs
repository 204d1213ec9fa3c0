//! Conversions between arbitrary-precision integers and byte strings.

use core::{fmt, str::FromStr};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Error, Result};

/// Byte order of an integer serialization.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    Big,

    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Keyword naming this byte order.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Big => "big",
            Self::Little => "little",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "big" => Ok(Self::Big),
            "little" => Ok(Self::Little),
            other => Err(Error::invalid_argument(format!(
                "byte order must be either 'big' or 'little', got '{other}'"
            ))),
        }
    }
}

/// Interpret `data` as an unsigned integer in the given byte order.
///
/// An empty slice is zero.
pub fn bytes_to_int(data: &[u8], order: ByteOrder) -> BigUint {
    match order {
        ByteOrder::Big => BigUint::from_bytes_be(data),
        ByteOrder::Little => BigUint::from_bytes_le(data),
    }
}

/// Serialize `value` as an unsigned integer in the given byte order.
///
/// Without a `length` the output is the minimal number of bytes holding
/// `value`, which is the empty string for zero. With a `length` the output
/// is zero-padded to exactly that many bytes, and it is an error if `value`
/// needs more.
pub fn int_to_bytes(value: &BigUint, length: Option<usize>, order: ByteOrder) -> Result<Vec<u8>> {
    let minimal = minimal_len(value);
    let length = match length {
        Some(length) if length < minimal => {
            return Err(Error::invalid_argument(format!(
                "integer of {minimal} bytes does not fit in {length} bytes"
            )));
        }
        Some(length) => length,
        None => minimal,
    };

    Ok(to_fixed_bytes(value, length, order))
}

/// Serialize `value` into exactly `length` bytes.
///
/// The caller guarantees `value` fits; excess high-order bytes would be
/// dropped.
pub(crate) fn to_fixed_bytes(value: &BigUint, length: usize, order: ByteOrder) -> Vec<u8> {
    let mut out = vec![0u8; length];
    if value.is_zero() {
        return out;
    }

    match order {
        ByteOrder::Big => {
            let be = value.to_bytes_be();
            let src = &be[be.len().saturating_sub(length)..];
            out[length - src.len()..].copy_from_slice(src);
        }
        ByteOrder::Little => {
            let le = value.to_bytes_le();
            let n = le.len().min(length);
            out[..n].copy_from_slice(&le[..n]);
        }
    }

    out
}

/// Number of bytes needed to hold `value`.
pub(crate) fn minimal_len(value: &BigUint) -> usize {
    value.bits().div_ceil(8) as usize
}
