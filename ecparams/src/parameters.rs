//! `ECParameters` DER codec (SEC 1 v2 § C.2, RFC 5480 § 2.1.1).
//!
//! ```text
//! ECParameters ::= CHOICE {
//!   namedCurve     OBJECT IDENTIFIER,
//!   specifiedCurve SpecifiedECDomain }
//!
//! SpecifiedECDomain ::= SEQUENCE {
//!   version   INTEGER { ecdpVer1(1) },
//!   fieldID   FieldID {{ FieldTypes }},
//!   curve     Curve,
//!   base      ECPoint,
//!   order     INTEGER,
//!   cofactor  INTEGER OPTIONAL }
//!
//! Curve ::= SEQUENCE {
//!   a     FieldElement,
//!   b     FieldElement,
//!   seed  BIT STRING OPTIONAL }
//! ```
//!
//! Only prime fields are supported. Twisted Edwards curves can only be
//! encoded by name.

use std::sync::Arc;

use der::{
    Decode, Encode, Reader, SliceReader, Tag, Tagged,
    asn1::{AnyRef, BitStringRef, ObjectIdentifier, OctetStringRef, UintRef},
};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::{debug, warn};

use crate::{
    Error, Result,
    bytes::{ByteOrder, to_fixed_bytes},
    curve::{Curve, ParameterEncoding},
    equation::{CurveAlgebra, CurveFp},
    field::PrimeField,
    point::{Point, PointEncoding},
    registry,
};

/// `prime-field` from ANSI X9.62.
pub const PRIME_FIELD_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.1.1");

/// `characteristic-two-field` from ANSI X9.62.
pub const CHARACTERISTIC_TWO_FIELD_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.1.2");

/// Base point encodings accepted inside explicit parameters.
const BASE_POINT_ENCODINGS: [PointEncoding; 3] = [
    PointEncoding::Uncompressed,
    PointEncoding::Compressed,
    PointEncoding::Hybrid,
];

/// Name given to decoded curves that are not in the registry.
const UNKNOWN_CURVE_NAME: &str = "unknown";

/// The optional `seed` of an explicit curve, kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveSeed {
    unused_bits: u8,
    bytes: Vec<u8>,
}

impl CurveSeed {
    /// Create a seed from the contents of a `BIT STRING`.
    pub fn new(unused_bits: u8, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if unused_bits > 7 || (bytes.is_empty() && unused_bits != 0) {
            return Err(Error::invalid_argument("invalid seed bit string"));
        }

        Ok(Self { unused_bits, bytes })
    }

    /// Number of padding bits in the last byte.
    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    /// Seed bytes, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub(crate) fn encode_named(curve: &Curve) -> Result<Vec<u8>> {
    let oid = curve.oid().ok_or_else(|| {
        Error::unknown_curve(
            "Can't encode curve using named_curve encoding without associated curve OID",
        )
    })?;

    Ok(oid.to_der()?)
}

pub(crate) fn encode_explicit(curve: &Curve, point_encoding: PointEncoding) -> Result<Vec<u8>> {
    let CurveAlgebra::Weierstrass(equation) = curve.algebra() else {
        return Err(Error::unknown_curve(
            "Twisted Edwards curves don't support explicit encoding",
        ));
    };

    if point_encoding == PointEncoding::Raw {
        return Err(Error::invalid_argument(
            "Only 'uncompressed', 'compressed' and 'hybrid' base point encodings supported",
        ));
    }

    let len = equation.field().byte_len();
    let field_id = sequence(&[PRIME_FIELD_OID.to_der()?, encode_uint(equation.p())?])?;

    let mut coefficients = vec![
        octet_string(&to_fixed_bytes(equation.a(), len, ByteOrder::Big))?,
        octet_string(&to_fixed_bytes(equation.b(), len, ByteOrder::Big))?,
    ];
    if let Some(seed) = curve.seed() {
        coefficients.push(BitStringRef::new(seed.unused_bits, &seed.bytes)?.to_der()?);
    }

    let mut fields = vec![
        encode_uint(&BigUint::one())?,
        field_id,
        sequence(&coefficients)?,
        octet_string(&curve.generator().to_bytes(point_encoding))?,
        encode_uint(curve.order())?,
    ];
    if let Some(cofactor) = curve.cofactor() {
        fields.push(encode_uint(cofactor)?);
    }

    sequence(&fields)
}

pub(crate) fn decode(data: &[u8], valid_encodings: &[ParameterEncoding]) -> Result<Arc<Curve>> {
    let mut reader = SliceReader::new(data)?;

    match reader.peek_tag()? {
        Tag::ObjectIdentifier => {
            if !valid_encodings.contains(&ParameterEncoding::NamedCurve) {
                return Err(Error::malformed("named_curve curve parameters not allowed"));
            }

            let oid = ObjectIdentifier::decode(&mut reader)?;
            if !reader.is_finished() {
                return Err(Error::malformed("Unexpected data after OID"));
            }

            debug!(%oid, "decoding named curve parameters");
            registry::find_by_oid(&oid).cloned()
        }
        Tag::Sequence => {
            if !valid_encodings.contains(&ParameterEncoding::Explicit) {
                return Err(Error::malformed("explicit curve parameters not allowed"));
            }

            let domain = AnyRef::decode(&mut reader)?;
            if !reader.is_finished() {
                return Err(Error::malformed("Unexpected data after ECParameters"));
            }

            decode_explicit(domain.value())
        }
        tag => {
            debug!(%tag, "unrecognized ECParameters form");
            Err(Error::malformed("Unknown parameter encoding format"))
        }
    }
}

fn decode_explicit(domain: &[u8]) -> Result<Arc<Curve>> {
    let mut reader = SliceReader::new(domain)?;

    let version = decode_uint(&mut reader)?;
    if !version.is_one() {
        return Err(Error::malformed("Unknown parameter encoding format"));
    }

    let field = decode_field_id(&mut reader)?;
    let (a, b, seed) = decode_coefficients(&mut reader, &field)?;
    let base = OctetStringRef::decode(&mut reader)?;
    let order = decode_uint(&mut reader)?;
    if order.is_zero() {
        return Err(Error::malformed("Curve order must be positive"));
    }
    let cofactor = if reader.is_finished() {
        None
    } else {
        Some(decode_uint(&mut reader)?)
    };
    if !reader.is_finished() {
        return Err(Error::malformed("Unexpected data after ECParameters"));
    }

    let algebra = CurveAlgebra::from(CurveFp::from_field(field, a, b, cofactor));
    let generator = Point::from_bytes(&algebra, base.as_bytes(), &BASE_POINT_ENCODINGS)?;
    if generator.is_identity() {
        return Err(Error::malformed("Base point is the point at infinity"));
    }
    let generator = generator.with_order(order.clone(), true);

    if let Some(curve) = registry::find_by_params(&algebra, &generator, &order) {
        debug!(curve = curve.name(), "explicit parameters match a registered curve");
        return Ok(curve.clone());
    }

    warn!(p = %algebra.p(), "explicit parameters do not match any registered curve");
    let mut curve = Curve::from_generator(UNKNOWN_CURVE_NAME.into(), generator, order, None);
    if let Some(seed) = seed {
        curve = curve.with_seed(seed);
    }
    Ok(Arc::new(curve))
}

fn decode_field_id(reader: &mut SliceReader<'_>) -> Result<PrimeField> {
    let field_id = AnyRef::decode(reader)?;
    field_id.tag().assert_eq(Tag::Sequence)?;

    let mut reader = SliceReader::new(field_id.value())?;
    let field_type = ObjectIdentifier::decode(&mut reader)?;

    if field_type == CHARACTERISTIC_TWO_FIELD_OID {
        debug!(%field_type, "rejecting binary field");
        return Err(Error::unknown_curve("Characteristic 2 curves unsupported"));
    }

    if field_type != PRIME_FIELD_OID {
        debug!(%field_type, "rejecting unknown field type");
        return Err(Error::unknown_curve(format!(
            "Unknown field type: {field_type}"
        )));
    }

    let p = decode_uint(&mut reader)?;
    if !reader.is_finished() {
        return Err(Error::malformed(
            "Unexpected data after ECParameters fieldID.Prime-p element",
        ));
    }

    PrimeField::new(p).map_err(|_| Error::malformed("field modulus is not an odd prime"))
}

fn decode_coefficients(
    reader: &mut SliceReader<'_>,
    field: &PrimeField,
) -> Result<(BigUint, BigUint, Option<CurveSeed>)> {
    let coefficients = AnyRef::decode(reader)?;
    coefficients.tag().assert_eq(Tag::Sequence)?;

    let mut reader = SliceReader::new(coefficients.value())?;
    let a = BigUint::from_bytes_be(OctetStringRef::decode(&mut reader)?.as_bytes());
    let b = BigUint::from_bytes_be(OctetStringRef::decode(&mut reader)?.as_bytes());

    let seed = if reader.is_finished() {
        None
    } else {
        let seed = BitStringRef::decode(&mut reader)?;
        Some(CurveSeed {
            unused_bits: seed.unused_bits(),
            bytes: seed.raw_bytes().to_vec(),
        })
    };

    if !reader.is_finished() {
        return Err(Error::malformed("Unexpected data after ECParameters curve element"));
    }

    Ok((field.reduce(&a), field.reduce(&b), seed))
}

fn decode_uint(reader: &mut SliceReader<'_>) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(UintRef::decode(reader)?.as_bytes()))
}

fn encode_uint(value: &BigUint) -> Result<Vec<u8>> {
    Ok(UintRef::new(&value.to_bytes_be())?.to_der()?)
}

fn octet_string(bytes: &[u8]) -> Result<Vec<u8>> {
    Ok(OctetStringRef::new(bytes)?.to_der()?)
}

/// Wrap already-encoded elements in a `SEQUENCE`.
fn sequence(elements: &[Vec<u8>]) -> Result<Vec<u8>> {
    Ok(AnyRef::new(Tag::Sequence, &elements.concat())?.to_der()?)
}
