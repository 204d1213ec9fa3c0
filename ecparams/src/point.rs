//! Points on a [`CurveAlgebra`] and their byte encodings.
//!
//! Weierstrass points use the SEC1 / X9.62 encodings:
//!
//! - raw: `x ‖ y` with no tag
//! - uncompressed: `0x04 ‖ x ‖ y`
//! - compressed: `0x02 | (y mod 2) ‖ x`
//! - hybrid: `0x06 | (y mod 2) ‖ x ‖ y`
//!
//! Each coordinate is big-endian and exactly as wide as the field modulus.
//! The point at infinity is the single byte `0x00`.
//!
//! Twisted Edwards points always use the RFC 8032 encoding: little-endian `y`
//! with the parity of `x` in the most significant bit of the last byte.

use std::{fmt, str::FromStr, sync::Arc};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{
    Error, Result,
    bytes::{ByteOrder, to_fixed_bytes},
    edwards::ExtendedPoint,
    equation::{CurveAlgebra, CurveEdTw, CurveFp},
    projective::JacobianPoint,
};

/// Byte encoding of a Weierstrass point.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PointEncoding {
    /// `x ‖ y`, without a tag byte.
    Raw,

    /// `0x04 ‖ x ‖ y`.
    #[default]
    Uncompressed,

    /// `0x02` or `0x03` by parity of `y`, followed by `x`.
    Compressed,

    /// `0x06` or `0x07` by parity of `y`, followed by `x ‖ y`.
    Hybrid,
}

impl PointEncoding {
    /// Every encoding.
    pub const ALL: [Self; 4] = [Self::Raw, Self::Uncompressed, Self::Compressed, Self::Hybrid];

    /// Keyword naming this encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Uncompressed => "uncompressed",
            Self::Compressed => "compressed",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for PointEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_argument(
                    "Only 'raw', 'uncompressed', 'compressed' and 'hybrid' point encodings supported",
                )
            })
    }
}

/// Coordinates of a point, by curve family.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Coordinates {
    /// Jacobian coordinates on a short Weierstrass curve.
    Jacobian(JacobianPoint),

    /// Extended coordinates on a twisted Edwards curve.
    Extended(ExtendedPoint),
}

impl Coordinates {
    fn curve(&self) -> CurveAlgebra {
        match self {
            Self::Jacobian(p) => CurveAlgebra::Weierstrass(p.curve().clone()),
            Self::Extended(p) => CurveAlgebra::TwistedEdwards(p.curve().clone()),
        }
    }

    fn is_identity(&self) -> bool {
        match self {
            Self::Jacobian(p) => p.is_identity(),
            Self::Extended(p) => p.is_identity(),
        }
    }

    fn double(&self) -> Self {
        match self {
            Self::Jacobian(p) => Self::Jacobian(p.double()),
            Self::Extended(p) => Self::Extended(p.double()),
        }
    }

    fn neg(&self) -> Self {
        match self {
            Self::Jacobian(p) => Self::Jacobian(p.neg()),
            Self::Extended(p) => Self::Extended(p.neg()),
        }
    }

    fn mul(&self, k: &BigUint) -> Self {
        match self {
            Self::Jacobian(p) => Self::Jacobian(p.mul(k)),
            Self::Extended(p) => Self::Extended(p.mul(k)),
        }
    }

    fn add(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Jacobian(p), Self::Jacobian(q)) if same_curve(p.curve(), q.curve()) => {
                Ok(Self::Jacobian(p.add(q)))
            }
            (Self::Extended(p), Self::Extended(q)) if same_curve(p.curve(), q.curve()) => {
                Ok(Self::Extended(p.add(q)))
            }
            _ => Err(Error::invalid_argument("points belong to different curves")),
        }
    }
}

fn same_curve<C: PartialEq>(a: &Arc<C>, b: &Arc<C>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

/// A point on a short Weierstrass or twisted Edwards curve.
///
/// Besides its coordinates a point may carry the order of the subgroup it
/// generates and a flag marking it as a curve's designated generator. Both
/// are hints: equality only looks at the coordinates.
#[derive(Clone, Debug)]
pub struct Point {
    coordinates: Coordinates,
    order: Option<BigUint>,
    generator: bool,
}

impl Point {
    /// The identity element of `curve`.
    pub fn identity(curve: &CurveAlgebra) -> Self {
        let coordinates = match curve {
            CurveAlgebra::Weierstrass(c) => Coordinates::Jacobian(JacobianPoint::identity(c.clone())),
            CurveAlgebra::TwistedEdwards(c) => {
                Coordinates::Extended(ExtendedPoint::identity(c.clone()))
            }
        };
        Self::from_coordinates(coordinates)
    }

    /// Create a point from affine coordinates, checking it lies on `curve`.
    pub fn from_affine(curve: &CurveAlgebra, x: BigUint, y: BigUint) -> Result<Self> {
        if !curve.contains_point(&x, &y) {
            return Err(Error::invalid_argument("point does not lie on the curve"));
        }

        Ok(Self::from_affine_unchecked(curve, x, y))
    }

    pub(crate) fn from_affine_unchecked(curve: &CurveAlgebra, x: BigUint, y: BigUint) -> Self {
        let coordinates = match curve {
            CurveAlgebra::Weierstrass(c) => {
                Coordinates::Jacobian(JacobianPoint::from_affine(c.clone(), x, y))
            }
            CurveAlgebra::TwistedEdwards(c) => {
                Coordinates::Extended(ExtendedPoint::from_affine(c.clone(), x, y))
            }
        };
        Self::from_coordinates(coordinates)
    }

    fn from_coordinates(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            order: None,
            generator: false,
        }
    }

    /// Mark this point as a curve generator of the given order.
    ///
    /// Fails if the point is the identity, `order` is zero, or
    /// `order · self` is not the identity.
    pub fn into_generator(self, order: BigUint) -> Result<Self> {
        if order.is_zero() {
            return Err(Error::invalid_argument("generator order must be positive"));
        }

        if self.is_identity() {
            return Err(Error::invalid_argument("generator must not be the point at infinity"));
        }

        if !self.coordinates.mul(&order).is_identity() {
            return Err(Error::invalid_argument("order does not annihilate the generator"));
        }

        Ok(self.with_order(order, true))
    }

    pub(crate) fn with_order(mut self, order: BigUint, generator: bool) -> Self {
        self.order = Some(order);
        self.generator = generator;
        self
    }

    /// Derive a new point on the same subgroup. Results of arithmetic are
    /// never generators.
    fn derive(&self, coordinates: Coordinates, order: Option<BigUint>) -> Self {
        Self {
            coordinates,
            order,
            generator: false,
        }
    }

    /// Curve equation this point belongs to.
    pub fn curve(&self) -> CurveAlgebra {
        self.coordinates.curve()
    }

    /// Underlying projective coordinates.
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Order of the subgroup generated by this point, if known.
    pub fn order(&self) -> Option<&BigUint> {
        self.order.as_ref()
    }

    /// Is this point a curve's designated generator?
    pub fn is_generator(&self) -> bool {
        self.generator
    }

    /// Is this the identity element?
    pub fn is_identity(&self) -> bool {
        self.coordinates.is_identity()
    }

    /// Affine coordinates, or `None` for the Weierstrass point at infinity.
    pub fn to_affine(&self) -> Option<(BigUint, BigUint)> {
        match &self.coordinates {
            Coordinates::Jacobian(p) => p.to_affine(),
            Coordinates::Extended(p) => Some(p.to_affine()),
        }
    }

    /// Returns `self + other`. Both points must lie on the same curve.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let coordinates = self.coordinates.add(&other.coordinates)?;
        let order = match (&self.order, &other.order) {
            (Some(a), Some(b)) if a == b => Some(a.clone()),
            _ => None,
        };
        Ok(self.derive(coordinates, order))
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        self.derive(self.coordinates.double(), self.order.clone())
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        self.derive(self.coordinates.neg(), self.order.clone())
    }

    /// Returns `[k] self`. When the order is known `k` is reduced by it
    /// first, so `k ≡ 0` yields the identity.
    pub fn mul(&self, k: &BigUint) -> Self {
        let coordinates = match &self.order {
            Some(order) => self.coordinates.mul(&(k % order)),
            None => self.coordinates.mul(k),
        };
        self.derive(coordinates, self.order.clone())
    }

    /// Serialize this point.
    ///
    /// `encoding` selects the SEC1 form for Weierstrass points and is
    /// ignored for twisted Edwards points.
    pub fn to_bytes(&self, encoding: PointEncoding) -> Vec<u8> {
        match &self.coordinates {
            Coordinates::Jacobian(p) => encode_sec1(p, encoding),
            Coordinates::Extended(p) => encode_edwards(p),
        }
    }

    /// Decode a point on `curve`, accepting only the listed SEC1 encodings.
    ///
    /// The single byte `0x00` decodes to the point at infinity. When
    /// [`PointEncoding::Raw`] is allowed, input of exactly twice the
    /// coordinate length is read as raw before any prefix byte is looked at.
    /// Twisted Edwards points are always RFC 8032 encoded and `allowed` is
    /// ignored.
    pub fn from_bytes(curve: &CurveAlgebra, data: &[u8], allowed: &[PointEncoding]) -> Result<Self> {
        let coordinates = match curve {
            CurveAlgebra::Weierstrass(c) => Coordinates::Jacobian(decode_sec1(c, data, allowed)?),
            CurveAlgebra::TwistedEdwards(c) => Coordinates::Extended(decode_edwards(c, data)?),
        };
        Ok(Self::from_coordinates(coordinates))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl Eq for Point {}

fn encode_sec1(point: &JacobianPoint, encoding: PointEncoding) -> Vec<u8> {
    let Some((x, y)) = point.to_affine() else {
        return vec![0x00];
    };

    let len = point.curve().field().byte_len();
    let x = to_fixed_bytes(&x, len, ByteOrder::Big);
    let parity = u8::from(y.is_odd());
    let y = to_fixed_bytes(&y, len, ByteOrder::Big);

    match encoding {
        PointEncoding::Raw => [x, y].concat(),
        PointEncoding::Uncompressed => [vec![0x04], x, y].concat(),
        PointEncoding::Compressed => [vec![0x02 | parity], x].concat(),
        PointEncoding::Hybrid => [vec![0x06 | parity], x, y].concat(),
    }
}

fn decode_sec1(
    curve: &Arc<CurveFp>,
    data: &[u8],
    allowed: &[PointEncoding],
) -> Result<JacobianPoint> {
    if data == [0x00] {
        return Ok(JacobianPoint::identity(curve.clone()));
    }

    let f = curve.field();
    let len = f.byte_len();
    let (encoding, body) = match (data.len(), data.first()) {
        (n, _) if n == 2 * len && allowed.contains(&PointEncoding::Raw) => {
            (PointEncoding::Raw, data)
        }
        (n, Some(0x04)) if n == 2 * len + 1 => (PointEncoding::Uncompressed, &data[1..]),
        (n, Some(0x06 | 0x07)) if n == 2 * len + 1 => (PointEncoding::Hybrid, &data[1..]),
        (n, Some(0x02 | 0x03)) if n == len + 1 => (PointEncoding::Compressed, &data[1..]),
        _ => return Err(Error::malformed("Invalid X9.62 encoding of the public point")),
    };

    if !allowed.contains(&encoding) {
        return Err(Error::malformed(format!("{encoding} point encoding not allowed")));
    }

    let x = BigUint::from_bytes_be(&body[..len]);
    if !f.contains(&x) {
        return Err(Error::malformed("point coordinate exceeds the field modulus"));
    }

    let odd_tag = data[0] & 1 == 1;
    let y = match encoding {
        PointEncoding::Compressed => {
            let beta = f
                .sqrt(&curve.rhs(&x))
                .ok_or_else(|| Error::malformed("Encoding does not correspond to a point on curve"))?;
            if beta.is_zero() && odd_tag {
                return Err(Error::malformed("Encoding does not correspond to a point on curve"));
            }
            if beta.is_odd() == odd_tag {
                beta
            } else {
                f.neg(&beta)
            }
        }
        _ => {
            let y = BigUint::from_bytes_be(&body[len..]);
            if encoding == PointEncoding::Hybrid && y.is_odd() != odd_tag {
                return Err(Error::malformed("Inconsistent hybrid point encoding"));
            }
            y
        }
    };

    if !curve.contains_point(&x, &y) {
        return Err(Error::malformed("Point does not lie on the curve"));
    }

    Ok(JacobianPoint::from_affine(curve.clone(), x, y))
}

/// Length of an RFC 8032 encoding: `bits(p) + 1` bits, rounded up to bytes.
fn edwards_len(curve: &CurveEdTw) -> usize {
    (curve.field().bits() + 1).div_ceil(8)
}

fn encode_edwards(point: &ExtendedPoint) -> Vec<u8> {
    let (x, y) = point.to_affine();
    let mut out = to_fixed_bytes(&y, edwards_len(point.curve()), ByteOrder::Little);
    if let Some(last) = out.last_mut() {
        *last |= u8::from(x.is_odd()) << 7;
    }
    out
}

fn decode_edwards(curve: &Arc<CurveEdTw>, data: &[u8]) -> Result<ExtendedPoint> {
    if data.len() != edwards_len(curve) {
        return Err(Error::malformed("Point length doesn't match the curve"));
    }

    let mut y_bytes = data.to_vec();
    let mut x_odd = false;
    if let Some(last) = y_bytes.last_mut() {
        x_odd = *last & 0x80 != 0;
        *last &= 0x7f;
    }

    let f = curve.field();
    let y = BigUint::from_bytes_le(&y_bytes);
    if !f.contains(&y) {
        return Err(Error::malformed("point coordinate exceeds the field modulus"));
    }

    // x² = (y² - 1) / (d·y² - a)
    let y2 = f.square(&y);
    let num = f.sub(&y2, &BigUint::one());
    let den = f.sub(&f.mul(curve.d(), &y2), curve.a());
    let x2 = f.mul(
        &num,
        &f.invert(&den)
            .ok_or_else(|| Error::malformed("Encoding does not correspond to a point on curve"))?,
    );
    let x = f
        .sqrt(&x2)
        .ok_or_else(|| Error::malformed("Encoding does not correspond to a point on curve"))?;

    if x.is_zero() && x_odd {
        return Err(Error::malformed("Encoding does not correspond to a point on curve"));
    }

    let x = if x.is_odd() == x_odd { x } else { f.neg(&x) };
    if !curve.contains_point(&x, &y) {
        return Err(Error::malformed("Point does not lie on the curve"));
    }

    Ok(ExtendedPoint::from_affine(curve.clone(), x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use hex_literal::hex;

    const P256_COMPRESSED: [u8; 33] =
        hex!("036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");

    fn p256_generator() -> Point {
        registry::find_by_name("NIST256p").unwrap().generator().clone()
    }

    fn small_curve() -> CurveAlgebra {
        CurveFp::new(23u32.into(), 1u32.into(), 7u32.into(), None)
            .unwrap()
            .into()
    }

    #[test]
    fn p256_encodings() {
        let g = p256_generator();
        let curve = g.curve();

        assert_eq!(g.to_bytes(PointEncoding::Compressed), P256_COMPRESSED);

        for encoding in PointEncoding::ALL {
            let bytes = g.to_bytes(encoding);
            let decoded = Point::from_bytes(&curve, &bytes, &PointEncoding::ALL).unwrap();
            assert_eq!(decoded, g, "{encoding}");
        }
    }

    #[test]
    fn uncompressed_tag_and_length() {
        let bytes = p256_generator().to_bytes(PointEncoding::Uncompressed);
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
        assert_eq!(&bytes[1..33], &P256_COMPRESSED[1..]);
    }

    #[test]
    fn disallowed_encoding() {
        let g = p256_generator();
        let bytes = g.to_bytes(PointEncoding::Compressed);
        let err = Point::from_bytes(&g.curve(), &bytes, &[PointEncoding::Uncompressed]).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn hybrid_parity_mismatch() {
        let g = p256_generator();
        let mut bytes = g.to_bytes(PointEncoding::Hybrid);
        bytes[0] ^= 1;
        assert!(Point::from_bytes(&g.curve(), &bytes, &PointEncoding::ALL).is_err());
    }

    #[test]
    fn off_curve_point_rejected() {
        let g = p256_generator();
        let mut bytes = g.to_bytes(PointEncoding::Uncompressed);
        bytes[64] ^= 1;
        let err = Point::from_bytes(&g.curve(), &bytes, &PointEncoding::ALL).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn wrong_length_rejected() {
        let g = p256_generator();
        let bytes = g.to_bytes(PointEncoding::Uncompressed);
        assert!(Point::from_bytes(&g.curve(), &bytes[..64], &[PointEncoding::Uncompressed]).is_err());
    }

    #[test]
    fn identity_round_trip() {
        let identity = Point::identity(&p256_generator().curve());
        assert_eq!(identity.to_bytes(PointEncoding::Compressed), [0x00]);
        let decoded = Point::from_bytes(&identity.curve(), &[0x00], &[]).unwrap();
        assert!(decoded.is_identity());
    }

    /// With a one-byte field, raw and compressed encodings have the same
    /// length; the tag decides unless raw is allowed.
    #[test]
    fn short_field_raw_and_compressed() {
        let curve = small_curve();
        let g = Point::from_affine(&curve, 13u32.into(), 3u32.into()).unwrap();

        assert_eq!(g.to_bytes(PointEncoding::Compressed), [0x03, 13]);
        assert_eq!(g.to_bytes(PointEncoding::Raw), [13, 3]);

        let compressed = [PointEncoding::Compressed];
        assert_eq!(Point::from_bytes(&curve, &[0x03, 13], &compressed).unwrap(), g);

        let raw = [PointEncoding::Raw];
        assert!(Point::from_bytes(&curve, &[0x03, 13], &raw).is_err());
    }

    #[test]
    fn scalar_mul_reduces_by_order() {
        let g = Point::from_affine(&small_curve(), 13u32.into(), 3u32.into())
            .unwrap()
            .into_generator(9u32.into())
            .unwrap();

        assert!(g.is_generator());
        assert!(g.mul(&9u32.into()).is_identity());
        assert!(g.mul(&18u32.into()).is_identity());
        assert_eq!(g.mul(&11u32.into()), g.double());
        assert!(!g.double().is_generator());
    }

    #[test]
    fn into_generator_checks_order() {
        let g = Point::from_affine(&small_curve(), 13u32.into(), 3u32.into()).unwrap();
        assert!(g.into_generator(6u32.into()).is_err());
    }

    #[test]
    fn into_generator_rejects_zero_order() {
        let g = Point::from_affine(&small_curve(), 13u32.into(), 3u32.into()).unwrap();
        let err = g.into_generator(BigUint::zero()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn mixing_curves_is_an_error() {
        let a = Point::from_affine(&small_curve(), 13u32.into(), 3u32.into()).unwrap();
        let err = a.add(&p256_generator()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn edwards_generator_encodings() {
        for (name, expected) in [
            (
                "Ed25519",
                hex!("5866666666666666666666666666666666666666666666666666666666666666").to_vec(),
            ),
            (
                "Ed448",
                hex!(
                    "14fa30f25b790898adc8d74e2c13bdfdc4397ce61cffd33ad7c2a0051e9c7887"
                    "4098a36c7373ea4b62c7c9563720768824bcb66e71463f6900"
                )
                .to_vec(),
            ),
        ] {
            let g = registry::find_by_name(name).unwrap().generator().clone();
            let bytes = g.to_bytes(PointEncoding::Compressed);
            assert_eq!(bytes, expected, "{name}");
            assert_eq!(Point::from_bytes(&g.curve(), &bytes, &[]).unwrap(), g, "{name}");
        }
    }

    #[test]
    fn edwards_identity_encoding() {
        let g = registry::find_by_name("Ed25519").unwrap().generator().clone();
        let identity = Point::identity(&g.curve());
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(identity.to_bytes(PointEncoding::Raw), expected);
    }

    #[test]
    fn encoding_keywords() {
        assert_eq!("hybrid".parse::<PointEncoding>().unwrap(), PointEncoding::Hybrid);
        assert!("sparse".parse::<PointEncoding>().unwrap_err().is_invalid_argument());
    }
}
