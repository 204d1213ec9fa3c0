//! Elliptic curve domain parameters.

use std::{fmt, str::FromStr, sync::Arc};

use der::asn1::ObjectIdentifier;
use num_bigint::BigUint;

use crate::{
    Error, Result,
    equation::CurveAlgebra,
    parameters::{self, CurveSeed},
    point::{Point, PointEncoding},
};

#[cfg(feature = "pem")]
use base64ct::{Base64, Encoding};
#[cfg(feature = "pem")]
use pem_rfc7468::LineEnding;

/// PEM label of an `ECParameters` document.
#[cfg(feature = "pem")]
pub const PEM_LABEL: &str = "EC PARAMETERS";

/// Form of an `ECParameters` encoding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParameterEncoding {
    /// Just the curve OID.
    NamedCurve,

    /// Field, coefficients, base point, order and cofactor spelled out.
    Explicit,
}

impl ParameterEncoding {
    /// Both forms, in the order they are tried.
    pub const ALL: [Self; 2] = [Self::NamedCurve, Self::Explicit];

    /// Keyword naming this form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NamedCurve => "named_curve",
            Self::Explicit => "explicit",
        }
    }
}

impl fmt::Display for ParameterEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "named_curve" => Ok(Self::NamedCurve),
            "explicit" => Ok(Self::Explicit),
            _ => Err(Error::invalid_argument(
                "Only 'named_curve' and 'explicit' encodings supported",
            )),
        }
    }
}

/// Domain parameters of an elliptic curve: the curve equation, a generator
/// and its order, plus identifying metadata.
///
/// Two curves are equal when their equations and generators are equal.
/// Name, OID, cofactor and seed do not take part in the comparison.
#[derive(Clone, Debug)]
pub struct Curve {
    name: String,
    openssl_name: Option<String>,
    algebra: CurveAlgebra,
    generator: Point,
    order: BigUint,
    oid: Option<ObjectIdentifier>,
    seed: Option<CurveSeed>,
}

impl Curve {
    /// Create a curve from its generator.
    ///
    /// The generator must carry its order, see [`Point::into_generator`].
    pub fn new(
        name: impl Into<String>,
        generator: Point,
        oid: Option<ObjectIdentifier>,
    ) -> Result<Self> {
        let order = match generator.order() {
            Some(order) if generator.is_generator() => order.clone(),
            _ => {
                return Err(Error::invalid_argument(
                    "curve generator must be marked as a generator with a known order",
                ));
            }
        };

        Ok(Self::from_generator(name.into(), generator, order, oid))
    }

    pub(crate) fn from_generator(
        name: String,
        generator: Point,
        order: BigUint,
        oid: Option<ObjectIdentifier>,
    ) -> Self {
        Self {
            name,
            openssl_name: None,
            algebra: generator.curve(),
            generator,
            order,
            oid,
            seed: None,
        }
    }

    /// Set the name OpenSSL uses for this curve.
    pub fn with_openssl_name(mut self, name: impl Into<String>) -> Self {
        self.openssl_name = Some(name.into());
        self
    }

    /// Attach the seed the curve was generated from.
    pub fn with_seed(mut self, seed: CurveSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name OpenSSL uses for this curve, if any.
    pub fn openssl_name(&self) -> Option<&str> {
        self.openssl_name.as_deref()
    }

    /// Curve equation.
    pub fn algebra(&self) -> &CurveAlgebra {
        &self.algebra
    }

    /// Designated base point.
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Order of the generator.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Cofactor, if known.
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.algebra.cofactor()
    }

    /// Object identifier naming this curve, if any.
    pub fn oid(&self) -> Option<&ObjectIdentifier> {
        self.oid.as_ref()
    }

    /// Seed from the explicit parameters this curve was decoded from.
    pub fn seed(&self) -> Option<&CurveSeed> {
        self.seed.as_ref()
    }

    /// Encode as `ECParameters`: the named form when the curve has an OID,
    /// explicit otherwise, with an uncompressed base point.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let encoding = match self.oid {
            Some(_) => ParameterEncoding::NamedCurve,
            None => ParameterEncoding::Explicit,
        };
        self.to_der_with(encoding, PointEncoding::Uncompressed)
    }

    /// Encode as `ECParameters` in the given form.
    ///
    /// `point_encoding` selects the base point format of the explicit form
    /// and must not be [`PointEncoding::Raw`].
    pub fn to_der_with(
        &self,
        encoding: ParameterEncoding,
        point_encoding: PointEncoding,
    ) -> Result<Vec<u8>> {
        match encoding {
            ParameterEncoding::NamedCurve => parameters::encode_named(self),
            ParameterEncoding::Explicit => parameters::encode_explicit(self, point_encoding),
        }
    }

    /// Decode `ECParameters` in either form.
    ///
    /// Parameters matching a registered curve return that curve's shared
    /// instance.
    pub fn from_der(data: &[u8]) -> Result<Arc<Self>> {
        Self::from_der_with(data, &ParameterEncoding::ALL)
    }

    /// Decode `ECParameters`, accepting only the listed forms.
    pub fn from_der_with(data: &[u8], valid_encodings: &[ParameterEncoding]) -> Result<Arc<Self>> {
        parameters::decode(data, valid_encodings)
    }

    /// Encode as an `EC PARAMETERS` PEM document, see [`Curve::to_der`].
    #[cfg(feature = "pem")]
    pub fn to_pem(&self) -> Result<String> {
        Ok(pem_rfc7468::encode_string(
            PEM_LABEL,
            LineEnding::LF,
            &self.to_der()?,
        )?)
    }

    /// Encode as an `EC PARAMETERS` PEM document in the given form.
    #[cfg(feature = "pem")]
    pub fn to_pem_with(
        &self,
        encoding: ParameterEncoding,
        point_encoding: PointEncoding,
    ) -> Result<String> {
        Ok(pem_rfc7468::encode_string(
            PEM_LABEL,
            LineEnding::LF,
            &self.to_der_with(encoding, point_encoding)?,
        )?)
    }

    /// Decode an `EC PARAMETERS` PEM document.
    #[cfg(feature = "pem")]
    pub fn from_pem(pem: &str) -> Result<Arc<Self>> {
        Self::from_pem_with(pem, &ParameterEncoding::ALL)
    }

    /// Decode an `EC PARAMETERS` PEM document, accepting only the listed
    /// forms.
    ///
    /// The encapsulation boundaries must match exactly. Text before the
    /// `BEGIN` line is skipped and the Base64 body may be wrapped at any
    /// width.
    #[cfg(feature = "pem")]
    pub fn from_pem_with(pem: &str, valid_encodings: &[ParameterEncoding]) -> Result<Arc<Self>> {
        let der = pem_body(pem)?;
        Self::from_der_with(&der, valid_encodings)
    }
}

/// Base64-decode the body between the `EC PARAMETERS` boundaries.
#[cfg(feature = "pem")]
fn pem_body(pem: &str) -> Result<Vec<u8>> {
    let begin = format!("-----BEGIN {PEM_LABEL}-----");
    let end = format!("-----END {PEM_LABEL}-----");

    let mut lines = pem.lines().map(str::trim).skip_while(|line| *line != begin);
    if lines.next().is_none() {
        return Err(Error::malformed("Expected EC PARAMETERS PEM header"));
    }

    let mut body = String::new();
    for line in lines {
        if line == end {
            return Ok(Base64::decode_vec(&body)?);
        }
        if line.starts_with("-----") {
            break;
        }
        body.extend(line.chars().filter(|c| !c.is_ascii_whitespace()));
    }

    Err(Error::malformed("Expected EC PARAMETERS PEM footer"))
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.algebra == other.algebra && self.generator == other.generator
    }
}

impl Eq for Curve {}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
