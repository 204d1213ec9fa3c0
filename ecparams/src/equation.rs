//! Curve equations over prime fields.
//!
//! Two families are supported:
//!
//! - short Weierstrass curves `y² = x³ + ax + b` ([`CurveFp`])
//! - twisted Edwards curves `ax² + y² = 1 + dx²y²` ([`CurveEdTw`])
//!
//! [`CurveAlgebra`] is the closed sum of the two. Values of different
//! families never compare equal, even if their parameters coincide.

use std::{fmt, sync::Arc};

use num_bigint::BigUint;

use crate::{Result, field::PrimeField};

/// Short Weierstrass curve `y² = x³ + ax + b` over `GF(p)`.
///
/// Equality compares `(p, a, b)`; the cofactor is metadata.
#[derive(Clone)]
pub struct CurveFp {
    field: PrimeField,
    a: BigUint,
    b: BigUint,
    cofactor: Option<BigUint>,
}

impl CurveFp {
    /// Create a curve from its modulus and coefficients.
    ///
    /// `a` and `b` are reduced modulo `p`. Non-singularity is assumed, not
    /// checked.
    pub fn new(p: BigUint, a: BigUint, b: BigUint, cofactor: Option<BigUint>) -> Result<Self> {
        let field = PrimeField::new(p)?;
        Ok(Self::from_field(field, a, b, cofactor))
    }

    pub(crate) fn from_field(
        field: PrimeField,
        a: BigUint,
        b: BigUint,
        cofactor: Option<BigUint>,
    ) -> Self {
        let a = field.reduce(&a);
        let b = field.reduce(&b);
        Self {
            field,
            a,
            b,
            cofactor,
        }
    }

    /// Field the curve is defined over.
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Modulus `p`.
    pub fn p(&self) -> &BigUint {
        self.field.modulus()
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b`.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Cofactor, if known.
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.cofactor.as_ref()
    }

    /// Returns `x³ + ax + b`.
    pub(crate) fn rhs(&self, x: &BigUint) -> BigUint {
        let f = &self.field;
        let x3 = f.mul(&f.square(x), x);
        let ax = f.mul(&self.a, x);
        f.add(&f.add(&x3, &ax), &self.b)
    }

    /// Does the affine point `(x, y)` satisfy the curve equation?
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        let f = &self.field;
        f.contains(x) && f.contains(y) && f.square(y) == self.rhs(x)
    }
}

impl PartialEq for CurveFp {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.b == other.b
    }
}

impl Eq for CurveFp {}

impl fmt::Debug for CurveFp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurveFp(p={:#x}, a={:#x}, b={:#x}", self.p(), self.a, self.b)?;
        if let Some(h) = &self.cofactor {
            write!(f, ", h={h}")?;
        }
        f.write_str(")")
    }
}

/// Twisted Edwards curve `ax² + y² = 1 + dx²y²` over `GF(p)`.
///
/// Equality compares `(p, a, d)`; the cofactor is metadata.
#[derive(Clone)]
pub struct CurveEdTw {
    field: PrimeField,
    a: BigUint,
    d: BigUint,
    cofactor: Option<BigUint>,
}

impl CurveEdTw {
    /// Create a curve from its modulus and coefficients, reducing `a` and `d`
    /// modulo `p`.
    pub fn new(p: BigUint, a: BigUint, d: BigUint, cofactor: Option<BigUint>) -> Result<Self> {
        let field = PrimeField::new(p)?;
        Ok(Self::from_field(field, a, d, cofactor))
    }

    pub(crate) fn from_field(
        field: PrimeField,
        a: BigUint,
        d: BigUint,
        cofactor: Option<BigUint>,
    ) -> Self {
        let a = field.reduce(&a);
        let d = field.reduce(&d);
        Self {
            field,
            a,
            d,
            cofactor,
        }
    }

    /// Field the curve is defined over.
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Modulus `p`.
    pub fn p(&self) -> &BigUint {
        self.field.modulus()
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `d`.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Cofactor, if known.
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.cofactor.as_ref()
    }

    /// Does the affine point `(x, y)` satisfy the curve equation?
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        let f = &self.field;
        if !f.contains(x) || !f.contains(y) {
            return false;
        }

        let x2 = f.square(x);
        let y2 = f.square(y);
        let lhs = f.add(&f.mul(&self.a, &x2), &y2);
        let rhs = f.add(&BigUint::from(1u8), &f.mul(&self.d, &f.mul(&x2, &y2)));
        lhs == rhs
    }
}

impl PartialEq for CurveEdTw {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.d == other.d
    }
}

impl Eq for CurveEdTw {}

impl fmt::Debug for CurveEdTw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurveEdTw(p={:#x}, a={:#x}, d={:#x}", self.p(), self.a, self.d)?;
        if let Some(h) = &self.cofactor {
            write!(f, ", h={h}")?;
        }
        f.write_str(")")
    }
}

/// Curve equation of either supported family.
///
/// Cloning is cheap: the parameters are shared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CurveAlgebra {
    /// Short Weierstrass curve.
    Weierstrass(Arc<CurveFp>),

    /// Twisted Edwards curve.
    TwistedEdwards(Arc<CurveEdTw>),
}

impl CurveAlgebra {
    /// Field the curve is defined over.
    pub fn field(&self) -> &PrimeField {
        match self {
            Self::Weierstrass(curve) => curve.field(),
            Self::TwistedEdwards(curve) => curve.field(),
        }
    }

    /// Modulus `p`.
    pub fn p(&self) -> &BigUint {
        self.field().modulus()
    }

    /// Cofactor, if known.
    pub fn cofactor(&self) -> Option<&BigUint> {
        match self {
            Self::Weierstrass(curve) => curve.cofactor(),
            Self::TwistedEdwards(curve) => curve.cofactor(),
        }
    }

    /// Does the affine point `(x, y)` satisfy the curve equation?
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        match self {
            Self::Weierstrass(curve) => curve.contains_point(x, y),
            Self::TwistedEdwards(curve) => curve.contains_point(x, y),
        }
    }

    /// Is this a twisted Edwards curve?
    pub fn is_twisted_edwards(&self) -> bool {
        matches!(self, Self::TwistedEdwards(_))
    }
}

impl From<CurveFp> for CurveAlgebra {
    fn from(curve: CurveFp) -> Self {
        Self::Weierstrass(Arc::new(curve))
    }
}

impl From<CurveEdTw> for CurveAlgebra {
    fn from(curve: CurveEdTw) -> Self {
        Self::TwistedEdwards(Arc::new(curve))
    }
}
