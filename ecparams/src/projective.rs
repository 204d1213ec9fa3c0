//! Short Weierstrass points in Jacobian coordinates.
//!
//! A point `(X : Y : Z)` represents the affine point `(X/Z², Y/Z³)`; `Z = 0`
//! is the point at infinity. Formulas are from the [Explicit-Formulas
//! Database] for `a` arbitrary.
//!
//! [Explicit-Formulas Database]: https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian.html

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{
    equation::CurveFp,
    lookup_table::{LookupTable, WindowedPoint},
};

/// Point on a Weierstrass curve in Jacobian coordinates.
#[derive(Clone, Debug)]
pub struct JacobianPoint {
    curve: Arc<CurveFp>,
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl JacobianPoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity(curve: Arc<CurveFp>) -> Self {
        Self {
            curve,
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    /// Lift an affine point. The caller checks it is on the curve.
    pub(crate) fn from_affine(curve: Arc<CurveFp>, x: BigUint, y: BigUint) -> Self {
        Self {
            curve,
            x,
            y,
            z: BigUint::one(),
        }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &Arc<CurveFp> {
        &self.curve
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Returns the affine representation of this point, or `None` if it is the identity.
    pub fn to_affine(&self) -> Option<(BigUint, BigUint)> {
        let f = self.curve.field();
        let zinv = f.invert(&self.z)?;
        let zinv2 = f.square(&zinv);
        let x = f.mul(&self.x, &zinv2);
        let y = f.mul(&self.y, &f.mul(&zinv2, &zinv));
        Some((x, y))
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            x: self.x.clone(),
            y: self.curve.field().neg(&self.y),
            z: self.z.clone(),
        }
    }

    /// Returns `self + self`.
    ///
    /// Implements `dbl-2007-bl`. The comments after each line name the
    /// intermediate being computed.
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity(self.curve.clone());
        }

        let f = self.curve.field();
        let (x1, y1, z1) = (&self.x, &self.y, &self.z);

        let xx = f.square(x1); // XX
        let yy = f.square(y1); // YY
        let yyyy = f.square(&yy); // YYYY
        let zz = f.square(z1); // ZZ
        let s = f.sub(&f.sub(&f.square(&f.add(x1, &yy)), &xx), &yyyy);
        let s = f.add(&s, &s); // S
        let m = f.add(&f.mul_small(&xx, 3), &f.mul(self.curve.a(), &f.square(&zz))); // M
        let t = f.sub(&f.square(&m), &f.add(&s, &s)); // T
        let y3 = f.sub(&f.mul(&m, &f.sub(&s, &t)), &f.mul_small(&yyyy, 8));
        let z3 = f.sub(&f.sub(&f.square(&f.add(y1, z1)), &yy), &zz);

        Self {
            curve: self.curve.clone(),
            x: t,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`. Both points must be on the same curve.
    ///
    /// Implements `add-2007-bl`, falling back to doubling when the inputs
    /// are equal.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        let f = self.curve.field();
        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let (x2, y2, z2) = (&other.x, &other.y, &other.z);

        let z1z1 = f.square(z1); // Z1Z1
        let z2z2 = f.square(z2); // Z2Z2
        let u1 = f.mul(x1, &z2z2); // U1
        let u2 = f.mul(x2, &z1z1); // U2
        let s1 = f.mul(&f.mul(y1, z2), &z2z2); // S1
        let s2 = f.mul(&f.mul(y2, z1), &z1z1); // S2
        let h = f.sub(&u2, &u1); // H
        let r = f.sub(&s2, &s1);

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::identity(self.curve.clone())
            };
        }

        let r = f.add(&r, &r); // r
        let i = f.square(&f.add(&h, &h)); // I
        let j = f.mul(&h, &i); // J
        let v = f.mul(&u1, &i); // V
        let x3 = f.sub(&f.sub(&f.square(&r), &j), &f.add(&v, &v));
        let s1j = f.mul(&s1, &j);
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.add(&s1j, &s1j));
        let z3 = f.mul(&f.sub(&f.sub(&f.square(&f.add(z1, z2)), &z1z1), &z2z2), &h);

        Self {
            curve: self.curve.clone(),
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `[k] self`.
    pub fn mul(&self, k: &BigUint) -> Self {
        LookupTable::new(self).mul(k)
    }
}

impl WindowedPoint for JacobianPoint {
    fn identity_like(&self) -> Self {
        Self::identity(self.curve.clone())
    }

    fn add(&self, other: &Self) -> Self {
        JacobianPoint::add(self, other)
    }

    fn double(&self) -> Self {
        JacobianPoint::double(self)
    }
}

/// Compares `X1·Z2² = X2·Z1²` and `Y1·Z2³ = Y2·Z1³` without normalizing.
impl PartialEq for JacobianPoint {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.curve, &other.curve) && self.curve != other.curve {
            return false;
        }

        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => (),
            _ => return false,
        }

        let f = self.curve.field();
        let z1z1 = f.square(&self.z);
        let z2z2 = f.square(&other.z);

        f.mul(&self.x, &z2z2) == f.mul(&other.x, &z1z1)
            && f.mul(&self.y, &f.mul(&z2z2, &other.z)) == f.mul(&other.y, &f.mul(&z1z1, &self.z))
    }
}

impl Eq for JacobianPoint {}
