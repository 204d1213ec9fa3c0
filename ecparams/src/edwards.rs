//! Twisted Edwards points in extended coordinates.
//!
//! `(X : Y : Z : T)` with `x = X/Z`, `y = Y/Z` and `x·y = T/Z`, after
//! [Hisil-Wong-Carter-Dawson 2008].
//!
//! [Hisil-Wong-Carter-Dawson 2008]: https://eprint.iacr.org/2008/522

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{
    equation::CurveEdTw,
    lookup_table::{LookupTable, WindowedPoint},
};

/// Point on a twisted Edwards curve in extended coordinates.
#[derive(Clone, Debug)]
pub struct ExtendedPoint {
    curve: Arc<CurveEdTw>,
    x: BigUint,
    y: BigUint,
    z: BigUint,
    t: BigUint,
}

impl ExtendedPoint {
    /// Neutral element `(0, 1)`.
    pub fn identity(curve: Arc<CurveEdTw>) -> Self {
        Self {
            curve,
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::one(),
            t: BigUint::zero(),
        }
    }

    /// Lift an affine point. The caller checks it is on the curve.
    pub(crate) fn from_affine(curve: Arc<CurveEdTw>, x: BigUint, y: BigUint) -> Self {
        let t = curve.field().mul(&x, &y);
        Self {
            curve,
            x,
            y,
            z: BigUint::one(),
            t,
        }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &Arc<CurveEdTw> {
        &self.curve
    }

    /// Is this the neutral element?
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    /// Affine coordinates `(x, y)`.
    pub fn to_affine(&self) -> (BigUint, BigUint) {
        let f = self.curve.field();
        // Z is never zero for points on a complete curve
        let zinv = f.invert(&self.z).unwrap_or_default();
        (f.mul(&self.x, &zinv), f.mul(&self.y, &zinv))
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        let f = self.curve.field();
        Self {
            curve: self.curve.clone(),
            x: f.neg(&self.x),
            y: self.y.clone(),
            z: self.z.clone(),
            t: f.neg(&self.t),
        }
    }

    /// Returns `self + other`.
    ///
    /// Implements `add-2008-hwcd`.
    pub fn add(&self, other: &Self) -> Self {
        let f = self.curve.field();
        let curve = &self.curve;

        let a = f.mul(&self.x, &other.x); // 1
        let b = f.mul(&self.y, &other.y); // 2
        let c = f.mul(&f.mul(&self.t, curve.d()), &other.t); // 3
        let d = f.mul(&self.z, &other.z); // 4
        let e = f.mul(&f.add(&self.x, &self.y), &f.add(&other.x, &other.y));
        let e = f.sub(&f.sub(&e, &a), &b); // 5
        let ff = f.sub(&d, &c); // 6
        let g = f.add(&d, &c); // 7
        let h = f.sub(&b, &f.mul(curve.a(), &a)); // 8

        Self {
            curve: self.curve.clone(),
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h),
        }
    }

    /// Returns `self + self`.
    ///
    /// Implements `dbl-2008-hwcd`.
    pub fn double(&self) -> Self {
        let f = self.curve.field();

        let a = f.square(&self.x); // 1
        let b = f.square(&self.y); // 2
        let c = f.mul_small(&f.square(&self.z), 2); // 3
        let d = f.mul(self.curve.a(), &a); // 4
        let e = f.sub(&f.sub(&f.square(&f.add(&self.x, &self.y)), &a), &b); // 5
        let g = f.add(&d, &b); // 6
        let ff = f.sub(&g, &c); // 7
        let h = f.sub(&d, &b); // 8

        Self {
            curve: self.curve.clone(),
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h),
        }
    }

    /// Returns `[k] self`.
    pub fn mul(&self, k: &BigUint) -> Self {
        LookupTable::new(self).mul(k)
    }
}

impl WindowedPoint for ExtendedPoint {
    fn identity_like(&self) -> Self {
        Self::identity(self.curve.clone())
    }

    fn add(&self, other: &Self) -> Self {
        ExtendedPoint::add(self, other)
    }

    fn double(&self) -> Self {
        ExtendedPoint::double(self)
    }
}

/// Compares `X1·Z2 = X2·Z1` and `Y1·Z2 = Y2·Z1`.
impl PartialEq for ExtendedPoint {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.curve, &other.curve) && self.curve != other.curve {
            return false;
        }

        let f = self.curve.field();
        f.mul(&self.x, &other.z) == f.mul(&other.x, &self.z)
            && f.mul(&self.y, &other.z) == f.mul(&other.y, &self.z)
    }
}

impl Eq for ExtendedPoint {}
