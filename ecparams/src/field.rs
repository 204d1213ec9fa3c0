//! Prime field arithmetic.
//!
//! [`PrimeField`] is the one place where curve code touches
//! arbitrary-precision integers: every coordinate operation performed by the
//! point arithmetic goes through it, so the integer backend can be swapped
//! without changing any caller. Elements are [`BigUint`] values which are
//! always kept reduced modulo `p`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{Error, Result};

/// The prime field `GF(p)` for an odd prime `p`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Create a field with the given modulus.
    ///
    /// The modulus must be odd and greater than two. Primality is not checked.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(2u8) || modulus.is_even() {
            return Err(Error::invalid_argument(
                "field modulus must be an odd prime greater than 2",
            ));
        }

        Ok(Self { modulus })
    }

    /// Create a field from a modulus known to be an odd prime.
    pub(crate) fn new_unchecked(modulus: BigUint) -> Self {
        Self { modulus }
    }

    /// Modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bits in `p`.
    pub fn bits(&self) -> usize {
        self.modulus.bits() as usize
    }

    /// Length in bytes of a big-endian field element, i.e. `ceil(bits(p) / 8)`.
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Does `a` lie in `[0, p)`?
    pub fn contains(&self, a: &BigUint) -> bool {
        a < &self.modulus
    }

    /// Returns `a mod p`.
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    /// Returns `a + b`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        if sum >= self.modulus {
            sum - &self.modulus
        } else {
            sum
        }
    }

    /// Returns `a - b`.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            &self.modulus - (b - a)
        }
    }

    /// Returns `-a`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    /// Returns `a * b`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Returns `a^2`.
    pub fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    /// Returns `n * a` for a small constant `n`.
    pub fn mul_small(&self, a: &BigUint, n: u32) -> BigUint {
        (a * n) % &self.modulus
    }

    /// Returns `a^e`.
    pub fn pow(&self, a: &BigUint, e: &BigUint) -> BigUint {
        a.modpow(e, &self.modulus)
    }

    /// Returns `a^-1`, or `None` when `a` is zero.
    ///
    /// Computed as `a^(p - 2)`.
    pub fn invert(&self, a: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return None;
        }

        let exp = &self.modulus - 2u32;
        Some(self.pow(a, &exp))
    }

    /// Is `a` a quadratic residue (zero included)? Euler's criterion.
    pub fn is_square(&self, a: &BigUint) -> bool {
        if a.is_zero() {
            return true;
        }

        let exp = (&self.modulus - 1u32) >> 1;
        self.pow(a, &exp).is_one()
    }

    /// Returns a square root of `a`, or `None` when `a` is not a square.
    ///
    /// Which of the two roots is returned is unspecified; callers select by
    /// parity.
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Some(a);
        }

        if !self.is_square(&a) {
            return None;
        }

        let p = &self.modulus;
        let root = if (p % 4u32) == BigUint::from(3u32) {
            self.pow(&a, &((p + 1u32) >> 2))
        } else if (p % 8u32) == BigUint::from(5u32) {
            self.sqrt_atkin(&a)
        } else {
            self.sqrt_tonelli_shanks(&a)?
        };

        (self.square(&root) == a).then_some(root)
    }

    /// Atkin's square root for `p = 5 (mod 8)`.
    fn sqrt_atkin(&self, a: &BigUint) -> BigUint {
        let two_a = self.mul_small(a, 2);
        let v = self.pow(&two_a, &((&self.modulus - 5u32) >> 3));
        let i = self.mul(&two_a, &self.square(&v));
        let i_minus_one = self.sub(&i, &BigUint::one());
        self.mul(&self.mul(a, &v), &i_minus_one)
    }

    /// Tonelli-Shanks, for any odd `p` and a known residue `a`.
    ///
    /// Returns `None` if the iteration stalls, which only happens when the
    /// modulus is not actually prime.
    fn sqrt_tonelli_shanks(&self, a: &BigUint) -> Option<BigUint> {
        // p - 1 = q * 2^s with q odd
        let p_minus_one = &self.modulus - 1u32;
        let s = p_minus_one.trailing_zeros().unwrap_or(0);
        let q = &p_minus_one >> s;

        let mut z = BigUint::from(2u32);
        while self.is_square(&z) {
            z += 1u32;
        }

        let mut m = s;
        let mut c = self.pow(&z, &q);
        let mut t = self.pow(a, &q);
        let mut r = self.pow(a, &((&q + 1u32) >> 1));

        while !t.is_one() {
            // least i with t^(2^i) = 1
            let mut i = 0;
            let mut t2i = t.clone();
            while !t2i.is_one() && i < m {
                t2i = self.square(&t2i);
                i += 1;
            }
            if i == m {
                return None;
            }

            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = self.square(&b);
            }

            m = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }

        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::PrimeField;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::{One, Zero};

    fn field(p: u64) -> PrimeField {
        PrimeField::new(p.into()).unwrap()
    }

    #[test]
    fn rejects_even_modulus() {
        assert!(PrimeField::new(2u32.into()).is_err());
        assert!(PrimeField::new(24u32.into()).is_err());
    }

    #[test]
    fn sub_wraps() {
        let f = field(23);
        assert_eq!(f.sub(&3u32.into(), &5u32.into()), BigUint::from(21u32));
        assert_eq!(f.neg(&BigUint::zero()), BigUint::zero());
    }

    #[test]
    fn invert() {
        let f = field(23);
        for a in 1u32..23 {
            let inv = f.invert(&a.into()).unwrap();
            assert!(f.mul(&a.into(), &inv).is_one());
        }
        assert!(f.invert(&BigUint::zero()).is_none());
    }

    /// Exercises each square root strategy: `p = 3 (mod 4)`, `p = 5 (mod 8)`
    /// and `p = 1 (mod 8)`.
    #[test]
    fn sqrt_all_residues() {
        for p in [23u64, 29, 41, 97, 113] {
            let f = field(p);
            for a in 0..p {
                let a = BigUint::from(a);
                match f.sqrt(&a) {
                    Some(root) => assert_eq!(f.square(&root), a, "p = {p}"),
                    None => assert!(!f.is_square(&a), "p = {p}"),
                }
            }
        }
    }

    #[test]
    fn sqrt_p224() {
        // P-224 has p = 1 (mod 2^96), the Tonelli-Shanks worst case
        let f = PrimeField::new(BigUint::from_bytes_be(&hex!(
            "ffffffffffffffffffffffffffffffff000000000000000000000001"
        )))
        .unwrap();
        let x = BigUint::from_bytes_be(&hex!(
            "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"
        ));
        let square = f.square(&x);
        let root = f.sqrt(&square).unwrap();
        assert!(root == x || root == f.neg(&x));
    }
}
