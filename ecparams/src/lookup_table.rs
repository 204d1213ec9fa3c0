//! Fixed-window scalar multiplication.

use num_bigint::BigUint;

/// Internal constant for the number of entries in a [`LookupTable`].
const LUT_SIZE: usize = 16;

/// Group operations needed to fill and walk a [`LookupTable`].
pub(crate) trait WindowedPoint: Clone {
    /// Identity of the group `self` belongs to.
    fn identity_like(&self) -> Self;

    /// Returns `self + other`.
    fn add(&self, other: &Self) -> Self;

    /// Returns `self + self`.
    fn double(&self) -> Self;
}

/// Lookup table containing precomputed values `[0, p, 2p, ..., 15p]`
#[derive(Clone, Debug)]
pub(crate) struct LookupTable<Point> {
    points: Vec<Point>,
}

impl<Point: WindowedPoint> LookupTable<Point> {
    /// Compute a new lookup table from the given point.
    pub fn new(p: &Point) -> Self {
        let mut points = Vec::with_capacity(LUT_SIZE);
        points.push(p.identity_like());
        points.push(p.clone());

        for i in 2..LUT_SIZE {
            let next = if i % 2 == 0 {
                points[i / 2].double()
            } else {
                points[i - 1].add(p)
            };
            points.push(next);
        }

        Self { points }
    }

    /// Given `0 <= x < 16`, returns `x * p`.
    pub fn select(&self, x: u8) -> &Point {
        &self.points[usize::from(x & 0xf)]
    }

    /// Returns `[k] p`, consuming `k` four bits at a time starting from the
    /// most significant nibble.
    ///
    /// Variable time.
    pub fn mul(&self, k: &BigUint) -> Point {
        let mut q = self.points[0].clone();

        for byte in k.to_bytes_be() {
            for nibble in [byte >> 4, byte & 0xf] {
                q = q.double().double().double().double();
                if nibble != 0 {
                    q = q.add(self.select(nibble));
                }
            }
        }

        q
    }
}
