//! Point arithmetic and encoding tests.

use ecparams::{BigUint, Point, PointEncoding, registry};
use hex_literal::hex;
use proptest::prelude::*;

const UNCOMPRESSED_BASEPOINT: &[u8] = &hex!(
    "04 6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296
        4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5"
);

const COMPRESSED_BASEPOINT: &[u8] =
    &hex!("03 6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296");

/// `[2] G` on P-256.
const DOUBLE_BASEPOINT: &[u8] = &hex!(
    "04 7CF27B188D034F7E8A52380304B51AC3C08969E277F21B35A60B48FC47669978
        07775510DB8ED040293D9AC69F7430DBBA7DADE63CE982299E04B79D227873D1"
);

fn p256_generator() -> Point {
    registry::find_by_name("NIST256p").unwrap().generator().clone()
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> BigUint {
        BigUint::from_bytes_be(&bytes)
    }
}

#[test]
fn decode_basepoint() {
    let g = p256_generator();
    let curve = g.curve();

    let uncompressed = Point::from_bytes(&curve, UNCOMPRESSED_BASEPOINT, &PointEncoding::ALL).unwrap();
    let compressed = Point::from_bytes(&curve, COMPRESSED_BASEPOINT, &PointEncoding::ALL).unwrap();
    assert_eq!(uncompressed, g);
    assert_eq!(compressed, g);
    assert_eq!(g.to_bytes(PointEncoding::Compressed), COMPRESSED_BASEPOINT);
}

#[test]
fn double_basepoint() {
    let g = p256_generator();
    assert_eq!(g.double().to_bytes(PointEncoding::Uncompressed), DOUBLE_BASEPOINT);
    assert_eq!(g.add(&g).unwrap(), g.double());
    assert_eq!(g.mul(&BigUint::from(2u8)), g.double());
}

#[test]
fn order_annihilates_generator() {
    let g = p256_generator();
    assert!(g.mul(g.order().unwrap()).is_identity());
    assert!(g.mul(&BigUint::from(0u8)).is_identity());
    assert_eq!(g.add(&g.neg()).unwrap().to_bytes(PointEncoding::Compressed), [0x00]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn mul_distributes_over_scalar_add(a in scalar(), b in scalar()) {
        let g = p256_generator();
        let lhs = g.mul(&(&a + &b));
        let rhs = g.mul(&a).add(&g.mul(&b)).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn mul_composes(a in scalar(), b in scalar()) {
        let g = p256_generator();
        prop_assert_eq!(g.mul(&a).mul(&b), g.mul(&(&a * &b)));
    }

    #[test]
    fn encodings_decode_to_same_point(k in scalar()) {
        let p = p256_generator().mul(&k);
        let curve = p.curve();
        for encoding in PointEncoding::ALL {
            let decoded = Point::from_bytes(&curve, &p.to_bytes(encoding), &[encoding]).unwrap();
            prop_assert_eq!(&decoded, &p);
        }
    }

    #[test]
    fn decoded_points_lie_on_curve(x in scalar(), odd in any::<bool>()) {
        let curve = p256_generator().curve();
        let mut bytes = vec![0x02 | u8::from(odd)];
        bytes.extend_from_slice(&x.to_bytes_be());
        while bytes.len() < 33 {
            bytes.insert(1, 0);
        }

        if let Ok(point) = Point::from_bytes(&curve, &bytes, &[PointEncoding::Compressed]) {
            let (px, py) = point.to_affine().unwrap();
            prop_assert!(curve.contains_point(&px, &py));
            prop_assert_eq!(px, x);
        }
    }
}
