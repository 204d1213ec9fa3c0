#![no_main]
// Targets: every registered curve
use ecparams::{Point, PointEncoding, registry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bytes)) = data.split_first() else {
        return;
    };

    let curves = registry::curves();
    let curve = &curves[usize::from(selector) % curves.len()];
    let algebra = curve.algebra();

    let Ok(point) = Point::from_bytes(algebra, bytes, &PointEncoding::ALL) else {
        return;
    };

    // Decoded points must be on the curve and re-encode consistently
    if let Some((x, y)) = point.to_affine() {
        assert!(algebra.contains_point(&x, &y));
    }
    for encoding in PointEncoding::ALL {
        let encoded = point.to_bytes(encoding);
        assert_eq!(Point::from_bytes(algebra, &encoded, &[encoding]).unwrap(), point);
    }

    // Test that addition and doubling are consistent
    assert_eq!(point.double(), point.add(&point).unwrap());

    // Test that negation works correctly
    assert!(point.add(&point.neg()).unwrap().is_identity());
});
