#![no_main]
// Decoding arbitrary ECParameters must never panic, and anything that
// decodes must survive an explicit re-encode.
use ecparams::{Curve, ParameterEncoding, PointEncoding};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(curve) = Curve::from_der(data) else {
        return;
    };

    if curve.algebra().is_twisted_edwards() {
        return;
    }

    let der = curve
        .to_der_with(ParameterEncoding::Explicit, PointEncoding::Uncompressed)
        .unwrap();
    assert_eq!(*Curve::from_der(&der).unwrap(), *curve);

    // Decompression needs square roots, which only exist for a prime modulus
    let der = curve
        .to_der_with(ParameterEncoding::Explicit, PointEncoding::Compressed)
        .unwrap();
    let _ = Curve::from_der(&der);
});
