//! `ECParameters` DER encoding and decoding.

use std::sync::Arc;

use der::Encode;
use ecparams::{
    Curve, CurveAlgebra, CurveFp, CurveSeed, ParameterEncoding, Point, PointEncoding,
    parameters::PRIME_FIELD_OID, registry,
};
use hex_literal::hex;
use tracing_subscriber::EnvFilter;

/// `prime256v1` as a named curve.
const P256_NAMED: &[u8] = &hex!("06082a8648ce3d030107");

/// P-256 explicit parameters with an uncompressed base point and a cofactor.
const P256_EXPLICIT: &[u8] = &hex!(
    "3081e0020101302c06072a8648ce3d0101022100ffffffff0000000100000000"
    "0000000000000000ffffffffffffffffffffffff30440420ffffffff00000001"
    "000000000000000000000000fffffffffffffffffffffffc04205ac635d8aa3a"
    "93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b0441046b17d1"
    "f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c2964fe342"
    "e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5022100"
    "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"
    "020101"
);

/// As [`P256_EXPLICIT`] with a compressed base point.
const P256_EXPLICIT_COMPRESSED: &[u8] = &hex!(
    "3081c0020101302c06072a8648ce3d0101022100ffffffff0000000100000000"
    "0000000000000000ffffffffffffffffffffffff30440420ffffffff00000001"
    "000000000000000000000000fffffffffffffffffffffffc04205ac635d8aa3a"
    "93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b0421036b17d1"
    "f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296022100"
    "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"
    "020101"
);

/// `openssl ecparam -name P-256 -param_enc explicit`, which carries the seed.
const P256_OPENSSL_EXPLICIT: &[u8] = &hex!(
    "3081f7020101302c06072a8648ce3d0101022100ffffffff0000000100000000"
    "0000000000000000ffffffffffffffffffffffff305b0420ffffffff00000001"
    "000000000000000000000000fffffffffffffffffffffffc04205ac635d8aa3a"
    "93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b031500c49d36"
    "0886e704936a6678e1139d26b7819f7e900441046b17d1f2e12c4247f8bce6e5"
    "63a440f277037d812deb33a0f4a13945d898c2964fe342e2fe1a7f9b8ee7eb4a"
    "7c0f9e162bce33576b315ececbb6406837bf51f5022100ffffffff00000000ff"
    "ffffffffffffffbce6faada7179e84f3b9cac2fc632551020101"
);

/// Explicit parameters of the binary curve sect113r1.
const SECT113R1_EXPLICIT: &[u8] = &hex!(
    "308191020101301c06072a8648ce3d0102301102017106092a8648ce3d010203"
    "020201093039040f003088250ca6e7c7fe649ce85820f7040f00e8bee4d3e226"
    "0744188be0e9c72303150010e723ab14d696e6768756151756febf8fcb49a904"
    "1f04009d73616f35f4ab1407d73562c10f00a52830277958ee84d1315ed31886"
    "020f0100000000000000d9ccec8a39e56f020102"
);

/// `y² = x³ + x + 7` over `GF(23)` with base point `(13, 3)` of order 9.
const SMALL_CURVE_EXPLICIT: &[u8] =
    &hex!("3021020101300c06072a8648ce3d010102011730060401010401070403040d03020109");

/// Route decoder logs to the test harness, filtered by `RUST_LOG`.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p256() -> &'static Arc<Curve> {
    registry::find_by_name("NIST256p").unwrap()
}

fn small_curve(gx: u32, gy: u32) -> Curve {
    let algebra =
        CurveAlgebra::from(CurveFp::new(23u32.into(), 1u32.into(), 7u32.into(), None).unwrap());
    let generator = Point::from_affine(&algebra, gx.into(), gy.into())
        .unwrap()
        .into_generator(9u32.into())
        .unwrap();
    Curve::new("unknown", generator, None).unwrap()
}

/// DER `SEQUENCE` around already-encoded elements, shorter than 256 bytes.
fn sequence(elements: &[&[u8]]) -> Vec<u8> {
    let content = elements.concat();
    let len = u8::try_from(content.len()).unwrap();
    let mut out = vec![0x30];
    if len >= 0x80 {
        out.push(0x81);
    }
    out.push(len);
    out.extend_from_slice(&content);
    out
}

/// Elements of [`P256_EXPLICIT`].
fn p256_field_id() -> &'static [u8] {
    &P256_EXPLICIT[6..52]
}

fn p256_prime() -> &'static [u8] {
    &P256_EXPLICIT[17..52]
}

/// P-256 explicit parameters with the given field ID and no cofactor.
fn p256_with_field_id(field_id: &[u8]) -> Vec<u8> {
    let coefficients = &P256_EXPLICIT[52..122];
    let base = &P256_EXPLICIT[122..189];
    let order = &P256_EXPLICIT[189..224];
    sequence(&[&hex!("020101"), field_id, coefficients, base, order])
}

#[test]
fn named_curve_der() {
    assert_eq!(p256().to_der().unwrap(), P256_NAMED);
}

#[test]
fn default_is_named_curve() {
    assert_eq!(
        p256().to_der().unwrap(),
        p256()
            .to_der_with(ParameterEncoding::NamedCurve, PointEncoding::Uncompressed)
            .unwrap()
    );
}

#[test]
fn encode_explicit() {
    let der = p256()
        .to_der_with(ParameterEncoding::Explicit, PointEncoding::Uncompressed)
        .unwrap();
    assert_eq!(der, P256_EXPLICIT);
}

#[test]
fn encode_explicit_compressed() {
    let der = p256()
        .to_der_with(ParameterEncoding::Explicit, PointEncoding::Compressed)
        .unwrap();
    assert_eq!(der, P256_EXPLICIT_COMPRESSED);
}

#[test]
fn explicit_raw_base_point_rejected() {
    let err = p256()
        .to_der_with(ParameterEncoding::Explicit, PointEncoding::Raw)
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn decode_named() {
    let curve = Curve::from_der(P256_NAMED).unwrap();
    assert!(Arc::ptr_eq(&curve, p256()));
}

#[test]
fn decode_well_known_explicit() {
    let curve = Curve::from_der(P256_EXPLICIT).unwrap();
    assert!(Arc::ptr_eq(&curve, p256()));

    let curve = Curve::from_der(P256_EXPLICIT_COMPRESSED).unwrap();
    assert!(Arc::ptr_eq(&curve, p256()));
}

#[test]
fn decode_explicit_from_openssl() {
    init_logging();
    let curve = Curve::from_der(P256_OPENSSL_EXPLICIT).unwrap();
    assert_eq!(&curve, p256());
    assert_eq!(curve.name(), "NIST256p");
}

#[test]
fn decode_without_cofactor_matches_registry() {
    let der = p256_with_field_id(p256_field_id());
    let curve = Curve::from_der(&der).unwrap();
    assert!(Arc::ptr_eq(&curve, p256()));
}

#[test]
fn explicit_not_allowed() {
    let err = Curve::from_der_with(P256_EXPLICIT, &[ParameterEncoding::NamedCurve]).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("explicit curve parameters not"));
}

#[test]
fn named_curve_not_allowed() {
    let err = Curve::from_der_with(P256_NAMED, &[ParameterEncoding::Explicit]).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("named_curve curve parameters not"));
}

#[test]
fn unknown_encoding_keyword() {
    let err = "explicitCA".parse::<ParameterEncoding>().unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("Only 'named_curve'"));
}

#[test]
fn different_generators_are_unequal() {
    assert_ne!(small_curve(13, 3), small_curve(1, 20));
}

#[test]
fn custom_curve_default_encoding_is_explicit() {
    let curve = small_curve(13, 3);
    let der = curve.to_der().unwrap();
    assert_eq!(der, SMALL_CURVE_EXPLICIT);

    let decoded = Curve::from_der(&der).unwrap();
    assert_eq!(*decoded, curve);
    assert_eq!(decoded.name(), "unknown");
    assert!(decoded.oid().is_none());
    assert!(decoded.cofactor().is_none());
}

#[test]
fn custom_curve_named_encoding() {
    let err = small_curve(13, 3)
        .to_der_with(ParameterEncoding::NamedCurve, PointEncoding::Uncompressed)
        .unwrap_err();
    assert!(err.is_unknown_curve());
    assert!(err.to_string().contains("Can't encode curve"));
}

#[test]
fn binary_curve_rejected() {
    let err = Curve::from_der(SECT113R1_EXPLICIT).unwrap_err();
    assert!(err.is_unknown_curve());
    assert!(err.to_string().contains("Characteristic 2 curves unsupported"));
}

#[test]
fn trailing_data_after_oid() {
    let der = [P256_NAMED, &hex!("020101")].concat();
    let err = Curve::from_der(&der).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("Unexpected data after OID"));
}

#[test]
fn unknown_named_curve() {
    let err = Curve::from_der(&hex!("06032a0304")).unwrap_err();
    assert!(err.is_unknown_curve());
    assert!(err.to_string().contains("I don't know about the curve with oid 1.2.3.4"));
}

#[test]
fn zero_order_rejected() {
    let mut der = SMALL_CURVE_EXPLICIT.to_vec();
    *der.last_mut().unwrap() = 0x00;
    let err = Curve::from_der(&der).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("Curve order must be positive"));
}

#[test]
fn trailing_data_after_parameters() {
    let der = [P256_EXPLICIT, &hex!("020101")].concat();
    let err = Curve::from_der(&der).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("Unexpected data after ECParameters"));
}

#[test]
fn unknown_version() {
    let err = Curve::from_der(&hex!("3003020102")).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("Unknown parameter encoding format"));
}

#[test]
fn unknown_field_type() {
    let field_id = sequence(&[&hex!("06022a03"), p256_prime()]);
    let err = Curve::from_der(&p256_with_field_id(&field_id)).unwrap_err();
    assert!(err.is_unknown_curve());
    assert!(err.to_string().contains("Unknown field type: 1.2.3"));
}

#[test]
fn trailing_data_after_prime() {
    let prime_oid = PRIME_FIELD_OID.to_der().unwrap();
    let field_id = sequence(&[&prime_oid, p256_prime(), &hex!("020101")]);
    let err = Curve::from_der(&p256_with_field_id(&field_id)).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("Prime-p element"));
}

#[test]
fn base_point_not_on_curve() {
    init_logging();
    let mut der = P256_EXPLICIT.to_vec();
    der[188] ^= 1;
    let err = Curve::from_der(&der).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn unregistered_curve_keeps_seed() {
    init_logging();
    let seed = CurveSeed::new(0, hex!("c49d360886e704936a6678e1139d26b7819f7e90")).unwrap();
    let curve = small_curve(13, 3).with_seed(seed.clone());
    let der = curve
        .to_der_with(ParameterEncoding::Explicit, PointEncoding::Hybrid)
        .unwrap();

    let decoded = Curve::from_der(&der).unwrap();
    assert_eq!(decoded.seed(), Some(&seed));
    assert_eq!(
        decoded
            .to_der_with(ParameterEncoding::Explicit, PointEncoding::Hybrid)
            .unwrap(),
        der
    );
}
