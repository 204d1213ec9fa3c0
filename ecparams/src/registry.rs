//! Registry of well-known named curves.
//!
//! The table is built on first use and never modified afterwards. Every
//! entry's generator has been checked to lie on its curve and to be
//! annihilated by the listed order.
//!
//! Sources:
//!
//! - NIST P-curves: [FIPS 186-4] § D.1.2
//! - secp curves: [SEC 2] v1 and v2
//! - Brainpool curves: [RFC 5639] § 3
//! - Ed25519 and Ed448: [RFC 8032] § 5
//!
//! [FIPS 186-4]: https://csrc.nist.gov/publications/detail/fips/186/4/final
//! [SEC 2]: https://www.secg.org/sec2-v2.pdf
//! [RFC 5639]: https://datatracker.ietf.org/doc/html/rfc5639
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

use std::sync::Arc;

use der::asn1::ObjectIdentifier;
use hex_literal::hex;
use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::{
    Error, Result,
    curve::Curve,
    equation::{CurveAlgebra, CurveEdTw, CurveFp},
    field::PrimeField,
    point::Point,
};

static CURVES: Lazy<Vec<Arc<Curve>>> = Lazy::new(|| {
    WEIERSTRASS_CURVES
        .iter()
        .map(WeierstrassParams::build)
        .chain(EDWARDS_CURVES.iter().map(EdwardsParams::build))
        .map(Arc::new)
        .collect()
});

/// Every registered curve, in a fixed order.
pub fn curves() -> &'static [Arc<Curve>] {
    &CURVES
}

/// Look up a curve by its object identifier.
pub fn find_by_oid(oid: &ObjectIdentifier) -> Result<&'static Arc<Curve>> {
    curves()
        .iter()
        .find(|curve| curve.oid() == Some(oid))
        .ok_or_else(|| Error::unknown_curve(format!("I don't know about the curve with oid {oid}")))
}

/// Look up a curve by its library name (`NIST256p`) or OpenSSL name
/// (`prime256v1`).
pub fn find_by_name(name: &str) -> Option<&'static Arc<Curve>> {
    curves()
        .iter()
        .find(|curve| curve.name() == name || curve.openssl_name() == Some(name))
}

/// Find the registered curve with exactly these parameters.
pub fn find_by_params(
    algebra: &CurveAlgebra,
    generator: &Point,
    order: &BigUint,
) -> Option<&'static Arc<Curve>> {
    curves().iter().find(|curve| {
        curve.order() == order && curve.algebra() == algebra && curve.generator() == generator
    })
}

/// Short Weierstrass curve parameters, big-endian.
struct WeierstrassParams {
    name: &'static str,
    openssl_name: &'static str,
    oid: ObjectIdentifier,
    p: &'static [u8],
    a: &'static [u8],
    b: &'static [u8],
    gx: &'static [u8],
    gy: &'static [u8],
    order: &'static [u8],
    cofactor: u32,
}

impl WeierstrassParams {
    fn build(&self) -> Curve {
        let field = PrimeField::new_unchecked(BigUint::from_bytes_be(self.p));
        let algebra = CurveAlgebra::from(CurveFp::from_field(
            field,
            BigUint::from_bytes_be(self.a),
            BigUint::from_bytes_be(self.b),
            Some(self.cofactor.into()),
        ));
        named_curve(
            algebra,
            self.name,
            self.openssl_name,
            self.oid,
            [self.gx, self.gy, self.order],
        )
    }
}

/// Twisted Edwards curve parameters, big-endian.
struct EdwardsParams {
    name: &'static str,
    openssl_name: &'static str,
    oid: ObjectIdentifier,
    p: &'static [u8],
    a: &'static [u8],
    d: &'static [u8],
    gx: &'static [u8],
    gy: &'static [u8],
    order: &'static [u8],
    cofactor: u32,
}

impl EdwardsParams {
    fn build(&self) -> Curve {
        let field = PrimeField::new_unchecked(BigUint::from_bytes_be(self.p));
        let algebra = CurveAlgebra::from(CurveEdTw::from_field(
            field,
            BigUint::from_bytes_be(self.a),
            BigUint::from_bytes_be(self.d),
            Some(self.cofactor.into()),
        ));
        named_curve(
            algebra,
            self.name,
            self.openssl_name,
            self.oid,
            [self.gx, self.gy, self.order],
        )
    }
}

fn named_curve(
    algebra: CurveAlgebra,
    name: &str,
    openssl_name: &str,
    oid: ObjectIdentifier,
    [gx, gy, order]: [&[u8]; 3],
) -> Curve {
    let order = BigUint::from_bytes_be(order);
    let generator = Point::from_affine_unchecked(
        &algebra,
        BigUint::from_bytes_be(gx),
        BigUint::from_bytes_be(gy),
    )
    .with_order(order.clone(), true);

    Curve::from_generator(name.into(), generator, order, Some(oid)).with_openssl_name(openssl_name)
}

const WEIERSTRASS_CURVES: &[WeierstrassParams] = &[
    WeierstrassParams {
        name: "NIST192p",
        openssl_name: "prime192v1",
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.1"),
        p: &hex!("fffffffffffffffffffffffffffffffeffffffffffffffff"),
        a: &hex!("fffffffffffffffffffffffffffffffefffffffffffffffc"),
        b: &hex!("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
        gx: &hex!("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
        gy: &hex!("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
        order: &hex!("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "NIST224p",
        openssl_name: "secp224r1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.33"),
        p: &hex!("ffffffffffffffffffffffffffffffff000000000000000000000001"),
        a: &hex!("fffffffffffffffffffffffffffffffefffffffffffffffffffffffe"),
        b: &hex!("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
        gx: &hex!("b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
        gy: &hex!("bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
        order: &hex!("ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "NIST256p",
        openssl_name: "prime256v1",
        oid: ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"),
        p: &hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        a: &hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
        b: &hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        gx: &hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        gy: &hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        order: &hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "NIST384p",
        openssl_name: "secp384r1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.34"),
        p: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000ffffffff"
        ),
        a: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000fffffffc"
        ),
        b: &hex!(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a"
            "c656398d8a2ed19d2a85c8edd3ec2aef"
        ),
        gx: &hex!(
            "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38"
            "5502f25dbf55296c3a545e3872760ab7"
        ),
        gy: &hex!(
            "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0"
            "0a60b1ce1d7e819d7a431d7c90ea0e5f"
        ),
        order: &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf"
            "581a0db248b0a77aecec196accc52973"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "NIST521p",
        openssl_name: "secp521r1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.35"),
        p: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffff"
        ),
        a: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffc"
        ),
        b: &hex!(
            "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1"
            "09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50"
            "3f00"
        ),
        gx: &hex!(
            "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d"
            "3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5"
            "bd66"
        ),
        gy: &hex!(
            "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e"
            "662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1"
            "6650"
        ),
        order: &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138"
            "6409"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "SECP256k1",
        openssl_name: "secp256k1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.10"),
        p: &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        a: &hex!("0000000000000000000000000000000000000000000000000000000000000000"),
        b: &hex!("0000000000000000000000000000000000000000000000000000000000000007"),
        gx: &hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        gy: &hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        order: &hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP160r1",
        openssl_name: "brainpoolP160r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.1"),
        p: &hex!("e95e4a5f737059dc60dfc7ad95b3d8139515620f"),
        a: &hex!("340e7be2a280eb74e2be61bada745d97e8f7c300"),
        b: &hex!("1e589a8595423412134faa2dbdec95c8d8675e58"),
        gx: &hex!("bed5af16ea3f6a4f62938c4631eb5af7bdbcdbc3"),
        gy: &hex!("1667cb477a1a8ec338f94741669c976316da6321"),
        order: &hex!("e95e4a5f737059dc60df5991d45029409e60fc09"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP192r1",
        openssl_name: "brainpoolP192r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.3"),
        p: &hex!("c302f41d932a36cda7a3463093d18db78fce476de1a86297"),
        a: &hex!("6a91174076b1e0e19c39c031fe8685c1cae040e5c69a28ef"),
        b: &hex!("469a28ef7c28cca3dc721d044f4496bcca7ef4146fbf25c9"),
        gx: &hex!("c0a0647eaab6a48753b033c56cb0f0900a2f5c4853375fd6"),
        gy: &hex!("14b690866abd5bb88b5f4828c1490002e6773fa2fa299b8f"),
        order: &hex!("c302f41d932a36cda7a3462f9e9e916b5be8f1029ac4acc1"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP224r1",
        openssl_name: "brainpoolP224r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.5"),
        p: &hex!("d7c134aa264366862a18302575d1d787b09f075797da89f57ec8c0ff"),
        a: &hex!("68a5e62ca9ce6c1c299803a6c1530b514e182ad8b0042a59cad29f43"),
        b: &hex!("2580f63ccfe44138870713b1a92369e33e2135d266dbb372386c400b"),
        gx: &hex!("0d9029ad2c7e5cf4340823b2a87dc68c9e4ce3174c1e6efdee12c07d"),
        gy: &hex!("58aa56f772c0726f24c6b89e4ecdac24354b9e99caa3f6d3761402cd"),
        order: &hex!("d7c134aa264366862a18302575d0fb98d116bc4b6ddebca3a5a7939f"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP256r1",
        openssl_name: "brainpoolP256r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.7"),
        p: &hex!("a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377"),
        a: &hex!("7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9"),
        b: &hex!("26dc5c6ce94a4b44f330b5d9bbd77cbf958416295cf7e1ce6bccdc18ff8c07b6"),
        gx: &hex!("8bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace3262"),
        gy: &hex!("547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f046997"),
        order: &hex!("a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP320r1",
        openssl_name: "brainpoolP320r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.9"),
        p: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa6f6f40def4f92b9ec7893ec28"
            "fcd412b1f1b32e27"
        ),
        a: &hex!(
            "3ee30b568fbab0f883ccebd46d3f3bb8a2a73513f5eb79da66190eb085ffa9f4"
            "92f375a97d860eb4"
        ),
        b: &hex!(
            "520883949dfdbc42d3ad198640688a6fe13f41349554b49acc31dccd88453981"
            "6f5eb4ac8fb1f1a6"
        ),
        gx: &hex!(
            "43bd7e9afb53d8b85289bcc48ee5bfe6f20137d10a087eb6e7871e2a10a599c7"
            "10af8d0d39e20611"
        ),
        gy: &hex!(
            "14fdd05545ec1cc8ab4093247f77275e0743ffed117182eaa9c77877aaac6ac7"
            "d35245d1692e8ee1"
        ),
        order: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa5b68f12a32d482ec7ee8658e9"
            "8691555b44c59311"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP384r1",
        openssl_name: "brainpoolP384r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.11"),
        p: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123"
            "acd3a729901d1a71874700133107ec53"
        ),
        a: &hex!(
            "7bc382c63d8c150c3c72080ace05afa0c2bea28e4fb22787139165efba91f90f"
            "8aa5814a503ad4eb04a8c7dd22ce2826"
        ),
        b: &hex!(
            "04a8c7dd22ce28268b39b55416f0447c2fb77de107dcd2a62e880ea53eeb62d5"
            "7cb4390295dbc9943ab78696fa504c11"
        ),
        gx: &hex!(
            "1d1c64f068cf45ffa2a63a81b7c13f6b8847a3e77ef14fe3db7fcafe0cbd10e8"
            "e826e03436d646aaef87b2e247d4af1e"
        ),
        gy: &hex!(
            "8abe1d7520f9c2a45cb1eb8e95cfd55262b70b29feec5864e19c054ff9912928"
            "0e4646217791811142820341263c5315"
        ),
        order: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7"
            "cf3ab6af6b7fc3103b883202e9046565"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP512r1",
        openssl_name: "brainpoolP512r1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.13"),
        p: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330871"
            "7d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f3"
        ),
        a: &hex!(
            "7830a3318b603b89e2327145ac234cc594cbdd8d3df91610a83441caea9863bc"
            "2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a72bf2c7b9e7c1ac4d77fc94ca"
        ),
        b: &hex!(
            "3df91610a83441caea9863bc2ded5d5aa8253aa10a2ef1c98b9ac8b57f1117a7"
            "2bf2c7b9e7c1ac4d77fc94cadc083e67984050b75ebae5dd2809bd638016f723"
        ),
        gx: &hex!(
            "81aee4bdd82ed9645a21322e9c4c6a9385ed9f70b5d916c1b43b62eef4d0098e"
            "ff3b1f78e2d0d48d50d1687b93b97d5f7c6d5047406a5e688b352209bcb9f822"
        ),
        gy: &hex!(
            "7dde385d566332ecc0eabfa9cf7822fdf209f70024a57b1aa000c55b881f8111"
            "b2dcde494a5f485e5bca4bd88a2763aed1ca2b2fa8f0540678cd1e0f3ad80892"
        ),
        order: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870"
            "553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "SECP112r1",
        openssl_name: "secp112r1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.6"),
        p: &hex!("db7c2abf62e35e668076bead208b"),
        a: &hex!("db7c2abf62e35e668076bead2088"),
        b: &hex!("659ef8ba043916eede8911702b22"),
        gx: &hex!("09487239995a5ee76b55f9c2f098"),
        gy: &hex!("a89ce5af8724c0a23e0e0ff77500"),
        order: &hex!("db7c2abf62e35e7628dfac6561c5"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "SECP112r2",
        openssl_name: "secp112r2",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.7"),
        p: &hex!("db7c2abf62e35e668076bead208b"),
        a: &hex!("6127c24c05f38a0aaaf65c0ef02c"),
        b: &hex!("51def1815db5ed74fcc34c85d709"),
        gx: &hex!("4ba30ab5e892b4e1649dd0928643"),
        gy: &hex!("adcd46f5882e3747def36e956e97"),
        order: &hex!("36df0aafd8b8d7597ca10520d04b"),
        cofactor: 4,
    },
    WeierstrassParams {
        name: "SECP128r1",
        openssl_name: "secp128r1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.28"),
        p: &hex!("fffffffdffffffffffffffffffffffff"),
        a: &hex!("fffffffdfffffffffffffffffffffffc"),
        b: &hex!("e87579c11079f43dd824993c2cee5ed3"),
        gx: &hex!("161ff7528b899b2d0c28607ca52c5b86"),
        gy: &hex!("cf5ac8395bafeb13c02da292dded7a83"),
        order: &hex!("fffffffe0000000075a30d1b9038a115"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "SECP160r1",
        openssl_name: "secp160r1",
        oid: ObjectIdentifier::new_unwrap("1.3.132.0.8"),
        p: &hex!("ffffffffffffffffffffffffffffffff7fffffff"),
        a: &hex!("ffffffffffffffffffffffffffffffff7ffffffc"),
        b: &hex!("1c97befc54bd7a8b65acf89f81d4d4adc565fa45"),
        gx: &hex!("4a96b5688ef573284664698968c38bb913cbfc82"),
        gy: &hex!("23a628553168947d59dcc912042351377ac5fb32"),
        order: &hex!("0100000000000000000001f4c8f927aed3ca752257"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP160t1",
        openssl_name: "brainpoolP160t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.2"),
        p: &hex!("e95e4a5f737059dc60dfc7ad95b3d8139515620f"),
        a: &hex!("e95e4a5f737059dc60dfc7ad95b3d8139515620c"),
        b: &hex!("7a556b6dae535b7b51ed2c4d7daa7a0b5c55f380"),
        gx: &hex!("b199b13b9b34efc1397e64baeb05acc265ff2378"),
        gy: &hex!("add6718b7c7c1961f0991b842443772152c9e0ad"),
        order: &hex!("e95e4a5f737059dc60df5991d45029409e60fc09"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP192t1",
        openssl_name: "brainpoolP192t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.4"),
        p: &hex!("c302f41d932a36cda7a3463093d18db78fce476de1a86297"),
        a: &hex!("c302f41d932a36cda7a3463093d18db78fce476de1a86294"),
        b: &hex!("13d56ffaec78681e68f9deb43b35bec2fb68542e27897b79"),
        gx: &hex!("3ae9e58c82f63c30282e1fe7bbf43fa72c446af6f4618129"),
        gy: &hex!("097e2c5667c2223a902ab5ca449d0084b7e5b3de7ccc01c9"),
        order: &hex!("c302f41d932a36cda7a3462f9e9e916b5be8f1029ac4acc1"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP224t1",
        openssl_name: "brainpoolP224t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.6"),
        p: &hex!("d7c134aa264366862a18302575d1d787b09f075797da89f57ec8c0ff"),
        a: &hex!("d7c134aa264366862a18302575d1d787b09f075797da89f57ec8c0fc"),
        b: &hex!("4b337d934104cd7bef271bf60ced1ed20da14c08b3bb64f18a60888d"),
        gx: &hex!("6ab1e344ce25ff3896424e7ffe14762ecb49f8928ac0c76029b4d580"),
        gy: &hex!("0374e9f5143e568cd23f3f4d7c0d4b1e41c8cc0d1c6abd5f1a46db4c"),
        order: &hex!("d7c134aa264366862a18302575d0fb98d116bc4b6ddebca3a5a7939f"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP256t1",
        openssl_name: "brainpoolP256t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.8"),
        p: &hex!("a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377"),
        a: &hex!("a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5374"),
        b: &hex!("662c61c430d84ea4fe66a7733d0b76b7bf93ebc4af2f49256ae58101fee92b04"),
        gx: &hex!("a3e8eb3cc1cfe7b7732213b23a656149afa142c47aafbc2b79a191562e1305f4"),
        gy: &hex!("2d996c823439c56d7f7b22e14644417e69bcb6de39d027001dabe8f35b25c9be"),
        order: &hex!("a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7"),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP320t1",
        openssl_name: "brainpoolP320t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.10"),
        p: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa6f6f40def4f92b9ec7893ec28"
            "fcd412b1f1b32e27"
        ),
        a: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa6f6f40def4f92b9ec7893ec28"
            "fcd412b1f1b32e24"
        ),
        b: &hex!(
            "a7f561e038eb1ed560b3d147db782013064c19f27ed27c6780aaf77fb8a547ce"
            "b5b4fef422340353"
        ),
        gx: &hex!(
            "925be9fb01afc6fb4d3e7d4990010f813408ab106c4f09cb7ee07868cc136fff"
            "3357f624a21bed52"
        ),
        gy: &hex!(
            "63ba3a7a27483ebf6671dbef7abb30ebee084e58a0b077ad42a5a0989d1ee71b"
            "1b9bc0455fb0d2c3"
        ),
        order: &hex!(
            "d35e472036bc4fb7e13c785ed201e065f98fcfa5b68f12a32d482ec7ee8658e9"
            "8691555b44c59311"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP384t1",
        openssl_name: "brainpoolP384t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.12"),
        p: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123"
            "acd3a729901d1a71874700133107ec53"
        ),
        a: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123"
            "acd3a729901d1a71874700133107ec50"
        ),
        b: &hex!(
            "7f519eada7bda81bd826dba647910f8c4b9346ed8ccdc64e4b1abd11756dce1d"
            "2074aa263b88805ced70355a33b471ee"
        ),
        gx: &hex!(
            "18de98b02db9a306f2afcd7235f72a819b80ab12ebd653172476fecd462aabff"
            "c4ff191b946a5f54d8d0aa2f418808cc"
        ),
        gy: &hex!(
            "25ab056962d30651a114afd2755ad336747f93475b7a1fca3b88f2b6a208ccfe"
            "469408584dc2b2912675bf5b9e582928"
        ),
        order: &hex!(
            "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7"
            "cf3ab6af6b7fc3103b883202e9046565"
        ),
        cofactor: 1,
    },
    WeierstrassParams {
        name: "BRAINPOOLP512t1",
        openssl_name: "brainpoolP512t1",
        oid: ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.14"),
        p: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330871"
            "7d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f3"
        ),
        a: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330871"
            "7d4d9b009bc66842aecda12ae6a380e62881ff2f2d82c68528aa6056583a48f0"
        ),
        b: &hex!(
            "7cbbbcf9441cfab76e1890e46884eae321f70c0bcb4981527897504bec3e36a6"
            "2bcdfa2304976540f6450085f2dae145c22553b465763689180ea2571867423e"
        ),
        gx: &hex!(
            "640ece5c12788717b9c1ba06cbc2a6feba85842458c56dde9db1758d39c0313d"
            "82ba51735cdb3ea499aa77a7d6943a64f7a3f25fe26f06b51baa2696fa9035da"
        ),
        gy: &hex!(
            "5b534bd595f5af0fa2c892376c84ace1bb4e3019b71634c01131159cae03cee9"
            "d9932184beef216bd71df2dadf86a627306ecff96dbb8bace198b61e00f8b332"
        ),
        order: &hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870"
            "553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069"
        ),
        cofactor: 1,
    },
];

const EDWARDS_CURVES: &[EdwardsParams] = &[
    EdwardsParams {
        name: "Ed25519",
        openssl_name: "ED25519",
        oid: ObjectIdentifier::new_unwrap("1.3.101.112"),
        p: &hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        a: &hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffec"),
        d: &hex!("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"),
        gx: &hex!("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
        gy: &hex!("6666666666666666666666666666666666666666666666666666666666666658"),
        order: &hex!("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        cofactor: 8,
    },
    EdwardsParams {
        name: "Ed448",
        openssl_name: "ED448",
        oid: ObjectIdentifier::new_unwrap("1.3.101.113"),
        p: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffff"
        ),
        a: &hex!(
            "0000000000000000000000000000000000000000000000000000000000000000"
            "000000000000000000000000000000000000000000000001"
        ),
        d: &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffff6756"
        ),
        gx: &hex!(
            "4f1970c66bed0ded221d15a622bf36da9e146570470f1767ea6de324a3d3a464"
            "12ae1af72ab66511433b80e18b00938e2626a82bc70cc05e"
        ),
        gy: &hex!(
            "693f46716eb6bc248876203756c9c7624bea73736ca3984087789c1e05a0c2d7"
            "3ad3ff1ce67c39c4fdbd132c4ed7c8ad9808795bf230fa14"
        ),
        order: &hex!(
            "3fffffffffffffffffffffffffffffffffffffffffffffffffffffff7cca23e9"
            "c44edb49aed63690216cc2728dc58f552378c292ab5844f3"
        ),
        cofactor: 4,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn generators_are_valid() {
        for curve in curves() {
            let g = curve.generator();
            let (x, y) = g.to_affine().unwrap();
            assert!(curve.algebra().contains_point(&x, &y), "{curve}");
            assert!(g.is_generator(), "{curve}");
            assert_eq!(g.order(), Some(curve.order()), "{curve}");
            assert!(g.mul(curve.order()).is_identity(), "{curve}");
            assert!(!g.mul(&(curve.order() - BigUint::one())).is_identity(), "{curve}");
        }
    }

    #[test]
    fn names_and_oids_are_unique() {
        let curves = curves();
        assert_eq!(curves.len(), 26);
        for (i, a) in curves.iter().enumerate() {
            for b in &curves[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.oid(), b.oid());
            }
        }
    }

    #[test]
    fn lookup_by_oid() {
        let oid = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
        assert_eq!(find_by_oid(&oid).unwrap().name(), "NIST256p");

        let err = find_by_oid(&ObjectIdentifier::new_unwrap("1.2.3.4")).unwrap_err();
        assert!(err.is_unknown_curve());
    }

    #[test]
    fn lookup_by_name() {
        let by_name = find_by_name("NIST256p").unwrap();
        let by_openssl = find_by_name("prime256v1").unwrap();
        assert!(Arc::ptr_eq(by_name, by_openssl));
        assert!(Arc::ptr_eq(
            find_by_name("secp256k1").unwrap(),
            find_by_name("SECP256k1").unwrap()
        ));
        assert!(find_by_name("P-256").is_none());
    }

    #[test]
    fn lookup_by_params() {
        let k256 = find_by_name("SECP256k1").unwrap();
        let found = find_by_params(k256.algebra(), k256.generator(), k256.order()).unwrap();
        assert!(Arc::ptr_eq(found, k256));

        let other = k256.generator().double();
        assert!(find_by_params(k256.algebra(), &other, k256.order()).is_none());
    }
}
