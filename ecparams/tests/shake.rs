//! SHAKE256 test vectors and cross-checks.

use ecparams::{Shake256, shake_256};
use hex_literal::hex;
use proptest::prelude::*;
use sha3::digest::{ExtendableOutput, Update, XofReader};

#[test]
fn vectors() {
    let vectors: [(&[u8], Vec<u8>); 5] = [
        (
            b"Message.",
            hex!("78a137bb33aee272b1024f3943e5cf0c4e9c72762e344cf8f9c3259d4f912c3a").to_vec(),
        ),
        (
            b"",
            hex!("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f").to_vec(),
        ),
        (
            b"message",
            hex!("8616e1e4cfd8b5f7d92d43d86e1b1451a2a65af864fcb126c2660ab34651b175").to_vec(),
        ),
        (b"message", hex!("8616e1e4cfd8b5f7d92d43d86e1b1451").to_vec()),
        (
            b"message",
            hex!(
                "8616e1e4cfd8b5f7d92d43d86e1b1451a2a65af864fcb126c2660ab34651b175"
                "30d6ba2a4665f19df06225b126d13eed91d50de7b9cb65f33a46aed36c7dc5e8"
            )
            .to_vec(),
        ),
    ];

    for (msg, expected) in vectors {
        assert_eq!(shake_256(msg, expected.len()), expected);
    }
}

#[test]
fn long_message() {
    assert_eq!(
        shake_256(&[b'A'; 1024], 32),
        hex!("a5ef7e308be83364e59cf3b5f3ba20a35ae730fdbc3311bf83895082b441e9b3")
    );
}

#[test]
fn output_is_a_prefix_of_longer_output() {
    let long = shake_256(b"message", 1000);
    for len in [1, 16, 135, 136, 137, 272, 999] {
        assert_eq!(shake_256(b"message", len), long[..len]);
    }
}

fn reference(msg: &[u8], len: usize) -> Vec<u8> {
    let mut hasher = sha3::Shake256::default();
    hasher.update(msg);
    let mut out = vec![0u8; len];
    hasher.finalize_xof().read(&mut out);
    out
}

proptest! {
    #[test]
    fn matches_sha3_crate(
        msg in proptest::collection::vec(any::<u8>(), 0..600),
        len in 0usize..600,
    ) {
        prop_assert_eq!(shake_256(&msg, len), reference(&msg, len));
    }

    #[test]
    fn incremental_matches_one_shot(
        msg in proptest::collection::vec(any::<u8>(), 0..600),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(msg.len() + 1);
        let mut hasher = Shake256::new();
        hasher.update(&msg[..at]);
        hasher.update(&msg[at..]);

        let mut out = [0u8; 200];
        hasher.finalize_xof().read(&mut out);
        prop_assert_eq!(out.to_vec(), shake_256(&msg, 200));
    }
}
