// Copyright (C) Microsoft Corporation. All rights reserved.


use test_with_tracing::test;

use super::*;

const ALGOS: [BoxAlgorithm; 2] = [
    BoxAlgorithm::Curve25519XSalsa20Poly1305,
    BoxAlgorithm::Curve25519XChaCha20Poly1305,
];

fn pair(algo: BoxAlgorithm) -> (BoxKeyPair, BoxKeyPair) {
    (
        BoxKeyPair::generate(algo).expect("alice"),
        BoxKeyPair::generate(algo).expect("bob"),
    )
}

#[test]
fn test_box_properties() {
    for algo in ALGOS {
        let (alice, bob) = pair(algo);
        crate::op::tests::check_box_op(&alice.box_for(bob.public_key()));
    }
}

#[test]
fn test_precomputed_box_properties() {
    for algo in ALGOS {
        let (alice, bob) = pair(algo);
        let precomputed = alice.box_for(bob.public_key()).precompute().expect("beforenm");
        crate::op::tests::check_box_op(&precomputed);
    }
}

#[test]
fn test_box_hello_zero_nonce() {
    let (alice, bob) = pair(BoxAlgorithm::default());
    let nonce = [0u8; BOX_NONCEBYTES];

    let sealed = alice
        .box_for(bob.public_key())
        .seal_vec(&nonce, b"hello")
        .expect("seal");
    let from_alice = bob.box_for(alice.public_key());
    assert_eq!(from_alice.open_vec(&nonce, &sealed).expect("open"), b"hello");

    // Tag bytes come first in the combined layout.
    let i = sealed[..BOX_MACBYTES]
        .iter()
        .position(|&b| b != 0)
        .expect("tag is not all zero");
    let mut tampered = sealed.clone();
    tampered[i] = 0;
    assert_eq!(
        from_alice.open_vec(&nonce, &tampered),
        Err(SodiumError::VerificationFailed)
    );
}

#[test]
fn test_box_both_directions_share_key() {
    for algo in ALGOS {
        let (alice, bob) = pair(algo);
        let a = alice.box_for(bob.public_key()).precompute().expect("alice");
        let b = bob.box_for(alice.public_key()).precompute().expect("bob");
        assert_eq!(a.shared_key().as_bytes(), b.shared_key().as_bytes());
    }
}

#[test]
fn test_precomputed_matches_keypair_form() {
    for algo in ALGOS {
        let (alice, bob) = pair(algo);
        let nonce = [0x11u8; BOX_NONCEBYTES];
        let message = b"precomputed or not, same bytes";

        let direct = alice.box_for(bob.public_key());
        let precomputed = direct.precompute().expect("beforenm");
        let sealed = direct.seal_vec(&nonce, message).expect("seal");
        assert_eq!(precomputed.seal_vec(&nonce, message).expect("seal"), sealed);

        // Bob opens with a box rebuilt from the stored shared key.
        let shared = bob
            .box_for(alice.public_key())
            .precompute()
            .expect("beforenm")
            .shared_key()
            .clone();
        let restored = PrecomputedBox::from_shared_key(algo, shared);
        assert_eq!(restored.open_vec(&nonce, &sealed).expect("open"), message);
    }
}

#[test]
fn test_box_algorithms_not_interchangeable() {
    let seed = [0x07u8; BOX_SEEDBYTES];
    let alice = BoxKeyPair::from_seed(BoxAlgorithm::Curve25519XSalsa20Poly1305, &seed).expect("a");
    let bob = BoxKeyPair::from_seed(BoxAlgorithm::Curve25519XSalsa20Poly1305, &[0x08; 32]).expect("b");
    let nonce = [0u8; BOX_NONCEBYTES];

    let sealed = alice
        .box_for(bob.public_key())
        .seal_vec(&nonce, b"salsa")
        .expect("seal");
    let chacha = CryptoBox::new(
        BoxAlgorithm::Curve25519XChaCha20Poly1305,
        alice.public_key(),
        bob.secret_key(),
    );
    assert_eq!(
        chacha.open_vec(&nonce, &sealed),
        Err(SodiumError::VerificationFailed)
    );
}

#[test]
fn test_box_seed_keypair_deterministic() {
    for algo in ALGOS {
        let seed = [0xa5u8; BOX_SEEDBYTES];
        let first = BoxKeyPair::from_seed(algo, &seed).expect("seed");
        let second = BoxKeyPair::from_seed(algo, &seed).expect("seed");
        assert_eq!(first.public_key(), second.public_key());
        assert_eq!(first.secret_key().as_bytes(), second.secret_key().as_bytes());

        let other = BoxKeyPair::from_seed(algo, &[0xa6u8; BOX_SEEDBYTES]).expect("seed");
        assert_ne!(first.public_key(), other.public_key());
    }

    assert!(matches!(
        BoxKeyPair::from_seed(BoxAlgorithm::default(), &[0u8; 31]),
        Err(SodiumError::InvalidSize { role: "seed", .. })
    ));
}

#[test]
fn test_box_public_key_matches_scalarmult_base() {
    let keypair = BoxKeyPair::generate(BoxAlgorithm::default()).expect("keygen");
    let derived = scalarmult_base(keypair.secret_key().as_bytes()).expect("base");
    assert_eq!(derived.as_slice(), keypair.public_key().as_bytes());
}

#[test]
fn test_box_keygen_not_zero() {
    for algo in ALGOS {
        for _ in 0..8 {
            let keypair = BoxKeyPair::generate(algo).expect("keygen");
            assert!(!is_zero(keypair.public_key().as_bytes()));
            assert!(!is_zero(keypair.secret_key().as_bytes()));
        }
    }
}

#[test]
fn test_box_keypair_debug_hides_secret() {
    let keypair = BoxKeyPair::from_seed(BoxAlgorithm::default(), &[0x3cu8; 32]).expect("seed");
    let secret_hex = hex::encode(keypair.secret_key().as_bytes());
    let debug = format!("{keypair:?}");
    assert!(!debug.contains(&secret_hex));
    assert!(debug.contains("BoxKeyPair"));
}

#[test]
fn test_box_public_key_import() {
    let bytes = [9u8; BOX_PUBLICKEYBYTES];
    let pk = BoxPublicKey::from_bytes(&bytes).expect("import");
    assert_eq!(pk.as_bytes(), &bytes);
    assert!(matches!(
        BoxPublicKey::from_bytes(&bytes[..31]),
        Err(SodiumError::InvalidSize { role: "public key", .. })
    ));
}

#[test]
fn test_box_names() {
    assert_eq!(
        BoxAlgorithm::Curve25519XSalsa20Poly1305.name(),
        "curve25519xsalsa20poly1305"
    );
    assert_eq!(
        BoxAlgorithm::Curve25519XChaCha20Poly1305.name(),
        "curve25519xchacha20poly1305"
    );
    assert_eq!(
        BoxAlgorithm::primitive(),
        BoxAlgorithm::default().name()
    );
}

#[test]
#[allow(unsafe_code)]
fn test_box_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(BOX_PUBLICKEYBYTES, libsodium_sys::crypto_box_publickeybytes());
        assert_eq!(BOX_SECRETKEYBYTES, libsodium_sys::crypto_box_secretkeybytes());
        assert_eq!(BOX_SEEDBYTES, libsodium_sys::crypto_box_seedbytes());
        assert_eq!(BOX_NONCEBYTES, libsodium_sys::crypto_box_noncebytes());
        assert_eq!(BOX_MACBYTES, libsodium_sys::crypto_box_macbytes());
        assert_eq!(BOX_BEFORENMBYTES, libsodium_sys::crypto_box_beforenmbytes());
        assert_eq!(BOX_SEALBYTES, libsodium_sys::crypto_box_sealbytes());
        assert_eq!(
            BOX_NONCEBYTES,
            libsodium_sys::crypto_box_curve25519xchacha20poly1305_noncebytes()
        );
        assert_eq!(
            BOX_SEALBYTES,
            libsodium_sys::crypto_box_curve25519xchacha20poly1305_sealbytes()
        );
    }
}
