// Copyright (C) Microsoft Corporation. All rights reserved.


use test_with_tracing::test;

use super::*;

// RFC 8032 section 7.1, TEST 1.
const RFC8032_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const RFC8032_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
const RFC8032_SIGNATURE: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555\
                                 fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

fn rfc8032_keypair() -> SignKeyPair {
    SignKeyPair::from_seed(&hex::decode(RFC8032_SEED).expect("hex")).expect("seed")
}

#[test]
fn test_ed25519_rfc8032_test1() {
    let keypair = rfc8032_keypair();
    assert_eq!(hex::encode(keypair.verifying_key().as_bytes()), RFC8032_PUBLIC);

    let signature = Ed25519Algo
        .sign_vec(keypair.signing_key(), b"")
        .expect("sign");
    assert_eq!(hex::encode(&signature), RFC8032_SIGNATURE);
    Ed25519Algo
        .verify(keypair.verifying_key(), b"", &signature)
        .expect("verify");
}

#[test]
fn test_ed25519_detached_tamper() {
    let keypair = SignKeyPair::generate().expect("keygen");
    let message = b"signed statement";
    let signature = Ed25519Algo
        .sign_vec(keypair.signing_key(), message)
        .expect("sign");
    assert_eq!(signature.len(), SIGN_BYTES);

    assert_eq!(
        Ed25519Algo.verify(keypair.verifying_key(), b"signed statemenT", &signature),
        Err(SodiumError::VerificationFailed)
    );

    let mut bad = signature.clone();
    bad[10] ^= 0x04;
    assert_eq!(
        Ed25519Algo.verify(keypair.verifying_key(), message, &bad),
        Err(SodiumError::VerificationFailed)
    );

    let other = SignKeyPair::generate().expect("keygen");
    assert_eq!(
        Ed25519Algo.verify(other.verifying_key(), message, &signature),
        Err(SodiumError::VerificationFailed)
    );

    for len in [SIGN_BYTES - 1, SIGN_BYTES + 1] {
        assert!(matches!(
            Ed25519Algo.verify(keypair.verifying_key(), message, &vec![0u8; len]),
            Err(SodiumError::InvalidSize { role: "signature", .. })
        ));
    }
}

#[test]
fn test_ed25519_attached() {
    let keypair = rfc8032_keypair();
    let signed = sign_attached_vec(keypair.signing_key(), b"attached").expect("sign");
    assert_eq!(signed.len(), SIGN_BYTES + 8);
    assert_eq!(&signed[SIGN_BYTES..], b"attached");

    // The attached signature is the detached one.
    let detached = Ed25519Algo
        .sign_vec(keypair.signing_key(), b"attached")
        .expect("detached");
    assert_eq!(&signed[..SIGN_BYTES], detached.as_slice());

    assert_eq!(
        open_attached_vec(keypair.verifying_key(), &signed).expect("open"),
        b"attached"
    );

    let mut tampered = signed.clone();
    tampered[SIGN_BYTES] ^= 0x01;
    let mut out = vec![0x99u8; 8];
    assert_eq!(
        open_attached(keypair.verifying_key(), &tampered, Some(&mut out)),
        Err(SodiumError::VerificationFailed)
    );
    assert!(out.iter().all(|&b| b == 0));

    assert!(open_attached(keypair.verifying_key(), &signed[..SIGN_BYTES - 1], None)
        .unwrap_err()
        .is_programmer_error());
}

#[test]
fn test_ed25519_key_accessors() {
    let keypair = rfc8032_keypair();
    let signing = keypair.signing_key();
    assert_eq!(hex::encode(signing.seed().expect("seed").as_bytes()), RFC8032_SEED);
    assert_eq!(&signing.verifying_key().expect("pk"), keypair.verifying_key());

    let rebuilt = SignKeyPair::from_signing_key(signing.clone()).expect("rebuild");
    assert_eq!(rebuilt.verifying_key(), keypair.verifying_key());

    // The secret key is the seed followed by the public key.
    assert_eq!(hex::encode(&signing.as_bytes()[32..]), RFC8032_PUBLIC);
    assert!(!format!("{keypair:?}").contains(RFC8032_SEED));
}

#[test]
fn test_ed25519_seed_size() {
    assert!(matches!(
        SignKeyPair::from_seed(&[0u8; 31]),
        Err(SodiumError::InvalidSize { role: "seed", .. })
    ));
}

#[test]
fn test_ed25519_keygen_not_zero() {
    for _ in 0..8 {
        let keypair = SignKeyPair::generate().expect("keygen");
        assert!(!is_zero(keypair.signing_key().as_bytes()));
        assert!(!is_zero(keypair.verifying_key().as_bytes()));
    }
}

#[test]
fn test_ed25519_random_seed_round_trip() {
    let seed = SignSeed::generate().expect("seed");
    assert!(!is_zero(seed.as_bytes()));
    let pair = SignKeyPair::from_seed(seed.as_bytes()).expect("from_seed");
    assert_eq!(
        pair.signing_key().seed().expect("seed").as_bytes(),
        seed.as_bytes()
    );
}

#[test]
fn test_ed25519_to_curve25519_agree() {
    let alice = SignKeyPair::generate().expect("alice");
    let bob = SignKeyPair::generate().expect("bob");

    let alice_sk = alice.signing_key().to_curve25519().expect("alice sk");
    let alice_pk = alice.verifying_key().to_curve25519().expect("alice pk");
    let bob_sk = bob.signing_key().to_curve25519().expect("bob sk");
    let bob_pk = bob.verifying_key().to_curve25519().expect("bob pk");

    // The converted public key belongs to the converted secret key.
    assert_eq!(
        scalarmult_base(alice_sk.as_bytes()).expect("base").as_slice(),
        alice_pk.as_bytes()
    );

    let algo = BoxAlgorithm::default();
    let nonce = [0u8; BOX_NONCEBYTES];
    let sealed = CryptoBox::new(algo, &bob_pk, &alice_sk)
        .seal_vec(&nonce, b"converted keys")
        .expect("seal");
    let opened = CryptoBox::new(algo, &alice_pk, &bob_sk)
        .open_vec(&nonce, &sealed)
        .expect("open");
    assert_eq!(opened, b"converted keys");
}

#[test]
#[allow(unsafe_code)]
fn test_sign_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(SIGN_BYTES, libsodium_sys::crypto_sign_bytes());
        assert_eq!(SIGN_PUBLICKEYBYTES, libsodium_sys::crypto_sign_publickeybytes());
        assert_eq!(SIGN_SECRETKEYBYTES, libsodium_sys::crypto_sign_secretkeybytes());
        assert_eq!(SIGN_SEEDBYTES, libsodium_sys::crypto_sign_seedbytes());
    }
    assert_eq!(Ed25519Algo::primitive(), "ed25519");
}
