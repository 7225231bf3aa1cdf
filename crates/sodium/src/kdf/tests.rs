// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_kdf_matches_blake2b_construction() {
    let key = KdfKey::generate().expect("keygen");
    let subkey = Kdf::derive(&key, 0x0102_0304_0506_0708, b"KDF test", 48).expect("derive");

    let mut salt = [0u8; 16];
    salt[..8].copy_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
    let mut personal = [0u8; 16];
    personal[..8].copy_from_slice(b"KDF test");
    let expected = Blake2b::new(48)
        .and_then(|a| a.with_key(key.as_bytes()))
        .and_then(|a| a.with_salt_personal(&salt, &personal))
        .expect("algo")
        .hash_vec(b"")
        .expect("hash");
    assert_eq!(subkey.as_bytes(), expected.as_slice());
}

#[test]
fn test_kdf_deterministic_and_independent() {
    let key = KdfKey::generate().expect("keygen");
    let a = Kdf::derive(&key, 1, b"__auth__", 32).expect("a");
    let again = Kdf::derive(&key, 1, b"__auth__", 32).expect("again");
    let other_id = Kdf::derive(&key, 2, b"__auth__", 32).expect("id");
    let other_ctx = Kdf::derive(&key, 1, b"__encr__", 32).expect("ctx");

    assert_eq!(a.as_bytes(), again.as_bytes());
    assert_ne!(a.as_bytes(), other_id.as_bytes());
    assert_ne!(a.as_bytes(), other_ctx.as_bytes());
    assert_eq!(a.size(), 32);
}

#[test]
fn test_kdf_derive_op() {
    let key = KdfKey::generate().expect("keygen");
    let algo = KdfAlgo::new(7, b"sessions").expect("algo");
    assert_eq!(algo.subkey_id(), 7);
    assert_eq!(algo.context(), b"sessions");

    let derived = algo.derive(&key, KDF_BYTES_MAX).expect("derive");
    assert_eq!(derived.size(), KDF_BYTES_MAX);
    assert!(!format!("{derived:?}").contains(&hex::encode(derived.as_bytes())));
}

#[test]
fn test_kdf_bounds() {
    let key = KdfKey::generate().expect("keygen");
    for len in [KDF_BYTES_MIN - 1, KDF_BYTES_MAX + 1] {
        assert!(matches!(
            Kdf::derive(&key, 0, b"context_", len),
            Err(SodiumError::InvalidSize { role: "subkey", expected: SizeBound::Range(16, 64), .. })
        ));
    }
    for ctx in [&b"short"[..], &b"too long!"[..]] {
        assert!(matches!(
            KdfAlgo::new(0, ctx),
            Err(SodiumError::InvalidSize { role: "context", .. })
        ));
    }
}

#[test]
#[allow(unsafe_code)]
fn test_kdf_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(KDF_KEYBYTES, libsodium_sys::crypto_kdf_keybytes());
        assert_eq!(KDF_CONTEXTBYTES, libsodium_sys::crypto_kdf_contextbytes());
        assert_eq!(KDF_BYTES_MIN, libsodium_sys::crypto_kdf_bytes_min());
        assert_eq!(KDF_BYTES_MAX, libsodium_sys::crypto_kdf_bytes_max());
    }
    assert_eq!(Kdf::primitive(), "blake2b");
}
