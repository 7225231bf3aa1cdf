// Copyright (C) Microsoft Corporation. All rights reserved.

use std::io::Write;

use test_with_tracing::test;

use super::*;

const JEFE_DATA: &[u8] = b"what do ya want for nothing?";
const JEFE_SHA512: &str = "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
                           9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737";

fn streaming_tag<A>(algo: &A, chunks: &[&[u8]]) -> Vec<u8>
where
    A: MacStreamingOp,
{
    let mut ctx = algo.mac_init().expect("init");
    for chunk in chunks {
        ctx.update(chunk).expect("update");
    }
    ctx.finish_vec().expect("finish")
}

#[test]
fn test_hmac_sha256_rfc4231_case2() {
    let algo = HmacSha256::from_key_bytes(b"Jefe");
    assert_eq!(
        hex::encode(streaming_tag(&algo, &[&b"what do ya "[..], &b"want for nothing?"[..]])),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn test_hmac_sha512_rfc4231_case2() {
    let algo = HmacSha512::from_key_bytes(b"Jefe");
    assert_eq!(hex::encode(streaming_tag(&algo, &[JEFE_DATA])), JEFE_SHA512);
}

#[test]
fn test_hmac_sha512256_is_truncated_sha512() {
    let algo = HmacSha512256::from_key_bytes(b"Jefe");
    assert_eq!(
        hex::encode(streaming_tag(&algo, &[JEFE_DATA])),
        &JEFE_SHA512[..64]
    );
}

#[test]
fn test_hmac_one_shot_matches_streaming() {
    let key = AuthKey::generate().expect("keygen");
    let data = b"one-shot and streaming must agree";

    let a = HmacSha256::new(&key);
    assert_eq!(a.mac_vec(data).expect("mac"), streaming_tag(&a, &[&data[..]]));
    let b = HmacSha512::new(&key);
    assert_eq!(b.mac_vec(data).expect("mac"), streaming_tag(&b, &[&data[..]]));
    let c = HmacSha512256::new(&key);
    assert_eq!(c.mac_vec(data).expect("mac"), streaming_tag(&c, &[&data[..]]));
}

#[test]
fn test_hmac_verify() {
    let algo = HmacSha512256::new(&AuthKey::generate().expect("keygen"));
    let tag = algo.mac_vec(b"message").expect("mac");
    algo.verify(b"message", &tag).expect("verify");

    assert_eq!(algo.verify(b"messagf", &tag), Err(SodiumError::VerificationFailed));

    let mut bad = tag.clone();
    bad[31] ^= 0x80;
    assert_eq!(algo.verify(b"message", &bad), Err(SodiumError::VerificationFailed));

    assert!(matches!(
        algo.verify(b"message", &tag[..31]),
        Err(SodiumError::InvalidSize { role: "mac", .. })
    ));
}

#[test]
fn test_hmac_streaming_finish_verify() {
    let algo = HmacSha256::from_key_bytes(b"a key of arbitrary length, neither 32 bytes nor a block");
    let tag = streaming_tag(&algo, &[&b"abc"[..]]);

    let mut ctx = algo.mac_init().expect("init");
    ctx.write_all(b"abc").expect("write");
    ctx.finish_verify(&tag).expect("verify");

    let mut ctx = algo.mac_init().expect("init");
    ctx.write_all(b"abd").expect("write");
    assert_eq!(ctx.finish_verify(&tag), Err(SodiumError::VerificationFailed));

    let ctx = algo.mac_init().expect("init");
    assert!(matches!(
        ctx.finish_verify(&tag[..16]),
        Err(SodiumError::InvalidSize { role: "mac", .. })
    ));
}

#[test]
fn test_hmac_one_shot_requires_full_key() {
    let algo = HmacSha512::from_key_bytes(b"Jefe");
    assert!(matches!(
        algo.mac_vec(b"data"),
        Err(SodiumError::InvalidSize { role: "key", expected: SizeBound::Exact(32), actual: 4 })
    ));
    assert!(matches!(
        algo.verify(b"data", &[0u8; AUTH_HMACSHA512_BYTES]),
        Err(SodiumError::InvalidSize { role: "key", .. })
    ));
}

#[test]
fn test_hmac_context_sizes() {
    let key = AuthKey::generate().expect("keygen");
    let ctx = HmacSha256::new(&key).mac_init().expect("init");
    assert_eq!((ctx.output_size(), ctx.block_size()), (32, 64));
    let ctx = HmacSha512::new(&key).mac_init().expect("init");
    assert_eq!((ctx.output_size(), ctx.block_size()), (64, 128));
    let ctx = HmacSha512256::new(&key).mac_init().expect("init");
    assert_eq!((ctx.output_size(), ctx.block_size()), (32, 128));
}

#[test]
fn test_hmac_debug_hides_key() {
    let algo = HmacSha256::from_key_bytes(b"Jefe");
    assert_eq!(format!("{algo:?}"), "HmacSha256 { .. }");
}

#[test]
#[allow(unsafe_code)]
fn test_auth_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(AUTH_KEYBYTES, libsodium_sys::crypto_auth_keybytes());
        assert_eq!(AUTH_KEYBYTES, libsodium_sys::crypto_auth_hmacsha256_keybytes());
        assert_eq!(AUTH_KEYBYTES, libsodium_sys::crypto_auth_hmacsha512_keybytes());
        assert_eq!(AUTH_HMACSHA256_BYTES, libsodium_sys::crypto_auth_hmacsha256_bytes());
        assert_eq!(AUTH_HMACSHA512_BYTES, libsodium_sys::crypto_auth_hmacsha512_bytes());
        assert_eq!(AUTH_HMACSHA512256_BYTES, libsodium_sys::crypto_auth_hmacsha512256_bytes());
    }
    assert_eq!(auth_primitive(), "hmacsha512256");
}

#[test]
fn test_generated_keys_are_fresh() {
    let a = AuthKey::generate().expect("keygen");
    let b = AuthKey::generate().expect("keygen");
    assert_ne!(a.as_bytes(), b.as_bytes());
    assert!(!is_zero(a.as_bytes()));

    let g = GenericHashKey::generate().expect("keygen");
    assert_eq!(g.as_bytes().len(), GenericHashKey::SIZE);
    assert!(!is_zero(g.as_bytes()));

    let aead = AeadKey::generate().expect("keygen");
    assert_eq!(aead.size(), AEAD_KEYBYTES);
    assert_ne!(aead.as_bytes(), AeadKey::generate().expect("keygen").as_bytes());
}
