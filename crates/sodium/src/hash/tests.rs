// Copyright (C) Microsoft Corporation. All rights reserved.

use std::io::Write;

use test_with_tracing::test;

use super::*;

#[test]
fn test_sha256_kat() {
    assert_eq!(
        hex::encode(Sha256.hash_vec(b"abc").expect("hash")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        hex::encode(Sha256.hash_vec(b"").expect("hash")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha512_kat() {
    assert_eq!(
        hex::encode(Sha512.hash_vec(b"abc").expect("hash")),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn test_sha_streaming_matches_one_shot() {
    let data = vec![0x61u8; 1_000];

    let mut ctx = Sha256.hash_init().expect("init");
    for chunk in data.chunks(63) {
        ctx.write_all(chunk).expect("write");
    }
    assert_eq!(ctx.finish_vec().expect("finish"), Sha256.hash_vec(&data).expect("hash"));

    let mut ctx = Sha512.hash_init().expect("init");
    for chunk in data.chunks(129) {
        ctx.update(chunk).expect("update");
    }
    assert_eq!(ctx.finish_vec().expect("finish"), Sha512.hash_vec(&data).expect("hash"));
}

#[test]
fn test_sha_context_sizes() {
    let ctx = Sha256.hash_init().expect("init");
    assert_eq!((ctx.output_size(), ctx.block_size()), (32, 64));
    assert_eq!(*ctx.algo(), Sha256);

    let ctx = Sha512.hash_init().expect("init");
    assert_eq!((ctx.output_size(), ctx.block_size()), (64, 128));
}

#[test]
fn test_sha_finish_short_buffer() {
    let mut ctx = Sha256.hash_init().expect("init");
    ctx.update(b"abc").expect("update");
    let mut out = [0u8; 31];
    assert!(matches!(
        ctx.finish(&mut out),
        Err(SodiumError::InvalidSize { expected: SizeBound::AtLeast(32), actual: 31, .. })
    ));
}

#[test]
#[allow(unsafe_code)]
fn test_hash_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(SHA256_BYTES, libsodium_sys::crypto_hash_sha256_bytes());
        assert_eq!(SHA512_BYTES, libsodium_sys::crypto_hash_sha512_bytes());
        assert_eq!(SHA512_BYTES, libsodium_sys::crypto_hash_bytes());
    }
}
