// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_secretbox_properties() {
    let secretbox = SecretBox::new(SecretBoxKey::generate().expect("keygen"));
    crate::op::tests::check_box_op(&secretbox);
}

#[test]
fn test_secretbox_wrong_key() {
    let nonce = [0u8; SECRETBOX_NONCEBYTES];
    let sealed = SecretBox::new(SecretBoxKey::generate().expect("keygen"))
        .seal_vec(&nonce, b"hello")
        .expect("seal");
    let other = SecretBox::new(SecretBoxKey::generate().expect("keygen"));
    assert_eq!(
        other.open_vec(&nonce, &sealed),
        Err(SodiumError::VerificationFailed)
    );
}

#[test]
fn test_secretbox_key_import() {
    let bytes = [0x42u8; SECRETBOX_KEYBYTES];
    let key = SecretBoxKey::from_bytes(&bytes).expect("import");
    assert_eq!(key.as_bytes(), &bytes);
    assert_eq!(key.size(), SECRETBOX_KEYBYTES);
    assert_eq!(key.bits(), 256);
    assert!(!format!("{key:?}").contains("42"));

    for len in [SECRETBOX_KEYBYTES - 1, SECRETBOX_KEYBYTES + 1] {
        assert!(matches!(
            SecretBoxKey::from_bytes(&vec![0u8; len]),
            Err(SodiumError::InvalidSize { role: "key", .. })
        ));
    }
}

#[test]
fn test_secretbox_keygen_not_zero() {
    for _ in 0..8 {
        let key = SecretBoxKey::generate().expect("keygen");
        assert!(!is_zero(key.as_bytes()));
    }
}

#[test]
fn test_secretbox_primitive() {
    assert_eq!(SecretBox::primitive(), "xsalsa20poly1305");
}

#[test]
fn test_secretbox_padded_layout() {
    let secretbox = SecretBox::new(SecretBoxKey::generate().expect("keygen"));
    let nonce = [7u8; SECRETBOX_NONCEBYTES];
    let mut padded = vec![0u8; SECRETBOX_ZEROBYTES];
    padded.extend_from_slice(b"padded message");

    assert_eq!(secretbox.seal_padded(&nonce, &padded, None), Ok(padded.len()));
    let mut sealed = vec![0xffu8; padded.len()];
    secretbox
        .seal_padded(&nonce, &padded, Some(&mut sealed))
        .expect("seal");
    assert_eq!(&sealed[..SECRETBOX_BOXZEROBYTES], &[0u8; SECRETBOX_BOXZEROBYTES]);
    assert_eq!(
        &sealed[SECRETBOX_BOXZEROBYTES..],
        secretbox.seal_vec(&nonce, b"padded message").expect("easy")
    );

    let mut opened = vec![0u8; sealed.len()];
    secretbox
        .open_padded(&nonce, &sealed, Some(&mut opened))
        .expect("open");
    assert_eq!(opened, padded);

    let last = sealed.len() - 1;
    sealed[last] ^= 1;
    let mut rejected = vec![0xaau8; sealed.len()];
    assert_eq!(
        secretbox.open_padded(&nonce, &sealed, Some(&mut rejected)),
        Err(SodiumError::VerificationFailed)
    );
    assert!(is_zero(&rejected));
}

#[test]
fn test_secretbox_padded_rejects_bad_padding() {
    let secretbox = SecretBox::new(SecretBoxKey::generate().expect("keygen"));
    let nonce = [0u8; SECRETBOX_NONCEBYTES];

    let mut padded = [0u8; SECRETBOX_ZEROBYTES + 4];
    padded[SECRETBOX_ZEROBYTES - 1] = 1;
    assert_eq!(
        secretbox.seal_padded(&nonce, &padded, None),
        Err(SodiumError::InvalidPadding("padded plaintext"))
    );
    assert!(matches!(
        secretbox.seal_padded(&nonce, &[0u8; SECRETBOX_ZEROBYTES - 1], None),
        Err(SodiumError::InvalidSize { role: "padded plaintext", .. })
    ));

    let mut sealed = [0u8; SECRETBOX_ZEROBYTES + 4];
    sealed[0] = 1;
    assert_eq!(
        secretbox.open_padded(&nonce, &sealed, None),
        Err(SodiumError::InvalidPadding("padded ciphertext"))
    );
}

#[test]
#[allow(unsafe_code)]
fn test_secretbox_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(SECRETBOX_ZEROBYTES, libsodium_sys::crypto_secretbox_zerobytes());
        assert_eq!(SECRETBOX_BOXZEROBYTES, libsodium_sys::crypto_secretbox_boxzerobytes());
        assert_eq!(SECRETBOX_KEYBYTES, libsodium_sys::crypto_secretbox_keybytes());
        assert_eq!(SECRETBOX_NONCEBYTES, libsodium_sys::crypto_secretbox_noncebytes());
        assert_eq!(SECRETBOX_MACBYTES, libsodium_sys::crypto_secretbox_macbytes());
    }
}
