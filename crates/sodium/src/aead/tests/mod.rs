// Copyright (C) Microsoft Corporation. All rights reserved.

mod aes256gcm_tests;

use super::*;

/// Round trip, detached/combined equivalence and tamper rejection for any
/// AEAD implementation.
pub(crate) fn check_aead_properties(cipher: &impl AeadOp) {
    let nonce = vec![0x24u8; cipher.nonce_size()];
    let aad = b"header";
    let message = b"attack at dawn, bring snacks";

    let sealed = cipher
        .seal_vec(&nonce, Some(aad), message)
        .expect("seal");
    assert_eq!(sealed.len(), message.len() + cipher.tag_size());

    let opened = cipher.open_vec(&nonce, Some(aad), &sealed).expect("open");
    assert_eq!(opened, message);

    let (ciphertext, tag) = cipher
        .seal_detached_vec(&nonce, Some(aad), message)
        .expect("seal detached");
    assert_eq!([ciphertext.clone(), tag.clone()].concat(), sealed);
    let opened = cipher
        .open_detached_vec(&nonce, Some(aad), &ciphertext, &tag)
        .expect("open detached");
    assert_eq!(opened, message);

    for bit in [0usize, 7, 8 * message.len(), 8 * sealed.len() - 1] {
        let mut tampered = sealed.clone();
        tampered[bit / 8] ^= 1 << (bit % 8);
        assert_eq!(
            cipher.open_vec(&nonce, Some(aad), &tampered),
            Err(SodiumError::VerificationFailed)
        );
    }

    assert_eq!(
        cipher.open_vec(&nonce, Some(b"headeR"), &sealed),
        Err(SodiumError::VerificationFailed)
    );
    assert_eq!(
        cipher.open_vec(&nonce, None, &sealed),
        Err(SodiumError::VerificationFailed)
    );

    let mut other_nonce = nonce.clone();
    other_nonce[0] ^= 0x80;
    assert_eq!(
        cipher.open_vec(&other_nonce, Some(aad), &sealed),
        Err(SodiumError::VerificationFailed)
    );

    let mut bad_tag = tag.clone();
    bad_tag[0] ^= 1;
    let mut plaintext = vec![0xeeu8; ciphertext.len()];
    assert_eq!(
        cipher.open_detached(&nonce, Some(aad), &ciphertext, &bad_tag, &mut plaintext),
        Err(SodiumError::VerificationFailed)
    );
    assert!(plaintext.iter().all(|&b| b == 0));
}

/// Wrong-sized nonces, tags and buffers are rejected before the native call
/// runs, leaving every output untouched.
pub(crate) fn check_aead_size_boundaries(cipher: &impl AeadOp) {
    let message = b"boundary";
    let nonce_size = cipher.nonce_size();
    let tag_size = cipher.tag_size();

    for len in [nonce_size - 1, nonce_size + 1] {
        let nonce = vec![0u8; len];
        let mut out = vec![0x11u8; message.len() + tag_size];
        let err = cipher
            .seal(&nonce, None, message, Some(&mut out))
            .unwrap_err();
        assert!(matches!(err, SodiumError::InvalidSize { role: "nonce", .. }));
        assert!(out.iter().all(|&b| b == 0x11));
    }

    let nonce = vec![0u8; nonce_size];
    let mut ciphertext = vec![0x11u8; message.len()];
    for len in [tag_size - 1, tag_size + 1] {
        let mut tag = vec![0x22u8; len];
        let err = cipher
            .seal_detached(&nonce, None, message, &mut ciphertext, &mut tag)
            .unwrap_err();
        assert!(matches!(err, SodiumError::InvalidSize { role: "tag", .. }));
        assert!(ciphertext.iter().all(|&b| b == 0x11));
    }

    let mut short = vec![0u8; message.len() + tag_size - 1];
    assert!(cipher
        .seal(&nonce, None, message, Some(&mut short))
        .unwrap_err()
        .is_programmer_error());

    assert!(matches!(
        cipher.open_vec(&nonce, None, &[0u8; 3]),
        Err(SodiumError::InvalidSize {
            role: "ciphertext",
            ..
        })
    ));
}

/// An empty message seals to a bare tag and opens back to nothing.
pub(crate) fn check_aead_empty_message(cipher: &impl AeadOp) {
    let nonce = vec![0u8; cipher.nonce_size()];
    let sealed = cipher.seal_vec(&nonce, None, &[]).expect("seal");
    assert_eq!(sealed.len(), cipher.tag_size());
    assert!(cipher.open_vec(&nonce, None, &sealed).expect("open").is_empty());

    let (ciphertext, tag) = cipher.seal_detached_vec(&nonce, None, &[]).expect("seal");
    assert!(ciphertext.is_empty());
    assert_eq!(tag, sealed);
}
