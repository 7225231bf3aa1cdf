// Copyright (C) Microsoft Corporation. All rights reserved.

//! Property checks shared by every [`BoxOp`] implementation.

use super::*;

/// Round trip, detached/combined equivalence, tamper rejection and size
/// enforcement for a box-style cipher.
pub(crate) fn check_box_op(cipher: &impl BoxOp) {
    let nonce = vec![0x5cu8; cipher.nonce_size()];
    let message = b"the quick brown fox";

    let sealed = cipher.seal_vec(&nonce, message).expect("seal");
    assert_eq!(sealed.len(), message.len() + cipher.mac_size());
    assert_eq!(cipher.open_vec(&nonce, &sealed).expect("open"), message);

    // libsodium's combined layout puts the tag first.
    let (ciphertext, mac) = cipher.seal_detached_vec(&nonce, message).expect("detached");
    assert_eq!([mac.clone(), ciphertext.clone()].concat(), sealed);
    assert_eq!(
        cipher
            .open_detached_vec(&nonce, &ciphertext, &mac)
            .expect("open detached"),
        message
    );

    for i in [0, cipher.mac_size() - 1, cipher.mac_size(), sealed.len() - 1] {
        let mut tampered = sealed.clone();
        tampered[i] ^= 0x01;
        assert_eq!(
            cipher.open_vec(&nonce, &tampered),
            Err(SodiumError::VerificationFailed)
        );
    }

    let mut other_nonce = nonce.clone();
    other_nonce[cipher.nonce_size() - 1] ^= 0x01;
    assert_eq!(
        cipher.open_vec(&other_nonce, &sealed),
        Err(SodiumError::VerificationFailed)
    );

    let mut plaintext = vec![0x77u8; ciphertext.len()];
    let mut bad_mac = mac.clone();
    bad_mac[3] ^= 0x10;
    assert_eq!(
        cipher.open_detached(&nonce, &ciphertext, &bad_mac, &mut plaintext),
        Err(SodiumError::VerificationFailed)
    );
    assert!(plaintext.iter().all(|&b| b == 0));

    for len in [cipher.nonce_size() - 1, cipher.nonce_size() + 1] {
        let err = cipher.seal_vec(&vec![0u8; len], message).unwrap_err();
        assert!(matches!(err, SodiumError::InvalidSize { role: "nonce", .. }));
    }
    for len in [cipher.mac_size() - 1, cipher.mac_size() + 1] {
        let mut out = vec![0u8; message.len()];
        let err = cipher
            .open_detached(&nonce, &ciphertext, &vec![0u8; len], &mut out)
            .unwrap_err();
        assert!(matches!(err, SodiumError::InvalidSize { role: "mac", .. }));
    }
    assert!(cipher
        .open_vec(&nonce, &sealed[..cipher.mac_size() - 1])
        .unwrap_err()
        .is_programmer_error());

    let empty = cipher.seal_vec(&nonce, &[]).expect("seal empty");
    assert_eq!(empty.len(), cipher.mac_size());
    assert!(cipher.open_vec(&nonce, &empty).expect("open empty").is_empty());
}
