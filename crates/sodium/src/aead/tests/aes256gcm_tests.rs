// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

/// Returns `None` on machines without hardware AES-256-GCM.
fn cipher() -> Option<Aes256Gcm> {
    if !aes256gcm_is_available().expect("availability") {
        tracing::warn!("AES-256-GCM unavailable, skipping");
        return None;
    }
    Some(Aes256Gcm::new(AeadKey::generate().expect("keygen")))
}

#[test]
fn test_aes256gcm_properties() {
    let Some(cipher) = cipher() else { return };
    check_aead_properties(&cipher);
}

#[test]
fn test_aes256gcm_size_boundaries() {
    let Some(cipher) = cipher() else { return };
    check_aead_size_boundaries(&cipher);
}

#[test]
fn test_aes256gcm_precomputed_properties() {
    let Some(cipher) = cipher() else { return };
    let precomputed = cipher.precompute().expect("precompute");
    check_aead_properties(&precomputed);
    check_aead_empty_message(&precomputed);
}

#[test]
fn test_aes256gcm_precomputed_matches_plain() {
    let Some(cipher) = cipher() else { return };
    let precomputed = cipher.precompute().expect("precompute");
    let nonce = [9u8; AES256GCM_NPUBBYTES];
    let message = b"same key, same nonce, same output";

    let plain = cipher.seal_vec(&nonce, Some(b"ad"), message).expect("seal");
    let fast = precomputed
        .seal_vec(&nonce, Some(b"ad"), message)
        .expect("seal afternm");
    assert_eq!(plain, fast);
    assert_eq!(
        cipher.open_vec(&nonce, Some(b"ad"), &fast).expect("open"),
        message
    );
}

#[test]
fn test_aes256gcm_precomputed_shared_across_threads() {
    let Some(cipher) = cipher() else { return };
    let precomputed = std::sync::Arc::new(cipher.precompute().expect("precompute"));
    let handles: Vec<_> = (0u8..4)
        .map(|i| {
            let precomputed = precomputed.clone();
            std::thread::spawn(move || {
                let nonce = [i; AES256GCM_NPUBBYTES];
                let sealed = precomputed.seal_vec(&nonce, None, &[i; 64]).expect("seal");
                precomputed.open_vec(&nonce, None, &sealed).expect("open")
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().expect("thread"), vec![i as u8; 64]);
    }
}

#[test]
fn test_aes256gcm_unavailable_reports_unsupported() {
    if aes256gcm_is_available().expect("availability") {
        return;
    }
    let cipher = Aes256Gcm::new(AeadKey::generate().expect("keygen"));
    let nonce = [0u8; AES256GCM_NPUBBYTES];
    assert_eq!(
        cipher.seal_vec(&nonce, None, b"x"),
        Err(SodiumError::Unsupported("AES-256-GCM"))
    );
    assert!(matches!(
        cipher.precompute(),
        Err(SodiumError::Unsupported(_))
    ));
}

#[test]
#[allow(unsafe_code)]
fn test_aes256gcm_constants_match_library() {
    // SAFETY: pure size queries.
    unsafe {
        assert_eq!(AEAD_KEYBYTES, libsodium_sys::crypto_aead_aes256gcm_keybytes());
        assert_eq!(AES256GCM_NPUBBYTES, libsodium_sys::crypto_aead_aes256gcm_npubbytes());
        assert_eq!(AES256GCM_ABYTES, libsodium_sys::crypto_aead_aes256gcm_abytes());
    }
}
