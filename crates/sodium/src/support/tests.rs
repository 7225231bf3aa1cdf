// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_check_size_exact() {
    assert!(check_size(&[0u8; 32], 32, "key").is_ok());

    let err = check_size(&[0u8; 31], 32, "key").unwrap_err();
    assert_eq!(
        err,
        SodiumError::InvalidSize {
            role: "key",
            expected: SizeBound::Exact(32),
            actual: 31,
        }
    );
    assert!(err.is_programmer_error());
    assert_eq!(err.to_string(), "invalid key size: expected 32, got 31");

    assert!(check_size(&[0u8; 33], 32, "key").is_err());
}

#[test]
fn test_check_size_min() {
    assert!(check_size_min(&[0u8; 16], 16, "ciphertext").is_ok());
    assert!(check_size_min(&[0u8; 100], 16, "ciphertext").is_ok());
    assert_eq!(
        check_size_min(&[0u8; 15], 16, "ciphertext"),
        Err(SodiumError::InvalidSize {
            role: "ciphertext",
            expected: SizeBound::AtLeast(16),
            actual: 15,
        })
    );
}

#[test]
fn test_check_zero_padded() {
    let mut buf = [0u8; 40];
    buf[32..].fill(0xaa);
    assert!(check_zero_padded(&buf, 32, 32, "padded message").is_ok());
    assert!(check_zero_padded(&buf[..32], 32, 32, "padded message").is_ok());
    assert_eq!(
        check_zero_padded(&buf[..31], 32, 32, "padded message"),
        Err(SodiumError::InvalidSize {
            role: "padded message",
            expected: SizeBound::AtLeast(32),
            actual: 31,
        })
    );

    buf[15] = 1;
    assert_eq!(
        check_zero_padded(&buf, 32, 16, "padded ciphertext"),
        Err(SodiumError::InvalidPadding("padded ciphertext"))
    );
    buf[15] = 0;
    buf[16] = 1;
    assert!(check_zero_padded(&buf, 32, 16, "padded ciphertext").is_ok());
    assert!(SodiumError::InvalidPadding("padded ciphertext").is_programmer_error());
}

#[test]
fn test_check_len_max() {
    assert!(check_len_max(64, 64, "message").is_ok());
    assert_eq!(
        check_len_max(65, 64, "message"),
        Err(SodiumError::InvalidSize {
            role: "message",
            expected: SizeBound::AtMost(64),
            actual: 65,
        })
    );
}

#[test]
fn test_check_size_in_range() {
    assert!(check_size_in_range(&[0u8; 16], 16, 64, "hash key").is_ok());
    assert!(check_size_in_range(&[0u8; 64], 16, 64, "hash key").is_ok());

    let err = check_size_in_range(&[0u8; 65], 16, 64, "hash key").unwrap_err();
    assert_eq!(err.to_string(), "invalid hash key size: expected 16..=64, got 65");
    assert!(check_len_in_range(15, 16, 64, "hash output").is_err());
}

#[test]
fn test_check_int_max() {
    assert!(check_int_max(u32::MAX as u64, u32::MAX as u64, "initial counter").is_ok());
    let err = check_int_max(1 << 32, u32::MAX as u64, "initial counter").unwrap_err();
    assert!(matches!(err, SodiumError::OutOfRange { value, .. } if value == 1 << 32));
    assert!(err.is_programmer_error());
}

#[test]
fn test_require() {
    let nonce = [0u8; 24];
    assert_eq!(require(Some(&nonce[..]), "nonce"), Ok(&nonce[..]));
    assert_eq!(
        require::<&[u8]>(None, "nonce"),
        Err(SodiumError::MissingInput("nonce"))
    );
}

#[test]
fn test_empty_slices_bridge_to_null() {
    let empty: [u8; 0] = [];
    assert!(ptr(&empty).is_null());
    let mut empty_mut: [u8; 0] = [];
    assert!(ptr_mut(&mut empty_mut).is_null());
    assert_eq!(opt_ptr(None), (std::ptr::null(), 0));

    let data = [1u8, 2, 3];
    assert_eq!(ptr(&data), data.as_ptr());
    assert_eq!(len_u64(&data), 3);
    assert_eq!(opt_ptr(Some(&data)).1, 3);
}

#[test]
fn test_check_rc() {
    assert!(check_rc(0, "crypto_box_easy").is_ok());
    assert_eq!(
        check_rc(-1, "crypto_box_easy"),
        Err(SodiumError::NativeFailure("crypto_box_easy"))
    );
    assert_eq!(check_verify(-1), Err(SodiumError::VerificationFailed));
    assert!(!SodiumError::VerificationFailed.is_programmer_error());
}

#[test]
fn test_with_output_size_query_and_bounds() {
    let called = std::cell::Cell::new(false);
    let size = with_output(None, 48, "output", |_| {
        called.set(true);
        Ok(())
    })
    .expect("size query");
    assert_eq!(size, 48);
    assert!(!called.get());

    let mut small = [0u8; 47];
    let err = with_output(Some(&mut small), 48, "output", |_| Ok(())).unwrap_err();
    assert!(err.is_programmer_error());

    let mut large = [0u8; 64];
    let written = with_output(Some(&mut large), 48, "output", |out| {
        assert_eq!(out.len(), 48);
        out.fill(0xaa);
        Ok(())
    })
    .expect("write");
    assert_eq!(written, 48);
    assert!(large[..48].iter().all(|&b| b == 0xaa));
    assert!(large[48..].iter().all(|&b| b == 0));
}

#[test]
fn test_with_opened_output_wipes_on_failure() {
    let mut output = [0x5au8; 32];
    let err = with_opened_output(Some(&mut output), 16, |out| {
        out.fill(0xff);
        Err(SodiumError::VerificationFailed)
    })
    .unwrap_err();
    assert_eq!(err, SodiumError::VerificationFailed);
    assert_eq!(output[..16], [0u8; 16]);
    assert_eq!(output[16..], [0x5au8; 16]);
}

#[test]
fn test_aligned_buf_alignment() {
    for align in [16usize, 64, 128] {
        let buf = AlignedBuf::zeroed(384, align).expect("alloc");
        assert_eq!(buf.as_ptr() as usize % align, 0);
        assert_eq!(buf.len(), 384);
        assert_eq!(buf.align(), align);
    }
}

#[test]
fn test_aligned_buf_zeroed() {
    let buf = AlignedBuf::zeroed(512, 16).expect("alloc");
    // SAFETY: the block is valid for 512 initialized bytes.
    #[allow(unsafe_code)]
    let bytes = unsafe { std::slice::from_raw_parts(buf.as_ptr(), buf.len()) };
    assert!(bytes.iter().all(|&b| b == 0));
}

#[test]
fn test_aligned_buf_rejects_bad_alignment() {
    assert!(matches!(
        AlignedBuf::zeroed(64, 3),
        Err(SodiumError::AllocationFailed)
    ));
}

#[test]
fn test_native_state_covers_type_layout() {
    #[repr(C, align(64))]
    struct Wide([u8; 200]);

    let state = NativeState::<Wide>::new(100, 16).expect("alloc");
    assert!(state.len() >= std::mem::size_of::<Wide>());
    assert_eq!(state.as_ptr() as usize % 64, 0);
}
