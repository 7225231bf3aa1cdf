// Copyright (C) Microsoft Corporation. All rights reserved.

use libsodium_sys::crypto_sign_state;

use super::*;

#[allow(unsafe_code)]
fn new_state() -> Result<NativeState<crypto_sign_state>, SodiumError> {
    init()?;
    // SAFETY: pure size query.
    let state_size = unsafe { libsodium_sys::crypto_sign_statebytes() };
    let mut state = NativeState::<crypto_sign_state>::new(state_size, 1)?;
    // SAFETY: the state is large enough and aligned for `crypto_sign_state`.
    let rc = unsafe { libsodium_sys::crypto_sign_init(state.as_mut_ptr()) };
    support::check_rc(rc, "crypto_sign_init")?;
    Ok(state)
}

#[allow(unsafe_code)]
fn update_state(state: &mut NativeState<crypto_sign_state>, data: &[u8]) -> Result<(), SodiumError> {
    // SAFETY: the state was initialized by `new_state`; data pointer and
    // length describe `data`.
    let rc = unsafe {
        libsodium_sys::crypto_sign_update(
            state.as_mut_ptr(),
            support::ptr(data),
            support::len_u64(data),
        )
    };
    support::check_rc(rc, "crypto_sign_update")
}

/// Ed25519ph: Ed25519 over the SHA-512 digest of a streamed message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ed25519phAlgo;

impl SignStreamingOp for Ed25519phAlgo {
    type Key = SigningKey;
    type Context = Ed25519phSignContext;

    fn sign_init(self, key: SigningKey) -> Result<Ed25519phSignContext, SodiumError> {
        Ok(Ed25519phSignContext {
            key,
            state: new_state()?,
        })
    }
}

impl VerifyStreamingOp for Ed25519phAlgo {
    type Key = VerifyingKey;
    type Context = Ed25519phVerifyContext;

    fn verify_init(self, key: VerifyingKey) -> Result<Ed25519phVerifyContext, SodiumError> {
        Ok(Ed25519phVerifyContext {
            key,
            state: new_state()?,
        })
    }
}

/// In-progress Ed25519ph signature.
pub struct Ed25519phSignContext {
    key: SigningKey,
    state: NativeState<crypto_sign_state>,
}

impl SignStreamingOpContext for Ed25519phSignContext {
    type Algo = Ed25519phAlgo;

    fn update(&mut self, data: &[u8]) -> Result<(), SodiumError> {
        update_state(&mut self.state, data)
    }

    fn signature_size(&self) -> usize {
        SIGN_BYTES
    }

    #[allow(unsafe_code)]
    fn finish(mut self, signature: &mut [u8]) -> Result<usize, SodiumError> {
        support::check_len_min(signature.len(), SIGN_BYTES, "signature output")?;
        // SAFETY: the state was initialized, the output holds SIGN_BYTES and
        // the key is a 64-byte array. The length output is optional.
        let rc = unsafe {
            libsodium_sys::crypto_sign_final_create(
                self.state.as_mut_ptr(),
                signature.as_mut_ptr(),
                ptr::null_mut(),
                self.key.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_final_create")?;
        Ok(SIGN_BYTES)
    }
}

impl std::io::Write for Ed25519phSignContext {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf).map_err(std::io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// In-progress Ed25519ph verification.
pub struct Ed25519phVerifyContext {
    key: VerifyingKey,
    state: NativeState<crypto_sign_state>,
}

impl VerifyStreamingOpContext for Ed25519phVerifyContext {
    type Algo = Ed25519phAlgo;

    fn update(&mut self, data: &[u8]) -> Result<(), SodiumError> {
        update_state(&mut self.state, data)
    }

    #[allow(unsafe_code)]
    fn finish(mut self, signature: &[u8]) -> Result<(), SodiumError> {
        support::check_size(signature, SIGN_BYTES, "signature")?;
        // SAFETY: the state was initialized, the signature was validated and
        // the key is a 32-byte array.
        let rc = unsafe {
            libsodium_sys::crypto_sign_final_verify(
                self.state.as_mut_ptr(),
                signature.as_ptr(),
                self.key.as_array().as_ptr(),
            )
        };
        support::check_verify(rc)
    }
}

impl std::io::Write for Ed25519phVerifyContext {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf).map_err(std::io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
