// Copyright (C) Microsoft Corporation. All rights reserved.

use libsodium_sys::crypto_generichash_blake2b_state;

use super::*;

/// libsodium declares the BLAKE2b state with 64-byte alignment.
const BLAKE2B_STATE_ALIGN: usize = 64;

/// Streaming BLAKE2b computation.
pub struct Blake2bContext {
    algo: Blake2b,
    state: NativeState<crypto_generichash_blake2b_state>,
}

impl Blake2bContext {
    #[allow(unsafe_code)]
    pub(super) fn new(algo: Blake2b) -> Result<Self, SodiumError> {
        init()?;
        // SAFETY: pure size query.
        let state_size = unsafe { libsodium_sys::crypto_generichash_blake2b_statebytes() };
        let mut state = NativeState::<crypto_generichash_blake2b_state>::new(
            state_size,
            BLAKE2B_STATE_ALIGN,
        )?;
        let (key, key_len) = algo.key_parts();
        // SAFETY: the state has the size and alignment libsodium requires,
        // the key pointer is null or valid for key_len bytes, salt and
        // personal are null or 16 bytes, and out_len was validated.
        let rc = unsafe {
            libsodium_sys::crypto_generichash_blake2b_init_salt_personal(
                state.as_mut_ptr(),
                key,
                key_len,
                algo.out_len,
                algo.salt_ptr(),
                algo.personal_ptr(),
            )
        };
        support::check_rc(rc, "crypto_generichash_blake2b_init")?;
        Ok(Self { algo, state })
    }
}

impl HashOpContext for Blake2bContext {
    type Algo = Blake2b;

    #[allow(unsafe_code)]
    fn update(&mut self, data: &[u8]) -> Result<(), SodiumError> {
        // SAFETY: the state was initialized by `new`; data pointer and length
        // describe `data`.
        let rc = unsafe {
            libsodium_sys::crypto_generichash_blake2b_update(
                self.state.as_mut_ptr(),
                support::ptr(data),
                support::len_u64(data),
            )
        };
        support::check_rc(rc, "crypto_generichash_blake2b_update")
    }

    #[allow(unsafe_code)]
    fn finish(mut self, output: &mut [u8]) -> Result<usize, SodiumError> {
        let out_len = self.algo.out_len;
        support::check_len_min(output.len(), out_len, "digest output")?;
        // SAFETY: the state was initialized by `new` and `output` holds at
        // least out_len bytes.
        let rc = unsafe {
            libsodium_sys::crypto_generichash_blake2b_final(
                self.state.as_mut_ptr(),
                output.as_mut_ptr(),
                out_len,
            )
        };
        support::check_rc(rc, "crypto_generichash_blake2b_final")?;
        Ok(out_len)
    }

    fn output_size(&self) -> usize {
        self.algo.out_len
    }

    fn block_size(&self) -> usize {
        BLAKE2B_BLOCK_SIZE
    }

    fn algo(&self) -> &Self::Algo {
        &self.algo
    }
}

impl_write_for_context!(Blake2bContext);
