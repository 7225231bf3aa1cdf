// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

/// Anonymous public-key encryption.
///
/// The sender generates an ephemeral keypair per message, so the recipient
/// can decrypt but cannot tell who sent the message.
pub struct SealedBox;

impl SealedBox {
    /// Encrypts `plaintext` for `recipient`.
    ///
    /// The output is [`BOX_SEALBYTES`] longer than the plaintext. Pass `None`
    /// as `ciphertext` to query that size.
    #[allow(unsafe_code)]
    pub fn seal(
        algo: BoxAlgorithm,
        recipient: &BoxPublicKey,
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let len = plaintext.len() + BOX_SEALBYTES;
        support::with_output(ciphertext, len, "ciphertext output", |out| {
            init()?;
            // SAFETY: `out` holds plaintext.len() + SEALBYTES bytes and the
            // public key is a 32-byte array.
            let rc = unsafe {
                (algo.fns().seal)(
                    out.as_mut_ptr(),
                    support::ptr(plaintext),
                    support::len_u64(plaintext),
                    recipient.as_array().as_ptr(),
                )
            };
            support::check_rc(rc, "crypto_box_seal")
        })
    }

    /// Decrypts a sealed box addressed to the keypair `public`/`secret`.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::VerificationFailed`] when the ciphertext was not
    /// sealed for this keypair or was modified.
    #[allow(unsafe_code)]
    pub fn open(
        algo: BoxAlgorithm,
        public: &BoxPublicKey,
        secret: &BoxSecretKey,
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size_min(ciphertext, BOX_SEALBYTES, "ciphertext")?;
        let fns = algo.fns();
        let len = ciphertext.len() - BOX_SEALBYTES;
        support::with_opened_output(plaintext, len, |out| {
            init()?;
            // SAFETY: `out` holds ciphertext.len() - SEALBYTES bytes and both
            // keys are 32-byte arrays.
            let rc = unsafe {
                (fns.seal_open)(
                    support::ptr_mut(out),
                    ciphertext.as_ptr(),
                    support::len_u64(ciphertext),
                    public.as_array().as_ptr(),
                    secret.as_array().as_ptr(),
                )
            };
            support::check_verify(rc)
        })
    }

    /// [`Self::seal`] returning an owned buffer.
    pub fn seal_vec(
        algo: BoxAlgorithm,
        recipient: &BoxPublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let mut ciphertext = vec![0u8; plaintext.len() + BOX_SEALBYTES];
        let len = Self::seal(algo, recipient, plaintext, Some(&mut ciphertext))?;
        ciphertext.truncate(len);
        Ok(ciphertext)
    }

    /// [`Self::open`] with the halves of `recipient`, returning an owned
    /// buffer.
    pub fn open_vec(recipient: &BoxKeyPair, ciphertext: &[u8]) -> Result<Vec<u8>, SodiumError> {
        let (algo, public, secret) = (
            recipient.algorithm(),
            recipient.public_key(),
            recipient.secret_key(),
        );
        let len = Self::open(algo, public, secret, ciphertext, None)?;
        let mut plaintext = vec![0u8; len];
        Self::open(algo, public, secret, ciphertext, Some(&mut plaintext))?;
        Ok(plaintext)
    }
}
