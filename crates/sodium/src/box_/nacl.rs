// Copyright (C) Microsoft Corporation. All rights reserved.

//! NaCl zero-padded box layout.
//!
//! A padded plaintext starts with [`BOX_ZEROBYTES`] zero bytes. The matching
//! ciphertext has the same length: [`BOX_BOXZEROBYTES`] zero bytes, the tag,
//! then the encrypted message. Only Curve25519-XSalsa20-Poly1305 has this form.

use super::*;

impl CryptoBox {
    /// Seals a padded plaintext for the peer.
    ///
    /// Pass `None` as `ciphertext` to query the output size, which equals
    /// the input size.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::Unsupported`] for Curve25519-XChaCha20-Poly1305
    /// - [`SodiumError::InvalidSize`] for a short input, a bad nonce or a
    ///   short output buffer
    /// - [`SodiumError::InvalidPadding`] if the first [`BOX_ZEROBYTES`]
    ///   bytes are not zero
    #[allow(unsafe_code)]
    pub fn seal_padded(
        &self,
        nonce: &[u8],
        padded_plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let padded = self.padded_fns()?;
        support::check_size(nonce, BOX_NONCEBYTES, "nonce")?;
        support::check_zero_padded(
            padded_plaintext,
            BOX_ZEROBYTES,
            BOX_ZEROBYTES,
            "padded plaintext",
        )?;
        let len = padded_plaintext.len();
        support::with_output(ciphertext, len, "ciphertext output", |out| {
            init()?;
            // SAFETY: `out` and the padded plaintext have equal lengths of at
            // least ZEROBYTES, nonce was validated and both keys are 32-byte arrays.
            let rc = unsafe {
                (padded.seal)(
                    out.as_mut_ptr(),
                    padded_plaintext.as_ptr(),
                    support::len_u64(padded_plaintext),
                    nonce.as_ptr(),
                    self.peer_public.as_array().as_ptr(),
                    self.own_secret.as_array().as_ptr(),
                )
            };
            support::check_rc(rc, "crypto_box")
        })
    }

    /// Opens a padded ciphertext from the peer.
    ///
    /// The output has the same length as the input, starts with
    /// [`BOX_ZEROBYTES`] zero bytes and is wiped on failure.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::Unsupported`] for Curve25519-XChaCha20-Poly1305
    /// - [`SodiumError::InvalidSize`] for a short input, a bad nonce or a
    ///   short output buffer
    /// - [`SodiumError::InvalidPadding`] if the first [`BOX_BOXZEROBYTES`]
    ///   bytes are not zero
    /// - [`SodiumError::VerificationFailed`] if the tag does not verify
    #[allow(unsafe_code)]
    pub fn open_padded(
        &self,
        nonce: &[u8],
        padded_ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let padded = self.padded_fns()?;
        support::check_size(nonce, BOX_NONCEBYTES, "nonce")?;
        support::check_zero_padded(
            padded_ciphertext,
            BOX_ZEROBYTES,
            BOX_BOXZEROBYTES,
            "padded ciphertext",
        )?;
        let len = padded_ciphertext.len();
        support::with_opened_output(plaintext, len, |out| {
            init()?;
            // SAFETY: `out` and the padded ciphertext have equal lengths of at
            // least ZEROBYTES, nonce was validated and both keys are 32-byte arrays.
            let rc = unsafe {
                (padded.open)(
                    out.as_mut_ptr(),
                    padded_ciphertext.as_ptr(),
                    support::len_u64(padded_ciphertext),
                    nonce.as_ptr(),
                    self.peer_public.as_array().as_ptr(),
                    self.own_secret.as_array().as_ptr(),
                )
            };
            support::check_verify(rc)
        })
    }

    fn padded_fns(&self) -> Result<PaddedBoxFns, SodiumError> {
        let fns = self.algo.fns();
        fns.padded.ok_or(SodiumError::Unsupported(fns.name))
    }
}

impl PrecomputedBox {
    /// Seals a padded plaintext with the shared key.
    ///
    /// Produces the same bytes as [`CryptoBox::seal_padded`] on the box the
    /// shared key was computed from.
    ///
    /// # Errors
    ///
    /// Same as [`CryptoBox::seal_padded`].
    pub fn seal_padded(
        &self,
        nonce: &[u8],
        padded_plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        self.fns()
            .seal_padded(self.shared.as_array(), nonce, padded_plaintext, ciphertext)
    }

    /// Opens a padded ciphertext with the shared key.
    ///
    /// # Errors
    ///
    /// Same as [`CryptoBox::open_padded`].
    pub fn open_padded(
        &self,
        nonce: &[u8],
        padded_ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        self.fns()
            .open_padded(self.shared.as_array(), nonce, padded_ciphertext, plaintext)
    }
}
