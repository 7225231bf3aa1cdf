// Copyright (C) Microsoft Corporation. All rights reserved.

//! Secret-key authenticated encryption (XSalsa20-Poly1305).
//!
//! [`KeyedBoxFns`] is also the marshalling path of the precomputed
//! public-key box, whose "afternm" functions share the secretbox signatures.

use std::ffi::c_int;

use super::*;

/// Key size of `crypto_secretbox`.
pub const SECRETBOX_KEYBYTES: usize = 32;
/// Nonce size of `crypto_secretbox`.
pub const SECRETBOX_NONCEBYTES: usize = 24;
/// Tag size of `crypto_secretbox`.
pub const SECRETBOX_MACBYTES: usize = 16;
/// Leading zero bytes of a NaCl-style padded plaintext.
pub const SECRETBOX_ZEROBYTES: usize = 32;
/// Leading zero bytes of a NaCl-style padded ciphertext.
pub const SECRETBOX_BOXZEROBYTES: usize = 16;

define_secret_key!(
    /// XSalsa20-Poly1305 secret key.
    pub SecretBoxKey,
    SECRETBOX_KEYBYTES,
    keygen: libsodium_sys::crypto_secretbox_keygen,
    as_array
);

type KeyedSealFn =
    unsafe extern "C" fn(c: *mut u8, m: *const u8, mlen: u64, n: *const u8, k: *const u8) -> c_int;
type KeyedOpenFn =
    unsafe extern "C" fn(m: *mut u8, c: *const u8, clen: u64, n: *const u8, k: *const u8) -> c_int;
type KeyedSealDetachedFn = unsafe extern "C" fn(
    c: *mut u8,
    mac: *mut u8,
    m: *const u8,
    mlen: u64,
    n: *const u8,
    k: *const u8,
) -> c_int;
type KeyedOpenDetachedFn = unsafe extern "C" fn(
    m: *mut u8,
    c: *const u8,
    mac: *const u8,
    clen: u64,
    n: *const u8,
    k: *const u8,
) -> c_int;

/// NaCl zero-padded entry points. Input and output have equal lengths.
#[derive(Clone, Copy)]
pub(crate) struct KeyedPaddedFns {
    pub(crate) seal: KeyedSealFn,
    pub(crate) open: KeyedOpenFn,
}

/// libsodium entry points of a symmetric box construction keyed with 32 bytes.
pub(crate) struct KeyedBoxFns {
    pub(crate) name: &'static str,
    pub(crate) nonce_size: usize,
    pub(crate) mac_size: usize,
    pub(crate) easy: KeyedSealFn,
    pub(crate) open_easy: KeyedOpenFn,
    pub(crate) detached: KeyedSealDetachedFn,
    pub(crate) open_detached: KeyedOpenDetachedFn,
    pub(crate) padded: Option<KeyedPaddedFns>,
}

impl KeyedBoxFns {
    #[allow(unsafe_code)]
    pub(crate) fn seal(
        &self,
        key: &[u8; 32],
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        let len = plaintext.len() + self.mac_size;
        support::with_output(ciphertext, len, "ciphertext output", |out| {
            init()?;
            // SAFETY: `out` holds mac_size + plaintext.len() bytes, nonce was
            // validated and the key is a 32-byte array.
            let rc = unsafe {
                (self.easy)(
                    out.as_mut_ptr(),
                    support::ptr(plaintext),
                    support::len_u64(plaintext),
                    nonce.as_ptr(),
                    key.as_ptr(),
                )
            };
            support::check_rc(rc, self.name)
        })
    }

    #[allow(unsafe_code)]
    pub(crate) fn open(
        &self,
        key: &[u8; 32],
        nonce: &[u8],
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_size_min(ciphertext, self.mac_size, "ciphertext")?;
        let len = ciphertext.len() - self.mac_size;
        support::with_opened_output(plaintext, len, |out| {
            init()?;
            // SAFETY: `out` holds ciphertext.len() - mac_size bytes, nonce was
            // validated and the key is a 32-byte array.
            let rc = unsafe {
                (self.open_easy)(
                    support::ptr_mut(out),
                    ciphertext.as_ptr(),
                    support::len_u64(ciphertext),
                    nonce.as_ptr(),
                    key.as_ptr(),
                )
            };
            support::check_verify(rc)
        })
    }

    #[allow(unsafe_code)]
    pub(crate) fn seal_detached(
        &self,
        key: &[u8; 32],
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        mac: &mut [u8],
    ) -> Result<(), SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_size(mac, self.mac_size, "mac")?;
        support::check_size(ciphertext, plaintext.len(), "ciphertext output")?;
        init()?;
        // SAFETY: ciphertext and plaintext have equal lengths, mac holds
        // mac_size bytes, nonce was validated and the key is a 32-byte array.
        let rc = unsafe {
            (self.detached)(
                support::ptr_mut(ciphertext),
                mac.as_mut_ptr(),
                support::ptr(plaintext),
                support::len_u64(plaintext),
                nonce.as_ptr(),
                key.as_ptr(),
            )
        };
        support::check_rc(rc, self.name)
    }

    #[allow(unsafe_code)]
    pub(crate) fn open_detached(
        &self,
        key: &[u8; 32],
        nonce: &[u8],
        ciphertext: &[u8],
        mac: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError> {
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_size(mac, self.mac_size, "mac")?;
        support::check_size(plaintext, ciphertext.len(), "plaintext output")?;
        support::with_opened_output(Some(plaintext), ciphertext.len(), |out| {
            init()?;
            // SAFETY: `out` and ciphertext have equal lengths, mac holds
            // mac_size bytes, nonce was validated and the key is a 32-byte array.
            let rc = unsafe {
                (self.open_detached)(
                    support::ptr_mut(out),
                    support::ptr(ciphertext),
                    mac.as_ptr(),
                    support::len_u64(ciphertext),
                    nonce.as_ptr(),
                    key.as_ptr(),
                )
            };
            support::check_verify(rc)
        })
        .map(|_| ())
    }

    #[allow(unsafe_code)]
    pub(crate) fn seal_padded(
        &self,
        key: &[u8; 32],
        nonce: &[u8],
        padded_plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let padded = self.padded.ok_or(SodiumError::Unsupported(self.name))?;
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_zero_padded(
            padded_plaintext,
            ZEROBYTES,
            ZEROBYTES,
            "padded plaintext",
        )?;
        let len = padded_plaintext.len();
        support::with_output(ciphertext, len, "ciphertext output", |out| {
            init()?;
            // SAFETY: `out` and the padded plaintext have equal lengths of at
            // least ZEROBYTES, nonce was validated and the key is a 32-byte array.
            let rc = unsafe {
                (padded.seal)(
                    out.as_mut_ptr(),
                    padded_plaintext.as_ptr(),
                    support::len_u64(padded_plaintext),
                    nonce.as_ptr(),
                    key.as_ptr(),
                )
            };
            support::check_rc(rc, self.name)
        })
    }

    #[allow(unsafe_code)]
    pub(crate) fn open_padded(
        &self,
        key: &[u8; 32],
        nonce: &[u8],
        padded_ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let padded = self.padded.ok_or(SodiumError::Unsupported(self.name))?;
        support::check_size(nonce, self.nonce_size, "nonce")?;
        support::check_zero_padded(
            padded_ciphertext,
            ZEROBYTES,
            BOXZEROBYTES,
            "padded ciphertext",
        )?;
        let len = padded_ciphertext.len();
        support::with_opened_output(plaintext, len, |out| {
            init()?;
            // SAFETY: `out` and the padded ciphertext have equal lengths of at
            // least ZEROBYTES, nonce was validated and the key is a 32-byte array.
            let rc = unsafe {
                (padded.open)(
                    out.as_mut_ptr(),
                    padded_ciphertext.as_ptr(),
                    support::len_u64(padded_ciphertext),
                    nonce.as_ptr(),
                    key.as_ptr(),
                )
            };
            support::check_verify(rc)
        })
    }
}

/// Both the secretbox and the XSalsa20 box use NaCl's 32/16 padding.
const ZEROBYTES: usize = SECRETBOX_ZEROBYTES;
const BOXZEROBYTES: usize = SECRETBOX_BOXZEROBYTES;

static FNS: KeyedBoxFns = KeyedBoxFns {
    name: "crypto_secretbox",
    nonce_size: SECRETBOX_NONCEBYTES,
    mac_size: SECRETBOX_MACBYTES,
    easy: libsodium_sys::crypto_secretbox_easy,
    open_easy: libsodium_sys::crypto_secretbox_open_easy,
    detached: libsodium_sys::crypto_secretbox_detached,
    open_detached: libsodium_sys::crypto_secretbox_open_detached,
    padded: Some(KeyedPaddedFns {
        seal: libsodium_sys::crypto_secretbox,
        open: libsodium_sys::crypto_secretbox_open,
    }),
};

/// XSalsa20-Poly1305 authenticated encryption under a shared secret key.
pub struct SecretBox {
    key: SecretBoxKey,
}

impl SecretBox {
    /// Creates a box bound to `key`.
    pub fn new(key: SecretBoxKey) -> Self {
        Self { key }
    }

    /// Returns the name of libsodium's default secretbox construction.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_secretbox_primitive() })
    }

    /// Seals a NaCl-style padded plaintext.
    ///
    /// `padded_plaintext` starts with [`SECRETBOX_ZEROBYTES`] zero bytes. The
    /// ciphertext has the same length and starts with
    /// [`SECRETBOX_BOXZEROBYTES`] zero bytes followed by the tag. Pass `None`
    /// to query the output size.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] for a short input or a bad nonce
    /// - [`SodiumError::InvalidPadding`] if the leading bytes are not zero
    pub fn seal_padded(
        &self,
        nonce: &[u8],
        padded_plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        FNS.seal_padded(self.key.as_array(), nonce, padded_plaintext, ciphertext)
    }

    /// Opens a ciphertext produced by [`seal_padded`](Self::seal_padded).
    ///
    /// The output has the same length as the input and starts with
    /// [`SECRETBOX_ZEROBYTES`] zero bytes. It is wiped on failure.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::InvalidSize`] for a short input or a bad nonce
    /// - [`SodiumError::InvalidPadding`] if the leading
    ///   [`SECRETBOX_BOXZEROBYTES`] bytes are not zero
    /// - [`SodiumError::VerificationFailed`] if the tag does not verify
    pub fn open_padded(
        &self,
        nonce: &[u8],
        padded_ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        FNS.open_padded(self.key.as_array(), nonce, padded_ciphertext, plaintext)
    }
}

impl BoxOp for SecretBox {
    fn nonce_size(&self) -> usize {
        SECRETBOX_NONCEBYTES
    }

    fn mac_size(&self) -> usize {
        SECRETBOX_MACBYTES
    }

    fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        FNS.seal(self.key.as_array(), nonce, plaintext, ciphertext)
    }

    fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        FNS.open(self.key.as_array(), nonce, ciphertext, plaintext)
    }

    fn seal_detached(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        mac: &mut [u8],
    ) -> Result<(), SodiumError> {
        FNS.seal_detached(self.key.as_array(), nonce, plaintext, ciphertext, mac)
    }

    fn open_detached(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        mac: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError> {
        FNS.open_detached(self.key.as_array(), nonce, ciphertext, mac, plaintext)
    }
}

#[cfg(test)]
mod tests;
