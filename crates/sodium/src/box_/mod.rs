// Copyright (C) Microsoft Corporation. All rights reserved.

//! Public-key authenticated encryption.
//!
//! # Calling forms
//!
//! - [`CryptoBox`]: sender secret key + recipient public key, combined or detached
//! - [`PrecomputedBox`]: the same, after deriving the shared key once with
//!   [`CryptoBox::precompute`]; output is identical to the keypair form
//! - [`SealedBox`]: anonymous encryption to a public key with an ephemeral
//!   sender key
//! - `seal_padded`/`open_padded` on [`CryptoBox`] and [`PrecomputedBox`]:
//!   NaCl's original zero-padded layout, XSalsa20-Poly1305 only
//!
//! # Supported Algorithms
//!
//! - **Curve25519-XSalsa20-Poly1305**: libsodium's default `crypto_box`
//! - **Curve25519-XChaCha20-Poly1305**: same key agreement, XChaCha20 cipher

mod keys;
mod nacl;
mod sealed;

use std::ffi::c_int;

pub use keys::*;
pub use sealed::*;

use super::*;

/// Public key size.
pub const BOX_PUBLICKEYBYTES: usize = 32;
/// Secret key size.
pub const BOX_SECRETKEYBYTES: usize = 32;
/// Seed size for deterministic keypair generation.
pub const BOX_SEEDBYTES: usize = 32;
/// Nonce size.
pub const BOX_NONCEBYTES: usize = 24;
/// Tag size.
pub const BOX_MACBYTES: usize = 16;
/// Precomputed shared key size.
pub const BOX_BEFORENMBYTES: usize = 32;
/// Overhead of a sealed box (ephemeral public key + tag).
pub const BOX_SEALBYTES: usize = BOX_PUBLICKEYBYTES + BOX_MACBYTES;
/// Leading zero bytes of a NaCl-style padded plaintext.
pub const BOX_ZEROBYTES: usize = 32;
/// Leading zero bytes of a NaCl-style padded ciphertext.
pub const BOX_BOXZEROBYTES: usize = 16;

/// Public-key box construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoxAlgorithm {
    /// X25519 key agreement, XSalsa20-Poly1305 encryption.
    #[default]
    Curve25519XSalsa20Poly1305,
    /// X25519 key agreement, XChaCha20-Poly1305 encryption.
    Curve25519XChaCha20Poly1305,
}

impl BoxAlgorithm {
    /// libsodium's name for the construction.
    pub fn name(&self) -> &'static str {
        self.fns().name
    }

    pub(crate) fn fns(&self) -> &'static BoxFns {
        match self {
            Self::Curve25519XSalsa20Poly1305 => &XSALSA20POLY1305,
            Self::Curve25519XChaCha20Poly1305 => &XCHACHA20POLY1305,
        }
    }

    /// Returns the name of libsodium's default box construction.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_box_primitive() })
    }
}

type KeypairFn = unsafe extern "C" fn(pk: *mut u8, sk: *mut u8) -> c_int;
type SeedKeypairFn = unsafe extern "C" fn(pk: *mut u8, sk: *mut u8, seed: *const u8) -> c_int;
type BeforenmFn = unsafe extern "C" fn(k: *mut u8, pk: *const u8, sk: *const u8) -> c_int;
type EasyFn = unsafe extern "C" fn(
    c: *mut u8,
    m: *const u8,
    mlen: u64,
    n: *const u8,
    pk: *const u8,
    sk: *const u8,
) -> c_int;
type OpenEasyFn = unsafe extern "C" fn(
    m: *mut u8,
    c: *const u8,
    clen: u64,
    n: *const u8,
    pk: *const u8,
    sk: *const u8,
) -> c_int;
type DetachedFn = unsafe extern "C" fn(
    c: *mut u8,
    mac: *mut u8,
    m: *const u8,
    mlen: u64,
    n: *const u8,
    pk: *const u8,
    sk: *const u8,
) -> c_int;
type OpenDetachedFn = unsafe extern "C" fn(
    m: *mut u8,
    c: *const u8,
    mac: *const u8,
    clen: u64,
    n: *const u8,
    pk: *const u8,
    sk: *const u8,
) -> c_int;
type SealFn = unsafe extern "C" fn(c: *mut u8, m: *const u8, mlen: u64, pk: *const u8) -> c_int;
type SealOpenFn = unsafe extern "C" fn(
    m: *mut u8,
    c: *const u8,
    clen: u64,
    pk: *const u8,
    sk: *const u8,
) -> c_int;

/// libsodium entry points of one public-key box construction.
pub(crate) struct BoxFns {
    pub(crate) name: &'static str,
    pub(crate) keypair: KeypairFn,
    pub(crate) seed_keypair: SeedKeypairFn,
    pub(crate) beforenm: BeforenmFn,
    pub(crate) easy: EasyFn,
    pub(crate) open_easy: OpenEasyFn,
    pub(crate) detached: DetachedFn,
    pub(crate) open_detached: OpenDetachedFn,
    pub(crate) seal: SealFn,
    pub(crate) seal_open: SealOpenFn,
    pub(crate) padded: Option<PaddedBoxFns>,
    pub(crate) afternm: KeyedBoxFns,
}

/// NaCl zero-padded `crypto_box` entry points.
#[derive(Clone, Copy)]
pub(crate) struct PaddedBoxFns {
    pub(crate) seal: EasyFn,
    pub(crate) open: OpenEasyFn,
}

static XSALSA20POLY1305: BoxFns = BoxFns {
    name: "curve25519xsalsa20poly1305",
    keypair: libsodium_sys::crypto_box_keypair,
    seed_keypair: libsodium_sys::crypto_box_seed_keypair,
    beforenm: libsodium_sys::crypto_box_beforenm,
    easy: libsodium_sys::crypto_box_easy,
    open_easy: libsodium_sys::crypto_box_open_easy,
    detached: libsodium_sys::crypto_box_detached,
    open_detached: libsodium_sys::crypto_box_open_detached,
    seal: libsodium_sys::crypto_box_seal,
    seal_open: libsodium_sys::crypto_box_seal_open,
    padded: Some(PaddedBoxFns {
        seal: libsodium_sys::crypto_box,
        open: libsodium_sys::crypto_box_open,
    }),
    afternm: KeyedBoxFns {
        name: "crypto_box_afternm",
        nonce_size: BOX_NONCEBYTES,
        mac_size: BOX_MACBYTES,
        easy: libsodium_sys::crypto_box_easy_afternm,
        open_easy: libsodium_sys::crypto_box_open_easy_afternm,
        detached: libsodium_sys::crypto_box_detached_afternm,
        open_detached: libsodium_sys::crypto_box_open_detached_afternm,
        padded: Some(KeyedPaddedFns {
            seal: libsodium_sys::crypto_box_afternm,
            open: libsodium_sys::crypto_box_open_afternm,
        }),
    },
};

static XCHACHA20POLY1305: BoxFns = BoxFns {
    name: "curve25519xchacha20poly1305",
    keypair: libsodium_sys::crypto_box_curve25519xchacha20poly1305_keypair,
    seed_keypair: libsodium_sys::crypto_box_curve25519xchacha20poly1305_seed_keypair,
    beforenm: libsodium_sys::crypto_box_curve25519xchacha20poly1305_beforenm,
    easy: libsodium_sys::crypto_box_curve25519xchacha20poly1305_easy,
    open_easy: libsodium_sys::crypto_box_curve25519xchacha20poly1305_open_easy,
    detached: libsodium_sys::crypto_box_curve25519xchacha20poly1305_detached,
    open_detached: libsodium_sys::crypto_box_curve25519xchacha20poly1305_open_detached,
    seal: libsodium_sys::crypto_box_curve25519xchacha20poly1305_seal,
    seal_open: libsodium_sys::crypto_box_curve25519xchacha20poly1305_seal_open,
    padded: None,
    afternm: KeyedBoxFns {
        name: "crypto_box_curve25519xchacha20poly1305_afternm",
        nonce_size: BOX_NONCEBYTES,
        mac_size: BOX_MACBYTES,
        easy: libsodium_sys::crypto_box_curve25519xchacha20poly1305_easy_afternm,
        open_easy: libsodium_sys::crypto_box_curve25519xchacha20poly1305_open_easy_afternm,
        detached: libsodium_sys::crypto_box_curve25519xchacha20poly1305_detached_afternm,
        open_detached: libsodium_sys::crypto_box_curve25519xchacha20poly1305_open_detached_afternm,
        padded: None,
    },
};

/// Authenticated encryption between a local secret key and a peer's public
/// key.
///
/// The same value both seals messages for the peer and opens messages from
/// the peer.
pub struct CryptoBox {
    algo: BoxAlgorithm,
    peer_public: BoxPublicKey,
    own_secret: BoxSecretKey,
}

impl CryptoBox {
    /// Creates a box between `own_secret` and `peer_public`.
    pub fn new(algo: BoxAlgorithm, peer_public: &BoxPublicKey, own_secret: &BoxSecretKey) -> Self {
        Self {
            algo,
            peer_public: *peer_public,
            own_secret: own_secret.clone(),
        }
    }

    /// Construction used by this box.
    pub fn algorithm(&self) -> BoxAlgorithm {
        self.algo
    }

    /// Performs the key agreement once and returns a box keyed with the
    /// resulting shared key.
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::NativeFailure`] when the peer key is a
    /// low-order point and the shared secret would be all zeros.
    #[allow(unsafe_code)]
    pub fn precompute(&self) -> Result<PrecomputedBox, SodiumError> {
        init()?;
        let mut shared = BoxSharedKey::zeroed();
        // SAFETY: all three buffers are 32-byte arrays.
        let rc = unsafe {
            (self.algo.fns().beforenm)(
                shared.as_mut_array().as_mut_ptr(),
                self.peer_public.as_array().as_ptr(),
                self.own_secret.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_box_beforenm")?;
        Ok(PrecomputedBox::new(self.algo, shared))
    }
}

impl BoxOp for CryptoBox {
    fn nonce_size(&self) -> usize {
        BOX_NONCEBYTES
    }

    fn mac_size(&self) -> usize {
        BOX_MACBYTES
    }

    #[allow(unsafe_code)]
    fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size(nonce, BOX_NONCEBYTES, "nonce")?;
        let fns = self.algo.fns();
        let len = plaintext.len() + BOX_MACBYTES;
        support::with_output(ciphertext, len, "ciphertext output", |out| {
            init()?;
            // SAFETY: `out` holds mac + plaintext bytes, nonce was validated
            // and both keys are 32-byte arrays.
            let rc = unsafe {
                (fns.easy)(
                    out.as_mut_ptr(),
                    support::ptr(plaintext),
                    support::len_u64(plaintext),
                    nonce.as_ptr(),
                    self.peer_public.as_array().as_ptr(),
                    self.own_secret.as_array().as_ptr(),
                )
            };
            support::check_rc(rc, "crypto_box_easy")
        })
    }

    #[allow(unsafe_code)]
    fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        support::check_size(nonce, BOX_NONCEBYTES, "nonce")?;
        support::check_size_min(ciphertext, BOX_MACBYTES, "ciphertext")?;
        let fns = self.algo.fns();
        let len = ciphertext.len() - BOX_MACBYTES;
        support::with_opened_output(plaintext, len, |out| {
            init()?;
            // SAFETY: `out` holds ciphertext - mac bytes, nonce was validated
            // and both keys are 32-byte arrays.
            let rc = unsafe {
                (fns.open_easy)(
                    support::ptr_mut(out),
                    ciphertext.as_ptr(),
                    support::len_u64(ciphertext),
                    nonce.as_ptr(),
                    self.peer_public.as_array().as_ptr(),
                    self.own_secret.as_array().as_ptr(),
                )
            };
            support::check_verify(rc)
        })
    }

    #[allow(unsafe_code)]
    fn seal_detached(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        mac: &mut [u8],
    ) -> Result<(), SodiumError> {
        support::check_size(nonce, BOX_NONCEBYTES, "nonce")?;
        support::check_size(mac, BOX_MACBYTES, "mac")?;
        support::check_size(ciphertext, plaintext.len(), "ciphertext output")?;
        init()?;
        // SAFETY: ciphertext and plaintext have equal lengths, mac holds
        // MACBYTES, nonce was validated and both keys are 32-byte arrays.
        let rc = unsafe {
            (self.algo.fns().detached)(
                support::ptr_mut(ciphertext),
                mac.as_mut_ptr(),
                support::ptr(plaintext),
                support::len_u64(plaintext),
                nonce.as_ptr(),
                self.peer_public.as_array().as_ptr(),
                self.own_secret.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_box_detached")
    }

    #[allow(unsafe_code)]
    fn open_detached(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        mac: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError> {
        support::check_size(nonce, BOX_NONCEBYTES, "nonce")?;
        support::check_size(mac, BOX_MACBYTES, "mac")?;
        support::check_size(plaintext, ciphertext.len(), "plaintext output")?;
        let fns = self.algo.fns();
        support::with_opened_output(Some(plaintext), ciphertext.len(), |out| {
            init()?;
            // SAFETY: `out` and ciphertext have equal lengths, mac holds
            // MACBYTES, nonce was validated and both keys are 32-byte arrays.
            let rc = unsafe {
                (fns.open_detached)(
                    support::ptr_mut(out),
                    support::ptr(ciphertext),
                    mac.as_ptr(),
                    support::len_u64(ciphertext),
                    nonce.as_ptr(),
                    self.peer_public.as_array().as_ptr(),
                    self.own_secret.as_array().as_ptr(),
                )
            };
            support::check_verify(rc)
        })
        .map(|_| ())
    }
}

/// A box keyed with a precomputed shared key.
///
/// Both parties derive the same shared key, so one `PrecomputedBox` opens
/// what the peer's `PrecomputedBox` (or [`CryptoBox`]) sealed.
pub struct PrecomputedBox {
    algo: BoxAlgorithm,
    shared: BoxSharedKey,
}

impl PrecomputedBox {
    fn new(algo: BoxAlgorithm, shared: BoxSharedKey) -> Self {
        Self { algo, shared }
    }

    /// Creates a box from a shared key stored earlier.
    pub fn from_shared_key(algo: BoxAlgorithm, shared: BoxSharedKey) -> Self {
        Self::new(algo, shared)
    }

    /// Returns the shared key. Treat it as a secret.
    pub fn shared_key(&self) -> &BoxSharedKey {
        &self.shared
    }

    fn fns(&self) -> &'static KeyedBoxFns {
        &self.algo.fns().afternm
    }
}

impl BoxOp for PrecomputedBox {
    fn nonce_size(&self) -> usize {
        BOX_NONCEBYTES
    }

    fn mac_size(&self) -> usize {
        BOX_MACBYTES
    }

    fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        self.fns()
            .seal(self.shared.as_array(), nonce, plaintext, ciphertext)
    }

    fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        plaintext: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        self.fns()
            .open(self.shared.as_array(), nonce, ciphertext, plaintext)
    }

    fn seal_detached(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        mac: &mut [u8],
    ) -> Result<(), SodiumError> {
        self.fns()
            .seal_detached(self.shared.as_array(), nonce, plaintext, ciphertext, mac)
    }

    fn open_detached(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        mac: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), SodiumError> {
        self.fns()
            .open_detached(self.shared.as_array(), nonce, ciphertext, mac, plaintext)
    }
}

#[cfg(test)]
mod tests;
