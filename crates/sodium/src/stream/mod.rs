// Copyright (C) Microsoft Corporation. All rights reserved.

//! Unauthenticated stream ciphers.
//!
//! These produce a keystream and XOR it into data. Nothing detects
//! modification of the ciphertext; pair them with a MAC or use [`AeadOp`]
//! instead unless a raw keystream is what is needed.

use std::ffi::c_int;

use super::*;

/// Key size shared by every stream cipher.
pub const STREAM_KEYBYTES: usize = 32;

/// Largest message ChaCha20-IETF can process under one nonce.
pub const STREAM_CHACHA20_IETF_MESSAGEBYTES_MAX: u64 = 64 * (1u64 << 32);

define_secret_key!(
    /// Stream cipher key.
    pub StreamKey,
    STREAM_KEYBYTES,
    keygen: libsodium_sys::crypto_stream_keygen,
    as_array
);

/// Supported stream ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamCipher {
    /// XSalsa20, libsodium's default `crypto_stream`.
    XSalsa20,
    /// Salsa20/20.
    Salsa20,
    /// Salsa20 reduced to 12 rounds.
    Salsa2012,
    /// Salsa20 reduced to 8 rounds.
    Salsa208,
    /// ChaCha20 with a 64-bit nonce and 64-bit counter.
    ChaCha20,
    /// ChaCha20 with a 96-bit nonce and 32-bit counter (RFC 8439).
    ChaCha20Ietf,
    /// ChaCha20 with a 192-bit nonce.
    XChaCha20,
}

type KeystreamFn = unsafe extern "C" fn(c: *mut u8, clen: u64, n: *const u8, k: *const u8) -> c_int;
type XorFn =
    unsafe extern "C" fn(c: *mut u8, m: *const u8, mlen: u64, n: *const u8, k: *const u8) -> c_int;
type XorIc64Fn = unsafe extern "C" fn(
    c: *mut u8,
    m: *const u8,
    mlen: u64,
    n: *const u8,
    ic: u64,
    k: *const u8,
) -> c_int;
type XorIc32Fn = unsafe extern "C" fn(
    c: *mut u8,
    m: *const u8,
    mlen: u64,
    n: *const u8,
    ic: u32,
    k: *const u8,
) -> c_int;

/// Counter-offset XOR entry point, whose counter width differs per cipher.
enum XorIc {
    Unavailable,
    Counter64(XorIc64Fn),
    Counter32(XorIc32Fn),
}

struct StreamFns {
    name: &'static str,
    nonce_size: usize,
    message_max: u64,
    keystream: KeystreamFn,
    xor: XorFn,
    xor_ic: XorIc,
}

static XSALSA20: StreamFns = StreamFns {
    name: "crypto_stream_xsalsa20",
    nonce_size: 24,
    message_max: u64::MAX,
    keystream: libsodium_sys::crypto_stream_xsalsa20,
    xor: libsodium_sys::crypto_stream_xsalsa20_xor,
    xor_ic: XorIc::Counter64(libsodium_sys::crypto_stream_xsalsa20_xor_ic),
};

static SALSA20: StreamFns = StreamFns {
    name: "crypto_stream_salsa20",
    nonce_size: 8,
    message_max: u64::MAX,
    keystream: libsodium_sys::crypto_stream_salsa20,
    xor: libsodium_sys::crypto_stream_salsa20_xor,
    xor_ic: XorIc::Counter64(libsodium_sys::crypto_stream_salsa20_xor_ic),
};

static SALSA2012: StreamFns = StreamFns {
    name: "crypto_stream_salsa2012",
    nonce_size: 8,
    message_max: u64::MAX,
    keystream: libsodium_sys::crypto_stream_salsa2012,
    xor: libsodium_sys::crypto_stream_salsa2012_xor,
    xor_ic: XorIc::Unavailable,
};

static SALSA208: StreamFns = StreamFns {
    name: "crypto_stream_salsa208",
    nonce_size: 8,
    message_max: u64::MAX,
    keystream: libsodium_sys::crypto_stream_salsa208,
    xor: libsodium_sys::crypto_stream_salsa208_xor,
    xor_ic: XorIc::Unavailable,
};

static CHACHA20: StreamFns = StreamFns {
    name: "crypto_stream_chacha20",
    nonce_size: 8,
    message_max: u64::MAX,
    keystream: libsodium_sys::crypto_stream_chacha20,
    xor: libsodium_sys::crypto_stream_chacha20_xor,
    xor_ic: XorIc::Counter64(libsodium_sys::crypto_stream_chacha20_xor_ic),
};

static CHACHA20_IETF: StreamFns = StreamFns {
    name: "crypto_stream_chacha20_ietf",
    nonce_size: 12,
    message_max: STREAM_CHACHA20_IETF_MESSAGEBYTES_MAX,
    keystream: libsodium_sys::crypto_stream_chacha20_ietf,
    xor: libsodium_sys::crypto_stream_chacha20_ietf_xor,
    xor_ic: XorIc::Counter32(libsodium_sys::crypto_stream_chacha20_ietf_xor_ic),
};

static XCHACHA20: StreamFns = StreamFns {
    name: "crypto_stream_xchacha20",
    nonce_size: 24,
    message_max: u64::MAX,
    keystream: libsodium_sys::crypto_stream_xchacha20,
    xor: libsodium_sys::crypto_stream_xchacha20_xor,
    xor_ic: XorIc::Counter64(libsodium_sys::crypto_stream_xchacha20_xor_ic),
};

impl StreamCipher {
    fn fns(&self) -> &'static StreamFns {
        match self {
            Self::XSalsa20 => &XSALSA20,
            Self::Salsa20 => &SALSA20,
            Self::Salsa2012 => &SALSA2012,
            Self::Salsa208 => &SALSA208,
            Self::ChaCha20 => &CHACHA20,
            Self::ChaCha20Ietf => &CHACHA20_IETF,
            Self::XChaCha20 => &XCHACHA20,
        }
    }

    /// Nonce size in bytes.
    pub fn nonce_size(&self) -> usize {
        self.fns().nonce_size
    }

    /// Largest message length accepted under one nonce.
    pub fn message_max(&self) -> u64 {
        self.fns().message_max
    }

    /// Returns `true` when [`xor_ic`](Self::xor_ic) is available.
    pub fn supports_initial_counter(&self) -> bool {
        !matches!(self.fns().xor_ic, XorIc::Unavailable)
    }

    fn check_params(&self, nonce: &[u8], len: usize) -> Result<&'static StreamFns, SodiumError> {
        let fns = self.fns();
        support::check_size(nonce, fns.nonce_size, "nonce")?;
        support::check_int_max(len as u64, fns.message_max, "message length")?;
        Ok(fns)
    }

    /// Returns `len` bytes of keystream.
    pub fn keystream(
        &self,
        key: &StreamKey,
        nonce: &[u8],
        len: usize,
    ) -> Result<Vec<u8>, SodiumError> {
        let mut out = vec![0u8; len];
        self.fill_keystream(key, nonce, &mut out)?;
        Ok(out)
    }

    /// Overwrites `output` with keystream.
    #[allow(unsafe_code)]
    pub fn fill_keystream(
        &self,
        key: &StreamKey,
        nonce: &[u8],
        output: &mut [u8],
    ) -> Result<(), SodiumError> {
        let fns = self.check_params(nonce, output.len())?;
        init()?;
        // SAFETY: output pointer and length describe `output`, the nonce was
        // validated and the key is a 32-byte array.
        let rc = unsafe {
            (fns.keystream)(
                support::ptr_mut(output),
                output.len() as u64,
                nonce.as_ptr(),
                key.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, fns.name)
    }

    /// XORs `input` with the keystream into `output`.
    ///
    /// Encryption and decryption are the same operation. Pass `None` as
    /// `output` to query the output size, which equals the input size.
    #[allow(unsafe_code)]
    pub fn xor(
        &self,
        key: &StreamKey,
        nonce: &[u8],
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let fns = self.check_params(nonce, input.len())?;
        support::with_output(output, input.len(), "output", |out| {
            init()?;
            // SAFETY: `out` and `input` have equal lengths, the nonce was
            // validated and the key is a 32-byte array.
            let rc = unsafe {
                (fns.xor)(
                    support::ptr_mut(out),
                    support::ptr(input),
                    support::len_u64(input),
                    nonce.as_ptr(),
                    key.as_array().as_ptr(),
                )
            };
            support::check_rc(rc, fns.name)
        })
    }

    /// Like [`xor`](Self::xor), starting the keystream at block `ic`
    /// instead of block 0.
    ///
    /// # Errors
    ///
    /// - [`SodiumError::Unsupported`] for Salsa20/12 and Salsa20/8
    /// - [`SodiumError::OutOfRange`] if the 32-bit counter of ChaCha20-IETF
    ///   would overflow, starting at `ic`, before the input is processed
    #[allow(unsafe_code)]
    pub fn xor_ic(
        &self,
        key: &StreamKey,
        nonce: &[u8],
        ic: u64,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, SodiumError> {
        let fns = self.check_params(nonce, input.len())?;
        match fns.xor_ic {
            XorIc::Unavailable => return Err(SodiumError::Unsupported(fns.name)),
            XorIc::Counter32(_) => {
                // The block counter must not wrap while processing the input.
                let blocks = support::len_u64(input).div_ceil(64);
                let max = ((1u64 << 32) - blocks).min(u32::MAX.into());
                support::check_int_max(ic, max, "initial counter")?;
            }
            XorIc::Counter64(_) => {}
        }
        support::with_output(output, input.len(), "output", |out| {
            init()?;
            let (c, m, mlen) = (support::ptr_mut(out), support::ptr(input), support::len_u64(input));
            let (n, k) = (nonce.as_ptr(), key.as_array().as_ptr());
            // SAFETY: `out` and `input` have equal lengths, the nonce was
            // validated, the key is a 32-byte array and a 32-bit counter was
            // range checked above.
            let rc = unsafe {
                match fns.xor_ic {
                    XorIc::Counter64(f) => f(c, m, mlen, n, ic, k),
                    XorIc::Counter32(f) => f(c, m, mlen, n, ic as u32, k),
                    XorIc::Unavailable => return Err(SodiumError::Unsupported(fns.name)),
                }
            };
            support::check_rc(rc, fns.name)
        })
    }

    /// XORs the keystream into `buf` in place.
    #[allow(unsafe_code)]
    pub fn xor_in_place(
        &self,
        key: &StreamKey,
        nonce: &[u8],
        buf: &mut [u8],
    ) -> Result<(), SodiumError> {
        let fns = self.check_params(nonce, buf.len())?;
        init()?;
        let p = support::ptr_mut(buf);
        // SAFETY: libsodium allows the input and output to alias exactly; the
        // nonce was validated and the key is a 32-byte array.
        let rc = unsafe {
            (fns.xor)(
                p,
                p.cast_const(),
                buf.len() as u64,
                nonce.as_ptr(),
                key.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, fns.name)
    }

    /// [`xor`](Self::xor) returning an owned buffer.
    pub fn xor_vec(
        &self,
        key: &StreamKey,
        nonce: &[u8],
        input: &[u8],
    ) -> Result<Vec<u8>, SodiumError> {
        let mut out = vec![0u8; input.len()];
        self.xor(key, nonce, input, Some(&mut out))?;
        Ok(out)
    }

    /// Returns libsodium's name for the default stream cipher.
    #[allow(unsafe_code)]
    pub fn primitive() -> String {
        // SAFETY: returns a pointer to a static string.
        support::static_str(unsafe { libsodium_sys::crypto_stream_primitive() })
    }
}
