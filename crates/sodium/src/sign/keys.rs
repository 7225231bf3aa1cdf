// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

define_secret_key!(
    /// Ed25519 secret key: the 32-byte seed followed by the public key.
    pub SigningKey,
    SIGN_SECRETKEYBYTES,
    as_array,
    as_mut_array,
    zeroed
);

define_secret_key!(
    /// Ed25519 seed from which a keypair is derived.
    pub SignSeed,
    SIGN_SEEDBYTES,
    random,
    as_mut_array,
    zeroed
);

define_public_key!(
    /// Ed25519 public key.
    pub VerifyingKey,
    SIGN_PUBLICKEYBYTES,
    as_array,
    as_mut_array,
    zeroed
);

impl SigningKey {
    /// Extracts the public key embedded in the secret key.
    #[allow(unsafe_code)]
    pub fn verifying_key(&self) -> Result<VerifyingKey, SodiumError> {
        init()?;
        let mut public = VerifyingKey::zeroed();
        // SAFETY: 32-byte output, 64-byte input.
        let rc = unsafe {
            libsodium_sys::crypto_sign_ed25519_sk_to_pk(
                public.as_mut_array().as_mut_ptr(),
                self.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_ed25519_sk_to_pk")?;
        Ok(public)
    }

    /// Extracts the seed the key was derived from.
    #[allow(unsafe_code)]
    pub fn seed(&self) -> Result<SignSeed, SodiumError> {
        init()?;
        let mut seed = SignSeed::zeroed();
        // SAFETY: 32-byte output, 64-byte input.
        let rc = unsafe {
            libsodium_sys::crypto_sign_ed25519_sk_to_seed(
                seed.as_mut_array().as_mut_ptr(),
                self.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_ed25519_sk_to_seed")?;
        Ok(seed)
    }

    /// Converts the key to an X25519 secret key usable with [`CryptoBox`].
    #[allow(unsafe_code)]
    pub fn to_curve25519(&self) -> Result<BoxSecretKey, SodiumError> {
        init()?;
        let mut secret = BoxSecretKey::zeroed();
        // SAFETY: 32-byte output, 64-byte input.
        let rc = unsafe {
            libsodium_sys::crypto_sign_ed25519_sk_to_curve25519(
                secret.as_mut_array().as_mut_ptr(),
                self.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_ed25519_sk_to_curve25519")?;
        Ok(secret)
    }
}

impl VerifyingKey {
    /// Converts the key to an X25519 public key usable with [`CryptoBox`].
    ///
    /// # Errors
    ///
    /// Returns [`SodiumError::NativeFailure`] if the key is not a valid
    /// Ed25519 point.
    #[allow(unsafe_code)]
    pub fn to_curve25519(&self) -> Result<BoxPublicKey, SodiumError> {
        init()?;
        let mut public = BoxPublicKey::zeroed();
        // SAFETY: both buffers are 32-byte arrays.
        let rc = unsafe {
            libsodium_sys::crypto_sign_ed25519_pk_to_curve25519(
                public.as_mut_array().as_mut_ptr(),
                self.as_array().as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_ed25519_pk_to_curve25519")?;
        Ok(public)
    }
}

/// An Ed25519 keypair.
#[derive(Clone)]
pub struct SignKeyPair {
    signing: SigningKey,
    verifying: VerifyingKey,
}

impl SignKeyPair {
    /// Generates a random keypair.
    #[allow(unsafe_code)]
    pub fn generate() -> Result<Self, SodiumError> {
        init()?;
        let mut signing = SigningKey::zeroed();
        let mut verifying = VerifyingKey::zeroed();
        // SAFETY: 32-byte public and 64-byte secret outputs.
        let rc = unsafe {
            libsodium_sys::crypto_sign_keypair(
                verifying.as_mut_array().as_mut_ptr(),
                signing.as_mut_array().as_mut_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_keypair")?;
        Ok(Self { signing, verifying })
    }

    /// Derives a keypair deterministically from a 32-byte seed.
    #[allow(unsafe_code)]
    pub fn from_seed(seed: &[u8]) -> Result<Self, SodiumError> {
        support::check_size(seed, SIGN_SEEDBYTES, "seed")?;
        init()?;
        let mut signing = SigningKey::zeroed();
        let mut verifying = VerifyingKey::zeroed();
        // SAFETY: 32-byte public and 64-byte secret outputs; the seed was
        // validated.
        let rc = unsafe {
            libsodium_sys::crypto_sign_seed_keypair(
                verifying.as_mut_array().as_mut_ptr(),
                signing.as_mut_array().as_mut_ptr(),
                seed.as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_sign_seed_keypair")?;
        Ok(Self { signing, verifying })
    }

    /// Rebuilds a keypair from a stored secret key.
    pub fn from_signing_key(signing: SigningKey) -> Result<Self, SodiumError> {
        let verifying = signing.verifying_key()?;
        Ok(Self { signing, verifying })
    }

    /// Secret half.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    /// Public half.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }
}

impl std::fmt::Debug for SignKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignKeyPair")
            .field("verifying", &self.verifying)
            .finish_non_exhaustive()
    }
}
