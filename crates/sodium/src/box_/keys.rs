// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

define_public_key!(
    /// X25519 public key of a box participant.
    pub BoxPublicKey,
    BOX_PUBLICKEYBYTES,
    as_array,
    as_mut_array,
    zeroed
);

define_secret_key!(
    /// X25519 secret key of a box participant.
    pub BoxSecretKey,
    BOX_SECRETKEYBYTES,
    as_array,
    as_mut_array,
    zeroed
);

define_secret_key!(
    /// Shared key produced by [`CryptoBox::precompute`].
    pub BoxSharedKey,
    BOX_BEFORENMBYTES,
    as_array,
    as_mut_array,
    zeroed
);

/// A box keypair.
#[derive(Clone)]
pub struct BoxKeyPair {
    algo: BoxAlgorithm,
    public: BoxPublicKey,
    secret: BoxSecretKey,
}

impl BoxKeyPair {
    /// Generates a random keypair.
    #[allow(unsafe_code)]
    pub fn generate(algo: BoxAlgorithm) -> Result<Self, SodiumError> {
        init()?;
        let mut public = BoxPublicKey::zeroed();
        let mut secret = BoxSecretKey::zeroed();
        // SAFETY: both buffers are 32-byte arrays.
        let rc = unsafe {
            (algo.fns().keypair)(
                public.as_mut_array().as_mut_ptr(),
                secret.as_mut_array().as_mut_ptr(),
            )
        };
        support::check_rc(rc, "crypto_box_keypair")?;
        Ok(Self {
            algo,
            public,
            secret,
        })
    }

    /// Derives a keypair deterministically from a 32-byte seed.
    #[allow(unsafe_code)]
    pub fn from_seed(algo: BoxAlgorithm, seed: &[u8]) -> Result<Self, SodiumError> {
        support::check_size(seed, BOX_SEEDBYTES, "seed")?;
        init()?;
        let mut public = BoxPublicKey::zeroed();
        let mut secret = BoxSecretKey::zeroed();
        // SAFETY: both outputs are 32-byte arrays and the seed was validated.
        let rc = unsafe {
            (algo.fns().seed_keypair)(
                public.as_mut_array().as_mut_ptr(),
                secret.as_mut_array().as_mut_ptr(),
                seed.as_ptr(),
            )
        };
        support::check_rc(rc, "crypto_box_seed_keypair")?;
        Ok(Self {
            algo,
            public,
            secret,
        })
    }

    /// Rebuilds a keypair from stored halves. The halves are not checked
    /// against each other.
    pub fn from_parts(algo: BoxAlgorithm, public: BoxPublicKey, secret: BoxSecretKey) -> Self {
        Self {
            algo,
            public,
            secret,
        }
    }

    /// Construction the keypair was created for.
    pub fn algorithm(&self) -> BoxAlgorithm {
        self.algo
    }

    /// Public half.
    pub fn public_key(&self) -> &BoxPublicKey {
        &self.public
    }

    /// Secret half.
    pub fn secret_key(&self) -> &BoxSecretKey {
        &self.secret
    }

    /// Returns a box that seals messages for `peer` with this keypair's
    /// secret key.
    pub fn box_for(&self, peer: &BoxPublicKey) -> CryptoBox {
        CryptoBox::new(self.algo, peer, &self.secret)
    }
}

impl std::fmt::Debug for BoxKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxKeyPair")
            .field("algo", &self.algo)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
