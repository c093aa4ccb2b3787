use std::fmt;

use eyre::WrapErr as _;
use pkcs8::{DecodePrivateKey as _, EncodePrivateKey as _, EncodePublicKey as _};
use zeroize::Zeroizing;

type SigningKey = ecdsa::SigningKey<p256::NistP256>;

/// P-256 key pair bound to an enrollment request.
///
/// The private half never leaves this type except through [`private_key_pem`], which hands out a
/// buffer that is wiped on drop.
///
/// [`private_key_pem`]: KeyPair::private_key_pem()
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Make a fresh P-256 key pair.
    pub fn generate() -> Self {
        let csprng = &mut rand::thread_rng();
        Self::from(SigningKey::from(p256::SecretKey::random(csprng)))
    }

    /// Reads a PKCS#8 PEM-encoded P-256 private key.
    pub fn from_pkcs8_pem(private_key_pem: &str) -> eyre::Result<Self> {
        let signing_key = SigningKey::from_pkcs8_pem(private_key_pem)
            .context("failed to read private key PEM")?;
        Ok(Self::from(signing_key))
    }

    /// Key used to sign the certificate signing request.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn public_key(&self) -> p256::PublicKey {
        p256::PublicKey::from(self.signing_key.verifying_key())
    }

    /// The private key in PKCS#8 PEM format.
    pub fn private_key_pem(&self) -> eyre::Result<Zeroizing<String>> {
        self.signing_key
            .to_pkcs8_pem(pem::LineEnding::LF)
            .context("private_key_to_pem")
    }

    /// The public key in SPKI PEM format.
    pub fn public_key_pem(&self) -> eyre::Result<String> {
        self.public_key()
            .to_public_key_pem(pem::LineEnding::LF)
            .context("public_key_to_pem")
    }
}

impl From<SigningKey> for KeyPair {
    fn from(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
