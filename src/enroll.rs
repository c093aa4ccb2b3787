//! Enrollment life cycle.
//!
//! A request can only be turned into an enroll body once a CSR is attached to it. The façade
//! structs below make that ordering explicit:
//!
//! * [`PendingEnrollment`] -> [`ReadyEnrollment`] -> body for the CA's [`ENROLL_PATH`] endpoint.

use der::{DecodePem as _, Encode as _};
use ecdsa::signature::Verifier as _;
use eyre::{bail, eyre, WrapErr as _};
use pkcs8::DecodePublicKey as _;
use x509_cert::request::CertReq;

use crate::request::EnrollmentRequest;

/// Path of the enroll endpoint, relative to the CA's API base URL.
pub const ENROLL_PATH: &str = "enroll";

/// An enrollment whose request does not have a CSR yet.
#[derive(Debug)]
pub struct PendingEnrollment {
    request: EnrollmentRequest,
}

impl PendingEnrollment {
    pub fn new(request: EnrollmentRequest) -> Self {
        Self { request }
    }

    /// Attaches a PEM-encoded PKCS#10 CSR to the request.
    ///
    /// When the request holds a key pair, the CSR must carry its public key and its signature must
    /// verify against it. Requests without a key pair (e.g. the key lives in an HSM referenced by
    /// the label) skip both checks.
    pub fn attach_csr(mut self, csr_pem: &str) -> eyre::Result<ReadyEnrollment> {
        let csr = CertReq::from_pem(csr_pem).context("failed to read certificate request PEM")?;

        if let Some(key_pair) = self.request.key_pair() {
            let spki_der = csr.info.public_key.to_der()?;
            let csr_key = p256::PublicKey::from_public_key_der(&spki_der)
                .context("certificate request does not carry a P-256 public key")?;

            if csr_key != key_pair.public_key() {
                bail!("certificate request public key does not match the request key pair");
            }

            let signature = p256::ecdsa::DerSignature::from_bytes(csr.signature.raw_bytes())
                .map_err(|_| eyre!("certificate request signature does not verify"))?;

            key_pair
                .signing_key()
                .verifying_key()
                .verify(&csr.info.to_der()?, &signature)
                .map_err(|_| eyre!("certificate request signature does not verify"))?;
        }

        log::debug!("Attaching CSR for subject: {}", csr.info.subject);
        self.request.set_csr(csr_pem.to_owned());

        Ok(ReadyEnrollment {
            request: self.request,
        })
    }

    pub fn request(&self) -> &EnrollmentRequest {
        &self.request
    }

    /// Mutable access to the request, for adding hosts or changing the profile before the CSR is
    /// attached.
    pub fn request_mut(&mut self) -> &mut EnrollmentRequest {
        &mut self.request
    }
}

/// An enrollment with a CSR attached, ready to be sent to the CA.
#[derive(Debug)]
pub struct ReadyEnrollment {
    request: EnrollmentRequest,
}

impl ReadyEnrollment {
    /// JSON body to POST to the [`ENROLL_PATH`] endpoint.
    pub fn body(&self) -> String {
        let body = self.request.to_json();
        log::trace!("Enroll body: {body}");
        body
    }

    pub fn request(&self) -> &EnrollmentRequest {
        &self.request
    }

    pub fn into_request(self) -> EnrollmentRequest {
        self.request
    }
}
