//! Enrollment requests for membership-service certificate authorities such as
//! [Hyperledger Fabric CA](https://hyperledger-fabric-ca.readthedocs.io/).
//!
//! An enrollment exchanges a certificate signing request (CSR) for a certificate issued by the
//! CA. This crate models the request side of that exchange and the JSON body sent to the CA's
//! enroll endpoint. Generating the CSR and talking HTTP to the CA are left to the caller.
//!
//! # Usage
//!
//! ```no_run
//! use fabric_ca_enroll::{EnrollmentRequest, KeyPair, PendingEnrollment};
//!
//! # fn csr_for(key_pair: &KeyPair) -> String { unimplemented!() }
//! # fn main() -> eyre::Result<()> {
//! let key_pair = KeyPair::generate();
//! let csr_pem = csr_for(&key_pair);
//!
//! let mut req = EnrollmentRequest::from_parts(Some("tls".to_owned()), None, Some(key_pair));
//! req.add_host("peer0.org1.example.com");
//!
//! let ready = PendingEnrollment::new(req).attach_csr(&csr_pem)?;
//! let body = ready.body();
//! # Ok(())
//! # }
//! ```
//!
//! # Profiles and Labels
//!
//! Leaving the profile unset makes the CA sign with its default profile. The label is only
//! needed when the private key lives in a hardware security module; such requests usually carry
//! no [`KeyPair`] at all.

#![deny(rust_2018_idioms, nonstandard_style, future_incompatible)]

mod enroll;
mod key;
mod request;

pub mod api;


pub use crate::{
    enroll::{PendingEnrollment, ReadyEnrollment, ENROLL_PATH},
    key::KeyPair,
    request::EnrollmentRequest,
};
