//! Builds an enroll body for a TLS certificate.
//!
//! The CSR is read from the path in the first argument and must be signed by the PKCS#8 private
//! key in the second argument.

use std::{env, fs};

use eyre::WrapErr as _;
use fabric_ca_enroll::{EnrollmentRequest, KeyPair, PendingEnrollment, ENROLL_PATH};

const HOSTS: &[&str] = &["peer0.org1.example.com", "localhost"];

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let (Some(csr_path), Some(key_path)) = (args.next(), args.next()) else {
        eyre::bail!("usage: enroll-request <csr.pem> <private-key.pem>");
    };

    log::info!("loading private key from {key_path}");
    let key_pem = fs::read_to_string(&key_path).context("read private key")?;
    let key_pair = KeyPair::from_pkcs8_pem(&key_pem)?;

    let mut req = EnrollmentRequest::from_parts(Some("tls".to_owned()), None, Some(key_pair));
    for host in HOSTS {
        req.add_host(*host);
    }

    log::info!("attaching CSR from {csr_path}");
    let csr_pem = fs::read_to_string(&csr_path).context("read certificate request")?;
    let ready = PendingEnrollment::new(req).attach_csr(&csr_pem)?;

    log::info!("POST body for /{ENROLL_PATH}:");
    println!("{}", ready.body());

    Ok(())
}
