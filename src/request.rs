use serde::{Serialize, Serializer};

use crate::{api, key::KeyPair};

/// Information required to enroll an identity with a membership-service CA.
///
/// Built up by the caller with a signing profile, HSM label and SAN hosts. The certificate signing
/// request itself is attached by the enrollment workflow (see [`PendingEnrollment`]) once it has
/// been generated from the request's key pair.
///
/// Serializes to the enroll body described by [`api::Enrollment`]:
///
/// - `profile` and `label` are included only when set (an empty string counts as set);
/// - `hosts` is included only when at least one host was added, in insertion order;
/// - `certificate_request` is always included, and is `null` until a CSR is attached.
///
/// [`PendingEnrollment`]: crate::PendingEnrollment
#[derive(Debug, Clone, Default)]
pub struct EnrollmentRequest {
    csr: Option<String>,
    hosts: Vec<String>,
    profile: Option<String>,
    label: Option<String>,
    key_pair: Option<KeyPair>,
}

impl EnrollmentRequest {
    /// Constructs an empty request for the CA's default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a request with a signing profile, HSM label and key pair.
    pub fn from_parts(
        profile: Option<String>,
        label: Option<String>,
        key_pair: Option<KeyPair>,
    ) -> Self {
        Self {
            profile,
            label,
            key_pair,
            ..Self::default()
        }
    }

    pub(crate) fn key_pair(&self) -> Option<&KeyPair> {
        self.key_pair.as_ref()
    }

    pub fn set_key_pair(&mut self, key_pair: KeyPair) {
        self.key_pair = Some(key_pair);
    }

    /// Removes the key pair from the request, e.g. to store it next to the issued certificate.
    pub fn take_key_pair(&mut self) -> Option<KeyPair> {
        self.key_pair.take()
    }

    /// The attached CSR in PEM format, if any.
    pub fn csr(&self) -> Option<&str> {
        self.csr.as_deref()
    }

    pub(crate) fn set_csr(&mut self, csr: String) {
        self.csr = Some(csr);
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn set_profile(&mut self, profile: impl Into<String>) {
        self.profile = Some(profile.into());
    }

    /// Reverts to the CA's default signing profile.
    pub fn clear_profile(&mut self) {
        self.profile = None;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    /// Host names added so far, in the order they were added.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Appends a host name. Duplicates are kept and no syntax check is done.
    pub fn add_host(&mut self, host: impl Into<String>) {
        self.hosts.push(host.into());
    }

    /// Converts the request to its JSON body.
    pub fn to_json(&self) -> String {
        // all fields are strings; serde_json cannot fail on this shape
        serde_json::to_string(&self.to_api()).unwrap_or_else(|err| {
            log::error!("Failed to encode enrollment request: {err}");
            String::new()
        })
    }

    /// Builds the wire object. The key pair is not part of it.
    pub(crate) fn to_api(&self) -> api::Enrollment {
        api::Enrollment {
            profile: self.profile.clone(),
            hosts: self.hosts.clone(),
            label: self.label.clone(),
            certificate_request: self.csr.clone(),
        }
    }
}

impl Serialize for EnrollmentRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_api().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(req: &EnrollmentRequest) -> serde_json::Value {
        serde_json::from_str(&req.to_json()).unwrap()
    }

    #[test]
    fn empty_request_only_has_null_csr() {
        let req = EnrollmentRequest::new();
        assert_eq!(parse(&req), json!({ "certificate_request": null }));
        assert_eq!(req.to_json(), r#"{"certificate_request":null}"#);
    }

    #[test]
    fn from_parts_leaves_hosts_and_csr_unset() {
        let key_pair = KeyPair::generate();
        let public_key = key_pair.public_key();

        let req = EnrollmentRequest::from_parts(
            Some("tls".to_owned()),
            Some("hsm-1".to_owned()),
            Some(key_pair),
        );

        assert_eq!(req.profile(), Some("tls"));
        assert_eq!(req.label(), Some("hsm-1"));
        assert!(req.hosts().is_empty());
        assert_eq!(req.csr(), None);
        assert_eq!(req.key_pair().unwrap().public_key(), public_key);
        assert_eq!(
            parse(&req),
            json!({ "profile": "tls", "label": "hsm-1", "certificate_request": null }),
        );
    }

    #[test]
    fn profile_emitted_only_when_set() {
        let mut req = EnrollmentRequest::new();
        req.set_profile("ca-profile");
        assert_eq!(parse(&req)["profile"], json!("ca-profile"));

        req.clear_profile();
        assert!(parse(&req).get("profile").is_none());
    }

    #[test]
    fn hosts_keep_call_order_and_duplicates() {
        let mut req = EnrollmentRequest::new();
        for host in ["b.example.com", "a.example.com", "b.example.com"] {
            req.add_host(host);
        }

        assert_eq!(
            req.hosts(),
            ["b.example.com", "a.example.com", "b.example.com"]
        );
        assert_eq!(
            parse(&req)["hosts"],
            json!(["b.example.com", "a.example.com", "b.example.com"]),
        );
    }

    #[test]
    fn empty_label_differs_from_unset_label() {
        let mut req = EnrollmentRequest::new();
        req.set_label("");
        assert_eq!(
            parse(&req),
            json!({ "label": "", "certificate_request": null })
        );

        req.clear_label();
        assert_eq!(parse(&req), json!({ "certificate_request": null }));
    }

    #[test]
    fn all_fields_parse_back() {
        let mut req = EnrollmentRequest::new();
        req.set_profile("p1");
        req.add_host("h1");
        req.add_host("h2");
        req.set_label("L");
        req.set_csr("PEM".to_owned());

        assert_eq!(
            parse(&req),
            json!({
                "profile": "p1",
                "hosts": ["h1", "h2"],
                "label": "L",
                "certificate_request": "PEM"
            }),
        );

        let body: api::Enrollment = serde_json::from_str(&req.to_json()).unwrap();
        assert_eq!(body, req.to_api());
    }

    #[test]
    fn exact_body_for_tls_request() {
        let mut req = EnrollmentRequest::new();
        req.add_host("a");
        req.add_host("b");
        req.set_profile("tls");
        req.set_csr("CSR_DATA".to_owned());

        assert_eq!(
            req.to_json(),
            r#"{"profile":"tls","hosts":["a","b"],"certificate_request":"CSR_DATA"}"#,
        );
    }

    #[test]
    fn key_pair_is_not_serialized() {
        let mut req = EnrollmentRequest::new();
        req.set_key_pair(KeyPair::generate());

        assert_eq!(req.to_json(), r#"{"certificate_request":null}"#);
        assert!(req.take_key_pair().is_some());
        assert!(req.key_pair().is_none());
    }

    #[test]
    fn serialize_matches_to_json() {
        let mut req = EnrollmentRequest::new();
        req.set_profile("tls");
        req.add_host("localhost");

        assert_eq!(serde_json::to_string(&req).unwrap(), req.to_json());
    }
}
