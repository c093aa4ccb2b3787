use serde::{Deserialize, Serialize};

/// Body of an enroll request.
///
/// # Example JSON
///
/// ```json
/// {
///   "profile": "tls",
///   "hosts": ["peer0.org1.example.com", "localhost"],
///   "label": "hsm-key-1",
///   "certificate_request": "-----BEGIN CERTIFICATE REQUEST-----\n..."
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Name of the signing profile. Absent selects the CA's default profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Subject alternative names to include in the issued certificate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    /// Label of the key in a hardware security module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// PEM-encoded PKCS#10 certificate signing request.
    ///
    /// Always present in the body, serialized as `null` if no CSR was attached.
    pub certificate_request: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_keeps_null_certificate_request() {
        let body = serde_json::to_string(&Enrollment::default()).unwrap();
        assert_eq!(body, r#"{"certificate_request":null}"#);
    }

    #[test]
    fn missing_hosts_deserialize_as_empty() {
        let body: Enrollment =
            serde_json::from_str(r#"{"label":"","certificate_request":"PEM"}"#).unwrap();

        assert!(body.hosts.is_empty());
        assert_eq!(body.label.as_deref(), Some(""));
        assert_eq!(body.profile, None);
        assert_eq!(body.certificate_request.as_deref(), Some("PEM"));
    }
}
