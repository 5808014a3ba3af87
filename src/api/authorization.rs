use serde::{
    de::{value::StringDeserializer, DeserializeSeed, IntoDeserializer},
    Deserialize, Deserializer, Serialize,
};

use super::StringMembers;

/// The status of an authorization.
///
/// See [RFC 8555 §7.1.4].
///
/// [RFC 8555 §7.1.4]: https://datatracker.ietf.org/doc/html/rfc8555#section-7.1.4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Pending,
    Valid,
    Invalid,
    Deactivated,
    Expired,
    Revoked,

    /// Anything this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Request body asking the server to deactivate an authorization.
///
/// Serializes to `{"resource":"authz","status":"deactivated"}`. The `resource` field is what
/// ACME v1 servers dispatch on; RFC 8555 servers ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deactivation {
    resource: &'static str,
    status: AuthorizationStatus,
}

impl Deactivation {
    pub fn new() -> Self {
        Deactivation {
            resource: "authz",
            status: AuthorizationStatus::Deactivated,
        }
    }
}

impl Default for Deactivation {
    fn default() -> Self {
        Self::new()
    }
}

// {
//   "identifier": {
//     "type": "dns",
//     "value": "acmetest.algesten.se"
//   },
//   "status": "deactivated",
//   "expires": "2019-01-09T08:26:43Z",
//   "challenges": [ ... ]
// }
//
/// The part of an authorization object the server echoes back that this client looks at.
///
/// Only `status` matters, and even that may be missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorization {
    pub status: Option<AuthorizationStatus>,
}

impl<'de> Deserialize<'de> for Authorization {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [status] = StringMembers::new(["status"]).deserialize(deserializer)?;

        let status = match status {
            Some(status) => {
                let status: StringDeserializer<D::Error> = status.into_deserializer();
                Some(AuthorizationStatus::deserialize(status)?)
            }
            None => None,
        };

        Ok(Authorization { status })
    }
}

impl Authorization {
    pub fn is_pending(&self) -> bool {
        self.status == Some(AuthorizationStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deactivation_payload() {
        let json = serde_json::to_string(&Deactivation::new()).unwrap();
        assert_eq!(json, r#"{"resource":"authz","status":"deactivated"}"#);
    }

    #[test]
    fn test_authorization_status() {
        let authz = serde_json::from_str::<Authorization>(
            r#"{"identifier":{"type":"dns","value":"example.org"},"status":"pending"}"#,
        )
        .unwrap();
        assert!(authz.is_pending());

        let authz = serde_json::from_str::<Authorization>(r#"{"status":"deactivated"}"#).unwrap();
        assert_eq!(authz.status, Some(AuthorizationStatus::Deactivated));
        assert!(!authz.is_pending());

        let authz = serde_json::from_str::<Authorization>(r#"{"status":"Pending"}"#).unwrap();
        assert_eq!(authz.status, Some(AuthorizationStatus::Unknown));
        assert!(!authz.is_pending());

        let authz = serde_json::from_str::<Authorization>("{}").unwrap();
        assert_eq!(authz.status, None);
    }

    #[test]
    fn test_authorization_case_folded_and_null_status() {
        let authz = serde_json::from_str::<Authorization>(r#"{"Status":"pending"}"#).unwrap();
        assert!(authz.is_pending());

        let authz = serde_json::from_str::<Authorization>(r#"{"STATUS":"valid"}"#).unwrap();
        assert_eq!(authz.status, Some(AuthorizationStatus::Valid));

        let authz = serde_json::from_str::<Authorization>(r#"{"status":null}"#).unwrap();
        assert_eq!(authz.status, None);

        let authz = serde_json::from_str::<Authorization>("null").unwrap();
        assert_eq!(authz, Authorization::default());

        // the last matching key wins
        let authz =
            serde_json::from_str::<Authorization>(r#"{"status":"valid","Status":"pending"}"#)
                .unwrap();
        assert!(authz.is_pending());
    }

    #[test]
    fn test_authorization_rejects_non_string_status() {
        assert!(serde_json::from_str::<Authorization>(r#"{"status":3}"#).is_err());
        assert!(serde_json::from_str::<Authorization>(r#"{"Status":true}"#).is_err());
        assert!(serde_json::from_str::<Authorization>("[]").is_err());
    }
}
