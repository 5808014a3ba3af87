//! JSON API payloads.
//!
//! Not intended to be used directly. Provided to aid debugging.

use std::fmt;

use serde::{
    de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

mod authorization;

pub use self::authorization::{Authorization, AuthorizationStatus, Deactivation};

/// Error document returned by the ACME server for any status >= 400.
///
/// See [RFC 8555 §6.7](https://datatracker.ietf.org/doc/html/rfc8555#section-6.7).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Problem {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub _type: Option<String>,

    /// Human readable explanation. Empty when the server leaves it out or sends `null`.
    pub detail: String,
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [ty, detail] = StringMembers::new(["type", "detail"]).deserialize(deserializer)?;

        Ok(Problem {
            _type: ty,
            detail: detail.unwrap_or_default(),
        })
    }
}

impl Problem {
    /// Returns true if problem type is "badNonce".
    pub fn is_bad_nonce(&self) -> bool {
        self._type
            .as_deref()
            .is_some_and(|ty| ty.ends_with(":badNonce"))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self._type {
            Some(ty) => write!(f, "{ty}: {}", self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

/// Reads the string members of a JSON object, leniently.
///
/// Keys match `names` regardless of ASCII case and a later key overrides an earlier one. A
/// `null` member stays unset, and a top-level `null` leaves every member unset. Other keys
/// are skipped.
struct StringMembers<const N: usize> {
    names: [&'static str; N],
}

impl<const N: usize> StringMembers<N> {
    fn new(names: [&'static str; N]) -> Self {
        StringMembers { names }
    }
}

impl<'de, const N: usize> DeserializeSeed<'de> for StringMembers<N> {
    type Value = [Option<String>; N];

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de, const N: usize> Visitor<'de> for StringMembers<N> {
    type Value = [Option<String>; N];

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(std::array::from_fn(|_| None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visit_none()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut values: [Option<String>; N] = std::array::from_fn(|_| None);

        while let Some(key) = map.next_key::<String>()? {
            let idx = self
                .names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(&key));

            match idx {
                Some(idx) => {
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        values[idx] = Some(value);
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_without_type() {
        let problem = serde_json::from_str::<Problem>(r#"{"detail":"malformed request"}"#).unwrap();
        assert_eq!(problem.detail, "malformed request");
        assert_eq!(problem._type, None);
        assert_eq!(problem.to_string(), "malformed request");
    }

    #[test]
    fn test_problem_with_type() {
        let problem = serde_json::from_str::<Problem>(
            r#"{"type":"urn:acme:error:badNonce","detail":"JWS has invalid anti-replay nonce","status":400}"#,
        )
        .unwrap();
        assert!(problem.is_bad_nonce());
        assert_eq!(
            problem.to_string(),
            "urn:acme:error:badNonce: JWS has invalid anti-replay nonce"
        );
    }

    #[test]
    fn test_problem_defaults_detail() {
        let problem = serde_json::from_str::<Problem>("{}").unwrap();
        assert_eq!(problem.detail, "");
        assert!(!problem.is_bad_nonce());
    }

    #[test]
    fn test_problem_rejects_non_string_detail() {
        assert!(serde_json::from_str::<Problem>(r#"{"detail":5}"#).is_err());
        assert!(serde_json::from_str::<Problem>(r#"["detail"]"#).is_err());
        assert!(serde_json::from_str::<Problem>(r#""detail""#).is_err());
    }

    #[test]
    fn test_problem_null_and_case_folded_members() {
        let problem = serde_json::from_str::<Problem>(r#"{"type":null,"detail":null}"#).unwrap();
        assert_eq!(problem, Problem::default());

        let problem = serde_json::from_str::<Problem>("null").unwrap();
        assert_eq!(problem, Problem::default());

        let problem =
            serde_json::from_str::<Problem>(r#"{"Type":"urn:acme:error:badNonce","DETAIL":"x"}"#)
                .unwrap();
        assert!(problem.is_bad_nonce());
        assert_eq!(problem.detail, "x");

        // a null member does not clear an earlier value
        let problem =
            serde_json::from_str::<Problem>(r#"{"detail":"first","Detail":null}"#).unwrap();
        assert_eq!(problem.detail, "first");

        let problem =
            serde_json::from_str::<Problem>(r#"{"detail":"first","Detail":"second"}"#).unwrap();
        assert_eq!(problem.detail, "second");
    }
}
