use num_bigint::BigUint;
use serde::Deserialize;
use serde_json::value::RawValue;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Size in bytes of a P-256 field element / scalar.
const FIELD_SIZE: usize = 32;

/// Account key as handed over in `LE_KEY`: the big integers of an EC private key.
///
/// Anything else in the object (a serialized `Curve`, for instance) is ignored.
#[derive(Deserialize)]
struct RawAccountKey<'a> {
    #[serde(borrow, alias = "X")]
    x: Option<&'a RawValue>,

    #[serde(borrow, alias = "Y")]
    y: Option<&'a RawValue>,

    #[serde(borrow, alias = "D")]
    d: Option<&'a RawValue>,
}

#[derive(Clone, Debug)]
pub(crate) struct AcmeKey {
    signing_key: p256::ecdsa::SigningKey,

    /// Account URL, when known. Requests are then signed with `kid` instead of `jwk`.
    key_id: Option<String>,
}

impl AcmeKey {
    pub(crate) fn from_json(json: &str) -> Result<AcmeKey> {
        let raw = serde_json::from_str::<RawAccountKey<'_>>(json)
            .map_err(|err| Error::KeyParse(err.to_string()))?;

        let x = field_bytes("X", raw.x)?;
        let y = field_bytes("Y", raw.y)?;
        let d = field_bytes("D", raw.d)?;

        let secret = p256::SecretKey::from_bytes(d.as_slice().into())
            .map_err(|_| Error::KeyParse("D is not a valid P-256 scalar".to_owned()))?;
        let signing_key = p256::ecdsa::SigningKey::from(secret);

        let point = signing_key.verifying_key().to_encoded_point(false);
        if point.x().map(|px| px.as_slice()) != Some(x.as_slice())
            || point.y().map(|py| py.as_slice()) != Some(y.as_slice())
        {
            return Err(Error::KeyParse(
                "public point (X, Y) does not belong to D".to_owned(),
            ));
        }

        Ok(Self::from_key(signing_key))
    }

    fn from_key(signing_key: p256::ecdsa::SigningKey) -> AcmeKey {
        AcmeKey {
            signing_key,
            key_id: None,
        }
    }

    pub(crate) fn signing_key(&self) -> &p256::ecdsa::SigningKey {
        &self.signing_key
    }

    pub(crate) fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub(crate) fn set_key_id(&mut self, kid: String) {
        self.key_id = Some(kid)
    }
}

fn field_bytes(name: &str, value: Option<&RawValue>) -> Result<Zeroizing<[u8; FIELD_SIZE]>> {
    let value = value
        .map(RawValue::get)
        .filter(|raw| *raw != "null")
        .ok_or_else(|| Error::KeyParse(format!("missing field {name}")))?;

    // accept `"123"` as well as the bare integer literal
    let digits = match value.strip_prefix('"') {
        Some(_) => Zeroizing::new(
            serde_json::from_str::<String>(value)
                .map_err(|err| Error::KeyParse(format!("{name}: {err}")))?,
        ),
        None => Zeroizing::new(value.to_owned()),
    };

    decimal_to_be_bytes(&digits)
        .ok_or_else(|| Error::KeyParse(format!("{name} is not a 256-bit unsigned integer")))
}

/// Converts an unsigned decimal integer into a fixed-width big-endian byte array.
///
/// Returns `None` for empty input, anything but ASCII digits, or values that do not fit.
fn decimal_to_be_bytes(digits: &str) -> Option<Zeroizing<[u8; FIELD_SIZE]>> {
    // `parse_bytes` also takes `_` separators and a sign
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value = BigUint::parse_bytes(digits.as_bytes(), 10)?;
    let bytes = Zeroizing::new(value.to_bytes_be());

    if bytes.len() > FIELD_SIZE {
        return None;
    }

    let mut out = Zeroizing::new([0u8; FIELD_SIZE]);
    out[FIELD_SIZE - bytes.len()..].copy_from_slice(&bytes);

    Some(out)
}
