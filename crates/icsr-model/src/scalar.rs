//! Scalar values carried by document tree attributes.
//!
//! Every layer stores its attributes in its own representation, but all of
//! them read and write through [`Scalar`], the layer-neutral form the
//! converter copies verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ScalarError;
use crate::null_flavor::NullFlavor;

/// Layer-neutral value of one scalar attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    NullFlavor(NullFlavor),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Integer(_) => "integer",
            Scalar::Decimal(_) => "decimal",
            Scalar::Text(_) => "text",
            Scalar::Uuid(_) => "uuid",
            Scalar::NullFlavor(_) => "null flavor",
        }
    }

    pub fn is_null_flavor(&self) -> bool {
        matches!(self, Scalar::NullFlavor(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Decimal(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
            Scalar::Uuid(value) => write!(f, "{value}"),
            Scalar::NullFlavor(flavor) => write!(f, "{flavor}"),
        }
    }
}

/// Exact decimal kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decimal(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (unsigned, None),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits_ok = !(whole.is_empty() && fraction.is_empty())
            && whole.chars().all(|c| c.is_ascii_digit())
            && fraction.chars().all(|c| c.is_ascii_digit());
        let exponent_ok = exponent.is_none_or(|exponent| {
            let exponent = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
            !exponent.is_empty() && exponent.chars().all(|c| c.is_ascii_digit())
        });
        if digits_ok && exponent_ok {
            Ok(Decimal(text.to_string()))
        } else {
            Err(format!("`{s}` is not a decimal number"))
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(value.to_string())
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(serde_json::Number),
            Text(String),
        }

        let text = match Repr::deserialize(deserializer)? {
            Repr::Number(number) => number.to_string(),
            Repr::Text(text) => text,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Value of an attribute that accepts a null flavor in place of a value.
///
/// Serialized tagged, as `{"value": ...}` or `{"null_flavor": "NI"}`, so text
/// that happens to spell a null flavor code stays text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nullable<T> {
    NullFlavor(NullFlavor),
    Value(T),
}

impl<T> Nullable<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            Nullable::NullFlavor(_) => None,
        }
    }

    pub fn null_flavor(&self) -> Option<NullFlavor> {
        match self {
            Nullable::NullFlavor(flavor) => Some(*flavor),
            Nullable::Value(_) => None,
        }
    }
}

/// Target of a drug-to-reaction link: a surrogate id or a correlation token.
///
/// The variants never compare equal to each other, so an id of `1` and a
/// token whose numeric form is `1` are distinct targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactionRef {
    Id(i64),
    Uuid(Uuid),
}

impl fmt::Display for ReactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionRef::Id(id) => write!(f, "{id}"),
            ReactionRef::Uuid(token) => write!(f, "{token}"),
        }
    }
}

impl From<i64> for ReactionRef {
    fn from(id: i64) -> Self {
        ReactionRef::Id(id)
    }
}

impl From<Uuid> for ReactionRef {
    fn from(token: Uuid) -> Self {
        ReactionRef::Uuid(token)
    }
}

/// A Rust type that stores one kind of [`Scalar`].
pub trait ScalarType: Sized {
    const TYPE_NAME: &'static str;

    fn to_scalar(&self) -> Scalar;

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError>;
}

impl ScalarType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Bool(value) => Ok(value),
            other => Err(ScalarError::mismatch(Self::TYPE_NAME, &other)),
        }
    }
}

impl ScalarType for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn to_scalar(&self) -> Scalar {
        Scalar::Integer(*self)
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Integer(value) => Ok(value),
            other => Err(ScalarError::mismatch(Self::TYPE_NAME, &other)),
        }
    }
}

impl ScalarType for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn to_scalar(&self) -> Scalar {
        Scalar::Decimal(self.clone())
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Decimal(value) => Ok(value),
            Scalar::Integer(value) => Ok(Decimal::from(value)),
            Scalar::Text(text) => text.parse().map_err(|reason| ScalarError::Invalid {
                expected: Self::TYPE_NAME,
                reason,
            }),
            other => Err(ScalarError::mismatch(Self::TYPE_NAME, &other)),
        }
    }
}

impl ScalarType for String {
    const TYPE_NAME: &'static str = "text";

    fn to_scalar(&self) -> Scalar {
        Scalar::Text(self.clone())
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Text(value) => Ok(value),
            Scalar::Decimal(value) => Ok(value.to_string()),
            Scalar::Uuid(token) => Ok(token.to_string()),
            other => Err(ScalarError::mismatch(Self::TYPE_NAME, &other)),
        }
    }
}

impl ScalarType for Uuid {
    const TYPE_NAME: &'static str = "uuid";

    fn to_scalar(&self) -> Scalar {
        Scalar::Uuid(*self)
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Uuid(token) => Ok(token),
            Scalar::Text(text) => Uuid::parse_str(&text).map_err(|error| ScalarError::Invalid {
                expected: Self::TYPE_NAME,
                reason: error.to_string(),
            }),
            other => Err(ScalarError::mismatch(Self::TYPE_NAME, &other)),
        }
    }
}

impl ScalarType for ReactionRef {
    const TYPE_NAME: &'static str = "reaction reference";

    fn to_scalar(&self) -> Scalar {
        match self {
            ReactionRef::Id(id) => Scalar::Integer(*id),
            ReactionRef::Uuid(token) => Scalar::Uuid(*token),
        }
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Integer(id) => Ok(ReactionRef::Id(id)),
            Scalar::Uuid(token) => Ok(ReactionRef::Uuid(token)),
            Scalar::Text(text) => Uuid::from_scalar(Scalar::Text(text)).map(ReactionRef::Uuid),
            other => Err(ScalarError::mismatch(Self::TYPE_NAME, &other)),
        }
    }
}

impl<T: ScalarType> ScalarType for Nullable<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn to_scalar(&self) -> Scalar {
        match self {
            Nullable::Value(value) => value.to_scalar(),
            Nullable::NullFlavor(flavor) => Scalar::NullFlavor(*flavor),
        }
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::NullFlavor(flavor) => Ok(Nullable::NullFlavor(flavor)),
            other => T::from_scalar(other).map(Nullable::Value),
        }
    }
}

/// How an entity field stores its scalar: read out as an optional
/// [`Scalar`], rebuilt from one.
pub trait ScalarField: Sized {
    const REQUIRED: bool = false;

    fn read(&self) -> Option<Scalar>;

    fn write(scalar: Option<Scalar>) -> Result<Self, ScalarError>;
}

impl<T: ScalarType> ScalarField for Option<T> {
    fn read(&self) -> Option<Scalar> {
        self.as_ref().map(ScalarType::to_scalar)
    }

    fn write(scalar: Option<Scalar>) -> Result<Self, ScalarError> {
        scalar.map(T::from_scalar).transpose()
    }
}

impl ScalarField for ReactionRef {
    const REQUIRED: bool = true;

    fn read(&self) -> Option<Scalar> {
        Some(self.to_scalar())
    }

    fn write(scalar: Option<Scalar>) -> Result<Self, ScalarError> {
        scalar
            .map(ReactionRef::from_scalar)
            .unwrap_or(Err(ScalarError::Missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_accepts_plain_and_exponent_forms() {
        for text in ["0", "-12.50", "+3.", ".5", "1e21", "2.5E-3"] {
            assert!(text.parse::<Decimal>().is_ok(), "{text}");
        }
        for text in ["", ".", "1.2.3", "abc", "1e", "--1"] {
            assert!(text.parse::<Decimal>().is_err(), "{text}");
        }
    }

    #[test]
    fn decimal_deserializes_from_number_or_string() {
        let from_number: Decimal = serde_json::from_str("72.5").unwrap();
        let from_text: Decimal = serde_json::from_str("\"72.50\"").unwrap();
        assert_eq!(from_number.as_str(), "72.5");
        assert_eq!(from_text.as_str(), "72.50");
    }

    #[test]
    fn null_flavor_is_rejected_by_plain_fields() {
        let error = <Option<String>>::write(Some(Scalar::NullFlavor(NullFlavor::Unk))).unwrap_err();
        assert_eq!(error, ScalarError::NullFlavorNotAccepted(NullFlavor::Unk));
    }

    #[test]
    fn nullable_fields_accept_values_and_flavors() {
        let value = <Option<Nullable<String>>>::write(Some(Scalar::Text("Smith".into()))).unwrap();
        let flavor = <Option<Nullable<String>>>::write(Some(Scalar::NullFlavor(NullFlavor::Msk))).unwrap();
        assert_eq!(value, Some(Nullable::Value("Smith".to_string())));
        assert_eq!(flavor, Some(Nullable::NullFlavor(NullFlavor::Msk)));
    }

    #[test]
    fn nullable_text_spelling_a_flavor_code_stays_text() {
        let text = Nullable::Value("NI".to_string());
        let flavor = Nullable::<String>::NullFlavor(NullFlavor::Ni);

        let text_json = serde_json::to_string(&text).unwrap();
        let flavor_json = serde_json::to_string(&flavor).unwrap();
        assert_eq!(text_json, r#"{"value":"NI"}"#);
        assert_eq!(flavor_json, r#"{"null_flavor":"NI"}"#);

        assert_eq!(serde_json::from_str::<Nullable<String>>(&text_json).unwrap(), text);
        assert_eq!(serde_json::from_str::<Nullable<String>>(&flavor_json).unwrap(), flavor);
    }

    #[test]
    fn uuid_tokens_survive_a_text_representation() {
        let token = Uuid::new_v4();
        let text = String::from_scalar(Scalar::Uuid(token)).unwrap();
        assert_eq!(Uuid::from_scalar(Scalar::Text(text)).unwrap(), token);
    }

    #[test]
    fn reaction_ref_is_required() {
        assert_eq!(ReactionRef::write(None), Err(ScalarError::Missing));
        assert_eq!(
            ReactionRef::write(Some(Scalar::Integer(3))),
            Ok(ReactionRef::Id(3))
        );
    }

    #[test]
    fn id_and_token_references_never_collide() {
        let token = Uuid::from_u128(1);
        assert_ne!(ReactionRef::Id(1), ReactionRef::Uuid(token));
    }
}
