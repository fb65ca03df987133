//! Request bodies and query strings, with the checks each one needs before
//! anything touches the database.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::api::error::ValidationError;
use crate::api::extract::is_falsy;
use crate::db::models::{NewUser, UserChanges};

/// One text field of a JSON body.
///
/// Falsy values (`null`, `""`, `0`, `false`, `[]`, `{}`) read as absent, so
/// they fail the required-field checks rather than the type check.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Field {
    #[default]
    Absent,
    Text(String),
    Unsupported,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            v if is_falsy(&v) => Field::Absent,
            Value::String(s) => Field::Text(s),
            _ => Field::Unsupported,
        })
    }
}

impl Field {
    fn into_text(self) -> Result<Option<String>, ValidationError> {
        match self {
            Field::Absent => Ok(None),
            Field::Text(s) => Ok(Some(s)),
            Field::Unsupported => Err(ValidationError::InvalidJson),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Field::Absent
        } else {
            Field::Text(value.to_string())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Field,
    #[serde(default)]
    pub email: Field,
    #[serde(default)]
    pub password: Field,
}

impl CreateUserRequest {
    /// Fields are checked in the order name, email, password and the first
    /// absent one is reported.
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        Ok(NewUser {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            password: required("password", self.password)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Field,
    #[serde(default)]
    pub email: Field,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserChanges, ValidationError> {
        let (name, email) = both(self.name, self.email, ValidationError::NameAndEmailRequired)?;
        Ok(UserChanges { name, email })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Field,
    #[serde(default)]
    pub password: Field,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, ValidationError> {
        let (email, password) = both(self.email, self.password, ValidationError::CredentialsRequired)?;
        Ok(Credentials { email, password })
    }
}

#[derive(Debug, Default)]
pub struct SearchQuery {
    pub name: Option<String>,
}

impl SearchQuery {
    /// Takes the first `name` parameter; later repeats are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let name = pairs
            .into_iter()
            .find(|(key, _)| key == "name")
            .map(|(_, value)| value);
        Self { name }
    }

    pub fn validate(self) -> Result<String, ValidationError> {
        self.name
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingSearchName)
    }
}

fn required(field: &'static str, value: Field) -> Result<String, ValidationError> {
    value.into_text()?.ok_or(ValidationError::MissingField(field))
}

/// A missing field wins over a badly typed one, matching the create order.
fn both(
    first: Field,
    second: Field,
    missing: ValidationError,
) -> Result<(String, String), ValidationError> {
    if first == Field::Absent || second == Field::Absent {
        return Err(missing);
    }
    match (first.into_text()?, second.into_text()?) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_falsy_field_values_read_as_absent() {
        for raw in ["null", "0", "false", "\"\"", "[]", "{}"] {
            let field: Field = serde_json::from_str(raw).unwrap();
            assert_eq!(field, Field::Absent, "{raw}");
        }
        assert_eq!(
            serde_json::from_str::<Field>("\"Ann\"").unwrap(),
            Field::Text("Ann".to_string())
        );
        assert_eq!(serde_json::from_str::<Field>("5").unwrap(), Field::Unsupported);
        assert_eq!(serde_json::from_str::<Field>("true").unwrap(), Field::Unsupported);
    }

    #[test]
    fn test_create_reports_first_missing_field() {
        let req: CreateUserRequest = body(r#"{"name":"Ann"}"#);
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::MissingField("email")
        );

        let req = CreateUserRequest {
            name: "".into(),
            email: "a@x.com".into(),
            password: "p1".into(),
        };
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::MissingField("name")
        );
    }

    #[test]
    fn test_create_falsy_values_are_missing() {
        for raw in ["0", "false", "null"] {
            let req: CreateUserRequest =
                body(&format!(r#"{{"name":{raw},"email":"a@x.com","password":"p1"}}"#));
            assert_eq!(
                req.validate().unwrap_err(),
                ValidationError::MissingField("name"),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_create_checks_order_before_types() {
        let req: CreateUserRequest = body(r#"{"name":"","email":5,"password":"p1"}"#);
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::MissingField("name")
        );

        let req: CreateUserRequest = body(r#"{"name":"Ann","email":5,"password":"p1"}"#);
        assert_eq!(req.validate().unwrap_err(), ValidationError::InvalidJson);
    }

    #[test]
    fn test_create_accepts_complete_request() {
        let req: CreateUserRequest = body(r#"{"name":"Ann","email":"a@x.com","password":"p1"}"#);
        let user = req.validate().unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.password, "p1");
    }

    #[test]
    fn test_update_needs_both_fields() {
        let req: UpdateUserRequest = body(r#"{"name":"Ann","email":""}"#);
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::NameAndEmailRequired
        );

        let req: UpdateUserRequest = body(r#"{"name":5,"email":false}"#);
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::NameAndEmailRequired
        );

        let req: UpdateUserRequest = body(r#"{"name":"Ann","email":"a@x.com"}"#);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_needs_both_fields() {
        for json in [
            r#"{"email":"a@x.com"}"#,
            r#"{"email":"a@x.com","password":""}"#,
            r#"{"email":"","password":"p1"}"#,
            r#"{"email":"a@x.com","password":0}"#,
            r#"{"email":null,"password":"p1"}"#,
        ] {
            let req: LoginRequest = body(json);
            assert_eq!(
                req.validate().unwrap_err(),
                ValidationError::CredentialsRequired,
                "{json}"
            );
        }
    }

    #[test]
    fn test_search_rejects_empty_name() {
        assert_eq!(
            SearchQuery { name: Some(String::new()) }.validate().unwrap_err(),
            ValidationError::MissingSearchName
        );
        assert_eq!(
            SearchQuery { name: Some("An".to_string()) }.validate().unwrap(),
            "An"
        );
    }

    #[test]
    fn test_search_takes_first_name() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("name".to_string(), "An".to_string()),
            ("name".to_string(), "Bo".to_string()),
        ];
        assert_eq!(SearchQuery::from_pairs(pairs).validate().unwrap(), "An");
        assert_eq!(
            SearchQuery::from_pairs(Vec::new()).validate().unwrap_err(),
            ValidationError::MissingSearchName
        );
    }
}
