use serde::Serialize;
use sqlx::FromRow;

/// A full row of the `users` table. Never serialized: the password stays
/// on the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The public projection of a user returned by every read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Validated input for an insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validated input for an update. Only name and email are mutable.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_drops_password() {
        let user = User {
            id: 3,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            password: "p1".to_string(),
        };

        let json = serde_json::to_value(UserSummary::from(user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "name": "Ann", "email": "a@x.com" })
        );
    }
}
