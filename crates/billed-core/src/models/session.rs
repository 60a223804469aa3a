use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" => Ok(UserType::Employee),
            "admin" => Ok(UserType::Admin),
            _ => Err(anyhow::anyhow!("Invalid user type: {}", s)),
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UserType::Employee => write!(f, "Employee"),
            UserType::Admin => write!(f, "Admin"),
        }
    }
}

/// Locally persisted identity of the signed-in user.
///
/// Stored JSON-encoded under the `user` key. Views receive it explicitly
/// instead of reading it from the store themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
}

impl Session {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
            status: "connected".to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}
