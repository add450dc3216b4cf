use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Who authored a message.
///
/// `Other` carries caller bookkeeping entries (e.g. "note", "tool") that live in a
/// transcript but have no counterpart in a backend's role vocabulary. Providers never
/// produce it and never send it.
///
/// Serialized roles are plain strings, so an `Other` holding `"system"`, `"user"` or
/// `"assistant"` refuses to serialize: it would come back as the conversational role.
/// Use [`Role::from`] to build roles from names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(name) => name,
        }
    }

    fn is_reserved(name: &str) -> bool {
        matches!(name, "system" | "user" | "assistant")
    }

    /// Whether this is one of the three conversational roles.
    pub fn is_conversational(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Role::Other(name) if Role::is_reserved(name) => Err(S::Error::custom(format!(
                "'{}' is a conversational role and cannot be used as a custom role",
                name
            ))),
            role => serializer.serialize_str(role.as_str()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}
