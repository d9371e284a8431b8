use serde::{Deserialize, Serialize};

/// Closed role set; authoritative for portal access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Distributor,
    Customer,
}

impl Role {
    /// Landing path for a signed-in user of this role.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Distributor => "/distributor",
            Role::Customer => "/",
        }
    }
}

/// The signed-in application user, resolved from a session plus its
/// profile row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// The account email.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<String>,
}

/// Row in the `profiles` collection, keyed by the identity user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<String>,
}

impl From<Profile> for User {
    fn from(p: Profile) -> Self {
        User {
            id: p.id,
            username: p.email,
            name: p.name,
            role: p.role,
            distributor_id: p.distributor_id,
        }
    }
}

/// Admin-console view of a customer-role profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<&Profile> for Customer {
    fn from(p: &Profile) -> Self {
        Customer {
            id: p.id.clone(),
            name: p.name.clone().unwrap_or_else(|| "Unnamed".to_string()),
            email: p.email.clone(),
            phone: None,
            address: None,
        }
    }
}
