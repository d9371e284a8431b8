use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    #[serde(default, rename = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: AddressType,
    pub is_default: bool,
}

/// Address fields as entered; id and owner are stamped by the store.
#[derive(Debug, Clone)]
pub struct AddressDraft {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub kind: AddressType,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_wire_format() {
        let addr = Address {
            id: "addr-1".into(),
            user_id: Some("user-1".into()),
            name: "Asha".into(),
            street: "1 Main St".into(),
            city: "Pune".into(),
            state: "MH".into(),
            zip: "411001".into(),
            phone: "9876543210".into(),
            kind: AddressType::Home,
            is_default: true,
        };
        let value = serde_json::to_value(&addr).unwrap();
        assert_eq!(value["type"], "home");
        assert_eq!(value["isDefault"], true);
        assert_eq!(value["user_id"], "user-1");
    }
}
