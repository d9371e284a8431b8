use serde::{Deserialize, Serialize};

/// A cosmetic spin-wheel prize. No stock or limit semantics — the list is
/// purely what the wheel displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub label: String,
    pub color: String,
    pub text_color: String,
}

impl Reward {
    /// Synthetic reward used when no rewards are configured, so the wheel
    /// never has zero options.
    pub fn fallback() -> Self {
        Reward {
            id: "default".into(),
            label: "Bonus Gift".into(),
            color: "#18181b".into(),
            text_color: "#ffffff".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_reward_label() {
        assert_eq!(Reward::fallback().label, "Bonus Gift");
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(Reward::fallback()).unwrap();
        assert!(value.get("textColor").is_some());
    }
}
