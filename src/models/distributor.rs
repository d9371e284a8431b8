use serde::{Deserialize, Serialize};

/// A distributor partner. The coupon code is the sole linkage between an
/// order and a distributor — attribution is a point-in-time string match,
/// never a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distributor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub coupon_code: String,
    pub is_active: bool,
}

impl Distributor {
    /// Case-insensitive coupon match, active distributors only.
    pub fn matches_coupon(&self, code: &str) -> bool {
        self.is_active && self.coupon_code.eq_ignore_ascii_case(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distributor(code: &str, active: bool) -> Distributor {
        Distributor {
            id: "dist-1".into(),
            name: "Rajesh Traders".into(),
            email: "rajesh@example.com".into(),
            phone: "9876543210".into(),
            coupon_code: code.into(),
            is_active: active,
        }
    }

    #[test]
    fn test_matches_coupon_case_insensitive() {
        let d = distributor("RAJ1234", true);
        assert!(d.matches_coupon("raj1234"));
        assert!(d.matches_coupon("RAJ1234"));
        assert!(!d.matches_coupon("RAJ9999"));
    }

    #[test]
    fn test_inactive_distributor_never_matches() {
        let d = distributor("RAJ1234", false);
        assert!(!d.matches_coupon("RAJ1234"));
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(distributor("RAJ1234", true)).unwrap();
        assert!(value.get("couponCode").is_some());
        assert!(value.get("isActive").is_some());
    }
}
