use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerItem {
    pub id: String,
    pub image: String,
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPageConfig {
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub story_content: String,
    #[serde(default)]
    pub values: Vec<ValueItem>,
}

impl Default for AboutPageConfig {
    fn default() -> Self {
        Self {
            hero_image:
                "https://images.unsplash.com/photo-1441986300917-64674bd600d8?q=80&w=2070&auto=format&fit=crop"
                    .into(),
            hero_title: "Our Story".into(),
            hero_subtitle: "Redefining the art of modern commerce.".into(),
            story_content: "Welcome to EliteBazar.".into(),
            values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub days: String,
    pub active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPageConfig {
    pub hero_image: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub hours: Vec<OpeningHours>,
    pub note: String,
}

impl Default for ContactPageConfig {
    fn default() -> Self {
        Self {
            hero_image: String::new(),
            hero_title: "Get in Touch".into(),
            hero_subtitle: "We're here to help.".into(),
            email: "support@elitebazar.com".into(),
            phone: "+1 (555) 123-4567".into(),
            address: "123 Fashion Ave".into(),
            hours: Vec::new(),
            note: "Contact us.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_config_round_trip() {
        let config = AboutPageConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("heroImage").is_some());
        assert!(value.get("storyContent").is_some());
        let back: AboutPageConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_contact_default_support_email() {
        assert_eq!(
            ContactPageConfig::default().email,
            "support@elitebazar.com"
        );
    }
}
