use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the remote backend, e.g. https://xyz.supabase.co
    pub base_url: String,
    /// Anonymous API key sent with every request.
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File the durable cart is persisted to.
    pub cart_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cart_path: "cart_v2.json".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Try the config file first; without one, fall back to environment variables.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }

                // The gateway URL and key are mandatory when no file exists.
                let base_url = get_env("GATEWAY_BASE_URL")
                    .ok_or("Missing GATEWAY_BASE_URL and no config.toml found")?;
                let api_key = get_env("GATEWAY_API_KEY")
                    .ok_or("Missing GATEWAY_API_KEY and no config.toml found")?;

                Config {
                    gateway: GatewayConfig { base_url, api_key },
                    storage: StorageConfig {
                        cart_path: get_env("CART_STORAGE_PATH")
                            .unwrap_or_else(|| "cart_v2.json".to_string()),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment variables override the file when both are present.
        if let Ok(v) = env::var("GATEWAY_BASE_URL") {
            config.gateway.base_url = v;
        }
        if let Ok(v) = env::var("GATEWAY_API_KEY") {
            config.gateway.api_key = v;
        }
        if let Ok(v) = env::var("CART_STORAGE_PATH") {
            config.storage.cart_path = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [gateway]
            base_url = "https://example.supabase.co"
            api_key = "anon-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.base_url, "https://example.supabase.co");
        assert_eq!(config.storage.cart_path, "cart_v2.json");
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [gateway]
            base_url = "https://example.supabase.co"
            api_key = "anon-key"

            [storage]
            cart_path = "/tmp/cart.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.cart_path, "/tmp/cart.json");
    }
}
