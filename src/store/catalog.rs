//! Admin-side catalog and content management: products, banners, the
//! spin-wheel reward list, and the about/contact page configs.

use crate::gateway::{collections, DataGateway, Filter, IdentityGateway};
use crate::models::{AboutPageConfig, BannerItem, ContactPageConfig, Product, Reward};
use crate::store::Store;
use crate::utils::generate_record_id;
use serde_json::json;

impl<G: DataGateway + IdentityGateway> Store<G> {
    pub async fn add_product(&mut self, product: Product) -> bool {
        let row = match serde_json::to_value(&product) {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to serialize product: {e}");
                return false;
            }
        };
        match self.gateway.insert(collections::PRODUCTS, row).await {
            Ok(()) => {
                self.products.push(product);
                self.notices.success("Product added successfully");
                true
            }
            Err(e) => {
                log::error!("Failed to add product: {e}");
                self.notices.error("Failed to add product");
                false
            }
        }
    }

    /// Full-row replace; the admin console always submits the whole form.
    pub async fn update_product(&mut self, id: &str, updated: Product) -> bool {
        let changes = match serde_json::to_value(&updated) {
            Ok(changes) => changes,
            Err(e) => {
                log::error!("Failed to serialize product: {e}");
                return false;
            }
        };
        match self
            .gateway
            .update(collections::PRODUCTS, &[Filter::eq("id", id)], changes)
            .await
        {
            Ok(()) => {
                if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
                    *product = updated;
                }
                self.notices.success("Product updated");
                true
            }
            Err(e) => {
                log::error!("Failed to update product {id}: {e}");
                self.notices.error("Failed to update product");
                false
            }
        }
    }

    pub async fn delete_product(&mut self, id: &str) -> bool {
        match self
            .gateway
            .delete(collections::PRODUCTS, &[Filter::eq("id", id)])
            .await
        {
            Ok(()) => {
                self.products.retain(|p| p.id != id);
                self.notices.success("Product deleted");
                true
            }
            Err(e) => {
                log::error!("Failed to delete product {id}: {e}");
                self.notices.error("Failed to delete product");
                false
            }
        }
    }

    /// Replaces the banner set: upserts every submitted banner and deletes
    /// the ones no longer present.
    pub async fn update_banners(&mut self, banners: Vec<BannerItem>) -> bool {
        for banner in &banners {
            let row = match serde_json::to_value(banner) {
                Ok(row) => row,
                Err(e) => {
                    log::error!("Failed to serialize banner: {e}");
                    return false;
                }
            };
            if let Err(e) = self.gateway.upsert(collections::BANNERS, row).await {
                log::error!("Failed to upsert banner {}: {e}", banner.id);
                self.notices.error("Failed to update banners");
                return false;
            }
        }
        let keep: Vec<&str> = banners.iter().map(|b| b.id.as_str()).collect();
        for removed in self.banners.iter().filter(|b| !keep.contains(&b.id.as_str())) {
            if let Err(e) = self
                .gateway
                .delete(collections::BANNERS, &[Filter::eq("id", removed.id.clone())])
                .await
            {
                log::error!("Failed to delete banner {}: {e}", removed.id);
                self.notices.error("Failed to update banners");
                return false;
            }
        }
        self.banners = banners;
        self.notices.success("Banners updated");
        true
    }

    pub async fn update_about_page_config(&mut self, config: AboutPageConfig) -> bool {
        self.upsert_page_config("about", config).await
    }

    pub async fn update_contact_page_config(&mut self, config: ContactPageConfig) -> bool {
        self.upsert_page_config("contact", config).await
    }

    async fn upsert_page_config<T: serde::Serialize>(&mut self, key: &str, config: T) -> bool {
        let value = match serde_json::to_value(&config) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Failed to serialize {key} page config: {e}");
                return false;
            }
        };
        match self
            .gateway
            .upsert(collections::PAGE_CONFIGS, json!({ "key": key, "value": value }))
            .await
        {
            Ok(()) => {
                match key {
                    "about" => {
                        if let Ok(config) = serde_json::from_value(value) {
                            self.about_config = config;
                        }
                    }
                    "contact" => {
                        if let Ok(config) = serde_json::from_value(value) {
                            self.contact_config = config;
                        }
                    }
                    _ => {}
                }
                self.notices.success(format!("{key} page updated"));
                true
            }
            Err(e) => {
                log::error!("Failed to update {key} page config: {e}");
                self.notices.error(format!("Failed to update {key} page"));
                false
            }
        }
    }

    /// Adds a spin-wheel reward; the id is stamped here.
    pub async fn add_reward(&mut self, label: &str, color: &str, text_color: &str) -> bool {
        let reward = Reward {
            id: generate_record_id("reward"),
            label: label.to_string(),
            color: color.to_string(),
            text_color: text_color.to_string(),
        };
        let row = match serde_json::to_value(&reward) {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to serialize reward: {e}");
                return false;
            }
        };
        match self.gateway.insert(collections::REWARDS, row).await {
            Ok(()) => {
                self.rewards.push(reward);
                self.notices.success("Reward added");
                true
            }
            Err(e) => {
                log::error!("Failed to add reward: {e}");
                self.notices.error("Failed to add reward");
                false
            }
        }
    }

    pub async fn remove_reward(&mut self, id: &str) -> bool {
        match self
            .gateway
            .delete(collections::REWARDS, &[Filter::eq("id", id)])
            .await
        {
            Ok(()) => {
                self.rewards.retain(|r| r.id != id);
                self.notices.success("Reward removed");
                true
            }
            Err(e) => {
                log::error!("Failed to remove reward {id}: {e}");
                self.notices.error("Failed to remove reward");
                false
            }
        }
    }
}
