//! Wishlist actions; signed-in users only.

use crate::gateway::{collections, DataGateway, Filter, IdentityGateway};
use crate::store::Store;
use serde_json::json;

impl<G: DataGateway + IdentityGateway> Store<G> {
    pub async fn add_to_wishlist(&mut self, product_id: &str) -> bool {
        let Some(user) = self.user.clone() else {
            self.notices.error("Please login to use wishlist");
            return false;
        };
        if self.wishlist.iter().any(|id| id == product_id) {
            return true;
        }
        match self
            .gateway
            .insert(
                collections::WISHLIST,
                json!({ "user_id": user.id, "productId": product_id }),
            )
            .await
        {
            Ok(()) => {
                self.wishlist.push(product_id.to_string());
                self.notices.success("Added to wishlist");
                true
            }
            Err(e) => {
                log::error!("Failed to add to wishlist: {e}");
                self.notices.error("Failed to add to wishlist");
                false
            }
        }
    }

    pub async fn remove_from_wishlist(&mut self, product_id: &str) -> bool {
        let Some(user) = self.user.clone() else {
            return false;
        };
        match self
            .gateway
            .delete(
                collections::WISHLIST,
                &[
                    Filter::eq("user_id", user.id),
                    Filter::eq("productId", product_id),
                ],
            )
            .await
        {
            Ok(()) => {
                self.wishlist.retain(|id| id != product_id);
                self.notices.success("Removed from wishlist");
                true
            }
            Err(e) => {
                log::error!("Failed to remove from wishlist: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::{collections, MemoryGateway};
    use crate::models::{Role, User};
    use crate::notify::NoticeLevel;
    use crate::store::Store;

    fn signed_in_store() -> Store<MemoryGateway> {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.user = Some(User {
            id: "user-1".into(),
            username: "asha@example.com".into(),
            name: None,
            role: Role::Customer,
            distributor_id: None,
        });
        store
    }

    #[tokio::test]
    async fn test_signed_out_add_is_a_noop_with_notice() {
        let mut store = Store::new(MemoryGateway::new(), None);
        assert!(!store.add_to_wishlist("prod_1").await);
        assert!(store.wishlist().is_empty());

        let notices = store.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.contains("login"));
    }

    #[tokio::test]
    async fn test_add_then_remove_round_trip() {
        let mut store = signed_in_store();
        assert!(store.add_to_wishlist("prod_1").await);
        assert_eq!(store.wishlist(), ["prod_1".to_string()]);
        assert_eq!(store.gateway().rows(collections::WISHLIST).len(), 1);

        assert!(store.remove_from_wishlist("prod_1").await);
        assert!(store.wishlist().is_empty());
        assert!(store.gateway().rows(collections::WISHLIST).is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_add_is_idempotent() {
        let mut store = signed_in_store();
        assert!(store.add_to_wishlist("prod_1").await);
        assert!(store.add_to_wishlist("prod_1").await);
        assert_eq!(store.wishlist().len(), 1);
        assert_eq!(store.gateway().rows(collections::WISHLIST).len(), 1);
    }
}
