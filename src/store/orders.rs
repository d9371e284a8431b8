//! Order actions. `add_order` is the sole shopper-side write path into the
//! orders collection; everything after creation is a partial update.

use crate::gateway::{collections, DataGateway, Filter, IdentityGateway};
use crate::models::{Order, OrderDraft, OrderPatch, OrderStatus};
use crate::store::Store;
use crate::utils::generate_record_id;
use chrono::Utc;
use serde_json::Value;

impl<G: DataGateway + IdentityGateway> Store<G> {
    /// Stamps a generated id and the current timestamp onto the draft,
    /// persists it, prepends it to the cached order list and clears the
    /// cart. Returns the new order id, or `None` on failure with the cart
    /// left untouched.
    pub async fn add_order(&mut self, draft: OrderDraft) -> Option<String> {
        let order = Order {
            id: generate_record_id("order"),
            date: Utc::now(),
            customer_name: draft.customer_name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            items: draft.items,
            total: draft.total,
            status: draft.status,
            coupon_code: draft.coupon_code,
            spin_reward: None,
            payment_method: draft.payment_method,
            user_id: self.user.as_ref().map(|u| u.id.clone()),
        };

        let row = match serde_json::to_value(&order) {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to serialize order: {e}");
                self.notices.error("Failed to place order. Please try again.");
                return None;
            }
        };

        match self.gateway.insert(collections::ORDERS, row).await {
            Ok(()) => {
                let id = order.id.clone();
                // Email sending is a logged stub.
                if let Some(email) = &order.email {
                    log::info!("[email] order confirmation queued for {email}");
                }
                self.orders.insert(0, order);
                self.clear_cart();
                Some(id)
            }
            Err(e) => {
                log::error!("Order failed: {e}");
                self.notices.error("Failed to place order. Please try again.");
                None
            }
        }
    }

    pub async fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> bool {
        let applied = self
            .patch_order(order_id, OrderPatch::status(status))
            .await;
        if applied {
            self.notices
                .success(format!("Order status updated to {}", status.as_str()));
        } else {
            self.notices.error("Failed to update status");
        }
        applied
    }

    pub async fn update_order(&mut self, order_id: &str, patch: OrderPatch) -> bool {
        let applied = self.patch_order(order_id, patch).await;
        if applied {
            self.notices.success("Order updated");
        } else {
            self.notices.error("Failed to update order");
        }
        applied
    }

    /// Attaches the spin reward to an order exactly once: a non-empty
    /// `spinReward` — cached or already persisted — refuses the write, so
    /// revisiting the confirmation view cannot overwrite the first spin.
    pub async fn attach_spin_reward(&mut self, order_id: &str, label: &str) -> bool {
        let already_claimed = match self.orders.iter().find(|o| o.id == order_id) {
            Some(order) => order.spin_reward.is_some(),
            // Not in cache (fresh reload): check the persisted row.
            None => match self
                .gateway
                .select(collections::ORDERS, &[Filter::eq("id", order_id)])
                .await
            {
                Ok(rows) => rows
                    .first()
                    .map(|r| !r.get("spinReward").unwrap_or(&Value::Null).is_null())
                    .unwrap_or(false),
                Err(e) => {
                    log::error!("Failed to check spin reward for {order_id}: {e}");
                    self.notices.error("Failed to update order");
                    return false;
                }
            },
        };

        if already_claimed {
            self.notices
                .warning("A reward was already claimed for this order");
            return false;
        }

        self.update_order(order_id, OrderPatch::spin_reward(label))
            .await
    }

    /// Remote partial update; the cache is only touched after success.
    async fn patch_order(&mut self, order_id: &str, patch: OrderPatch) -> bool {
        let changes = match serde_json::to_value(&patch) {
            Ok(changes) => changes,
            Err(e) => {
                log::error!("Failed to serialize order patch: {e}");
                return false;
            }
        };
        match self
            .gateway
            .update(collections::ORDERS, &[Filter::eq("id", order_id)], changes)
            .await
        {
            Ok(()) => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) {
                    patch.apply_to(order);
                }
                true
            }
            Err(e) => {
                log::error!("Failed to update order {order_id}: {e}");
                false
            }
        }
    }
}
