//! Distributor management and coupon attribution. An order is linked to a
//! distributor only by the coupon-code string captured at checkout; the
//! report below re-joins them by string equality at query time.

use crate::gateway::{collections, DataGateway, Filter, IdentityGateway};
use crate::models::{Distributor, Order};
use crate::store::Store;
use crate::utils::generate_record_id;

/// Coupon-attributed sales summary for the partner portal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributorReport {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
}

impl<G: DataGateway + IdentityGateway> Store<G> {
    /// Case-insensitive match over the cached distributor list, restricted
    /// to active distributors. Deactivated partners never validate, even on
    /// an exact code match.
    pub fn get_distributor_by_coupon(&self, coupon_code: &str) -> Option<&Distributor> {
        self.distributors
            .iter()
            .find(|d| d.matches_coupon(coupon_code))
    }

    /// Orders attributed to this coupon code, exactly as stored — including
    /// orders placed before a later deactivation or rename.
    pub fn orders_for_coupon(&self, coupon_code: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.coupon_code.as_deref() == Some(coupon_code))
            .collect()
    }

    pub fn distributor_report(&self, coupon_code: &str) -> DistributorReport {
        let orders = self.orders_for_coupon(coupon_code);
        let total_revenue: f64 = orders.iter().map(|o| o.total).sum();
        let avg_order_value = if orders.is_empty() {
            0.0
        } else {
            total_revenue / orders.len() as f64
        };
        DistributorReport {
            total_orders: orders.len(),
            total_revenue,
            avg_order_value,
        }
    }

    /// Admin-side creation; new distributors start active.
    pub async fn add_distributor(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
        coupon_code: &str,
    ) -> bool {
        let distributor = Distributor {
            id: generate_record_id("dist"),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            coupon_code: coupon_code.to_string(),
            is_active: true,
        };
        let row = match serde_json::to_value(&distributor) {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to serialize distributor: {e}");
                return false;
            }
        };
        match self.gateway.insert(collections::DISTRIBUTORS, row).await {
            Ok(()) => {
                self.distributors.push(distributor);
                self.notices.success("Distributor added");
                true
            }
            Err(e) => {
                log::error!("Failed to add distributor: {e}");
                self.notices.error("Failed to add distributor");
                false
            }
        }
    }

    pub async fn update_distributor(&mut self, id: &str, updated: Distributor) -> bool {
        let changes = match serde_json::to_value(&updated) {
            Ok(changes) => changes,
            Err(e) => {
                log::error!("Failed to serialize distributor: {e}");
                return false;
            }
        };
        match self
            .gateway
            .update(collections::DISTRIBUTORS, &[Filter::eq("id", id)], changes)
            .await
        {
            Ok(()) => {
                if let Some(distributor) = self.distributors.iter_mut().find(|d| d.id == id) {
                    *distributor = updated;
                }
                self.notices.success("Distributor updated");
                true
            }
            Err(e) => {
                log::error!("Failed to update distributor {id}: {e}");
                self.notices.error("Failed to update distributor");
                false
            }
        }
    }

    pub async fn delete_distributor(&mut self, id: &str) -> bool {
        match self
            .gateway
            .delete(collections::DISTRIBUTORS, &[Filter::eq("id", id)])
            .await
        {
            Ok(()) => {
                self.distributors.retain(|d| d.id != id);
                self.notices.success("Distributor deleted");
                true
            }
            Err(e) => {
                log::error!("Failed to delete distributor {id}: {e}");
                self.notices.error("Failed to delete distributor");
                false
            }
        }
    }
}
