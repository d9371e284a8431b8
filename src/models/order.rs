use crate::models::CartItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

/// Payment method is a stored label only — there is no gateway integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    Netbanking,
    Cod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Flattened shipping address ("street, city, state - zip").
    pub address: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin_reward: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default, rename = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Caller-supplied order fields; the store stamps id, date and user id on
/// top of these when persisting.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
}

/// Partial order update; only the fields the app ever mutates after
/// creation (status transitions and the one-time spin reward).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin_reward: Option<String>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn spin_reward(label: impl Into<String>) -> Self {
        Self {
            spin_reward: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn apply_to(&self, order: &mut Order) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(reward) = &self.spin_reward {
            order.spin_reward = Some(reward.clone());
        }
    }
}
