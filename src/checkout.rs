//! The checkout workflow: shipping form, coupon verification and order
//! submission. Validation runs entirely locally before anything is sent,
//! and a new address is persisted only once its order went through — a
//! failed order leaves no orphan address behind.

use crate::gateway::{DataGateway, IdentityGateway};
use crate::models::{AddressDraft, AddressType, OrderDraft, OrderStatus, PaymentMethod};
use crate::store::Store;
use regex::Regex;
use std::sync::OnceLock;

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{10}$").expect("valid phone pattern"))
}

fn zip_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{6}$").expect("valid zip pattern"))
}

/// Shipping details as typed into the checkout form.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Which address the shopper is checking out with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddressChoice {
    #[default]
    Unselected,
    /// A saved address, by id; its fields were copied into the form.
    Saved(String),
    /// Typed fresh in the form; saved after the order succeeds.
    New,
}

/// Result of the last coupon check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CouponStatus {
    #[default]
    Unchecked,
    /// Holds the distributor's display name.
    Valid(String),
    Invalid,
}

/// One checkout attempt. Created when the shopper enters checkout and
/// discarded after `submit` (or abandonment); it owns no remote state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    pub form: CheckoutForm,
    pub address_choice: AddressChoice,
    pub coupon_input: String,
    pub coupon_status: CouponStatus,
    pub payment_method: Option<PaymentMethod>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a saved address into the form and records the choice.
    pub fn select_saved_address<G>(&mut self, store: &Store<G>, address_id: &str) -> bool
    where
        G: DataGateway + IdentityGateway,
    {
        let Some(address) = store.addresses().iter().find(|a| a.id == address_id) else {
            return false;
        };
        self.form.name = address.name.clone();
        self.form.phone = address.phone.clone();
        self.form.street = address.street.clone();
        self.form.city = address.city.clone();
        self.form.state = address.state.clone();
        self.form.zip = address.zip.clone();
        self.address_choice = AddressChoice::Saved(address_id.to_string());
        true
    }

    /// Switches to a hand-typed address, clearing whatever a saved
    /// selection had filled in.
    pub fn choose_new_address(&mut self) {
        self.form = CheckoutForm {
            email: std::mem::take(&mut self.form.email),
            ..CheckoutForm::default()
        };
        self.address_choice = AddressChoice::New;
    }

    /// Verifies the typed coupon against the active distributor list. The
    /// result is advisory; submit stores whatever was typed either way.
    pub fn check_coupon<G>(&mut self, store: &Store<G>)
    where
        G: DataGateway + IdentityGateway,
    {
        let code = self.coupon_input.trim();
        if code.is_empty() {
            self.coupon_status = CouponStatus::Unchecked;
            return;
        }
        self.coupon_status = match store.get_distributor_by_coupon(code) {
            Some(d) => CouponStatus::Valid(d.name.clone()),
            None => CouponStatus::Invalid,
        };
    }

    /// Local-only validation; the returned messages are ready to display.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.form.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.form.phone.trim().is_empty() {
            errors.push("Phone number is required".to_string());
        } else if !phone_pattern().is_match(self.form.phone.trim()) {
            errors.push("Phone number must be 10 digits".to_string());
        }
        if self.form.street.trim().is_empty() {
            errors.push("Street address is required".to_string());
        }
        if self.form.city.trim().is_empty() {
            errors.push("City is required".to_string());
        }
        if self.form.zip.trim().is_empty() {
            errors.push("PIN code is required".to_string());
        } else if !zip_pattern().is_match(self.form.zip.trim()) {
            errors.push("PIN code must be 6 digits".to_string());
        }
        errors
    }

    /// Places the order. Everything local is checked first; nothing is
    /// sent for an empty cart or an invalid form. Returns the order id.
    pub async fn submit<G>(&mut self, store: &mut Store<G>) -> Option<String>
    where
        G: DataGateway + IdentityGateway,
    {
        if store.cart().is_empty() {
            store.notices.error("Your cart is empty");
            return None;
        }
        let errors = self.validate();
        if !errors.is_empty() {
            for error in errors {
                store.notices.error(error);
            }
            return None;
        }

        let form = &self.form;
        let address = format!(
            "{}, {}, {} - {}",
            form.street.trim(),
            form.city.trim(),
            form.state.trim(),
            form.zip.trim()
        );
        let coupon = self.coupon_input.trim();
        let draft = OrderDraft {
            customer_name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: match form.email.trim() {
                "" => store.user().map(|u| u.username.clone()),
                typed => Some(typed.to_string()),
            },
            address,
            items: store.cart().items().to_vec(),
            total: store.cart_total(),
            status: OrderStatus::New,
            coupon_code: (!coupon.is_empty()).then(|| coupon.to_string()),
            payment_method: self.payment_method.unwrap_or(PaymentMethod::Cod),
        };

        let order_id = store.add_order(draft).await?;

        // Persist the typed address only now that the order exists.
        if self.address_choice == AddressChoice::New && store.user().is_some() {
            let draft = AddressDraft {
                name: form.name.trim().to_string(),
                street: form.street.trim().to_string(),
                city: form.city.trim().to_string(),
                state: form.state.trim().to_string(),
                zip: form.zip.trim().to_string(),
                phone: form.phone.trim().to_string(),
                kind: AddressType::Home,
                is_default: false,
            };
            if store.add_address(draft).await.is_none() {
                log::warn!("Order {order_id} placed but its address was not saved");
            }
        }

        Some(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{collections, MemoryGateway};
    use crate::models::{Distributor, Product, Role, StockLevel, User};
    use crate::store::Store;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            price,
            description: String::new(),
            detailed_description: String::new(),
            image: String::new(),
            category: "Electronics".into(),
            stock: StockLevel::InStock,
            variants: None,
            specifications: None,
        }
    }

    fn filled_session() -> CheckoutSession {
        let mut session = CheckoutSession::new();
        session.form = CheckoutForm {
            name: "Asha".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            street: "1 Main St".into(),
            city: "Pune".into(),
            state: "MH".into(),
            zip: "411001".into(),
        };
        session.address_choice = AddressChoice::New;
        session
    }

    #[tokio::test]
    async fn test_happy_path_places_order_with_flattened_address() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 2);

        let mut session = filled_session();
        let id = session.submit(&mut store).await.expect("order id");

        let order = &store.orders()[0];
        assert_eq!(order.id, id);
        assert_eq!(order.total, 200.0);
        assert_eq!(order.address, "1 Main St, Pune, MH - 411001");
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_short_circuits() {
        let mut store = Store::new(MemoryGateway::new(), None);
        let mut session = filled_session();
        assert!(session.submit(&mut store).await.is_none());
        assert!(store.gateway().rows(collections::ORDERS).is_empty());
    }

    #[tokio::test]
    async fn test_nine_digit_phone_rejected_before_any_write() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 1);

        let mut session = filled_session();
        session.form.phone = "987654321".into();
        assert!(session.submit(&mut store).await.is_none());

        assert!(store.gateway().rows(collections::ORDERS).is_empty());
        assert_eq!(store.cart().len(), 1);
        let notices = store.take_notices();
        assert!(notices.iter().any(|n| n.message.contains("10 digits")));
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let session = CheckoutSession::new();
        let errors = session.validate();
        assert!(errors.iter().any(|e| e.contains("Name")));
        assert!(errors.iter().any(|e| e.contains("Phone")));
        assert!(errors.iter().any(|e| e.contains("Street")));
        assert!(errors.iter().any(|e| e.contains("City")));
        assert!(errors.iter().any(|e| e.contains("PIN")));
    }

    #[tokio::test]
    async fn test_coupon_check_is_case_insensitive_and_advisory() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 1);
        store.distributors.push(Distributor {
            id: "dist-1".into(),
            name: "Rajesh Traders".into(),
            email: "r@example.com".into(),
            phone: "9876543210".into(),
            coupon_code: "RAJ1234".into(),
            is_active: true,
        });

        let mut session = filled_session();
        session.coupon_input = "raj1234".into();
        session.check_coupon(&store);
        assert_eq!(
            session.coupon_status,
            CouponStatus::Valid("Rajesh Traders".into())
        );

        // The stored code is the typed string, not the canonical one.
        session.submit(&mut store).await.unwrap();
        assert_eq!(store.orders()[0].coupon_code.as_deref(), Some("raj1234"));
    }

    #[tokio::test]
    async fn test_invalid_coupon_does_not_block_submission() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 1);

        let mut session = filled_session();
        session.coupon_input = "NOPE123".into();
        session.check_coupon(&store);
        assert_eq!(session.coupon_status, CouponStatus::Invalid);
        assert!(session.submit(&mut store).await.is_some());
    }

    #[tokio::test]
    async fn test_failed_order_saves_no_address() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.user = Some(User {
            id: "user-1".into(),
            username: "asha@example.com".into(),
            name: Some("Asha".into()),
            role: Role::Customer,
            distributor_id: None,
        });
        store.add_to_cart(product("prod_1", 100.0), 1);
        store.gateway().set_failing(collections::ORDERS, true);

        let mut session = filled_session();
        assert!(session.submit(&mut store).await.is_none());
        assert!(store.gateway().rows(collections::ADDRESSES).is_empty());
    }

    #[tokio::test]
    async fn test_successful_order_saves_new_address_for_signed_in_user() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.user = Some(User {
            id: "user-1".into(),
            username: "asha@example.com".into(),
            name: Some("Asha".into()),
            role: Role::Customer,
            distributor_id: None,
        });
        store.add_to_cart(product("prod_1", 100.0), 1);

        let mut session = filled_session();
        assert!(session.submit(&mut store).await.is_some());

        // The new-address path persists automatically for a signed-in
        // shopper, and never as the default.
        let rows = store.gateway().rows(collections::ADDRESSES);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["street"], "1 Main St");
        assert_eq!(rows[0]["isDefault"], false);
    }

    #[tokio::test]
    async fn test_saved_address_choice_persists_nothing_new() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.user = Some(User {
            id: "user-1".into(),
            username: "asha@example.com".into(),
            name: Some("Asha".into()),
            role: Role::Customer,
            distributor_id: None,
        });
        let id = store
            .add_address(crate::models::AddressDraft {
                name: "Asha".into(),
                street: "2 Elm Rd".into(),
                city: "Mumbai".into(),
                state: "MH".into(),
                zip: "400001".into(),
                phone: "9123456780".into(),
                kind: AddressType::Work,
                is_default: true,
            })
            .await
            .unwrap();
        store.add_to_cart(product("prod_1", 100.0), 1);

        let mut session = CheckoutSession::new();
        assert!(session.select_saved_address(&store, &id));
        assert!(session.submit(&mut store).await.is_some());
        assert_eq!(store.gateway().rows(collections::ADDRESSES).len(), 1);
    }

    #[tokio::test]
    async fn test_saved_address_selection_fills_the_form() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.user = Some(User {
            id: "user-1".into(),
            username: "asha@example.com".into(),
            name: Some("Asha".into()),
            role: Role::Customer,
            distributor_id: None,
        });
        let id = store
            .add_address(crate::models::AddressDraft {
                name: "Asha".into(),
                street: "2 Elm Rd".into(),
                city: "Mumbai".into(),
                state: "MH".into(),
                zip: "400001".into(),
                phone: "9123456780".into(),
                kind: AddressType::Work,
                is_default: true,
            })
            .await
            .unwrap();

        let mut session = CheckoutSession::new();
        assert!(session.select_saved_address(&store, &id));
        assert_eq!(session.form.city, "Mumbai");
        assert_eq!(session.address_choice, AddressChoice::Saved(id));

        session.choose_new_address();
        assert!(session.form.city.is_empty());
        assert_eq!(session.address_choice, AddressChoice::New);
    }
}
