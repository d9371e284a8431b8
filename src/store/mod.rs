//! The store state container: the single source of truth every UI surface
//! reads from, and the only path through which domain state is mutated.
//! Constructed once at startup with its gateway and handed to whatever
//! serves the UI — there is no ambient singleton.

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod distributors;
pub mod orders;
pub mod seed;
pub mod wishlist;

pub use distributors::DistributorReport;

use crate::gateway::{collections, AuthEvent, DataGateway, Filter, IdentityGateway};
use crate::models::{
    AboutPageConfig, Address, BannerItem, Cart, ContactPageConfig, Customer, Distributor, Order,
    Product, Profile, Reward, Role, User,
};
use crate::notify::{Notice, NoticeQueue};
use crate::storage::CartStore;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct Store<G> {
    gateway: G,

    // In-memory cache; mutated only after the corresponding remote call
    // succeeded, never optimistically.
    pub(crate) products: Vec<Product>,
    pub(crate) cart: Cart,
    pub(crate) orders: Vec<Order>,
    pub(crate) distributors: Vec<Distributor>,
    pub(crate) customers: Vec<Customer>,
    pub(crate) users: Vec<User>,
    pub(crate) wishlist: Vec<String>,
    pub(crate) addresses: Vec<Address>,
    pub(crate) banners: Vec<BannerItem>,
    pub(crate) rewards: Vec<Reward>,
    pub(crate) about_config: AboutPageConfig,
    pub(crate) contact_config: ContactPageConfig,
    pub(crate) user: Option<User>,

    pub(crate) notices: NoticeQueue,
    cart_store: Option<CartStore>,
}

impl<G: DataGateway + IdentityGateway> Store<G> {
    /// The durable cart (if any) is read once here; everything else waits
    /// for the startup fetches.
    pub fn new(gateway: G, cart_store: Option<CartStore>) -> Self {
        let cart = cart_store.as_ref().map(|s| s.load()).unwrap_or_default();
        Self {
            gateway,
            products: Vec::new(),
            cart,
            orders: Vec::new(),
            distributors: Vec::new(),
            customers: Vec::new(),
            users: Vec::new(),
            wishlist: Vec::new(),
            addresses: Vec::new(),
            banners: Vec::new(),
            rewards: Vec::new(),
            about_config: AboutPageConfig::default(),
            contact_config: ContactPageConfig::default(),
            user: None,
            notices: NoticeQueue::new(),
            cart_store,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // --- startup fetches ---

    /// Loads everything a signed-out visitor can see. Individual fetch
    /// failures are logged and leave that slice of the cache untouched.
    pub async fn fetch_public_data(&mut self) {
        match self.gateway.select(collections::PRODUCTS, &[]).await {
            Ok(rows) if rows.is_empty() => {
                // Empty catalog: seed the defaults, then re-read.
                if let Err(e) = seed::seed_products_if_empty(&self.gateway).await {
                    log::error!("Failed to seed products: {e}");
                }
                if let Ok(rows) = self.gateway.select(collections::PRODUCTS, &[]).await {
                    self.products = deserialize_rows(rows, collections::PRODUCTS);
                }
            }
            Ok(rows) => self.products = deserialize_rows(rows, collections::PRODUCTS),
            Err(e) => log::error!("Failed to fetch products: {e}"),
        }

        match self.gateway.select(collections::BANNERS, &[]).await {
            Ok(rows) => self.banners = deserialize_rows(rows, collections::BANNERS),
            Err(e) => log::error!("Failed to fetch banners: {e}"),
        }

        // Distributors are public so coupon codes can be verified at
        // checkout without privileged access.
        match self.gateway.select(collections::DISTRIBUTORS, &[]).await {
            Ok(rows) => self.distributors = deserialize_rows(rows, collections::DISTRIBUTORS),
            Err(e) => log::error!("Failed to fetch distributors: {e}"),
        }

        match self.gateway.select(collections::REWARDS, &[]).await {
            Ok(rows) => self.rewards = deserialize_rows(rows, collections::REWARDS),
            Err(e) => log::error!("Failed to fetch rewards: {e}"),
        }

        match self.gateway.select(collections::PAGE_CONFIGS, &[]).await {
            Ok(rows) => self.apply_page_configs(rows),
            Err(e) => log::error!("Failed to fetch page configs: {e}"),
        }
    }

    /// Loads the signed-in user's private data, plus the admin console's
    /// profile roster when the user is an admin.
    pub async fn fetch_user_data(&mut self) {
        match self.gateway.select(collections::ORDERS, &[]).await {
            Ok(rows) => {
                let mut orders: Vec<Order> = deserialize_rows(rows, collections::ORDERS);
                orders.sort_by(|a, b| b.date.cmp(&a.date));
                self.orders = orders;
            }
            Err(e) => {
                log::error!("Failed to fetch orders: {e}");
                self.notices.error("Failed to load user data");
            }
        }

        match self.gateway.select(collections::ADDRESSES, &[]).await {
            Ok(rows) => self.addresses = deserialize_rows(rows, collections::ADDRESSES),
            Err(e) => log::error!("Failed to fetch addresses: {e}"),
        }

        match self.gateway.select(collections::WISHLIST, &[]).await {
            Ok(rows) => {
                self.wishlist = rows
                    .iter()
                    .filter_map(|r| r.get("productId").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect();
            }
            Err(e) => log::error!("Failed to fetch wishlist: {e}"),
        }

        if self.user.as_ref().map(|u| u.role) == Some(Role::Admin) {
            match self.gateway.select(collections::PROFILES, &[]).await {
                Ok(rows) => {
                    let profiles: Vec<Profile> = deserialize_rows(rows, collections::PROFILES);
                    self.customers = profiles
                        .iter()
                        .filter(|p| p.role == Role::Customer)
                        .map(Customer::from)
                        .collect();
                    self.users = profiles.into_iter().map(User::from).collect();
                }
                Err(e) => log::error!("Failed to fetch profiles: {e}"),
            }
        }
    }

    fn apply_page_configs(&mut self, rows: Vec<Value>) {
        for row in rows {
            let key = row.get("key").and_then(Value::as_str).unwrap_or_default();
            let value = row.get("value").cloned().unwrap_or(Value::Null);
            match key {
                "about" => match serde_json::from_value(value) {
                    Ok(config) => self.about_config = config,
                    Err(e) => log::warn!("Ignoring malformed about config: {e}"),
                },
                "contact" => match serde_json::from_value(value) {
                    Ok(config) => self.contact_config = config,
                    Err(e) => log::warn!("Ignoring malformed contact config: {e}"),
                },
                other => log::warn!("Unknown page config key: {other}"),
            }
        }
    }

    /// Applies an identity-state-change notification: resolves the session
    /// into an application user (via its profile row) or clears all private
    /// state on sign-out.
    pub async fn handle_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => {
                let user = self.resolve_user(&session.user_id, &session.email).await;
                self.user = Some(user);
                self.fetch_user_data().await;
            }
            AuthEvent::SignedOut => {
                self.user = None;
                self.wishlist.clear();
                self.addresses.clear();
                self.orders.clear();
            }
        }
    }

    /// Reads the profile row for an identity; missing profiles fall back to
    /// a bare customer-role user so a session is never unusable.
    pub(crate) async fn resolve_user(&self, user_id: &str, email: &str) -> User {
        let rows = self
            .gateway
            .select(collections::PROFILES, &[Filter::eq("id", user_id)])
            .await
            .unwrap_or_default();
        if let Some(row) = rows.into_iter().next() {
            match serde_json::from_value::<Profile>(row) {
                Ok(profile) => return User::from(profile),
                Err(e) => log::warn!("Malformed profile for {user_id}: {e}"),
            }
        }
        User {
            id: user_id.to_string(),
            username: email.to_string(),
            name: None,
            role: Role::Customer,
            distributor_id: None,
        }
    }

    // --- read surface ---

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Linear substring search over product name and description.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let query = query.trim();
        if query.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.matches_query(query))
            .collect()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders belonging to the current user, matched by email (legacy rows
    /// are not linked by user id).
    pub fn user_orders(&self) -> Vec<&Order> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        self.orders
            .iter()
            .filter(|o| o.email.as_deref() == Some(user.username.as_str()))
            .collect()
    }

    pub fn distributors(&self) -> &[Distributor] {
        &self.distributors
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn wishlist(&self) -> &[String] {
        &self.wishlist
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn banners(&self) -> &[BannerItem] {
        &self.banners
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn about_page_config(&self) -> &AboutPageConfig {
        &self.about_config
    }

    pub fn contact_page_config(&self) -> &ContactPageConfig {
        &self.contact_config
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Drains queued user-facing notices (the UI renders these as toasts).
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // --- internal helpers shared by the action modules ---

    pub(crate) fn persist_cart(&self) {
        if let Some(store) = &self.cart_store {
            store.save(&self.cart);
        }
    }
}

/// Deserializes gateway rows, skipping (and logging) malformed ones rather
/// than failing the whole fetch.
pub(crate) fn deserialize_rows<T: DeserializeOwned>(rows: Vec<Value>, collection: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping malformed {collection} row: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use serde_json::json;

    fn product_row(id: &str, price: f64) -> Value {
        json!({
            "id": id,
            "name": format!("Product {id}"),
            "price": price,
            "description": "",
            "category": "Electronics",
            "stock": "in-stock"
        })
    }

    #[tokio::test]
    async fn test_fetch_public_data_populates_caches() {
        let gateway = MemoryGateway::new();
        gateway.seed(collections::PRODUCTS, vec![product_row("prod_1", 100.0)]);
        gateway.seed(
            collections::DISTRIBUTORS,
            vec![json!({
                "id": "dist-1", "name": "Rajesh Traders", "email": "r@example.com",
                "phone": "9876543210", "couponCode": "RAJ1234", "isActive": true
            })],
        );

        let mut store = Store::new(gateway, None);
        store.fetch_public_data().await;

        assert_eq!(store.products().len(), 1);
        assert_eq!(store.distributors().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_public_data_seeds_empty_catalog() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.fetch_public_data().await;
        // The default six-product catalog was seeded and re-read.
        assert_eq!(store.products().len(), 6);
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let gateway = MemoryGateway::new();
        gateway.seed(
            collections::PRODUCTS,
            vec![product_row("prod_1", 100.0), json!({"id": "broken"})],
        );

        let mut store = Store::new(gateway, None);
        store.fetch_public_data().await;
        assert_eq!(store.products().len(), 1);
    }

    #[tokio::test]
    async fn test_page_configs_applied_by_key() {
        let gateway = MemoryGateway::new();
        gateway.seed(collections::PRODUCTS, vec![product_row("prod_1", 1.0)]);
        let about = serde_json::to_value(AboutPageConfig {
            hero_title: "About EliteBazar".into(),
            ..AboutPageConfig::default()
        })
        .unwrap();
        gateway.seed(
            collections::PAGE_CONFIGS,
            vec![json!({"key": "about", "value": about})],
        );

        let mut store = Store::new(gateway, None);
        store.fetch_public_data().await;
        assert_eq!(store.about_page_config().hero_title, "About EliteBazar");
    }

    #[tokio::test]
    async fn test_search_products_filters_by_substring() {
        let gateway = MemoryGateway::new();
        gateway.seed(
            collections::PRODUCTS,
            vec![product_row("prod_1", 100.0), product_row("prod_2", 50.0)],
        );
        let mut store = Store::new(gateway, None);
        store.fetch_public_data().await;

        assert_eq!(store.search_products("prod_1").len(), 1);
        assert_eq!(store.search_products("").len(), 2);
        assert!(store.search_products("no such thing").is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_event_clears_private_state() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.user = Some(User {
            id: "user-1".into(),
            username: "asha@example.com".into(),
            name: None,
            role: Role::Customer,
            distributor_id: None,
        });
        store.wishlist = vec!["prod_1".into()];

        store.handle_auth_event(AuthEvent::SignedOut).await;
        assert!(store.user().is_none());
        assert!(store.wishlist().is_empty());
    }
}
