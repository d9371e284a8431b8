//! Cart actions. The cart is client-local: no remote calls, but every
//! mutation rewrites the durable cart file so it survives a restart.

use crate::gateway::{DataGateway, IdentityGateway};
use crate::models::Product;
use crate::store::Store;

impl<G: DataGateway + IdentityGateway> Store<G> {
    /// Merges into an existing line when the product is already in the
    /// cart. No stock check here; out-of-stock products are blocked in
    /// presentation before this is reachable.
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        self.cart.add(product, quantity);
        self.persist_cart();
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
        self.persist_cart();
        self.notices.success("Removed from cart");
    }

    /// Quantity <= 0 removes the line.
    pub fn update_cart_quantity(&mut self, product_id: &str, quantity: u32) {
        self.cart.update_quantity(product_id, quantity);
        self.persist_cart();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::MemoryGateway;
    use crate::models::{Product, StockLevel};
    use crate::storage::CartStore;
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

    #[test]
    fn test_repeated_adds_accumulate_one_line() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 1);
        store.add_to_cart(product("prod_1", 100.0), 2);
        store.add_to_cart(product("prod_1", 100.0), 4);

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().items()[0].quantity, 7);
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 2);
        store.update_cart_quantity("prod_1", 0);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_cart_survives_restart_via_cart_store() {
        let mut path = std::env::temp_dir();
        path.push(format!("elitebazar-cart-{}", uuid::Uuid::new_v4().simple()));

        {
            let mut store = Store::new(MemoryGateway::new(), Some(CartStore::new(&path)));
            store.add_to_cart(product("prod_1", 100.0), 3);
        }

        let store = Store::new(MemoryGateway::new(), Some(CartStore::new(&path)));
        assert_eq!(store.cart().items()[0].quantity, 3);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_cart_total_reflects_snapshot_prices() {
        let mut store = Store::new(MemoryGateway::new(), None);
        store.add_to_cart(product("prod_1", 100.0), 2);
        store.add_to_cart(product("prod_2", 50.0), 1);
        assert_eq!(store.cart_total(), 250.0);
    }
}
