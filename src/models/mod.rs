pub mod address;
pub mod cart;
pub mod content;
pub mod distributor;
pub mod order;
pub mod product;
pub mod reward;
pub mod user;

pub use address::{Address, AddressDraft, AddressType};
pub use cart::{Cart, CartItem};
pub use content::{AboutPageConfig, BannerItem, ContactPageConfig};
pub use distributor::Distributor;
pub use order::{Order, OrderDraft, OrderPatch, OrderStatus, PaymentMethod};
pub use product::{Product, StockLevel};
pub use reward::Reward;
pub use user::{Customer, Profile, Role, User};
