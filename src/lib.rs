pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod routing;
pub mod spin;
pub mod storage;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
