pub mod codes;

pub use codes::{generate_coupon_code, generate_record_id};
