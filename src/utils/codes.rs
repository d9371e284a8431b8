use rand::Rng;
use uuid::Uuid;

/// Synthesizes a distributor coupon code: the first three characters of the
/// name upper-cased plus a 4-digit random suffix, e.g. "RAJ4821".
pub fn generate_coupon_code(name: &str) -> String {
    let prefix: String = name.chars().take(3).collect::<String>().to_uppercase();
    let mut rng = rand::thread_rng();
    format!("{}{}", prefix, rng.gen_range(1000..=9999))
}

/// Generates a prefixed record id, e.g. "order-3f2b…". Prefixes match the
/// original backend rows ("order", "dist", "addr", "reward").
pub fn generate_record_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
