use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use elitebazar_core::{
    config::Config,
    gateway::RestGateway,
    storage::CartStore,
    store::Store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().map_err(|e| anyhow::anyhow!("{e}"))?;

    let gateway = RestGateway::new(config.gateway.clone());
    let cart_store = CartStore::new(&config.storage.cart_path);
    let mut store = Store::new(gateway, Some(cart_store));

    log::info!("Fetching storefront data from {}", config.gateway.base_url);
    store.fetch_public_data().await;

    log::info!(
        "Storefront ready: {} products, {} banners, {} distributors, {} rewards",
        store.products().len(),
        store.banners().len(),
        store.distributors().len(),
        store.rewards().len()
    );

    for notice in store.take_notices() {
        log::info!("[notice] {:?}: {}", notice.level, notice.message);
    }

    Ok(())
}
