use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory the embedded key-value store lives in.
    pub data_path: String,
    /// Seed the catalog with the starter listings when it is empty.
    pub seed_sample_listings: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_path =
            std::env::var("MARKET_DATA_PATH").unwrap_or_else(|_| "data/market".into());
        let seed_sample_listings = std::env::var("MARKET_SEED_SAMPLES")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);
        Ok(Self {
            data_path,
            seed_sample_listings,
        })
    }
}
