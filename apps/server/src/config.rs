use folio_core::constants::DEFAULT_BASE_CURRENCY;

/// Server configuration, read from `FOLIO_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Base currency all portfolio summaries are normalized into.
    pub base_currency: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("FOLIO_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            base_currency: std::env::var("FOLIO_BASE_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .ok()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string()),
        }
    }
}
