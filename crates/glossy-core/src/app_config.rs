use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Bounds both the preflight TCP probe and the real connection attempt.
    pub db_connect_timeout_ms: u64,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_pages_per_store: u32,
    pub scraper_inter_page_delay_ms: u64,
    pub scraper_inter_store_delay_ms: u64,
    /// Classification label stamped on every record in a run; not derived
    /// from the page.
    pub scraper_category: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("db_connect_timeout_ms", &self.db_connect_timeout_ms)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_pages_per_store", &self.scraper_pages_per_store)
            .field(
                "scraper_inter_page_delay_ms",
                &self.scraper_inter_page_delay_ms,
            )
            .field(
                "scraper_inter_store_delay_ms",
                &self.scraper_inter_store_delay_ms,
            )
            .field("scraper_category", &self.scraper_category)
            .finish()
    }
}
