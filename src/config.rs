use std::net::SocketAddr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_secure: bool,
    pub session_idle_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://roommeet.db".to_owned(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_secure: false,
            session_idle_minutes: 60,
        }
    }
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();
        let mut config = Config::default();

        if let Ok(url) = dotenv::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(addr) = dotenv::var("BIND_ADDR") {
            config.bind_addr = addr.parse().context("BIND_ADDR is not a socket address")?;
        }
        if let Ok(secure) = dotenv::var("SESSION_SECURE") {
            config.session_secure = secure.parse().context("SESSION_SECURE must be true or false")?;
        }
        if let Ok(minutes) = dotenv::var("SESSION_IDLE_MINUTES") {
            config.session_idle_minutes = minutes.parse().context("SESSION_IDLE_MINUTES must be a number")?;
        }

        Ok(config)
    }
}
