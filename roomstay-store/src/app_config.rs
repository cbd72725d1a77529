use chrono::Duration;
use roomstay_shared::{Currency, ExchangeRates};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub booking: BookingRules,
    /// Exchange rates per one KRW, keyed by currency code.
    pub exchange_rates: HashMap<String, f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    /// How long a guest's checkout hold blocks the room before lapsing.
    pub hold_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("ROOMSTAY").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn hold_duration(&self) -> Duration {
        Duration::seconds(self.booking.hold_seconds as i64)
    }

    /// Build the conversion table, rejecting unknown currency codes up
    /// front rather than at the first hold that needs them.
    pub fn exchange_rates(&self) -> Result<ExchangeRates, config::ConfigError> {
        let mut per_krw = HashMap::new();
        for (code, rate) in &self.exchange_rates {
            let currency = Currency::from_str(code).map_err(|e| {
                config::ConfigError::Message(format!("exchange_rates: {e}"))
            })?;
            per_krw.insert(currency, *rate);
        }
        Ok(ExchangeRates::new(per_krw))
    }
}
