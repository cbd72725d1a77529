use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Currency units accepted by the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    Krw,
    Usd,
    Eur,
    Jpy,
    Cny,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Krw => "KRW",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
        }
    }

    /// Number of minor-unit digits (KRW and JPY have none).
    pub fn exponent(&self) -> u32 {
        match self {
            Currency::Krw | Currency::Jpy => 0,
            Currency::Usd | Currency::Eur | Currency::Cny => 2,
        }
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KRW" => Ok(Currency::Krw),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "JPY" => Ok(Currency::Jpy),
            "CNY" => Ok(Currency::Cny),
            other => Err(MoneyError::InvalidCurrency(other.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in a currency's minor units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Money {
    pub amount_minor: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Scale by a whole number of nights.
    pub fn times(&self, count: i64) -> Money {
        Money {
            amount_minor: self.amount_minor * count,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exp = self.currency.exponent();
        if exp == 0 {
            write!(f, "{} {}", self.amount_minor, self.currency)
        } else {
            let divisor = 10i64.pow(exp);
            write!(
                f,
                "{}.{:0width$} {}",
                self.amount_minor / divisor,
                (self.amount_minor % divisor).abs(),
                self.currency,
                width = exp as usize
            )
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MoneyError {
    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    #[error("No exchange rate available for {from} -> {to}")]
    RateUnavailable { from: Currency, to: Currency },
}

/// Conversion table, loaded once from configuration.
///
/// Rates are stored per currency as "units of this currency per one KRW";
/// any pair is converted through that base. The table is read-only for the
/// life of the process, so a hold's price snapshot can never drift with a
/// later rate update.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRates {
    per_krw: HashMap<Currency, f64>,
}

impl ExchangeRates {
    pub fn new(per_krw: HashMap<Currency, f64>) -> Self {
        Self { per_krw }
    }

    fn rate(&self, currency: Currency) -> Option<f64> {
        if currency == Currency::Krw {
            return Some(1.0);
        }
        self.per_krw.get(&currency).copied().filter(|r| *r > 0.0)
    }

    /// Convert an amount into `to`, rounding to the target's minor unit.
    pub fn convert(&self, money: Money, to: Currency) -> Result<Money, MoneyError> {
        if money.currency == to {
            return Ok(money);
        }
        let from_rate = self.rate(money.currency).ok_or(MoneyError::RateUnavailable {
            from: money.currency,
            to,
        })?;
        let to_rate = self.rate(to).ok_or(MoneyError::RateUnavailable {
            from: money.currency,
            to,
        })?;

        let from_scale = 10f64.powi(money.currency.exponent() as i32);
        let to_scale = 10f64.powi(to.exponent() as i32);
        let major = money.amount_minor as f64 / from_scale;
        let converted = major / from_rate * to_rate;
        Ok(Money {
            amount_minor: (converted * to_scale).round() as i64,
            currency: to,
        })
    }
}
