pub mod clock;
pub mod money;

pub use clock::{Clock, SystemClock};
pub use money::{Currency, ExchangeRates, Money, MoneyError};
