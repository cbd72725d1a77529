use async_trait::async_trait;
use roomstay_shared::Money;
use serde::{Deserialize, Serialize};

/// Status reported by the payment provider's callback/return. The raw
/// string is untrusted input; anything unrecognized is rejected upstream
/// rather than guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPaymentStatus {
    /// Captured and settled.
    Completed,
    /// Captured, settlement confirmation still outstanding.
    Processing,
    /// Provider-side failure; the guest may retry while the hold lives.
    Failed,
}

impl ProviderPaymentStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "DONE" | "PAID" | "COMPLETED" => Some(Self::Completed),
            "IN_PROGRESS" | "READY" | "PROCESSING" => Some(Self::Processing),
            "FAILED" | "ABORTED" | "CANCELED" | "CANCELLED" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderRefundStatus {
    Succeeded,
    Pending,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Refund provider unreachable: {0}")]
    Unreachable(String),
}

/// Outbound call to the payment provider's refund API.
#[async_trait]
pub trait RefundGateway: Send + Sync {
    async fn refund(
        &self,
        payment_id: &str,
        amount: Money,
    ) -> Result<ProviderRefundStatus, GatewayError>;
}
