use async_trait::async_trait;
use roomstay_core::{GatewayError, ProviderRefundStatus, RefundGateway};
use roomstay_shared::Money;
use tracing::info;

/// Mock refund gateway used until the provider's refund API client lands.
/// Accepts every refund and reports it as settled.
pub struct MockRefundGateway;

#[async_trait]
impl RefundGateway for MockRefundGateway {
    async fn refund(
        &self,
        payment_id: &str,
        amount: Money,
    ) -> Result<ProviderRefundStatus, GatewayError> {
        info!(payment_id, amount = %amount, "mock refund issued");
        Ok(ProviderRefundStatus::Succeeded)
    }
}
