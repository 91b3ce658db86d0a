//! Payment Provider Gateway
//!
//! The charge provider is an external collaborator; this seam covers the
//! intent-creation call the checkout flow needs. The stub stands in for
//! the real provider in development and tests.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::error::Result;
use crate::shared::tsid::TsidGenerator;

/// A provider-side charge intent awaiting client confirmation
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a charge intent for the given amount in minor units
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<PaymentIntent>;
}

pub struct StubGateway;

impl StubGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_intent(&self, _amount_minor: i64, _currency: &str) -> Result<PaymentIntent> {
        let id = format!("pi_{}", TsidGenerator::generate());
        let client_secret = format!("{}_secret_{}", id, TsidGenerator::generate());
        Ok(PaymentIntent { id, client_secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_intent_carries_secret_derived_from_id() {
        let intent = tokio_test::block_on(StubGateway::new().create_intent(4999, "usd")).unwrap();
        assert!(intent.id.starts_with("pi_"));
        assert!(intent.client_secret.starts_with(&intent.id));
    }
}
