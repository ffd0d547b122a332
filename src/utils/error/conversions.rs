//! Type conversions for GatewayError

use super::types::GatewayError;
use crate::core::providers::ProviderError;
use crate::core::router::RouterError;

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        GatewayError::Provider(err)
    }
}

impl From<RouterError> for GatewayError {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::InvalidPayload(payload) => GatewayError::InvalidPayload(payload),
            failed @ RouterError::AllProvidersFailed { .. } => {
                GatewayError::AllProvidersFailed(failed.to_string())
            }
        }
    }
}
