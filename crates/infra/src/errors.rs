//! Conversions from external infrastructure errors into domain errors.

use omflow_domain::OmFlowError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OmFlowError);

impl From<InfraError> for OmFlowError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OmFlowError> for InfraError {
    fn from(value: OmFlowError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let detail = value.to_string();
        let error = if value.is_timeout() {
            OmFlowError::Network(format!("http request timed out: {detail}"))
        } else if value.is_connect() {
            OmFlowError::Network(format!("http connection failed: {detail}"))
        } else if value.is_builder() {
            OmFlowError::Internal(format!("http request could not be built: {detail}"))
        } else if value.is_decode() {
            OmFlowError::Query(format!("http response could not be decoded: {detail}"))
        } else {
            OmFlowError::Network(format!("http error: {detail}"))
        };
        InfraError(error)
    }
}
