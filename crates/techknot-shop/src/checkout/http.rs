//! Gateway that charges through a processor's HTTP API.

use crate::checkout::{CheckoutRequest, PaymentError, PaymentGateway, PaymentReceipt};
use crate::ids::OrderId;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Header carrying the idempotency key.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

#[derive(Debug, Deserialize)]
struct ChargeResponse {
    order_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// POSTs the checkout request as JSON to a charge endpoint.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Send `Authorization: Bearer <key>` with every charge.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn charge(&self, request: &CheckoutRequest) -> Result<PaymentReceipt, PaymentError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(IDEMPOTENCY_HEADER, request.idempotency_key.as_str())
            .json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PaymentError::Timeout
            } else {
                PaymentError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;
        debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            idempotency_key = %request.idempotency_key,
            "gateway responded"
        );

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        let parsed: ChargeResponse =
            serde_json::from_str(&body).map_err(|e| PaymentError::Malformed(e.to_string()))?;
        if parsed.order_id.trim().is_empty() {
            return Err(PaymentError::Malformed("empty order_id".to_string()));
        }

        Ok(PaymentReceipt {
            order_id: OrderId::new(parsed.order_id),
            amount: request.amount(),
            idempotency_key: request.idempotency_key.clone(),
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Map a non-2xx response to a payment error.
fn classify_failure(status: StatusCode, body: &str) -> PaymentError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    match status {
        StatusCode::PAYMENT_REQUIRED => PaymentError::Declined(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            PaymentError::Validation(message)
        }
        _ => PaymentError::Gateway {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined() {
        let err = classify_failure(StatusCode::PAYMENT_REQUIRED, r#"{"message":"card declined"}"#);
        assert_eq!(err, PaymentError::Declined("card declined".to_string()));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_validation_uses_error_field() {
        let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, r#"{"error":"bad total"}"#);
        assert_eq!(err, PaymentError::Validation("bad total".to_string()));
    }

    #[test]
    fn test_server_error_is_transient() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        assert_eq!(
            err,
            PaymentError::Gateway {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_builder() {
        let gateway = HttpGateway::new("https://payments.example.com/charges").with_api_key("sk");
        assert_eq!(gateway.endpoint(), "https://payments.example.com/charges");
        assert_eq!(gateway.name(), "http");
    }
}
