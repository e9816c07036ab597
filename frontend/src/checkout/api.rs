use gloo_net::http::{Request, Response};
use log::error;
use serde::{Deserialize, Serialize};

use super::models::{CreateOrderRequest, DonationOrder, PaymentVerification};
use super::service::PaymentsBackend;
use super::CheckoutError;
use crate::config::PaymentsConfig;

pub const CREATE_ORDER_PATH: &str = "/create-order";
pub const VERIFY_PATH: &str = "/verify";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while processing payment.";

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pulls the backend's `{"error": "..."}` message out of a failed response body.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpPaymentsBackend {
    config: PaymentsConfig,
}

impl HttpPaymentsBackend {
    pub fn new(config: PaymentsConfig) -> Self {
        Self { config }
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, CheckoutError> {
        let endpoint = self.config.endpoint(path)?;
        let response = Request::post(&endpoint)
            .header("Content-Type", "application/json")
            .json(body)?
            .send()
            .await?;
        Ok(response)
    }
}

async fn error_message(response: Response) -> String {
    match response.text().await {
        Ok(body) => extract_error_message(&body),
        Err(_) => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

impl PaymentsBackend for HttpPaymentsBackend {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<DonationOrder, CheckoutError> {
        let response = self.post(CREATE_ORDER_PATH, request).await?;
        if !response.ok() {
            let status = response.status();
            let message = error_message(response).await;
            error!("create-order failed with status {}: {}", status, message);
            return Err(CheckoutError::OrderCreation(message));
        }

        response.json::<DonationOrder>().await.map_err(|e| {
            error!("Failed to parse donation order: {}", e);
            CheckoutError::OrderCreation(GENERIC_ERROR_MESSAGE.to_string())
        })
    }

    async fn verify_order(&self, verification: &PaymentVerification) -> Result<(), CheckoutError> {
        let response = self.post(VERIFY_PATH, verification).await?;
        if !response.ok() {
            let status = response.status();
            let message = error_message(response).await;
            error!("verify failed with status {}: {}", status, message);
            return Err(CheckoutError::Verification(message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::models::{Currency, Rupees};
    use futures::executor::block_on;

    #[test]
    fn error_message_comes_from_body() {
        assert_eq!(
            extract_error_message(r#"{"error":"campaign not found"}"#),
            "campaign not found"
        );
    }

    #[test]
    fn unreadable_error_body_falls_back_to_generic_message() {
        assert_eq!(extract_error_message("<html>502</html>"), GENERIC_ERROR_MESSAGE);
        assert_eq!(extract_error_message("{}"), GENERIC_ERROR_MESSAGE);
        assert_eq!(extract_error_message(r#"{"error":null}"#), GENERIC_ERROR_MESSAGE);
        assert_eq!(extract_error_message(""), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn missing_base_url_fails_before_any_request() {
        let backend = HttpPaymentsBackend::new(PaymentsConfig::from_values(None, None, None));
        let request = CreateOrderRequest {
            amount: Rupees(500),
            currency: Currency::Inr,
            donor_name: None,
            donor_email: None,
            donor_phone: None,
            campaign_id: None,
        };

        let err = block_on(backend.create_order(&request)).unwrap_err();
        assert_eq!(err, CheckoutError::Configuration("PAYMENT_API_BASE_URL"));

        let verification = PaymentVerification {
            order_id: "o1".into(),
            payment_id: "pay_1".into(),
            signature: "sig".into(),
        };
        let err = block_on(backend.verify_order(&verification)).unwrap_err();
        assert_eq!(err.to_string(), "Missing PAYMENT_API_BASE_URL in environment.");
    }
}
