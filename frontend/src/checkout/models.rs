use serde::{Deserialize, Serialize};
use std::fmt;

use super::CheckoutError;

pub const DEFAULT_CHECKOUT_NAME: &str = "Thafheemul Quran";
pub const DEFAULT_CHECKOUT_DESCRIPTION: &str = "Donation";
pub const THEME_COLOR: &str = "#0d9ba8";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
}

/// Whole rupees. This is the unit the create-order endpoint takes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Rupees(pub u64);

/// Paise, the minor unit. The backend answers in this unit and the widget is charged in it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Paise(pub u64);

impl Rupees {
    /// Validates a donor-entered amount against `minimum` and `maximum`.
    pub fn from_amount(amount: f64, minimum: Rupees, maximum: Rupees) -> Result<Rupees, CheckoutError> {
        if amount.is_nan() || amount < minimum.0 as f64 {
            return Err(CheckoutError::Validation(format!(
                "Minimum donation amount is {}.",
                minimum
            )));
        }
        if amount > maximum.0 as f64 {
            return Err(CheckoutError::Validation(format!(
                "Maximum donation amount is {}.",
                maximum
            )));
        }
        if amount.fract() != 0.0 {
            return Err(CheckoutError::Validation(
                "Please enter a whole rupee amount.".to_string(),
            ));
        }
        Ok(Rupees(amount as u64))
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

/// Donor details as typed into the donation form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonorInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl DonorInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    pub fn email(&self) -> Option<String> {
        non_blank(&self.email)
    }

    pub fn phone(&self) -> Option<String> {
        non_blank(&self.phone)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: Rupees,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
}

/// An order created by the backend for exactly one checkout attempt.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationOrder {
    pub order_id: String,
    pub amount: Paise,
    pub currency: Currency,
    #[serde(rename = "keyId")]
    pub provider_key_id: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Payload of the widget's success callback.
#[derive(Deserialize, Clone, Debug)]
pub struct RazorpayPaymentResponse {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

impl From<RazorpayPaymentResponse> for PaymentVerification {
    fn from(response: RazorpayPaymentResponse) -> Self {
        Self {
            order_id: response.razorpay_order_id,
            payment_id: response.razorpay_payment_id,
            signature: response.razorpay_signature,
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Prefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Theme {
    pub color: String,
}

/// Widget configuration. The handler and modal callbacks are attached by the widget binding.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WidgetOptions {
    pub key: String,
    pub amount: Paise,
    pub currency: Currency,
    pub order_id: String,
    pub name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

/// How a widget session ended, as seen by the single continuation in `launch_checkout`.
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetEvent {
    Completed(PaymentVerification),
    PaymentFailed,
    Dismissed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAX: Rupees = Rupees(10_000_000);

    #[test]
    fn amount_below_minimum_is_rejected() {
        for amount in [0.0, 0.5, -10.0, f64::NAN, f64::NEG_INFINITY] {
            let err = Rupees::from_amount(amount, Rupees(1), MAX).unwrap_err();
            assert_eq!(err.to_string(), "Minimum donation amount is ₹1.");
        }
        assert!(matches!(
            Rupees::from_amount(99.0, Rupees(100), MAX),
            Err(CheckoutError::Validation(_))
        ));
    }

    #[test]
    fn amount_above_maximum_is_rejected() {
        for amount in [1e25, f64::INFINITY, 10_000_001.0] {
            assert_eq!(
                Rupees::from_amount(amount, Rupees(1), MAX),
                Err(CheckoutError::Validation(
                    "Maximum donation amount is ₹10000000.".to_string()
                ))
            );
        }
        assert_eq!(Rupees::from_amount(10_000_000.0, Rupees(1), MAX), Ok(MAX));
    }

    #[test]
    fn fractional_amount_is_rejected() {
        assert_eq!(
            Rupees::from_amount(10.5, Rupees(1), MAX),
            Err(CheckoutError::Validation(
                "Please enter a whole rupee amount.".to_string()
            ))
        );
        assert_eq!(Rupees::from_amount(1.0, Rupees(1), MAX), Ok(Rupees(1)));
    }

    #[test]
    fn create_order_request_omits_missing_donor_fields() {
        let donor = DonorInfo {
            name: "A".into(),
            email: " ".into(),
            phone: String::new(),
        };
        let request = CreateOrderRequest {
            amount: Rupees(500),
            currency: Currency::Inr,
            donor_name: donor.name(),
            donor_email: donor.email(),
            donor_phone: donor.phone(),
            campaign_id: Some("general-support".into()),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"amount": 500, "currency": "INR", "donorName": "A", "campaignId": "general-support"})
        );
    }

    #[test]
    fn order_and_payment_response_use_wire_names() {
        let order: DonationOrder = serde_json::from_value(
            json!({"orderId": "o1", "amount": 50000, "currency": "INR", "keyId": "k1"}),
        )
        .unwrap();
        assert_eq!(order.amount, Paise(50000));
        assert_eq!(order.provider_key_id, "k1");

        let response: RazorpayPaymentResponse = serde_json::from_value(json!({
            "razorpay_payment_id": "pay_1",
            "razorpay_order_id": "o1",
            "razorpay_signature": "sig"
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(PaymentVerification::from(response)).unwrap(),
            json!({"orderId": "o1", "paymentId": "pay_1", "signature": "sig"})
        );
    }
}
