use log::{error, info, warn};

use super::models::{
    CreateOrderRequest, Currency, DonationOrder, DonorInfo, PaymentVerification, Prefill, Rupees,
    Theme, WidgetEvent, WidgetOptions, DEFAULT_CHECKOUT_DESCRIPTION, DEFAULT_CHECKOUT_NAME,
    THEME_COLOR,
};
use super::CheckoutError;

pub const DISMISSED_MESSAGE: &str = "Payment popup closed before completion.";
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment failed. Please try again.";

/// The donation backend's create-order and verify endpoints.
#[allow(async_fn_in_trait)]
pub trait PaymentsBackend {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<DonationOrder, CheckoutError>;

    async fn verify_order(&self, verification: &PaymentVerification) -> Result<(), CheckoutError>;
}

/// The provider's hosted checkout widget.
#[allow(async_fn_in_trait)]
pub trait CheckoutWidget {
    /// Makes the provider available on the page.
    async fn load(&self) -> Result<(), CheckoutError>;

    /// Opens the widget and resolves once the donor's session with it has ended.
    async fn open(&self, options: WidgetOptions) -> Result<WidgetEvent, CheckoutError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaunchOptions {
    pub amount: Rupees,
    pub currency: Currency,
    pub donor: DonorInfo,
    pub campaign_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl LaunchOptions {
    pub fn new(amount: Rupees) -> Self {
        Self {
            amount,
            currency: Currency::default(),
            donor: DonorInfo::default(),
            campaign_id: None,
            name: None,
            description: None,
        }
    }

    fn order_request(&self) -> CreateOrderRequest {
        CreateOrderRequest {
            amount: self.amount,
            currency: self.currency,
            donor_name: self.donor.name(),
            donor_email: self.donor.email(),
            donor_phone: self.donor.phone(),
            campaign_id: self.campaign_id.clone(),
        }
    }

    // Amount, currency and order id come from the server's order, never from the request.
    fn widget_options(&self, order: &DonationOrder) -> WidgetOptions {
        WidgetOptions {
            key: order.provider_key_id.clone(),
            amount: order.amount,
            currency: order.currency,
            order_id: order.order_id.clone(),
            name: self
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_CHECKOUT_NAME.to_string()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_CHECKOUT_DESCRIPTION.to_string()),
            prefill: Prefill {
                name: self.donor.name(),
                email: self.donor.email(),
                contact: self.donor.phone(),
            },
            theme: Theme {
                color: THEME_COLOR.to_string(),
            },
        }
    }
}

/// Result of a checkout attempt that got as far as the widget.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutOutcome {
    /// The backend accepted the payment signature. Final confirmation still arrives by webhook.
    Verified,
    Failed(String),
    Dismissed,
}

impl CheckoutOutcome {
    /// Why the attempt did not go through, or `None` when it did.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            CheckoutOutcome::Verified => None,
            CheckoutOutcome::Failed(message) => Some(message),
            CheckoutOutcome::Dismissed => Some(DISMISSED_MESSAGE),
        }
    }
}

/// Runs one checkout attempt: script, order, widget, verification, strictly in that order.
pub async fn launch_checkout<B, W>(
    backend: &B,
    widget: &W,
    options: LaunchOptions,
) -> Result<CheckoutOutcome, CheckoutError>
where
    B: PaymentsBackend,
    W: CheckoutWidget,
{
    widget.load().await?;

    let order = backend.create_order(&options.order_request()).await?;
    info!("Created donation order {}", order.order_id);

    let event = widget.open(options.widget_options(&order)).await?;

    let outcome = match event {
        WidgetEvent::Completed(verification) => match backend.verify_order(&verification).await {
            Ok(()) => {
                info!("Payment {} submitted for verification", verification.payment_id);
                CheckoutOutcome::Verified
            }
            Err(e) => {
                error!("Verification of order {} failed: {}", order.order_id, e);
                CheckoutOutcome::Failed(e.to_string())
            }
        },
        WidgetEvent::PaymentFailed => {
            warn!("Payment failed for order {}", order.order_id);
            CheckoutOutcome::Failed(PAYMENT_FAILED_MESSAGE.to_string())
        }
        WidgetEvent::Dismissed => {
            info!("Checkout for order {} dismissed", order.order_id);
            CheckoutOutcome::Dismissed
        }
    };
    Ok(outcome)
}
