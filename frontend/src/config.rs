use crate::checkout::CheckoutError;

pub const DEFAULT_PAYMENT_API_PREFIX: &str = "/api/payments";
pub const DEFAULT_DONATION_CAMPAIGN_ID: &str = "general-support";

/// Smallest accepted donation, in whole rupees.
pub const MIN_DONATION_RUPEES: u64 = 1;

/// Largest accepted donation, in whole rupees.
pub const MAX_DONATION_RUPEES: u64 = 10_000_000;

const BASE_URL_VAR: &str = "PAYMENT_API_BASE_URL";

/// Payment backend settings, fixed at build time like the rest of the frontend config.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentsConfig {
    api_base_url: Option<String>,
    api_prefix: String,
    campaign_id: String,
}

impl PaymentsConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("PAYMENT_API_BASE_URL"),
            option_env!("PAYMENT_API_PREFIX"),
            option_env!("DONATION_CAMPAIGN_ID"),
        )
    }

    /// Empty values count as unset.
    pub fn from_values(
        api_base_url: Option<&str>,
        api_prefix: Option<&str>,
        campaign_id: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: present(api_base_url).map(|url| url.trim_end_matches('/').to_string()),
            api_prefix: with_leading_slash(present(api_prefix).unwrap_or(DEFAULT_PAYMENT_API_PREFIX)),
            campaign_id: present(campaign_id)
                .unwrap_or(DEFAULT_DONATION_CAMPAIGN_ID)
                .to_string(),
        }
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn base_url(&self) -> Result<&str, CheckoutError> {
        self.api_base_url
            .as_deref()
            .ok_or(CheckoutError::Configuration(BASE_URL_VAR))
    }

    /// Full URL of a payments endpoint, e.g. `endpoint("/verify")`.
    pub fn endpoint(&self, path: &str) -> Result<String, CheckoutError> {
        Ok(format!(
            "{}{}{}",
            self.base_url()?,
            self.api_prefix,
            with_leading_slash(path)
        ))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = PaymentsConfig::from_values(Some("https://pay.example.org"), None, None);
        assert_eq!(config.campaign_id(), "general-support");
        assert_eq!(
            config.endpoint("/create-order").unwrap(),
            "https://pay.example.org/api/payments/create-order"
        );
    }

    #[test]
    fn base_url_and_paths_are_normalized() {
        let config =
            PaymentsConfig::from_values(Some("https://pay.example.org///"), Some("v2/donations"), Some(""));
        assert_eq!(
            config.endpoint("verify").unwrap(),
            "https://pay.example.org/v2/donations/verify"
        );
        assert_eq!(config.campaign_id(), DEFAULT_DONATION_CAMPAIGN_ID);
    }

    #[test]
    fn missing_base_url_is_a_configuration_error() {
        let config = PaymentsConfig::from_values(None, None, Some("ramadan"));
        assert_eq!(
            config.endpoint("/verify"),
            Err(CheckoutError::Configuration("PAYMENT_API_BASE_URL"))
        );
        assert_eq!(
            config.base_url().unwrap_err().to_string(),
            "Missing PAYMENT_API_BASE_URL in environment."
        );

        let blank = PaymentsConfig::from_values(Some("   "), None, None);
        assert!(blank.base_url().is_err());
    }
}
