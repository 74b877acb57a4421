use {
    super::error::ServiceError,
    super::id::{IntentId, SessionId},
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// One-time payment.
    Payment,
    /// Recurring subscription.
    Subscription,
    /// Store a payment method for later use.
    Setup,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Subscription => "subscription",
            Self::Setup => "setup",
        }
    }
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for CheckoutMode {
    type Error = ServiceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "payment" => Ok(Self::Payment),
            "subscription" => Ok(Self::Subscription),
            "setup" => Ok(Self::Setup),
            other => Err(ServiceError::InvalidRequest(format!(
                "mode must be one of payment, subscription, setup; got: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    pub price: String,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

/// Exactly one source of line items per session.
#[derive(Debug, Clone)]
pub enum CheckoutItems {
    Price { price_id: String, quantity: u64 },
    LineItems(Vec<LineItem>),
}

/// Default redirect targets when the caller does not supply URLs.
#[derive(Debug, Clone)]
pub struct RedirectUrls {
    pub success: String,
    pub cancel: String,
}

/// Wire shape of `POST /api/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    #[serde(default = "default_mode")]
    pub mode: String,
    pub customer_email: Option<String>,
    pub metadata: Option<HashMap<String, String>>,
    pub description: Option<String>,
}

fn default_mode() -> String {
    "payment".to_string()
}

/// Validated checkout-session request, ready for the gateway.
#[derive(Debug, Clone)]
pub struct CheckoutSpec {
    pub items: CheckoutItems,
    pub mode: CheckoutMode,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
    pub metadata: Option<HashMap<String, String>>,
    pub description: Option<String>,
}

impl CheckoutSpec {
    /// Validates the wire request. Redirect URLs fall back to the configured
    /// defaults when the caller omits them.
    pub fn from_request(
        req: CheckoutRequest,
        redirects: &RedirectUrls,
    ) -> Result<Self, ServiceError> {
        let mode = CheckoutMode::try_from(req.mode.as_str())?;

        let items = match (req.price_id, req.line_items) {
            (Some(price_id), None) => CheckoutItems::Price {
                price_id,
                quantity: 1,
            },
            (None, Some(items)) => {
                if items.is_empty() {
                    return Err(ServiceError::InvalidRequest(
                        "line_items must not be empty".into(),
                    ));
                }
                CheckoutItems::LineItems(items)
            }
            (Some(_), Some(_)) => {
                return Err(ServiceError::InvalidRequest(
                    "provide either price_id or line_items, not both".into(),
                ));
            }
            (None, None) => {
                return Err(ServiceError::InvalidRequest(
                    "either price_id or line_items must be provided".into(),
                ));
            }
        };

        Ok(Self {
            items,
            mode,
            success_url: req.success_url.unwrap_or_else(|| redirects.success.clone()),
            cancel_url: req.cancel_url.unwrap_or_else(|| redirects.cancel.clone()),
            customer_email: req.customer_email,
            metadata: req.metadata,
            description: req.description,
        })
    }
}

/// What the provider hands back for a created session.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub url: String,
    pub payment_intent_id: Option<IntentId>,
    pub amount_total: i64,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: SessionId,
    pub url: String,
}
