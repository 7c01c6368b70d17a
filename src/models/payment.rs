//! Payment payloads exchanged with the checkout provider and the backend.

use serde::{Deserialize, Serialize};

use super::order::Order;

/// Body of the provider's create-order call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub intent: String,
    pub purchase_units: Vec<PurchaseUnit>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: Amount,
}

/// A money amount in the provider's wire form: the value travels as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

/// An order created on the provider side, waiting for buyer approval.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProviderOrder {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub links: Vec<ProviderLink>,
}

impl ProviderOrder {
    /// The link the buyer follows to approve the payment.
    pub fn approve_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "approve" || l.rel == "payer-action")
            .map(|l| l.href.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProviderLink {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// Result of the provider's capture step, forwarded to the backend as-is.
///
/// The backend reads `id`, `status`, `update_time` and the payer's email;
/// everything else the provider returns is preserved in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureDetails {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of `PUT /api/orders/{id}/pay`.
///
/// Some backends wrap the order with a status message, others return it
/// bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PayResponse {
    Wrapped {
        #[serde(default)]
        message: Option<String>,
        order: Order,
    },
    Bare(Order),
}

impl PayResponse {
    pub fn into_order(self) -> Order {
        match self {
            PayResponse::Wrapped { order, .. } | PayResponse::Bare(order) => order,
        }
    }
}
