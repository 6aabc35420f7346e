use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable photography package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub name: String,
    pub photo_count: u32,
    pub hourly_rate: f64,
    pub min_hours: u32,
}

/// A payment option and the signed fraction it applies to the subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub modifier: f64,
    pub description: String,
}

/// Caller-owned calculation state. Engine operations return a new value
/// instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteState {
    pub service: Option<String>,
    pub hours: u64,
    pub payment: String,
}

impl QuoteState {
    pub fn new(payment: impl Into<String>) -> Self {
        Self {
            service: None,
            hours: 0,
            payment: payment.into(),
        }
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub service_id: String,
    pub payment_id: String,
    pub effective_hours: u64,
    pub subtotal: f64,
    pub final_price: f64,
    pub annotation: String,
}

/// Display strings handed back to the form surface after every event.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuoteView {
    pub min_hours_label: String,
    pub hours_placeholder: String,
    pub hours_enabled: bool,
    pub effective_hours: Option<u64>,
    pub photo_count: Option<u32>,
    pub hourly_rate: Option<String>,
    pub subtotal: Option<String>,
    pub final_price: Option<String>,
    pub annotation: Option<String>,
    pub show_details: bool,
    pub show_result: bool,
}

/// A one-shot quote as emitted by `photo-quote quote --json`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDocument {
    pub generated_at: DateTime<Utc>,
    pub service: ServiceOffering,
    pub payment: PaymentMethod,
    pub result: CalculationResult,
    pub display: QuoteView,
}
