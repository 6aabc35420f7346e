//! The pricing engine.
//!
//! Every operation takes the caller's [`QuoteState`] by reference and returns
//! the next state; nothing is mutated in place. Bad input never fails: unknown
//! ids fall back to "no selection" (services) or are ignored (payments), and
//! hours that are missing, non-positive or below the service minimum are
//! clamped up to that minimum.

use crate::core::catalog::Catalog;
use crate::core::format::{format_brl, format_decimal, round_to_cents};
use crate::domain::model::{CalculationResult, QuoteDocument, QuoteState, QuoteView};
use chrono::Utc;

const NO_SERVICE_PLACEHOLDER: &str = "Selecione o tipo de sessão primeiro";

/// Parses raw form text into a decimal hour count: leading whitespace is
/// skipped, an optional sign and the leading run of ASCII digits are read,
/// and anything else is `None`. There is no radix prefix handling, so `"0x10"`
/// reads as `0`.
pub fn parse_hours(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude = match rest[..digits_end].parse::<i64>() {
        Ok(magnitude) => magnitude,
        Err(_) => {
            tracing::warn!(raw, "Hour count out of range, saturating");
            i64::MAX
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    catalog: Catalog,
}

impl PricingEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Initial state: no service, catalog default payment.
    pub fn initial_state(&self) -> QuoteState {
        QuoteState::new(self.catalog.default_payment())
    }

    pub fn select_service(&self, state: &QuoteState, service_id: Option<&str>) -> QuoteState {
        let service = service_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| {
                let found = self.catalog.service(id);
                if found.is_none() {
                    tracing::warn!(service_id = id, "Unknown service, clearing selection");
                }
                found
            });

        match service {
            Some(service) => {
                tracing::debug!(
                    service_id = %service.id,
                    min_hours = service.min_hours,
                    "Service selected"
                );
                QuoteState {
                    service: Some(service.id.clone()),
                    hours: u64::from(service.min_hours),
                    payment: state.payment.clone(),
                }
            }
            None => QuoteState {
                service: None,
                hours: 0,
                payment: state.payment.clone(),
            },
        }
    }

    pub fn set_hours(&self, state: &QuoteState, requested: Option<i64>) -> QuoteState {
        let Some(service) = state.service.as_deref().and_then(|id| self.catalog.service(id)) else {
            return state.clone();
        };

        let min_hours = u64::from(service.min_hours);
        let hours = match requested {
            Some(h) if h >= 1 && h.unsigned_abs() >= min_hours => h.unsigned_abs(),
            _ => {
                tracing::debug!(?requested, min_hours, "Hours clamped to service minimum");
                min_hours
            }
        };

        QuoteState {
            hours,
            ..state.clone()
        }
    }

    /// Convenience for raw form text; see [`parse_hours`].
    pub fn set_hours_text(&self, state: &QuoteState, raw: &str) -> QuoteState {
        self.set_hours(state, parse_hours(raw))
    }

    pub fn set_payment_method(&self, state: &QuoteState, payment_id: &str) -> QuoteState {
        let payment_id = payment_id.trim();
        if self.catalog.payment(payment_id).is_none() {
            tracing::warn!(payment_id, "Unknown payment method ignored");
            return state.clone();
        }

        QuoteState {
            payment: payment_id.to_string(),
            ..state.clone()
        }
    }

    pub fn compute_result(&self, state: &QuoteState) -> Option<CalculationResult> {
        let service = self.catalog.service(state.service.as_deref()?)?;
        if state.hours == 0 {
            return None;
        }
        let payment = self.catalog.payment(&state.payment)?;

        let subtotal = service.hourly_rate * state.hours as f64;
        let final_price = round_to_cents(subtotal * (1.0 + payment.modifier));
        let annotation = if payment.modifier != 0.0 {
            format!("{} sobre {}", payment.description, format_brl(subtotal))
        } else {
            payment.description.clone()
        };

        Some(CalculationResult {
            service_id: service.id.clone(),
            payment_id: payment.id.clone(),
            effective_hours: state.hours,
            subtotal: round_to_cents(subtotal),
            final_price,
            annotation,
        })
    }

    pub fn quote_document(&self, state: &QuoteState) -> Option<QuoteDocument> {
        let result = self.compute_result(state)?;
        let service = self.catalog.service(&result.service_id)?.clone();
        let payment = self.catalog.payment(&result.payment_id)?.clone();

        Some(QuoteDocument {
            generated_at: Utc::now(),
            service,
            payment,
            result,
            display: self.render(state),
        })
    }

    pub fn render(&self, state: &QuoteState) -> QuoteView {
        let Some(service) = state.service.as_deref().and_then(|id| self.catalog.service(id)) else {
            return QuoteView {
                min_hours_label: "-".to_string(),
                hours_placeholder: NO_SERVICE_PLACEHOLDER.to_string(),
                ..QuoteView::default()
            };
        };

        let result = self.compute_result(state);
        QuoteView {
            min_hours_label: service.min_hours.to_string(),
            hours_placeholder: format!("Mínimo {} horas", service.min_hours),
            hours_enabled: true,
            effective_hours: Some(state.hours),
            photo_count: Some(service.photo_count),
            hourly_rate: Some(format_brl(service.hourly_rate)),
            subtotal: result.as_ref().map(|r| format_brl(r.subtotal)),
            final_price: result.as_ref().map(|r| format_decimal(r.final_price)),
            annotation: result.as_ref().map(|r| r.annotation.clone()),
            show_details: true,
            show_result: result.is_some(),
        }
    }
}
