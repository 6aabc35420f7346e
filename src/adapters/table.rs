use crate::core::engine::PricingEngine;
use crate::core::format::format_decimal;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct PriceRow {
    pub service_id: String,
    pub service: String,
    pub hours: u64,
    pub payment_id: String,
    pub payment: String,
    pub subtotal: String,
    pub final_price: String,
}

/// Every service priced with every payment method. `hours` goes through the
/// same clamp as form input, so `None` prices each service at its minimum.
pub fn price_table(engine: &PricingEngine, hours: Option<i64>) -> Vec<PriceRow> {
    let catalog = engine.catalog();
    let mut rows = Vec::new();

    for service in catalog.services() {
        let state = engine.select_service(&engine.initial_state(), Some(&service.id));
        let state = engine.set_hours(&state, hours.or(Some(i64::from(service.min_hours))));

        for payment in catalog.payments() {
            let state = engine.set_payment_method(&state, &payment.id);
            if let Some(result) = engine.compute_result(&state) {
                rows.push(PriceRow {
                    service_id: service.id.clone(),
                    service: service.name.clone(),
                    hours: result.effective_hours,
                    payment_id: payment.id.clone(),
                    payment: payment.name.clone(),
                    subtotal: format_decimal(result.subtotal),
                    final_price: format_decimal(result.final_price),
                });
            }
        }
    }

    rows
}

pub fn write_price_table<W: Write>(engine: &PricingEngine, hours: Option<i64>, out: W) -> Result<usize> {
    let rows = price_table(engine, hours);
    let mut writer = csv::Writer::from_writer(out);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::debug!(rows = rows.len(), "Price table written");
    Ok(rows.len())
}
