use crate::config::toml_config::CatalogConfig;
use crate::domain::model::{PaymentMethod, ServiceOffering};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::Validate;

pub const DEFAULT_PAYMENT_ID: &str = "pix";

/// The two lookup tables behind the booking form. Listing order is the
/// order the entries were declared in.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    services: Vec<ServiceOffering>,
    payments: Vec<PaymentMethod>,
    default_payment: String,
}

fn service(id: &str, name: &str, photo_count: u32, hourly_rate: f64, min_hours: u32) -> ServiceOffering {
    ServiceOffering {
        id: id.to_string(),
        name: name.to_string(),
        photo_count,
        hourly_rate,
        min_hours,
    }
}

fn payment(id: &str, name: &str, modifier: f64, description: &str) -> PaymentMethod {
    PaymentMethod {
        id: id.to_string(),
        name: name.to_string(),
        modifier,
        description: description.to_string(),
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            services: vec![
                service("ensaio-casal", "ENSAIO DE CASAL", 40, 250.0, 2),
                service("evento-corporativo", "EVENTO CORPORATIVO", 75, 130.0, 3),
                service("corporativa-individual", "CORPORATIVAS (INDIVIDUAL)", 20, 150.0, 2),
                service("ensaio-familia", "ENSAIO DE FAMÍLIA", 50, 350.0, 2),
                service("eventos-gerais", "EVENTOS (EXCETO CASAMENTOS)", 200, 150.0, 3),
            ],
            payments: vec![
                payment("pix", "PIX", -0.10, "10% de desconto"),
                payment("credito-1x", "Crédito 1x", 0.0, "Sem alteração"),
                payment("credito-3x", "Crédito até 3x", 0.05, "5% de acréscimo"),
            ],
            default_payment: DEFAULT_PAYMENT_ID.to_string(),
        }
    }

    /// Builds a catalog from a parsed catalog file. The file is validated
    /// first; an omitted `default_payment` falls back to the first method.
    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let default_payment = match config.default_payment {
            Some(id) => id,
            None => config
                .payments
                .first()
                .map(|p| p.id.clone())
                .ok_or_else(|| QuoteError::MissingConfigError {
                    field: "payments".to_string(),
                })?,
        };

        tracing::debug!(
            services = config.services.len(),
            payments = config.payments.len(),
            default_payment = %default_payment,
            "Catalog loaded from configuration"
        );

        Ok(Self {
            services: config.services,
            payments: config.payments,
            default_payment,
        })
    }

    pub fn service(&self, id: &str) -> Option<&ServiceOffering> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn payment(&self, id: &str) -> Option<&PaymentMethod> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn require_service(&self, id: &str) -> Result<&ServiceOffering> {
        self.service(id).ok_or_else(|| QuoteError::UnknownService { id: id.to_string() })
    }

    pub fn require_payment(&self, id: &str) -> Result<&PaymentMethod> {
        self.payment(id).ok_or_else(|| QuoteError::UnknownPayment { id: id.to_string() })
    }

    pub fn default_payment(&self) -> &str {
        &self.default_payment
    }

    pub fn services(&self) -> &[ServiceOffering] {
        &self.services
    }

    pub fn payments(&self) -> &[PaymentMethod] {
        &self.payments
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
