pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{JsonLinesSurface, TerminalSurface};
pub use crate::core::catalog::Catalog;
pub use crate::core::engine::{parse_hours, PricingEngine};
pub use crate::core::session::{run_session, FormEvent, FormSession};
pub use crate::domain::model::{
    CalculationResult, PaymentMethod, QuoteDocument, QuoteState, QuoteView, ServiceOffering,
};
pub use crate::domain::ports::FormSurface;
pub use crate::utils::error::{QuoteError, Result};
