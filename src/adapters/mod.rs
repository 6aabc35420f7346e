// Adapters layer: concrete form surfaces and exports.

pub mod surface;
pub mod table;

pub use surface::{JsonLinesSurface, TerminalSurface};
pub use table::{price_table, write_price_table, PriceRow};
