//! Core e-invoice types: vendor code sets, line items, the invoice data body,
//! request headers and the cross-field invoice validator.

mod data;
mod error;
mod header;
mod items;
mod types;
mod validation;

pub use data::*;
pub use error::*;
pub use header::*;
pub use items::*;
pub use types::*;
pub use validation::*;
