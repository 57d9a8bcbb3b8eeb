//! # fapiao
//!
//! Client library for Taiwan's B2C electronic invoice (統一發票) API as
//! offered by ECPay: invoice issuance, delayed issuance, voids, allowances,
//! notifications and lookups.
//!
//! Request bodies are validated against the vendor's cross-field rules,
//! then URL-encoded, AES-128-CBC encrypted and base64 framed. Responses go
//! through the same pipeline in reverse.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use fapiao::core::*;
//! use fapiao::operations::{Invoice, Operation};
//! use fapiao::payload::{CipherService, PayloadEncoder};
//! use rust_decimal_macros::dec;
//!
//! let encoder = PayloadEncoder::new(
//!     CipherService::new("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk").unwrap(),
//! );
//!
//! let invoice = Invoice::new("2000132")
//!     .relate_number("ORDER-2024-0001").unwrap()
//!     .customer_email("buyer@example.com")
//!     .carrier_type(CarrierType::Cellphone)
//!     .carrier_num("/ABC+123")
//!     .item(LineItem::new("Coffee beans", dec!(2), "bag", dec!(350)).unwrap());
//!
//! let envelope = invoice.content(&encoder).unwrap();
//! let data = encoder.decode_data(&envelope.data).unwrap();
//! assert_eq!(data["SalesAmount"], 700);
//! assert_eq!(data["Items"][0]["ItemSeq"], 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Vendor enums, line items, invoice validation |
//! | `payload` (default) | AES/base64 cipher, URL-encoding pipeline, envelopes |
//! | `operations` (default) | Issue, void, allowance, notify and query builders |
//! | `client` | `Client` with an injected `Transport`, `Config` loading |
//! | `http` | Blocking `reqwest` transport |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "payload")]
pub mod payload;

#[cfg(feature = "operations")]
pub mod operations;

#[cfg(feature = "client")]
pub mod client;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
