//! Transport payload pipeline: envelopes, URL encoding, AES framing.

mod cipher;
mod encoder;
mod envelope;

pub use cipher::*;
pub use encoder::*;
pub use envelope::*;
