//! Cross-cutting helpers shared by the service crate and the `taxi` binary.

pub mod utils;
