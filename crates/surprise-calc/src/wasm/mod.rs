//! Page integration
//!
//! The mock DOM and driver are always built so the full page flow can be
//! tested natively; the wasm-bindgen entry point needs the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, LocalStorage};
pub use dom::{ids, DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
