//! Journal append-only de cada despacho.
pub mod store;
pub mod types;

pub use store::{InMemoryJournal, Journal};
pub use types::{DispatchEvent, DispatchEventKind};
