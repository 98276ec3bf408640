// Adapters layer: concrete clients for the two external systems.

pub mod ozon;
pub mod timeworld;

pub use ozon::OzonClient;
pub use timeworld::TimeworldSource;
