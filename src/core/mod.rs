pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{MarketSnapshot, SyncPlan, SyncReport};
pub use crate::domain::ports::{ConfigProvider, Marketplace, Pipeline, StockSource};
pub use crate::utils::error::Result;
