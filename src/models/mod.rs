//! Data models for the fat tail analysis
//!
//! Each model is produced once by a pipeline stage and only read afterwards.

pub mod price;
pub mod returns;
pub mod distribution;
pub mod chart;

// Re-export commonly used types for convenience
pub use price::{PricePoint, PriceSeries};
pub use returns::{ReturnPoint, ReturnSeries};
pub use distribution::Moments;
pub use chart::{ChartRequest, DensityCurve, Histogram, HistogramBin};
