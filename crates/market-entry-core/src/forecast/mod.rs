pub mod metrics;
pub mod smoothing;
