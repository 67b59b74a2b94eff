pub mod batch;
pub mod country;
