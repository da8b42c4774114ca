pub mod ols;
pub mod stats;
