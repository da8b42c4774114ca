pub mod engine;
pub mod fit_result;
pub mod observation;
