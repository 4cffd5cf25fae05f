pub mod continent;
pub mod dataset;
pub mod error;
pub mod observation;
