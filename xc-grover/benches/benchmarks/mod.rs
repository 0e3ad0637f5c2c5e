pub mod build;
pub mod estimate;
pub mod generators;
