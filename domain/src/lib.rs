pub mod name_normalizer;
pub mod naming;
pub mod similarity;

pub use name_normalizer::normalize;
