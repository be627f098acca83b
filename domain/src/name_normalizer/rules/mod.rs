pub mod brackets;
pub mod cn_marker;
pub mod punctuation;
pub mod separators;
