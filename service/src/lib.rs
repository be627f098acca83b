pub mod artifacts;
pub mod catalog_import;
pub mod catalog_service;
pub mod catalog_store;
pub mod error;
pub mod playlist_labeler;
pub mod reference_catalog;
pub mod reference_data;
pub mod resolution;
pub mod scope_expander;
pub mod search_service;
pub mod settings;
