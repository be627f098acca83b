pub mod arcade;
pub mod artifact_names;
pub mod region_tags;
pub mod script;
pub mod system_names;
