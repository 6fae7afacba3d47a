pub mod a001_catalog_entry;
pub mod common;
