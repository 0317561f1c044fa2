pub mod chapter_name;
pub mod core_api;
pub mod document;
pub mod duration;
mod extract;
pub mod label;
