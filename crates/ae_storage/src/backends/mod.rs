pub mod api;
pub mod memory;
