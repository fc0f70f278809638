pub mod api;
pub mod dto;

pub use api::ConnpassAPI;
