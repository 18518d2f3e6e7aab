pub mod constants;
pub mod data;
pub mod logger;
