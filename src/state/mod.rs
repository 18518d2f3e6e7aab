pub mod config;
pub mod game;
pub mod keyboard;
pub mod paths;
