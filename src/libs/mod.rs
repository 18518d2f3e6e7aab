pub mod counted_channel;
pub mod headless_surface;
pub mod input_listener;
pub mod input_manager;
pub mod input_surface;
pub mod scroll_guard;

#[cfg(target_arch = "wasm32")]
pub mod web_surface;

// Re-export the guard entry points
pub use scroll_guard::{ install, prevent_default_scrolling, ScrollGuardHandle };
