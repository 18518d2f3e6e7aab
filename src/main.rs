#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

// In a browser the page calls `prevent_default_scrolling` from its own start-up code
#[cfg(target_arch = "wasm32")]
fn main() {}
