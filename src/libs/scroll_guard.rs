//! Keeps arrow keys from scrolling the page
//!
//! The guard is a blocking key listener that cancels the default action of the four arrow
//! keys. Every other key goes through the host untouched. Arrow presses still reach any
//! other listener (the game input forwarder, for example); only the scroll is suppressed.

use crate::libs::input_surface::{
    InputSurface,
    KeyPressEvent,
    ListenerId,
    ListenerOptions,
    SurfaceError,
};

/// Key identifiers whose default action is scrolling
pub const SCROLL_KEYS: [&str; 4] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

/// Exact, case-sensitive match against the arrow key identifiers
pub fn is_scroll_key(key: &str) -> bool {
    SCROLL_KEYS.contains(&key)
}

fn suppress_scrolling(event: &mut dyn KeyPressEvent) {
    if is_scroll_key(event.key()) {
        event.prevent_default();
    }
}

/// Token for one installed guard
///
/// Dropping the handle leaves the guard installed; call `uninstall` to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the handle is the only way to uninstall the guard"]
pub struct ScrollGuardHandle {
    id: ListenerId,
}

impl ScrollGuardHandle {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Deregister the guard from the surface it was installed on
    pub fn uninstall<S: InputSurface + ?Sized>(self, surface: &S) -> Result<(), SurfaceError> {
        surface.remove_key_listener(self.id)?;
        crate::debug_print!("🛡️ Scroll guard {} uninstalled", self.id);
        Ok(())
    }
}

/// Install a scroll guard on `surface`
///
/// Each call adds an independent listener, so installing twice makes every arrow press
/// call `prevent_default` twice. Registration errors come back exactly as the surface
/// reported them.
pub fn install<S: InputSurface + ?Sized>(surface: &S) -> Result<ScrollGuardHandle, SurfaceError> {
    let id = surface.add_key_listener(ListenerOptions::blocking(), Box::new(suppress_scrolling))?;
    crate::debug_print!("🛡️ Scroll guard {} installed", id);
    Ok(ScrollGuardHandle { id })
}

/// Install a scroll guard on the page's global `window`
///
/// Meant to be called once at startup. Outside a browser there is no global surface and
/// this returns `SurfaceError::Unavailable`.
pub fn prevent_default_scrolling() -> Result<ScrollGuardHandle, SurfaceError> {
    #[cfg(target_arch = "wasm32")]
    {
        let surface = crate::libs::web_surface::WebSurface::global()?;
        install(&surface)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(SurfaceError::Unavailable("no browser window outside wasm32 targets".to_string()))
    }
}
