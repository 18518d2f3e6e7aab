//! Abstractions over a host that dispatches key-press notifications
//! (a browser window, or the in-memory surface used headless and in tests)

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A single key-press notification delivered by a surface
pub trait KeyPressEvent {
    /// Logical key identifier, e.g. "ArrowUp" or "a"
    fn key(&self) -> &str;

    /// Physical key code, e.g. "KeyW"
    fn code(&self) -> &str;

    /// Ask the host to skip its built-in response to this event (scrolling for arrows)
    fn prevent_default(&mut self);
}

/// Callback registered against a surface
pub type KeyListener = Box<dyn FnMut(&mut dyn KeyPressEvent)>;

/// Registration mode for a key listener
///
/// A passive listener promises not to cancel the default action, so the host is free to
/// apply it without waiting. Anything that wants to call `prevent_default` must register
/// with `passive: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub passive: bool,
}

impl ListenerOptions {
    /// Blocking mode: the listener runs before the default action and may cancel it
    pub const fn blocking() -> Self {
        Self { passive: false }
    }

    pub const fn passive() -> Self {
        Self { passive: true }
    }
}

/// Identifier of one registration on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The hosting context has no input surface (headless, non-browser)
    #[error("no input surface available: {0}")]
    Unavailable(String),

    #[error("failed to register key listener: {0}")]
    Registration(String),

    #[error("no key listener registered with id {0}")]
    UnknownListener(ListenerId),
}

/// A host that accepts key-press listeners
pub trait InputSurface {
    fn add_key_listener(
        &self,
        options: ListenerOptions,
        listener: KeyListener,
    ) -> Result<ListenerId, SurfaceError>;

    fn remove_key_listener(&self, id: ListenerId) -> Result<(), SurfaceError>;
}

impl<S: InputSurface + ?Sized> InputSurface for &S {
    fn add_key_listener(
        &self,
        options: ListenerOptions,
        listener: KeyListener,
    ) -> Result<ListenerId, SurfaceError> {
        (**self).add_key_listener(options, listener)
    }

    fn remove_key_listener(&self, id: ListenerId) -> Result<(), SurfaceError> {
        (**self).remove_key_listener(id)
    }
}
