//! Browser input surface (wasm32 only)
//!
//! Registers `keydown` listeners on the page `window` through `gloo-events`.
//! A listener stays attached for as long as its `EventListener` is alive, so the
//! registry owns them and removal simply drops the entry.

use crate::libs::input_surface::{
    InputSurface,
    KeyListener,
    KeyPressEvent,
    ListenerId,
    ListenerOptions,
    SurfaceError,
};
use gloo_events::{ EventListener, EventListenerOptions };
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{ KeyboardEvent, Window };

type Registry = Rc<RefCell<HashMap<ListenerId, EventListener>>>;

thread_local! {
    // Registrations made through the global window live as long as the page
    static GLOBAL_REGISTRY: Registry = Rc::new(RefCell::new(HashMap::new()));
}

struct BrowserKeyEvent<'a> {
    event: &'a KeyboardEvent,
    key: String,
    code: String,
}

impl KeyPressEvent for BrowserKeyEvent<'_> {
    fn key(&self) -> &str {
        &self.key
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn prevent_default(&mut self) {
        self.event.prevent_default();
    }
}

#[derive(Clone)]
pub struct WebSurface {
    window: Window,
    registry: Registry,
}

impl WebSurface {
    /// Surface over the page's global `window`
    pub fn global() -> Result<Self, SurfaceError> {
        let window = web_sys
            ::window()
            .ok_or_else(|| SurfaceError::Unavailable("no global `window` object".to_string()))?;
        let registry = GLOBAL_REGISTRY.with(Rc::clone);
        Ok(Self { window, registry })
    }
}

fn gloo_options(options: ListenerOptions) -> EventListenerOptions {
    if options.passive {
        EventListenerOptions::default()
    } else {
        EventListenerOptions::enable_prevent_default()
    }
}

impl InputSurface for WebSurface {
    fn add_key_listener(
        &self,
        options: ListenerOptions,
        mut listener: KeyListener,
    ) -> Result<ListenerId, SurfaceError> {
        let mut registry = self.registry
            .try_borrow_mut()
            .map_err(|_| SurfaceError::Registration("listener registry is busy".to_string()))?;

        let event_listener = EventListener::new_with_options(
            &self.window,
            "keydown",
            gloo_options(options),
            move |event| {
                let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let mut key_event = BrowserKeyEvent {
                    event: keyboard_event,
                    key: keyboard_event.key(),
                    code: keyboard_event.code(),
                };
                listener(&mut key_event);
            }
        );

        let id = ListenerId::new();
        registry.insert(id, event_listener);
        crate::debug_print!("⌨️ Window keydown listener registered: {} (passive: {})", id, options.passive);
        Ok(id)
    }

    fn remove_key_listener(&self, id: ListenerId) -> Result<(), SurfaceError> {
        let mut registry = self.registry
            .try_borrow_mut()
            .map_err(|_| SurfaceError::Registration("listener registry is busy".to_string()))?;

        // Dropping the EventListener detaches it from the window
        registry.remove(&id).map(drop).ok_or(SurfaceError::UnknownListener(id))
    }
}
