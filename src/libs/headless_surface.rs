//! In-memory input surface
//!
//! Used by the CLI, where no window exists, and by tests as a stand-in for the browser.
//! Dispatch is synchronous: every listener runs, in registration order, before
//! `dispatch` returns the outcome.

use crate::libs::input_surface::{
    InputSurface,
    KeyListener,
    KeyPressEvent,
    ListenerId,
    ListenerOptions,
    SurfaceError,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Key-press event built by the headless surface
#[derive(Debug, Clone)]
pub struct SimulatedKeyEvent {
    key: String,
    code: String,
    passive: bool,
    default_prevented: bool,
    prevent_default_calls: usize,
    ignored_prevent_default_calls: usize,
}

impl SimulatedKeyEvent {
    pub fn new(key: &str, code: &str) -> Self {
        Self {
            key: key.to_string(),
            code: code.to_string(),
            passive: false,
            default_prevented: false,
            prevent_default_calls: 0,
            ignored_prevent_default_calls: 0,
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl KeyPressEvent for SimulatedKeyEvent {
    fn key(&self) -> &str {
        &self.key
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn prevent_default(&mut self) {
        // Browsers ignore cancellation from passive listeners
        if self.passive {
            self.ignored_prevent_default_calls += 1;
            return;
        }
        self.prevent_default_calls += 1;
        self.default_prevented = true;
    }
}

/// What happened to one dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub prevent_default_calls: usize,
    pub ignored_prevent_default_calls: usize,
}

struct Registration {
    id: ListenerId,
    options: ListenerOptions,
    listener: KeyListener,
}

#[derive(Clone, Default)]
pub struct HeadlessSurface {
    registrations: Rc<RefCell<Vec<Registration>>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every registered listener on a fresh event
    pub fn dispatch(&self, key: &str, code: &str) -> Result<DispatchOutcome, SurfaceError> {
        let mut registrations = self.registrations
            .try_borrow_mut()
            .map_err(|_| SurfaceError::Registration("dispatch is not re-entrant".to_string()))?;

        let mut event = SimulatedKeyEvent::new(key, code);
        for registration in registrations.iter_mut() {
            event.passive = registration.options.passive;
            (registration.listener)(&mut event);
        }

        Ok(DispatchOutcome {
            default_prevented: event.default_prevented(),
            prevent_default_calls: event.prevent_default_calls,
            ignored_prevent_default_calls: event.ignored_prevent_default_calls,
        })
    }

    /// Options of every live registration, in registration order
    pub fn registrations(&self) -> Vec<(ListenerId, ListenerOptions)> {
        self.registrations
            .borrow()
            .iter()
            .map(|registration| (registration.id, registration.options))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl InputSurface for HeadlessSurface {
    fn add_key_listener(
        &self,
        options: ListenerOptions,
        listener: KeyListener,
    ) -> Result<ListenerId, SurfaceError> {
        let mut registrations = self.registrations
            .try_borrow_mut()
            .map_err(|_| {
                SurfaceError::Registration("cannot register while dispatching".to_string())
            })?;

        let id = ListenerId::new();
        registrations.push(Registration { id, options, listener });
        crate::debug_print!("⌨️ Headless key listener registered: {} (passive: {})", id, options.passive);
        Ok(id)
    }

    fn remove_key_listener(&self, id: ListenerId) -> Result<(), SurfaceError> {
        let mut registrations = self.registrations
            .try_borrow_mut()
            .map_err(|_| {
                SurfaceError::Registration("cannot deregister while dispatching".to_string())
            })?;

        let index = registrations
            .iter()
            .position(|registration| registration.id == id)
            .ok_or(SurfaceError::UnknownListener(id))?;
        registrations.remove(index);
        crate::debug_print!("⌨️ Headless key listener removed: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispatch_without_listeners_keeps_default() {
        let surface = HeadlessSurface::new();
        let outcome = surface.dispatch("ArrowUp", "ArrowUp").unwrap();
        assert_eq!(outcome, DispatchOutcome::default());
    }

    #[test]
    fn simulated_event_starts_with_default_intact() {
        let mut event = SimulatedKeyEvent::new("ArrowUp", "ArrowUp");
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let surface = HeadlessSurface::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            let order = order.clone();
            surface
                .add_key_listener(
                    ListenerOptions::passive(),
                    Box::new(move |_| order.borrow_mut().push(name)),
                )
                .unwrap();
        }

        surface.dispatch("a", "KeyA").unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn passive_listener_cannot_prevent_default() {
        let surface = HeadlessSurface::new();
        surface
            .add_key_listener(ListenerOptions::passive(), Box::new(|event| event.prevent_default()))
            .unwrap();

        let outcome = surface.dispatch("ArrowDown", "ArrowDown").unwrap();
        assert!(!outcome.default_prevented);
        assert_eq!(outcome.prevent_default_calls, 0);
        assert_eq!(outcome.ignored_prevent_default_calls, 1);
    }

    #[test]
    fn removed_listener_no_longer_runs() {
        let surface = HeadlessSurface::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = surface
            .add_key_listener(
                ListenerOptions::blocking(),
                Box::new(move |_| counter.set(counter.get() + 1)),
            )
            .unwrap();

        surface.dispatch("a", "KeyA").unwrap();
        surface.remove_key_listener(id).unwrap();
        surface.dispatch("a", "KeyA").unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(surface.listener_count(), 0);
        assert_eq!(surface.remove_key_listener(id), Err(SurfaceError::UnknownListener(id)));
    }

    #[test]
    fn registering_from_inside_a_listener_fails_cleanly() {
        let surface = HeadlessSurface::new();
        let inner = surface.clone();
        let result = Rc::new(RefCell::new(None));
        let slot = result.clone();
        surface
            .add_key_listener(
                ListenerOptions::passive(),
                Box::new(move |_| {
                    let outcome = inner.add_key_listener(ListenerOptions::passive(), Box::new(|_| {}));
                    *slot.borrow_mut() = Some(outcome.is_err());
                }),
            )
            .unwrap();

        surface.dispatch("a", "KeyA").unwrap();
        assert_eq!(*result.borrow(), Some(true));
        assert_eq!(surface.listener_count(), 1);
    }
}
