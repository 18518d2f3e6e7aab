use crate::libs::counted_channel::CountedSender;
use crate::libs::input_surface::{ InputSurface, ListenerId, ListenerOptions, SurfaceError };

/// Start forwarding physical key codes from `surface` into the key channel
///
/// The forwarder only observes, so it registers in passive mode and leaves the
/// default action to the scroll guard.
pub fn start_key_forwarder<S: InputSurface + ?Sized>(
    surface: &S,
    keyboard_tx: CountedSender,
) -> Result<ListenerId, SurfaceError> {
    let id = surface.add_key_listener(
        ListenerOptions::passive(),
        Box::new(move |event| {
            let key_code = event.code();
            if key_code.is_empty() {
                return;
            }

            if let Err(error) = keyboard_tx.send(key_code.to_string()) {
                crate::debug_eprint!("❌ Key forwarder dropped '{}': receiver closed", error.0);
            }
        })
    )?;

    crate::debug_print!("🎮 Key forwarder started: {}", id);
    Ok(id)
}
