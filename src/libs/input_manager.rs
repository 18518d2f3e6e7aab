/// Global holder for the key channel shared by the input surface and the game loop
use crate::libs::counted_channel::{ CountedReceiver, CountedSender };
use std::sync::{ Arc, Mutex, OnceLock };

/// Static global holder for input channels
static INPUT_CHANNELS: OnceLock<InputChannels> = OnceLock::new();

/// Struct to hold the key event channel
pub struct InputChannels {
    pub keyboard_rx: Arc<Mutex<CountedReceiver>>,
    pub keyboard_tx: CountedSender,
}

/// Initialize input channels (called from main)
///
/// Returns false if the channels were already initialized; the first pair wins.
pub fn init_input_channels(keyboard_tx: CountedSender, keyboard_rx: CountedReceiver) -> bool {
    let channels = InputChannels {
        keyboard_rx: Arc::new(Mutex::new(keyboard_rx)),
        keyboard_tx,
    };

    INPUT_CHANNELS.set(channels).is_ok()
}

/// Get input channels, if main has set them up
pub fn get_input_channels() -> Option<&'static InputChannels> {
    INPUT_CHANNELS.get()
}

/// Sender for a new key forwarder
pub fn keyboard_sender() -> Option<CountedSender> {
    get_input_channels().map(|channels| channels.keyboard_tx.clone())
}

/// Drain every key code currently buffered, without waiting
pub fn drain_pending_keys() -> Vec<String> {
    let Some(channels) = get_input_channels() else {
        return Vec::new();
    };
    let Ok(mut receiver) = channels.keyboard_rx.lock() else {
        crate::always_eprint!("❌ Key channel lock poisoned");
        return Vec::new();
    };

    std::iter::from_fn(|| receiver.try_recv()).collect()
}
