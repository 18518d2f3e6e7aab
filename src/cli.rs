use std::process::ExitCode;
use tileslide::libs::counted_channel::CountedChannel;
use tileslide::libs::headless_surface::HeadlessSurface;
use tileslide::libs::input_listener::start_key_forwarder;
use tileslide::libs::input_manager::{ drain_pending_keys, init_input_channels, keyboard_sender };
use tileslide::libs::scroll_guard;
use tileslide::state::config::AppConfig;
use tileslide::state::game::Game;
use tileslide::state::keyboard::{ key_for_code, KeyboardState };
use tileslide::utils::constants::{ APP_NAME, APP_VERSION };
use tileslide::{ always_eprint, debug_print, utils };
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{ AsyncBufReadExt, BufReader };

const USAGE: &str = "usage: tileslide [--quiet]\n\nReads key codes (ArrowUp, KeyW, KeyH, ...) from stdin, one move per code.";

/// Native entry point: plays the game from key codes on stdin
#[tokio::main(flavor = "current_thread")]
pub async fn run() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    let quiet = args.iter().any(|arg| arg == "--quiet");

    let config = AppConfig::load();
    utils::logger::init_logging(config.debug_logging && !quiet);
    debug_print!("🚀 Initializing {} {}...", APP_NAME, APP_VERSION);

    // Key codes travel from the surface's listeners to the game loop through this channel
    let (keyboard_tx, keyboard_rx) = CountedChannel::new();
    init_input_channels(keyboard_tx, keyboard_rx);

    // No browser window here: the headless surface stands in for it
    let surface = HeadlessSurface::new();
    let guard = match scroll_guard::install(&surface) {
        Ok(handle) => handle,
        Err(e) => {
            always_eprint!("❌ Failed to install scroll guard: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(sender) = keyboard_sender() else {
        always_eprint!("❌ Key channel not initialized");
        return ExitCode::FAILURE;
    };
    if let Err(e) = start_key_forwarder(&surface, sender) {
        always_eprint!("❌ Failed to start key forwarder: {}", e);
        return ExitCode::FAILURE;
    }

    let mut game = Game::with_params(config.new_tile_params(), StdRng::from_rng(&mut rand::rng()));
    let mut keyboard = KeyboardState::new();
    println!("{}", game);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    'input: loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                always_eprint!("❌ Failed to read stdin: {}", e);
                break;
            }
        };

        for code in line.split_whitespace() {
            match surface.dispatch(&key_for_code(code), code) {
                Ok(outcome) if outcome.default_prevented => {
                    debug_print!("🛡️ Default scrolling suppressed for {}", code);
                }
                Ok(_) => {}
                Err(e) => always_eprint!("❌ Dispatch failed for {}: {}", code, e),
            }

            for key_code in drain_pending_keys() {
                keyboard.record(&key_code);
                match game.receive_input(&key_code) {
                    Ok(tiles) => debug_print!("🎮 {} -> {} tiles", key_code, tiles.len()),
                    Err(e) => debug_print!("🎮 {} ignored: {}", key_code, e),
                }
                println!("{}score: {}\n", game, game.score);
            }

            if game.is_over() {
                println!("Game over! Final score: {}", game.score);
                break 'input;
            }
        }
    }

    if let Err(e) = guard.uninstall(&surface) {
        always_eprint!("❌ Failed to uninstall scroll guard: {}", e);
    }
    debug_print!("👋 Last key: {}", if keyboard.key_pressed { keyboard.last_key.as_str() } else { "none" });
    ExitCode::SUCCESS
}
