//! Simsim core crate.
//!
//! A drag-and-drop cognate game: a Hebrew or Arabic word (or its morphing
//! image) is dragged into one of four quadrants holding candidate meanings.
//! Gameplay (round generation, countdown, drop resolution, scoring, session
//! lifecycle) is plain Rust and runs natively under `cargo test`; the `web`
//! module is the browser host exposed through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod bank;
pub mod config;
pub mod drag;
pub mod error;
pub mod logging;
pub mod round;
pub mod scoring;
pub mod session;
pub mod timer;
mod web;

pub use bank::{COGNATES, CognateItem, IMAGE_ASSET_COUNT, WordBank};
pub use config::{Presentation, SessionConfig};
pub use drag::{Point, Quadrant, Rect, resolve_quadrant};
pub use error::ConfigError;
pub use round::{Direction, Mode, Round, generate_round};
pub use session::{AudioCue, Effect, Feedback, Outcome, Phase, Session, Snapshot, Ticket};
pub use timer::{CountdownTimer, TimerEvent};
pub use web::{reset_game, select_mode, start_game};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
