//! Browser host: mounts the DOM, feeds pointer / timer events into the
//! [`Session`] and carries out the effects it queues.
//!
//! All state lives in one `thread_local!` cell. Every JS callback borrows it,
//! forwards one event, then drains effects and re-renders.

mod audio;
mod view;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, window};

use crate::config::SessionConfig;
use crate::drag::Point;
use crate::error::ConfigError;
use crate::session::{Effect, Session, Ticket};

use audio::{AudioDeck, UiChime};
use view::View;

/// A browser interval or timeout together with the closure it calls.
///
/// Cancelling only clears the handle. The closure stays owned here until the
/// slot is refilled, because cancellation can happen from inside the callback
/// itself (a tick that resolves the round, a timeout that starts the next one).
struct Scheduled {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

struct Host {
    session: Session,
    view: View,
    audio: AudioDeck,
    /// Round countdown interval, restarted on every round.
    ticker: Option<Scheduled>,
    /// Feedback-delay timeout.
    pending: Option<Scheduled>,
}

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
}

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Runs `f` against the mounted host, then applies queued effects and renders.
fn with_host(f: impl FnOnce(&mut Host)) {
    HOST.with(|cell| {
        if let Some(host) = cell.borrow_mut().as_mut() {
            f(host);
            host.flush();
        }
    });
}

impl Host {
    fn flush(&mut self) {
        for effect in self.session.drain_effects() {
            self.apply(effect);
        }
        self.view.render(&self.session.snapshot());
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::CancelTasks => {
                if let Some(win) = window() {
                    if let Some(ticker) = &self.ticker {
                        win.clear_interval_with_handle(ticker.handle);
                    }
                    if let Some(pending) = &self.pending {
                        win.clear_timeout_with_handle(pending.handle);
                    }
                }
            }
            // Neither effect is queued from inside the callback it replaces:
            // ticks never start a round and advances never schedule another.
            Effect::StartTicker {
                ticket,
                interval_ms,
            } => match start_ticker(ticket, interval_ms) {
                Ok(ticker) => {
                    if let (Some(old), Some(win)) = (self.ticker.replace(ticker), window()) {
                        win.clear_interval_with_handle(old.handle);
                    }
                }
                Err(err) => log::error!("could not start round timer: {err:?}"),
            },
            Effect::ScheduleAdvance { ticket, delay_ms } => {
                match schedule_advance(ticket, delay_ms) {
                    Ok(pending) => {
                        if let (Some(old), Some(win)) = (self.pending.replace(pending), window()) {
                            win.clear_timeout_with_handle(old.handle);
                        }
                    }
                    Err(err) => log::error!("could not schedule next round: {err:?}"),
                }
            }
            Effect::Audio(cue) => self.audio.apply(cue),
        }
    }
}

// A fresh interval per round, so the first tick lands one full interval
// after the round starts.
fn start_ticker(ticket: Ticket, interval_ms: u32) -> Result<Scheduled, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = Closure::wrap(Box::new(move || {
        with_host(|host| host.session.on_tick(ticket));
    }) as Box<dyn FnMut()>);
    let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        interval_ms as i32,
    )?;
    Ok(Scheduled {
        handle,
        _callback: callback,
    })
}

fn schedule_advance(ticket: Ticket, delay_ms: u32) -> Result<Scheduled, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = Closure::wrap(Box::new(move || {
        with_host(|host| host.session.on_advance(ticket));
    }) as Box<dyn FnMut()>);
    let handle = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        delay_ms as i32,
    )?;
    Ok(Scheduled {
        handle,
        _callback: callback,
    })
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_listeners(view: &View) -> Result<(), JsValue> {
    for (button, mode) in &view.mode_buttons {
        let mode = *mode;
        listen(button, "click", move |_: MouseEvent| {
            with_host(|host| {
                host.audio.chime(UiChime::Click);
                host.session.select_mode(mode);
            });
        })?;
        listen(button, "mouseenter", |_: MouseEvent| {
            with_host(|host| host.audio.chime(UiChime::Hover));
        })?;
    }
    for button in [&view.reset_button, &view.again_button] {
        listen(button, "click", |_: MouseEvent| {
            with_host(|host| {
                host.audio.chime(UiChime::Click);
                host.session.reset();
            });
        })?;
        listen(button, "mouseenter", |_: MouseEvent| {
            with_host(|host| host.audio.chime(UiChime::Hover));
        })?;
    }

    listen(&view.prompt, "mousedown", |evt: MouseEvent| {
        evt.prevent_default();
        let pointer = Point::new(evt.client_x() as f64, evt.client_y() as f64);
        with_host(|host| {
            let element = view::element_rect(&host.view.prompt);
            let container = view::element_rect(&host.view.board);
            host.session.pointer_down(pointer, element, container);
        });
    })?;
    listen(&view.board, "mousemove", |evt: MouseEvent| {
        let pointer = Point::new(evt.client_x() as f64, evt.client_y() as f64);
        with_host(|host| {
            let container = view::element_rect(&host.view.board);
            host.session.pointer_move(pointer, container);
        });
    })?;
    // Leaving the board counts as a drop.
    for event in ["mouseup", "mouseleave"] {
        listen(&view.board, event, |_: MouseEvent| {
            with_host(|host| {
                let container = view::element_rect(&host.view.board);
                let width = host.view.prompt.offset_width() as f64;
                let height = host.view.prompt.offset_height() as f64;
                host.session.pointer_up(width, height, container);
            });
        })?;
    }
    Ok(())
}

fn parse_config(config_json: Option<String>) -> Result<SessionConfig, ConfigError> {
    match config_json {
        #[cfg(feature = "serde_json")]
        Some(json) => SessionConfig::from_json(&json),
        #[cfg(not(feature = "serde_json"))]
        Some(_) => {
            log::warn!("JSON config ignored: built without the serde_json feature");
            Ok(SessionConfig::default())
        }
        None => Ok(SessionConfig::default()),
    }
}

fn build_session(config_json: Option<String>) -> Result<Session, ConfigError> {
    let config = parse_config(config_json)?;
    let bank = config.default_bank()?;
    Session::new(config, bank)
}

/// Mounts the game and shows the lobby. `config_json` is an optional
/// `SessionConfig` in JSON; missing fields take their defaults. Calling it
/// again keeps the mounted page and starts over in the lobby with the new
/// config.
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    crate::logging::init_logging(cfg!(debug_assertions));
    let session = build_session(config_json).map_err(to_js)?;
    if HOST.with(|cell| cell.borrow().is_some()) {
        log::info!("start_game called again; replacing the session");
        with_host(|host| {
            host.apply(Effect::CancelTasks);
            host.session = session;
        });
        return Ok(());
    }

    let view = View::mount()?;
    let audio = AudioDeck::new()?;
    install_listeners(&view)?;

    HOST.with(|cell| {
        *cell.borrow_mut() = Some(Host {
            session,
            view,
            audio,
            ticker: None,
            pending: None,
        });
    });
    with_host(|_| {});
    log::info!("simsim mounted");
    Ok(())
}

/// Mode ids: `arabic-to-hebrew`, `hebrew-to-arabic`, `mix`. Anything else is ignored.
#[wasm_bindgen]
pub fn select_mode(mode: &str) {
    with_host(|host| host.session.select_mode_str(mode));
}

#[wasm_bindgen]
pub fn reset_game() {
    with_host(|host| host.session.reset());
}

/// Current snapshot for JS-side renderers.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn snapshot_json() -> Option<String> {
    HOST.with(|cell| cell.borrow().as_ref().map(|h| h.session.snapshot().to_json()))
}

#[cfg(all(test, feature = "serde_json"))]
mod tests {
    use super::*;
    use crate::config::Presentation;

    #[test]
    fn test_build_session_reads_config() {
        let s = build_session(Some(r#"{"total_rounds": 3, "presentation": "text"}"#.to_string())).unwrap();
        assert_eq!(s.total_rounds(), 3);
        assert_eq!(s.config().presentation, Presentation::Text);
        assert_eq!(build_session(None).unwrap().total_rounds(), 20);
        assert!(build_session(Some(r#"{"total_rounds": 0}"#.to_string())).is_err());
        assert!(build_session(Some("{".to_string())).is_err());
    }
}
