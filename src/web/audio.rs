// Music and UI chimes. Playback can be refused by the browser (autoplay
// policy); that is logged and shown on the status line, never fatal.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::session::AudioCue;
use crate::web::view;

const LOBBY_SRC: &str = "/sounds/lobby.mp3";
const HOVER_SRC: &str = "/sounds/hover-chime.mp3";
const CLICK_SRC: &str = "/sounds/click-chime.mp3";
const MUSIC_VOLUME: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiChime {
    Hover,
    Click,
}

pub fn track_src(track: u8) -> String {
    format!("/sounds/{track}.mp3")
}

pub struct AudioDeck {
    lobby: HtmlAudioElement,
    game: HtmlAudioElement,
    hover: HtmlAudioElement,
    click: HtmlAudioElement,
}

impl AudioDeck {
    pub fn new() -> Result<Self, JsValue> {
        let lobby = HtmlAudioElement::new_with_src(LOBBY_SRC)?;
        lobby.set_loop(true);
        lobby.set_volume(MUSIC_VOLUME);
        let game = HtmlAudioElement::new()?;
        game.set_loop(true);
        game.set_volume(MUSIC_VOLUME);
        Ok(Self {
            lobby,
            game,
            hover: HtmlAudioElement::new_with_src(HOVER_SRC)?,
            click: HtmlAudioElement::new_with_src(CLICK_SRC)?,
        })
    }

    pub fn apply(&self, cue: AudioCue) {
        match cue {
            AudioCue::Lobby => {
                stop(&self.game);
                play(&self.lobby, "lobby music");
            }
            AudioCue::Game { track } => {
                stop(&self.lobby);
                self.game.set_src(&track_src(track));
                play(&self.game, "game music");
            }
            AudioCue::StopAll => {
                stop(&self.lobby);
                stop(&self.game);
            }
        }
    }

    pub fn chime(&self, chime: UiChime) {
        let el = match chime {
            UiChime::Hover => &self.hover,
            UiChime::Click => &self.click,
        };
        el.set_current_time(0.0);
        play(el, "chime");
    }
}

fn play(el: &HtmlAudioElement, what: &'static str) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                report(what, &err);
            }
        }),
        Err(err) => report(what, &err),
    }
}

fn stop(el: &HtmlAudioElement) {
    let _ = el.pause();
    el.set_current_time(0.0);
}

fn report(what: &str, err: &JsValue) {
    log::warn!("{what} play failed: {err:?}");
    view::report_status(&format!("Audio unavailable ({what}); click anywhere to enable sound."));
}
