// Browser smoke test: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn display_of(doc: &Document, id: &str) -> String {
    let el: HtmlElement = doc.get_element_by_id(id).unwrap().dyn_into().unwrap();
    el.style().get_property_value("display").unwrap()
}

#[wasm_bindgen_test]
fn start_game_mounts_lobby_and_starts_on_mode_select() {
    simsim::start_game(Some(r#"{"total_rounds": 2, "presentation": "text"}"#.to_string())).unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("simsim-lobby").is_some());
    assert!(doc.get_element_by_id("simsim-q3").is_some());

    simsim::select_mode("nonsense");
    assert_eq!(display_of(&doc, "simsim-game"), "none");

    simsim::select_mode("mix");
    assert_eq!(display_of(&doc, "simsim-game"), "block");
    let hud = doc.get_element_by_id("simsim-hud").unwrap();
    assert!(hud.text_content().unwrap().starts_with("Round 1/2"));
    simsim::reset_game();
}

#[wasm_bindgen_test]
fn start_game_again_applies_new_config() {
    simsim::start_game(Some(r#"{"total_rounds": 2, "presentation": "text"}"#.to_string())).unwrap();
    simsim::start_game(Some(r#"{"total_rounds": 5, "presentation": "text"}"#.to_string())).unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    simsim::select_mode("arabic-to-hebrew");
    let hud = doc.get_element_by_id("simsim-hud").unwrap();
    assert!(hud.text_content().unwrap().starts_with("Round 1/5"));
    // Reset and restart while a round is counting down.
    simsim::reset_game();
    simsim::select_mode("mix");
    assert!(hud.text_content().unwrap().starts_with("Round 1/5"));
    simsim::reset_game();
}
