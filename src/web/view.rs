// DOM overlay for the game: lobby, board with four quadrants, HUD, game-over
// panel. Built once at startup; `render` only updates text, sources and styles.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, window};

use crate::drag::Rect;
use crate::round::Mode;
use crate::session::{Phase, PromptView, Snapshot};

const ROOT_ID: &str = "simsim-root";
const STATUS_ID: &str = "simsim-status";

pub const MODES: [Mode; 3] = [Mode::SourceToTarget, Mode::TargetToSource, Mode::Mixed];

struct QuadrantCell {
    img: HtmlImageElement,
    caption: HtmlElement,
}

pub struct View {
    lobby: HtmlElement,
    game: HtmlElement,
    over: HtmlElement,
    hud: HtmlElement,
    mode_label: HtmlElement,
    timer_fill: HtmlElement,
    pub board: HtmlElement,
    pub prompt: HtmlElement,
    prompt_text: HtmlElement,
    prompt_morph: HtmlElement,
    prompt_img: HtmlImageElement,
    cells: Vec<QuadrantCell>,
    feedback: HtmlElement,
    final_score: HtmlElement,
    rounds_done: HtmlElement,
    pub mode_buttons: Vec<(HtmlElement, Mode)>,
    pub reset_button: HtmlElement,
    pub again_button: HtmlElement,
}

fn create(doc: &Document, tag: &str, id: Option<&str>, style: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    if let Some(id) = id {
        el.set_id(id);
    }
    el.set_attribute("style", style)?;
    Ok(el)
}

fn image(doc: &Document, style: &str) -> Result<HtmlImageElement, JsValue> {
    let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    img.set_draggable(false);
    img.set_attribute("style", style)?;
    Ok(img)
}

fn button(doc: &Document, label: &str) -> Result<HtmlElement, JsValue> {
    let b = create(
        doc,
        "button",
        None,
        "margin:8px; padding:12px 22px; font-size:18px; border-radius:12px; border:1px solid #3a4a8a; background:#1d2550; color:#f1f1f1; cursor:pointer;",
    )?;
    b.set_text_content(Some(label));
    Ok(b)
}

fn show(el: &HtmlElement, visible: bool) {
    let _ = el
        .style()
        .set_property("display", if visible { "block" } else { "none" });
}

fn rounds_completed(round: u32, total: u32) -> String {
    format!("Rounds completed: {round}/{total}")
}

pub fn element_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Writes a message to the status line without touching game state.
pub fn report_status(msg: &str) {
    if let Some(el) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(STATUS_ID))
    {
        el.set_text_content(Some(msg));
    }
}

impl View {
    pub fn mount() -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let doc = win
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        if let Some(old) = doc.get_element_by_id(ROOT_ID) {
            old.remove();
        }

        let root = create(
            &doc,
            "div",
            Some(ROOT_ID),
            "position:fixed; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; font-family:'Noto Sans Hebrew','Noto Sans Arabic',sans-serif; color:#f1f1f1; background:#0f1330; user-select:none;",
        )?;

        // --- Lobby ---
        let lobby = create(&doc, "div", Some("simsim-lobby"), "text-align:center;")?;
        let title = create(&doc, "h1", None, "font-size:42px; margin-bottom:8px;")?;
        title.set_text_content(Some("Simsim"));
        let blurb = create(&doc, "p", None, "font-size:20px; margin-bottom:24px;")?;
        blurb.set_text_content(Some("Learn Arabic and Hebrew cognates through an interactive word-morphing game!"));
        lobby.append_child(&title)?;
        lobby.append_child(&blurb)?;
        let mut mode_buttons = Vec::new();
        for mode in MODES {
            let b = button(&doc, mode.label())?;
            b.set_attribute("data-mode", mode.id())?;
            lobby.append_child(&b)?;
            mode_buttons.push((b, mode));
        }

        // --- Game ---
        let game = create(&doc, "div", Some("simsim-game"), "display:none; text-align:center;")?;
        let hud = create(&doc, "div", Some("simsim-hud"), "font-family:'Fira Code',monospace; font-size:16px; margin-bottom:6px;")?;
        let mode_label = create(&doc, "div", Some("simsim-mode"), "font-size:14px; opacity:0.75; margin-bottom:6px;")?;
        let reset_button = button(&doc, "Reset Game")?;
        let timer = create(
            &doc,
            "div",
            Some("simsim-timer"),
            "width:min(90vw,560px); height:10px; margin:6px auto; background:#2a2f55; border-radius:5px; overflow:hidden;",
        )?;
        let timer_fill = create(&doc, "div", Some("simsim-timer-fill"), "height:100%; width:100%; background:#ffd166;")?;
        timer.append_child(&timer_fill)?;

        let board = create(
            &doc,
            "div",
            Some("simsim-board"),
            "position:relative; width:min(90vw,560px); aspect-ratio:1; margin:0 auto; border-radius:16px; border:1px solid #3a4a8a; overflow:hidden;",
        )?;
        let mut cells = Vec::new();
        for (i, (left, top)) in [("0", "0"), ("50%", "0"), ("0", "50%"), ("50%", "50%")]
            .iter()
            .enumerate()
        {
            let cell = create(
                &doc,
                "div",
                Some(format!("simsim-q{i}").as_str()),
                &format!("position:absolute; left:{left}; top:{top}; width:50%; height:50%; box-sizing:border-box; border:1px solid #2a2f55; display:flex; flex-direction:column; align-items:center; justify-content:center;"),
            )?;
            let img = image(&doc, "max-width:90%; max-height:75%; object-fit:cover; border-radius:8px;")?;
            let caption = create(&doc, "span", None, "font-size:30px;")?;
            cell.append_child(&img)?;
            cell.append_child(&caption)?;
            board.append_child(&cell)?;
            cells.push(QuadrantCell { img, caption });
        }
        let prompt = create(
            &doc,
            "div",
            Some("simsim-prompt"),
            "position:absolute; left:50%; top:50%; transform:translate(-50%,-50%); padding:10px 18px; cursor:grab; z-index:5; background:radial-gradient(circle at center, rgba(0,0,0,0.9) 0%, rgba(0,0,0,0.4) 30%, transparent 60%);",
        )?;
        let prompt_text = create(&doc, "span", None, "font-size:40px;")?;
        let prompt_morph = create(&doc, "span", None, "position:absolute; left:0; right:0; font-size:40px; opacity:0;")?;
        let prompt_img = image(&doc, "max-width:160px; pointer-events:none;")?;
        prompt.append_child(&prompt_text)?;
        prompt.append_child(&prompt_morph)?;
        prompt.append_child(&prompt_img)?;
        board.append_child(&prompt)?;

        let feedback = create(&doc, "div", Some("simsim-feedback"), "min-height:28px; font-size:22px; margin-top:8px;")?;
        let status = create(&doc, "div", Some(STATUS_ID), "min-height:18px; font-size:13px; opacity:0.7;")?;

        game.append_child(&hud)?;
        game.append_child(&mode_label)?;
        game.append_child(&reset_button)?;
        game.append_child(&timer)?;
        game.append_child(&board)?;
        game.append_child(&feedback)?;

        // --- Game over ---
        let over = create(&doc, "div", Some("simsim-over"), "display:none; text-align:center;")?;
        let heading = create(&doc, "h2", None, "font-size:36px;")?;
        heading.set_text_content(Some("Game Over!"));
        let final_score = create(&doc, "p", None, "font-size:24px;")?;
        let rounds_done = create(&doc, "p", None, "font-size:18px; opacity:0.8;")?;
        let again_button = button(&doc, "Play Again")?;
        over.append_child(&heading)?;
        over.append_child(&final_score)?;
        over.append_child(&rounds_done)?;
        over.append_child(&again_button)?;

        root.append_child(&lobby)?;
        root.append_child(&game)?;
        root.append_child(&over)?;
        root.append_child(&status)?;
        body.append_child(&root)?;

        Ok(Self {
            lobby,
            game,
            over,
            hud,
            mode_label,
            timer_fill,
            board,
            prompt,
            prompt_text,
            prompt_morph,
            prompt_img,
            cells,
            feedback,
            final_score,
            rounds_done,
            mode_buttons,
            reset_button,
            again_button,
        })
    }

    pub fn render(&self, snap: &Snapshot) {
        show(&self.lobby, snap.phase == Phase::Lobby);
        show(&self.over, snap.phase == Phase::GameOver);
        show(
            &self.game,
            matches!(snap.phase, Phase::Playing | Phase::RoundFeedback),
        );

        match snap.phase {
            Phase::Lobby => {}
            Phase::GameOver => {
                self.final_score
                    .set_text_content(Some(&format!("Final Score: {}", snap.score)));
                self.rounds_done
                    .set_text_content(Some(&rounds_completed(snap.round, snap.total_rounds)));
            }
            Phase::Playing | Phase::RoundFeedback => self.render_round(snap),
        }
    }

    fn render_round(&self, snap: &Snapshot) {
        self.hud.set_text_content(Some(&format!(
            "Round {}/{}   Score {}   Combo x{}",
            snap.round, snap.total_rounds, snap.score, snap.combo
        )));
        self.mode_label
            .set_text_content(Some(snap.mode.map(Mode::label).unwrap_or_default()));
        let _ = self
            .timer_fill
            .style()
            .set_property("width", &format!("{:.1}%", snap.time_fraction * 100.0));

        let images = matches!(snap.prompt, Some(PromptView::Image { .. }));
        for (cell, choice) in self.cells.iter().zip(&snap.choices) {
            if images {
                cell.img.set_src(&choice.label);
                cell.caption.set_text_content(None);
            } else {
                let _ = cell.img.remove_attribute("src");
                cell.caption.set_text_content(Some(&choice.label));
            }
            let _ = cell
                .img
                .style()
                .set_property("display", if images { "block" } else { "none" });
        }

        match &snap.prompt {
            Some(PromptView::Text { shown, morph_to }) => {
                self.prompt_text.set_text_content(Some(shown));
                self.prompt_morph.set_text_content(Some(morph_to));
                let reveal = snap.reveal_progress.unwrap_or(0.0) / 100.0;
                let _ = self
                    .prompt_text
                    .style()
                    .set_property("opacity", &format!("{:.2}", 1.0 - reveal));
                let _ = self
                    .prompt_morph
                    .style()
                    .set_property("opacity", &format!("{reveal:.2}"));
                let _ = self.prompt_img.style().set_property("display", "none");
            }
            Some(PromptView::Image { src }) => {
                self.prompt_text.set_text_content(None);
                self.prompt_morph.set_text_content(None);
                self.prompt_img.set_src(src);
                let _ = self.prompt_img.style().set_property("display", "block");
            }
            None => {}
        }

        let style = self.prompt.style();
        match snap.drag_position {
            Some(pos) => {
                let _ = style.set_property("left", &format!("{}px", pos.x));
                let _ = style.set_property("top", &format!("{}px", pos.y));
                let _ = style.set_property("transform", "none");
                let _ = style.set_property("cursor", "grabbing");
            }
            None => {
                let _ = style.set_property("left", "50%");
                let _ = style.set_property("top", "50%");
                let _ = style.set_property(
                    "transform",
                    match &snap.feedback {
                        Some(f) if f.correct => "translate(-50%,-50%) scale(1.1)",
                        _ => "translate(-50%,-50%)",
                    },
                );
                let _ = style.set_property("cursor", "grab");
            }
        }

        match &snap.feedback {
            Some(f) => {
                let text = match &f.revealed_hint {
                    Some(hint) => format!("{} ({hint})", f.message),
                    None => f.message.clone(),
                };
                self.feedback.set_text_content(Some(&text));
                let _ = self
                    .feedback
                    .style()
                    .set_property("color", if f.correct { "#06d6a0" } else { "#ef476f" });
            }
            None => self.feedback.set_text_content(None),
        }
    }
}
