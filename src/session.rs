//! Session state machine: Lobby -> Playing -> RoundFeedback -> ... -> GameOver -> Lobby.
//!
//! The session never owns real timers. Whenever it needs a ticker or a delayed
//! transition it queues an [`Effect`] carrying a [`Ticket`]; the host turns
//! that into an interval / timeout and hands the ticket back when it fires.
//! Every transition bumps the generation, so tickets from an earlier round or
//! an earlier session are recognised as stale and dropped.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bank::WordBank;
use crate::config::{Presentation, SessionConfig};
use crate::drag::{DragState, Point, Quadrant, Rect};
use crate::error::Result;
use crate::round::{Direction, Mode, Round, generate_round};
use crate::scoring;
use crate::timer::{CountdownTimer, TimerEvent};

/// Number of in-game music tracks (`/sounds/1.mp3` .. `/sounds/3.mp3`).
pub const MUSIC_TRACKS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Lobby,
    Playing,
    RoundFeedback,
    GameOver,
}

/// Generation-stamped handle for a scheduled host task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    /// Looping ambient lobby track.
    Lobby,
    /// Looping in-game track, 1..=MUSIC_TRACKS.
    Game { track: u8 },
    StopAll,
}

/// Work the host has to carry out on the session's behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Drop any ticker or pending delayed transition.
    CancelTasks,
    /// Call `on_tick(ticket)` every `interval_ms`.
    StartTicker { ticket: Ticket, interval_ms: u32 },
    /// Call `on_advance(ticket)` once after `delay_ms`.
    ScheduleAdvance { ticket: Ticket, delay_ms: u32 },
    Audio(AudioCue),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct { points: u32 },
    Incorrect,
    TimedOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
    pub revealed_hint: Option<String>,
}

/// What the player is asked to place.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PromptView {
    Text { shown: String, morph_to: String },
    Image { src: String },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChoiceView {
    pub quadrant: Quadrant,
    /// Answer-script word, or photo URL for image banks.
    pub label: String,
    pub concept: String,
}

/// Everything the rendering layer needs after a transition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: Option<Mode>,
    pub round: u32,
    pub total_rounds: u32,
    pub score: u32,
    pub combo: u32,
    pub time_remaining: f64,
    pub time_fraction: f64,
    pub reveal_progress: Option<f64>,
    pub direction: Option<Direction>,
    pub prompt: Option<PromptView>,
    pub choices: Vec<ChoiceView>,
    pub drag_position: Option<Point>,
    pub feedback: Option<Feedback>,
}

#[cfg(feature = "serde_json")]
impl Snapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

enum Resolution {
    Dropped(Quadrant),
    Expired,
}

pub struct Session<R: Rng = StdRng> {
    config: SessionConfig,
    bank: WordBank,
    rng: R,
    phase: Phase,
    mode: Option<Mode>,
    score: u32,
    combo: u32,
    current_round: u32,
    round: Option<Round>,
    // First resolution of the current round wins.
    resolved: bool,
    last_outcome: Option<Outcome>,
    timer: CountdownTimer,
    drag: DragState,
    feedback: Option<Feedback>,
    generation: u64,
    effects: Vec<Effect>,
}

impl Session<StdRng> {
    pub fn new(config: SessionConfig, bank: WordBank) -> Result<Self> {
        Self::with_rng(config, bank, StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: SessionConfig, bank: WordBank, rng: R) -> Result<Self> {
        config.validate()?;
        let timer = CountdownTimer::new(config.tick_secs());
        let mut session = Self {
            config,
            bank,
            rng,
            phase: Phase::Lobby,
            mode: None,
            score: 0,
            combo: 0,
            current_round: 0,
            round: None,
            resolved: false,
            last_outcome: None,
            timer,
            drag: DragState::default(),
            feedback: None,
            generation: 0,
            effects: Vec::new(),
        };
        session.effects.push(Effect::Audio(AudioCue::Lobby));
        Ok(session)
    }

    // --- Transitions ---------------------------------------------------------

    /// Lobby -> Playing. Ignored outside the lobby.
    pub fn select_mode(&mut self, mode: Mode) {
        if self.phase != Phase::Lobby {
            log::debug!("mode selection ignored in {:?}", self.phase);
            return;
        }
        log::info!("starting session: {} ({} rounds)", mode.label(), self.config.total_rounds);
        self.mode = Some(mode);
        self.score = 0;
        self.combo = 0;
        self.current_round = 0;
        let track = self.rng.gen_range(1..=MUSIC_TRACKS);
        self.effects.push(Effect::Audio(AudioCue::Game { track }));
        self.start_round();
    }

    /// String form used by the JS host; unknown ids are ignored.
    pub fn select_mode_str(&mut self, mode: &str) {
        match mode.parse::<Mode>() {
            Ok(m) => self.select_mode(m),
            Err(()) => log::debug!("unknown mode '{mode}' ignored"),
        }
    }

    /// Timer tick from the host.
    pub fn on_tick(&mut self, ticket: Ticket) {
        if !self.is_current(ticket) || self.phase != Phase::Playing {
            log::debug!("stale tick {ticket:?} ignored");
            return;
        }
        if let TimerEvent::Expired = self.timer.tick() {
            self.resolve(Resolution::Expired);
        }
    }

    /// Feedback delay elapsed: next round or game over.
    pub fn on_advance(&mut self, ticket: Ticket) {
        if !self.is_current(ticket) || self.phase != Phase::RoundFeedback {
            log::debug!("stale advance {ticket:?} ignored");
            return;
        }
        if self.current_round < self.config.total_rounds {
            self.start_round();
        } else {
            self.finish();
        }
    }

    /// Drop the prompt straight into a quadrant.
    pub fn drop_in(&mut self, quadrant: Quadrant) {
        self.resolve(Resolution::Dropped(quadrant));
    }

    /// Back to the lobby from any phase, clearing all session state.
    pub fn reset(&mut self) {
        log::info!("session reset from {:?}", self.phase);
        self.bump_generation();
        self.effects.push(Effect::CancelTasks);
        self.timer.cancel();
        self.drag.clear();
        self.phase = Phase::Lobby;
        self.mode = None;
        self.score = 0;
        self.combo = 0;
        self.current_round = 0;
        self.round = None;
        self.resolved = false;
        self.last_outcome = None;
        self.feedback = None;
        self.effects.push(Effect::Audio(AudioCue::Lobby));
    }

    // --- Pointer input -------------------------------------------------------

    pub fn pointer_down(&mut self, pointer: Point, element: Rect, container: Rect) {
        if !self.accepts_input() {
            return;
        }
        self.drag.begin(pointer, element, container);
    }

    pub fn pointer_move(&mut self, pointer: Point, container: Rect) -> Option<Point> {
        if !self.accepts_input() {
            return None;
        }
        self.drag.move_to(pointer, container)
    }

    /// Pointer released (or left the container) with the element's size.
    pub fn pointer_up(&mut self, element_width: f64, element_height: f64, container: Rect) {
        if !self.accepts_input() {
            return;
        }
        if let Some(quadrant) = self.drag.release(element_width, element_height, container) {
            self.drop_in(quadrant);
        }
    }

    // --- Internals -----------------------------------------------------------

    fn start_round(&mut self) {
        let Some(mode) = self.mode else {
            return;
        };
        self.current_round += 1;
        let round = generate_round(
            &self.bank,
            mode,
            self.config.presentation,
            self.current_round,
            &mut self.rng,
        );
        log::debug!("round {}/{}: {:?}", self.current_round, self.config.total_rounds, round);
        self.round = Some(round);
        self.resolved = false;
        self.last_outcome = None;
        self.feedback = None;
        self.drag.clear();
        self.timer.start(self.config.round_secs);
        self.phase = Phase::Playing;
        let ticket = self.bump_generation();
        self.effects.push(Effect::CancelTasks);
        self.effects.push(Effect::StartTicker {
            ticket,
            interval_ms: self.config.tick_ms,
        });
    }

    fn resolve(&mut self, resolution: Resolution) {
        if self.phase != Phase::Playing || self.resolved {
            log::debug!("round already resolved, ignoring");
            return;
        }
        let Some(round) = self.round.as_ref() else {
            return;
        };
        self.resolved = true;
        let remaining = self.timer.remaining_secs();
        let total = self.timer.total_secs();
        self.timer.cancel();
        self.drag.clear();

        let outcome = match resolution {
            Resolution::Dropped(q) if round.is_correct(q) => Outcome::Correct {
                points: scoring::score(remaining, total, self.combo),
            },
            Resolution::Dropped(_) => Outcome::Incorrect,
            Resolution::Expired => Outcome::TimedOut,
        };
        let hint = self.bank.get(round.correct_id()).and_then(|i| i.hint.clone());

        self.feedback = Some(match outcome {
            Outcome::Correct { points } => {
                self.score = self.score.saturating_add(points);
                self.combo += 1;
                Feedback {
                    correct: true,
                    message: format!("+{points} points!"),
                    revealed_hint: None,
                }
            }
            Outcome::Incorrect | Outcome::TimedOut => {
                self.combo = 0;
                Feedback {
                    correct: false,
                    message: if outcome == Outcome::TimedOut {
                        "Time's up!".to_string()
                    } else {
                        "Incorrect!".to_string()
                    },
                    revealed_hint: hint,
                }
            }
        });
        self.last_outcome = Some(outcome);
        self.phase = Phase::RoundFeedback;

        let ticket = self.bump_generation();
        self.effects.push(Effect::CancelTasks);
        self.effects.push(Effect::ScheduleAdvance {
            ticket,
            delay_ms: self.config.feedback_delay_ms,
        });
    }

    fn finish(&mut self) {
        log::info!("game over: score {} after {} rounds", self.score, self.current_round);
        self.bump_generation();
        self.effects.push(Effect::CancelTasks);
        self.effects.push(Effect::Audio(AudioCue::StopAll));
        self.timer.cancel();
        self.drag.clear();
        self.round = None;
        self.feedback = None;
        self.phase = Phase::GameOver;
    }

    fn bump_generation(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    fn accepts_input(&self) -> bool {
        self.phase == Phase::Playing && !self.resolved && self.round.is_some()
    }

    // --- Queries -------------------------------------------------------------

    /// Takes the queued host effects, oldest first.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn time_remaining(&self) -> f64 {
        self.timer.remaining_secs()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = self.round.as_ref();
        let prompt = round.and_then(|r| {
            let item = self.bank.get(r.correct_id())?;
            Some(match self.config.presentation {
                Presentation::Text => PromptView::Text {
                    shown: r.direction.prompt_text(item).to_string(),
                    morph_to: r.direction.answer_text(item).to_string(),
                },
                Presentation::Image => PromptView::Image {
                    src: item.morph_path(r.direction.morph_tag()),
                },
            })
        });
        let choices = round
            .map(|r| {
                r.choices
                    .iter()
                    .zip(Quadrant::ALL)
                    .filter_map(|(id, quadrant)| {
                        let item = self.bank.get(*id)?;
                        let label = match self.config.presentation {
                            Presentation::Text => r.direction.answer_text(item).to_string(),
                            Presentation::Image => item.photo_path(),
                        };
                        Some(ChoiceView {
                            quadrant,
                            label,
                            concept: item.concept.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Snapshot {
            phase: self.phase,
            mode: self.mode,
            round: self.current_round,
            total_rounds: self.config.total_rounds,
            score: self.score,
            combo: self.combo,
            time_remaining: self.timer.remaining_secs(),
            time_fraction: if round.is_some() { self.timer.fraction() } else { 0.0 },
            reveal_progress: (self.config.reveal_morph && round.is_some())
                .then(|| self.timer.reveal_progress()),
            direction: round.map(|r| r.direction),
            prompt,
            choices,
            drag_position: self.drag.position(),
            feedback: self.feedback.clone(),
        }
    }
}
