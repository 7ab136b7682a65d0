// Integration tests (native) for the `simsim` crate.
// These tests avoid wasm-specific functionality and drive the session the way
// the browser host does: forward events, then act on the drained effects.

use rand::SeedableRng;
use rand::rngs::StdRng;
use simsim::{
    AudioCue, ConfigError, Effect, Mode, Phase, Point, Presentation, Quadrant, Rect, Session,
    SessionConfig, Ticket, WordBank,
};

/// Minimal stand-in for the browser host: remembers the live ticker and the
/// pending delayed transition, dropping both on `CancelTasks`.
#[derive(Default)]
struct FakeHost {
    ticker: Option<Ticket>,
    pending: Option<(Ticket, u32)>,
    audio: Vec<AudioCue>,
}

impl FakeHost {
    fn pump(&mut self, session: &mut Session<StdRng>) {
        for effect in session.drain_effects() {
            match effect {
                Effect::CancelTasks => {
                    self.ticker = None;
                    self.pending = None;
                }
                Effect::StartTicker { ticket, interval_ms } => {
                    assert_eq!(interval_ms, 100);
                    self.ticker = Some(ticket);
                }
                Effect::ScheduleAdvance { ticket, delay_ms } => {
                    self.pending = Some((ticket, delay_ms));
                }
                Effect::Audio(cue) => self.audio.push(cue),
            }
        }
    }

    fn tick(&mut self, session: &mut Session<StdRng>) {
        if let Some(t) = self.ticker {
            session.on_tick(t);
        }
        self.pump(session);
    }

    fn fire_delay(&mut self, session: &mut Session<StdRng>) {
        let (t, delay) = self.pending.take().expect("no delayed transition pending");
        assert_eq!(delay, 2000);
        session.on_advance(t);
        self.pump(session);
    }
}

fn text_session(rounds: u32, seed: u64) -> (Session<StdRng>, FakeHost) {
    let cfg = SessionConfig::default()
        .with_total_rounds(rounds)
        .with_presentation(Presentation::Text);
    let bank = WordBank::cognates().unwrap();
    let mut session = Session::with_rng(cfg, bank, StdRng::seed_from_u64(seed)).unwrap();
    let mut host = FakeHost::default();
    host.pump(&mut session);
    (session, host)
}

#[test]
fn single_round_correct_drop_scores_100_then_game_over() {
    let (mut s, mut host) = text_session(1, 1);
    assert_eq!(host.audio, vec![AudioCue::Lobby]);
    s.select_mode(Mode::SourceToTarget);
    host.pump(&mut s);
    assert!(host.ticker.is_some());

    let q = s.round().unwrap().correct_quadrant();
    s.drop_in(q);
    host.pump(&mut s);
    assert_eq!(s.score(), 100);
    assert_eq!(s.phase(), Phase::RoundFeedback);
    assert_eq!(s.feedback().unwrap().message, "+100 points!");
    assert!(host.ticker.is_none());

    host.fire_delay(&mut s);
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.score(), 100);
    assert_eq!(host.audio.last(), Some(&AudioCue::StopAll));
    assert!(host.pending.is_none());
}

#[test]
fn full_session_of_timeouts_keeps_score_zero() {
    let (mut s, mut host) = text_session(3, 2);
    s.select_mode(Mode::Mixed);
    host.pump(&mut s);
    for round in 1..=3 {
        assert_eq!(s.current_round(), round);
        let mut ticks = 0;
        while s.phase() == Phase::Playing {
            host.tick(&mut s);
            ticks += 1;
            assert!(ticks <= 70);
        }
        assert_eq!(ticks, 70);
        assert_eq!(s.feedback().unwrap().message, "Time's up!");
        // Further ticks while feedback shows do nothing.
        host.tick(&mut s);
        assert_eq!(s.phase(), Phase::RoundFeedback);
        host.fire_delay(&mut s);
    }
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.score(), 0);
    assert_eq!(s.combo(), 0);
}

#[test]
fn combo_grows_score_and_resets_on_miss() {
    let (mut s, mut host) = text_session(4, 3);
    s.select_mode(Mode::TargetToSource);
    host.pump(&mut s);
    let mut expected = 0;
    for (i, hit) in [true, true, false, true].into_iter().enumerate() {
        // Let ten ticks pass: 6.0s of 7.0s left -> time bonus 86.
        for _ in 0..10 {
            host.tick(&mut s);
        }
        let combo_before = s.combo();
        let round = s.round().unwrap().clone();
        let q = if hit {
            round.correct_quadrant()
        } else {
            Quadrant::ALL[(round.correct + 1) % 4]
        };
        s.drop_in(q);
        host.pump(&mut s);
        if hit {
            expected += (86 * (10 + combo_before)).div_ceil(10);
            assert_eq!(s.combo(), combo_before + 1, "round {}", i + 1);
        } else {
            assert_eq!(s.combo(), 0);
        }
        assert_eq!(s.score(), expected);
        host.fire_delay(&mut s);
    }
    // 86 + 95 (86 * 1.1 = 94.6) + 0 + 86
    assert_eq!(expected, 267);
    assert_eq!(s.phase(), Phase::GameOver);
}

#[test]
fn pointer_drag_through_host_coordinates() {
    let (mut s, mut host) = text_session(1, 4);
    s.select_mode(Mode::SourceToTarget);
    host.pump(&mut s);
    let board = Rect::new(40.0, 60.0, 500.0, 500.0);
    let prompt = Rect::new(250.0, 290.0, 80.0, 40.0);
    // Grab the prompt near its top-left corner and carry it to the bottom-right cell.
    s.pointer_down(Point::new(255.0, 295.0), prompt, board);
    s.pointer_move(Point::new(500.0, 500.0), board);
    s.pointer_move(Point::new(520.0, 530.0), board);
    s.pointer_up(80.0, 40.0, board);
    host.pump(&mut s);
    assert_eq!(s.phase(), Phase::RoundFeedback);
    let correct = s.round().unwrap().correct_quadrant() == Quadrant::BottomRight;
    assert_eq!(s.feedback().unwrap().correct, correct);
}

#[test]
fn reset_mid_round_cancels_everything() {
    let (mut s, mut host) = text_session(5, 5);
    s.select_mode(Mode::SourceToTarget);
    host.pump(&mut s);
    let stale = host.ticker.unwrap();
    s.reset();
    host.pump(&mut s);
    assert!(host.ticker.is_none() && host.pending.is_none());
    assert_eq!(s.phase(), Phase::Lobby);
    for _ in 0..100 {
        s.on_tick(stale);
    }
    assert_eq!(s.phase(), Phase::Lobby);
    // A fresh session can start after reset.
    s.select_mode(Mode::Mixed);
    host.pump(&mut s);
    assert_eq!(s.current_round(), 1);
    assert!(host.audio.iter().filter(|c| matches!(c, AudioCue::Game { .. })).count() == 2);
}

#[test]
fn exhausted_bank_is_a_startup_error() {
    let items = WordBank::cognates().unwrap().items()[..3].to_vec();
    assert!(matches!(
        WordBank::new(items),
        Err(ConfigError::ExhaustedBank { .. })
    ));
    let bank = WordBank::cognates().unwrap();
    let bad = SessionConfig::default().with_total_rounds(0);
    assert!(Session::with_rng(bad, bank, StdRng::seed_from_u64(0)).is_err());
}

#[cfg(feature = "serde_json")]
#[test]
fn snapshot_serializes_for_js_renderers() {
    let (mut s, _host) = text_session(2, 6);
    s.select_mode(Mode::SourceToTarget);
    let json = s.snapshot().to_json();
    assert!(json.contains("\"phase\":\"Playing\""));
    assert!(json.contains("\"kind\":\"text\""));
    assert!(json.contains("\"quadrant\":\"TopLeft\""));
}
