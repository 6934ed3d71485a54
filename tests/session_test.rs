use bubble_pop::consts::COMBO_TIMEOUT_MS;
use bubble_pop::sim::{GameState, Phase, Session, SpawnParams};
use glam::Vec2;

const PARAMS: SpawnParams = SpawnParams {
    speed: 2.0,
    size: 3.0,
};

/// Lay `count` bubbles out in a row, far apart, fully on screen and still
fn lay_row(state: &mut GameState, count: usize) {
    for i in 0..count {
        state.spawn_bubble(&PARAMS);
        let bubble = state.bubbles.last_mut().unwrap();
        bubble.pos = Vec2::new(100.0 + i as f32 * 150.0, 400.0);
        bubble.radius = 30.0;
        bubble.speed = 0.0;
        bubble.wobble_rate = 0.0;
    }
}

fn session_with_row(best: u32, count: usize) -> Session {
    let mut state = GameState::new(2024, 1600.0, 900.0, best);
    lay_row(&mut state, count);
    Session::new(state, PARAMS)
}

fn tap_nth(session: &mut Session, index: usize, now: f64) -> Option<u32> {
    let x = 100.0 + index as f32 * 150.0;
    session.tap(x, 400.0, now).map(|e| e.combo)
}

#[test]
fn test_combo_sequence_with_delayed_fourth_pop() {
    let mut session = session_with_row(0, 4);
    session.start(0.0);

    assert_eq!(tap_nth(&mut session, 0, 100.0), Some(2));
    assert_eq!(tap_nth(&mut session, 1, 600.0), Some(3));
    assert_eq!(tap_nth(&mut session, 2, 1100.0), Some(4));

    // Past the inactivity window: the expiry fires first, then the pop counts
    let late = 1100.0 + COMBO_TIMEOUT_MS + 1.0;
    assert_eq!(tap_nth(&mut session, 3, late), Some(2));
    assert_eq!(session.state.score.pop_count, 4);
}

#[test]
fn test_combo_expires_while_paused() {
    let mut session = session_with_row(0, 2);
    session.start(0.0);
    assert_eq!(tap_nth(&mut session, 0, 10.0), Some(2));

    session.pause();
    session.advance(10.0 + COMBO_TIMEOUT_MS + 1.0);
    assert_eq!(session.phase(), Phase::Paused);
    assert_eq!(session.state.score.combo, 1);

    // Play picks up with a fresh combo
    session.resume(2000.0);
    assert_eq!(tap_nth(&mut session, 1, 2000.0), Some(2));
}

#[test]
fn test_combo_resets_on_frame_without_pop() {
    let mut session = session_with_row(0, 2);
    session.start(0.0);
    tap_nth(&mut session, 0, 0.0);
    assert_eq!(session.state.score.combo, 2);

    session.advance(COMBO_TIMEOUT_MS - 1.0);
    assert_eq!(session.state.score.combo, 2);
    session.advance(COMBO_TIMEOUT_MS);
    assert_eq!(session.state.score.combo, 1);
}

#[test]
fn test_same_spot_pops_once() {
    let mut session = session_with_row(0, 1);
    session.start(0.0);

    assert!(tap_nth(&mut session, 0, 10.0).is_some());
    assert!(tap_nth(&mut session, 0, 20.0).is_none());
    assert_eq!(session.state.score.pop_count, 1);
}

#[test]
fn test_miss_does_not_touch_combo() {
    let mut session = session_with_row(0, 1);
    session.start(0.0);
    assert_eq!(session.tap(5.0, 5.0, 10.0), None);
    assert_eq!(session.state.score.combo, 1);
    assert_eq!(session.state.score.pop_count, 0);
}

#[test]
fn test_best_score_survives_restart() {
    let mut session = session_with_row(0, 5);
    session.start(0.0);
    for i in 0..5 {
        tap_nth(&mut session, i, 10.0 * i as f64).unwrap();
    }
    assert_eq!(session.state.score.best, 5);

    session.stop();
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.state.score.pop_count, 0);
    assert_eq!(session.state.score.best, 5);

    // Restart in the same session and reach 3 pops
    session.start(1000.0);
    lay_row(&mut session.state, 3);
    for i in 0..3 {
        let event = session.tap(100.0 + i as f32 * 150.0, 400.0, 1010.0).unwrap();
        assert!(!event.new_best);
    }
    assert_eq!(session.state.score.pop_count, 3);
    assert_eq!(session.state.score.best, 5);
}

#[test]
fn test_pop_spawns_particles_that_fade_out() {
    let mut session = session_with_row(0, 1);
    session.start(0.0);
    let event = session.tap(100.0, 400.0, 0.0).unwrap();
    assert_eq!(session.state.particles.len(), 16);
    assert_eq!(event.pos, Vec2::new(100.0, 400.0));

    // Slowest decay is 0.02/frame: 50 frames, at most 3 frames per advance
    let mut now = 0.0;
    for _ in 0..40 {
        now += 100.0;
        session.advance(now);
    }
    assert!(session.state.particles.is_empty());
}
