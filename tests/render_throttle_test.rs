use sumstack::core::{fingerprint, start_game, SimpleRng};
use sumstack::term::RenderThrottle;
use sumstack::types::GameMode;

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
}

#[test]
fn render_throttle_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
    assert!(t.should_render(1, 2));
}

#[test]
fn render_throttle_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
    assert!(!t.should_render(10, 1));
    assert!(!t.should_render(249, 1));
    assert!(t.should_render(250, 1));
}

#[test]
fn state_changes_change_the_fingerprint() {
    let mut rng = SimpleRng::new(4);
    let state = start_game(GameMode::Classic, &mut rng);
    let id = state.blocks()[0].id;
    let selected = state.select_block(id, &mut rng);

    let mut t = RenderThrottle::new(1_000);
    assert!(t.should_render(0, fingerprint(&(&state, (0u8, 0u8)))));
    assert!(!t.should_render(1, fingerprint(&(&state.clone(), (0u8, 0u8)))));
    // Cursor movement alone is enough to redraw.
    assert!(t.should_render(2, fingerprint(&(&state, (1u8, 0u8)))));
    assert!(t.should_render(3, fingerprint(&(&selected, (1u8, 0u8)))));
}
