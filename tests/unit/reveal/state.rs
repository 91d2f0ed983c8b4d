use super::*;

#[test]
fn snapshots_grow_one_char_at_a_time() {
    let mut s = RevealState::new("Hi!");
    let mut seen = vec![s.snapshot().to_owned()];
    while s.reveal_next() {
        seen.push(s.snapshot().to_owned());
    }
    assert_eq!(seen, vec!["", "H", "Hi", "Hi!"]);
    assert_eq!(s.revealed_count(), 3);
    assert!(!s.reveal_next());
    assert_eq!(s.revealed_count(), 3);
}

#[test]
fn multibyte_text_reveals_on_char_boundaries() {
    let mut s = RevealState::new("héllo ✓");
    assert_eq!(s.len(), 7);
    for _ in 0..2 {
        s.reveal_next();
    }
    assert_eq!(s.snapshot(), "hé");
    while s.reveal_next() {}
    assert_eq!(s.snapshot(), "héllo ✓");
}

#[test]
fn completion_is_reported_once() {
    let mut s = RevealState::new("a");
    assert!(!s.is_complete());
    assert!(s.mark_complete());
    assert!(!s.mark_complete());
    assert!(s.is_complete());
}

#[test]
fn empty_source_is_trivially_complete() {
    let s = RevealState::new("");
    assert!(s.is_empty());
    assert!(s.is_complete());
    assert_eq!(s.snapshot(), "");
}

#[test]
fn cursor_starts_visible_and_toggles() {
    let mut s = RevealState::new("x");
    assert!(s.cursor_visible());
    assert!(!s.toggle_cursor());
    assert!(s.toggle_cursor());
}
