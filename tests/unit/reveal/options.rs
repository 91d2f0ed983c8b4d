use super::*;

#[test]
fn defaults_match_the_stock_typewriter() {
    let o = TypewriterOptions::default();
    assert_eq!(o.speed_ms, 50);
    assert_eq!(o.start_delay_ms, 0);
    assert!(o.show_cursor);
    assert_eq!(o.cursor_char, "_");
    assert!(o.start_animation);
}

#[test]
fn json_fills_missing_fields_and_clamps_negative_durations() {
    let o: TypewriterOptions =
        serde_json::from_str(r#"{"text":"Hi","speed_ms":-30,"start_delay_ms":1500}"#).unwrap();
    assert_eq!(o.text, "Hi");
    assert_eq!(o.speed_ms, 0);
    assert_eq!(o.start_delay_ms, 1500);
    assert_eq!(o.cursor_char, "_");
}

#[test]
fn unknown_fields_are_rejected() {
    let err = serde_json::from_str::<TypewriterOptions>(r#"{"text":"x","sped_ms":3}"#);
    assert!(err.is_err());
}

#[test]
fn builder_clamps() {
    let o = TypewriterOptions::new("x").speed(-1).start_delay(-100);
    assert_eq!((o.speed_ms, o.start_delay_ms), (0, 0));
}

#[test]
fn cursor_glyph_and_start_signal_do_not_force_a_reset() {
    let a = TypewriterOptions::new("Hi");
    assert!(!a.requires_reset(&a.clone().cursor_char("|")));
    assert!(!a.requires_reset(&a.clone().start_animation(false)));
    assert!(a.requires_reset(&a.clone().speed(10)));
    assert!(a.requires_reset(&a.clone().start_delay(10)));
    assert!(a.requires_reset(&a.clone().show_cursor(false)));
    assert!(a.requires_reset(&TypewriterOptions::new("Ho")));
}
