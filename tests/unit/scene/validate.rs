use super::*;
use crate::reveal::options::TypewriterOptions;
use crate::scene::model::{RegionDef, ScrollStepDef};

fn region(id: &str, top: f64) -> RegionDef {
    RegionDef {
        id: id.to_owned(),
        top,
        height: 100.0,
        threshold: Some(0.3),
        typewriter: Some(TypewriterOptions::new("hello")),
    }
}

fn scene(regions: Vec<RegionDef>, scroll: Vec<ScrollStepDef>) -> SceneDef {
    SceneDef {
        viewport_height: 200.0,
        duration_ms: 1_000,
        initial_offset: 0.0,
        regions,
        scroll,
    }
}

fn messages(def: &SceneDef) -> Vec<String> {
    match validate_scene(def) {
        Ok(()) => vec![],
        Err(e) => e.errors.iter().map(|e| e.to_string()).collect(),
    }
}

#[test]
fn well_formed_scene_passes() {
    let def = scene(
        vec![region("hero", 0.0), region("about", 600.0)],
        vec![ScrollStepDef {
            at_ms: 100,
            offset: 500.0,
        }],
    );
    assert!(validate_scene(&def).is_ok());
}

#[test]
fn errors_carry_json_paths() {
    let mut bad = region("", -5.0);
    bad.threshold = Some(1.5);
    let def = scene(vec![region("a", 0.0), bad], vec![]);
    let msgs = messages(&def);
    assert!(msgs.contains(&"$.regions[1].id: must be non-empty".to_owned()));
    assert!(msgs.iter().any(|m| m.starts_with("$.regions[1].top:")));
    assert!(msgs.contains(&"$.regions[1].threshold: must be within [0, 1]".to_owned()));
}

#[test]
fn duplicate_ids_are_rejected() {
    let def = scene(vec![region("a", 0.0), region("a", 10.0)], vec![]);
    let msgs = messages(&def);
    assert_eq!(msgs, vec!["$.regions[1].id: duplicate region id 'a'".to_owned()]);
}

#[test]
fn scroll_steps_must_not_go_back_in_time() {
    let def = scene(
        vec![region("a", 0.0)],
        vec![
            ScrollStepDef {
                at_ms: 200,
                offset: 10.0,
            },
            ScrollStepDef {
                at_ms: 100,
                offset: 20.0,
            },
        ],
    );
    let msgs = messages(&def);
    assert_eq!(
        msgs,
        vec!["$.scroll[1].at_ms: must not precede the previous step (200ms)".to_owned()]
    );
}

#[test]
fn visible_cursor_needs_a_glyph() {
    let mut r = region("a", 0.0);
    r.typewriter = Some(TypewriterOptions::new("x").cursor_char(""));
    let msgs = messages(&scene(vec![r], vec![]));
    assert_eq!(
        msgs,
        vec!["$.regions[0].typewriter.cursor_char: must be non-empty when show_cursor is set".to_owned()]
    );
}

#[test]
fn multiple_errors_render_one_per_line() {
    let mut def = scene(vec![], vec![]);
    def.viewport_height = 0.0;
    def.initial_offset = f64::NAN;
    let err = validate_scene(&def).unwrap_err();
    assert_eq!(err.to_string().lines().count(), 2);
}
