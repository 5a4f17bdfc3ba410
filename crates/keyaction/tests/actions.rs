//! End-to-end checks of the public action API.

use std::time::{Duration, Instant};

use keyaction::{
    ActionAtom, ActionInput, ActionMap, BUILTIN_ACTIONS, CanonicalKey, KeyChord, KeyDispatch,
    LookupError, Modifiers, builtin_defaults, shortcut_label, translate,
};

/// Raw platform name for each canonical key, as a browser or winit would send it.
fn raw_name(key: CanonicalKey) -> String {
    match key {
        CanonicalKey::LeftArrow => "ArrowLeft".into(),
        CanonicalKey::RightArrow => "ArrowRight".into(),
        CanonicalKey::UpArrow => "ArrowUp".into(),
        CanonicalKey::DownArrow => "ArrowDown".into(),
        CanonicalKey::Spacebar => " ".into(),
        CanonicalKey::Enter => "Enter".into(),
        CanonicalKey::Backspace => "Backspace".into(),
        CanonicalKey::Minus => "Subtract".into(),
        CanonicalKey::Plus => "Add".into(),
        CanonicalKey::Tab => "Tab".into(),
        CanonicalKey::Escape => "Escape".into(),
        CanonicalKey::Comma => ",".into(),
        CanonicalKey::Dot => ".".into(),
        CanonicalKey::Semicolon => ";".into(),
        CanonicalKey::Assign => "=".into(),
        other => other.as_str().to_uppercase(),
    }
}

fn all_modifier_sets() -> Vec<Modifiers> {
    let mut sets = Vec::new();
    for control in [false, true] {
        for shift in [false, true] {
            for alt in [false, true] {
                sets.push(Modifiers::new(control, shift, alt));
            }
        }
    }
    sets
}

#[test]
fn key_down_then_up_updates_pool_for_every_key() {
    let mut input = ActionInput::new();
    for key in CanonicalKey::ALL {
        let raw = raw_name(key);
        assert_eq!(translate(&raw), Some(key), "raw name {raw:?}");
        for modifiers in all_modifier_sets() {
            input.key_down(&raw, modifiers);
            let state = *input.pressed_states().get(key).expect("entry after key-down");
            assert!(state.pressed);
            assert_eq!(state.modifiers, modifiers);

            input.key_up(&raw, modifiers);
            let state = *input.pressed_states().get(key).expect("entry after key-up");
            assert!(!state.pressed);
            assert!(!state.control() && !state.shift() && !state.alt());
        }
    }
    assert_eq!(input.pressed_states().len(), CanonicalKey::ALL.len());
}

#[test]
fn exact_modifier_matching() {
    let mut input = ActionInput::with_actions(
        ActionMap::new()
            .with("plain", vec![CanonicalKey::A.into()])
            .with("ctrl", vec![KeyChord::new(CanonicalKey::A).with_control().into()]),
    );

    input.key_down("a", Modifiers::CTRL);
    assert_eq!(input.is_pressed("plain"), Ok(false));
    assert_eq!(input.is_pressed("ctrl"), Ok(true));

    input.key_down("a", Modifiers::NONE);
    assert_eq!(input.is_pressed("plain"), Ok(true));
    assert_eq!(input.is_pressed("ctrl"), Ok(false));
}

#[test]
fn mutating_a_copy_does_not_leak() {
    let mut input = ActionInput::with_actions(
        ActionMap::new().with("fire", vec![CanonicalKey::F.into()]),
    );
    let mut copy = input.get_actions();
    copy.insert("fire", vec![CanonicalKey::G.into()]);
    copy.remove("navigateUp");

    input.key_down("f", Modifiers::NONE);
    assert_eq!(input.is_pressed("fire"), Ok(true));
    assert!(input.is_pressed("navigateUp").is_ok());
}

#[test]
fn empty_replacement_leaves_exactly_builtins() {
    let mut input = ActionInput::with_actions(
        ActionMap::new().with("fire", vec![CanonicalKey::F.into()]),
    );
    input.set_actions(ActionMap::new());
    let actions = input.get_actions();
    assert_eq!(actions, builtin_defaults());
    assert_eq!(actions.names().collect::<Vec<_>>().len(), BUILTIN_ACTIONS.len());
    assert!(input.is_pressed("fire").is_err());
}

#[test]
fn escape_override_keeps_other_builtins() {
    let mut input = ActionInput::new();
    input.set_actions(ActionMap::new().with("escape", vec![CanonicalKey::Enter.into()]));
    let actions = input.get_actions();
    assert_eq!(
        actions.get("escape"),
        Some(&[ActionAtom::Key(KeyChord::new(CanonicalKey::Enter))][..])
    );
    for name in ["navigateLeft", "navigateRight", "navigateUp", "navigateDown"] {
        assert_eq!(actions.get(name), builtin_defaults().get(name), "{name}");
    }
}

#[test]
fn unknown_action_fails() {
    let input = ActionInput::new();
    assert_eq!(
        input.is_pressed("doesNotExist"),
        Err(LookupError {
            action: "doesNotExist".to_string()
        })
    );
}

#[test]
fn just_pressed_is_a_fifteen_millisecond_window() {
    let mut input =
        ActionInput::with_actions(ActionMap::new().with("x", vec![CanonicalKey::A.into()]));
    let t = Instant::now();
    input.key_down_at("a", Modifiers::NONE, t);
    assert_eq!(input.just_pressed_at("x", t + Duration::from_millis(5)), Ok(true));
    assert_eq!(input.just_pressed_at("x", t + Duration::from_millis(20)), Ok(false));
}

#[test]
fn translator_examples() {
    assert_eq!(translate("ArrowLeft"), Some(CanonicalKey::LeftArrow));
    assert_eq!(translate("ArrowLeft").map(CanonicalKey::as_str), Some("leftArrow"));
    assert_eq!(translate("a"), Some(CanonicalKey::A));
    assert_eq!(translate("F3").map(CanonicalKey::as_str), Some("f3"));
    assert_eq!(translate("unknownkey"), None);
}

#[test]
fn unrecognized_keys_change_nothing() {
    let mut input = ActionInput::new();
    let fired = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    for _ in 0..2 {
        let fired = std::sync::Arc::clone(&fired);
        input.events_mut().on_input_pressed(move |_| {
            fired.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
    }
    assert_eq!(input.key_down("Meta", Modifiers::NONE), KeyDispatch::Unrecognized);
    assert_eq!(input.key_up("Meta", Modifiers::NONE), KeyDispatch::Unrecognized);
    assert!(input.pressed_states().is_empty());
    assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 0);

    input.key_down("q", Modifiers::NONE);
    assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn labels_follow_the_current_map() {
    let mut input = ActionInput::new();
    assert_eq!(shortcut_label(input.actions(), "navigateLeft").as_deref(), Some("Left"));
    input.set_actions(ActionMap::new().with(
        "navigateLeft",
        vec![KeyChord::new(CanonicalKey::H).with_alt().into()],
    ));
    assert_eq!(shortcut_label(input.actions(), "navigateLeft").as_deref(), Some("Alt+H"));
}
