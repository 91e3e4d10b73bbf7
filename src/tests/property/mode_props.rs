//! Property-based tests for mode toggles
//!
//! Tests invariants:
//! - Perspective returns to its start after three presses
//! - Each toggle leaves the other modes untouched
//! - Every reachable state survives a JSON round trip

use proptest::prelude::*;

use crate::core::chat::{ModeState, ModeToggle, Perspective};

fn arb_perspective() -> impl Strategy<Value = Perspective> {
    prop_oneof![
        Just(Perspective::Off),
        Just(Perspective::Novel),
        Just(Perspective::Protagonist),
    ]
}

fn arb_modes() -> impl Strategy<Value = ModeState> {
    (any::<bool>(), arb_perspective(), any::<bool>()).prop_map(
        |(story_progress, perspective, scene_setting)| ModeState {
            story_progress,
            perspective,
            scene_setting,
        },
    )
}

fn arb_toggle() -> impl Strategy<Value = ModeToggle> {
    (0usize..3).prop_map(ModeToggle::from_index)
}

proptest! {
    #[test]
    fn perspective_cycles_in_three(modes in arb_modes()) {
        let once = modes.toggled(ModeToggle::Perspective);
        prop_assert_ne!(once.perspective, modes.perspective);
        let back = once
            .toggled(ModeToggle::Perspective)
            .toggled(ModeToggle::Perspective);
        prop_assert_eq!(back, modes);
    }

    #[test]
    fn flags_flip_and_return(modes in arb_modes()) {
        for toggle in [ModeToggle::StoryProgress, ModeToggle::SceneSetting] {
            let once = modes.toggled(toggle);
            prop_assert_ne!(once.is_active(toggle), modes.is_active(toggle));
            prop_assert_eq!(once.toggled(toggle), modes);
        }
    }

    #[test]
    fn toggles_are_independent(modes in arb_modes(), toggle in arb_toggle()) {
        let next = modes.toggled(toggle);
        for other in ModeToggle::ALL {
            if other != toggle {
                prop_assert_eq!(next.is_active(other), modes.is_active(other));
            }
        }
        if toggle != ModeToggle::Perspective {
            prop_assert_eq!(next.perspective, modes.perspective);
        }
    }

    #[test]
    fn json_roundtrip(presses in prop::collection::vec(arb_toggle(), 0..10)) {
        let modes = presses
            .into_iter()
            .fold(ModeState::default(), ModeState::toggled);
        let json = serde_json::to_string(&modes).unwrap();
        let parsed: ModeState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, modes);
    }
}
