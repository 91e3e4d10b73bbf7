//! Property-based tests for draft editing and wrapping
//!
//! Tests invariants:
//! - Arbitrary edit sequences keep the cursor on a char boundary
//! - Wrapped lines never exceed the target width or end on a space

use proptest::prelude::*;
use ratatui::text::Line;

use crate::tui::widgets::draft_input::DraftInput;
use crate::tui::widgets::wrap::wrap_line;

#[derive(Debug, Clone)]
enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    DeleteWord,
    DeleteToStart,
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => prop_oneof![Just('a'), Just(' '), Just('é'), Just('你'), Just('🙂')].prop_map(Edit::Insert),
        1 => Just(Edit::Backspace),
        1 => Just(Edit::Delete),
        1 => Just(Edit::Left),
        1 => Just(Edit::Right),
        1 => Just(Edit::Home),
        1 => Just(Edit::End),
        1 => Just(Edit::DeleteWord),
        1 => Just(Edit::DeleteToStart),
    ]
}

fn apply(draft: &mut DraftInput, edit: &Edit) {
    match edit {
        Edit::Insert(c) => draft.insert_char(*c),
        Edit::Backspace => draft.backspace(),
        Edit::Delete => draft.delete(),
        Edit::Left => draft.move_left(),
        Edit::Right => draft.move_right(),
        Edit::Home => draft.move_home(),
        Edit::End => draft.move_end(),
        Edit::DeleteWord => draft.delete_word(),
        Edit::DeleteToStart => draft.delete_to_start(),
    }
}

proptest! {
    #[test]
    fn cursor_stays_on_char_boundary(edits in prop::collection::vec(arb_edit(), 0..60)) {
        let mut draft = DraftInput::new();
        for edit in &edits {
            apply(&mut draft, edit);
            let cursor = draft.cursor_position();
            prop_assert!(cursor <= draft.text().len());
            prop_assert!(draft.text().is_char_boundary(cursor));
            prop_assert!(draft.cursor_column() <= draft.text().chars().count());
        }
    }

    #[test]
    fn wrapped_lines_fit(text in "[a-z ]{0,200}", width in 2usize..40) {
        let wrapped = wrap_line(&Line::raw(text.clone()), width);
        for line in &wrapped {
            prop_assert!(line.width() <= width, "{:?} wider than {}", line.to_string(), width);
        }
        let original: String = text.split_whitespace().collect();
        let rewrapped: String = wrapped
            .iter()
            .flat_map(|l| l.to_string().split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(rewrapped, original);
        if wrapped.len() > 1 {
            for line in &wrapped {
                prop_assert!(!line.to_string().ends_with(' '), "trailing space in {:?}", line.to_string());
            }
        }
    }
}
