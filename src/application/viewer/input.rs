// SPDX-License-Identifier: MPL-2.0
//! Keyboard and pointer bindings.
//!
//! Alternate inputs map onto the same transitions as touch navigation; they
//! never introduce states of their own.

/// A viewer transition that can be triggered from any input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    Previous,
    Next,
    Close,
    ToggleInfo,
    ToggleViewMode,
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Character(String),
}

/// A click or tap outside of gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Click on the media area at horizontal position `x`.
    Click { x: f32, viewport_width: f32 },
    BackButton,
    InfoButton,
    GridButton,
}

/// Maps a key press to a viewer command.
#[must_use]
pub fn command_for_key(key: &Key) -> Option<ViewerCommand> {
    match key {
        Key::ArrowLeft => Some(ViewerCommand::Previous),
        Key::ArrowRight => Some(ViewerCommand::Next),
        Key::Escape => Some(ViewerCommand::Close),
        Key::Character(c) => match c.to_lowercase().as_str() {
            "i" => Some(ViewerCommand::ToggleInfo),
            "g" => Some(ViewerCommand::ToggleViewMode),
            _ => None,
        },
    }
}

/// Maps a pointer input to a viewer command.
///
/// Clicks on the left third go back, the right third goes forward, and the
/// middle toggles the info overlay.
#[must_use]
pub fn command_for_pointer(input: PointerInput) -> Option<ViewerCommand> {
    match input {
        PointerInput::Click { x, viewport_width } => {
            if !(viewport_width.is_finite() && viewport_width > 0.0 && x.is_finite()) {
                return None;
            }
            let third = viewport_width / 3.0;
            if x < third {
                Some(ViewerCommand::Previous)
            } else if x > viewport_width - third {
                Some(ViewerCommand::Next)
            } else {
                Some(ViewerCommand::ToggleInfo)
            }
        }
        PointerInput::BackButton => Some(ViewerCommand::Close),
        PointerInput::InfoButton => Some(ViewerCommand::ToggleInfo),
        PointerInput::GridButton => Some(ViewerCommand::ToggleViewMode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_navigate_and_escape_closes() {
        assert_eq!(command_for_key(&Key::ArrowLeft), Some(ViewerCommand::Previous));
        assert_eq!(command_for_key(&Key::ArrowRight), Some(ViewerCommand::Next));
        assert_eq!(command_for_key(&Key::Escape), Some(ViewerCommand::Close));
    }

    #[test]
    fn character_bindings_ignore_case() {
        assert_eq!(
            command_for_key(&Key::Character("I".into())),
            Some(ViewerCommand::ToggleInfo)
        );
        assert_eq!(
            command_for_key(&Key::Character("g".into())),
            Some(ViewerCommand::ToggleViewMode)
        );
        assert_eq!(command_for_key(&Key::Character("x".into())), None);
    }

    #[test]
    fn click_zones_split_the_viewport_in_thirds() {
        let click = |x| PointerInput::Click {
            x,
            viewport_width: 300.0,
        };
        assert_eq!(command_for_pointer(click(10.0)), Some(ViewerCommand::Previous));
        assert_eq!(command_for_pointer(click(150.0)), Some(ViewerCommand::ToggleInfo));
        assert_eq!(command_for_pointer(click(290.0)), Some(ViewerCommand::Next));
    }

    #[test]
    fn degenerate_viewport_is_ignored() {
        let input = PointerInput::Click {
            x: 5.0,
            viewport_width: 0.0,
        };
        assert_eq!(command_for_pointer(input), None);
        assert_eq!(
            command_for_pointer(PointerInput::BackButton),
            Some(ViewerCommand::Close)
        );
    }
}
