use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::shared::InputEvent;

// poll for input and resolve keys straight to semantic input events; there
// are no modifier-key combos in the mixer so no held-state tracking needed
pub fn poll_input(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code));
    }
    Ok(vec![])
}

fn handle_key(code: KeyCode) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Quit],

        // one key per catalog track
        KeyCode::Char(c @ '1'..='4') => {
            vec![InputEvent::ToggleTrack(c as u8 - b'1')]
        }

        // track cursor + volume knob on the selected track
        KeyCode::Char('j') | KeyCode::Down => vec![InputEvent::SelectNext],
        KeyCode::Char('k') | KeyCode::Up => vec![InputEvent::SelectPrev],
        KeyCode::Char(' ') => vec![InputEvent::ToggleSelected],
        KeyCode::Char('[') => vec![InputEvent::VolumeDelta(-0.05)],
        KeyCode::Char(']') => vec![InputEvent::VolumeDelta(0.05)],

        // presets
        KeyCode::Char('a') => vec![InputEvent::ApplyPreset(0)],
        KeyCode::Char('s') => vec![InputEvent::ApplyPreset(1)],
        KeyCode::Char('d') => vec![InputEvent::ApplyPreset(2)],

        // sleep timer
        KeyCode::Char('t') => vec![InputEvent::TimerPress],
        KeyCode::Char('-') => vec![InputEvent::TimerAdjust(-5)],
        KeyCode::Char('=') => vec![InputEvent::TimerAdjust(5)],

        KeyCode::Char('m') => vec![InputEvent::ToggleTheme],
        KeyCode::Char('r') => vec![InputEvent::Reload],

        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_map_to_track_indices() {
        assert_eq!(handle_key(KeyCode::Char('1')), vec![InputEvent::ToggleTrack(0)]);
        assert_eq!(handle_key(KeyCode::Char('4')), vec![InputEvent::ToggleTrack(3)]);
    }

    #[test]
    fn unmapped_keys_produce_nothing() {
        assert!(handle_key(KeyCode::Char('x')).is_empty());
        assert!(handle_key(KeyCode::F(5)).is_empty());
    }
}
