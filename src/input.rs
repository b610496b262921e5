use std::{collections::VecDeque, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::{foundation::error::JumpscareResult, render::terminal::io_err};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// User input relevant to the render loops.
pub enum InputEvent {
    /// Window close / interrupt (Ctrl-C in a raw terminal).
    Quit,
    /// The escape key.
    Escape,
    /// Any pointer button press.
    PointerClick,
    /// Any other character key.
    Key(char),
    /// The terminal was resized to (columns, rows).
    Resize(u16, u16),
}

impl InputEvent {
    /// Whether this event ends a playback session.
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Quit | Self::Escape | Self::PointerClick)
    }
}

/// Provider of pending input events, queried once per tick.
pub trait InputSource {
    /// Drain every event that arrived since the previous call. Never blocks.
    fn poll_pending(&mut self) -> JumpscareResult<Vec<InputEvent>>;
}

/// Input source replaying a fixed script, one batch per poll.
///
/// Once the script is exhausted every poll returns no events.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
    polls: u64,
}

impl ScriptedInput {
    /// Script that never produces events.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Append the batch returned by the next unscripted poll.
    pub fn then(mut self, batch: Vec<InputEvent>) -> Self {
        self.batches.push_back(batch);
        self
    }

    /// `quiet_polls` empty polls, then a single [`InputEvent::Quit`].
    pub fn quit_after(quiet_polls: usize) -> Self {
        let mut s = Self::idle();
        for _ in 0..quiet_polls {
            s = s.then(Vec::new());
        }
        s.then(vec![InputEvent::Quit])
    }

    /// Number of polls served so far.
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl InputSource for ScriptedInput {
    fn poll_pending(&mut self) -> JumpscareResult<Vec<InputEvent>> {
        self.polls += 1;
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

/// Map a crossterm event; `None` for events the loops do not care about.
pub fn map_terminal_event(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Esc => Some(InputEvent::Escape),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Char(c) => Some(InputEvent::Key(c)),
            _ => None,
        },
        Event::Mouse(m) if matches!(m.kind, MouseEventKind::Down(_)) => {
            Some(InputEvent::PointerClick)
        }
        Event::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        _ => None,
    }
}

/// Input read from the controlling terminal through crossterm.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_pending(&mut self) -> JumpscareResult<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO).map_err(io_err("poll terminal events"))? {
            let ev = event::read().map_err(io_err("read terminal event"))?;
            if let Some(mapped) = map_terminal_event(ev) {
                events.push(mapped);
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
#[path = "../tests/unit/input.rs"]
mod tests;
