use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::game::Command;
use crate::session::TickInput;

/// How long a key counts as held after its last press or repeat, when the
/// terminal never reports releases
pub const HOLD_WINDOW: Duration = Duration::from_millis(160);

/// Keys that act for as long as they are held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Control {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Control::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Control::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Control::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Control::Right),
            KeyCode::Char(' ') => Some(Control::Fire),
            _ => None,
        }
    }

    fn opposite(self) -> Option<Self> {
        match self {
            Control::Up => Some(Control::Down),
            Control::Down => Some(Control::Up),
            Control::Left => Some(Control::Right),
            Control::Right => Some(Control::Left),
            Control::Fire => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Translates raw key events into held controls and one-shot commands
pub struct InputManager {
    /// Last press or repeat of each control; `None` once released
    held: [Option<Instant>; 5],
    commands: Vec<Command>,
    reports_releases: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    /// `reports_releases` is true when the terminal sends key release events
    pub fn new(reports_releases: bool) -> Self {
        Self {
            held: [None; 5],
            commands: Vec::new(),
            reports_releases,
        }
    }

    /// Drain every pending terminal event without blocking
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.commands.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, Instant::now());
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, now),
            KeyEventKind::Repeat => self.hold(key_event.code, now),
            KeyEventKind::Release => {
                // Seeing one release proves the terminal reports them
                self.reports_releases = true;
                if let Some(control) = Control::from_code(key_event.code) {
                    self.held[control.index()] = None;
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, now: Instant) {
        let command = match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
            KeyCode::Esc => Some(Command::Back),
            _ => None,
        };

        match command {
            Some(command) => self.commands.push(command),
            None => self.hold(key_event.code, now),
        }
    }

    fn hold(&mut self, code: KeyCode, now: Instant) {
        let Some(control) = Control::from_code(code) else {
            return;
        };
        self.held[control.index()] = Some(now);
        if let Some(opposite) = control.opposite() {
            self.held[opposite.index()] = None;
        }
    }

    fn is_held(&self, control: Control, now: Instant) -> bool {
        match self.held[control.index()] {
            Some(_) if self.reports_releases => true,
            Some(since) => now.saturating_duration_since(since) <= HOLD_WINDOW,
            None => false,
        }
    }

    /// One-shot commands gathered by the last poll
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Held controls as of `now`
    pub fn tick_input(&self, now: Instant) -> TickInput {
        TickInput {
            up: self.is_held(Control::Up, now),
            down: self.is_held(Control::Down, now),
            left: self.is_held(Control::Left, now),
            right: self.is_held(Control::Right, now),
            fire: self.is_held(Control::Fire, now),
        }
    }
}
