use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::{DEFAULT_HOLD_WINDOW, SCREEN_H, SCREEN_W};
use crate::world::Steer;

/// Hold time after an auto-repeat press when the terminal never reports
/// releases. Repeats arrive well inside this, so a held key stays smooth and
/// a released one stops quickly.
pub const REPEAT_WINDOW: f64 = 0.12;

/// Edge-triggered actions, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Up,
    Down,
    Confirm,
    Escape,
    Space,
    Click { x: f64, y: f64 },
    Hover { x: f64, y: f64 },
    /// `q`: leave from a menu or the pause screen.
    Quit,
    /// Ctrl+C: leave from anywhere.
    Interrupt,
    Resize { cols: u16, rows: u16 },
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    down: bool,
    held_until: Option<f64>,
}

impl HeldKey {
    /// A press landing inside the current window is an auto-repeat.
    fn press(&mut self, now: f64, first_window: f64) {
        let repeating = self.held_until.is_some_and(|until| now <= until);
        let window = if repeating { REPEAT_WINDOW } else { first_window };
        self.down = true;
        self.held_until = Some(now + window);
    }

    fn release(&mut self) {
        self.down = false;
        self.held_until = None;
    }

    fn held(&self, now: f64, reports_release: bool) -> bool {
        if reports_release {
            self.down
        } else {
            self.held_until.is_some_and(|until| now <= until)
        }
    }
}

/// Turns terminal events into commands and held steering.
pub struct Input {
    left: HeldKey,
    right: HeldKey,
    reports_release: bool,
    hold_window: f64,
    cols: u16,
    rows: u16,
}

impl Input {
    pub fn new(cols: u16, rows: u16, reports_release: bool) -> Self {
        Self {
            left: HeldKey::default(),
            right: HeldKey::default(),
            reports_release,
            hold_window: DEFAULT_HOLD_WINDOW,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// How long a first press holds without release reports.
    pub fn with_hold_window(mut self, seconds: f64) -> Self {
        self.hold_window = seconds.max(REPEAT_WINDOW);
        self
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    /// Drains every pending event without blocking.
    pub fn poll(&mut self, now: f64) -> io::Result<Vec<Command>> {
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(command) = self.handle_event(&event::read()?, now) {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    pub fn handle_event(&mut self, event: &Event, now: f64) -> Option<Command> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.resize(*cols, *rows);
                Some(Command::Resize {
                    cols: *cols,
                    rows: *rows,
                })
            }
            // Held keys go stale once focus moves elsewhere.
            Event::FocusLost => {
                self.left.release();
                self.right.release();
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: f64) -> Option<Command> {
        let steering = match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(true),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(false),
            _ => None,
        };
        if let Some(is_left) = steering {
            let (this, other) = if is_left {
                (&mut self.left, &mut self.right)
            } else {
                (&mut self.right, &mut self.left)
            };
            match key.kind {
                KeyEventKind::Release => this.release(),
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    this.press(now, self.hold_window);
                    if !self.reports_release {
                        other.release();
                    }
                }
            }
            return None;
        }

        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Interrupt)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            KeyCode::Esc => Some(Command::Escape),
            KeyCode::Char(' ') => Some(Command::Space),
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Down),
            _ => None,
        }
    }

    fn handle_mouse(&self, mouse: &MouseEvent) -> Option<Command> {
        let (x, y) = self.to_logical(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Command::Click { x, y }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Command::Hover { x, y }),
            _ => None,
        }
    }

    /// Center of terminal cell (`col`, `row`) in logical coordinates.
    pub fn to_logical(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) / self.cols as f64 * SCREEN_W,
            (row as f64 + 0.5) / self.rows as f64 * SCREEN_H,
        )
    }

    pub fn steer(&self, now: f64) -> Steer {
        Steer {
            left: self.left.held(now, self.reports_release),
            right: self.right.held(now, self.reports_release),
        }
    }
}
