use crate::config::SCREEN_W;
use crate::world::entity::Aabb;

pub const BUTTON_W: f64 = 320.0;
pub const BUTTON_H: f64 = 44.0;
pub const BUTTON_GAP: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    OpenSettings,
    OpenHighScores,
    OpenInstructions,
    Exit,
    Resume,
    Restart,
    MainMenu,
    Quit,
    CycleDifficulty,
    ToggleSound,
    ToggleSynth,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub rect: Aabb,
    pub action: MenuAction,
}

impl Button {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.rect.x
            && x < self.rect.x + self.rect.w
            && y >= self.rect.y
            && y < self.rect.y + self.rect.h
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.rect.x + self.rect.w / 2.0,
            self.rect.y + self.rect.h / 2.0,
        )
    }
}

/// Stacks buttons in a horizontally centered column starting at `top`.
pub fn column(items: Vec<(String, MenuAction)>, top: f64) -> Vec<Button> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, (label, action))| Button {
            label,
            rect: Aabb {
                x: (SCREEN_W - BUTTON_W) / 2.0,
                y: top + i as f64 * (BUTTON_H + BUTTON_GAP),
                w: BUTTON_W,
                h: BUTTON_H,
            },
            action,
        })
        .collect()
}

pub fn hit(buttons: &[Button], x: f64, y: f64) -> Option<usize> {
    buttons.iter().position(|button| button.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Button> {
        column(
            vec![
                ("ONE".to_string(), MenuAction::Start),
                ("TWO".to_string(), MenuAction::Exit),
            ],
            200.0,
        )
    }

    #[test]
    fn column_does_not_overlap() {
        let buttons = sample();
        assert!(!buttons[0].rect.overlaps(&buttons[1].rect));
        assert_eq!(buttons[0].rect.x, buttons[1].rect.x);
    }

    #[test]
    fn hit_finds_button_under_point() {
        let buttons = sample();
        let (x, y) = buttons[1].center();
        assert_eq!(hit(&buttons, x, y), Some(1));
        assert_eq!(hit(&buttons, 5.0, 5.0), None);
        assert_eq!(hit(&buttons, x, 200.0 + BUTTON_H + BUTTON_GAP / 2.0), None);
    }
}
