use super::font::Font;
use super::scene::draw_background;
use super::{Canvas, Rgb, WHITE};
use crate::config::{SCREEN_H, SCREEN_W, TITLE};
use crate::menu::Button;
use crate::scores::HighScores;

const TITLE_GLOW: Rgb = Rgb(255, 0, 200);
const TITLE_CORE: Rgb = Rgb(255, 160, 240);
const BUTTON_FILL: Rgb = Rgb(24, 8, 48);
const BUTTON_EDGE: Rgb = Rgb(0, 200, 255);
const BUTTON_HOT: Rgb = Rgb(255, 0, 200);
const PANEL: Rgb = Rgb(16, 6, 32);
const TEXT: Rgb = Rgb(200, 230, 255);
const ACCENT: Rgb = Rgb(255, 220, 0);
const DANGER: Rgb = Rgb(255, 40, 80);

pub const INSTRUCTIONS: [&str; 9] = [
    "DODGE THE ONCOMING TRAFFIC.",
    "COLLECT GLOWING ORBS: +100.",
    "STAY ALIVE: 10 POINTS A SECOND.",
    "",
    "LEFT / A      STEER LEFT",
    "RIGHT / D     STEER RIGHT",
    "ESC           PAUSE / BACK",
    "SPACE         RESTART AFTER A CRASH",
    "Q             QUIT FROM MENUS",
];

pub fn draw_title(canvas: &mut Canvas, font: &Font, text: &str, y: f64) {
    let big = font.sized(font.scale() * 3);
    let w = canvas.text_width(&big, text);
    let h = canvas.text_height(&big);
    canvas.glow(SCREEN_W / 2.0, y + h / 2.0, w * 0.6, TITLE_GLOW, 90);
    canvas.text_centered(&big, text, SCREEN_W / 2.0 + 3.0, y + 3.0, TITLE_GLOW);
    canvas.text_centered(&big, text, SCREEN_W / 2.0, y, TITLE_CORE);
}

pub fn draw_buttons(canvas: &mut Canvas, font: &Font, buttons: &[Button], selected: usize) {
    let text_h = canvas.text_height(font);
    // Glow goes down first so neighbouring buttons paint over its spill.
    if let Some(hot) = buttons.get(selected) {
        let r = hot.rect;
        canvas.glow(r.x + r.w / 2.0, r.y + r.h / 2.0, r.w * 0.6, BUTTON_HOT, 60);
    }
    for (i, button) in buttons.iter().enumerate() {
        let r = button.rect;
        let hot = i == selected;
        let edge = if hot { BUTTON_HOT } else { BUTTON_EDGE };
        canvas.fill_rect(r.x, r.y, r.w, r.h, edge);
        canvas.fill_rect(r.x + 3.0, r.y + 3.0, r.w - 6.0, r.h - 6.0, BUTTON_FILL);
        let (cx, cy) = button.center();
        let label = if hot {
            format!("> {} <", button.label)
        } else {
            button.label.clone()
        };
        canvas.text_centered(font, &label, cx, cy - text_h / 2.0, if hot { WHITE } else { TEXT });
    }
}

fn draw_panel(canvas: &mut Canvas, x: f64, y: f64, w: f64, h: f64) {
    canvas.fill_rect(x - 3.0, y - 3.0, w + 6.0, h + 6.0, BUTTON_EDGE);
    canvas.fill_rect(x, y, w, h, PANEL);
}

pub fn draw_main_menu(
    canvas: &mut Canvas,
    font: &Font,
    t: f64,
    buttons: &[Button],
    selected: usize,
    difficulty: &str,
) {
    draw_background(canvas, t);
    draw_title(canvas, font, TITLE, 70.0);
    let sub_y = 70.0 + canvas.text_height(&font.sized(font.scale() * 3)) + 20.0;
    canvas.text_centered(font, &format!("DIFFICULTY: {difficulty}"), SCREEN_W / 2.0, sub_y, ACCENT);
    draw_buttons(canvas, font, buttons, selected);
    let footer_y = SCREEN_H - canvas.text_height(font) - 12.0;
    canvas.text_centered(font, "(C) NEON RACER. ALL LANES RESERVED.", SCREEN_W / 2.0, footer_y, TEXT.dim(140));
}

pub fn draw_settings(canvas: &mut Canvas, font: &Font, t: f64, buttons: &[Button], selected: usize) {
    draw_background(canvas, t);
    draw_title(canvas, font, "SETTINGS", 70.0);
    draw_buttons(canvas, font, buttons, selected);
}

pub fn draw_instructions(
    canvas: &mut Canvas,
    font: &Font,
    t: f64,
    buttons: &[Button],
    selected: usize,
) {
    draw_background(canvas, t);
    draw_title(canvas, font, "HOW TO PLAY", 30.0);
    let line = canvas.text_height(font) * 1.4;
    let top = 140.0;
    draw_panel(canvas, 120.0, top - 20.0, SCREEN_W - 240.0, line * INSTRUCTIONS.len() as f64 + 30.0);
    for (i, text) in INSTRUCTIONS.iter().enumerate() {
        canvas.text(font, text, 150.0, top + i as f64 * line, TEXT);
    }
    draw_buttons(canvas, font, buttons, selected);
}

pub fn draw_high_scores(
    canvas: &mut Canvas,
    font: &Font,
    t: f64,
    scores: &HighScores,
    buttons: &[Button],
    selected: usize,
) {
    draw_background(canvas, t);
    draw_title(canvas, font, "HIGH SCORES", 40.0);
    let line = canvas.text_height(font) * 1.3;
    let top = 140.0;
    draw_panel(canvas, 200.0, top - 16.0, SCREEN_W - 400.0, line * 10.0 + 24.0);
    if scores.entries().is_empty() {
        canvas.text_centered(font, "NO SCORES YET", SCREEN_W / 2.0, top + line * 4.0, TEXT);
    }
    for (i, entry) in scores.entries().iter().enumerate() {
        let y = top + i as f64 * line;
        let c = if i == 0 { ACCENT } else { TEXT };
        canvas.text(font, &format!("{:>2}.", i + 1), 230.0, y, c);
        canvas.text(font, &entry.name, 300.0, y, c);
        let score = entry.score.to_string();
        let w = canvas.text_width(font, &score);
        canvas.text(font, &score, SCREEN_W - 230.0 - w, y, c);
    }
    draw_buttons(canvas, font, buttons, selected);
}

/// Drawn over the dimmed, frozen world.
pub fn draw_pause_overlay(canvas: &mut Canvas, font: &Font, buttons: &[Button], selected: usize) {
    canvas.darken();
    let (Some(first), Some(last)) = (buttons.first(), buttons.last()) else {
        return;
    };
    let title_h = canvas.text_height(&font.sized(font.scale() * 2));
    let top = first.rect.y - title_h - 40.0;
    let bottom = last.rect.y + last.rect.h + 24.0;
    draw_panel(canvas, first.rect.x - 40.0, top, first.rect.w + 80.0, bottom - top);
    canvas.text_centered(&font.sized(font.scale() * 2), "PAUSED", SCREEN_W / 2.0, top + 16.0, ACCENT);
    draw_buttons(canvas, font, buttons, selected);
}

pub fn draw_game_over_overlay(
    canvas: &mut Canvas,
    font: &Font,
    score: u64,
    best: u64,
    rank: Option<usize>,
) {
    canvas.darken();
    let panel_w = 460.0;
    let panel_h = 260.0;
    let x = (SCREEN_W - panel_w) / 2.0;
    let y = (SCREEN_H - panel_h) / 2.0;
    draw_panel(canvas, x, y, panel_w, panel_h);

    let big = font.sized(font.scale() * 2);
    let line = canvas.text_height(font) * 1.8;
    canvas.text_centered(&big, "GAME OVER", SCREEN_W / 2.0, y + 24.0, DANGER);
    let mut pen = y + 40.0 + canvas.text_height(&big);
    canvas.text_centered(font, &format!("SCORE {score}"), SCREEN_W / 2.0, pen, WHITE);
    pen += line;
    canvas.text_centered(font, &format!("BEST {best}"), SCREEN_W / 2.0, pen, ACCENT);
    pen += line;
    if let Some(rank) = rank {
        canvas.text_centered(font, &format!("NEW ENTRY: #{rank}"), SCREEN_W / 2.0, pen, TITLE_CORE);
        pen += line;
    }
    canvas.text_centered(font, "SPACE TO RESTART", SCREEN_W / 2.0, pen, TEXT);
    pen += line;
    canvas.text_centered(font, "ESC FOR MENU", SCREEN_W / 2.0, pen, TEXT.dim(160));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuAction, column};
    use crate::render::PixelBuf;

    #[test]
    fn selected_button_is_highlighted() {
        let buttons = column(
            vec![
                ("A".to_string(), MenuAction::Start),
                ("B".to_string(), MenuAction::Exit),
            ],
            200.0,
        );
        let mut buf = PixelBuf::new(800, 600);
        draw_buttons(&mut Canvas::new(&mut buf), &Font::system(1), &buttons, 1);
        let hot = buttons[1].rect;
        let cold = buttons[0].rect;
        assert_eq!(buf.get(hot.x as usize + 1, hot.y as usize + 1), BUTTON_HOT);
        assert_eq!(buf.get(cold.x as usize + 1, cold.y as usize + 1), BUTTON_EDGE);
    }

    #[test]
    fn overlays_survive_tiny_terminals() {
        let mut buf = PixelBuf::new(4, 2);
        let mut canvas = Canvas::new(&mut buf);
        let font = Font::system(1);
        draw_game_over_overlay(&mut canvas, &font, 10, 20, Some(1));
        draw_pause_overlay(&mut canvas, &font, &[], 0);
        draw_high_scores(&mut canvas, &font, 1.0, &HighScores::default(), &[], 0);
    }
}
