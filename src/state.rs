use tracing::info;

use crate::audio::{Cue, SoundManager};
use crate::config::{Config, HIGH_SCORE_NAME, SCREEN_H};
use crate::difficulty::Difficulty;
use crate::input::Command;
use crate::menu::{self, Button, MenuAction};
use crate::render::font::Font;
use crate::render::{Canvas, PixelBuf, scene, screens};
use crate::scores::HighScores;
use crate::settings::Settings;
use crate::storage::Storage;
use crate::world::spawner::Spawner;
use crate::world::{Steer, World, WorldEvent};

/// Process-wide collaborators, built once in `main` and handed to the app.
pub struct Context {
    pub config: Config,
    pub storage: Storage,
    pub audio: SoundManager,
}

impl Context {
    pub fn new(config: Config, audio: SoundManager) -> Self {
        let storage = Storage::new(config.data_dir.clone());
        Self {
            config,
            storage,
            audio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    Paused,
    GameOver,
    Settings,
    HighScores,
    Instructions,
}

impl Screen {
    fn is_menu(self) -> bool {
        matches!(
            self,
            Screen::MainMenu | Screen::Settings | Screen::HighScores | Screen::Instructions
        )
    }
}

const MAIN_MENU_TOP: f64 = 230.0;
const PAUSE_MENU_TOP: f64 = 240.0;
const SETTINGS_TOP: f64 = 200.0;
const BACK_TOP: f64 = SCREEN_H - 64.0;

/// The outer state machine. Owns the world while a run is live.
pub struct App {
    ctx: Context,
    screen: Screen,
    settings: Settings,
    scores: HighScores,
    world: Option<World>,
    buttons: Vec<Button>,
    selected: usize,
    last_rank: Option<usize>,
    menu_t: f64,
    font: Font,
    quit: bool,
}

impl App {
    pub fn new(mut ctx: Context) -> Self {
        let settings = Settings::load(&ctx.storage);
        let scores = HighScores::load(&ctx.storage);
        let font = Font::system(1);
        ctx.audio.set_enabled(settings.sound);
        ctx.audio.set_synth(settings.synth_sounds);
        info!(
            difficulty = settings.difficulty.name(),
            best = scores.best(),
            "starting at main menu"
        );

        let mut app = Self {
            ctx,
            screen: Screen::MainMenu,
            settings,
            scores,
            world: None,
            buttons: Vec::new(),
            selected: 0,
            last_rank: None,
            menu_t: 0.0,
            font,
            quit: false,
        };
        app.enter(Screen::MainMenu);
        app
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Rank of the last finished run in the table, if it made it.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    // ── Events ──────────────────────────────────────────────────────────────

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Interrupt => self.request_quit(),
            // A live run only ends through a crash or the pause menu.
            Command::Quit if self.screen == Screen::Playing => {}
            Command::Quit => self.request_quit(),
            Command::Resize { .. } => {}
            Command::Escape => self.escape(),
            Command::Space if self.screen == Screen::GameOver => self.restart(),
            Command::Space => {}
            Command::Up => self.move_selection(-1),
            Command::Down => self.move_selection(1),
            Command::Confirm => {
                if let Some(action) = self.buttons.get(self.selected).map(|b| b.action) {
                    self.activate(action);
                }
            }
            Command::Click { x, y } => {
                if let Some(index) = menu::hit(&self.buttons, x, y) {
                    self.selected = index;
                    self.activate(self.buttons[index].action);
                }
            }
            Command::Hover { x, y } => match menu::hit(&self.buttons, x, y) {
                Some(index) if index != self.selected => {
                    self.selected = index;
                    self.ctx.audio.play(Cue::Hover, false);
                }
                _ => {}
            },
        }
    }

    fn escape(&mut self) {
        match self.screen {
            Screen::Playing => self.enter(Screen::Paused),
            Screen::Paused => self.enter(Screen::Playing),
            Screen::GameOver | Screen::Settings | Screen::HighScores | Screen::Instructions => {
                self.to_main_menu()
            }
            Screen::MainMenu => {}
        }
    }

    fn move_selection(&mut self, step: isize) {
        let count = self.buttons.len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected as isize + step).rem_euclid(count as isize) as usize;
        self.ctx.audio.play(Cue::Hover, false);
    }

    fn activate(&mut self, action: MenuAction) {
        self.ctx.audio.play(Cue::Click, false);
        match action {
            MenuAction::Start => self.start_run(),
            MenuAction::OpenSettings => self.enter(Screen::Settings),
            MenuAction::OpenHighScores => self.enter(Screen::HighScores),
            MenuAction::OpenInstructions => self.enter(Screen::Instructions),
            MenuAction::Exit | MenuAction::Quit => self.request_quit(),
            MenuAction::Resume => self.enter(Screen::Playing),
            MenuAction::Restart => self.restart(),
            MenuAction::MainMenu | MenuAction::Back => self.to_main_menu(),
            MenuAction::CycleDifficulty => {
                self.settings.difficulty = self.settings.difficulty.next();
                self.settings_changed();
            }
            MenuAction::ToggleSound => {
                self.settings.sound = !self.settings.sound;
                self.ctx.audio.set_enabled(self.settings.sound);
                self.settings_changed();
                self.ctx.audio.play(Cue::MenuMusic, true);
            }
            MenuAction::ToggleSynth => {
                self.settings.synth_sounds = !self.settings.synth_sounds;
                self.ctx.audio.set_synth(self.settings.synth_sounds);
                self.settings_changed();
            }
        }
    }

    fn settings_changed(&mut self) {
        self.settings.save(&self.ctx.storage);
        let selected = self.selected;
        self.buttons = self.layout(Screen::Settings);
        self.selected = selected.min(self.buttons.len().saturating_sub(1));
    }

    fn request_quit(&mut self) {
        info!(screen = ?self.screen, "quit requested");
        self.quit = true;
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    fn enter(&mut self, screen: Screen) {
        if screen != self.screen {
            info!(from = ?self.screen, to = ?screen, "screen change");
        }
        self.screen = screen;
        self.buttons = self.layout(screen);
        self.selected = 0;

        let audio = &mut self.ctx.audio;
        match screen {
            Screen::Playing => {
                audio.stop(Cue::MenuMusic);
                audio.play(Cue::Engine, true);
            }
            Screen::Paused => audio.stop(Cue::Engine),
            Screen::GameOver => {
                audio.stop_all();
                audio.play(Cue::Crash, false);
            }
            _ => {
                audio.stop(Cue::Engine);
                audio.play(Cue::MenuMusic, true);
            }
        }
    }

    fn start_run(&mut self) {
        let difficulty = Difficulty::new(self.settings.difficulty);
        let spawner = match self.ctx.config.seed {
            Some(seed) => Spawner::seeded(seed),
            None => Spawner::from_entropy(),
        };
        self.world = Some(World::new(difficulty, self.scores.best(), spawner));
        self.last_rank = None;
        info!(difficulty = self.settings.difficulty.name(), "run started");
        self.enter(Screen::Playing);
    }

    fn restart(&mut self) {
        let Some(world) = self.world.as_mut() else {
            self.start_run();
            return;
        };
        world.reset();
        self.last_rank = None;
        info!("run restarted");
        self.enter(Screen::Playing);
    }

    fn to_main_menu(&mut self) {
        self.world = None;
        self.enter(Screen::MainMenu);
    }

    fn finish_run(&mut self, score: u64) {
        self.last_rank = self.scores.record(HIGH_SCORE_NAME, score);
        self.scores.save(&self.ctx.storage);
        info!(score, rank = ?self.last_rank, "game over");
        self.enter(Screen::GameOver);
    }

    fn layout(&self, screen: Screen) -> Vec<Button> {
        let on_off = |on: bool| if on { "ON" } else { "OFF" };
        let items: Vec<(String, MenuAction)> = match screen {
            Screen::MainMenu => vec![
                ("START".into(), MenuAction::Start),
                ("SETTINGS".into(), MenuAction::OpenSettings),
                ("HIGH SCORES".into(), MenuAction::OpenHighScores),
                ("INSTRUCTIONS".into(), MenuAction::OpenInstructions),
                ("EXIT".into(), MenuAction::Exit),
            ],
            Screen::Paused => vec![
                ("RESUME".into(), MenuAction::Resume),
                ("RESTART".into(), MenuAction::Restart),
                ("MAIN MENU".into(), MenuAction::MainMenu),
                ("QUIT".into(), MenuAction::Quit),
            ],
            Screen::Settings => vec![
                (
                    format!("DIFFICULTY: {}", self.settings.difficulty.name()),
                    MenuAction::CycleDifficulty,
                ),
                (
                    format!("SOUND: {}", on_off(self.settings.sound)),
                    MenuAction::ToggleSound,
                ),
                (
                    format!("SYNTH: {}", on_off(self.settings.synth_sounds)),
                    MenuAction::ToggleSynth,
                ),
                ("BACK".into(), MenuAction::Back),
            ],
            Screen::HighScores | Screen::Instructions => vec![("BACK".into(), MenuAction::Back)],
            Screen::Playing | Screen::GameOver => Vec::new(),
        };
        let top = match screen {
            Screen::MainMenu => MAIN_MENU_TOP,
            Screen::Paused => PAUSE_MENU_TOP,
            Screen::Settings => SETTINGS_TOP,
            _ => BACK_TOP,
        };
        menu::column(items, top)
    }

    // ── Tick ────────────────────────────────────────────────────────────────

    /// Advances the live run; menus only animate.
    pub fn update(&mut self, dt: f64, steer: Steer) {
        if self.screen.is_menu() {
            self.menu_t += dt;
            return;
        }
        if self.screen != Screen::Playing {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };

        let events = world.update(dt, steer);
        let (game_over, score) = (world.game_over, world.score);
        for event in events {
            if let WorldEvent::Pickup { .. } = event {
                self.ctx.audio.play(Cue::Pickup, false);
            }
        }
        if game_over {
            self.finish_run(score);
        }
    }

    pub fn draw(&self, buf: &mut PixelBuf) {
        let mut canvas = Canvas::new(buf);
        let font = &self.font;
        let (buttons, selected) = (self.buttons.as_slice(), self.selected);
        match self.screen {
            Screen::MainMenu => screens::draw_main_menu(
                &mut canvas,
                font,
                self.menu_t,
                buttons,
                selected,
                self.settings.difficulty.name(),
            ),
            Screen::Settings => {
                screens::draw_settings(&mut canvas, font, self.menu_t, buttons, selected)
            }
            Screen::HighScores => screens::draw_high_scores(
                &mut canvas,
                font,
                self.menu_t,
                &self.scores,
                buttons,
                selected,
            ),
            Screen::Instructions => {
                screens::draw_instructions(&mut canvas, font, self.menu_t, buttons, selected)
            }
            Screen::Playing | Screen::Paused | Screen::GameOver => {
                let Some(world) = self.world.as_ref() else {
                    return;
                };
                scene::draw_world(&mut canvas, font, world);
                match self.screen {
                    Screen::Paused => {
                        screens::draw_pause_overlay(&mut canvas, font, buttons, selected)
                    }
                    Screen::GameOver => screens::draw_game_over_overlay(
                        &mut canvas,
                        font,
                        world.score,
                        world.high_score,
                        self.last_rank,
                    ),
                    _ => {}
                }
            }
        }
    }

    /// Silences every channel. Called once on the way out.
    pub fn shutdown(&mut self) {
        self.ctx.audio.stop_all();
        info!(screen = ?self.screen, "shutting down");
    }
}
