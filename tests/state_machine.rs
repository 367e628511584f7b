use std::path::Path;

use neon_racer::audio::SoundManager;
use neon_racer::config::{Config, HIGH_SCORES_FILE, SETTINGS_FILE};
use neon_racer::difficulty::Profile;
use neon_racer::input::Command;
use neon_racer::menu::MenuAction;
use neon_racer::scores::HighScores;
use neon_racer::state::{App, Context, Screen};
use neon_racer::storage::Storage;
use neon_racer::world::entity::{Car, ENEMY_PALETTE, Orb};
use neon_racer::world::Steer;

const DT: f64 = 1.0 / 60.0;

fn app_in(dir: &Path) -> App {
    let config = Config {
        data_dir: dir.to_path_buf(),
        assets_dir: dir.join("assets"),
        seed: Some(11),
        ..Config::default()
    };
    App::new(Context::new(config, SoundManager::silent()))
}

fn click(app: &mut App, action: MenuAction) {
    let button = app
        .buttons()
        .iter()
        .find(|b| b.action == action)
        .unwrap_or_else(|| panic!("no {action:?} button on {:?}", app.screen()));
    let (x, y) = button.center();
    app.handle(Command::Click { x, y });
}

/// Drops an enemy right on the player so the next tick crashes.
fn crash(app: &mut App) {
    let world = app.world_mut().unwrap();
    let mut enemy = Car::enemy(0, world.player.y, ENEMY_PALETTE[0]);
    enemy.x = world.player.x;
    world.enemies.push(enemy);
    app.update(DT, Steer::NONE);
}

#[test]
fn starts_at_main_menu() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path());
    assert_eq!(app.screen(), Screen::MainMenu);
    assert!(!app.should_quit());
}

#[test]
fn pause_freezes_and_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Start);
    assert_eq!(app.screen(), Screen::Playing);

    app.update(DT, Steer::NONE);
    app.handle(Command::Escape);
    assert_eq!(app.screen(), Screen::Paused);
    let t = app.world().unwrap().t;
    for _ in 0..10 {
        app.update(DT, Steer::NONE);
    }
    assert_eq!(app.world().unwrap().t, t);

    app.handle(Command::Escape);
    assert_eq!(app.screen(), Screen::Playing);
    app.update(DT, Steer::NONE);
    assert!(app.world().unwrap().t > t);

    app.handle(Command::Escape);
    click(&mut app, MenuAction::Resume);
    assert_eq!(app.screen(), Screen::Playing);
}

#[test]
fn pause_menu_restart_and_quit() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Start);
    for _ in 0..60 {
        app.update(DT, Steer::NONE);
    }
    app.handle(Command::Escape);
    click(&mut app, MenuAction::Restart);
    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(app.world().unwrap().t, 0.0);

    app.handle(Command::Escape);
    click(&mut app, MenuAction::Quit);
    assert!(app.should_quit());
}

#[test]
fn crash_records_score_and_space_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Start);

    {
        let world = app.world_mut().unwrap();
        world.enemies.clear();
        for _ in 0..10 {
            let orb = Orb::new(world.player.center_x(), world.player.y + 30.0);
            world.orbs.push(orb);
        }
    }
    app.update(DT, Steer::NONE);
    assert_eq!(app.world().unwrap().score, 1000);

    crash(&mut app);
    assert_eq!(app.screen(), Screen::GameOver);
    assert_eq!(app.world().unwrap().score, 1000);
    assert_eq!(app.last_rank(), Some(1));

    let text = std::fs::read_to_string(dir.path().join(HIGH_SCORES_FILE)).unwrap();
    let saved: HighScores = serde_json::from_str(&text).unwrap();
    assert_eq!(saved.best(), 1000);
    assert_eq!(saved.entries()[0].name, "YOU");

    // Further ticks leave the frozen world alone.
    app.update(DT, Steer::NONE);
    assert_eq!(app.world().unwrap().score, 1000);

    app.handle(Command::Space);
    assert_eq!(app.screen(), Screen::Playing);
    let world = app.world().unwrap();
    assert_eq!(world.score, 0);
    assert!(world.high_score >= 1000);
}

#[test]
fn game_over_escape_returns_to_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Start);
    crash(&mut app);
    assert_eq!(app.screen(), Screen::GameOver);

    app.handle(Command::Escape);
    assert_eq!(app.screen(), Screen::MainMenu);
    assert!(app.world().is_none());
}

#[test]
fn best_score_carries_into_the_next_run() {
    let dir = tempfile::tempdir().unwrap();
    Storage::new(dir.path())
        .save_text(HIGH_SCORES_FILE, r#"[{"name": "YOU", "score": 4321}]"#)
        .unwrap();
    let mut app = app_in(dir.path());
    assert_eq!(app.scores().best(), 4321);
    click(&mut app, MenuAction::Start);
    assert_eq!(app.world().unwrap().high_score, 4321);
}

#[test]
fn corrupt_score_file_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(HIGH_SCORES_FILE), "{ not json").unwrap();
    let mut app = app_in(dir.path());
    assert!(app.scores().entries().is_empty());

    click(&mut app, MenuAction::Start);
    crash(&mut app);
    assert_eq!(app.scores().entries().len(), 1);
}

#[test]
fn settings_changes_persist_and_apply_to_the_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::OpenSettings);
    assert_eq!(app.screen(), Screen::Settings);
    assert_eq!(app.settings().difficulty, Profile::Medium);

    click(&mut app, MenuAction::CycleDifficulty);
    click(&mut app, MenuAction::ToggleSound);
    assert_eq!(app.settings().difficulty, Profile::Hard);
    assert!(!app.settings().sound);
    assert!(app.buttons()[0].label.contains("HARD"));

    let text = std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(saved["difficulty"], "hard");
    assert_eq!(saved["sound"], false);

    app.handle(Command::Escape);
    assert_eq!(app.screen(), Screen::MainMenu);
    click(&mut app, MenuAction::Start);
    let world = app.world().unwrap();
    assert_eq!(world.difficulty.profile(), Some(Profile::Hard));

    let reloaded = app_in(dir.path());
    assert_eq!(reloaded.settings().difficulty, Profile::Hard);
}

#[test]
fn sub_menus_go_back_to_main_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    for open in [
        MenuAction::OpenSettings,
        MenuAction::OpenHighScores,
        MenuAction::OpenInstructions,
    ] {
        click(&mut app, open);
        assert_ne!(app.screen(), Screen::MainMenu);
        app.handle(Command::Escape);
        assert_eq!(app.screen(), Screen::MainMenu);

        click(&mut app, open);
        click(&mut app, MenuAction::Back);
        assert_eq!(app.screen(), Screen::MainMenu);
    }
}

#[test]
fn exit_and_ctrl_c_quit() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Exit);
    assert!(app.should_quit());

    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Start);
    app.handle(Command::Interrupt);
    assert!(app.should_quit());
    app.shutdown();
}

#[test]
fn q_is_ignored_mid_run_but_quits_from_pause() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    app.handle(Command::Quit);
    assert!(app.should_quit());

    let mut app = app_in(dir.path());
    click(&mut app, MenuAction::Start);
    app.handle(Command::Quit);
    assert!(!app.should_quit());
    assert_eq!(app.screen(), Screen::Playing);

    app.handle(Command::Escape);
    app.handle(Command::Quit);
    assert!(app.should_quit());
}
