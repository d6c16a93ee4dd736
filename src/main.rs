mod audio;
mod audio_api;
mod loader;
mod middle;
mod mixer;
mod shared;
mod tui;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use audio::AudioHandle;
use audio_api::AudioCommand;
use middle::Middle;
use mixer::catalog::CATALOG;
use mixer::persistence;
use shared::InputEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Audio first: a missing device should fail with a readable message
    // before we take over the terminal.
    let audio = audio::start_audio()?;

    let assets_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sounds"));

    let settings_dir =
        persistence::default_settings_dir().unwrap_or_else(|| PathBuf::from(".lull"));
    let settings = persistence::load_settings(&settings_dir);

    let mut middle = Middle::new(settings.theme);
    load_tracks(&mut middle, &audio, &assets_dir, None);

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = std::time::Duration::from_millis(16); // ~60fps
    let mut last_tick = Instant::now();

    loop {
        let ds = middle.display_state();
        term.draw(|frame| {
            let area = frame.area();
            tui::view::render(frame, area, &ds);
        })?;

        let events = tui::input::poll_input(tick_rate)?;
        for event in events {
            match event {
                InputEvent::Quit => {
                    drop(term);
                    drop(audio);
                    return Ok(());
                }
                InputEvent::ToggleTheme => {
                    // persisted on every toggle so it survives the session
                    let theme = middle.toggle_theme();
                    let _ = persistence::save_settings(
                        &settings_dir,
                        &persistence::Settings { theme },
                    );
                }
                InputEvent::Reload => {
                    let retry = middle.unavailable_tracks();
                    load_tracks(&mut middle, &audio, &assets_dir, Some(&retry));
                }
                other => {
                    for cmd in middle.handle_input(other) {
                        audio.send(cmd);
                    }
                }
            }
        }

        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        for cmd in middle.tick(elapsed) {
            audio.send(cmd);
        }
    }
}

/// Decode catalog entries and register them with the engine. `only` limits
/// the pass to specific track indices (the reload path); a track that fails
/// to decode is marked unavailable and the rest keep loading.
fn load_tracks(middle: &mut Middle, audio: &AudioHandle, assets_dir: &Path, only: Option<&[u8]>) {
    for (i, def) in CATALOG.iter().enumerate() {
        let i = i as u8;
        if let Some(only) = only {
            if !only.contains(&i) {
                continue;
            }
        }
        match loader::sound_loader::load(def, assets_dir, audio.sample_rate()) {
            Ok(buffer) => {
                middle.mark_ready(i);
                audio.send(AudioCommand::RegisterTrack { track: i, buffer });
            }
            Err(_) => middle.mark_unavailable(i),
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
