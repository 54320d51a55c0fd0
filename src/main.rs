//! Terminal falling-blocks runner (default binary).
//!
//! Keyboard and mouse-drag input via crossterm, rendering through the
//! canvas renderer. Preferences load at startup and are saved on exit
//! if they changed.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use falling_blocks::core::{GameEngine, GameEvent};
use falling_blocks::input::{
    handle_key_event, is_music_toggle, is_sound_toggle, should_quit, SwipeTracker,
};
use falling_blocks::settings::{Settings, SoundBoard, SoundCue};
use falling_blocks::term::{Canvas, ComboTracker, GameView, Hud, Rgb, TerminalRenderer, Theme, Viewport};
use falling_blocks::types::TICK_MS;

/// Drag length, in board rows, before a mouse drag counts as a swipe.
const SWIPE_MIN_CELLS: f32 = 1.5;

fn main() -> Result<()> {
    let path = Settings::default_path();
    let mut diagnostics = Vec::new();
    let settings = load_settings(path.as_deref(), &mut diagnostics);
    if let Some(image) = settings.missing_background_image() {
        diagnostics.push(format!("background image {} not found", image.display()));
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, settings.clone());

    // Always try to restore terminal state.
    let _ = term.exit();

    for line in &diagnostics {
        eprintln!("falling-blocks: {line}");
    }

    let final_settings = result?;
    if final_settings != settings {
        match path {
            Some(path) => {
                if let Err(e) = final_settings.save(&path) {
                    eprintln!("falling-blocks: could not save {}: {e}", path.display());
                }
            }
            None => eprintln!("falling-blocks: no config directory, settings not saved"),
        }
    }
    Ok(())
}

fn load_settings(path: Option<&Path>, diagnostics: &mut Vec<String>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            diagnostics.push(format!("ignoring {}: {e}", path.display()));
            Settings::default()
        }
    }
}

fn theme_for(settings: &Settings) -> Theme {
    Theme::from_fn(Rgb::from(settings.background_rgb()), |tag| {
        Rgb::from(settings.palette.rgb(tag))
    })
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Runs until the player quits and returns the (possibly edited) settings.
fn run(term: &mut TerminalRenderer, mut settings: Settings) -> Result<Settings> {
    let mut engine = GameEngine::with_config(settings.engine_config(), seed_from_clock())?;
    let view = GameView::default().with_theme(theme_for(&settings));
    let mut sound = SoundBoard::from_settings(&settings);
    let mut combo = ComboTracker::new();
    let mut swipe = SwipeTracker::new(SWIPE_MIN_CELLS).with_x_scale(1.0 / view.cell_w() as f32);
    let mut status: Option<&'static str> = None;
    let mut last_cue: Option<SoundCue> = None;

    let mut canvas = Canvas::new(0, 0);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            combo: combo.banner(),
            sound_on: sound.is_audible(),
            music_on: sound.is_music_playing(),
            last_cue,
            status,
        };
        let snap = engine.snapshot();
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut canvas);
        term.present(&mut canvas, snap.phase)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(settings);
                    }
                    if is_sound_toggle(key) {
                        let on = settings.toggle_sound_effects();
                        sound = SoundBoard::from_settings(&settings);
                        status = Some(if on { "sound on" } else { "sound muted" });
                    } else if is_music_toggle(key) {
                        let on = settings.toggle_background_music();
                        sound = SoundBoard::from_settings(&settings);
                        status = Some(if on { "music on" } else { "music off" });
                    } else if let Some(command) = handle_key_event(key) {
                        engine.apply(command);
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        swipe.begin(mouse.column as f32, mouse.row as f32);
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some(command) = swipe.end(mouse.column as f32, mouse.row as f32) {
                            engine.apply(command);
                        }
                    }
                    _ => {}
                },
                Event::Resize(..) => {
                    // A drag that straddles a resize has stale coordinates.
                    swipe.cancel();
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.step(TICK_MS);
            combo.tick(TICK_MS);

            let events = engine.drain_events();
            combo.observe_all(&events);
            if events.iter().any(|e| matches!(e, GameEvent::Reset)) {
                status = None;
                last_cue = None;
            }
            for cue in sound.cues(&events) {
                term.play(cue)?;
                last_cue = Some(cue);
            }
        }
    }
}
