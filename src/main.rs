//! Battle Street entry point
//!
//! Headless native runner. Drives the real match state machine at the fixed
//! tick rate with an autopilot standing in for the players (attract mode),
//! rendering every frame into a `ShapeBatch`.
//!
//! Usage: `battle-street [settings.json] [max_ticks]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use battle_street::input::KeyboardState;
    use battle_street::{Game, InputEvent, MatchState};

    /// Players the autopilot selects on the title screen
    const PLAYERS: usize = 2;
    /// Ticks between direction changes inside a minigame
    const WANDER_TICKS: u64 = 45;

    pub struct Autopilot {
        rng: Pcg32,
        heading: Vec2,
    }

    impl Autopilot {
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                heading: Vec2::ZERO,
            }
        }

        /// Decide this tick's events and held controls
        pub fn drive(&mut self, game: &mut Game) -> Vec<InputEvent> {
            match game.state() {
                MatchState::Title => vec![InputEvent::SelectPlayers(PLAYERS)],
                MatchState::Board if game.dice().is_idle() => vec![InputEvent::Action],
                MatchState::Minigame => {
                    if game.frame() % WANDER_TICKS == 0 {
                        self.heading = Vec2::new(
                            self.rng.random_range(-1..=1) as f32,
                            self.rng.random_range(-1..=1) as f32,
                        );
                    }
                    // Mash the action button (press every other tick)
                    let keyboard = KeyboardState {
                        left: self.heading.x < 0.0,
                        right: self.heading.x > 0.0,
                        up: self.heading.y < 0.0,
                        down: self.heading.y > 0.0,
                        action: game.frame() % 2 == 0,
                    };
                    game.controls_mut().set_keyboard(keyboard);
                    Vec::new()
                }
                MatchState::GameOver => vec![InputEvent::Quit],
                _ => Vec::new(),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use battle_street::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE};
    use battle_street::renderer::ShapeBatch;
    use battle_street::settings::DEFAULT_SETTINGS_FILE;
    use battle_street::{FileSettingsStore, Game, MatchState, Rect};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let max_ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(TICK_RATE as u64 * 60 * 10);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!(
        "Battle Street (headless) starting: seed={}, settings={}, max_ticks={}",
        seed,
        settings_path,
        max_ticks
    );

    let bounds = Rect::screen(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut game = Game::new(seed, bounds, Box::new(FileSettingsStore::new(settings_path)));
    let mut batch = ShapeBatch::new(bounds.size());
    let mut pilot = autopilot::Autopilot::new(seed ^ 0x9e37_79b9_7f4a_7c15);

    let mut last_state = game.state();
    let mut ticks = 0;
    while game.is_running() && ticks < max_ticks {
        let events = pilot.drive(&mut game);
        game.tick(&events);
        batch.begin_frame();
        game.draw(&mut batch);
        ticks += 1;

        if game.state() != last_state {
            last_state = game.state();
            log::debug!(
                "tick {}: {:?} ({} vertices, {} text runs)",
                ticks,
                last_state,
                batch.vertices().len(),
                batch.texts().len()
            );
        }
    }

    let players = game.players();
    for (i, stars) in players.all_stars().iter().enumerate() {
        log::info!("Player {}: {} star(s)", i + 1, stars);
    }
    match (game.state(), game.winner()) {
        (MatchState::GameOver, Some(p)) => log::info!("Player {} won after {} ticks", p + 1, ticks),
        _ => log::info!("Stopped after {} ticks in {:?}", ticks, game.state()),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet; the library is driven by the embedding page
}
