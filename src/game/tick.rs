//! Fixed timestep match tick
//!
//! One call per frame: apply this tick's discrete events, then advance the
//! active screen (delegating to the minigame while one is running).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::dice::resolve;
use super::state::{DiceState, MatchState, PlayerSet};
use super::unlock::{CodeEntry, Submission};
use super::Game;
use crate::consts::SPLASH_DURATION_TICKS;
use crate::input::{Controls, InputEvent};
use crate::minigames;
use crate::settings::{Settings, SettingsStore};
use crate::sim::{MinigameKind, Outcome, Rect};

impl Game {
    /// New session on the splash screen. Settings are read from `store` once.
    pub fn new(seed: u64, bounds: Rect, store: Box<dyn SettingsStore>) -> Self {
        let settings = Settings::load_or_default(store.as_ref());
        Self {
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: MatchState::Splash,
            running: true,
            frame: 0,
            splash_timer: 0,
            players: PlayerSet::default(),
            dice: DiceState::default(),
            minigame: None,
            winner: None,
            settings,
            store,
            code: CodeEntry::new(),
            controls: Controls::new(),
        }
    }

    /// Advance the match by one fixed timestep
    pub fn tick(&mut self, events: &[InputEvent]) {
        for event in events {
            self.handle_event(event);
            if !self.running {
                return;
            }
        }

        match self.state {
            MatchState::Splash => {
                self.splash_timer += 1;
                if self.splash_timer >= SPLASH_DURATION_TICKS {
                    self.enter(MatchState::Title);
                }
            }
            MatchState::Board => self.update_board(),
            MatchState::Minigame => self.update_minigame(),
            MatchState::ExpansionMenu => {
                if self.code.tick() {
                    self.enter(MatchState::Title);
                }
            }
            MatchState::Title | MatchState::GameOver => {}
        }

        self.frame += 1;
    }

    /// Splash timer (for the fade)
    pub fn splash_ticks(&self) -> u32 {
        self.splash_timer
    }

    fn enter(&mut self, next: MatchState) {
        log::info!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Quit => {
                self.quit();
                return;
            }
            InputEvent::DeviceConnected(id) => {
                self.controls.connect(*id);
                return;
            }
            InputEvent::DeviceDisconnected(id) => {
                self.controls.disconnect(*id);
                return;
            }
            InputEvent::Back => {
                if self.state == MatchState::ExpansionMenu {
                    self.code.reset();
                    self.enter(MatchState::Title);
                } else {
                    self.quit();
                }
                return;
            }
            _ => {}
        }

        match self.state {
            MatchState::Title => match event {
                InputEvent::SelectPlayers(n) if (1..=crate::consts::MAX_PLAYERS).contains(n) => {
                    self.start_match(*n);
                }
                InputEvent::Click(_) => self.start_match(1),
                InputEvent::OpenMenu => {
                    self.code.reset();
                    self.enter(MatchState::ExpansionMenu);
                }
                _ => {}
            },
            MatchState::Board => match event {
                InputEvent::Action => self.board_action(),
                InputEvent::Click(pos) => {
                    if !self.players.active_boss_unlocked()
                        && self.dice.is_idle()
                        && self.die_rect().contains_point(*pos)
                    {
                        self.dice.start();
                    }
                }
                _ => {}
            },
            MatchState::ExpansionMenu => match event {
                InputEvent::Digit(c) => self.code.push_digit(*c),
                InputEvent::Paste(text) => self.code.paste(text),
                InputEvent::Erase => self.code.erase(),
                InputEvent::Clear => self.code.clear(),
                InputEvent::Submit => {
                    if self.code.submit() == Submission::Accepted {
                        self.unlock_expansion();
                    }
                }
                _ => {}
            },
            MatchState::Splash | MatchState::Minigame | MatchState::GameOver => {}
        }
    }

    fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    /// Title -> Board with a fresh ledger and die
    fn start_match(&mut self, players: usize) {
        log::info!("Starting match with {} player(s)", players);
        self.players.reset_all(players);
        self.dice.reset();
        self.winner = None;
        self.enter(MatchState::Board);
    }

    /// Primary action on the board: boss entry, roll, or stop
    fn board_action(&mut self) {
        if self.players.active_boss_unlocked() {
            self.start_minigame(MinigameKind::Boss);
        } else if self.dice.is_idle() {
            self.dice.start();
        } else {
            self.dice.stop();
        }
    }

    fn update_board(&mut self) {
        let faces = self.settings.dice_faces();
        let Some(face) = self.dice.advance(&mut self.rng, faces) else {
            return;
        };

        match resolve(face, self.settings.enable_expansion_pack) {
            Some(kind) => {
                log::info!("Rolled {} -> {}", face, kind.title());
                self.start_minigame(kind);
            }
            None => {
                log::warn!("Rolled face {} selects no minigame", face);
                self.dice.reset();
            }
        }
    }

    pub(crate) fn start_minigame(&mut self, kind: MinigameKind) {
        let seed = self.rng.random::<u64>();
        log::info!(
            "Player {} plays {}",
            self.players.active() + 1,
            kind.title()
        );
        self.minigame = Some(minigames::create(kind, self.bounds, seed));
        // A button still held from the board must not fire on the first tick
        self.controls.rearm();
        self.enter(MatchState::Minigame);
    }

    fn update_minigame(&mut self) {
        let input = self.controls.sample();
        let Some(game) = self.minigame.as_mut() else {
            // No round to run; fall back to the board
            self.enter(MatchState::Board);
            return;
        };

        game.handle_input(&input);
        if let Some(verdict) = game.update() {
            if verdict.is_final() {
                self.conclude_round(verdict.outcome);
            }
        }
    }

    /// Route a finished round: boss results first, then star award and turn
    pub(crate) fn conclude_round(&mut self, outcome: Outcome) {
        let player = self.players.active();
        log::info!("Player {} round over: {}", player + 1, outcome);
        self.minigame = None;
        self.dice.reset();

        match outcome {
            Outcome::BossDefeated => {
                self.winner = Some(player);
                self.enter(MatchState::GameOver);
            }
            Outcome::BossVictorious => {
                self.players.advance_turn();
                self.enter(MatchState::Board);
            }
            other => {
                if other.awards_star() {
                    self.players.award_star(player);
                }
                self.players.advance_turn();
                self.enter(MatchState::Board);
            }
        }
    }

    fn unlock_expansion(&mut self) {
        log::info!("Expansion pack unlocked");
        self.settings.enable_expansion_pack = true;
        if let Err(e) = self.store.save(&self.settings) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}
