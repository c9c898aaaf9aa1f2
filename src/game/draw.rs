//! Screen drawing for the match-level states

use glam::Vec2;

use super::state::MatchState;
use super::Game;
use crate::consts::{BOSS_UNLOCK_STARS, SPLASH_DURATION_TICKS, SPLASH_FADE_TICKS};
use crate::game::resolve;
use crate::renderer::vertex::with_alpha;
use crate::renderer::{Align, Canvas, Color, FontSize, colors};
use crate::sim::Rect;

/// Ticks per on/off phase of blinking prompts
const BLINK_TICKS: u64 = 30;
const PIP_RADIUS: f32 = 10.0;
const PIP_SPACING: f32 = 25.0;

/// Pip positions (in units of `PIP_SPACING` from the die center) for faces 1-9
pub fn pip_offsets(face: u8) -> &'static [(f32, f32)] {
    const C: (f32, f32) = (0.0, 0.0);
    const TL: (f32, f32) = (-1.0, -1.0);
    const TR: (f32, f32) = (1.0, -1.0);
    const BL: (f32, f32) = (-1.0, 1.0);
    const BR: (f32, f32) = (1.0, 1.0);
    const ML: (f32, f32) = (-1.0, 0.0);
    const MR: (f32, f32) = (1.0, 0.0);
    const TM: (f32, f32) = (0.0, -1.0);
    const BM: (f32, f32) = (0.0, 1.0);

    match face {
        1 => &[C],
        2 => &[TL, BR],
        3 => &[TL, C, BR],
        4 => &[TL, TR, BL, BR],
        5 => &[TL, TR, C, BL, BR],
        6 => &[TL, TR, ML, MR, BL, BR],
        7 => &[TL, TR, ML, C, MR, BL, BR],
        8 => &[TL, TM, TR, ML, MR, BL, BM, BR],
        9 => &[TL, TM, TR, ML, C, MR, BL, BM, BR],
        _ => &[],
    }
}

impl Game {
    /// Render the current state. Never mutates the match.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.state {
            MatchState::Splash => self.draw_splash(canvas),
            MatchState::Title => self.draw_title(canvas),
            MatchState::Board => self.draw_board(canvas),
            MatchState::Minigame => match &self.minigame {
                Some(game) => game.draw(canvas),
                None => canvas.clear(colors::BLACK),
            },
            MatchState::GameOver => self.draw_game_over(canvas),
            MatchState::ExpansionMenu => self.draw_expansion_menu(canvas),
        }
    }

    fn blink_on(&self) -> bool {
        (self.frame / BLINK_TICKS) % 2 == 0
    }

    fn centered(&self, canvas: &mut dyn Canvas, text: &str, y: f32, size: FontSize, color: Color) {
        canvas.text(
            text,
            Vec2::new(self.bounds.center().x, self.bounds.y + y),
            size,
            Align::Center,
            color,
        );
    }

    fn draw_splash(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::WHITE);

        // Fade to black over the last stretch
        let fade_start = SPLASH_DURATION_TICKS - SPLASH_FADE_TICKS;
        let alpha = if self.splash_timer > fade_start {
            (SPLASH_DURATION_TICKS - self.splash_timer) as f32 / SPLASH_FADE_TICKS as f32
        } else {
            1.0
        };

        let mid = self.bounds.center().y - self.bounds.y;
        self.centered(
            canvas,
            "Team Banana Labs Studios",
            mid + 150.0,
            FontSize::Large,
            with_alpha(colors::BLACK, alpha),
        );
        if alpha < 1.0 {
            canvas.overlay(with_alpha(colors::BLACK, 1.0 - alpha));
        }
    }

    fn draw_title(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::PURPLE);
        let b = &self.bounds;

        canvas.fill_circle(Vec2::new(b.x + 100.0, b.y + 100.0), 50.0, colors::YELLOW);
        canvas.fill_circle(
            Vec2::new(b.right() - 100.0, b.bottom() - 100.0),
            80.0,
            colors::RED,
        );

        // Title with drop shadow
        canvas.text(
            "Battle Street 2",
            Vec2::new(b.center().x + 4.0, b.y + 154.0),
            FontSize::Large,
            Align::Center,
            colors::BLACK,
        );
        self.centered(canvas, "Battle Street 2", 150.0, FontSize::Large, colors::WHITE);
        self.centered(canvas, "Party Edition", 230.0, FontSize::Large, colors::GREEN);

        if self.blink_on() {
            let prompts = [
                ("Press A / Space for 1 Player", colors::WHITE),
                ("Press B for 2 Players", colors::YELLOW),
                ("Press X for 3 Players", colors::GREEN),
                ("Press Y for 4 Players", colors::PURPLE),
            ];
            for (i, (text, color)) in prompts.into_iter().enumerate() {
                self.centered(canvas, text, 380.0 + i as f32 * 40.0, FontSize::Small, color);
            }
        }

        let footer = Vec2::new(b.x + 10.0, b.bottom() - 30.0);
        match self.controls.active_gamepad() {
            Some(id) => canvas.text(
                &format!("Controller: Gamepad {}", id),
                footer,
                FontSize::Tiny,
                Align::Left,
                colors::BLUE,
            ),
            None => canvas.text(
                "No Controller Detected (Use Keyboard)",
                footer,
                FontSize::Tiny,
                Align::Left,
                colors::RED,
            ),
        }
        canvas.text(
            "Controls: Arrows/WASD to Move, Space/Btn 0 to Action",
            Vec2::new(b.right() - 10.0, b.bottom() - 30.0),
            FontSize::Tiny,
            Align::Right,
            colors::WHITE,
        );

        let expansion = if self.settings.enable_expansion_pack {
            "Expansion Pack: ENABLED"
        } else {
            "Press E to enter an Expansion Pack code"
        };
        self.centered(canvas, expansion, 340.0, FontSize::Tiny, colors::CYAN);
    }

    fn draw_board(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BOARD);
        let b = &self.bounds;
        let active = self.players.active();
        let color = colors::PLAYERS[active % colors::PLAYERS.len()];

        self.centered(
            canvas,
            &format!("Player {}'s Turn", active + 1),
            30.0,
            FontSize::Large,
            color,
        );
        canvas.text(
            &format!(
                "P{} Stars: {}/{}",
                active + 1,
                self.players.stars(active),
                BOSS_UNLOCK_STARS
            ),
            Vec2::new(b.x + 50.0, b.y + 50.0),
            FontSize::Small,
            Align::Left,
            color,
        );

        if self.players.count() > 1 {
            for (i, stars) in self.players.all_stars().iter().enumerate() {
                canvas.text(
                    &format!("P{}: {}", i + 1, stars),
                    Vec2::new(b.right() - 100.0, b.y + 30.0 + i as f32 * 20.0),
                    FontSize::Tiny,
                    Align::Left,
                    colors::PLAYERS[i % colors::PLAYERS.len()],
                );
            }
        }

        if self.players.active_boss_unlocked() {
            // Pulse 0 -> 1 -> 0 once per second
            let phase = (self.frame % 60) as f32 / 60.0;
            let pulse = (phase * 2.0 - 1.0).abs();
            let mid = b.center().y - b.y;
            self.centered(
                canvas,
                "BOSS UNLOCKED!",
                mid - 50.0,
                FontSize::Large,
                with_alpha(colors::RED, pulse),
            );
            self.centered(canvas, "Press Space/A to Fight!", mid + 50.0, FontSize::Small, colors::WHITE);
            return;
        }

        if self.dice.is_idle() && self.dice.value == 0 {
            self.centered(canvas, "Roll the Dice!", 500.0, FontSize::Small, colors::GREEN);
        }

        let mut die = self.die_rect();
        die.y -= self.dice.jump_offset();
        self.draw_die(canvas, die);

        if self.dice.value > 0 {
            if let Some(kind) = resolve(self.dice.value, self.settings.enable_expansion_pack) {
                canvas.text(
                    kind.title(),
                    Vec2::new(b.center().x, die.bottom() + 30.0),
                    FontSize::Small,
                    Align::Center,
                    colors::YELLOW,
                );
            }
        }
    }

    fn draw_die(&self, canvas: &mut dyn Canvas, die: Rect) {
        canvas.fill_rect(die, colors::WHITE);
        canvas.stroke_rect(die, 4.0, colors::BLACK);

        let c = die.center();
        for &(dx, dy) in pip_offsets(self.dice.value) {
            canvas.fill_circle(
                c + Vec2::new(dx, dy) * PIP_SPACING,
                PIP_RADIUS,
                colors::BLACK,
            );
        }
    }

    fn draw_expansion_menu(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLACK);
        let b = &self.bounds;

        self.centered(canvas, "EXPANSION PACK", 100.0, FontSize::Large, colors::YELLOW);
        self.centered(canvas, "Enter Unlock Code:", 220.0, FontSize::Small, colors::WHITE);

        let field = Rect::from_center(Vec2::new(b.center().x, b.y + 300.0), Vec2::new(400.0, 60.0));
        canvas.fill_rect(field, colors::GREY);
        canvas.stroke_rect(field, 3.0, colors::WHITE);

        let digits = self.code.digits();
        let shown = if digits.is_empty() && self.blink_on() { "_" } else { digits };
        canvas.text(shown, field.center(), FontSize::Small, Align::Center, colors::WHITE);

        if let Some(message) = self.code.message() {
            let color = if self.code.is_unlocking() {
                colors::GREEN
            } else {
                colors::RED
            };
            self.centered(canvas, message, 380.0, FontSize::Small, color);
        }

        self.centered(
            canvas,
            "Enter: Submit  Backspace: Erase  C: Clear  Esc: Back",
            b.h - 40.0,
            FontSize::Tiny,
            colors::WHITE,
        );
    }

    fn draw_game_over(&self, canvas: &mut dyn Canvas) {
        canvas.clear(colors::BLUE);
        let mid = self.bounds.center().y - self.bounds.y;

        let headline = match self.winner {
            Some(p) => format!("PLAYER {} WINS THE GAME!", p + 1),
            None => "GAME OVER".to_string(),
        };
        self.centered(canvas, &headline, mid, FontSize::Large, colors::WHITE);
        self.centered(canvas, "Press ESC to Exit", mid + 100.0, FontSize::Small, colors::WHITE);
    }
}
