//! Draws the current session state, one read-and-paint pass per frame.
//!
//! Strictly presentational: nothing here mutates the session, reads input,
//! or touches the network.

use macroquad::prelude::*;
use shared::{PowerUpState, POWERUP_SIZE};

use crate::assets::Assets;
use crate::game::{BulletView, PlayerView, Role, Session};

const HUD_FONT_SIZE: f32 = 24.0;
const HUD_Y: f32 = 40.0;
const HUD_MARGIN: f32 = 20.0;

pub struct Renderer {
    assets: Assets,
}

impl Renderer {
    pub fn new(assets: Assets) -> Self {
        Renderer { assets }
    }

    /// Draws whatever the current snapshot holds: backdrop, both jets with
    /// their name/score overlays and the timer, then power-ups, then
    /// bullets. No frame skipping, no delta-time compensation.
    pub fn draw_match(&self, session: &Session) {
        self.draw_background();

        if let Some((left, right)) = &session.players {
            self.draw_player(left);
            self.draw_player(right);
            self.draw_hud(left, right, session.time_left);
        }

        for power_up in &session.power_ups {
            draw_power_up(power_up);
        }
        for bullet in &session.bullets {
            draw_bullet(bullet);
        }
    }

    /// The backdrop doubles as the frame clear.
    fn draw_background(&self) {
        clear_background(SKYBLUE);
        if let Some(texture) = &self.assets.background {
            draw_texture_ex(
                texture,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(screen_width(), screen_height())),
                    ..Default::default()
                },
            );
        }
    }

    fn draw_player(&self, player: &PlayerView) {
        let texture = match player.role {
            Role::Left => &self.assets.jet_left,
            Role::Right => &self.assets.jet_right,
        };
        match texture {
            Some(texture) => draw_texture_ex(
                texture,
                player.x,
                player.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(player.width, player.height)),
                    ..Default::default()
                },
            ),
            None => {
                draw_rectangle(
                    player.x,
                    player.y,
                    player.width,
                    player.height,
                    role_color(player.role),
                );
                draw_rectangle_lines(player.x, player.y, player.width, player.height, 2.0, WHITE);
            }
        }
    }

    fn draw_hud(&self, left: &PlayerView, right: &PlayerView, time_left: u64) {
        let left_label = format!("{}: {}", left.name, left.score);
        draw_text(&left_label, HUD_MARGIN, HUD_Y, HUD_FONT_SIZE, YELLOW);

        let right_label = format!("{}: {}", right.name, right.score);
        let dims = measure_text(&right_label, None, HUD_FONT_SIZE as u16, 1.0);
        draw_text(
            &right_label,
            screen_width() - HUD_MARGIN - dims.width,
            HUD_Y,
            HUD_FONT_SIZE,
            YELLOW,
        );

        let timer_label = format!("Time: {}", time_left);
        let dims = measure_text(&timer_label, None, HUD_FONT_SIZE as u16, 1.0);
        draw_text(
            &timer_label,
            (screen_width() - dims.width) / 2.0,
            HUD_Y,
            HUD_FONT_SIZE,
            YELLOW,
        );
    }
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Left => RED,
        Role::Right => BLUE,
    }
}

fn draw_power_up(power_up: &PowerUpState) {
    let radius = POWERUP_SIZE / 2.0;
    draw_circle(power_up.x + radius, power_up.y + radius, radius, LIME);
    if let Some(initial) = power_up.kind.chars().next() {
        let label = initial.to_string();
        let dims = measure_text(&label, None, 16, 1.0);
        draw_text(
            &label,
            power_up.x + radius - dims.width / 2.0,
            power_up.y + radius + 4.0,
            16.0,
            BLACK,
        );
    }
}

fn draw_bullet(bullet: &BulletView) {
    // Left seat shoots red; everything else, the right seat included,
    // falls through to blue.
    let color = match bullet.shooter {
        Some(Role::Left) => RED,
        _ => BLUE,
    };
    draw_rectangle(bullet.x, bullet.y, bullet.width, bullet.height, color);
}

/// Centered single-line text, shared by the non-game screens.
pub fn draw_centered_text(text: &str, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (screen_width() - dims.width) / 2.0, y, font_size, color);
}
