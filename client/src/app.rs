//! Screen flow and the per-frame loop.
//!
//! `App` owns the session, the optional connection, and the UI surfaces.
//! Each frame drains pending network events in arrival order, then draws
//! whichever screen the session is on. All state lives here and is handed
//! to the other modules by reference; there is no ambient global state.

use std::time::Instant;

use log::{info, warn};
use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui};

use shared::{LeaderboardEntry, PlayerAction};

use crate::game::{Screen, Session, Winner};
use crate::input::InputMapper;
use crate::leaderboard::{self, LeaderboardRequest};
use crate::network::{Connection, NetEvent};
use crate::rendering::{draw_centered_text, Renderer};

enum LeaderboardView {
    Idle,
    Loading(LeaderboardRequest),
    Ready(Vec<LeaderboardEntry>),
    Failed(String),
}

pub struct App {
    session: Session,
    connection: Option<Connection>,
    renderer: Renderer,
    input: InputMapper,
    name_entry: String,
    error_note: Option<String>,
    leaderboard: LeaderboardView,
    server_url: String,
    http_base: String,
}

impl App {
    pub fn new(server_url: String, http_base: String, renderer: Renderer) -> Self {
        App {
            session: Session::new(),
            connection: None,
            renderer,
            input: InputMapper::new(),
            name_entry: String::new(),
            error_note: None,
            leaderboard: LeaderboardView::Idle,
            server_url,
            http_base,
        }
    }

    pub async fn run(mut self) {
        loop {
            self.pump_network();
            self.session.update_timer(Instant::now());

            match self.session.screen {
                Screen::Menu => self.menu_frame(),
                Screen::NameEntry => self.name_entry_frame(),
                Screen::Scoreboard => self.scoreboard_frame(),
                Screen::Waiting => self.waiting_frame(),
                Screen::Playing => self.playing_frame(),
                Screen::GameOver => self.game_over_frame(),
            }

            next_frame().await;
        }
    }

    /// Drains pending events and hands each to the dispatcher, strictly in
    /// arrival order, before anything is drawn this frame.
    fn pump_network(&mut self) {
        let mut events = Vec::new();
        if let Some(connection) = self.connection.as_mut() {
            while let Some(event) = connection.poll() {
                events.push(event);
            }
        }
        for event in events {
            match event {
                NetEvent::Opened => info!("join request sent"),
                NetEvent::Message(message) => self.session.apply(message, Instant::now()),
                NetEvent::Failed(reason) => {
                    warn!("connection failed: {}", reason);
                    self.error_note = Some(reason);
                    self.connection = None;
                    self.session.abort_join();
                }
                NetEvent::Closed => {
                    info!("channel closed");
                    self.connection = None;
                }
            }
        }
    }

    fn menu_frame(&mut self) {
        clear_background(DARKBLUE);
        draw_centered_text("JET DUEL", 180.0, 48.0, YELLOW);

        if root_ui().button(vec2(365.0, 280.0), "PLAY") {
            self.error_note = None;
            self.session.screen = Screen::NameEntry;
        }
        if root_ui().button(vec2(340.0, 330.0), "SCOREBOARD") {
            self.leaderboard = LeaderboardView::Loading(leaderboard::fetch(&self.http_base));
            self.session.screen = Screen::Scoreboard;
        }
    }

    fn name_entry_frame(&mut self) {
        clear_background(DARKBLUE);
        draw_centered_text("Enter your pilot name", 220.0, 32.0, WHITE);
        root_ui().input_text(hash!(), "name", &mut self.name_entry);

        if let Some(reason) = &self.error_note {
            draw_centered_text(reason, 430.0, 20.0, RED);
        }

        if root_ui().button(vec2(370.0, 320.0), "JOIN") {
            let name = self.name_entry.trim().to_string();
            if name.is_empty() {
                self.error_note = Some("Please enter your player name.".to_string());
            } else {
                self.error_note = None;
                self.session.begin_join(&name);
                self.connection = Some(Connection::open(&self.server_url, &name));
            }
        }
    }

    fn scoreboard_frame(&mut self) {
        clear_background(DARKBLUE);
        draw_centered_text("LEADERBOARD", 80.0, 36.0, YELLOW);

        if let LeaderboardView::Loading(request) = &self.leaderboard {
            if let Some(outcome) = request.poll() {
                self.leaderboard = match outcome {
                    Ok(rows) => LeaderboardView::Ready(rows),
                    Err(reason) => LeaderboardView::Failed(reason),
                };
            }
        }

        match &self.leaderboard {
            LeaderboardView::Loading(_) => draw_centered_text("Loading...", 220.0, 24.0, WHITE),
            LeaderboardView::Ready(rows) if rows.is_empty() => {
                draw_centered_text("No matches recorded yet", 220.0, 24.0, WHITE)
            }
            LeaderboardView::Ready(rows) => {
                for (index, row) in rows.iter().enumerate() {
                    let line = format!(
                        "{:2}. {:<16} {:>4}  {}",
                        index + 1,
                        row.player_name,
                        row.score,
                        leaderboard::format_match_date(row.match_date)
                    );
                    draw_text(&line, 180.0, 140.0 + index as f32 * 28.0, 22.0, WHITE);
                }
            }
            LeaderboardView::Failed(reason) => draw_centered_text(
                &format!("Could not load leaderboard: {}", reason),
                220.0,
                20.0,
                RED,
            ),
            LeaderboardView::Idle => {}
        }

        if root_ui().button(vec2(330.0, 520.0), "BACK TO MENU") {
            self.leaderboard = LeaderboardView::Idle;
            self.session.screen = Screen::Menu;
        }
    }

    fn waiting_frame(&mut self) {
        clear_background(DARKBLUE);
        draw_centered_text("Waiting for an opponent...", 280.0, 28.0, WHITE);
        if let Some(who) = &self.session.waiting_note {
            draw_centered_text(&format!("{} is in the lobby", who), 320.0, 20.0, LIGHTGRAY);
        }
    }

    fn playing_frame(&mut self) {
        self.renderer.draw_match(&self.session);

        let open = self
            .connection
            .as_ref()
            .map(Connection::is_open)
            .unwrap_or(false);
        if let Some(action) = self.input.poll(open, &self.session) {
            if let Some(connection) = &self.connection {
                connection.send_action(PlayerAction {
                    player: self.session.identity.clone(),
                    action,
                });
            }
        }
    }

    fn game_over_frame(&mut self) {
        clear_background(DARKBLUE);
        draw_centered_text("GAME OVER", 160.0, 48.0, YELLOW);

        match &self.session.outcome {
            Some(outcome) => {
                let headline = match &outcome.winner {
                    Winner::Player(name) => format!("Winner: {}!", name),
                    Winner::Draw => "It's a draw!".to_string(),
                };
                draw_centered_text(&headline, 250.0, 32.0, WHITE);
                draw_centered_text(
                    &format!("Your score: {}", outcome.own_score),
                    300.0,
                    24.0,
                    WHITE,
                );
            }
            None => draw_centered_text("Match ended unexpectedly", 250.0, 24.0, WHITE),
        }

        if root_ui().button(vec2(370.0, 400.0), "EXIT") {
            if let Some(mut connection) = self.connection.take() {
                connection.close();
            }
            self.session.exit_to_menu();
        }
    }
}
