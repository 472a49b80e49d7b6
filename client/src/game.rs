//! Local session state: the snapshot-follower side of the client.
//!
//! The server simulates everything; this module only merges authoritative
//! snapshots into render-ready projections and tracks which screen the
//! client is on. Nothing here ever computes gameplay.

use std::time::Instant;

use log::{info, warn};
use shared::{BulletState, PlayerState, PowerUpState, ServerMessage, Snapshot, MATCH_SECONDS};

/// Fixed seat assignment, decided once per match by snapshot order: the
/// first entry of the starting snapshot flies the left jet, the second the
/// right. Controls and draw colors key off this, never off name comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Left,
    Right,
}

/// Render-oriented projection of a server player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: u32,
    pub role: Role,
}

impl PlayerView {
    fn from_state(state: &PlayerState, role: Role) -> Self {
        PlayerView {
            name: state.name.clone(),
            x: state.x,
            y: state.y,
            width: state.width,
            height: state.height,
            score: state.score,
            role,
        }
    }

    fn overwrite(&mut self, state: &PlayerState) {
        self.x = state.x;
        self.y = state.y;
        // Dimensions travel on every snapshot; power-ups can resize the jets.
        self.width = state.width;
        self.height = state.height;
        self.score = state.score;
    }
}

/// Render-oriented projection of a server bullet. Bullets have no identity
/// across ticks; the shooter's seat is resolved once, when the snapshot is
/// applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub shooter: Option<Role>,
}

impl BulletView {
    fn from_state(state: &BulletState, shooter: Option<Role>) -> Self {
        BulletView {
            x: state.x,
            y: state.y,
            width: state.width,
            height: state.height,
            speed: state.speed,
            shooter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    NameEntry,
    Scoreboard,
    Waiting,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Winner {
    Player(String),
    Draw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub winner: Winner,
    pub winning_score: u32,
    /// The local player's own final score, 0 when the identity matched
    /// neither finalist.
    pub own_score: u32,
}

/// All match-scoped and screen-scoped client state, owned by the app loop
/// and passed by reference everywhere else.
#[derive(Debug)]
pub struct Session {
    pub identity: String,
    pub screen: Screen,
    pub players: Option<(PlayerView, PlayerView)>,
    pub bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpState>,
    pub waiting_note: Option<String>,
    pub outcome: Option<MatchOutcome>,
    /// Seconds left on the local countdown, clamped at zero.
    pub time_left: u64,
    own_role: Option<Role>,
    match_started: Option<Instant>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            identity: String::new(),
            screen: Screen::Menu,
            players: None,
            bullets: Vec::new(),
            power_ups: Vec::new(),
            waiting_note: None,
            outcome: None,
            time_left: MATCH_SECONDS,
            own_role: None,
            match_started: None,
        }
    }

    /// Records the chosen display name and moves to the waiting screen while
    /// the connection comes up.
    pub fn begin_join(&mut self, name: &str) {
        self.identity = name.to_string();
        self.waiting_note = None;
        self.screen = Screen::Waiting;
    }

    /// Connection failure: back to name entry, nothing retried.
    pub fn abort_join(&mut self) {
        self.screen = Screen::NameEntry;
    }

    /// Leaves the match behind entirely and returns to the menu.
    pub fn exit_to_menu(&mut self) {
        self.clear_match_state();
        self.waiting_note = None;
        self.screen = Screen::Menu;
    }

    /// The seat the local identity occupies, if it is one of the two known
    /// players. `None` both before the first snapshot and for spectating
    /// identities; input is gated on this.
    pub fn participant_role(&self) -> Option<Role> {
        if self.players.is_some() {
            self.own_role
        } else {
            None
        }
    }

    /// Message dispatcher. Exhaustive over the known message types, one
    /// message at a time, in arrival order. Messages arriving outside their
    /// expected screen are still processed for state (fail-soft).
    pub fn apply(&mut self, message: ServerMessage, now: Instant) {
        match message {
            ServerMessage::WaitingForPlayer(who) => {
                info!("{} joined, waiting for a second player", who);
                self.waiting_note = Some(who);
            }
            ServerMessage::GameStart(snapshot) => {
                info!("match starting");
                self.start_match(now);
                self.reconcile(&snapshot, now);
                self.screen = Screen::Playing;
            }
            ServerMessage::ScoreUpdate(snapshot) => {
                self.reconcile(&snapshot, now);
            }
            ServerMessage::GameOver(snapshot) => {
                self.reconcile(&snapshot, now);
                self.outcome = self.final_outcome();
                // Freeze the countdown; the match clock is match-scoped.
                self.match_started = None;
                self.screen = Screen::GameOver;
                info!("match over");
            }
        }
    }

    /// Merges one authoritative snapshot into the local projections.
    ///
    /// A snapshot that does not carry both players is dropped whole before
    /// any field is touched; there is no partial apply.
    pub fn reconcile(&mut self, snapshot: &Snapshot, now: Instant) {
        if snapshot.players.len() < 2 {
            warn!(
                "dropping snapshot with {} player entries",
                snapshot.players.len()
            );
            return;
        }

        match &mut self.players {
            None => {
                // First snapshot of the match: seat assignment follows the
                // order the server sent, not the names.
                let left = PlayerView::from_state(&snapshot.players[0], Role::Left);
                let right = PlayerView::from_state(&snapshot.players[1], Role::Right);
                self.own_role = if self.identity == left.name {
                    Some(Role::Left)
                } else if self.identity == right.name {
                    Some(Role::Right)
                } else {
                    None
                };
                self.players = Some((left, right));
            }
            Some((left, right)) => {
                // Match by name; a name the snapshot no longer carries keeps
                // its previous state on screen for this tick.
                if let Some(state) = snapshot.players.iter().find(|p| p.name == left.name) {
                    left.overwrite(state);
                }
                if let Some(state) = snapshot.players.iter().find(|p| p.name == right.name) {
                    right.overwrite(state);
                }
            }
        }

        // Bullets and power-ups carry no cross-tick identity: rebuild both
        // lists wholesale from the snapshot.
        let bullets = snapshot
            .bullets
            .iter()
            .map(|bullet| BulletView::from_state(bullet, self.role_of(&bullet.shooter_name)))
            .collect();
        self.bullets = bullets;
        self.power_ups = snapshot.power_ups.clone();

        self.update_timer(now);
    }

    /// Re-derives the countdown from the local match clock. Never trusts a
    /// server-sent remaining time; never goes negative.
    pub fn update_timer(&mut self, now: Instant) {
        if let Some(started) = self.match_started {
            let elapsed = now.saturating_duration_since(started).as_secs();
            self.time_left = MATCH_SECONDS.saturating_sub(elapsed);
        }
    }

    fn start_match(&mut self, now: Instant) {
        self.clear_match_state();
        self.match_started = Some(now);
    }

    fn clear_match_state(&mut self) {
        self.players = None;
        self.own_role = None;
        self.bullets.clear();
        self.power_ups.clear();
        self.outcome = None;
        self.match_started = None;
        self.time_left = MATCH_SECONDS;
    }

    fn role_of(&self, name: &str) -> Option<Role> {
        let (left, right) = self.players.as_ref()?;
        if name == left.name {
            Some(Role::Left)
        } else if name == right.name {
            Some(Role::Right)
        } else {
            None
        }
    }

    fn final_outcome(&self) -> Option<MatchOutcome> {
        let (left, right) = self.players.as_ref()?;
        let winner = if left.score > right.score {
            Winner::Player(left.name.clone())
        } else if right.score > left.score {
            Winner::Player(right.name.clone())
        } else {
            Winner::Draw
        };
        let own_score = if self.identity == left.name {
            left.score
        } else if self.identity == right.name {
            right.score
        } else {
            0
        };
        Some(MatchOutcome {
            winner,
            winning_score: left.score.max(right.score),
            own_score,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
