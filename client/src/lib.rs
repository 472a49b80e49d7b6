//! # Jet Duel Client
//!
//! Rendering and input client for the two-player networked jet duel. The
//! server runs the authoritative simulation — movement, bullets, collisions,
//! scoring, power-ups, the win condition — and broadcasts snapshots of the
//! whole game state roughly sixty times a second. This client joins over a
//! WebSocket, follows those snapshots, and sends back semantic actions. It
//! never simulates anything on its own.
//!
//! ## Module Organization
//!
//! ### App Module (`app`)
//! Screen flow and the per-frame loop: owns the session, the connection
//! handle and the UI, drains network events in arrival order, and shows the
//! winner at the end of a match.
//!
//! ### Game Module (`game`)
//! The local session state: player/bullet/power-up projections, the message
//! dispatcher and its phase machine, snapshot reconciliation, and the
//! locally derived match countdown.
//!
//! ### Network Module (`network`)
//! The WebSocket connection manager: join on connect, decoded inbound
//! messages surfaced through a polled event channel, fire-and-forget action
//! sends, idempotent close.
//!
//! ### Input Module (`input`)
//! Key presses to semantic actions with fixed per-seat key sets, gated on
//! connection and seat membership.
//!
//! ### Rendering Module (`rendering`)
//! The read-and-paint pass over the current snapshot, plus the shared text
//! helpers the menu screens use.
//!
//! ### Assets and Leaderboard (`assets`, `leaderboard`)
//! Texture preloading with graceful degradation, and the read-only
//! leaderboard fetch from the server's REST API.

pub mod app;
pub mod assets;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod network;
pub mod rendering;
