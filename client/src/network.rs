//! Connection manager: one WebSocket to the game server.
//!
//! The socket lives on its own thread with a small tokio runtime; the frame
//! loop never blocks on IO. Decoded messages and lifecycle changes surface
//! through an event channel drained once per frame, which keeps the
//! one-handler-at-a-time model intact.

use std::thread;

use futures_util::{SinkExt, StreamExt};
use log::{error, info, warn};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::tungstenite::Message;

use shared::{decode_server_message, ClientMessage, DecodeError, PlayerAction, ServerMessage};

/// What the IO thread reports back to the frame loop, in arrival order.
#[derive(Debug)]
pub enum NetEvent {
    /// Channel is up and the join request has been sent.
    Opened,
    Message(ServerMessage),
    /// Connecting failed; carries a human-readable reason. Never retried.
    Failed(String),
    Closed,
}

#[derive(Debug)]
enum Command {
    Send(ClientMessage),
    Close,
}

pub struct Connection {
    events: UnboundedReceiver<NetEvent>,
    commands: UnboundedSender<Command>,
    open: bool,
}

impl Connection {
    /// Opens the channel and sends the join request (display name only) as
    /// soon as the handshake completes.
    pub fn open(url: &str, player_name: &str) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let url = url.to_string();
        let player_name = player_name.to_string();
        thread::spawn(move || {
            match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(io_task(url, player_name, event_tx, command_rx)),
                Err(e) => {
                    let _ = event_tx.send(NetEvent::Failed(format!("runtime setup: {}", e)));
                }
            }
        });

        Connection {
            events: event_rx,
            commands: command_tx,
            open: false,
        }
    }

    /// Next pending event, if any. Tracks the open/closed flag as events go
    /// by so `send_action` can guard on it.
    pub fn poll(&mut self) -> Option<NetEvent> {
        match self.events.try_recv() {
            Ok(event) => {
                match event {
                    NetEvent::Opened => self.open = true,
                    NetEvent::Failed(_) | NetEvent::Closed => self.open = false,
                    NetEvent::Message(_) => {}
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if self.open {
                    self.open = false;
                    Some(NetEvent::Closed)
                } else {
                    None
                }
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Fire-and-forget. Dropped (and logged) when the channel is not open;
    /// actions are never queued for later.
    pub fn send_action(&self, action: PlayerAction) {
        if !self.open {
            warn!("channel not open, dropping {:?} action", action.action);
            return;
        }
        if self
            .commands
            .send(Command::Send(ClientMessage::Action(action)))
            .is_err()
        {
            warn!("io thread gone, action dropped");
        }
    }

    /// Requests a clean close. Safe to call repeatedly or on a channel that
    /// already went away.
    pub fn close(&mut self) {
        let _ = self.commands.send(Command::Close);
        self.open = false;
    }
}

async fn io_task(
    url: String,
    player_name: String,
    events: UnboundedSender<NetEvent>,
    mut commands: UnboundedReceiver<Command>,
) {
    info!("connecting to {}", url);
    let (mut ws, _) = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok(ok) => ok,
        Err(e) => {
            let _ = events.send(NetEvent::Failed(e.to_string()));
            return;
        }
    };

    let join = ClientMessage::Join(player_name);
    let join = match serde_json::to_string(&join) {
        Ok(text) => text,
        Err(e) => {
            let _ = events.send(NetEvent::Failed(format!("encoding join request: {}", e)));
            return;
        }
    };
    if let Err(e) = ws.send(Message::Text(join)).await {
        let _ = events.send(NetEvent::Failed(e.to_string()));
        return;
    }
    let _ = events.send(NetEvent::Opened);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Send(message)) => match serde_json::to_string(&message) {
                    Ok(text) => {
                        if let Err(e) = ws.send(Message::Text(text)).await {
                            error!("send failed: {}", e);
                            let _ = events.send(NetEvent::Closed);
                            break;
                        }
                    }
                    Err(e) => error!("encoding outbound message: {}", e),
                },
                // Close requested, or the Connection handle was dropped.
                Some(Command::Close) | None => {
                    let _ = ws.close(None).await;
                    let _ = events.send(NetEvent::Closed);
                    break;
                }
            },
            frame = ws.next() => match frame {
                Some(Ok(Message::Text(text))) => match decode_server_message(&text) {
                    Ok(message) => {
                        let _ = events.send(NetEvent::Message(message));
                    }
                    Err(DecodeError::UnknownType(kind)) => {
                        warn!("ignoring unknown message type {}", kind);
                    }
                    Err(e) => warn!("ignoring undecodable frame: {}", e),
                },
                // Ping/pong/binary carry nothing for us.
                Some(Ok(Message::Close(_))) | None => {
                    info!("server closed the channel");
                    let _ = events.send(NetEvent::Closed);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!("receive failed: {}", e);
                    let _ = events.send(NetEvent::Closed);
                    break;
                }
            },
        }
    }
}
