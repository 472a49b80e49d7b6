use clap::Parser;
use log::info;
use macroquad::prelude::*;

use client::app::App;
use client::assets::Assets;
use client::rendering::Renderer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebSocket endpoint of the game server
    #[arg(short = 's', long, default_value = "ws://127.0.0.1:8080/jet-game")]
    server: String,

    /// Base URL of the leaderboard REST API
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    http: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Jet Duel".to_owned(),
        window_width: shared::GAME_WIDTH as i32,
        window_height: shared::GAME_HEIGHT as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    info!("Game server: {}", args.server);
    info!("Leaderboard API: {}", args.http);
    info!("Controls: left seat W/S + Space, right seat Up/Down + Enter");

    let assets = Assets::load().await;
    App::new(args.server, args.http, Renderer::new(assets))
        .run()
        .await;
}
