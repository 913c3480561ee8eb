//! Tilescroll demo client
//!
//! Runs a session on a small built-in map. With `TILESCROLL_SERVER_URL` set
//! it exchanges snapshots and remote events with a backend; otherwise it
//! plays a scripted walk through a gateway pair and a remote join/move/leave.

use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tilescroll::{
    EngineConfig, Session, SessionEvent, VERSION,
    game::{Direction, InputEvent},
    network::{self, JoinedPayload, MovedPayload, NetworkEvent},
};

/// 5x5 room: stairs 44 at the bottom, 55 at the top, walls around.
fn demo_map() -> Vec<Vec<u32>> {
    const W: u32 = 8193;
    vec![
        vec![W, W, W, W, W],
        vec![W, 0, 55, 0, W],
        vec![W, 0, 0, 0, W],
        vec![W, 0, 44, 0, W],
        vec![W, W, W, W, W],
    ]
}

fn load_config() -> anyhow::Result<EngineConfig> {
    let mut config = match std::env::var("TILESCROLL_CONFIG") {
        Ok(path) => EngineConfig::from_path(&path).with_context(|| format!("loading {}", path))?,
        Err(_) => EngineConfig::default(),
    };
    // Stand just below the lower stairs
    config.local_actor.rect = tilescroll::Rect { x: 70.0, y: 120.0, width: 16.0, height: 16.0 };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Tilescroll v{}", VERSION);

    let config = load_config()?;
    info!("Tick rate: {} Hz ({} ms/tick)", config.tick_rate, config.tick_duration_ms());

    let mut session = Session::new(config, &demo_map()).context("building session")?;

    match std::env::var("TILESCROLL_SERVER_URL") {
        Ok(url) => run_online(&mut session, &url).await?,
        Err(_) => run_scripted(&mut session),
    }

    session.shutdown();
    Ok(())
}

/// Walk up through the stairs, then feed a scripted remote participant.
fn run_scripted(session: &mut Session) {
    info!("=== Scripted Demo ===");

    session.handle_input(InputEvent::press(Direction::Up));
    let mut teleports = 0;
    for _ in 0..90 {
        for event in session.step().events {
            log_event(&event);
            if matches!(event, SessionEvent::TeleportCompleted { .. }) {
                teleports += 1;
            }
        }
    }
    session.handle_input(InputEvent::release(Direction::Up));
    info!("Teleports completed: {}", teleports);

    let script = [
        NetworkEvent::PlayerJoined(JoinedPayload {
            id: "bot_1".to_string(),
            x: 64.0,
            y: 64.0,
            color: Some("#e74c3c".to_string()),
            name: Some("Bot".to_string()),
            direction: None,
        }),
        NetworkEvent::PlayerMoved(MovedPayload {
            id: "bot_1".to_string(),
            x: 96.0,
            y: 64.0,
            direction: Some(Direction::Right),
            color: None,
            name: None,
        }),
    ];
    for event in script {
        if let Some(event) = session.handle_network_event(event) {
            log_event(&event);
        }
    }

    session.run_ticks(20);
    for (remote, screen) in session.view().remote_sprites() {
        info!("Remote {} settled at {} (screen {})", remote.id, remote.current, screen);
    }

    let left = NetworkEvent::PlayerLeft { id: "bot_1".to_string() };
    if let Some(event) = session.handle_network_event(left) {
        log_event(&event);
    }

    let snapshot = session.snapshot();
    info!("Local actor {} at ({:.2}, {:.2}) facing {}", snapshot.id, snapshot.x, snapshot.y, snapshot.direction.as_str());
}

/// Exchange snapshots and events with a backend until it goes away.
async fn run_online(session: &mut Session, url: &str) -> anyhow::Result<()> {
    let mut transport = network::connect(url).await.with_context(|| format!("connecting to {}", url))?;
    let mut ticker = tokio::time::interval(Duration::from_millis(session.config().tick_duration_ms()));

    info!("=== Online Session ===");
    while transport.is_connected() {
        ticker.tick().await;

        for event in transport.drain() {
            if let Some(event) = session.handle_network_event(event) {
                log_event(&event);
            }
        }

        let result = session.step();
        for event in &result.events {
            log_event(event);
        }
        if let Some(snapshot) = result.snapshot {
            if let Err(e) = transport.send(snapshot) {
                warn!("Snapshot not sent: {}", e);
            }
        }
    }

    info!("Backend disconnected");
    transport.close();
    Ok(())
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::Moved { .. } | SessionEvent::MovementBlocked { .. } => {}
        other => match other.to_json() {
            Ok(json) => info!("{}", json),
            Err(_) => info!("{:?}", other),
        },
    }
}
