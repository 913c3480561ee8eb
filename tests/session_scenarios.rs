//! End-to-end session scenarios.

use tilescroll::game::{Direction, InputEvent, TeleportPhase, TELEPORT_DELAY_MS};
use tilescroll::network::{JoinedPayload, MovedPayload, NetworkEvent};
use tilescroll::{ConfigurationError, EngineConfig, Rect, Session, SessionEvent, Vec2};

fn config_with_actor(rect: Rect) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.local_actor.id = Some("local".to_string());
    config.local_actor.rect = rect;
    config
}

fn joined(id: &str, x: f32, y: f32) -> NetworkEvent {
    NetworkEvent::from_json(&format!(r#"{{"type":"player_joined","id":"{}","x":{},"y":{}}}"#, id, x, y)).unwrap()
}

fn moved(id: &str, x: f32, y: f32) -> NetworkEvent {
    NetworkEvent::PlayerMoved(MovedPayload {
        id: id.to_string(),
        x,
        y,
        direction: None,
        color: None,
        name: None,
    })
}

#[test]
fn test_blocked_tile_rejects_step_toward_it() {
    let mut session = Session::new(
        config_with_actor(Rect::new(2.0, 12.0, 8.0, 8.0).unwrap()),
        &[vec![8193]],
    )
    .unwrap();

    session.handle_input(InputEvent::press(Direction::Right));
    let result = session.step();

    assert_eq!(result.world_offset, Vec2::ZERO);
    assert!(result.events.contains(&SessionEvent::MovementBlocked { direction: Direction::Right }));
    assert_eq!(session.view().obstacles[0], Rect::new(10.0, 10.0, 12.0, 12.0).unwrap());
}

#[test]
fn test_stairs_up_then_back_down() {
    // 44 bottom, 55 top; the actor starts just below 44
    let rows = vec![
        vec![0, 0, 0],
        vec![0, 55, 0],
        vec![0, 0, 0],
        vec![0, 0, 0],
        vec![0, 44, 0],
        vec![0, 0, 0],
    ];
    let mut session = Session::new(config_with_actor(Rect::new(40.0, 160.0, 16.0, 16.0).unwrap()), &rows).unwrap();

    session.handle_input(InputEvent::press(Direction::Up));
    let mut started_at = None;
    for _ in 0..10 {
        let result = session.step();
        if result.events.iter().any(|e| matches!(e, SessionEvent::TeleportStarted { source_id: 44, .. })) {
            started_at = Some(session.now_ms());
            break;
        }
    }
    let started_at = started_at.expect("walking up into 44 should teleport");
    assert!(session.view().is_teleporting());

    // Offset frozen while suspended, even with Up still held
    let frozen = session.state().world.offset;
    let mut completed = false;
    while !completed {
        let result = session.step();
        completed = result.events.iter().any(|e| matches!(e, SessionEvent::TeleportCompleted { .. }));
        if !completed {
            assert_eq!(result.world_offset, frozen);
        }
    }
    assert!(session.now_ms() >= started_at + TELEPORT_DELAY_MS);
    assert_eq!(session.state().teleport.phase(), TeleportPhase::Idle);

    let actor_center = session.state().actor.center();
    assert_eq!(session.state().world.gateways.find(55).unwrap().center(), actor_center);

    // Step off upward, then walk back down into 55
    session.handle_input(InputEvent::release(Direction::Up));
    session.handle_input(InputEvent::press(Direction::Down));
    let result = session.run_ticks(10);
    assert!(result.events.contains(&SessionEvent::TeleportStarted { source_id: 55, destination_id: 44 }));
}

#[test]
fn test_missing_pair_never_suspends() {
    let mut session = Session::new(
        config_with_actor(Rect::new(40.0, 40.0, 16.0, 16.0).unwrap()),
        &[vec![0, 0, 0], vec![0, 44, 0]],
    )
    .unwrap();

    session.handle_input(InputEvent::press(Direction::Up));
    let result = session.step();

    assert!(result.events.contains(&SessionEvent::GatewayPairMissing { gateway_id: 44, destination_id: 55 }));
    assert!(!session.view().is_teleporting());
    // Actor keeps walking
    assert!(session.step().events.iter().any(|e| matches!(e, SessionEvent::Moved { .. })));
}

#[test]
fn test_lingering_on_unpaired_gateway_reports_once() {
    let mut config = config_with_actor(Rect::new(40.0, 40.0, 16.0, 16.0).unwrap());
    config.step = 0.01;
    let mut session = Session::new(config, &[vec![0, 0, 0], vec![0, 44, 0]]).unwrap();

    session.handle_input(InputEvent::press(Direction::Up));
    let reports = (0..60)
        .flat_map(|_| session.step().events)
        .filter(|e| matches!(e, SessionEvent::GatewayPairMissing { .. }))
        .count();

    assert_eq!(reports, 1);
    assert!(!session.view().is_teleporting());
}

#[test]
fn test_remote_join_move_converges() {
    let mut session = Session::new(config_with_actor(Rect::new(500.0, 500.0, 16.0, 16.0).unwrap()), &[vec![0]]).unwrap();

    session.handle_network_event(joined("p1", 64.0, 64.0));
    assert_eq!(session.handle_network_event(moved("p1", 96.0, 64.0)), None);

    let mut was_moving = false;
    for _ in 0..20 {
        session.step();
        let remote = session.state().remotes.get("p1").unwrap();
        if remote.is_moving {
            was_moving = true;
            assert_ne!(remote.current, remote.target);
        }
        assert!(remote.current.x <= 96.0);
    }

    let remote = session.state().remotes.get("p1").unwrap();
    assert!(was_moving);
    assert_eq!(remote.current, Vec2::new(96.0, 64.0));
    assert!(!remote.is_moving);
}

#[test]
fn test_move_after_leave_is_dropped() {
    let mut session = Session::new(EngineConfig::default(), &[vec![0]]).unwrap();
    session.handle_network_event(joined("p1", 64.0, 64.0));
    assert_eq!(
        session.handle_network_event(NetworkEvent::PlayerLeft { id: "p1".to_string() }),
        Some(SessionEvent::RemoteLeft { id: "p1".to_string() })
    );

    let dropped = session.handle_network_event(moved("p1", 0.0, 0.0));
    assert!(matches!(dropped, Some(SessionEvent::RemoteEventDropped { .. })));
    assert!(session.state().remotes.get("p1").is_none());
    assert_eq!(session.view().remote_sprites().count(), 0);
}

#[test]
fn test_shutdown_discards_pending_reanchor() {
    let rows = vec![vec![0, 0, 0], vec![0, 44, 0], vec![0, 0, 0], vec![0, 55, 0]];
    let mut config = config_with_actor(Rect::new(40.0, 40.0, 16.0, 16.0).unwrap());
    config.snapshot_interval_ticks = 0;
    let mut session = Session::new(config, &rows).unwrap();

    session.handle_input(InputEvent::press(Direction::Up));
    let result = session.step();
    assert!(result.events.iter().any(|e| matches!(e, SessionEvent::TeleportStarted { .. })));
    let offset = session.state().world.offset;

    session.shutdown();
    for _ in 0..60 {
        let result = session.step();
        assert!(result.events.is_empty());
        assert!(result.snapshot.is_none());
    }
    assert_eq!(session.state().world.offset, offset);
    assert!(session.state().teleport.transition().is_none());
}

#[test]
fn test_empty_map_is_configuration_error() {
    let err = Session::new(EngineConfig::default(), &[vec![]]).unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptyMap));
}

#[test]
fn test_joined_payload_attributes_reach_view() {
    let mut session = Session::new(EngineConfig::default(), &[vec![0]]).unwrap();
    session.handle_network_event(NetworkEvent::PlayerJoined(JoinedPayload {
        id: "p2".to_string(),
        x: 1.0,
        y: 2.0,
        color: Some("#2ecc71".to_string()),
        name: Some("Alice".to_string()),
        direction: Some(Direction::Left),
    }));

    let view = session.view();
    let (remote, _) = view.remote_sprites().next().unwrap();
    assert_eq!(remote.name, "Alice");
    assert_eq!(remote.facing, Direction::Left);
}
