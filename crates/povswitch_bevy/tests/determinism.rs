//! Determinism test: одинаковый seed → одинаковая траектория click-move
//!
//! Случайные клики (ChaCha8 из DeterministicRng) в TopDown, 600 тиков.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use povswitch_bevy::*;
use rand::Rng;

fn run_clicks(seed: u64, ticks: u32) -> Vec<Vec3> {
    let mut app = create_headless_app(seed);
    app.add_plugins(PovSwitchPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    {
        let mut commands = app.world_mut().commands();
        spawn_ground(&mut commands, 5000.0);
    }
    let bundle = player_character_bundle(Vec2::ZERO, CharacterConfig::default()).unwrap();
    let player = app.world_mut().spawn(bundle).id();
    app.update();
    app.world_mut().send_event(PlayerInputEvent::ToggleView);
    app.update();

    let mut trajectory = Vec::new();
    for tick in 0..ticks {
        if tick % 120 == 0 {
            let mouse = {
                let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
                Vec2::new(
                    rng.rng.gen_range(0.0..DEFAULT_VIEWPORT.x),
                    rng.rng.gen_range(0.0..DEFAULT_VIEWPORT.y),
                )
            };
            app.world_mut().get_mut::<PlayerController>(player).unwrap().mouse_position = Some(mouse);
            app.world_mut().send_event(PlayerInputEvent::ClickMove);
        }

        app.update();

        if tick % 30 == 0 {
            trajectory.push(app.world().get::<Transform>(player).unwrap().translation);
        }
    }

    trajectory
}

#[test]
fn test_same_seed_same_trajectory() {
    let first = run_clicks(42, 600);
    let second = run_clicks(42, 600);
    assert_eq!(first, second);
}

#[test]
fn test_character_actually_moves() {
    let trajectory = run_clicks(7, 600);
    let start = trajectory[0];
    assert!(
        trajectory.iter().any(|p| (p.truncate() - start.truncate()).length() > 10.0),
        "character never moved: {:?}",
        trajectory
    );
}
