//! Headless demo: TopDown click-to-move по случайным точкам (seeded)
//!
//! Запуск: `povswitch_headless [seed]`

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use povswitch_bevy::*;
use povswitch_simulation::logger;
use rand::Rng;

const FRAMES: u32 = 1200;
const CLICK_EVERY: u32 = 180;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let mut app = create_headless_app(seed);
    app.add_plugins(PovSwitchPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_ground(&mut commands, 5000.0);
        spawn_obstacle(&mut commands, Vec2::new(800.0, -600.0), Vec3::new(100.0, 100.0, 150.0));
        match spawn_player_character(&mut commands, Vec2::ZERO, CharacterConfig::default()) {
            Ok(entity) => entity,
            Err(err) => {
                logger::log_error(&format!("❌ Invalid character config: {}", err));
                return;
            }
        }
    };
    app.world_mut().flush();

    app.update();
    app.world_mut().send_event(PlayerInputEvent::ToggleView);

    for frame in 0..FRAMES {
        if frame % CLICK_EVERY == 1 {
            let viewport = DEFAULT_VIEWPORT;
            let mouse = {
                let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
                Vec2::new(rng.rng.gen_range(0.0..viewport.x), rng.rng.gen_range(0.0..viewport.y))
            };

            if let Some(mut controller) = app.world_mut().get_mut::<PlayerController>(player) {
                controller.mouse_position = Some(mouse);
            }
            app.world_mut().send_event(PlayerInputEvent::ClickMove);
        }

        app.update();

        if frame % 60 == 0 {
            let world = app.world();
            let (Some(transform), Some(character)) =
                (world.get::<Transform>(player), world.get::<PlayerCharacter>(player))
            else {
                continue;
            };
            logger::log_info(&format!(
                "📍 frame {:4} pos=({:7.1}, {:7.1}) target={:?} aim={:?}",
                frame,
                transform.translation.x,
                transform.translation.y,
                character.click_move().target(),
                character.aim_state().last_aim_location(),
            ));
        }
    }

    logger::log_info("✅ Headless demo finished");
}
