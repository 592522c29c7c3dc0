//! Player character systems (ECS)
//!
//! # Архитектура
//!
//! **Порядок в Update (chain):**
//! 1. `initialize_view_modes` — Added<PlayerCharacter> → begin_play (entry action)
//! 2. `apply_top_down_settings` — runtime edits height/angle
//! 3. `dispatch_player_input` — PlayerInputEvent → PlayerCharacter::on_*
//! 4. `tick_player_characters` — TopDown aim + click-move step
//! 5. movement (sync yaw → integrate) + view points
//!
//! Input обрабатывается ДО tick: manual move отменяет click-move раньше,
//! чем tick успеет выдать ещё один step.

use bevy::prelude::*;
use povswitch_simulation::{logger, PlayerCharacter, ViewMode};

use super::events::{PlayerInputEvent, TopDownSettingsChanged, ViewModeChanged};
use crate::player::Player;
use crate::rig::CharacterRigQuery;
use crate::world::{ColliderQuery, ColliderRaycast};

/// Entry action стартового режима при spawn
///
/// # Schedule
/// - Update (первым в chain)
pub fn initialize_view_modes(
    mut characters: Query<CharacterRigQuery, Added<PlayerCharacter>>,
    mut mode_events: EventWriter<ViewModeChanged>,
) {
    for mut item in characters.iter_mut() {
        let entity = item.entity;
        let (character, mut rig) = item.split();
        let mode = character.begin_play(&mut rig);

        logger::log_info(&format!("🎥 Entity {:?} begin play in {} view", entity, mode));
        mode_events.write(ViewModeChanged { entity, mode });
    }
}

/// Runtime правки top-down camera
pub fn apply_top_down_settings(
    mut edits: EventReader<TopDownSettingsChanged>,
    mut characters: Query<CharacterRigQuery>,
) {
    for edit in edits.read() {
        let Ok(mut item) = characters.get_mut(edit.entity) else {
            logger::log_warning(&format!("⚠️ TopDown settings edit for unknown entity {:?}", edit.entity));
            continue;
        };

        let (character, mut rig) = item.split();
        character.set_top_down_settings(edit.settings, &mut rig);
        logger::log(&format!(
            "📐 TopDown settings: height={} angle={}",
            edit.settings.height(),
            edit.settings.angle()
        ));
    }
}

/// PlayerInputEvent → PlayerCharacter actions
///
/// # Архитектура
/// - Читает: PlayerInputEvent
/// - Пишет: ViewModeChanged (после каждого ToggleView)
/// - Query: With<Player> (input только для player-controlled персонажа)
pub fn dispatch_player_input(
    mut input_events: EventReader<PlayerInputEvent>,
    mut mode_events: EventWriter<ViewModeChanged>,
    mut players: Query<CharacterRigQuery, With<Player>>,
    colliders: ColliderQuery,
) {
    // Guard: нет player entity
    let Ok(mut item) = players.single_mut() else {
        input_events.clear();
        return;
    };

    let entity = item.entity;
    let world = ColliderRaycast::new(&colliders, Some(entity));
    let (character, mut rig) = item.split();

    for input in input_events.read() {
        match *input {
            PlayerInputEvent::Move(axis) => character.on_move_input(axis, &mut rig),
            PlayerInputEvent::Look(axis) => character.on_look_input(axis, &mut rig),
            PlayerInputEvent::JumpStarted => character.on_jump_started(&mut rig),
            PlayerInputEvent::JumpEnded => character.on_jump_ended(&mut rig),
            PlayerInputEvent::ToggleView => {
                let mode = character.toggle_view_mode(&mut rig);
                let label = match mode {
                    ViewMode::FirstPerson => "🎥 Camera → FirstPerson",
                    ViewMode::TopDown => "🎥 Camera → TopDown",
                };
                logger::log_info(label);
                mode_events.write(ViewModeChanged { entity, mode });
            }
            PlayerInputEvent::ClickMove => {
                if !character.on_click_move(&mut rig, &world) {
                    logger::log("🖱️ Click-move ignored (not TopDown or no ground hit)");
                }
            }
        }
    }
}

/// Per-frame tick (TopDown: aim + click-move step)
pub fn tick_player_characters(mut characters: Query<CharacterRigQuery>, colliders: ColliderQuery) {
    for mut item in characters.iter_mut() {
        let world = ColliderRaycast::new(&colliders, Some(item.entity));
        let (character, mut rig) = item.split();
        character.tick(&mut rig, &world);
    }
}
