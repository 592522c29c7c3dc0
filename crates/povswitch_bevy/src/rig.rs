//! ECS components → `CharacterRig` (borrowed на время одного вызова)

use bevy::ecs::query::QueryData;
use bevy::prelude::*;
use povswitch_simulation::{
    ActorPose, CameraControl, CharacterRig, MeshVisibility, MovementControl, PlayerCharacter,
    PlayerControllerServices, Rotator, SpringArmControl,
};

use crate::camera::{FirstPersonCamera, TopDownCamera, TopDownSpringArm};
use crate::input::PlayerController;
use crate::movement::CharacterMovement;
use crate::visual::{BodyMesh, FirstPersonMesh};

/// Все collaborators персонажа (любой может отсутствовать)
#[derive(QueryData)]
#[query_data(mutable)]
pub struct CharacterRigQuery {
    pub entity: Entity,
    pub character: &'static mut PlayerCharacter,
    pub transform: &'static Transform,
    pub first_person_camera: Option<&'static mut FirstPersonCamera>,
    pub top_down_camera: Option<&'static mut TopDownCamera>,
    pub top_down_arm: Option<&'static mut TopDownSpringArm>,
    pub first_person_mesh: Option<&'static mut FirstPersonMesh>,
    pub body_mesh: Option<&'static mut BodyMesh>,
    pub movement: Option<&'static mut CharacterMovement>,
    pub controller: Option<&'static mut PlayerController>,
}

impl CharacterRigQueryItem<'_> {
    /// Разделить item на character + rig (disjoint borrows)
    pub fn split(&mut self) -> (&mut PlayerCharacter, CharacterRig<'_>) {
        let rig = CharacterRig {
            pose: actor_pose(self.transform),
            first_person_camera: self
                .first_person_camera
                .as_deref_mut()
                .map(|slot| &mut slot.camera as &mut dyn CameraControl),
            top_down_camera: self
                .top_down_camera
                .as_deref_mut()
                .map(|slot| &mut slot.camera as &mut dyn CameraControl),
            top_down_arm: self
                .top_down_arm
                .as_deref_mut()
                .map(|arm| arm as &mut dyn SpringArmControl),
            first_person_mesh: self
                .first_person_mesh
                .as_deref_mut()
                .map(|mesh| &mut mesh.0 as &mut dyn MeshVisibility),
            body_mesh: self
                .body_mesh
                .as_deref_mut()
                .map(|mesh| &mut mesh.0 as &mut dyn MeshVisibility),
            movement: self
                .movement
                .as_deref_mut()
                .map(|movement| movement as &mut dyn MovementControl),
            controller: self
                .controller
                .as_deref_mut()
                .map(|controller| controller as &mut dyn PlayerControllerServices),
        };

        (&mut *self.character, rig)
    }
}

/// Transform → pose (Z-up, yaw вокруг Z, pitch положительный = нос вверх)
pub fn actor_pose(transform: &Transform) -> ActorPose {
    let (yaw, pitch, roll) = transform.rotation.to_euler(EulerRot::ZYX);
    ActorPose::new(
        transform.translation,
        Rotator::new(-pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees()),
    )
}
