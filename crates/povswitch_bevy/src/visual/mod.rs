//! Mesh visibility components (first-person arms + full body)
//!
//! Renderer (вне crate) читает `MeshState` и решает, что рисовать для
//! owner'а (player view) и для остальных (spectators, mirrors, тени).

use bevy::prelude::*;
use povswitch_simulation::MeshVisibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct MeshState {
    pub visible: bool,
    pub hidden_in_render: bool,
    pub owner_only_see: bool,
    pub owner_no_see: bool,
}

impl Default for MeshState {
    fn default() -> Self {
        Self {
            visible: true,
            hidden_in_render: false,
            owner_only_see: false,
            owner_no_see: false,
        }
    }
}

impl MeshState {
    fn rendered(&self) -> bool {
        self.visible && !self.hidden_in_render
    }

    /// Виден в камере владельца
    pub fn visible_to_owner(&self) -> bool {
        self.rendered() && !self.owner_no_see
    }

    /// Виден всем остальным
    pub fn visible_to_others(&self) -> bool {
        self.rendered() && !self.owner_only_see
    }
}

impl MeshVisibility for MeshState {
    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_hidden_in_render(&mut self, hidden: bool) {
        self.hidden_in_render = hidden;
    }

    fn set_owner_only_visibility(&mut self, owner_only: bool) {
        self.owner_only_see = owner_only;
    }

    fn set_owner_no_see(&mut self, owner_no_see: bool) {
        self.owner_no_see = owner_no_see;
    }
}

/// First-person arms mesh
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct FirstPersonMesh(pub MeshState);

/// Full body mesh
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct BodyMesh(pub MeshState);
