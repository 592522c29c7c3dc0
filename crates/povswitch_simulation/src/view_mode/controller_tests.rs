//! Tests for ViewModeController.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use bevy::math::Vec3;

    use super::super::{CameraSlot, ModeScopedState, ViewMode, ViewModeController};
    use crate::collaborators::{ActorPose, CharacterRig, InputMode};
    use crate::config::TopDownCameraSettings;
    use crate::test_support::TestRig;

    fn setup() -> (ViewModeController, ModeScopedState, TestRig) {
        (ViewModeController::new(), ModeScopedState::new(50.0), TestRig::default())
    }

    #[test]
    fn test_initial_state_is_first_person() {
        let controller = ViewModeController::default();
        assert_eq!(controller.mode(), ViewMode::FirstPerson);
        assert_eq!(controller.active_camera(), CameraSlot::FirstPerson);
        assert!(!controller.is_top_down());
    }

    #[test]
    fn test_enter_top_down_applies_side_effects() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::new(800.0, -60.0);

        let mode = controller.set_view_mode(ViewMode::TopDown, &mut fakes.rig(), &mut scoped, &settings);
        assert_eq!(mode, ViewMode::TopDown);

        // Камеры: ровно одна active
        assert!(fakes.top_down_camera.active && !fakes.top_down_camera.hidden);
        assert!(!fakes.first_person_camera.active && fakes.first_person_camera.hidden);

        // Arms скрыты, body видим всем
        assert!(!fakes.first_person_mesh.visible);
        assert!(fakes.first_person_mesh.hidden);
        assert!(!fakes.first_person_mesh.owner_only);
        assert!(fakes.body_mesh.visible && !fakes.body_mesh.hidden);
        assert!(!fakes.body_mesh.owner_no_see && !fakes.body_mesh.owner_only);

        // Orientation policy одинаковая в обоих режимах
        assert!(fakes.movement.use_controller_yaw);
        assert!(!fakes.movement.orient_rotation_to_movement);

        // Cursor + routing
        assert!(fakes.controller.cursor_visible);
        assert_eq!(fakes.controller.input_mode, InputMode::GameAndUi);

        // Top-down settings применены
        assert_eq!(fakes.arm.height, 800.0);
        assert_eq!(fakes.arm.pitch, -60.0);
    }

    #[test]
    fn test_enter_first_person_applies_side_effects() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::default();

        controller.set_view_mode(ViewMode::FirstPerson, &mut fakes.rig(), &mut scoped, &settings);

        assert!(fakes.first_person_camera.active && !fakes.first_person_camera.hidden);
        assert!(!fakes.top_down_camera.active && fakes.top_down_camera.hidden);
        assert!(fakes.first_person_mesh.visible && fakes.first_person_mesh.owner_only);
        assert!(!fakes.first_person_mesh.hidden);
        assert!(fakes.body_mesh.owner_no_see);
        assert!(!fakes.controller.cursor_visible);
        assert_eq!(fakes.controller.input_mode, InputMode::GameOnly);
        assert!(fakes.movement.use_controller_yaw);
        assert!(!fakes.movement.orient_rotation_to_movement);

        // Arm не трогаем вне TopDown
        assert_eq!(fakes.arm.height, 0.0);
    }

    #[test]
    fn test_toggle_twice_restores_first_person_state() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::default();

        // Construction-time entry action
        controller.set_view_mode(ViewMode::FirstPerson, &mut fakes.rig(), &mut scoped, &settings);
        let baseline = fakes.clone();

        controller.toggle(&mut fakes.rig(), &mut scoped, &settings);
        assert_eq!(controller.mode(), ViewMode::TopDown);
        controller.toggle(&mut fakes.rig(), &mut scoped, &settings);
        assert_eq!(controller.mode(), ViewMode::FirstPerson);

        assert_eq!(fakes.first_person_camera, baseline.first_person_camera);
        assert_eq!(fakes.top_down_camera, baseline.top_down_camera);
        assert_eq!(fakes.first_person_mesh, baseline.first_person_mesh);
        assert_eq!(fakes.body_mesh, baseline.body_mesh);
        assert_eq!(fakes.movement.use_controller_yaw, baseline.movement.use_controller_yaw);
        assert_eq!(
            fakes.movement.orient_rotation_to_movement,
            baseline.movement.orient_rotation_to_movement
        );
        assert_eq!(fakes.controller.cursor_visible, baseline.controller.cursor_visible);
        assert_eq!(fakes.controller.input_mode, baseline.controller.input_mode);
    }

    #[test]
    fn test_any_transition_clears_scoped_state() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::default();

        for mode in [ViewMode::TopDown, ViewMode::TopDown, ViewMode::FirstPerson] {
            scoped.aim.record(Vec3::new(1.0, 2.0, 0.0));
            scoped.click_move.begin(Vec3::new(1000.0, 0.0, 0.0), Vec3::ZERO);
            assert!(scoped.click_move.is_active());

            controller.set_view_mode(mode, &mut fakes.rig(), &mut scoped, &settings);

            assert!(scoped.aim.is_empty());
            assert!(scoped.click_move.target().is_none());
        }
    }

    #[test]
    fn test_missing_collaborators_do_not_abort_remaining_steps() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::new(1200.0, -30.0);

        // Только controller + arm, всё остальное отсутствует
        let mut rig = CharacterRig {
            pose: ActorPose::at(Vec3::ZERO),
            top_down_arm: Some(&mut fakes.arm),
            controller: Some(&mut fakes.controller),
            ..Default::default()
        };
        scoped.click_move.begin(Vec3::new(500.0, 0.0, 0.0), Vec3::ZERO);

        controller.set_view_mode(ViewMode::TopDown, &mut rig, &mut scoped, &settings);

        assert_eq!(controller.mode(), ViewMode::TopDown);
        assert!(scoped.click_move.target().is_none());
        assert!(fakes.controller.cursor_visible);
        assert_eq!(fakes.arm.height, 1200.0);
        assert_eq!(fakes.arm.pitch, -30.0);
    }

    #[test]
    fn test_bare_rig_never_panics() {
        let (mut controller, mut scoped, _) = setup();
        let settings = TopDownCameraSettings::default();
        let mut rig = CharacterRig::bare(ActorPose::default());

        controller.toggle(&mut rig, &mut scoped, &settings);
        controller.toggle(&mut rig, &mut scoped, &settings);
        assert_eq!(controller.mode(), ViewMode::FirstPerson);
    }

    #[test]
    fn test_observers_notified_once_per_transition() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        controller.subscribe(move |mode| sink.lock().unwrap().push(mode));

        controller.toggle(&mut fakes.rig(), &mut scoped, &settings);
        controller.set_view_mode(ViewMode::TopDown, &mut fakes.rig(), &mut scoped, &settings);
        controller.toggle(&mut fakes.rig(), &mut scoped, &settings);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ViewMode::TopDown, ViewMode::TopDown, ViewMode::FirstPerson]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (mut controller, mut scoped, mut fakes) = setup();
        let settings = TopDownCameraSettings::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let id = controller.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        controller.toggle(&mut fakes.rig(), &mut scoped, &settings);
        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.toggle(&mut fakes.rig(), &mut scoped, &settings);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_runtime_settings_reapplied_on_reentry() {
        let (mut controller, mut scoped, mut fakes) = setup();

        controller.set_view_mode(
            ViewMode::TopDown,
            &mut fakes.rig(),
            &mut scoped,
            &TopDownCameraSettings::new(1000.0, -45.0),
        );
        assert_eq!(fakes.arm.height, 1000.0);

        controller.set_view_mode(
            ViewMode::TopDown,
            &mut fakes.rig(),
            &mut scoped,
            &TopDownCameraSettings::new(500.0, -80.0),
        );
        assert_eq!(fakes.arm.height, 500.0);
        assert_eq!(fakes.arm.pitch, -80.0);
    }
}
