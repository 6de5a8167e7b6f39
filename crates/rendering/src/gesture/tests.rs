use bevy::prelude::*;

use departments::config::GestureConfig;

use super::*;

/// Records every call the classifier makes to its collaborators.
#[derive(Default)]
struct FakeHost {
    ui_region: Option<Rect>,
    ui_queries: Vec<(PointerId, Vec2)>,
    rotation: bool,
    rotation_log: Vec<bool>,
    /// Screen regions and the entity a ray through them hits first.
    scene: Vec<(Rect, Entity)>,
    departments: Vec<Entity>,
    raycasts: Vec<Vec2>,
    tapped: Vec<Entity>,
    fov: Option<f32>,
}

impl UiOcclusion for FakeHost {
    fn is_over_ui(&mut self, pointer: PointerId, position: Vec2) -> bool {
        self.ui_queries.push((pointer, position));
        self.ui_region.is_some_and(|r| r.contains(position))
    }
}

impl RotationSink for FakeHost {
    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation = enabled;
        self.rotation_log.push(enabled);
    }
}

impl SceneRaycast for FakeHost {
    fn nearest_hit(&mut self, screen_pos: Vec2) -> Option<Entity> {
        self.raycasts.push(screen_pos);
        self.scene
            .iter()
            .find(|(rect, _)| rect.contains(screen_pos))
            .map(|(_, entity)| *entity)
    }

    fn is_department(&self, entity: Entity) -> bool {
        self.departments.contains(&entity)
    }
}

impl SelectionSink for FakeHost {
    fn department_tapped(&mut self, department: Entity) {
        self.tapped.push(department);
    }
}

impl LensSink for FakeHost {
    fn field_of_view(&self) -> Option<f32> {
        self.fov
    }
    fn set_field_of_view(&mut self, fov: f32) {
        self.fov = Some(fov);
    }
}

const DEPT: Entity = Entity::from_raw(7);
const WALL: Entity = Entity::from_raw(8);

/// A department covering most of the screen, a non-department wall on the
/// right edge, and a UI panel along the bottom.
fn host() -> FakeHost {
    FakeHost {
        ui_region: Some(Rect::new(0.0, 600.0, 1280.0, 720.0)),
        scene: vec![
            (Rect::new(1000.0, 0.0, 1280.0, 600.0), WALL),
            (Rect::new(0.0, 0.0, 1000.0, 600.0), DEPT),
        ],
        departments: vec![DEPT],
        fov: Some(30.0),
        ..Default::default()
    }
}

fn classifier() -> GestureClassifier {
    GestureClassifier::new(GestureConfig::default())
}

fn mouse_down(x: f32, y: f32, time: f32) -> GestureFrame {
    GestureFrame {
        time,
        mouse: Some(MouseInput {
            position: Some(Vec2::new(x, y)),
            just_pressed: true,
            pressed: true,
            just_released: false,
        }),
        ..Default::default()
    }
}

fn mouse_held(x: f32, y: f32, time: f32) -> GestureFrame {
    GestureFrame {
        time,
        mouse: Some(MouseInput {
            position: Some(Vec2::new(x, y)),
            just_pressed: false,
            pressed: true,
            just_released: false,
        }),
        ..Default::default()
    }
}

fn mouse_up(x: f32, y: f32, time: f32) -> GestureFrame {
    GestureFrame {
        time,
        mouse: Some(MouseInput {
            position: Some(Vec2::new(x, y)),
            just_pressed: false,
            pressed: false,
            just_released: true,
        }),
        ..Default::default()
    }
}

fn touch_frame(time: f32, contacts: &[(u64, f32, f32, TouchPhase)]) -> GestureFrame {
    GestureFrame {
        time,
        mouse: None,
        touches: contacts
            .iter()
            .map(|&(id, x, y, phase)| TouchContact {
                id,
                position: Vec2::new(x, y),
                phase,
            })
            .collect(),
        scroll: 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tap vs drag
// ---------------------------------------------------------------------------

#[test]
fn test_short_small_press_is_tap() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    assert!(host.tapped.is_empty(), "selection fires only at release");
    gestures.tick(&mouse_up(103.0, 100.0, 0.1), &mut host);

    assert_eq!(host.tapped, vec![DEPT]);
    assert_eq!(host.raycasts, vec![Vec2::new(103.0, 100.0)]);
    assert!(!gestures.is_pressing());
}

#[test]
fn test_drag_enables_rotation_and_suppresses_tap() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    assert!(!host.rotation);
    gestures.tick(&mouse_held(150.0, 100.0, 0.05), &mut host);
    assert!(host.rotation, "50px > 10px should enable rotation");
    assert!(gestures.rotation_enabled());

    gestures.tick(&mouse_up(150.0, 100.0, 0.1), &mut host);
    assert!(host.tapped.is_empty());
    assert!(host.raycasts.is_empty());
    assert!(!host.rotation, "release disables rotation");
    assert!(!gestures.is_pressing());
}

#[test]
fn test_rotation_stays_enabled_after_returning_to_origin() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    gestures.tick(&mouse_held(130.0, 100.0, 0.02), &mut host);
    gestures.tick(&mouse_held(101.0, 100.0, 0.04), &mut host);
    assert!(host.rotation);
    assert!(gestures.rotation_enabled());

    gestures.tick(&mouse_up(100.0, 100.0, 0.06), &mut host);
    assert!(host.tapped.is_empty(), "a drag back to the origin is not a tap");
}

#[test]
fn test_rotation_enabled_once_per_press() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    for i in 1..10 {
        gestures.tick(&mouse_held(100.0 + 20.0 * i as f32, 100.0, 0.01 * i as f32), &mut host);
    }
    let enables = host.rotation_log.iter().filter(|&&e| e).count();
    assert_eq!(enables, 1);
}

#[test]
fn test_fresh_press_disables_rotation() {
    let mut gestures = classifier();
    let mut host = host();
    host.rotation = true;

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    assert_eq!(host.rotation_log, vec![false]);
    assert!(!host.rotation);
}

#[test]
fn test_long_hold_selects_nothing() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    gestures.tick(&mouse_held(100.0, 100.0, 0.2), &mut host);
    gestures.tick(&mouse_up(100.0, 100.0, 0.5), &mut host);

    assert!(host.tapped.is_empty());
    assert!(!host.rotation_log.contains(&true), "holding still never rotates");
}

#[test]
fn test_far_release_without_move_does_not_rotate() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    gestures.tick(&mouse_up(140.0, 100.0, 0.1), &mut host);

    assert!(host.tapped.is_empty());
    assert!(!host.rotation_log.contains(&true));
}

#[test]
fn test_thresholds_are_inclusive() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    gestures.tick(&mouse_held(110.0, 100.0, 0.1), &mut host);
    assert!(!host.rotation, "exactly max movement is still a tap candidate");
    gestures.tick(&mouse_up(110.0, 100.0, 0.25), &mut host);

    assert_eq!(host.tapped, vec![DEPT]);
}

#[test]
fn test_same_frame_press_and_release_is_tap() {
    let mut gestures = classifier();
    let mut host = host();

    let frame = GestureFrame {
        time: 1.0,
        mouse: Some(MouseInput {
            position: Some(Vec2::new(200.0, 200.0)),
            just_pressed: true,
            pressed: false,
            just_released: true,
        }),
        ..Default::default()
    };
    gestures.tick(&frame, &mut host);
    assert_eq!(host.tapped, vec![DEPT]);
}

#[test]
fn test_release_outside_window_cancels_press() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    let frame = GestureFrame {
        time: 0.1,
        mouse: Some(MouseInput {
            position: None,
            just_pressed: false,
            pressed: false,
            just_released: true,
        }),
        ..Default::default()
    };
    gestures.tick(&frame, &mut host);

    assert!(!gestures.is_pressing());
    assert!(host.tapped.is_empty());
    assert!(!host.rotation);
}

// ---------------------------------------------------------------------------
// Hit test
// ---------------------------------------------------------------------------

#[test]
fn test_tap_on_non_department_selects_nothing() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(1100.0, 100.0, 0.0), &mut host);
    gestures.tick(&mouse_up(1100.0, 100.0, 0.1), &mut host);

    assert_eq!(host.raycasts.len(), 1, "the tap still hit-tests");
    assert!(host.tapped.is_empty());
}

#[test]
fn test_tap_on_empty_space_selects_nothing() {
    let mut gestures = classifier();
    let mut host = host();
    host.scene.clear();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    gestures.tick(&mouse_up(100.0, 100.0, 0.1), &mut host);

    assert_eq!(host.raycasts.len(), 1);
    assert!(host.tapped.is_empty());
}

#[test]
fn test_select_at_uses_nearest_hit_only() {
    let mut host = host();
    // The wall covers this point first in scene order; it must win even
    // though a department is also registered there.
    host.scene.insert(0, (Rect::new(0.0, 0.0, 50.0, 50.0), WALL));
    assert_eq!(select_at(Vec2::new(10.0, 10.0), &mut host), None);
    assert!(host.tapped.is_empty());
}

// ---------------------------------------------------------------------------
// UI occlusion
// ---------------------------------------------------------------------------

#[test]
fn test_press_over_ui_is_inert() {
    let cases = [
        // (release x, release y, release time, intermediate move)
        (100.0, 650.0, 0.1, None),
        (400.0, 650.0, 0.1, Some(Vec2::new(400.0, 650.0))),
        (100.0, 100.0, 0.1, Some(Vec2::new(100.0, 100.0))),
        (100.0, 650.0, 2.0, None),
    ];
    for (x, y, t, mid) in cases {
        let mut gestures = classifier();
        let mut host = host();
        gestures.tick(&mouse_down(100.0, 650.0, 0.0), &mut host);
        assert!(gestures.press().is_some_and(|p| p.over_ui));
        if let Some(mid) = mid {
            gestures.tick(&mouse_held(mid.x, mid.y, t / 2.0), &mut host);
        }
        gestures.tick(&mouse_up(x, y, t), &mut host);

        assert!(!host.rotation_log.contains(&true), "over-UI press rotated");
        assert!(host.tapped.is_empty(), "over-UI press selected");
        assert!(host.raycasts.is_empty(), "over-UI press hit-tested");
    }
}

#[test]
fn test_ui_query_carries_pointer_identity() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(5, 20.0, 30.0, TouchPhase::Began)]), &mut host);
    assert_eq!(host.ui_queries, vec![(PointerId::Touch(5), Vec2::new(20.0, 30.0))]);
}

// ---------------------------------------------------------------------------
// Touch and the single press slot
// ---------------------------------------------------------------------------

#[test]
fn test_touch_tap() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(1, 300.0, 300.0, TouchPhase::Began)]), &mut host);
    gestures.tick(&touch_frame(0.05, &[(1, 302.0, 301.0, TouchPhase::Stationary)]), &mut host);
    gestures.tick(&touch_frame(0.1, &[(1, 302.0, 301.0, TouchPhase::Ended)]), &mut host);

    assert_eq!(host.tapped, vec![DEPT]);
}

#[test]
fn test_touch_down_and_up_in_one_frame_is_tap() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(
        &touch_frame(0.0, &[(1, 300.0, 300.0, TouchPhase::BeganAndEnded)]),
        &mut host,
    );

    assert_eq!(host.tapped, vec![DEPT]);
    assert!(!gestures.is_pressing());
    assert!(!host.rotation);
}

#[test]
fn test_same_frame_touch_over_ui_is_inert() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(
        &touch_frame(0.0, &[(1, 300.0, 650.0, TouchPhase::BeganAndEnded)]),
        &mut host,
    );

    assert!(host.tapped.is_empty());
    assert!(host.raycasts.is_empty());
    assert!(!gestures.is_pressing());
}

#[test]
fn test_touch_drag() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(1, 300.0, 300.0, TouchPhase::Began)]), &mut host);
    gestures.tick(&touch_frame(0.05, &[(1, 360.0, 300.0, TouchPhase::Moved)]), &mut host);
    assert!(host.rotation);
    gestures.tick(&touch_frame(0.1, &[(1, 360.0, 300.0, TouchPhase::Ended)]), &mut host);

    assert!(host.tapped.is_empty());
    assert!(!host.rotation);
}

#[test]
fn test_canceled_touch_releases_press() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(1, 300.0, 300.0, TouchPhase::Began)]), &mut host);
    gestures.tick(&touch_frame(0.5, &[(1, 300.0, 300.0, TouchPhase::Canceled)]), &mut host);

    assert!(!gestures.is_pressing());
    assert!(host.tapped.is_empty());
}

#[test]
fn test_touch_ignored_while_mouse_press_live() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&mouse_down(100.0, 100.0, 0.0), &mut host);
    let mut frame = touch_frame(0.02, &[(3, 900.0, 500.0, TouchPhase::Began)]);
    frame.mouse = Some(MouseInput {
        position: Some(Vec2::new(100.0, 100.0)),
        pressed: true,
        ..Default::default()
    });
    gestures.tick(&frame, &mut host);
    assert_eq!(gestures.press().map(|p| p.pointer), Some(PointerId::Mouse));

    let mut frame = touch_frame(0.04, &[(3, 500.0, 500.0, TouchPhase::Moved)]);
    frame.mouse = Some(MouseInput {
        position: Some(Vec2::new(100.0, 100.0)),
        pressed: true,
        ..Default::default()
    });
    gestures.tick(&frame, &mut host);
    assert!(!host.rotation, "another pointer's movement must not drag the mouse press");

    let mut frame = touch_frame(0.06, &[(3, 500.0, 500.0, TouchPhase::Ended)]);
    frame.mouse = Some(MouseInput {
        position: Some(Vec2::new(100.0, 100.0)),
        pressed: true,
        ..Default::default()
    });
    gestures.tick(&frame, &mut host);
    assert!(gestures.is_pressing(), "another pointer's release must not end the mouse press");

    gestures.tick(&mouse_up(101.0, 100.0, 0.1), &mut host);
    assert_eq!(host.tapped, vec![DEPT]);
}

#[test]
fn test_mouse_ignored_while_touch_press_live() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(1, 300.0, 300.0, TouchPhase::Began)]), &mut host);
    let mut frame = mouse_down(700.0, 100.0, 0.01);
    frame.touches = touch_frame(0.01, &[(1, 300.0, 300.0, TouchPhase::Stationary)]).touches;
    gestures.tick(&frame, &mut host);

    let press = gestures.press().copied().expect("touch press should still be live");
    assert_eq!(press.pointer, PointerId::Touch(1));
    assert_eq!(press.origin, Vec2::new(300.0, 300.0));
    assert!(!gestures.begin_press(PointerSample::mouse(Vec2::ZERO, 0.02), &mut host));
}

#[test]
fn test_second_finger_does_not_drive_tap_or_drag() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(1, 300.0, 300.0, TouchPhase::Began)]), &mut host);
    gestures.tick(
        &touch_frame(
            0.02,
            &[
                (1, 300.0, 300.0, TouchPhase::Stationary),
                (2, 600.0, 300.0, TouchPhase::Began),
            ],
        ),
        &mut host,
    );
    gestures.tick(
        &touch_frame(
            0.04,
            &[
                (1, 300.0, 300.0, TouchPhase::Stationary),
                (2, 800.0, 300.0, TouchPhase::Moved),
            ],
        ),
        &mut host,
    );
    assert!(!host.rotation, "only the primary finger can start a drag");
    assert_eq!(gestures.press().map(|p| p.pointer), Some(PointerId::Touch(1)));
}

#[test]
fn test_primary_finger_tracked_after_reordering() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(4, 300.0, 300.0, TouchPhase::Began)]), &mut host);
    // A lower id appears first in the list; the press still follows finger 4.
    gestures.tick(
        &touch_frame(
            0.05,
            &[
                (2, 10.0, 10.0, TouchPhase::Began),
                (4, 300.0, 300.0, TouchPhase::Ended),
            ],
        ),
        &mut host,
    );
    assert!(!gestures.is_pressing());
    assert_eq!(host.tapped, vec![DEPT]);
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_scroll_zoom_through_tick() {
    let mut gestures = classifier();
    let mut host = host();

    let frame = GestureFrame {
        time: 0.0,
        mouse: Some(MouseInput::default()),
        scroll: -2.0,
        ..Default::default()
    };
    gestures.tick(&frame, &mut host);
    assert_eq!(host.fov, Some(50.0));
}

#[test]
fn test_scroll_runs_during_press() {
    let mut gestures = classifier();
    let mut host = host();

    let mut frame = mouse_down(100.0, 100.0, 0.0);
    frame.scroll = 1.0;
    gestures.tick(&frame, &mut host);
    assert_eq!(host.fov, Some(20.0));
    assert!(gestures.is_pressing());
}

#[test]
fn test_pinch_through_tick() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(
        &touch_frame(
            0.0,
            &[
                (1, 100.0, 300.0, TouchPhase::Began),
                (2, 300.0, 300.0, TouchPhase::Began),
            ],
        ),
        &mut host,
    );
    assert_eq!(host.fov, Some(30.0), "baseline tick applies no zoom");

    gestures.tick(
        &touch_frame(
            0.02,
            &[
                (1, 100.0, 300.0, TouchPhase::Moved),
                (2, 350.0, 300.0, TouchPhase::Moved),
            ],
        ),
        &mut host,
    );
    // Spread 50px at 0.1 speed -> zoom in 5 degrees.
    assert_eq!(host.fov, Some(25.0));
}

#[test]
fn test_pinch_baseline_when_second_finger_begins_late() {
    let mut gestures = classifier();
    let mut host = host();

    gestures.tick(&touch_frame(0.0, &[(1, 100.0, 300.0, TouchPhase::Began)]), &mut host);
    gestures.tick(
        &touch_frame(
            0.1,
            &[
                (1, 100.0, 300.0, TouchPhase::Stationary),
                (2, 1000.0, 300.0, TouchPhase::Began),
            ],
        ),
        &mut host,
    );
    assert_eq!(host.fov, Some(30.0));
}

#[test]
fn test_scroll_ignored_without_mouse() {
    let mut gestures = classifier();
    let mut host = host();

    let frame = GestureFrame {
        time: 0.0,
        mouse: None,
        scroll: 3.0,
        ..Default::default()
    };
    gestures.tick(&frame, &mut host);
    assert_eq!(host.fov, Some(30.0));
}

#[test]
fn test_classify_release_priority() {
    let tap = GestureConfig::default().tap;
    let press = PressState {
        origin: Vec2::ZERO,
        origin_time: 0.0,
        pointer: PointerId::Mouse,
        over_ui: false,
        rotation_enabled: false,
    };
    let far_late = PointerSample::mouse(Vec2::new(50.0, 0.0), 1.0);
    assert_eq!(classify_release(&press, far_late, &tap), PressOutcome::TooLong);
    let far_quick = PointerSample::mouse(Vec2::new(50.0, 0.0), 0.1);
    assert_eq!(classify_release(&press, far_quick, &tap), PressOutcome::TooFar);

    let dragged = PressState {
        rotation_enabled: true,
        ..press
    };
    let near = PointerSample::mouse(Vec2::ZERO, 0.1);
    assert_eq!(classify_release(&dragged, near, &tap), PressOutcome::Drag);

    let over_ui = PressState {
        over_ui: true,
        ..dragged
    };
    assert_eq!(classify_release(&over_ui, near, &tap), PressOutcome::OverUi);
    assert_eq!(classify_release(&press, near, &tap), PressOutcome::Tap);
}
