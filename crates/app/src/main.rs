use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use departments::filters::{DepartmentFilter, FilterRequest};
use rendering::camera::{CameraTargetRequest, CameraTargets};

/// When set, the app walks every camera target, saves a screenshot of each
/// to `/tmp` and exits.
const SCREENSHOTS_ENV_VAR: &str = "DEPARTMENT_EXPLORER_SCREENSHOTS";

/// Frames to wait for the loading screen to clear before the first shot.
const SCREENSHOT_WARMUP_FRAMES: u32 = 300;
const FRAMES_PER_SHOT: u32 = 12;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Department Explorer".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    // Departments first: rendering reads its layout and gesture config at build.
    .add_plugins((
        departments::DepartmentsPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    if std::env::var(SCREENSHOTS_ENV_VAR).is_ok() {
        app.insert_resource(ScreenshotQueue::default());
        app.add_systems(Update, drive_screenshots);
    }

    app.run();
}

#[derive(Resource, Default)]
struct ScreenshotQueue {
    frame: u32,
    current: usize,
}

fn drive_screenshots(
    mut commands: Commands,
    mut queue: ResMut<ScreenshotQueue>,
    targets: Res<CameraTargets>,
    mut filters: EventWriter<FilterRequest>,
    mut camera: EventWriter<CameraTargetRequest>,
    mut exit: EventWriter<AppExit>,
) {
    queue.frame += 1;

    if queue.frame == 1 {
        filters.send(FilterRequest(DepartmentFilter::ShowAll));
    }
    if queue.frame < SCREENSHOT_WARMUP_FRAMES {
        return;
    }

    let idx = queue.current;
    let count = targets.0.len();
    if idx >= count {
        // Give the last capture time to hit the disk.
        if queue.frame > SCREENSHOT_WARMUP_FRAMES + count as u32 * FRAMES_PER_SHOT + 20 {
            exit.send(AppExit::Success);
        }
        return;
    }

    let phase = (queue.frame - SCREENSHOT_WARMUP_FRAMES) % FRAMES_PER_SHOT;
    if phase == 0 {
        camera.send(CameraTargetRequest(idx));
    } else if phase == 6 {
        let name = targets.0[idx].name.to_lowercase();
        let path = format!("/tmp/department_explorer_{idx:02}_{name}.png");
        info!("Saving screenshot {path}");
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        queue.current += 1;
    }
}
