use anyhow::Result;
use clap::Parser;
use glam::{Vec2, Vec3};
use log::info;

use focus_changer::cli::Cli;
use focus_changer::config::SettingsStore;
use focus_changer::core::timer::{Accumulator, FixedHz};
use focus_changer::events::{EventBus, LifecycleEvent};
use focus_changer::headless::{LogNotifier, OrbitRig, PartShape, SimWorld};
use focus_changer::input::WinitController;
use focus_changer::traits::{CameraRig, ObjectModel};
use focus_changer::types::{CameraMode, ObjectHandle};
use focus_changer::{FocusChanger, FocusContext};
use winit::keyboard::KeyCode;

// === Constants ===

const FRAME_DELTA: f32 = 1.0 / 60.0;
const MAX_STEPS_PER_FRAME: u8 = 5;
const STATION_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 40.0);

/// Scripted user and host actions, keyed by frame number
#[derive(Debug, Clone, Copy)]
enum Cue {
    /// Press the action key with the pointer over a part
    PickPart(ObjectHandle),
    /// Press the action key with the pointer over empty space
    PickNothing,
    /// Press the action key with the modifier held
    CycleMode,
    /// Another subsystem requests focus through the service
    ServiceFocus(ObjectHandle),
    Publish(LifecycleEvent),
}

struct Demo {
    world: SimWorld,
    rig: OrbitRig,
    notifier: LogNotifier,
    controller: WinitController,
    bus: EventBus,
    script: Vec<(u32, Cue)>,
}

impl Demo {
    fn new() -> Self {
        let mut world = SimWorld::new();
        let ship = world.add_vessel(Vec3::ZERO);
        let pod = world.add_part(
            ship,
            "Command pod",
            Vec3::new(0.0, 3.0, 0.0),
            PartShape::Sphere { radius: 1.0 },
        );
        world.add_part(
            ship,
            "Fuel tank",
            Vec3::ZERO,
            PartShape::Box {
                half_extents: Vec3::new(1.0, 2.0, 1.0),
            },
        );
        let engine = world.add_part(
            ship,
            "Engine",
            Vec3::new(0.0, -3.0, 0.0),
            PartShape::Box {
                half_extents: Vec3::splat(0.8),
            },
        );

        let station = world.add_vessel(STATION_OFFSET);
        let dock = world.add_part(
            station,
            "Docking port",
            Vec3::ZERO,
            PartShape::Box {
                half_extents: Vec3::splat(2.0),
            },
        );

        let mut rig = OrbitRig::new(Vec3::ZERO, 25.0);
        rig.yaw = 0.6;

        let script = vec![
            (30, Cue::PickPart(engine)),
            (40, Cue::PickPart(pod)),
            (160, Cue::PickPart(pod)),
            (200, Cue::PickPart(dock)),
            (320, Cue::Publish(LifecycleEvent::Undock)),
            (420, Cue::PickNothing),
            (560, Cue::ServiceFocus(pod)),
            (600, Cue::Publish(LifecycleEvent::CameraModeChanged(CameraMode::FirstPerson))),
            (640, Cue::CycleMode),
        ];

        Self {
            world,
            rig,
            notifier: LogNotifier::new(),
            controller: WinitController::new(),
            bus: EventBus::new(),
            script,
        }
    }

    /// Apply the cues of `frame`
    fn apply_cues(&mut self, frame: u32, changer: &FocusChanger) {
        let cues: Vec<Cue> = self
            .script
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, cue)| *cue)
            .collect();

        for cue in cues {
            info!("frame {frame}: {cue:?}");
            match cue {
                Cue::PickPart(part) => {
                    if let Some(pixel) = self.part_on_screen(part) {
                        self.controller.move_pointer(pixel);
                    }
                    self.tap(KeyCode::KeyO);
                }
                Cue::PickNothing => {
                    self.controller.move_pointer(Vec2::new(5.0, 5.0));
                    self.tap(KeyCode::KeyO);
                }
                Cue::CycleMode => {
                    self.controller.press(KeyCode::AltLeft);
                    self.tap(KeyCode::KeyO);
                    self.controller.release(KeyCode::AltLeft);
                }
                Cue::ServiceFocus(part) => {
                    changer.service().focus_on(part);
                }
                Cue::Publish(event) => {
                    self.bus.publish(event);
                }
            }
        }
    }

    fn part_on_screen(&self, part: ObjectHandle) -> Option<Vec2> {
        self.rig.world_to_screen(self.world.object_position(part)?)
    }

    fn tap(&mut self, key: KeyCode) {
        self.controller.press(key);
        self.controller.release(key);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut demo = Demo::new();
    let mut changer = FocusChanger::start(SettingsStore::new(&cli.config), &mut demo.bus)?;
    if let Some(mode) = cli.mode {
        changer.set_mode(mode);
    }

    let mut steps = Accumulator::new(cli.hz, MAX_STEPS_PER_FRAME);
    let mut status = FixedHz::new(1.0);

    for frame in 0..cli.frames {
        demo.apply_cues(frame, &changer);

        let mut stepped = false;
        for dt in steps.tick(FRAME_DELTA) {
            let mut ctx = FocusContext::new(&demo.world, &mut demo.rig, &mut demo.notifier);
            changer.update(&mut demo.bus, &demo.controller, &demo.world, &mut ctx, dt);
            if !stepped {
                // Key presses belong to the first step of the frame
                demo.controller.end_frame();
                stepped = true;
            }
        }

        if status.tick(FRAME_DELTA) {
            info!(
                "t={:.1}s state={:?} target={:?} anchor={}",
                frame as f32 * FRAME_DELTA,
                changer.machine().state(),
                changer.machine().target(),
                demo.rig.anchor_position()
            );
        }
    }

    changer.stop(&mut demo.bus);
    println!(
        "Simulated {} frames in {} mode: {} messages posted, {} anchor writes",
        cli.frames,
        changer.settings().mode,
        demo.notifier.messages().len(),
        demo.rig.anchor_writes
    );

    Ok(())
}
