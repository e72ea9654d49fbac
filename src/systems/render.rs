//! Rendering system using Raylib.
//!
//! [`render_system`] draws the scene from [`Camera3DRes`], then the HUD.
//! While [`DebugMode`] is present it adds a floor grid, the controller
//! probes and a text readout of controller and timing state.
use bevy_ecs::prelude::*;
use raylib::prelude::*;
use raylib::ffi;

use crate::components::block::BlockShape;
use crate::components::capsule::CapsuleShape;
use crate::components::charactercontroller::CharacterController;
use crate::components::progressbar::ProgressBar;
use crate::components::transform3d::Transform3D;
use crate::math::{self, to_raylib};
use crate::resources::camera3d::Camera3DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Draw a box with its transform pushed on the rlgl matrix stack so tilted
/// blocks render rotated.
fn draw_block<D: RaylibDraw3D>(d3: &mut D, block: &BlockShape, transform: &Transform3D) {
    let size = block.size();
    let t = transform.translation;
    unsafe {
        ffi::rlPushMatrix();
        ffi::rlTranslatef(t.x, t.y, t.z);
        if let Some((axis, angle)) = transform.rotation.axis_angle() {
            ffi::rlRotatef(angle.to_degrees(), axis.x, axis.y, axis.z);
        }
    }
    d3.draw_cube(Vector3::zero(), size.x, size.y, size.z, block.color);
    d3.draw_cube_wires(
        Vector3::zero(),
        size.x,
        size.y,
        size.z,
        Color::new(0, 0, 0, 60),
    );
    unsafe {
        ffi::rlPopMatrix();
    }
}

/// Probe spheres, wall contacts, facing and move direction of every controller.
fn draw_controller_gizmos<D: RaylibDraw3D>(d3: &mut D, world: &mut World) {
    let mut q = world.query::<(&CharacterController, &CapsuleShape, &Transform3D)>();
    for (controller, capsule, transform) in q.iter(world) {
        let center = transform.translation;
        let probe = controller.ground_probe(capsule, &center);
        let ground_color = if controller.grounded {
            Color::LIME
        } else {
            Color::ORANGE
        };
        d3.draw_sphere_wires(to_raylib(&probe.origin), probe.radius, 6, 8, ground_color);
        let probe_end = probe.origin - math::up() * probe.max_distance;
        let faded = Color::new(ground_color.r, ground_color.g, ground_color.b, 100);
        d3.draw_sphere_wires(to_raylib(&probe_end), probe.radius, 6, 8, faded);

        d3.draw_line_3D(
            to_raylib(&capsule.foot(&center)),
            to_raylib(&(capsule.foot(&center) + controller.ground_normal)),
            Color::BLUE,
        );

        let wall_radius = controller.wall_probe_radius(capsule);
        let wall_color = if controller.walls.is_empty() {
            Color::new(255, 255, 255, 40)
        } else {
            Color::RED
        };
        d3.draw_sphere_wires(to_raylib(&center), wall_radius, 6, 10, wall_color);
        for wall in &controller.walls.all {
            d3.draw_line_3D(
                to_raylib(&center),
                to_raylib(&(center - wall.normal * wall_radius)),
                Color::RED,
            );
        }

        d3.draw_line_3D(
            to_raylib(&center),
            to_raylib(&(center + controller.move_direction)),
            Color::YELLOW,
        );
        d3.draw_line_3D(
            to_raylib(&center),
            to_raylib(&(center + transform.forward() * 0.5)),
            Color::MAGENTA,
        );
        d3.draw_line_3D(
            to_raylib(&center),
            to_raylib(&(center + transform.right() * 0.5)),
            Color::PURPLE,
        );
    }
}

fn draw_hud(world: &mut World, d: &mut RaylibDrawHandle) {
    let (w, h) = (d.get_screen_width(), d.get_screen_height());

    // crosshair
    let (cx, cy) = (w / 2, h / 2);
    d.draw_line(cx - 6, cy, cx + 6, cy, Color::WHITE);
    d.draw_line(cx, cy - 6, cx, cy + 6, Color::WHITE);

    let mut bars = world.query::<&ProgressBar>();
    for bar in bars.iter(world) {
        d.draw_rectangle(bar.x, bar.y, bar.width, bar.height, bar.background_color);
        d.draw_rectangle(bar.x, bar.y, bar.filled_width(), bar.height, bar.fill_color);
        d.draw_rectangle_lines(bar.x, bar.y, bar.width, bar.height, Color::BLACK);
        if let Some(label) = &bar.label {
            d.draw_text(label, bar.x, bar.y - 14, 10, Color::WHITE);
        }
    }

    if !world.resource::<InputState>().cursor_captured {
        let text = "Paused - press ESC to capture the mouse";
        d.draw_text(text, w / 2 - 200, h / 3, 20, Color::WHITE);
    }
}

fn draw_debug_text(world: &mut World, d: &mut RaylibDrawHandle) {
    let fps = d.get_fps();
    let time = *world.resource::<WorldTime>();
    d.draw_text(
        &format!(
            "DEBUG MODE (press F11 to toggle) | FPS: {} | fixed steps: {} | step alpha: {:.2}",
            fps,
            time.fixed_steps_this_frame,
            time.alpha()
        ),
        10,
        10,
        10,
        Color::BLACK,
    );

    let mut q = world.query::<(&CharacterController, &Transform3D)>();
    let mut y = 30;
    for (controller, transform) in q.iter(world) {
        let p = transform.translation;
        let lines = [
            format!("pos: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            format!(
                "grounded: {} (prev {}) normal: ({:.2}, {:.2}, {:.2})",
                controller.grounded,
                controller.grounded_previously,
                controller.ground_normal.x,
                controller.ground_normal.y,
                controller.ground_normal.z
            ),
            format!(
                "speed: {:.2} target: {:.2} accel: {:.1}",
                controller.current_speed, controller.target_speed, controller.acceleration
            ),
            format!(
                "walls: front={} back={} left={} right={} total={}",
                controller.walls.front.is_some(),
                controller.walls.back.is_some(),
                controller.walls.left.is_some(),
                controller.walls.right.is_some(),
                controller.walls.all.len()
            ),
            format!(
                "run: {} crouch: {} jump: {}",
                controller.run_held, controller.crouch_held, controller.jump_request
            ),
        ];
        for line in lines {
            d.draw_text(&line, 10, y, 10, Color::BLACK);
            y += 14;
        }
    }
}

/// Draw the scene from the shared 3D camera, then the HUD.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(th) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let camera = world.resource::<Camera3DRes>().0;
    let debug = world.contains_resource::<DebugMode>();

    {
        let mut d = rl.begin_drawing(&th);
        d.clear_background(Color::SKYBLUE);
        {
            let mut d3 = d.begin_mode3D(camera);
            let mut blocks = world.query::<(&BlockShape, &Transform3D)>();
            for (block, transform) in blocks.iter(world) {
                draw_block(&mut d3, block, transform);
            }
            if debug {
                d3.draw_grid(40, 1.0);
                draw_controller_gizmos(&mut d3, world);
            }
        }
        draw_hud(world, &mut d);
        if debug {
            draw_debug_text(world, &mut d);
        }
    }

    world.insert_non_send_resource(th);
    world.insert_non_send_resource(rl);
}
