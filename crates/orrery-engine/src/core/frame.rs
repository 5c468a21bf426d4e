//! One logical frame of the update loop, and frame submission.
//!
//! Step order matters: later steps read positions written by earlier ones.
//!  1. camera damping
//!  2. loading screen (returns early while Loading)
//!  3. anchored orbit paths follow their planet
//!  4. orbit positions from the clock, then self-rotation
//!  5. camera pose (follow / flight)
//!  6. comets, meteor, trails, followed lights
//!  7. shared uniforms
//!  8. labels follow their body and face the camera
//!  9. submit (once per host callback, see [`submit`])

use glam::Vec2;

use crate::api::game::{EngineContext, Game};
use crate::api::types::{
    GameEvent, EVENT_LOADING_HIDDEN, EVENT_LOADING_PROGRESS, EVENT_RUNNING, EVENT_TRANSITION_DONE,
};
use crate::core::clock::LoadTransition;
use crate::error::EngineError;
use crate::input::gesture::Gesture;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::FrameBuffer;
use crate::renderer::traits::{FrameData, LoadingFrame, RenderSubstrate};
use crate::systems::{comet, kinematics, labels};

/// Feed pointer and wheel events to the camera and the picker.
pub fn apply_input(ctx: &mut EngineContext, input: &InputQueue) -> Result<(), EngineError> {
    for event in input.iter() {
        match *event {
            InputEvent::PointerDown { x, y, button, time_ms } => {
                ctx.gesture.down(Vec2::new(x, y), button, time_ms);
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(Gesture::Drag { delta, button }) = ctx.gesture.moved(Vec2::new(x, y)) {
                    if !ctx.camera.is_user_driving() {
                        ctx.camera.begin_drag();
                    }
                    let height = ctx.viewport().y;
                    if button == 2 {
                        ctx.camera.pan(delta, height);
                    } else {
                        ctx.camera.rotate(delta, height);
                    }
                }
            }
            InputEvent::PointerUp { x, y, time_ms } => {
                if let Some(Gesture::Release { tap }) = ctx.gesture.up(Vec2::new(x, y), time_ms) {
                    if ctx.camera.is_user_driving() {
                        ctx.camera.end_drag(&ctx.scene)?;
                    }
                    if let Some(pos) = tap {
                        ctx.select_at(pos);
                    }
                }
            }
            InputEvent::PointerCancel => {
                ctx.gesture.cancel();
                if ctx.camera.is_user_driving() {
                    ctx.camera.end_drag(&ctx.scene)?;
                }
            }
            InputEvent::Wheel { delta } => ctx.camera.zoom(delta),
            InputEvent::Select { x, y } => {
                ctx.select_at(Vec2::new(x, y));
            }
            InputEvent::Custom { .. } => {}
        }
    }
    Ok(())
}

/// Run one logical frame: input, game update, then steps 1-8.
pub fn advance<G: Game>(ctx: &mut EngineContext, game: &mut G, input: &InputQueue) -> Result<(), EngineError> {
    apply_input(ctx, input)?;
    game.update(ctx, input)?;

    let dt_ms = ctx.config().fixed_dt as f64 * 1000.0;

    // 1.
    ctx.camera.damp();

    // 2.
    if ctx.clock.is_loading() {
        step_loading(ctx, dt_ms);
        return Ok(());
    }

    let t = ctx.clock.advance(dt_ms);

    // 3.
    labels::follow_anchors(&mut ctx.scene, false)?;

    // 4.
    kinematics::advance_bodies(&mut ctx.scene, t)?;

    // 5.
    if ctx.camera.update(&ctx.scene, dt_ms as f32)? {
        let followed = ctx.camera.followed().map_or(0.0, |id| id.0 as f32);
        ctx.emit_event(GameEvent::new(EVENT_TRANSITION_DONE, followed, 0.0, 0.0));
    }

    // 6.
    comet::advance_comets(&mut ctx.scene, &mut ctx.comets)?;
    if let Some(meteor) = ctx.meteor.as_mut() {
        meteor.advance(&mut ctx.scene)?;
    }
    ctx.lights.follow(&ctx.scene)?;

    // 7.
    ctx.uniforms.update(t, ctx.camera.camera.position);

    // 8.
    labels::follow_anchors(&mut ctx.scene, true)?;
    labels::face_camera(&mut ctx.scene, ctx.camera.camera.orientation());

    Ok(())
}

fn step_loading(ctx: &mut EngineContext, dt_ms: f64) {
    let before = ctx.loading.lit();
    ctx.loading.set_progress(ctx.textures.fraction());
    ctx.loading.tick();
    if ctx.loading.lit() != before {
        let (done, total) = ctx.textures.progress();
        ctx.emit_event(GameEvent::new(EVENT_LOADING_PROGRESS, done as f32, total as f32, 0.0));
    }

    match ctx.clock.poll_loading(dt_ms, ctx.textures.all_resolved()) {
        Some(LoadTransition::Hidden) => {
            ctx.loading.hide();
            ctx.emit_event(GameEvent::new(EVENT_LOADING_HIDDEN, 0.0, 0.0, 0.0));
        }
        Some(LoadTransition::Running { forced }) => {
            ctx.loading.hide();
            if forced {
                let (done, total) = ctx.textures.progress();
                log::warn!("loading timed out with {}/{} textures resolved; starting anyway", done, total);
            } else {
                log::info!("scene running");
            }
            let flag = if forced { 1.0 } else { 0.0 };
            ctx.emit_event(GameEvent::new(EVENT_RUNNING, flag, 0.0, 0.0));
        }
        None => {}
    }
}

/// Step 9: pack the scene and hand the frame to the substrate.
pub fn submit(
    ctx: &mut EngineContext,
    buffer: &mut FrameBuffer,
    substrate: &mut dyn RenderSubstrate,
) -> Result<(), EngineError> {
    buffer.pack(&ctx.scene, &ctx.uniforms)?;
    let ambient = ctx.lights.ambient();
    let lights = ctx.lights.records().to_vec();
    let loading = ctx.loading.is_visible().then(|| LoadingFrame {
        ring: ctx.loading.as_floats(),
        spin: ctx.loading.spin,
        pulse: ctx.loading.pulse(),
        time: ctx.loading.time,
    });
    let frame = FrameData {
        frame: ctx.clock.frame(),
        scene: &ctx.scene,
        camera: &ctx.camera.camera,
        instances: &buffer.instances,
        vertices: &buffer.vertices,
        lights: &lights,
        ambient,
        uniforms: bytemuck::cast_slice(ctx.uniforms.as_floats()),
        loading,
    };
    substrate.submit_frame(&frame)
}
