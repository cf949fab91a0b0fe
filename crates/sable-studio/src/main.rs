//! Headless runner: drives the engine with scripted input at a fixed step and
//! reports what the render queue produced.

mod config;
mod demo;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sable_engine::atlas::SpriteAtlas;
use sable_engine::camera::Camera;
use sable_engine::coords::Vec2;
use sable_engine::input::InputManager;
use sable_engine::logging::{LoggingConfig, init_logging};
use sable_engine::render::{InstanceBatch, RenderQueue};
use sable_engine::scene::{SceneManager, TransitionConfig};
use sable_engine::time::FrameClock;

use config::StudioConfig;
use demo::{HERO_TEXTURE, Playfield, STATES};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env()?;
    let atlas = Arc::new(load_atlas(&config)?);
    log::info!(
        "atlas ready: {} frames, {} animations",
        atlas.frame_count(),
        atlas.animation_count()
    );

    let camera = Rc::new(RefCell::new(Camera::new(Vec2::zero(), Vec2::new(640.0, 360.0))));
    let mut input = InputManager::new();
    demo::bind_actions(&mut input);
    input.set_action_pressed_callback("attack", || log::debug!("attack pressed"));

    let mut scenes = SceneManager::new();
    scenes.change_scene_with(Playfield::new(atlas, camera.clone()), TransitionConfig::fade(0.2));

    let mut queue = RenderQueue::new();
    queue.enable_culling(true);
    let mut batch = InstanceBatch::new();
    let mut clock = FrameClock::new();
    let mut culled = 0usize;

    let step = Duration::from_secs_f32(config.step);
    clock.reset();

    for now in fixed_steps(Instant::now(), step).take(frame_limit(config.frames)) {
        let ft = clock.tick_at(now);

        input.begin_frame();
        for ev in demo::scripted_events(ft.frame_index) {
            input.apply_event(&ev);
            scenes.handle_event(&ev);
        }
        input.update(ft.dt);
        scenes.handle_input(&input, ft.dt);

        scenes.update(ft.dt);
        camera.borrow_mut().update(ft.dt);

        queue.clear();
        let view = camera.borrow_mut().view();
        queue.set_camera(&view);
        scenes.render(&mut queue);
        queue.sort();
        queue.render(&mut batch, view.relative_view_projection());
        culled += queue.culled_count();
        queue.reset_stats();

        if ft.frame_index % 60 == 0 {
            log::debug!(
                "frame {}: {} instances in {} runs, camera at {:?}",
                ft.frame_index,
                batch.instances().len(),
                batch.runs().len(),
                view.center
            );
        }
    }

    log::info!(
        "ran {} frames ({:.2}s simulated): {} instances / {} runs last frame, {culled} culled total, {} scene(s) on stack",
        clock.frame_count(),
        clock.total_time(),
        batch.instances().len(),
        batch.runs().len(),
        scenes.scene_count()
    );

    Ok(())
}

fn load_atlas(config: &StudioConfig) -> Result<SpriteAtlas> {
    let Some(path) = &config.atlas_path else {
        return demo::demo_atlas();
    };

    let atlas = SpriteAtlas::load_metadata(path, HERO_TEXTURE)
        .with_context(|| format!("loading atlas {}", path.display()))?;
    for (name, _) in STATES {
        if !atlas.has_animation(name) {
            log::warn!("atlas {} has no '{name}' animation", path.display());
        }
    }
    Ok(atlas)
}

/// Tick instants `start + step`, `start + 2·step`, ... built by accumulation, so the
/// frame count never has to fit a `Duration` multiplier.
fn fixed_steps(start: Instant, step: Duration) -> impl Iterator<Item = Instant> {
    std::iter::successors(Some(start + step), move |&t| Some(t + step))
}

fn frame_limit(frames: u64) -> usize {
    usize::try_from(frames).unwrap_or(usize::MAX)
}
