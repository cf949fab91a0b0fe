//! Built-in demo content: a hero that walks, attacks and can be paused.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use sable_engine::animation::{AnimationController, AnimationStateMachine, TransitionCondition};
use sable_engine::atlas::{AnimationData, SpriteAtlas, SpriteFrame};
use sable_engine::camera::{Camera, FollowMode};
use sable_engine::coords::{Color, Rect, Transform, Vec2};
use sable_engine::input::{InputEvent, InputManager, Key};
use sable_engine::render::{RenderQueue, SpriteDrawData, TextureId};
use sable_engine::scene::{Scene, SceneCtx, TransitionConfig};

pub const HERO_TEXTURE: TextureId = TextureId(1);
pub const STATES: [(&str, i32); 3] = [("idle", 0), ("walk", 0), ("attack", 3)];

const WALK_SPEED: f32 = 120.0;
const WORLD: Rect = Rect::new(-1200.0, -400.0, 2400.0, 800.0);

/// Eight 16x32 hero frames on one 128x32 strip.
pub fn demo_atlas() -> anyhow::Result<SpriteAtlas> {
    let mut atlas = SpriteAtlas::new(HERO_TEXTURE).with_texture_size(128, 32);
    for i in 0..8 {
        atlas.add_frame(SpriteFrame::new(format!("hero_{i}"), i * 16, 0, 16, 32));
    }

    atlas.add_animation(AnimationData::new("idle", ["hero_0", "hero_1"], 0.2, true))?;
    atlas.add_animation(AnimationData::new("walk", ["hero_2", "hero_3", "hero_4", "hero_5"], 0.1, true))?;
    atlas.add_animation(
        AnimationData::new("attack", ["hero_6", "hero_7"], 0.08, false).with_frame_durations(vec![0.05, 0.15]),
    )?;

    Ok(atlas)
}

/// Events injected at fixed frames in place of a window.
pub fn scripted_events(frame: u64) -> Vec<InputEvent> {
    match frame {
        10 => vec![InputEvent::key_pressed(Key::ArrowRight)],
        90 => vec![InputEvent::key_released(Key::ArrowRight)],
        100 => vec![InputEvent::key_pressed(Key::J)],
        101 => vec![InputEvent::key_released(Key::J)],
        103 => vec![InputEvent::key_pressed(Key::ArrowLeft)],
        140 => vec![InputEvent::key_released(Key::ArrowLeft)],
        160 | 230 => vec![InputEvent::key_pressed(Key::Escape)],
        161 | 231 => vec![InputEvent::key_released(Key::Escape)],
        _ => Vec::new(),
    }
}

pub fn bind_actions(input: &mut InputManager) {
    input.map_key("left", Key::ArrowLeft);
    input.map_key("right", Key::ArrowRight);
    input.map_key("attack", Key::J);
    input.map_key("pause", Key::Escape);
}

// ── playfield ─────────────────────────────────────────────────────────────

pub struct Playfield {
    hero: AnimationStateMachine,
    hero_pos: Vec2,
    facing: f32,
    moving: Rc<Cell<bool>>,
    camera: Rc<RefCell<Camera>>,
    attacks: u32,
}

impl Playfield {
    pub fn new(atlas: Arc<SpriteAtlas>, camera: Rc<RefCell<Camera>>) -> Self {
        let mut hero = AnimationStateMachine::new(AnimationController::new(atlas));
        for (name, priority) in STATES {
            hero.add_state(name, priority);
        }

        let moving = Rc::new(Cell::new(false));
        {
            let m = moving.clone();
            hero.add_transition_when("idle", "walk", TransitionCondition::Immediate, move || m.get());
            let m = moving.clone();
            hero.add_transition_when("walk", "idle", TransitionCondition::Immediate, move || !m.get());
        }
        hero.add_transition("attack", "idle", TransitionCondition::OnFinish);

        Self {
            hero,
            hero_pos: Vec2::zero(),
            facing: 1.0,
            moving,
            camera,
            attacks: 0,
        }
    }
}

impl Scene for Playfield {
    fn on_enter(&mut self) {
        self.hero.transition_to("idle", true);

        let mut camera = self.camera.borrow_mut();
        camera.set_follow_mode(FollowMode::Deadzone);
        camera.set_deadzone(Rect::from_center(Vec2::zero(), Vec2::new(160.0, 120.0)));
        camera.set_bounds(WORLD);
    }

    fn on_exit(&mut self) {
        log::info!("playfield closed after {} attacks", self.attacks);
    }

    fn handle_input(&mut self, input: &InputManager, dt: f32, ctx: &mut SceneCtx) {
        let dir = match (input.is_action_active("left"), input.is_action_active("right")) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        self.moving.set(dir != 0.0);
        if dir != 0.0 {
            self.facing = dir;
            self.hero_pos.x += dir * WALK_SPEED * dt;
        }

        if input.is_action_pressed("attack") {
            self.attacks += 1;
            self.hero.transition_to("attack", false);
            self.camera.borrow_mut().add_trauma(0.4);
        }

        if input.is_action_pressed("pause") {
            ctx.push_scene_with(PauseOverlay::default(), TransitionConfig::fade(0.25));
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut SceneCtx) {
        self.hero.update(dt);
        self.camera.borrow_mut().set_target(self.hero_pos);
    }

    fn render(&mut self, queue: &mut RenderQueue) {
        // Ground tiles, far back.
        for i in -20..20 {
            let tile = SpriteDrawData::solid(Vec2::new(60.0, 20.0), Color::rgb(40, 90, 40));
            queue.submit(100.0, tile, Transform::from_position(Vec2::new(i as f32 * 60.0, 16.0)));
        }

        if let Some(sprite) = self.hero.controller().current_draw_data() {
            let transform = Transform::from_position(self.hero_pos).with_scale(Vec2::new(self.facing * 2.0, 2.0));
            queue.submit(10.0, sprite, transform);
        }
    }
}

// ── pause overlay ─────────────────────────────────────────────────────────

/// Dims the playfield and waits for the pause action to resume.
#[derive(Default)]
pub struct PauseOverlay {
    frames: u32,
}

impl Scene for PauseOverlay {
    fn on_enter(&mut self) {
        log::info!("paused");
    }

    fn on_exit(&mut self) {
        log::info!("resumed after {} frames", self.frames);
    }

    fn handle_input(&mut self, input: &InputManager, _dt: f32, ctx: &mut SceneCtx) {
        if input.is_action_pressed("pause") {
            ctx.pop_scene_with(TransitionConfig::fade(0.25));
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneCtx) {
        self.frames += 1;
    }

    fn render(&mut self, queue: &mut RenderQueue) {
        queue.push_overlay(Color::BLACK.with_alpha(96));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_atlas_has_every_state_animation() {
        let atlas = demo_atlas().unwrap();
        for (name, _) in STATES {
            assert!(atlas.has_animation(name), "{name}");
        }
    }

    #[test]
    fn walking_switches_hero_state() {
        let atlas = Arc::new(demo_atlas().unwrap());
        let camera = Rc::new(RefCell::new(Camera::default()));
        let mut field = Playfield::new(atlas, camera.clone());
        field.on_enter();

        let mut input = InputManager::new();
        bind_actions(&mut input);
        input.apply_event(&InputEvent::key_pressed(Key::ArrowRight));

        let mut ctx = SceneCtx::default();
        field.handle_input(&input, 0.5, &mut ctx);
        field.update(0.5, &mut ctx);

        assert_eq!(field.hero.current_state(), Some("walk"));
        assert_eq!(camera.borrow().target(), Some(Vec2::new(60.0, 0.0)));
        assert!(!ctx.has_requests());
    }
}
