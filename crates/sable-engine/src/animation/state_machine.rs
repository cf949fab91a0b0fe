use std::collections::HashMap;

use super::AnimationController;

/// When an automatic transition is allowed to fire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TransitionCondition {
    /// Fires as soon as it is evaluated.
    #[default]
    Immediate,
    /// Fires once the current animation has finished.
    OnFinish,
    /// Fires if the target's priority admits it.
    CanInterrupt,
}

/// A named state. Higher priority is harder to interrupt.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AnimationState {
    pub name: String,
    pub priority: i32,
}

/// Extra gate evaluated before the transition's condition.
pub type TransitionPredicate = Box<dyn Fn() -> bool>;

pub struct AnimationTransition {
    pub from: String,
    pub to: String,
    pub condition: TransitionCondition,
    pub predicate: Option<TransitionPredicate>,
}

impl std::fmt::Debug for AnimationTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationTransition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("condition", &self.condition)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Priority-gated state machine driving an [`AnimationController`].
///
/// Each state name doubles as the animation it plays. Requests that a state's
/// priority rejects are parked in a single pending slot (newest wins) and run once
/// the current animation finishes.
#[derive(Debug)]
pub struct AnimationStateMachine {
    controller: AnimationController,
    states: HashMap<String, AnimationState>,
    /// Evaluated in insertion order; the first match per update wins.
    transitions: Vec<AnimationTransition>,
    current: Option<String>,
    pending: Option<String>,
}

impl AnimationStateMachine {
    pub fn new(controller: AnimationController) -> Self {
        Self {
            controller,
            states: HashMap::new(),
            transitions: Vec::new(),
            current: None,
            pending: None,
        }
    }

    // ── setup ─────────────────────────────────────────────────────────────

    /// Registers or overwrites a state.
    pub fn add_state(&mut self, name: impl Into<String>, priority: i32) {
        let name = name.into();
        self.states.insert(name.clone(), AnimationState { name, priority });
    }

    pub fn add_transition(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: TransitionCondition,
    ) {
        self.push_transition(from.into(), to.into(), condition, None);
    }

    /// Like [`add_transition`](Self::add_transition), skipped whenever `predicate`
    /// returns false.
    pub fn add_transition_when(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: TransitionCondition,
        predicate: impl Fn() -> bool + 'static,
    ) {
        self.push_transition(from.into(), to.into(), condition, Some(Box::new(predicate)));
    }

    fn push_transition(
        &mut self,
        from: String,
        to: String,
        condition: TransitionCondition,
        predicate: Option<TransitionPredicate>,
    ) {
        self.transitions.push(AnimationTransition { from, to, condition, predicate });
    }

    // ── control ───────────────────────────────────────────────────────────

    /// Requests a switch to `name`.
    ///
    /// Unknown states and requests for the current state are ignored unless
    /// `force` is set. Forced requests bypass priority and drop any pending one.
    /// Requests the current priority rejects become the pending transition.
    pub fn transition_to(&mut self, name: &str, force: bool) {
        if !self.states.contains_key(name) {
            log::debug!("transition_to: unknown state '{name}'");
            return;
        }

        if !force && self.current.as_deref() == Some(name) {
            return;
        }

        if force {
            self.execute(name.to_owned());
            self.pending = None;
            return;
        }

        if self.can_transition(name) {
            self.execute(name.to_owned());
        } else {
            log::debug!(
                "transition to '{name}' deferred (current priority {})",
                self.current_priority()
            );
            self.pending = Some(name.to_owned());
        }
    }

    /// Advances the controller, then fires at most one automatic transition, then
    /// resolves the pending request if the current animation has finished.
    pub fn update(&mut self, dt: f32) {
        self.controller.update(dt);

        if let Some(to) = self.next_automatic() {
            self.execute(to);
            return;
        }

        if self.controller.is_finished() {
            if let Some(to) = self.pending.take() {
                self.execute(to);
            }
        }
    }

    fn next_automatic(&self) -> Option<String> {
        let current = self.current.as_deref()?;

        self.transitions
            .iter()
            .filter(|t| t.from == current)
            .filter(|t| t.predicate.as_ref().is_none_or(|p| p()))
            .find(|t| match t.condition {
                TransitionCondition::Immediate => true,
                TransitionCondition::OnFinish => self.controller.is_finished(),
                TransitionCondition::CanInterrupt => self.can_transition(&t.to),
            })
            .map(|t| t.to.clone())
    }

    fn execute(&mut self, to: String) {
        log::debug!("animation state: {:?} -> '{to}'", self.current);
        self.controller.play(&to, true);
        self.current = Some(to);
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// False for unknown states; otherwise whether `name` has at least the current
    /// state's priority.
    pub fn can_transition(&self, name: &str) -> bool {
        self.states
            .get(name)
            .is_some_and(|s| s.priority >= self.current_priority())
    }

    /// Priority of the current state, or 0 before the first transition.
    pub fn current_priority(&self) -> i32 {
        self.current
            .as_deref()
            .and_then(|n| self.states.get(n))
            .map_or(0, |s| s.priority)
    }

    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn pending_state(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn has_pending_transition(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self, name: &str) -> Option<&AnimationState> {
        self.states.get(name)
    }

    /// Sorted for stable output.
    pub fn state_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.states.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn transitions(&self) -> &[AnimationTransition] {
        &self.transitions
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{AnimationData, SpriteAtlas, SpriteFrame};
    use crate::render::TextureId;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    /// idle/walk loop; attack/hurt are one-shots of 3 and 2 frames at 0.1s.
    fn machine() -> AnimationStateMachine {
        let mut atlas = SpriteAtlas::new(TextureId(1));
        for i in 0..3 {
            atlas.add_frame(SpriteFrame::new(format!("f{i}"), i * 8, 0, 8, 8));
        }
        for (name, frames, looping) in [
            ("idle", &["f0", "f1"][..], true),
            ("walk", &["f0", "f1", "f2"][..], true),
            ("attack", &["f0", "f1", "f2"][..], false),
            ("hurt", &["f1", "f2"][..], false),
        ] {
            atlas
                .add_animation(AnimationData::new(name, frames.iter().copied(), 0.1, looping))
                .unwrap();
        }

        let mut sm = AnimationStateMachine::new(AnimationController::new(Arc::new(atlas)));
        sm.add_state("idle", 0);
        sm.add_state("walk", 0);
        sm.add_state("attack", 3);
        sm.add_state("hurt", 5);
        sm
    }

    // ── transition_to ─────────────────────────────────────────────────────

    #[test]
    fn first_transition_plays_state_animation() {
        let mut sm = machine();
        assert_eq!(sm.current_state(), None);

        sm.transition_to("idle", false);
        assert_eq!(sm.current_state(), Some("idle"));
        assert_eq!(sm.controller().current_animation_name(), Some("idle"));
        assert!(sm.controller().is_playing());
    }

    #[test]
    fn unknown_state_is_ignored() {
        let mut sm = machine();
        sm.transition_to("idle", false);
        sm.transition_to("fly", true);
        assert_eq!(sm.current_state(), Some("idle"));
        assert!(!sm.has_pending_transition());
    }

    #[test]
    fn same_state_twice_does_not_restart() {
        let changes = Rc::new(Cell::new(0));
        let mut sm = machine();
        sm.transition_to("walk", false);
        sm.update(0.15);
        assert_eq!(sm.controller().current_frame_index(), 1);

        let counter = changes.clone();
        sm.controller_mut().set_on_frame_change(move |_| counter.set(counter.get() + 1));
        sm.transition_to("walk", false);

        assert_eq!(sm.controller().current_frame_index(), 1);
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn forced_same_state_restarts() {
        let mut sm = machine();
        sm.transition_to("walk", false);
        sm.update(0.15);
        sm.transition_to("walk", true);
        assert_eq!(sm.controller().current_frame_index(), 0);
    }

    #[test]
    fn equal_priority_may_interrupt() {
        let mut sm = machine();
        sm.transition_to("idle", false);
        sm.transition_to("walk", false);
        assert_eq!(sm.current_state(), Some("walk"));
        assert!(!sm.has_pending_transition());
    }

    // ── priority gating ───────────────────────────────────────────────────

    #[test]
    fn lower_priority_request_waits_for_finish() {
        let mut sm = machine();
        sm.transition_to("attack", false);
        sm.transition_to("idle", false);

        assert_eq!(sm.current_state(), Some("attack"));
        assert!(sm.has_pending_transition());
        assert_eq!(sm.pending_state(), Some("idle"));

        sm.update(0.2);
        assert_eq!(sm.current_state(), Some("attack"));

        sm.update(0.1);
        assert_eq!(sm.current_state(), Some("idle"));
        assert!(!sm.has_pending_transition());
        assert!(sm.controller().is_playing());
    }

    #[test]
    fn newest_denied_request_wins() {
        let mut sm = machine();
        sm.transition_to("attack", false);
        sm.transition_to("idle", false);
        sm.transition_to("walk", false);
        assert_eq!(sm.pending_state(), Some("walk"));
    }

    #[test]
    fn force_clears_pending() {
        let mut sm = machine();
        sm.transition_to("attack", false);
        sm.transition_to("idle", false);
        sm.transition_to("walk", true);

        assert_eq!(sm.current_state(), Some("walk"));
        assert!(!sm.has_pending_transition());
    }

    #[test]
    fn can_transition_rules() {
        let mut sm = machine();
        assert!(sm.can_transition("idle"));
        assert!(!sm.can_transition("fly"));

        sm.transition_to("attack", false);
        assert_eq!(sm.current_priority(), 3);
        assert!(sm.can_transition("hurt"));
        assert!(!sm.can_transition("walk"));
    }

    // ── automatic transitions ─────────────────────────────────────────────

    #[test]
    fn on_finish_fires_after_one_shot() {
        let mut sm = machine();
        sm.add_transition("attack", "idle", TransitionCondition::OnFinish);
        sm.transition_to("attack", false);

        sm.update(0.1);
        assert_eq!(sm.current_state(), Some("attack"));
        sm.update(0.2);
        assert_eq!(sm.current_state(), Some("idle"));
    }

    #[test]
    fn immediate_fires_once_per_update() {
        let mut sm = machine();
        sm.add_transition("idle", "walk", TransitionCondition::Immediate);
        sm.add_transition("walk", "idle", TransitionCondition::Immediate);
        sm.transition_to("idle", false);

        sm.update(0.0);
        assert_eq!(sm.current_state(), Some("walk"));
        sm.update(0.0);
        assert_eq!(sm.current_state(), Some("idle"));
    }

    #[test]
    fn first_matching_transition_wins() {
        let mut sm = machine();
        sm.add_transition("idle", "walk", TransitionCondition::OnFinish);
        sm.add_transition("idle", "attack", TransitionCondition::Immediate);
        sm.add_transition("idle", "hurt", TransitionCondition::Immediate);
        sm.transition_to("idle", false);

        sm.update(0.0);
        assert_eq!(sm.current_state(), Some("attack"));
    }

    #[test]
    fn can_interrupt_respects_priority() {
        let mut sm = machine();
        sm.add_transition("attack", "walk", TransitionCondition::CanInterrupt);
        sm.add_transition("attack", "hurt", TransitionCondition::CanInterrupt);
        sm.transition_to("attack", false);

        sm.update(0.0);
        assert_eq!(sm.current_state(), Some("hurt"));
    }

    #[test]
    fn predicate_gates_transition() {
        let moving = Rc::new(Cell::new(false));
        let mut sm = machine();
        {
            let moving = moving.clone();
            sm.add_transition_when("idle", "walk", TransitionCondition::Immediate, move || moving.get());
        }
        sm.transition_to("idle", false);

        sm.update(0.0);
        assert_eq!(sm.current_state(), Some("idle"));

        moving.set(true);
        sm.update(0.0);
        assert_eq!(sm.current_state(), Some("walk"));
    }

    #[test]
    fn automatic_transition_preempts_pending() {
        let mut sm = machine();
        sm.add_transition("attack", "walk", TransitionCondition::OnFinish);
        sm.transition_to("attack", false);
        sm.transition_to("idle", false);

        sm.update(0.3);
        assert_eq!(sm.current_state(), Some("walk"));
        assert_eq!(sm.pending_state(), Some("idle"));
    }

    #[test]
    fn state_names_are_sorted() {
        let sm = machine();
        assert_eq!(sm.state_names(), vec!["attack", "hurt", "idle", "walk"]);
        assert_eq!(sm.state("hurt").map(|s| s.priority), Some(5));
    }
}
