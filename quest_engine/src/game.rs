use std::collections::BTreeMap;

use serde::Serialize;

use crate::dialogue::{DialogueLine, DialogueSequencer};
use crate::flags::{FlagStore, FlagValue};
use crate::overlay::{AllyOverlay, OverlayPhase, FADE_OUT_MS, HIGHLIGHT_MS, OVERLAY_GATE_FLAG, STATUS_FEED};
use crate::scene::SceneDef;
use crate::scheduler::{ContextId, EventScheduler};

/// Deferred mutation owned by a presentation context.
pub type ScheduledAction = Box<dyn FnOnce(&mut Game)>;

/// The game context: flag store, scheduler, dialogue sequencer, overlay,
/// scene registry, and the scene state machine, all driven by a virtual
/// millisecond clock.
///
/// Every observable mutation is appended to an ordered event log of dotted
/// labels (`scene.enter`, `hotspot.dispatch`, `overlay.update`, ...). The
/// log is the engine's contract with the rendering collaborator and the
/// primary assertion surface for tests.
pub struct Game {
    now: u64,
    verbose: bool,
    flags: FlagStore,
    scheduler: EventScheduler<ScheduledAction>,
    dialogue: DialogueSequencer,
    overlay: AllyOverlay,
    scenes: BTreeMap<String, SceneDef>,
    scene_states: BTreeMap<String, FlagStore>,
    current_scene: Option<String>,
    events: Vec<String>,
}

/// Serializable view of the runtime for reports.
#[derive(Debug, Serialize)]
pub struct GameSnapshot {
    pub now_ms: u64,
    pub current_scene: Option<String>,
    pub flags: FlagStore,
    pub scene_states: BTreeMap<String, FlagStore>,
    pub overlay: AllyOverlay,
    pub pending_events: usize,
    pub event_count: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            now: 0,
            verbose: false,
            flags: FlagStore::new(),
            scheduler: EventScheduler::new(),
            dialogue: DialogueSequencer::new(),
            overlay: AllyOverlay::new(),
            scenes: BTreeMap::new(),
            scene_states: BTreeMap::new(),
            current_scene: None,
            events: Vec::new(),
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.pending_len()
    }

    fn record(&mut self, message: String) {
        if self.verbose {
            eprintln!("[quest_engine] {message}");
        }
        self.events.push(message);
    }

    // ── Flags ──

    pub fn set_flag(&mut self, key: &str, value: impl Into<FlagValue>) {
        let value = value.into();
        self.record(format!("flag.set {key} {value}"));
        self.flags.set(key, value);
    }

    pub fn flag(&self, key: &str) -> FlagValue {
        self.flags.get(key)
    }

    pub fn flag_is_set(&self, key: &str) -> bool {
        self.flags.is_set(key)
    }

    /// Scene-local state, keyed by scene id. Part of the scene's identity:
    /// it is not reset between re-entries.
    pub fn scene_flag(&self, scene_id: &str, key: &str) -> FlagValue {
        self.scene_states
            .get(scene_id)
            .map(|state| state.get(key))
            .unwrap_or(FlagValue::Bool(false))
    }

    pub fn set_scene_flag(&mut self, scene_id: &str, key: &str, value: impl Into<FlagValue>) {
        let value = value.into();
        self.record(format!("scene.state {scene_id}.{key} {value}"));
        self.scene_states
            .entry(scene_id.to_string())
            .or_default()
            .set(key, value);
    }

    // ── Scene state machine ──

    pub fn register_scene(&mut self, scene: SceneDef) {
        self.record(format!("scene.register {}", scene.id));
        self.scenes.insert(scene.id.clone(), scene);
    }

    pub fn current_scene(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    pub fn scene(&self, id: &str) -> Option<&SceneDef> {
        self.scenes.get(id)
    }

    /// Idle-thought pool of the active scene. Selection policy is the
    /// presentation layer's concern.
    pub fn idle_thoughts(&self) -> &[String] {
        self.current_scene
            .as_deref()
            .and_then(|id| self.scenes.get(id))
            .map(|scene| scene.idle_thoughts.as_slice())
            .unwrap_or(&[])
    }

    /// Atomic scene transition: exit hook, silence every event still owned
    /// by the outgoing scene, then enter the new one. An unknown target is
    /// a warned no-op; the current scene stays active.
    pub fn load_scene(&mut self, id: &str) {
        if !self.scenes.contains_key(id) {
            eprintln!("[quest_engine] warning: unknown scene {id}");
            self.record(format!("scene.missing {id}"));
            return;
        }
        if let Some(previous) = self.current_scene.clone() {
            if let Some(hook) = self.scenes.get(&previous).and_then(|scene| scene.on_exit) {
                hook(self);
            }
            self.scheduler.cancel_all(&ContextId::scene(&previous));
            self.record(format!("scene.exit {previous}"));
        }
        self.current_scene = Some(id.to_string());
        self.scene_states.entry(id.to_string()).or_default();
        self.record(format!("scene.enter {id}"));
        if let Some(hook) = self.scenes.get(id).and_then(|scene| scene.on_enter) {
            hook(self);
        }
    }

    /// Pointer dispatch by coordinates. Resolves the topmost containing
    /// hotspot of the active scene, then defers to `click_hotspot`.
    pub fn click_at(&mut self, x: f32, y: f32) {
        let Some(current) = self.current_scene.clone() else {
            return;
        };
        let target = self
            .scenes
            .get(&current)
            .and_then(|scene| scene.hotspot_at(x, y))
            .map(|hotspot| hotspot.id.clone());
        match target {
            Some(id) => self.click_hotspot(&id),
            None => self.record(format!("pointer.miss {x:.1},{y:.1}")),
        }
    }

    /// Dispatch on a resolved hotspot id. Disabled targets, unknown ids,
    /// and clicks during dialogue all degrade to recorded no-ops.
    pub fn click_hotspot(&mut self, hotspot_id: &str) {
        if self.dialogue.is_active() {
            self.record(format!("hotspot.suppressed {hotspot_id} (dialogue active)"));
            return;
        }
        let Some(current) = self.current_scene.clone() else {
            self.record(format!("hotspot.suppressed {hotspot_id} (no scene)"));
            return;
        };
        let Some((enablement, action)) = self
            .scenes
            .get(&current)
            .and_then(|scene| scene.hotspot_by_id(hotspot_id))
            .map(|hotspot| (hotspot.enablement, hotspot.action))
        else {
            self.record(format!("hotspot.unknown {hotspot_id}"));
            return;
        };
        if !enablement.evaluate(self) {
            self.record(format!("hotspot.blocked {hotspot_id}"));
            return;
        }
        self.record(format!("hotspot.dispatch {hotspot_id}"));
        action(self);
    }

    // ── Dialogue ──

    pub fn show_dialogue(&mut self, lines: &[&str], speaker: &str) {
        let exchange = lines
            .iter()
            .map(|text| DialogueLine::new(speaker, text))
            .collect();
        self.start_dialogue(exchange);
    }

    pub fn start_dialogue(&mut self, exchange: Vec<DialogueLine>) {
        for message in self.dialogue.begin(exchange) {
            self.record(message);
        }
    }

    /// External advance signal from the rendering layer.
    pub fn advance_dialogue(&mut self) {
        for message in self.dialogue.advance() {
            self.record(message);
        }
    }

    pub fn dialogue_active(&self) -> bool {
        self.dialogue.is_active()
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        self.dialogue.current_line()
    }

    pub fn show_notification(&mut self, text: &str) {
        self.record(format!("notify {text}"));
    }

    // ── Scheduling ──

    /// Arms a delayed action owned by the active scene; leaving the scene
    /// cancels it. Dropped with a warning when no scene is active.
    pub fn scene_timeout<F>(&mut self, delay_ms: u64, action: F)
    where
        F: FnOnce(&mut Game) + 'static,
    {
        let Some(current) = self.current_scene.clone() else {
            eprintln!("[quest_engine] warning: scene timeout dropped (no active scene)");
            return;
        };
        self.scheduler
            .schedule(ContextId::Scene(current), self.now, delay_ms, Box::new(action));
    }

    /// Advances the virtual clock, firing due events in deadline order.
    /// Same-instant events fire in registration order; events scheduled
    /// while a batch runs wait for the next pull, so a zero-delay event is
    /// never synchronous with its scheduling call.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now.saturating_add(ms);
        while let Some((fire_at, batch)) = self.scheduler.take_due_batch(target) {
            self.now = fire_at;
            for event in batch {
                if self.scheduler.is_live(&event) {
                    let action = event.into_action();
                    action(self);
                }
            }
        }
        self.now = target;
    }

    // ── Ally overlay ──

    pub fn overlay(&self) -> &AllyOverlay {
        &self.overlay
    }

    /// Shows the team-status overlay and arms its scripted status feed.
    /// Refused (as a recorded no-op) when the prerequisite flag is unset or
    /// a previous presentation is still visible or fading.
    pub fn show_overlay(&mut self) {
        match self.overlay.phase() {
            OverlayPhase::Visible | OverlayPhase::FadingOut => {
                self.record("overlay.refused (already shown)".to_string());
                return;
            }
            OverlayPhase::Hidden => {}
        }
        if !self.flag_is_set(OVERLAY_GATE_FLAG) {
            self.record(format!("overlay.refused ({OVERLAY_GATE_FLAG} unset)"));
            return;
        }
        for message in self.overlay.activate() {
            self.record(message);
        }
        for entry in &STATUS_FEED {
            let (ally, status, color) = (entry.ally, entry.status, entry.color);
            self.scheduler.schedule(
                ContextId::Overlay,
                self.now,
                entry.delay_ms,
                Box::new(move |game: &mut Game| game.update_ally(ally, status, color)),
            );
        }
    }

    /// Cancels the pending status feed and begins the fade-out. Final
    /// teardown rides a grace timer under a context that is never
    /// cancelled: hide is terminal until a fresh `show_overlay`.
    pub fn hide_overlay(&mut self) {
        if self.overlay.phase() != OverlayPhase::Visible {
            self.record("overlay.hide ignored".to_string());
            return;
        }
        self.scheduler.cancel_all(&ContextId::Overlay);
        let message = self.overlay.begin_fade();
        self.record(message);
        self.scheduler.schedule(
            ContextId::OverlayFade,
            self.now,
            FADE_OUT_MS,
            Box::new(|game: &mut Game| {
                let message = game.overlay.finish_teardown();
                game.record(message);
            }),
        );
    }

    /// Overwrites one roster entry's status and color. Unknown entities and
    /// a hidden overlay are silent no-ops. The transient highlight clears
    /// itself on a short overlay-owned timer (cosmetic, lost on teardown).
    pub fn update_ally(&mut self, ally: &str, status: &str, color: &str) {
        let Some(message) = self.overlay.apply_update(ally, status, color) else {
            self.record(format!("overlay.update.ignored {ally}"));
            return;
        };
        self.record(message);
        let ally_id = ally.to_string();
        self.scheduler.schedule(
            ContextId::Overlay,
            self.now,
            HIGHLIGHT_MS,
            Box::new(move |game: &mut Game| {
                if let Some(message) = game.overlay.clear_highlight(&ally_id) {
                    game.record(message);
                }
            }),
        );
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            now_ms: self.now,
            current_scene: self.current_scene.clone(),
            flags: self.flags.clone(),
            scene_states: self.scene_states.clone(),
            overlay: self.overlay.clone(),
            pending_events: self.scheduler.pending_len(),
            event_count: self.events.len(),
        }
    }
}
