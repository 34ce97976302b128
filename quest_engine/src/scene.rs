use serde::Serialize;

use crate::game::Game;

/// Hotspot action callback. Plain function pointers keep scene content
/// `'static` and let the dispatcher copy the callback out of the borrowed
/// scene before invoking it with the mutable game context.
pub type HotspotAction = fn(&mut Game);

/// Enablement predicate: pure read of game state.
pub type EnablementFn = fn(&Game) -> bool;

/// Scene lifecycle hook.
pub type SceneHook = fn(&mut Game);

/// Pointer affordance tag for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    Pointer,
    Look,
    Exit,
}

/// Whether a hotspot accepts dispatch. Absence of a predicate in content
/// means always enabled.
#[derive(Clone, Copy)]
pub enum Enablement {
    Always,
    When(EnablementFn),
}

impl Enablement {
    pub fn evaluate(&self, game: &Game) -> bool {
        match self {
            Enablement::Always => true,
            Enablement::When(predicate) => predicate(game),
        }
    }
}

/// Rectangular activation region in scene-relative percent coordinates.
/// Geometry semantics belong to the rendering collaborator; the engine only
/// needs containment for hit resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Interactive region within a scene.
pub struct Hotspot {
    pub id: String,
    pub name: String,
    pub region: Region,
    pub cursor: Cursor,
    pub enablement: Enablement,
    pub action: HotspotAction,
}

impl Hotspot {
    pub fn new(id: &str, name: &str, region: Region, cursor: Cursor, action: HotspotAction) -> Self {
        Hotspot {
            id: id.to_string(),
            name: name.to_string(),
            region,
            cursor,
            enablement: Enablement::Always,
            action,
        }
    }

    pub fn enabled_when(mut self, predicate: EnablementFn) -> Self {
        self.enablement = Enablement::When(predicate);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerStart {
    pub x: f32,
    pub y: f32,
}

/// Static scene content: identity, presentation metadata, hotspots, and
/// lifecycle hooks. Scene-local mutable state lives with the runtime (keyed
/// by scene id) so it survives re-entries.
pub struct SceneDef {
    pub id: String,
    pub name: String,
    pub background: String,
    pub description: String,
    pub player_start: PlayerStart,
    pub idle_thoughts: Vec<String>,
    pub hotspots: Vec<Hotspot>,
    pub on_enter: Option<SceneHook>,
    pub on_exit: Option<SceneHook>,
}

impl SceneDef {
    pub fn new(id: &str, name: &str) -> Self {
        SceneDef {
            id: id.to_string(),
            name: name.to_string(),
            background: String::new(),
            description: String::new(),
            player_start: PlayerStart { x: 50.0, y: 85.0 },
            idle_thoughts: Vec::new(),
            hotspots: Vec::new(),
            on_enter: None,
            on_exit: None,
        }
    }

    pub fn background(mut self, path: &str) -> Self {
        self.background = path.to_string();
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn player_start(mut self, x: f32, y: f32) -> Self {
        self.player_start = PlayerStart { x, y };
        self
    }

    pub fn idle_thoughts(mut self, thoughts: &[&str]) -> Self {
        self.idle_thoughts = thoughts.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspots.push(hotspot);
        self
    }

    pub fn on_enter(mut self, hook: SceneHook) -> Self {
        self.on_enter = Some(hook);
        self
    }

    pub fn on_exit(mut self, hook: SceneHook) -> Self {
        self.on_exit = Some(hook);
        self
    }

    pub fn hotspot_by_id(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|hotspot| hotspot.id == id)
    }

    /// Topmost hotspot containing the point. Declaration order is paint
    /// order, so the last match wins.
    pub fn hotspot_at(&self, x: f32, y: f32) -> Option<&Hotspot> {
        self.hotspots
            .iter()
            .rev()
            .find(|hotspot| hotspot.region.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, Hotspot, Region, SceneDef};

    fn no_op(_game: &mut crate::game::Game) {}

    #[test]
    fn region_containment_includes_edges() {
        let region = Region {
            x: 10.0,
            y: 30.0,
            width: 25.0,
            height: 35.0,
        };
        assert!(region.contains(10.0, 30.0));
        assert!(region.contains(35.0, 65.0));
        assert!(region.contains(20.0, 50.0));
        assert!(!region.contains(9.9, 50.0));
        assert!(!region.contains(20.0, 65.1));
    }

    #[test]
    fn later_hotspots_sit_on_top() {
        let scene = SceneDef::new("lofar", "LOFAR Superterp")
            .hotspot(Hotspot::new(
                "field_panorama",
                "Panoramic View",
                Region {
                    x: 0.0,
                    y: 0.0,
                    width: 100.0,
                    height: 100.0,
                },
                Cursor::Look,
                no_op,
            ))
            .hotspot(Hotspot::new(
                "processing_cabinet",
                "Processing Cabinet",
                Region {
                    x: 70.0,
                    y: 40.0,
                    width: 15.0,
                    height: 25.0,
                },
                Cursor::Pointer,
                no_op,
            ));

        assert_eq!(
            scene.hotspot_at(75.0, 50.0).map(|h| h.id.as_str()),
            Some("processing_cabinet")
        );
        assert_eq!(
            scene.hotspot_at(5.0, 5.0).map(|h| h.id.as_str()),
            Some("field_panorama")
        );
        assert!(scene.hotspot_at(75.0, 50.0).is_some());
    }

    #[test]
    fn builder_defaults_are_sensible() {
        let scene = SceneDef::new("astron", "ASTRON");
        assert_eq!(scene.player_start.x, 50.0);
        assert!(scene.idle_thoughts.is_empty());
        assert!(scene.on_enter.is_none());
        assert!(scene.hotspot_at(50.0, 50.0).is_none());
    }
}
