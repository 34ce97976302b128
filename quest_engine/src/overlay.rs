use serde::Serialize;

/// Flag that must be set before the overlay will show.
pub const OVERLAY_GATE_FLAG: &str = "mission_prep_complete";

/// Grace period between `hide()` and final teardown while the fade plays.
pub const FADE_OUT_MS: u64 = 700;

/// How long an updated roster entry stays highlighted.
pub const HIGHLIGHT_MS: u64 = 800;

pub struct RosterSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub role: &'static str,
    pub status: &'static str,
    pub color: &'static str,
}

/// Fixed roster shown during the facility infiltration.
pub const ROSTER: [RosterSeed; 4] = [
    RosterSeed {
        id: "cees",
        name: "Cees",
        icon: "📡",
        role: "WSRT",
        status: "MONITORING",
        color: "#00ff41",
    },
    RosterSeed {
        id: "jaap",
        name: "Jaap",
        icon: "⏱️",
        role: "DEADMAN",
        status: "ARMED",
        color: "#ffcc00",
    },
    RosterSeed {
        id: "david",
        name: "David",
        icon: "💻",
        role: "STANDBY",
        status: "READY",
        color: "#00aaff",
    },
    RosterSeed {
        id: "eva",
        name: "Eva",
        icon: "🔑",
        role: "INSIDE",
        status: "POSITION",
        color: "#ff6699",
    },
];

pub struct StatusFeedEntry {
    pub delay_ms: u64,
    pub ally: &'static str,
    pub status: &'static str,
    pub color: &'static str,
}

/// Scripted status drip armed when the overlay shows. The cadence creates
/// the illusion of live coordination by the allies.
pub const STATUS_FEED: [StatusFeedEntry; 11] = [
    StatusFeedEntry { delay_ms: 8_000, ally: "cees", status: "RF SCAN", color: "#00ff41" },
    StatusFeedEntry { delay_ms: 15_000, ally: "jaap", status: "04:58", color: "#ffcc00" },
    StatusFeedEntry { delay_ms: 22_000, ally: "cees", status: "NO ANOMALY", color: "#00ff41" },
    StatusFeedEntry { delay_ms: 30_000, ally: "david", status: "LISTENING", color: "#00aaff" },
    StatusFeedEntry { delay_ms: 38_000, ally: "jaap", status: "04:42", color: "#ffcc00" },
    StatusFeedEntry { delay_ms: 45_000, ally: "cees", status: "CLEAR", color: "#00ff41" },
    StatusFeedEntry { delay_ms: 55_000, ally: "jaap", status: "04:28", color: "#ffcc00" },
    StatusFeedEntry { delay_ms: 65_000, ally: "eva", status: "GUIDING", color: "#ff6699" },
    StatusFeedEntry { delay_ms: 75_000, ally: "cees", status: "MONITORING", color: "#00ff41" },
    StatusFeedEntry { delay_ms: 85_000, ally: "jaap", status: "04:12", color: "#ffcc00" },
    StatusFeedEntry { delay_ms: 95_000, ally: "david", status: "READY", color: "#00aaff" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverlayPhase {
    Hidden,
    Visible,
    FadingOut,
}

/// One tracked ally in the status HUD.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub role: String,
    pub status: String,
    pub color: String,
    pub highlighted: bool,
}

/// Pure roster state for the team-status HUD. The runtime owns arming and
/// cancelling the scheduled status feed; this type only tracks the values a
/// renderer would draw, and reports changes as event-log messages.
#[derive(Debug, Clone, Serialize)]
pub struct AllyOverlay {
    phase: OverlayPhase,
    roster: Vec<RosterEntry>,
}

impl Default for AllyOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl AllyOverlay {
    pub fn new() -> Self {
        AllyOverlay {
            phase: OverlayPhase::Hidden,
            roster: Vec::new(),
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn entry(&self, id: &str) -> Option<&RosterEntry> {
        self.roster.iter().find(|entry| entry.id == id)
    }

    /// Builds the fixed roster and becomes visible. Caller is responsible
    /// for the prerequisite-flag gate and for arming the status feed.
    pub fn activate(&mut self) -> Vec<String> {
        self.roster = ROSTER
            .iter()
            .map(|seed| RosterEntry {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                icon: seed.icon.to_string(),
                role: seed.role.to_string(),
                status: seed.status.to_string(),
                color: seed.color.to_string(),
                highlighted: false,
            })
            .collect();
        self.phase = OverlayPhase::Visible;

        let mut messages = vec!["overlay.show".to_string()];
        for entry in &self.roster {
            messages.push(format!("overlay.roster {} {}", entry.id, entry.status));
        }
        messages
    }

    /// Overwrites one entry's status/color and lights its highlight.
    /// Returns `None` when the overlay is not visible or the id is unknown.
    pub fn apply_update(&mut self, id: &str, status: &str, color: &str) -> Option<String> {
        if self.phase != OverlayPhase::Visible {
            return None;
        }
        let entry = self.roster.iter_mut().find(|entry| entry.id == id)?;
        entry.status = status.to_string();
        entry.color = color.to_string();
        entry.highlighted = true;
        Some(format!("overlay.update {} {}", id, status))
    }

    pub fn clear_highlight(&mut self, id: &str) -> Option<String> {
        let entry = self
            .roster
            .iter_mut()
            .find(|entry| entry.id == id && entry.highlighted)?;
        entry.highlighted = false;
        Some(format!("overlay.highlight.clear {id}"))
    }

    pub fn begin_fade(&mut self) -> String {
        self.phase = OverlayPhase::FadingOut;
        "overlay.fade".to_string()
    }

    pub fn finish_teardown(&mut self) -> String {
        self.phase = OverlayPhase::Hidden;
        self.roster.clear();
        "overlay.hidden".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{AllyOverlay, OverlayPhase};

    #[test]
    fn activation_builds_the_fixed_roster() {
        let mut overlay = AllyOverlay::new();
        overlay.activate();

        assert_eq!(overlay.phase(), OverlayPhase::Visible);
        let statuses: Vec<_> = overlay
            .roster()
            .iter()
            .map(|entry| (entry.id.as_str(), entry.status.as_str()))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("cees", "MONITORING"),
                ("jaap", "ARMED"),
                ("david", "READY"),
                ("eva", "POSITION"),
            ]
        );
    }

    #[test]
    fn updates_apply_only_while_visible() {
        let mut overlay = AllyOverlay::new();
        assert!(overlay.apply_update("cees", "RF SCAN", "#00ff41").is_none());

        overlay.activate();
        let message = overlay.apply_update("cees", "RF SCAN", "#00ff41");
        assert_eq!(message.as_deref(), Some("overlay.update cees RF SCAN"));
        let entry = overlay.entry("cees").unwrap();
        assert_eq!(entry.status, "RF SCAN");
        assert!(entry.highlighted);

        overlay.begin_fade();
        assert!(overlay.apply_update("jaap", "04:58", "#ffcc00").is_none());
    }

    #[test]
    fn unknown_entity_is_ignored() {
        let mut overlay = AllyOverlay::new();
        overlay.activate();
        assert!(overlay.apply_update("volkov", "SPOTTED", "#ff0000").is_none());
    }

    #[test]
    fn highlight_clears_once() {
        let mut overlay = AllyOverlay::new();
        overlay.activate();
        overlay.apply_update("eva", "GUIDING", "#ff6699");
        assert!(overlay.clear_highlight("eva").is_some());
        assert!(overlay.clear_highlight("eva").is_none());
    }

    #[test]
    fn teardown_clears_the_roster() {
        let mut overlay = AllyOverlay::new();
        overlay.activate();
        overlay.begin_fade();
        overlay.finish_teardown();
        assert_eq!(overlay.phase(), OverlayPhase::Hidden);
        assert!(overlay.roster().is_empty());
    }
}
