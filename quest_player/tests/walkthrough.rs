use std::process::Command;

use anyhow::{Context, Result};
use tempfile::tempdir;

fn event_index(events: &[String], label: &str) -> Option<usize> {
    events.iter().position(|event| event == label)
}

#[test]
fn demo_walkthrough_reaches_the_server_room() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for reports")?;
    let event_log_path = temp_dir.path().join("event_log.json");
    let state_path = temp_dir.path().join("state.json");

    let output = Command::new(env!("CARGO_BIN_EXE_quest_player"))
        .args([
            "--event-log-json",
            event_log_path.to_str().context("event log path utf-8")?,
            "--state-json",
            state_path.to_str().context("state path utf-8")?,
        ])
        .output()
        .context("executing quest_player demo walkthrough")?;

    assert!(
        output.status.success(),
        "quest_player exited with {:?}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let log: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(&event_log_path).context("reading event log")?,
    )
    .context("parsing event log JSON")?;
    let events: Vec<String> = log["events"]
        .as_array()
        .context("event log has an events array")?
        .iter()
        .map(|value| value.as_str().unwrap_or_default().to_string())
        .collect();

    // The overlay gate refuses before mission prep, then accepts.
    let refused = event_index(&events, "overlay.refused (mission_prep_complete unset)")
        .expect("gate refusal recorded");
    let shown = event_index(&events, "overlay.show").expect("overlay shown");
    assert!(refused < shown);

    // The stairwell is blocked until Eva's directions unlock it.
    let blocked =
        event_index(&events, "hotspot.blocked basement_stairs").expect("stairs blocked first");
    let dispatched = event_index(&events, "hotspot.dispatch basement_stairs")
        .expect("stairs dispatched later");
    assert!(blocked < dispatched);

    // The delayed transition lands in the server room.
    assert!(events.contains(&"scene.enter facility_server".to_string()));
    assert!(events.contains(&"flag.set evidence_secured true".to_string()));

    // The ally status feed ticked while the walkthrough ran.
    assert!(events.contains(&"overlay.update cees RF SCAN".to_string()));
    assert!(events.contains(&"overlay.update jaap 04:58".to_string()));

    // Hiding the overlay fades it out and tears it down, with no status
    // updates applying afterwards.
    let fade = event_index(&events, "overlay.fade").expect("overlay fade recorded");
    assert!(events.contains(&"overlay.hidden".to_string()));
    assert!(
        events[fade..]
            .iter()
            .all(|event| !event.starts_with("overlay.update ")),
        "status update applied after hide"
    );

    let state: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(&state_path).context("reading runtime snapshot")?,
    )
    .context("parsing runtime snapshot JSON")?;
    assert_eq!(state["current_scene"], "facility_server");
    assert_eq!(state["pending_events"], 0);
    assert_eq!(state["flags"]["evidence_secured"], true);

    Ok(())
}

#[test]
fn bad_scripts_are_rejected() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for script")?;
    let script_path = temp_dir.path().join("broken.walk");
    std::fs::write(&script_path, "load facility_interior\nteleport basement\n")
        .context("writing broken script")?;

    let output = Command::new(env!("CARGO_BIN_EXE_quest_player"))
        .args(["--script", script_path.to_str().context("script path utf-8")?])
        .output()
        .context("executing quest_player with a broken script")?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown command \"teleport\""),
        "unexpected stderr: {stderr}"
    );

    Ok(())
}
