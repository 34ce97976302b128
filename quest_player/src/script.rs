use quest_engine::{FlagValue, Game};
use thiserror::Error;

/// One walkthrough step. Scripts are line-oriented: one command per line,
/// `#` starts a comment.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String),
    Click(String),
    ClickAt(f32, f32),
    Advance,
    AdvanceAll,
    Wait(u64),
    SetFlag(String, FlagValue),
    OverlayShow,
    OverlayHide,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {command} expects {expected}")]
    BadArity {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: invalid delay {value:?}")]
    BadDelay { line: usize, value: String },
    #[error("line {line}: invalid coordinate {value:?}")]
    BadCoordinate { line: usize, value: String },
    #[error("line {line}: overlay expects show|hide, got {verb:?}")]
    BadOverlayVerb { line: usize, verb: String },
}

pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let mut parts = text.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let command = match head {
            "load" => Command::Load(one_arg(line, "load", "a scene id", &rest)?.to_string()),
            "click" => Command::Click(one_arg(line, "click", "a hotspot id", &rest)?.to_string()),
            "click-at" => {
                if rest.len() != 2 {
                    return Err(ScriptError::BadArity {
                        line,
                        command: "click-at",
                        expected: "two coordinates",
                    });
                }
                Command::ClickAt(
                    parse_coordinate(line, rest[0])?,
                    parse_coordinate(line, rest[1])?,
                )
            }
            "advance" => Command::Advance,
            "advance-all" => Command::AdvanceAll,
            "wait" => {
                let value = one_arg(line, "wait", "a delay in milliseconds", &rest)?;
                let delay = value.parse().map_err(|_| ScriptError::BadDelay {
                    line,
                    value: value.to_string(),
                })?;
                Command::Wait(delay)
            }
            "flag" => {
                if rest.len() != 2 {
                    return Err(ScriptError::BadArity {
                        line,
                        command: "flag",
                        expected: "a key and a value",
                    });
                }
                Command::SetFlag(rest[0].to_string(), parse_flag_value(rest[1]))
            }
            "overlay" => {
                let verb = one_arg(line, "overlay", "show|hide", &rest)?;
                match verb {
                    "show" => Command::OverlayShow,
                    "hide" => Command::OverlayHide,
                    other => {
                        return Err(ScriptError::BadOverlayVerb {
                            line,
                            verb: other.to_string(),
                        })
                    }
                }
            }
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                })
            }
        };
        commands.push(command);
    }
    Ok(commands)
}

pub fn run(game: &mut Game, commands: &[Command]) {
    for command in commands {
        match command {
            Command::Load(scene_id) => game.load_scene(scene_id),
            Command::Click(hotspot_id) => game.click_hotspot(hotspot_id),
            Command::ClickAt(x, y) => game.click_at(*x, *y),
            Command::Advance => game.advance_dialogue(),
            Command::AdvanceAll => {
                while game.dialogue_active() {
                    game.advance_dialogue();
                }
            }
            Command::Wait(delay_ms) => game.advance(*delay_ms),
            Command::SetFlag(key, value) => game.set_flag(key, value.clone()),
            Command::OverlayShow => game.show_overlay(),
            Command::OverlayHide => game.hide_overlay(),
        }
    }
}

fn one_arg<'a>(
    line: usize,
    command: &'static str,
    expected: &'static str,
    rest: &[&'a str],
) -> Result<&'a str, ScriptError> {
    match rest {
        &[only] => Ok(only),
        _ => Err(ScriptError::BadArity {
            line,
            command,
            expected,
        }),
    }
}

fn parse_coordinate(line: usize, value: &str) -> Result<f32, ScriptError> {
    value.parse().map_err(|_| ScriptError::BadCoordinate {
        line,
        value: value.to_string(),
    })
}

fn parse_flag_value(value: &str) -> FlagValue {
    match value {
        "true" => FlagValue::Bool(true),
        "false" => FlagValue::Bool(false),
        other => FlagValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, Command, ScriptError};
    use quest_engine::FlagValue;

    #[test]
    fn parses_a_walkthrough() {
        let commands = parse(
            "# infiltration\n\
             flag mission_prep_complete true\n\
             overlay show\n\
             load facility_interior\n\
             click eva_mesh  # ask for directions\n\
             advance-all\n\
             wait 1500\n\
             click-at 82.0 55.0\n",
        )
        .expect("script parses");

        assert_eq!(
            commands,
            vec![
                Command::SetFlag("mission_prep_complete".to_string(), FlagValue::Bool(true)),
                Command::OverlayShow,
                Command::Load("facility_interior".to_string()),
                Command::Click("eva_mesh".to_string()),
                Command::AdvanceAll,
                Command::Wait(1_500),
                Command::ClickAt(82.0, 55.0),
            ]
        );
    }

    #[test]
    fn flag_values_may_be_text() {
        let commands = parse("flag driving_destination home_from_lofar\n").expect("parses");
        assert_eq!(
            commands,
            vec![Command::SetFlag(
                "driving_destination".to_string(),
                FlagValue::Text("home_from_lofar".to_string()),
            )]
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        let error = parse("teleport basement\n").expect_err("should fail");
        assert!(matches!(error, ScriptError::UnknownCommand { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_delays() {
        let error = parse("wait soon\n").expect_err("should fail");
        assert!(matches!(error, ScriptError::BadDelay { line: 1, .. }));
    }

    #[test]
    fn rejects_missing_arguments() {
        let error = parse("click\n").expect_err("should fail");
        assert!(matches!(
            error,
            ScriptError::BadArity {
                line: 1,
                command: "click",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_overlay_verbs() {
        let error = parse("overlay toggle\n").expect_err("should fail");
        assert!(matches!(error, ScriptError::BadOverlayVerb { line: 1, .. }));
    }
}
