use quest_engine::{Cursor, DialogueLine, Game, Hotspot, Region, SceneDef};

const SCENE_ID: &str = "facility_interior";

pub fn scene() -> SceneDef {
    SceneDef::new(SCENE_ID, "Inside Steckerdoser Heide")
        .background("assets/images/scenes/facility_interior.svg")
        .description(
            "Inside the compound. Sterile corridors. Fluorescent lights. \
             The hum of ventilation systems.",
        )
        .player_start(15.0, 85.0)
        .idle_thoughts(&[
            "Stay quiet. Move fast.",
            "Someone could turn that corner any second.",
            "Where's the basement access?",
            "Eva's guidance is keeping me alive.",
            "No cameras here. Good.",
        ])
        .hotspot(Hotspot::new(
            "main_corridor",
            "Main Corridor",
            Region {
                x: 25.0,
                y: 30.0,
                width: 50.0,
                height: 40.0,
            },
            Cursor::Look,
            main_corridor,
        ))
        .hotspot(Hotspot::new(
            "eva_mesh",
            "Meshtastic Device",
            Region {
                x: 85.0,
                y: 5.0,
                width: 10.0,
                height: 8.0,
            },
            Cursor::Pointer,
            eva_mesh,
        ))
        .hotspot(Hotspot::new(
            "security_office",
            "Security Office",
            Region {
                x: 7.8,
                y: 44.4,
                width: 9.4,
                height: 25.9,
            },
            Cursor::Look,
            security_office,
        ))
        .hotspot(Hotspot::new(
            "lab_door",
            "Laboratory 3",
            Region {
                x: 23.4,
                y: 46.3,
                width: 8.3,
                height: 23.2,
            },
            Cursor::Look,
            lab_door,
        ))
        .hotspot(
            Hotspot::new(
                "basement_stairs",
                "Basement Stairwell",
                Region {
                    x: 80.7,
                    y: 48.2,
                    width: 7.3,
                    height: 20.4,
                },
                Cursor::Pointer,
                basement_stairs,
            )
            .enabled_when(|game| game.scene_flag(SCENE_ID, "basement_unlocked").is_truthy()),
        )
        .hotspot(Hotspot::new(
            "exit_compound",
            "Exit to Perimeter",
            Region {
                x: 5.0,
                y: 85.0,
                width: 15.0,
                height: 12.0,
            },
            Cursor::Exit,
            exit_compound,
        ))
        .on_enter(on_enter)
}

fn on_enter(game: &mut Game) {
    game.show_notification("Inside the compound - Find the server room");

    if !game.flag_is_set("facility_interior_entered") {
        game.set_flag("facility_interior_entered", true);
        game.set_flag("entered_facility", true);

        game.scene_timeout(1_000, |game| {
            game.start_dialogue(vec![
                DialogueLine::narration(
                    "*Inside the compound. Empty corridors. Night shift minimal staff.*",
                ),
                DialogueLine::new("Ryan", "Made it inside. Now what?"),
                DialogueLine::new("Ryan", "*Meshtastic chirps softly*"),
                DialogueLine::new("Ryan", "Check the Meshtastic for Eva's guidance."),
            ]);
        });
    }
}

fn main_corridor(game: &mut Game) {
    game.show_dialogue(
        &[
            "Long corridor. Doors on both sides.",
            "Signs in German: 'LABOR 3', 'TECHNIK', 'ZUTRITT VERBOTEN'",
            "Empty at this hour. Night shift is minimal.",
        ],
        "Ryan",
    );
}

fn eva_mesh(game: &mut Game) {
    if !game.scene_flag(SCENE_ID, "basement_unlocked").is_truthy() {
        game.start_dialogue(vec![
            DialogueLine::new("Ryan", "*Checks Meshtastic*"),
            DialogueLine::new("Eva (Mesh)", "Status?"),
            DialogueLine::new("Ryan", "Inside. Which way to basement?"),
            DialogueLine::new(
                "Eva (Mesh)",
                "End of corridor. Stairwell marked \"KELLER B\". Basement level.",
            ),
            DialogueLine::new(
                "Eva (Mesh)",
                "Server room door has biometric lock. Override code: 2847",
            ),
            DialogueLine::new("Ryan", "Got it. Moving."),
        ]);

        game.scene_timeout(1_500, |game| {
            game.show_notification("Find the basement stairwell");
            game.set_scene_flag(SCENE_ID, "basement_unlocked", true);
        });
    } else {
        game.show_dialogue(
            &[
                "Eva's instructions: Basement stairwell, then server room.",
                "Override code: 2847",
            ],
            "Ryan",
        );
    }
}

fn security_office(game: &mut Game) {
    game.show_dialogue(
        &[
            "Security office. Door is closed.",
            "Light is on inside. Can hear radio chatter.",
            "Keep moving. Don't draw attention.",
        ],
        "Ryan",
    );
}

fn lab_door(game: &mut Game) {
    game.show_dialogue(
        &[
            "'LABOR 3 - ELEKTRONIK'",
            "Through the window: workbenches, oscilloscopes, drone components.",
            "This is where they build it. The weapons.",
        ],
        "Ryan",
    );
}

fn basement_stairs(game: &mut Game) {
    game.start_dialogue(vec![
        DialogueLine::new("Ryan", "*Opens stairwell door quietly*"),
        DialogueLine::narration("*Concrete stairs descending into dimness*"),
        DialogueLine::new("Ryan", "Basement level. Server room should be here."),
        DialogueLine::narration("*Descends. Fluorescent lights hum. Air is colder.*"),
    ]);

    game.scene_timeout(3_000, |game| {
        game.load_scene("facility_server");
    });
}

fn exit_compound(game: &mut Game) {
    game.show_dialogue(
        &[
            "Back to the perimeter? Not yet.",
            "Need to get that evidence first.",
        ],
        "Ryan",
    );
}
