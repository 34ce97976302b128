use quest_engine::{Cursor, DialogueLine, Game, Hotspot, Region, SceneDef};

const SCENE_ID: &str = "facility_server";

pub fn scene() -> SceneDef {
    SceneDef::new(SCENE_ID, "Server Room - Basement")
        .background("assets/images/scenes/facility_server.svg")
        .description(
            "Air-conditioned server room. Racks of equipment humming. \
             This is where the secrets are kept.",
        )
        .player_start(20.0, 85.0)
        .idle_thoughts(&[
            "Rows of servers. So much data.",
            "Air conditioning is loud. Good cover.",
            "Where's that terminal Eva mentioned?",
            "Time is running out.",
            "Get the evidence. Get out.",
        ])
        .hotspot(Hotspot::new(
            "server_door",
            "Server Room Door",
            Region {
                x: 15.0,
                y: 70.0,
                width: 12.0,
                height: 20.0,
            },
            Cursor::Look,
            server_door,
        ))
        .hotspot(
            Hotspot::new(
                "override_panel",
                "Maintenance Override",
                Region {
                    x: 10.0,
                    y: 72.0,
                    width: 6.0,
                    height: 8.0,
                },
                Cursor::Pointer,
                override_panel,
            )
            .enabled_when(|game| !game.scene_flag(SCENE_ID, "door_unlocked").is_truthy()),
        )
        .hotspot(Hotspot::new(
            "server_racks",
            "Server Racks",
            Region {
                x: 35.0,
                y: 25.0,
                width: 30.0,
                height: 50.0,
            },
            Cursor::Look,
            server_racks,
        ))
        .hotspot(
            Hotspot::new(
                "terminal",
                "Air-Gapped Terminal",
                Region {
                    x: 70.0,
                    y: 35.0,
                    width: 15.0,
                    height: 20.0,
                },
                Cursor::Pointer,
                terminal,
            )
            .enabled_when(|game| {
                game.scene_flag(SCENE_ID, "door_unlocked").is_truthy()
                    && !game.scene_flag(SCENE_ID, "evidence_downloaded").is_truthy()
            }),
        )
        .hotspot(Hotspot::new(
            "stairwell_back",
            "Stairwell Up",
            Region {
                x: 2.0,
                y: 75.0,
                width: 8.0,
                height: 18.0,
            },
            Cursor::Exit,
            stairwell_back,
        ))
        .on_enter(on_enter)
}

fn on_enter(game: &mut Game) {
    game.set_flag("reached_server_room", true);
    game.show_notification("Basement level - Get through the server room door");
}

fn server_door(game: &mut Game) {
    if game.scene_flag(SCENE_ID, "door_unlocked").is_truthy() {
        game.show_dialogue(
            &["Door is open. Server room beyond.", "No turning back now."],
            "Ryan",
        );
    } else {
        game.show_dialogue(
            &[
                "Biometric lock. Fingerprint scanner and keypad.",
                "Eva said there's an override code: 2847",
            ],
            "Ryan",
        );
    }
}

fn override_panel(game: &mut Game) {
    game.start_dialogue(vec![
        DialogueLine::new("Ryan", "Blue maintenance panel. Right where Eva said."),
        DialogueLine::new("Ryan", "*Types: 2-8-4-7*"),
        DialogueLine::narration("*CLICK* Red light turns green."),
        DialogueLine::narration("*Door lock disengages*"),
        DialogueLine::new("Ryan", "I'm in. Server room ahead."),
    ]);

    game.set_scene_flag(SCENE_ID, "door_unlocked", true);

    game.scene_timeout(2_000, |game| {
        game.show_notification("Server room unlocked - Find the terminal");
    });
}

fn server_racks(game: &mut Game) {
    game.show_dialogue(
        &[
            "Racks of blade servers. Enterprise-grade equipment.",
            "Cables everywhere. Blinking status LEDs.",
            "This is German military infrastructure. Top tier.",
        ],
        "Ryan",
    );
}

fn terminal(game: &mut Game) {
    if !game.scene_flag(SCENE_ID, "terminal_accessed").is_truthy() {
        game.set_scene_flag(SCENE_ID, "terminal_accessed", true);

        game.start_dialogue(vec![
            DialogueLine::narration("*Black terminal case. Isolated from network.*"),
            DialogueLine::new("Ryan", "*Powers on terminal*"),
            DialogueLine::narration("*Boot sequence. Login prompt appears.*"),
            DialogueLine::new("Ryan", "Need credentials. Eva?"),
            DialogueLine::new(
                "Eva (Mesh)",
                "Try: username \"volkov_d\", password \"Moskau_1991\"",
            ),
            DialogueLine::new("Ryan", "*Types carefully*"),
            DialogueLine::narration("*SYSTEM ACCESS GRANTED - DR. DMITRI VOLKOV*"),
            DialogueLine::new("Ryan", "I'm in. His personal account."),
        ]);

        game.scene_timeout(2_000, |game| {
            game.show_notification("Access granted - Download the evidence");
        });
    } else {
        game.set_scene_flag(SCENE_ID, "evidence_downloaded", true);
        game.set_flag("evidence_secured", true);

        game.start_dialogue(vec![
            DialogueLine::new("Ryan", "*Plugs in USB drive*"),
            DialogueLine::narration("*Copying: PROJECT ECHO - FIELD TEST LOGS*"),
            DialogueLine::narration("*Copying: TARGETING PARAMETERS - CIVILIAN GRID*"),
            DialogueLine::new("Ryan", "That's everything. Time to disappear."),
        ]);

        game.scene_timeout(1_500, |game| {
            game.show_notification("Evidence secured - Get out");
        });
    }
}

fn stairwell_back(game: &mut Game) {
    game.show_dialogue(&["Back up the stairwell. Quietly."], "Ryan");

    game.scene_timeout(1_500, |game| {
        game.load_scene("facility_interior");
    });
}
