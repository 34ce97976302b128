//! Scene content for the facility infiltration sequence. Hotspot
//! coordinates and dialogue text are authored data, not engine behavior.

mod facility_interior;
mod facility_server;

use quest_engine::Game;

pub fn register_all(game: &mut Game) {
    game.register_scene(facility_interior::scene());
    game.register_scene(facility_server::scene());
}
