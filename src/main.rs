//! Stay Unstable entry point
//!
//! Opens the window and runs one tick plus one render per frame.

use macroquad::window::{Conf, next_frame};

use stay_unstable::Settings;
use stay_unstable::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use stay_unstable::platform::MacroquadBackend;
use stay_unstable::renderer::render_frame;
use stay_unstable::sim::{Flow, Game, StackBuilder, TickInput, tick};

fn window_conf() -> Conf {
    Conf {
        window_title: "Stay unstable!".to_string(),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Stay Unstable starting...");

    let settings = Settings::default();
    match serde_json::to_string(&settings) {
        Ok(json) => log::debug!("Settings: {json}"),
        Err(e) => log::warn!("Could not serialize settings: {e}"),
    }

    let builder = match StackBuilder::new(settings.clone()) {
        Ok(builder) => builder,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            return;
        }
    };

    let mut game = Game::new(settings, builder);
    let mut backend = MacroquadBackend::new();
    backend.capture_cursor();

    loop {
        let input = TickInput::poll(&backend);
        if tick(&mut game, &input) == Flow::Quit {
            break;
        }
        render_frame(&mut game, &mut backend);
        next_frame().await;
    }

    backend.release_cursor();
    log::info!("Best score this session: {}", game.best_score());
}
