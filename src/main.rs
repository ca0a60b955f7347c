use std::time::Duration;

use macroquad::prelude::{
    BLACK, Conf, clear_background, get_time, next_frame, screen_height, screen_width,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

use snake_arcade::config::{self, CANVAS_SIZE, PANEL_WIDTH, WINDOW_TITLE};
use snake_arcade::input::{self, Command};
use snake_arcade::render::CanvasRenderer;
use snake_arcade::session::{BlobStore, FileStore, MemoryStore, SessionStore};
use snake_arcade::{Controller, logging};

fn window_conf() -> Conf {
    Conf {
        window_title: WINDOW_TITLE.to_owned(),
        window_width: CANVAS_SIZE + PANEL_WIDTH,
        window_height: CANVAS_SIZE,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    logging::init();
    info!("Starting Snake...");

    let mut renderer = match CanvasRenderer::new(screen_width(), screen_height()) {
        Ok(renderer) => renderer,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let save_dir = config::save_dir();
    let rng = StdRng::from_entropy();
    let started = get_time();
    let clock = || Duration::from_secs_f64((get_time() - started).max(0.0));

    match FileStore::open(&save_dir) {
        Ok(store) => {
            info!("Saving sessions under {}", save_dir.display());
            let controller = Controller::new(SessionStore::load(store), rng, clock());
            run(controller, &mut renderer, clock).await;
        }
        Err(e) => {
            warn!("Save directory {} unusable ({}), scores kept in memory", save_dir.display(), e);
            let controller = Controller::new(SessionStore::load(MemoryStore::new()), rng, clock());
            run(controller, &mut renderer, clock).await;
        }
    }
}

async fn run<B, F>(mut controller: Controller<B, StdRng>, renderer: &mut CanvasRenderer, clock: F)
where
    B: BlobStore,
    F: Fn() -> Duration,
{
    loop {
        let now = clock();
        for command in input::poll() {
            if command == Command::Quit {
                info!("Bye");
                return;
            }
            controller.handle(command, now);
        }

        controller.advance(now);

        clear_background(BLACK);
        controller.present(renderer);

        next_frame().await;
    }
}
