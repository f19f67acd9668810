//! Brickout entry point
//!
//! Window configuration and the frame loop; everything else lives in the
//! library crate.

use brickout::app::GameLayer;
use brickout::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use macroquad::prelude::{Conf, next_frame};

fn window_conf() -> Conf {
    Conf {
        window_title: "Brickout".to_owned(),
        window_width: SCREEN_WIDTH as i32 * 2,
        window_height: SCREEN_HEIGHT as i32 * 2,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("starting brickout");

    let mut layer = GameLayer::new();
    loop {
        layer.frame();
        next_frame().await;
    }
}
