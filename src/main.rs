use node_canvas::{CanvasConfig, CanvasError};

fn main() -> Result<(), CanvasError> {
    // Set up logging, controlled by RUST_LOG
    env_logger::init();

    // An optional JSON config path replaces the built-in demo world
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            CanvasConfig::load(&path)?
        }
        None => CanvasConfig::default(),
    };

    node_canvas::run_app(config)
}
