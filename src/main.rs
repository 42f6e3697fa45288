// ============================================================================
// main.rs — Aviary
// Entry point. Initializes logging, loads the optional config, and starts
// the event loop.
// ============================================================================

use aviary::app::App;
use aviary::config::ViewerConfig;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ViewerConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => ViewerConfig::default(),
    };

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).unwrap();
}
