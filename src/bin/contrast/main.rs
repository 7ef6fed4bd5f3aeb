//! contrast - hot/cold interval timer in the terminal
//!
//! Run with: cargo run
//! Logs go to `contrast.log` in the temp directory (filter with RUST_LOG).

mod app;
mod audio;
mod ui;

use app::ContrastApp;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();

    ContrastApp::new().close_after_finish(true).run()
}

/// Route `log` output to a file; stderr belongs to the terminal UI.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let path = std::env::temp_dir().join("contrast.log");
    match std::fs::File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    if let Err(err) = builder.try_init() {
        eprintln!("contrast: logging disabled: {err}");
    }
}
