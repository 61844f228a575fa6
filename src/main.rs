mod gui;

use anyhow::Context;
use iced::{window, Size};
use student_manager::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // RUST_LOG=student_manager=debug for load/save detail. Passwords are never logged.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_manager=info")),
        )
        .with_target(false)
        .init();

    let data_dir = std::env::current_dir().context("cannot resolve the working directory")?;
    let config = AppConfig::in_dir(data_dir);

    iced::application(
        gui::StudentApp::title,
        gui::StudentApp::update,
        gui::StudentApp::view,
    )
    .window(window::Settings {
        size: Size::new(900.0, 560.0),
        resizable: true,
        ..window::Settings::default()
    })
    .run_with(move || gui::StudentApp::new(config))
    .map_err(|e| anyhow::anyhow!("the application window failed: {e}"))?;

    Ok(())
}
