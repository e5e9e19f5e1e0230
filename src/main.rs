mod app;
mod config;
mod editor;
mod views;
mod widgets;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::resolve(std::env::args_os().nth(1).map(PathBuf::from))?;
    info!(data_dir = %config.data_dir().display(), "starting");

    iced::application(move || App::boot(&config), App::update, App::view)
        .subscription(App::subscription)
        .title(App::title)
        .theme(App::theme)
        .window(iced::window::Settings {
            size: iced::Size::new(1200.0, 800.0),
            // Close requests go through the app so open edits are saved first.
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()?;
    Ok(())
}
