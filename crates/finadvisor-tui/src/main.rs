use anyhow::Result;
use finadvisor_core::{Advisor, Config};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|_| Config::new());
    let advisor = Advisor::new(config.response_delay());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(advisor);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event)?;
        }

        app.poll_reply().await;
    }
    Ok(())
}
