// duff: a terminal explorer for Simpsons characters, episodes, and products.

mod api;
mod app;
mod cache;
mod error;
mod favorites;
mod fetch;
mod state;
mod ui;

use std::io;

use app::App;

#[tokio::main]
async fn main() -> io::Result<()> {
    let mut app = App::new().map_err(io::Error::other)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
