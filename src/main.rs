mod allocator;
mod app;
mod secret;
mod ui;

use crate::app::App;

fn main() -> anyhow::Result<()> {
    App::init()?.execute()
}
