//! User interface rendering.

mod browser;
mod info;
mod theme;

use crate::app::App;
use ratatui::Frame;

pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    browser::draw_browser(f, app);

    if let Some(ref node) = app.info {
        let colors = ThemeColors::from_theme(&app.theme);
        info::draw_info(f, node, &colors);
    }
}
