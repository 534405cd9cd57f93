//! Line-oriented rendering of the search screen.

use std::io::{self, Write};

use crate::application::services::{IconState, RowBinding};
use crate::domain::entities::Item;
use crate::domain::search_state::SearchState;

/// Shown in place of an icon that failed to load.
pub const ICON_PLACEHOLDER: &str = "[!]";

/// Writes search screen updates to a terminal or any other sink.
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    /// Creates a console writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints the status line of `state`, if it has one.
    ///
    /// # Errors
    /// Returns error if the sink cannot be written.
    pub fn render_status(&mut self, state: &SearchState) -> io::Result<()> {
        if let Some(status) = state.status_text() {
            writeln!(self.out, "{status}")?;
        }
        self.out.flush()
    }

    /// Prints every bound row.
    ///
    /// # Errors
    /// Returns error if the sink cannot be written.
    pub fn render_rows(&mut self, rows: &[RowBinding]) -> io::Result<()> {
        for row in rows {
            if let Some(item) = row.item() {
                writeln!(self.out, "{}", format_row(item, &row.icon()))?;
            }
        }
        self.out.flush()
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `"<n>. <name> | <developer> | <rating> rating | icon: <state>"`
#[must_use]
pub fn format_row(item: &Item, icon: &IconState) -> String {
    format!(
        "{}. {} | {} | {} rating | icon: {}",
        item.position() + 1,
        item.name(),
        item.developer(),
        format_rating(item.rating()),
        icon_label(icon)
    )
}

/// Short text for an icon state.
#[must_use]
pub fn icon_label(icon: &IconState) -> String {
    match icon {
        IconState::Empty => "-".to_string(),
        IconState::Loading(_) => "loading".to_string(),
        IconState::Ready(_, image) => format!("{}x{}", image.width(), image.height()),
        IconState::Placeholder(_) => ICON_PLACEHOLDER.to_string(),
    }
}

/// Formats a rating with three significant digits, trailing zeros dropped.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn format_rating(rating: f64) -> String {
    if rating == 0.0 || !rating.is_finite() {
        return "0".to_string();
    }

    let integer_digits = rating.abs().log10().floor() as i32 + 1;
    let decimals = (3 - integer_digits).max(0) as usize;
    let formatted = format!("{rating:.decimals$}");

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
