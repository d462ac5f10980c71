use std::{
    fmt::Display,
    io::{self, IsTerminal},
};

use clap::builder::styling::{AnsiColor, Effects, Style, Styles};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the styles used for `vmdecl` help and status output.
pub fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Green.on_default() | Effects::BOLD)
        .invalid(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Whether status lines should carry ANSI escapes.
///
/// Colour needs stdout to be a terminal. `NO_COLOR` or `TERM=dumb` turn it off.
pub fn ansi_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }

    io::stdout().is_terminal()
}

fn paint(text: impl Display, style: &Style, enabled: bool) -> String {
    if enabled {
        format!("{}{text}{}", style.render(), style.render_reset())
    } else {
        text.to_string()
    }
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Colours the words of a status line the same way clap colours help output.
pub trait AnsiStyles {
    /// Style for names and paths.
    fn literal(&self) -> String;

    /// Style for failures.
    fn error(&self) -> String;

    /// Style for success markers.
    fn valid(&self) -> String;
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<T: Display + ?Sized> AnsiStyles for T {
    fn literal(&self) -> String {
        paint(self, styles().get_literal(), ansi_enabled())
    }

    fn error(&self) -> String {
        paint(self, styles().get_error(), ansi_enabled())
    }

    fn valid(&self) -> String {
        paint(self, styles().get_valid(), ansi_enabled())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
