//! Session banner, printed at startup and after every screen clear.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use parley_core::output::OutputSink;

/// Title shown in the banner.
pub const BANNER_TITLE: &str = "Parley AI Chat";

/// Two-row table: the title and the version.
pub fn banner_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled);
    table.add_row(vec![Cell::new(BANNER_TITLE)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    table.add_row(vec![
        Cell::new(format!("v{}", env!("CARGO_PKG_VERSION"))).fg(Color::DarkGrey),
    ]);
    table
}

pub fn print_banner(out: &OutputSink) -> std::io::Result<()> {
    out.line(&banner_table().to_string())?;
    out.line("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_contains_title_and_version() {
        let (out, captured) = OutputSink::capture();
        print_banner(&out).unwrap();

        let text = console::strip_ansi_codes(&captured.contents()).into_owned();
        assert!(text.contains(BANNER_TITLE));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
