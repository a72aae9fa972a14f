//! Plain text rendering of a [TableView].

use std::fmt::Write;

use crate::{
    config::TableConfig,
    controller::LoadStatus,
    types::Column,
    view::TableView,
};

const KEY_WIDTH: usize = 18;

fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        format!("{s:<width$}")
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn render(view: &TableView<'_>, config: &TableConfig) -> String {
    let color = config.color;
    let width = config.column_width;
    let mut out = String::new();

    match view.status {
        LoadStatus::Failed(message) => {
            let _ = writeln!(out, "{}", config.style_error.style(message, color));
        }
        LoadStatus::Loading => {
            let _ = writeln!(out, "{}", config.style_footer.style("Loading…", color));
        }
        LoadStatus::Idle | LoadStatus::Ready => {}
    }

    let mut header = format!("  {}", config.style_header.style(fit("Key", KEY_WIDTH), color));
    for column in Column::ALL {
        header.push(' ');
        if column == view.query.sort_column {
            let title = format!("{} {}", column.header(), view.query.sort_direction.arrow());
            header.push_str(&config.style_sort.style(fit(&title, width), color));
        } else {
            header.push_str(&config.style_header.style(fit(column.header(), width), color));
        }
    }
    let _ = writeln!(out, "{}", header.trim_end());

    if view.rows.is_empty() {
        let _ = writeln!(out, "  {}", config.style_footer.style("No books", color));
    }
    for row in &view.rows {
        let editing = view.editing.is_some_and(|edit| edit.key == row.key);
        let shown = view.display_row(*row);
        let marker = if editing { "*" } else { " " };
        let mut line = format!(
            "{marker} {}",
            config.style_key.style(fit(&shown.key, KEY_WIDTH), color)
        );
        for column in Column::ALL {
            let cell = fit(&shown.cell(column).to_string(), width);
            let style = if editing {
                &config.style_editing
            } else {
                &config.style_cell
            };
            line.push(' ');
            line.push_str(&style.style(cell, color));
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let previous = if view.has_previous { "‹ prev" } else { "  ----" };
    let next = if view.has_next { "next ›" } else { "----  " };
    let footer = format!(
        "{previous}  Page {} of {}  {next}  {} per page, {} found",
        view.query.page,
        view.page_count,
        view.query.page_size,
        view.total_found
    );
    let _ = write!(out, "{}", config.style_footer.style(footer, color));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
        assert_eq!(fit("Ünïcödé", 7), "Ünïcödé");
    }
}
