//! Terminal rendering for the call list and form status

use callboard::presentation::{CallRow, COLUMNS};
use callboard::{CallForm, ListView, StatusStyle, TableRow};
use colored::{ColoredString, Colorize};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const COLUMN_GAP: &str = "  ";

/// Clear the terminal and move the cursor home
pub fn clear_screen() {
    print!("{}", CLEAR_SCREEN);
}

fn styled_status(status: &str, style: Option<StatusStyle>) -> ColoredString {
    match style {
        Some(StatusStyle::Pending) => status.yellow(),
        Some(StatusStyle::Initiated) => status.cyan(),
        Some(StatusStyle::Completed) => status.green(),
        Some(StatusStyle::Failed) => status.red().bold(),
        None => status.normal(),
    }
}

/// Pad by char count so colored text lines up
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn column_widths(rows: &[&CallRow]) -> [usize; 5] {
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

/// Render the history panel as text
pub fn render_list(view: &ListView, validating: bool) -> String {
    let spinner = if validating { " ⟳".dimmed().to_string() } else { String::new() };
    let mut out = format!("{}{}\n", "Call History".bold(), spinner);

    let table = match view {
        ListView::Table(table) => table,
        other => {
            let message = other.message().unwrap_or_default();
            let message = if matches!(other, ListView::Error) {
                message.red().to_string()
            } else {
                message.dimmed().to_string()
            };
            out.push_str(&format!("  {}\n", message));
            return out;
        }
    };

    let call_rows: Vec<&CallRow> = table
        .rows
        .iter()
        .filter_map(|r| match r {
            TableRow::Call(row) => Some(row),
            TableRow::Placeholder { .. } => None,
        })
        .collect();
    let widths = column_widths(&call_rows);
    let total_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .map(|(c, w)| pad(c, w))
        .collect();
    out.push_str(&format!("  {}\n", header.join(COLUMN_GAP).bold()));
    out.push_str(&format!("  {}\n", "─".repeat(total_width).dimmed()));

    for row in &table.rows {
        match row {
            TableRow::Call(row) => {
                let cells = row.cells();
                let mut line = Vec::with_capacity(cells.len());
                for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
                    let padded = pad(cell, width);
                    let rendered = match i {
                        0 => padded.bold().to_string(),
                        1 | 4 => padded.dimmed().to_string(),
                        3 => styled_status(&padded, row.status_style).to_string(),
                        _ => padded,
                    };
                    line.push(rendered);
                }
                out.push_str(&format!("  {}\n", line.join(COLUMN_GAP)));
            }
            TableRow::Placeholder { text, .. } => {
                let indent = total_width.saturating_sub(text.chars().count()) / 2;
                out.push_str(&format!("  {}{}\n", " ".repeat(indent), text.dimmed()));
            }
        }
    }

    out
}

/// One-line summary of the form's state
pub fn render_form_status(form: &CallForm) -> Option<String> {
    if form.is_loading() {
        return Some(form.submit_label().dimmed().to_string());
    }
    form.error().map(|e| format!("{} {}", "✗".red(), e.red()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard::{Call, TableModel, Workflow};

    fn plain() {
        colored::control::set_override(false);
    }

    fn call(name: &str, status: &str) -> Call {
        Call {
            id: name.to_lowercase(),
            customer_name: name.to_string(),
            phone_number: "+14155550100".to_string(),
            workflow: Workflow::Support,
            status: status.to_string(),
            created_at: "2024-05-01T09:30:00".to_string(),
        }
    }

    #[test]
    fn test_render_loading_and_error() {
        plain();
        assert!(render_list(&ListView::Loading, true).contains("Loading call history..."));
        assert!(render_list(&ListView::Error, false).contains("Failed to load calls"));
    }

    #[test]
    fn test_render_empty_table() {
        plain();
        let view = ListView::Table(TableModel::from_calls(&[]));
        let out = render_list(&view, false);
        assert!(out.contains("Customer"));
        assert!(out.contains("No calls recorded yet"));
    }

    #[test]
    fn test_render_rows_aligned() {
        plain();
        let calls = vec![call("Ada", "pending"), call("Grace Hopper", "cancelled")];
        let view = ListView::Table(TableModel::from_calls(&calls));
        let out = render_list(&view, false);

        let lines: Vec<&str> = out.lines().collect();
        // title, header, rule, two rows
        assert_eq!(lines.len(), 5);
        let phone_col = lines[3].find("+1415").unwrap();
        assert_eq!(lines[4].find("+1415").unwrap(), phone_col);
        assert!(lines[4].contains("cancelled"));
        assert!(lines[3].contains("09:30"));
    }

    #[test]
    fn test_form_status() {
        plain();
        let form = CallForm::new();
        assert!(render_form_status(&form).is_none());
    }
}
