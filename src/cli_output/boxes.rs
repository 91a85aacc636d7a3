//! Simple line-based CLI output utilities.
//!
//! Every function writes to the given writer so commands can be captured
//! in tests; the binary passes stdout.

use std::io::{self, Write};

use crate::notifications::{Notice, NoticeLevel};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const INFO: &str = "•";
}

/// ```text
/// MENTORSHIP REQUESTS
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title.to_uppercase())?;
    writeln!(out, "{}", "═".repeat(LINE_WIDTH))
}

pub fn print_separator(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(LINE_WIDTH))
}

/// ```text
///   ✓ Session booked!
/// ```
pub fn print_notice(out: &mut dyn Write, notice: &Notice) -> io::Result<()> {
    let icon = match notice.level {
        NoticeLevel::Success => icons::SUCCESS,
        NoticeLevel::Info => icons::INFO,
        NoticeLevel::Error => icons::FAILURE,
    };
    writeln!(out, "  {} {}", icon, notice.message)
}

/// Aligned `label: value` pairs.
pub fn print_fields(out: &mut dyn Write, fields: &[(&str, String)]) -> io::Result<()> {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        writeln!(out, "  {:<width$}  {}", format!("{}:", label), value, width = width + 1)?;
    }
    Ok(())
}

/// A table with a header row; each column is as wide as its widest cell.
pub fn print_table(out: &mut dyn Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "  {}", line(headers.to_vec()))?;
    writeln!(
        out,
        "  {}",
        widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("  ")
    )?;
    for row in rows {
        writeln!(out, "  {}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

/// ```text
///   (no sessions)
/// ```
pub fn print_empty(out: &mut dyn Write, what: &str) -> io::Result<()> {
    writeln!(out, "  (no {})", what)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_alignment() {
        let text = render(|out| {
            print_table(
                out,
                &["ID", "NAME"],
                &[
                    vec!["1".to_string(), "ada".to_string()],
                    vec!["12".to_string(), "grace".to_string()],
                ],
            )
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  ID  NAME");
        assert_eq!(lines[1], "  ──  ─────");
        assert_eq!(lines[2], "  1   ada");
        assert_eq!(lines[3], "  12  grace");
    }

    #[test]
    fn test_notice_icons() {
        assert_eq!(
            render(|out| print_notice(out, &Notice::error("Login failed"))),
            "  ✗ Login failed\n"
        );
        assert_eq!(
            render(|out| print_notice(out, &Notice::success("Saved"))),
            "  ✓ Saved\n"
        );
    }

    #[test]
    fn test_fields_align() {
        let text = render(|out| {
            print_fields(out, &[("Name", "ada".to_string()), ("Email", "a@x.io".to_string())])
        });
        assert_eq!(text, "  Name:   ada\n  Email:  a@x.io\n");
    }
}
