use super::view_models::{BookmarkView, EntryView, GcView};
use crate::args::OutputFormat;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

const TRACE_MARK: &str = "*";

/// One line per entry: `!<number> [(<time>)] <mark>  <command>`.
pub fn render_entries(
    out: &mut dyn Write,
    entries: &[EntryView],
    format: OutputFormat,
    color: bool,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, entries);
    }

    for entry in entries {
        write!(out, "!{:<5} ", entry.number)?;
        if let Some(time) = &entry.time {
            write!(out, "({}) ", time)?;
        }
        match (entry.has_trace, color) {
            (true, true) => write!(out, "{}", TRACE_MARK.green().bold())?,
            (true, false) => write!(out, "{}", TRACE_MARK)?,
            (false, _) => write!(out, " ")?,
        }
        writeln!(out, "  {}", entry.command)?;
    }
    Ok(())
}

pub fn render_bookmarks(out: &mut dyn Write, bookmarks: &[BookmarkView], format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, bookmarks);
    }

    let width = bookmarks.iter().map(|b| b.name.len()).max().unwrap_or(1);
    for bookmark in bookmarks {
        writeln!(out, "{:<width$}    {}", bookmark.name, bookmark.command, width = width)?;
    }
    Ok(())
}

pub fn render_gc(out: &mut dyn Write, view: &GcView, format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, view);
    }

    writeln!(out, "Removed {} {}", view.removed, view.kind)?;
    if view.failed > 0 {
        writeln!(out, "Failed to remove {} {}", view.failed, view.kind)?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(number: u64, command: &str, has_trace: bool, time: Option<&str>) -> EntryView {
        EntryView {
            number,
            command: command.to_string(),
            timestamp: Some(1000),
            has_trace,
            trace_name: "0".repeat(32),
            time: time.map(str::to_string),
        }
    }

    fn render(entries: &[EntryView]) -> String {
        let mut out = Vec::new();
        render_entries(&mut out, entries, OutputFormat::Plain, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_line_layout() {
        let text = render(&[view(7, "ls -la", false, None), view(42, "make", true, None)]);
        assert_eq!(text, "!7        ls -la\n!42    *  make\n");
    }

    #[test]
    fn test_plain_line_with_time() {
        let text = render(&[view(1, "pwd", true, Some("2024-01-01"))]);
        assert_eq!(text, "!1     (2024-01-01) *  pwd\n");
    }

    #[test]
    fn test_bookmarks_are_aligned() {
        let bookmarks = vec![
            BookmarkView {
                name: "b".to_string(),
                command: "make".to_string(),
            },
            BookmarkView {
                name: "build".to_string(),
                command: "cargo build".to_string(),
            },
        ];
        let mut out = Vec::new();
        render_bookmarks(&mut out, &bookmarks, OutputFormat::Plain).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "b        make\nbuild    cargo build\n"
        );
    }
}
