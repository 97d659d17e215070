//! `.nodes` file parsing.

use std::fs;
use std::path::Path;

use fm_core::{Cell, CellKind, Diagnostics, FmError};

/// Parse a `.nodes` file: one cell per non-header, non-blank line of the
/// form `<name> <width> <height> [terminal|terminal_NI]`.
pub fn parse_nodes_file(path: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Cell>, FmError> {
    let content = fs::read_to_string(path)
        .map_err(|_| FmError::InputNotFound(path.display().to_string()))?;

    let mut cells = Vec::new();

    for (line_no, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if is_header_or_blank(line) {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let name = match tokens.next() {
            Some(n) => n,
            None => continue,
        };
        let width: u32 = match tokens.next().and_then(|t| t.parse().ok()) {
            Some(w) => w,
            None => {
                diagnostics.add(
                    fm_core::DiagnosticIssue::new(
                        fm_core::Severity::Error,
                        "nodes",
                        format!("line {}: missing or non-integer width", line_no + 1),
                    )
                    .with_line(line_no + 1),
                );
                continue;
            }
        };
        let height: u32 = match tokens.next().and_then(|t| t.parse().ok()) {
            Some(h) => h,
            None => {
                diagnostics.add(
                    fm_core::DiagnosticIssue::new(
                        fm_core::Severity::Error,
                        "nodes",
                        format!("line {}: missing or non-integer height", line_no + 1),
                    )
                    .with_line(line_no + 1),
                );
                continue;
            }
        };

        let kind = match tokens.next() {
            Some("terminal") => CellKind::Terminal,
            Some("terminal_NI") => CellKind::TerminalNI,
            Some(other) => {
                diagnostics.add_warning(
                    "nodes",
                    format!("line {}: unrecognized flag '{other}', treating as Regular", line_no + 1),
                );
                CellKind::Regular
            }
            None => CellKind::Regular,
        };

        cells.push(Cell::new(name, width, height, kind));
    }

    Ok(cells)
}

/// Header/blank-line skip rule of spec §6: empty lines, or lines containing
/// `UCLA`, `NumNodes`, or `NumTerminals`.
fn is_header_or_blank(line: &str) -> bool {
    line.is_empty()
        || line.contains("UCLA")
        || line.contains("NumNodes")
        || line.contains("NumTerminals")
}
