//! `.nets` file parsing.

use std::fs;
use std::path::Path;

use fm_core::{Diagnostics, FmError, Net, Pin};

/// Parse a `.nets` file: a sequence of `NetDegree : <k> <name>` blocks, each
/// followed by `k` pin lines `<cell> <dir> : <x> <y>` (coordinates
/// discarded).
pub fn parse_nets_file(path: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Net>, FmError> {
    let content = fs::read_to_string(path)
        .map_err(|_| FmError::InputNotFound(path.display().to_string()))?;

    let mut nets = Vec::new();
    let mut current: Option<(String, usize, Vec<Pin>)> = None;

    for (line_no, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if is_header_or_blank(line) {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let first = match tokens.next() {
            Some(t) => t,
            None => continue,
        };

        if first == "NetDegree" {
            if let Some((name, remaining, pins)) = current.take() {
                if remaining != 0 {
                    diagnostics.add_warning(
                        "nets",
                        format!("net '{name}' ended {remaining} pin(s) short of its declared degree"),
                    );
                }
                nets.push(Net::new(name, pins));
            }

            // Remaining tokens on this line: ":" <k> <netName>.
            let malformed = || {
                FmError::InputMalformed(format!(
                    "{}:{}: malformed NetDegree line",
                    path.display(),
                    line_no + 1
                ))
            };
            let colon = tokens.next().ok_or_else(malformed)?;
            if colon != ":" {
                return Err(malformed());
            }
            let k: usize = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(malformed)?;
            let net_name = tokens.next().ok_or_else(malformed)?;

            current = Some((net_name.to_string(), k, Vec::new()));
        } else if let Some((name, remaining, pins)) = current.as_mut() {
            let cell_name = first;
            let direction = tokens.next().unwrap_or("").to_string();
            // Remaining tokens are ":" <x> <y>; both coordinates discarded.
            pins.push(Pin::new(cell_name, direction));
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                nets.push(Net::new(name.clone(), std::mem::take(pins)));
                current = None;
            }
        } else {
            diagnostics.add_warning(
                "nets",
                format!("line {}: pin line outside any NetDegree block, ignored", line_no + 1),
            );
        }
    }

    if let Some((name, remaining, pins)) = current {
        if remaining == 0 {
            nets.push(Net::new(name, pins));
        } else {
            diagnostics.add_warning(
                "nets",
                format!("net '{name}' truncated at end of file, {remaining} pin(s) missing"),
            );
            nets.push(Net::new(name, pins));
        }
    }

    Ok(nets)
}

/// Header/blank-line skip rule of spec §6: empty lines, lines containing
/// `UCLA`, `NumNets`, or `NumPins`, or lines starting with `#`.
fn is_header_or_blank(line: &str) -> bool {
    line.is_empty()
        || line.contains("UCLA")
        || line.contains("NumNets")
        || line.contains("NumPins")
        || line.starts_with('#')
}
