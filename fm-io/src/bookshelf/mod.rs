//! Parsing for the Bookshelf-like `.aux`/`.nodes`/`.nets` text format.

pub mod aux;
pub mod nets;
pub mod nodes;

use std::path::Path;

use fm_core::{CircuitModel, Diagnostics, FmError, FmResult};
use tracing::info;

/// Load a complete [`CircuitModel`] starting from a `.aux` file, resolving
/// the `.nodes`/`.nets` paths it names and parsing both.
pub fn load_circuit(aux_path: impl AsRef<Path>) -> FmResult<(CircuitModel, Diagnostics)> {
    let aux_path = aux_path.as_ref();
    let (nodes_path, nets_path) = aux::resolve_paths(aux_path)?;

    info!(
        aux = %aux_path.display(),
        nodes = %nodes_path.display(),
        nets = %nets_path.display(),
        "resolved Bookshelf file set"
    );

    let mut diagnostics = Diagnostics::new();
    let cells = nodes::parse_nodes_file(&nodes_path, &mut diagnostics)?;
    let nets_map = nets::parse_nets_file(&nets_path, &mut diagnostics)?;

    let mut model = CircuitModel::new();
    for cell in cells {
        if model.cell(&cell.name).is_some() {
            diagnostics.add_warning(
                "ingest",
                format!("duplicate cell name '{}', last write wins", cell.name),
            );
        }
        model.insert_cell(cell);
    }
    for net in nets_map {
        if model.net(&net.name).is_some() {
            diagnostics.add_warning(
                "ingest",
                format!("duplicate net name '{}', last write wins", net.name),
            );
        }
        model.insert_net(net);
    }

    if model.cells().is_empty() {
        return Err(FmError::InputMalformed(format!(
            "no cells parsed from {}",
            nodes_path.display()
        )));
    }

    Ok((model, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_nodes_file_is_malformed() {
        let dir = tempdir().unwrap();
        let aux = dir.path().join("case.aux");
        let nodes = dir.path().join("case.nodes");
        let nets = dir.path().join("case.nets");
        fs::write(&aux, "case.nodes case.nets\n").unwrap();
        fs::write(&nodes, "UCLA nodes 1.0\n").unwrap();
        fs::write(&nets, "UCLA nets 1.0\n").unwrap();

        let err = load_circuit(&aux).unwrap_err();
        assert!(matches!(err, FmError::InputMalformed(_)));
    }
}
