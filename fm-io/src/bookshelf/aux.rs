//! `.aux` file resolution: which `.nodes`/`.nets` files this run reads.

use std::fs;
use std::path::{Path, PathBuf};

use fm_core::FmError;

/// Scan every whitespace-separated token on every line of the `.aux` file
/// and take the first token ending in `.nodes` and the first ending in
/// `.nets`, both resolved relative to the `.aux` file's own directory.
pub fn resolve_paths(aux_path: &Path) -> Result<(PathBuf, PathBuf), FmError> {
    let content = fs::read_to_string(aux_path)
        .map_err(|_| FmError::InputNotFound(aux_path.display().to_string()))?;

    let dir = aux_path.parent().unwrap_or_else(|| Path::new("."));

    let mut nodes_file = None;
    let mut nets_file = None;

    for line in content.lines() {
        for token in line.split_whitespace() {
            if nodes_file.is_none() && token.ends_with(".nodes") {
                nodes_file = Some(token.to_string());
            }
            if nets_file.is_none() && token.ends_with(".nets") {
                nets_file = Some(token.to_string());
            }
        }
    }

    let nodes_file = nodes_file.ok_or_else(|| {
        FmError::InputMalformed(format!(
            "{}: no .nodes token found",
            aux_path.display()
        ))
    })?;
    let nets_file = nets_file.ok_or_else(|| {
        FmError::InputMalformed(format!("{}: no .nets token found", aux_path.display()))
    })?;

    Ok((dir.join(nodes_file), dir.join(nets_file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn picks_first_nodes_and_nets_token_across_any_line() {
        let dir = tempdir().unwrap();
        let aux = dir.path().join("example2.aux");
        fs::write(
            &aux,
            "RowBasedPlacement\nexample2.nodes\nexample2.nets example2.wts\n",
        )
        .unwrap();

        let (nodes, nets) = resolve_paths(&aux).unwrap();
        assert_eq!(nodes, dir.path().join("example2.nodes"));
        assert_eq!(nets, dir.path().join("example2.nets"));
    }

    #[test]
    fn missing_aux_file_is_not_found() {
        let err = resolve_paths(Path::new("/nonexistent/path.aux")).unwrap_err();
        assert!(matches!(err, FmError::InputNotFound(_)));
    }

    #[test]
    fn aux_without_nets_token_is_malformed() {
        let dir = tempdir().unwrap();
        let aux = dir.path().join("case.aux");
        fs::write(&aux, "case.nodes\n").unwrap();
        let err = resolve_paths(&aux).unwrap_err();
        assert!(matches!(err, FmError::InputMalformed(_)));
    }
}
