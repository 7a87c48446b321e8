use std::path::{Path, PathBuf};

/// Search order: absolute path as given, then each search path joined with
/// the reference, then each search path joined with `<reference>.sym`, then
/// the schematic's own directory.
pub fn resolve_symbol_path(
    symbol_ref: &str,
    search_paths: &[PathBuf],
    schematic_dir: &Path,
) -> Option<PathBuf> {
    let as_given = Path::new(symbol_ref);
    if as_given.is_absolute() && as_given.exists() {
        return Some(as_given.to_path_buf());
    }

    for sp in search_paths {
        let candidate = sp.join(symbol_ref);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    if !symbol_ref.ends_with(".sym") {
        for sp in search_paths {
            let candidate = sp.join(format!("{symbol_ref}.sym"));
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    let candidate = schematic_dir.join(symbol_ref);
    if candidate.exists() {
        return Some(candidate);
    }

    None
}
