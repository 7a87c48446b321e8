use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::warn;
use xsch_model::{Schematic, Symbol};
use xsch_types::Error;

use crate::fallback::fallback_symbol;
use crate::records::{parse_schematic_content, parse_symbol_content};
use crate::resolve_path::resolve_symbol_path;

/// Loads a schematic file and every symbol its instances reference. A
/// failure to open the schematic itself is the one unrecoverable error in
/// this pipeline; a missing or unreadable symbol file is never an error,
/// it falls back to a synthesized placeholder.
pub fn load(path: &Path, search_paths: &[PathBuf]) -> Result<Schematic, Error> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::new("io", format!("cannot open {}: {e}", path.display())))?;

    let filename = path.to_string_lossy().to_string();
    let mut schem = parse_schematic_content(&content, &filename);

    let schematic_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let needed: IndexSet<String> = schem
        .instances
        .iter()
        .map(|inst| inst.symbol_ref.clone())
        .collect();

    for symbol_ref in needed {
        if schem.symbols.contains_key(&symbol_ref) {
            continue;
        }
        let sym = load_symbol(&symbol_ref, search_paths, schematic_dir);
        schem.symbols.insert(symbol_ref, sym);
    }

    Ok(schem)
}

fn load_symbol(symbol_ref: &str, search_paths: &[PathBuf], schematic_dir: &Path) -> Symbol {
    match resolve_symbol_path(symbol_ref, search_paths, schematic_dir) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(content) => parse_symbol_content(&content),
            Err(e) => {
                warn!(
                    "symbol file {} could not be read ({e}), using fallback symbol for {symbol_ref}",
                    path.display()
                );
                fallback_symbol(symbol_ref)
            }
        },
        None => {
            warn!("symbol {symbol_ref} not found in any search path, using fallback symbol");
            fallback_symbol(symbol_ref)
        }
    }
}
