//! Minimal demonstration of the public API: load a schematic and print its
//! netlist to stdout. Flag parsing is intentionally bare-bones; a real
//! command-line front end is out of scope for this crate.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(schematic_path) = args.next() else {
        eprintln!("usage: xsch-demo <schematic.sch> [search_path ...]");
        std::process::exit(2);
    };
    let search_paths: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let mut schematic = match xsch::load(Path::new(&schematic_path), &search_paths) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error loading {schematic_path}: {e}");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = xsch::generate_netlist(&mut schematic, &mut handle, true, None) {
        eprintln!("error generating netlist: {e}");
        std::process::exit(1);
    }
}
