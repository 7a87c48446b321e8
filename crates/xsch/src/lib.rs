//! Public facade over the schematic-to-netlist pipeline: load a schematic
//! and its symbols, then generate a SPICE-compatible netlist from it.

pub use xsch_config::{parse_xschemrc, SearchPathProvider, StaticPaths, XschemrcProvider};
pub use xsch_model::{Instance, Pin, PinDirection, Schematic, Symbol, SymbolType, Text, Wire};
pub use xsch_netlist::generate_netlist;
pub use xsch_parser::{fallback_symbol, load, resolve_symbol_path};
pub use xsch_types::{transform, Error, Point};
