pub mod props;
pub mod schematic;
pub mod symbol;

pub use schematic::{Instance, Schematic, Text, Wire};
pub use symbol::{Pin, PinDirection, Symbol, SymbolType};

pub use xsch_types::{Error, Point};
