//! Fallback-symbol synthesis: when a symbol file cannot be found, a
//! placeholder `Symbol` is built from a substring match against the
//! reference string, never an error.

use xsch_model::{Pin, PinDirection, Symbol, SymbolType};
use xsch_types::Point;

pub fn classify(symbol_ref: &str) -> SymbolType {
    let lower = symbol_ref.to_lowercase();

    if lower.contains("nmos") || lower.contains("nfet") {
        SymbolType::Nmos
    } else if lower.contains("pmos") || lower.contains("pfet") {
        SymbolType::Pmos
    } else if lower.contains("res") {
        SymbolType::Resistor
    } else if lower.contains("cap") {
        SymbolType::Capacitor
    } else if lower.contains("iopin") {
        SymbolType::IoPin
    } else if lower.contains("ipin") {
        SymbolType::IPin
    } else if lower.contains("opin") {
        SymbolType::OPin
    } else if ["lab_pin", "lab_wire", "vdd", "gnd", "vss"]
        .iter()
        .any(|s| lower.contains(s))
    {
        SymbolType::Label
    } else {
        SymbolType::Subcircuit
    }
}

fn pin(name: &str, x: f64, y: f64, dir: PinDirection) -> Pin {
    Pin {
        name: name.to_string(),
        direction: dir,
        pos: Point::new(x, y),
    }
}

/// Synthesizes a placeholder symbol with canonical pin geometry for its
/// classified type. The format string is left empty so the emitter applies
/// its built-in per-type default.
pub fn fallback_symbol(symbol_ref: &str) -> Symbol {
    use PinDirection::{In, InOut, Out};

    let sym_type = classify(symbol_ref);
    let pins = match sym_type {
        SymbolType::Nmos | SymbolType::Pmos => vec![
            pin("D", 0.0, -30.0, InOut),
            pin("G", -20.0, 0.0, In),
            pin("S", 0.0, 30.0, InOut),
            pin("B", 20.0, 0.0, InOut),
        ],
        SymbolType::Resistor | SymbolType::Capacitor => {
            vec![pin("P", 0.0, -30.0, InOut), pin("M", 0.0, 30.0, InOut)]
        }
        SymbolType::IPin => vec![pin("p", 0.0, 0.0, In)],
        SymbolType::OPin => vec![pin("p", 0.0, 0.0, Out)],
        SymbolType::IoPin => vec![pin("p", 0.0, 0.0, InOut)],
        SymbolType::Label => vec![pin("p", 0.0, 0.0, InOut)],
        SymbolType::Subcircuit
        | SymbolType::NetLabel
        | SymbolType::NetName
        | SymbolType::Title
        | SymbolType::Logo
        | SymbolType::Graphic
        | SymbolType::Primitive => Vec::new(),
    };

    Symbol {
        sym_type,
        format: String::new(),
        template: String::new(),
        props: String::new(),
        pins,
        bbox: (Point::new(0.0, 0.0), Point::new(0.0, 0.0)),
    }
}
