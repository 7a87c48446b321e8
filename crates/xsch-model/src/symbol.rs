use xsch_types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    In,
    Out,
    InOut,
}

impl Default for PinDirection {
    fn default() -> Self {
        PinDirection::InOut
    }
}

impl PinDirection {
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in" => PinDirection::In,
            "out" => PinDirection::Out,
            _ => PinDirection::InOut,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            PinDirection::In => "I",
            PinDirection::Out => "O",
            PinDirection::InOut => "B",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pin {
    pub name: String,
    pub direction: PinDirection,
    pub pos: Point,
}

/// The closed set of symbol kinds this system understands. Unrecognized
/// `type=` strings default to `Subcircuit`, the conservative choice since a
/// subcircuit call is emitted verbatim without special casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    Subcircuit,
    Nmos,
    Pmos,
    Resistor,
    Capacitor,
    IPin,
    OPin,
    IoPin,
    Label,
    NetLabel,
    NetName,
    Title,
    Logo,
    Graphic,
    Primitive,
}

impl Default for SymbolType {
    fn default() -> Self {
        SymbolType::Subcircuit
    }
}

impl SymbolType {
    pub fn from_type_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nmos" => SymbolType::Nmos,
            "pmos" => SymbolType::Pmos,
            "resistor" => SymbolType::Resistor,
            "capacitor" => SymbolType::Capacitor,
            "ipin" => SymbolType::IPin,
            "opin" => SymbolType::OPin,
            "iopin" => SymbolType::IoPin,
            "label" => SymbolType::Label,
            "netlabel" => SymbolType::NetLabel,
            "net_name" => SymbolType::NetName,
            "title" => SymbolType::Title,
            "logo" => SymbolType::Logo,
            "graphic" => SymbolType::Graphic,
            "primitive" => SymbolType::Primitive,
            _ => SymbolType::Subcircuit,
        }
    }

    /// True for the port-role types whose instances never appear as netlist
    /// body lines and whose `lab` property names an external port.
    pub fn is_port(&self) -> bool {
        matches!(self, SymbolType::IPin | SymbolType::OPin | SymbolType::IoPin)
    }

    /// True for types skipped outright during instance emission.
    pub fn is_emission_skip(&self) -> bool {
        matches!(
            self,
            SymbolType::IPin
                | SymbolType::OPin
                | SymbolType::IoPin
                | SymbolType::Label
                | SymbolType::NetLabel
                | SymbolType::NetName
                | SymbolType::Title
                | SymbolType::Logo
                | SymbolType::Graphic
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Symbol {
    pub sym_type: SymbolType,
    pub format: String,
    pub template: String,
    pub props: String,
    pub pins: Vec<Pin>,
    pub bbox: (Point, Point),
}
