use indexmap::IndexMap;
use xsch_types::Point;

use crate::symbol::Symbol;

#[derive(Debug, Clone, Default)]
pub struct Wire {
    pub p1: Point,
    pub p2: Point,
    pub props: String,
    pub is_bus: bool,
    /// Assigned by the resolver; empty until `resolve()` has run.
    pub node: String,
}

#[derive(Debug, Clone, Default)]
pub struct Text {
    pub text: String,
    pub pos: Point,
    pub rot: u8,
    pub flip: u8,
    pub xscale: f64,
    pub yscale: f64,
    pub props: String,
}

#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub symbol_ref: String,
    pub name: String,
    pub pos: Point,
    pub rot: u8,
    pub flip: u8,
    pub props: String,
    pub prop_map: IndexMap<String, String>,
    /// Net name per pin, in symbol pin order. Populated by the resolver.
    pub connected_nets: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Schematic {
    pub filename: String,
    pub version: String,

    pub k_props: String,
    pub g_props: String,
    pub v_props: String,
    pub s_props: String,
    pub e_props: String,

    pub wires: Vec<Wire>,
    pub instances: Vec<Instance>,
    pub texts: Vec<Text>,

    pub symbols: IndexMap<String, Symbol>,

    pub net_counter: u32,
}

impl Schematic {
    pub fn new(filename: impl Into<String>) -> Self {
        Schematic {
            filename: filename.into(),
            ..Default::default()
        }
    }

    pub fn reset_net_counter(&mut self) {
        self.net_counter = 0;
    }

    pub fn next_net_name(&mut self) -> String {
        let name = format!("net{}", self.net_counter);
        self.net_counter += 1;
        name
    }
}
