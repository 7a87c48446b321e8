//! The tagged-record grammar shared by schematic and symbol files.
//!
//! Tags `v K G V S E N C T` are consumed semantically. `L A B P` are
//! graphics and are skipped line-wise (except `B` in a symbol file at
//! layer 5, which is a pin). `#` starts a line comment. `[...]` is a
//! balanced, possibly nested block that is always discarded. Any other
//! tag is skipped. A record that fails to parse its expected fields is
//! abandoned (skip to end of line) without aborting the file.

use log::warn;
use xsch_model::{Instance, Pin, PinDirection, Schematic, Symbol, Text, Wire};
use xsch_types::Point;

use crate::reader::Reader;

pub fn parse_schematic_content(content: &str, filename: &str) -> Schematic {
    let mut schem = Schematic::new(filename);
    let mut r = Reader::new(content);

    loop {
        r.skip_ws();
        let Some(tag) = r.peek() else { break };

        match tag {
            '#' => r.skip_to_eol(),
            '[' => {
                r.bump();
                r.skip_bracket_block();
            }
            'v' => {
                r.bump();
                let v = r.read_braced();
                if v.is_empty() {
                    r.skip_to_eol();
                } else {
                    schem.version = v;
                }
            }
            'K' => {
                r.bump();
                schem.k_props = r.read_braced();
            }
            'G' => {
                r.bump();
                schem.g_props = r.read_braced();
            }
            'V' => {
                r.bump();
                schem.v_props = r.read_braced();
            }
            'S' => {
                r.bump();
                schem.s_props = r.read_braced();
            }
            'E' => {
                r.bump();
                schem.e_props = r.read_braced();
            }
            'N' => {
                r.bump();
                let checkpoint = r.checkpoint();
                if let Some(wire) = parse_wire(&mut r) {
                    schem.wires.push(wire);
                } else {
                    warn!("malformed wire record in {}, skipping", schem.filename);
                    r.restore(checkpoint);
                    r.skip_to_eol();
                }
            }
            'C' => {
                r.bump();
                let checkpoint = r.checkpoint();
                if let Some(inst) = parse_instance(&mut r) {
                    schem.instances.push(inst);
                } else {
                    warn!("malformed instance record in {}, skipping", schem.filename);
                    r.restore(checkpoint);
                    r.skip_to_eol();
                }
            }
            'T' => {
                r.bump();
                let checkpoint = r.checkpoint();
                if let Some(text) = parse_text(&mut r) {
                    schem.texts.push(text);
                } else {
                    warn!("malformed text record in {}, skipping", schem.filename);
                    r.restore(checkpoint);
                    r.skip_to_eol();
                }
            }
            'L' | 'A' | 'B' | 'P' => {
                r.bump();
                r.skip_to_eol();
                r.read_braced();
            }
            _ => r.skip_to_eol(),
        }
    }

    schem
}

/// `N x1 y1 x2 y2 {props}`
fn parse_wire(r: &mut Reader) -> Option<Wire> {
    let x1 = r.read_f64()?;
    let y1 = r.read_f64()?;
    let x2 = r.read_f64()?;
    let y2 = r.read_f64()?;
    let props = r.read_braced();
    let is_bus = xsch_model::props::get(&props, "bus") == "true";
    Some(Wire {
        p1: Point::new(x1, y1),
        p2: Point::new(x2, y2),
        props,
        is_bus,
        node: String::new(),
    })
}

/// `C {symbol_ref} x y rot flip {props}`
fn parse_instance(r: &mut Reader) -> Option<Instance> {
    r.skip_ws();
    if r.peek() != Some('{') {
        return None;
    }
    let symbol_ref = r.read_braced();
    let x = r.read_f64()?;
    let y = r.read_f64()?;
    let rot = r.read_u8()?;
    let flip = r.read_u8()?;
    let props = r.read_braced();
    let prop_map = xsch_model::props::parse_all(&props);
    let name = prop_map.get("name").cloned().unwrap_or_default();

    Some(Instance {
        symbol_ref,
        name,
        pos: Point::new(x, y),
        rot,
        flip,
        props,
        prop_map,
        connected_nets: Vec::new(),
    })
}

/// `T {text} x y rot flip xscale yscale {props}`
fn parse_text(r: &mut Reader) -> Option<Text> {
    r.skip_ws();
    if r.peek() != Some('{') {
        return None;
    }
    let text = r.read_braced();
    let x = r.read_f64()?;
    let y = r.read_f64()?;
    let rot = r.read_u8()?;
    let flip = r.read_u8()?;
    let xscale = r.read_f64()?;
    let yscale = r.read_f64()?;
    let props = r.read_braced();

    Some(Text {
        text,
        pos: Point::new(x, y),
        rot,
        flip,
        xscale,
        yscale,
        props,
    })
}

pub fn parse_symbol_content(content: &str) -> Symbol {
    let mut sym = Symbol::default();
    let mut r = Reader::new(content);

    loop {
        r.skip_ws();
        let Some(tag) = r.peek() else { break };

        match tag {
            '#' => r.skip_to_eol(),
            '[' => {
                r.bump();
                r.skip_bracket_block();
            }
            'v' => {
                r.bump();
                r.read_braced();
            }
            'K' => {
                r.bump();
                let block = r.read_braced();
                let map = xsch_model::props::parse_all(&block);
                if let Some(t) = map.get("type") {
                    sym.sym_type = xsch_model::SymbolType::from_type_str(t);
                }
                sym.format = map.get("format").cloned().unwrap_or_default();
                sym.template = map.get("template").cloned().unwrap_or_default();
                sym.props = block;
            }
            'B' => {
                r.bump();
                let checkpoint = r.checkpoint();
                let Some(layer) = r.read_token() else {
                    r.restore(checkpoint);
                    r.skip_to_eol();
                    continue;
                };
                let fields = (r.read_f64(), r.read_f64(), r.read_f64(), r.read_f64());
                let (Some(x1), Some(y1), Some(x2), Some(y2)) = fields else {
                    warn!("malformed geometry in B record, skipping");
                    r.restore(checkpoint);
                    r.skip_to_eol();
                    continue;
                };
                let props = r.read_braced();

                if layer == "5" {
                    let map = xsch_model::props::parse_all(&props);
                    let name = map.get("name").cloned().unwrap_or_default();
                    let dir = PinDirection::from_str_loose(
                        map.get("dir").map(String::as_str).unwrap_or(""),
                    );
                    let mid = Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
                    sym.pins.push(Pin {
                        name,
                        direction: dir,
                        pos: mid,
                    });
                } else {
                    update_bbox(&mut sym, Point::new(x1, y1));
                    update_bbox(&mut sym, Point::new(x2, y2));
                }
            }
            'G' | 'V' | 'S' | 'E' | 'N' | 'C' | 'T' | 'L' | 'A' | 'P' => {
                r.bump();
                r.skip_to_eol();
            }
            _ => r.skip_to_eol(),
        }
    }

    sym
}

fn update_bbox(sym: &mut Symbol, p: Point) {
    let (lo, hi) = sym.bbox;
    sym.bbox = (
        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
    );
}
