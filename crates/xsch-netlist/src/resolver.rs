//! Phase 1: point incidence via multimaps. Phase 2: union-find (required
//! path compression) groups wires that share an endpoint into nets. Phase
//! 3: naming, in precedence order — an explicit wire `lab` property, then
//! a label-instance found at either endpoint, then a synthesized
//! `net<k>`; points are named from their wire group, or synthesized when
//! two or more pins coincide with no wire; unconnected pins fall back to
//! `NC_<instance>_<pin>`.

use indexmap::IndexMap;
use xsch_model::{props, Schematic, SymbolType};
use xsch_types::{transform::place_pin, Point};

use crate::union_find::UnionFind;

const LABEL_SUBSTRINGS: [&str; 5] = ["lab_pin", "lab_wire", "vdd", "gnd", "vss"];

struct PlacedPin {
    inst_idx: usize,
    pin_idx: usize,
    point: Point,
}

fn is_label_instance(symbol_ref: &str, sym_type: SymbolType) -> bool {
    if sym_type == SymbolType::Label {
        return true;
    }
    let lower = symbol_ref.to_lowercase();
    LABEL_SUBSTRINGS.iter().any(|s| lower.contains(s))
}

/// Resolves all connectivity in `schema`, assigning `Wire::node` and
/// `Instance::connected_nets` in place. Resets the net counter, so the
/// result is deterministic across repeated calls on the same input.
pub fn resolve(schema: &mut Schematic) {
    schema.reset_net_counter();

    let n_wires = schema.wires.len();
    let mut uf = UnionFind::new(n_wires);

    // Phase 1: point incidence for wires.
    let wire_pts: Vec<(Point, Point)> = schema.wires.iter().map(|w| (w.p1, w.p2)).collect();
    let wire_lab: Vec<String> = schema
        .wires
        .iter()
        .map(|w| props::get(&w.props, "lab"))
        .collect();

    let mut wire_points: IndexMap<Point, Vec<usize>> = IndexMap::new();
    for (i, (p1, p2)) in wire_pts.iter().enumerate() {
        wire_points.entry(*p1).or_default().push(i);
        wire_points.entry(*p2).or_default().push(i);
    }

    // Placed pin positions for every instance.
    let mut placed: Vec<PlacedPin> = Vec::new();
    let mut pin_counts: Vec<usize> = Vec::with_capacity(schema.instances.len());
    let mut inst_is_label: Vec<bool> = Vec::with_capacity(schema.instances.len());
    let mut inst_label_text: Vec<String> = Vec::with_capacity(schema.instances.len());
    let mut inst_names: Vec<String> = Vec::with_capacity(schema.instances.len());

    for (i, inst) in schema.instances.iter().enumerate() {
        inst_names.push(inst.name.clone());
        let sym = schema.symbols.get(&inst.symbol_ref);
        let sym_type = sym.map(|s| s.sym_type).unwrap_or_default();
        inst_is_label.push(is_label_instance(&inst.symbol_ref, sym_type));
        inst_label_text.push(props::get(&inst.props, "lab"));

        let pin_count = sym.map(|s| s.pins.len()).unwrap_or(0);
        pin_counts.push(pin_count);

        if let Some(sym) = sym {
            for (j, pin) in sym.pins.iter().enumerate() {
                let point = place_pin(inst.pos, (pin.pos.x, pin.pos.y), inst.rot, inst.flip);
                placed.push(PlacedPin {
                    inst_idx: i,
                    pin_idx: j,
                    point,
                });
            }
        }
    }

    let mut pin_points: IndexMap<Point, Vec<usize>> = IndexMap::new();
    for (k, p) in placed.iter().enumerate() {
        pin_points.entry(p.point).or_default().push(k);
    }

    // Phase 2: union wires that share an endpoint.
    for idxs in wire_points.values() {
        if idxs.len() >= 2 {
            let first = idxs[0];
            for &other in &idxs[1..] {
                uf.union(first, other);
            }
        }
    }

    // Phase 3.1: explicit wire `lab` property, first writer per group wins.
    let mut group_name: IndexMap<usize, String> = IndexMap::new();
    for (i, lab) in wire_lab.iter().enumerate() {
        if lab.is_empty() {
            continue;
        }
        let root = uf.find(i);
        group_name.entry(root).or_insert_with(|| lab.clone());
    }

    // Label text reachable at a given point, from any label instance placed there.
    let mut label_at_point: IndexMap<Point, String> = IndexMap::new();
    for p in &placed {
        if inst_is_label[p.inst_idx] {
            let lab = &inst_label_text[p.inst_idx];
            if !lab.is_empty() {
                label_at_point.entry(p.point).or_insert_with(|| lab.clone());
            }
        }
    }

    // Phase 3.1b: groups still unnamed inherit a label found at either endpoint.
    for (i, (p1, p2)) in wire_pts.iter().enumerate() {
        let root = uf.find(i);
        if group_name.contains_key(&root) {
            continue;
        }
        if let Some(l) = label_at_point.get(p1).or_else(|| label_at_point.get(p2)) {
            group_name.insert(root, l.clone());
        }
    }

    // Phase 3.2: remaining groups get a synthesized name, in file order.
    for i in 0..n_wires {
        let root = uf.find(i);
        if !group_name.contains_key(&root) {
            let name = schema.next_net_name();
            group_name.insert(root, name);
        }
    }

    for i in 0..n_wires {
        let root = uf.find(i);
        schema.wires[i].node = group_name[&root].clone();
    }

    // Phase 3.3: point names — inherited from wire group, else synthesized
    // for two or more coincident pins with no wire, else left unnamed.
    let mut point_name: IndexMap<Point, String> = IndexMap::new();
    for (pt, idxs) in wire_points.iter() {
        let root = uf.find(idxs[0]);
        point_name.insert(*pt, group_name[&root].clone());
    }
    for (pt, pin_idxs) in pin_points.iter() {
        if point_name.contains_key(pt) {
            continue;
        }
        if let Some(l) = label_at_point.get(pt) {
            point_name.insert(*pt, l.clone());
        } else if pin_idxs.len() >= 2 {
            let name = schema.next_net_name();
            point_name.insert(*pt, name);
        }
    }

    // Phase 4: pin assignment, falling back to the NC sentinel.
    for (idx, inst) in schema.instances.iter_mut().enumerate() {
        inst.connected_nets = vec![String::new(); pin_counts[idx]];
    }
    for p in &placed {
        let net = point_name
            .get(&p.point)
            .cloned()
            .or_else(|| label_at_point.get(&p.point).cloned())
            .unwrap_or_else(|| {
                format!(
                    "NC_{}_{}",
                    inst_names[p.inst_idx],
                    pin_name_for(schema, p.inst_idx, p.pin_idx)
                )
            });
        schema.instances[p.inst_idx].connected_nets[p.pin_idx] = net;
    }
}

fn pin_name_for(schema: &Schematic, inst_idx: usize, pin_idx: usize) -> String {
    let symbol_ref = &schema.instances[inst_idx].symbol_ref;
    schema
        .symbols
        .get(symbol_ref)
        .and_then(|s| s.pins.get(pin_idx))
        .map(|p| p.name.clone())
        .unwrap_or_default()
}
