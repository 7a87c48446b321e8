pub mod emitter;
pub mod resolver;
pub mod union_find;

use std::io::Write;

use xsch_model::Schematic;

/// Runs the Resolver and then the Emitter over `schema`. Safe to call
/// repeatedly on the same schematic: the net counter is reset on every
/// call, so output is byte-identical for the same inputs.
pub fn generate_netlist(
    schema: &mut Schematic,
    out: &mut dyn Write,
    subcircuit_mode: bool,
    top_cell_name: Option<&str>,
) -> std::io::Result<()> {
    resolver::resolve(schema);
    emitter::generate(schema, out, subcircuit_mode, top_cell_name)
}
