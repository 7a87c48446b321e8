//! Header, instance emission, and trailer. Format strings are expanded by
//! an `@`-token character scan (never a regex substitution, to avoid a
//! `@#n:...` pin-order hint being mistaken for a token).

use std::io::{self, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::warn;
use xsch_model::{props, Instance, Schematic, Symbol, SymbolType};

pub fn generate(
    schema: &Schematic,
    out: &mut dyn Write,
    subcircuit_mode: bool,
    top_cell_name: Option<&str>,
) -> io::Result<()> {
    let cell = top_cell_name
        .map(str::to_string)
        .unwrap_or_else(|| cell_stem(&schema.filename));

    writeln!(out, "* {}", schema.filename)?;

    if subcircuit_mode {
        emit_subckt_header(schema, out, &cell)?;
    } else {
        writeln!(out, "** {cell}")?;
    }

    for inst in &schema.instances {
        emit_instance(schema, inst, out)?;
    }

    if subcircuit_mode {
        writeln!(out, ".ends")?;
    }
    writeln!(out, ".end")?;
    Ok(())
}

fn emit_subckt_header(schema: &Schematic, out: &mut dyn Write, cell: &str) -> io::Result<()> {
    let mut ports: Vec<(String, &'static str)> = Vec::new();
    for inst in &schema.instances {
        let Some(sym) = schema.symbols.get(&inst.symbol_ref) else {
            continue;
        };
        let dir = match sym.sym_type {
            SymbolType::IPin => "I",
            SymbolType::OPin => "O",
            SymbolType::IoPin => "B",
            _ => continue,
        };
        let port_name = props::get(&inst.props, "lab");
        ports.push((port_name, dir));
    }

    let mut header = vec![".subckt".to_string(), cell.to_string()];
    header.extend(ports.iter().map(|(n, _)| n.clone()));
    writeln!(out, "{}", header.join(" "))?;

    for (name, dir) in &ports {
        writeln!(out, "*.PININFO {name}:{dir}")?;
    }
    Ok(())
}

fn emit_instance(schema: &Schematic, inst: &Instance, out: &mut dyn Write) -> io::Result<()> {
    let Some(sym) = schema.symbols.get(&inst.symbol_ref) else {
        warn!(
            "instance {} references unresolved symbol {}, skipping emission",
            inst.name, inst.symbol_ref
        );
        return Ok(());
    };
    if sym.sym_type.is_emission_skip() {
        return Ok(());
    }
    let lower_ref = inst.symbol_ref.to_lowercase();
    if lower_ref.contains("title") || lower_ref.contains("ammeter") {
        return Ok(());
    }

    let fmt = if sym.format.is_empty() {
        default_format(sym.sym_type).to_string()
    } else {
        sym.format.clone()
    };

    let expanded = expand_format(&fmt, inst, sym);
    writeln!(out, "{}", collapse_spaces(&expanded))
}

fn default_format(t: SymbolType) -> &'static str {
    match t {
        SymbolType::Nmos | SymbolType::Pmos => "@name @pinlist @model w=@w l=@l m=@m",
        SymbolType::Resistor => "@name @pinlist @value m=@m",
        SymbolType::Capacitor => "@name @pinlist @value m=@m",
        SymbolType::Subcircuit => "@name @pinlist @symname",
        _ => "@name @pinlist @value",
    }
}

fn expand_format(fmt: &str, inst: &Instance, sym: &Symbol) -> String {
    let template_map = props::parse_all(&sym.template);
    let mut out = String::new();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '@' {
            out.push(c);
            continue;
        }
        let mut token = String::new();
        while let Some(&c2) = chars.peek() {
            if c2.is_ascii_alphanumeric() || c2 == '_' {
                token.push(c2);
                chars.next();
            } else {
                break;
            }
        }
        out.push_str(&resolve_token(&token, inst, sym, &template_map));
    }
    out
}

fn resolve_token(
    token: &str,
    inst: &Instance,
    sym: &Symbol,
    template_map: &IndexMap<String, String>,
) -> String {
    match token {
        "name" => inst.name.clone(),
        "pinlist" => inst.connected_nets.join(" "),
        "symname" => symname_stem(&inst.symbol_ref),
        "spiceprefix" => lookup(inst, template_map, "spiceprefix"),
        "extra" => lookup(inst, template_map, "extra"),
        _ => lookup(inst, template_map, token),
    }
}

fn lookup(inst: &Instance, template_map: &IndexMap<String, String>, key: &str) -> String {
    inst.prop_map
        .get(key)
        .cloned()
        .or_else(|| template_map.get(key).cloned())
        .unwrap_or_default()
}

fn symname_stem(symbol_ref: &str) -> String {
    Path::new(symbol_ref)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| symbol_ref.to_string())
}

fn cell_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string())
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsch_model::{Pin, PinDirection};
    use xsch_types::Point;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn pin(name: &str) -> Pin {
        Pin {
            name: name.to_string(),
            direction: PinDirection::InOut,
            pos: Point::new(0.0, 0.0),
        }
    }

    #[test]
    fn instance_with_no_resolved_symbol_is_skipped_not_fatal() {
        init();
        let mut schem = Schematic::new("top.sch");
        schem.instances.push(Instance {
            symbol_ref: "never_loaded.sym".to_string(),
            name: "X1".to_string(),
            ..Default::default()
        });
        let mut buf = Vec::new();
        generate(&schem, &mut buf, false, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("X1"));
    }

    #[test]
    fn format_expansion_uses_instance_then_template_then_empty() {
        let mut sym = Symbol {
            template: "m=1".to_string(),
            ..Default::default()
        };
        sym.pins.push(pin("P"));
        let mut inst = Instance {
            symbol_ref: "res.sym".to_string(),
            name: "R1".to_string(),
            connected_nets: vec!["VCC".to_string()],
            ..Default::default()
        };
        inst.prop_map.insert("value".to_string(), "10k".to_string());

        let out = expand_format("@name @pinlist @value m=@m @missing", &inst, &sym);
        assert_eq!(out, "R1 VCC 10k m=1 ");
    }

    #[test]
    fn subckt_header_collects_ports_in_file_order() {
        let mut schem = Schematic::new("inv.sch");
        schem.symbols.insert(
            "ipin.sym".to_string(),
            Symbol {
                sym_type: SymbolType::IPin,
                ..Default::default()
            },
        );
        schem.symbols.insert(
            "opin.sym".to_string(),
            Symbol {
                sym_type: SymbolType::OPin,
                ..Default::default()
            },
        );
        schem.instances.push(Instance {
            symbol_ref: "ipin.sym".to_string(),
            props: "lab=IN".to_string(),
            ..Default::default()
        });
        schem.instances.push(Instance {
            symbol_ref: "opin.sym".to_string(),
            props: "lab=OUT".to_string(),
            ..Default::default()
        });

        let mut buf = Vec::new();
        generate(&schem, &mut buf, true, Some("inv")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(".subckt inv IN OUT"));
        assert!(text.contains("*.PININFO IN:I"));
        assert!(text.contains("*.PININFO OUT:O"));
        assert!(text.ends_with(".ends\n.end\n"));
    }

    #[test]
    fn flat_mode_skips_subckt_and_ends() {
        let schem = Schematic::new("top.sch");
        let mut buf = Vec::new();
        generate(&schem, &mut buf, false, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("** top"));
        assert!(!text.contains(".subckt"));
        assert!(!text.contains(".ends"));
        assert!(text.ends_with(".end\n"));
    }

    #[test]
    fn title_and_ammeter_refs_are_skipped() {
        let mut schem = Schematic::new("top.sch");
        schem.symbols.insert("title_block.sym".to_string(), Symbol::default());
        schem.instances.push(Instance {
            symbol_ref: "title_block.sym".to_string(),
            name: "TITLEBLOCK0".to_string(),
            ..Default::default()
        });
        let mut buf = Vec::new();
        generate(&schem, &mut buf, false, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("TITLEBLOCK0"));
    }
}
