//! End-to-end scenarios exercising the full load -> resolve -> emit
//! pipeline against real files on disk, instead of unit-level structs.

use std::fs;
use std::path::Path;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn generate(sch_path: &Path, search_paths: &[std::path::PathBuf]) -> String {
    let mut schematic = xsch::load(sch_path, search_paths).expect("schematic should load");
    let mut buf = Vec::new();
    xsch::generate_netlist(&mut schematic, &mut buf, true, None).expect("netlist should generate");
    String::from_utf8(buf).expect("output should be valid utf-8")
}

#[test]
fn inverter_subcircuit_header_and_trailer() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let sch = dir.path().join("inv.sch");
    fs::write(
        &sch,
        "C {ipin} 0 0 0 0 {name=l1 lab=IN}\n\
         C {opin} 100 0 0 0 {name=l2 lab=OUT}\n",
    )
    .unwrap();

    let out = generate(&sch, &[]);
    assert!(out.starts_with("* "));
    assert!(out.contains(".subckt inv IN OUT"));
    assert!(out.contains("*.PININFO IN:I"));
    assert!(out.contains("*.PININFO OUT:O"));
    assert!(out.trim_end().ends_with(".ends\n.end".trim_end()));
}

#[test]
fn floating_pin_emits_nc_sentinel() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let sch = dir.path().join("float.sch");
    fs::write(&sch, "C {res_std} 0 0 0 0 {name=R1}\n").unwrap();

    let out = generate(&sch, &[]);
    assert!(out.contains("NC_R1_P"));
    assert!(out.contains("NC_R1_M"));
}

#[test]
fn rotated_instance_pin_lands_on_exact_coordinate() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let sch = dir.path().join("rot.sch");
    // nmos4 fallback pin D sits at offset (0,-30); anchor (100,100) rot=1
    // places it at (130,100), per the flip-then-rotate transform.
    fs::write(
        &sch,
        "C {nmos4} 100 100 1 0 {name=M1}\n\
         N 130 100 130 200 {lab=DRAIN_NET}\n",
    )
    .unwrap();

    let out = generate(&sch, &[]);
    assert!(out.contains("DRAIN_NET"));
}

#[test]
fn duplicate_explicit_labels_are_allowed_on_separate_groups() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let sch = dir.path().join("dup.sch");
    fs::write(
        &sch,
        "N 0 0 10 0 {lab=VCC}\n\
         N 100 0 110 0 {lab=VCC}\n",
    )
    .unwrap();

    let mut schematic = xsch::load(&sch, &[]).unwrap();
    xsch_netlist::resolver::resolve(&mut schematic);
    assert_eq!(schematic.wires[0].node, "VCC");
    assert_eq!(schematic.wires[1].node, "VCC");
}

#[test]
fn unknown_symbol_falls_back_to_subcircuit_format() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let sch = dir.path().join("unk.sch");
    fs::write(&sch, "C {my_custom_block} 0 0 0 0 {name=X1}\n").unwrap();

    let out = generate(&sch, &[]);
    assert!(out.contains("X1"));
    assert!(out.contains("my_custom_block"));
}

#[test]
fn format_expansion_falls_back_to_symbol_template() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir_all(&lib).unwrap();
    fs::write(
        lib.join("nmos4.sym"),
        "K {type=nmos format=\"@name @pinlist @model\" template=\"model=nfet_model\"}\n\
         B 5 0 -30 0 -30 {name=D dir=inout}\n",
    )
    .unwrap();

    let sch = dir.path().join("top.sch");
    fs::write(&sch, "C {nmos4} 0 0 0 0 {name=M1}\n").unwrap();

    let out = generate(&sch, &[lib]);
    assert!(out.contains("M1"));
    assert!(out.contains("nfet_model"));
}
