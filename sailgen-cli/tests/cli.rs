use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SOURCE: &str = "\
union clause ast = ITYPE : (bits(12), regidx, regidx, iop)

mapping clause encdec = ITYPE(imm, rs1, rd, op) <-> imm @ rs1 @ rd @ RISCV_ADDI

mapping clause assembly = ITYPE(imm, rs1, rd, op) <-> \"addi\"

union clause ast = FENCEI : unit
function clause execute FENCEI() = { RISCV_FENCE_I }
";

fn sailgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sailgen"))
        .args(args)
        .output()
        .expect("failed to run sailgen")
}

fn write_source(dir: &Path) -> String {
    let path = dir.join("base.sail");
    fs::write(&path, SOURCE).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn generate_writes_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());

    let out = sailgen(&["generate", &input]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 of 2 instructions"));

    let code = fs::read_to_string(dir.path().join("base.c")).unwrap();
    assert!(code.starts_with("#include <stdio.h>\n#include <stdint.h>\n"));
    assert!(code.contains("void encode_addi(struct addi_t *instr)"));
    assert!(code.contains("void print_assembly_addi(struct addi_t *instr)"));
    assert!(!code.contains("fence_i"));
}

#[test]
fn generate_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let first = dir.path().join("first.c");
    let second = dir.path().join("second.c");

    for path in [&first, &second] {
        let out = sailgen(&["generate", &input, "-o", path.to_str().unwrap()]);
        assert!(out.status.success());
    }
    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}

#[test]
fn config_file_and_flag_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let config = dir.path().join("sailgen.yaml");
    fs::write(&config, "codegen:\n  mnemonic: instruction\n").unwrap();
    let output = dir.path().join("out.c");
    let output = output.to_str().unwrap();

    let out = sailgen(&["generate", &input, "-c", config.to_str().unwrap(), "-o", output]);
    assert!(out.status.success());
    assert!(fs::read_to_string(output).unwrap().contains("\"ADDI\""));

    let out = sailgen(&[
        "generate",
        &input,
        "-c",
        config.to_str().unwrap(),
        "-o",
        output,
        "--mnemonic",
        "family",
    ]);
    assert!(out.status.success());
    assert!(fs::read_to_string(output).unwrap().contains("\"ORI\""));
}

#[test]
fn info_text_and_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());

    let out = sailgen(&["info", &input]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Instruction: addi"));
    assert!(text.contains("mapping clause encdec: YES"));
    assert!(text.contains("Instruction: fence_i"));

    let out = sailgen(&["info", &input, "--format", "yaml"]);
    assert!(out.status.success());
    let yaml = String::from_utf8_lossy(&out.stdout);
    assert!(yaml.contains("name: addi"));
    assert!(yaml.contains("family: I-type"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.sail");
    let out = sailgen(&["generate", missing.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cannot read"));
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "parser:\n  presence: sometimes\n").unwrap();
    let out = sailgen(&["info", &input, "-c", config.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid config"));
}

#[test]
fn bad_prefix_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let out = sailgen(&["info", &input, "--prefix", "RV-"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid mnemonic prefix"));
}
