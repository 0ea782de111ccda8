//! Command-line tests for the shipped binaries
//!
//! These tests run the compiled executables the way the processing scripts
//! do and check exit codes, stdout and the files left behind.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn manifest_tool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_manifest-tool"))
        .args(args)
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Test a successful run writes the manifest and nothing else.
///
/// Purpose: Verifies exit status 0, a parseable document, and no leftover
/// temporary file next to the output.
/// Benefit: Matches how the job scripts call the tool.
#[test]
fn test_manifest_tool_success() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(input.path().join("HLS.S30.T52SCG.2019253.v1.5.B01.tif"), b"band").unwrap();
    fs::write(input.path().join("HLS.S30.T52SCG.2019253.v1.5.cmr.xml"), b"<x/>").unwrap();
    let output = out.path().join("manifest.json");

    let result = manifest_tool(&[
        "-i",
        path_str(input.path()),
        "-o",
        path_str(&output),
        "-b",
        "s3://hls-output/HLSS30/",
        "-c",
        "HLSS30",
        "-j",
        "job-7",
    ]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert!(result.stdout.is_empty());

    let doc: Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(doc["collection"], "HLSS30");
    assert_eq!(doc["identifier"], "job-7");
    assert_eq!(doc["version"], "1.5");
    assert_eq!(doc["product"]["name"], "HLS.S30.T52SCG.2019253.v1.5.B01");
    assert_eq!(doc["product"]["files"].as_array().unwrap().len(), 2);
    assert_eq!(
        doc["product"]["files"][0]["uri"],
        "s3://hls-output/HLSS30/HLS.S30.T52SCG.2019253.v1.5.B01.tif"
    );

    let leftovers: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

/// Test a missing required flag is a usage error.
///
/// Purpose: Verifies exit status 2 and that no output file is created.
/// Benefit: Scripts can tell misuse apart from processing failures.
#[test]
fn test_manifest_tool_missing_argument() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("manifest.json");

    let result = manifest_tool(&["-o", path_str(&output), "-c", "HLSS30"]);

    assert_eq!(result.status.code(), Some(2));
    assert!(!output.exists());
}

/// Test a missing input directory is a processing failure.
///
/// Purpose: Verifies exit status 1, an error message on stderr, and no output.
/// Benefit: A bad job never leaves a half-written manifest behind.
#[test]
fn test_manifest_tool_missing_input() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("manifest.json");
    let missing = out.path().join("does-not-exist");

    let result = manifest_tool(&[
        "-i",
        path_str(&missing),
        "-o",
        path_str(&output),
        "-b",
        "http://store/col",
        "-c",
        "HLSL30",
    ]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Error"));
    assert!(!output.exists());
}

#[test]
fn test_get_doy() {
    let result = Command::new(env!("CARGO_BIN_EXE_get-doy"))
        .args(["-y", "2019", "-m", "1", "-d", "2"])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert_eq!(result.stdout, b"002");
}

#[test]
fn test_get_doy_invalid_date() {
    let result = Command::new(env!("CARGO_BIN_EXE_get-doy"))
        .args(["-y", "2019", "-m", "2", "-d", "30"])
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
}

#[test]
fn test_granule_dir() {
    let product = TempDir::new().unwrap();
    fs::write(product.path().join("MTD_MSIL1C.xml"), b"<x/>").unwrap();
    fs::create_dir_all(product.path().join("GRANULE/L1C_T52SCG_A021820_20190910T022245")).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_granule-dir"))
        .args(["-i", path_str(product.path())])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert_eq!(result.stdout, b"L1C_T52SCG_A021820_20190910T022245");
}

fn check_solar_zenith(metadata: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_check-solar-zenith"))
        .args(["-i", path_str(metadata)])
        .output()
        .unwrap()
}

fn tile_metadata(dir: &Path, zenith_element: &str) -> std::path::PathBuf {
    let path = dir.join("MTD_TL.xml");
    let xml = format!(
        "<Level-1C_Tile_ID><Geometric_Info><Tile_Angles><Mean_Sun_Angle>{}\
         <AZIMUTH_ANGLE unit=\"deg\">150.2</AZIMUTH_ANGLE></Mean_Sun_Angle>\
         </Tile_Angles></Geometric_Info></Level-1C_Tile_ID>",
        zenith_element
    );
    fs::write(&path, xml).unwrap();
    path
}

/// Test the zenith limit is inclusive at 76 degrees.
///
/// Purpose: Verifies `valid` at exactly 76.0 and `invalid` just above it,
/// printed without a trailing newline.
/// Benefit: Scripts compare the captured word directly.
#[test]
fn test_check_solar_zenith_threshold() {
    let dir = TempDir::new().unwrap();

    let at_limit = tile_metadata(dir.path(), "<ZENITH_ANGLE unit=\"deg\">76.0</ZENITH_ANGLE>");
    let result = check_solar_zenith(&at_limit);
    assert!(result.status.success());
    assert_eq!(result.stdout, b"valid");

    let above = tile_metadata(dir.path(), "<ZENITH_ANGLE unit=\"deg\">76.01</ZENITH_ANGLE>");
    let result = check_solar_zenith(&above);
    assert!(result.status.success());
    assert_eq!(result.stdout, b"invalid");
}

#[test]
fn test_check_solar_zenith_missing_element() {
    let dir = TempDir::new().unwrap();
    let metadata = tile_metadata(dir.path(), "");

    let result = check_solar_zenith(&metadata);

    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
    assert!(String::from_utf8_lossy(&result.stderr).contains("ZENITH_ANGLE"));
}
