use std::io::Write;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // For each hid.bin file in our tests/data directory, create one basic test function
    // that parses that report descriptor and decodes an all-zero input report
    let datadir: PathBuf = [concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")].iter().collect();
    let out_dir = std::env::var_os("OUT_DIR").ok_or("OUT_DIR is not set")?;
    let dest_path = PathBuf::from(&out_dir).join("test-report-descriptors.rs");
    let mut file = std::fs::File::create(dest_path)?;

    println!("cargo:rerun-if-changed=tests/data");

    writeln!(file, "use hidtree::*;")?;
    writeln!(file)?;

    // The data files are excluded from the package, no tests without them
    let mut entries: Vec<PathBuf> = match std::fs::read_dir(datadir) {
        Ok(dir) => dir
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().ends_with(".hid.bin"))
            .collect(),
        Err(_) => Vec::new(),
    };
    entries.sort();

    for path in entries {
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or("invalid file name")?
            .to_string();
        let funcname = filename.replace([':', '.', '-'], "_");
        writeln!(
            file,
            "
#[test]
#[allow(non_snake_case)]
fn test_{funcname}() {{
    let bytes: Vec<u8> = std::fs::read({path:?}).unwrap();
    let tree = ItemTree::try_from(&bytes).expect(&format!(\"Failed to parse {filename}\"));
    let report = vec![0u8; tree.input_report_len()];
    let mut values = decode_report(&tree, &report).expect(&format!(\"Failed to decode {filename}\"));
    assert!(values.all(|v| v.unsigned() == 0));
    dump(&bytes).expect(&format!(\"Failed to dump {filename}\"));
}}
"
        )?;
    }

    Ok(())
}
