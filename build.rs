//! Emits `APP_METADATA_*` string constants (package name, version and every
//! string key under `[package.metadata]`) into `$OUT_DIR/app_metadata.rs`.

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use toml::Value;

fn constant(key: &str, value: &str) -> String {
    format!("#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};\n", key.to_uppercase(), value)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=Cargo.toml");

    let manifest: Value = toml::from_str(&fs::read_to_string("Cargo.toml")?)?;

    let mut generated = constant("NAME", &env::var("CARGO_PKG_NAME")?);
    generated.push_str(&constant("VERSION", &env::var("CARGO_PKG_VERSION")?));

    let metadata = manifest.get("package").and_then(|package| package.get("metadata")).and_then(Value::as_table);
    for (key, value) in metadata.into_iter().flatten() {
        if let Some(value) = value.as_str() {
            generated.push_str(&constant(key, value));
        }
    }

    fs::write(Path::new(&env::var("OUT_DIR")?).join("app_metadata.rs"), generated)?;
    Ok(())
}
