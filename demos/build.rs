use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

#[path = "build/grammars.rs"]
mod grammars;

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = env::var_os("OUT_DIR").ok_or("OUT_DIR is not set")?;
    for (name, definition) in grammars::all() {
        let code = scanpile_generate::generate(&definition)
            .map_err(|e| format!("Failed to generate the {} scanner: {}", name, e))?;
        fs::write(Path::new(&out_dir).join(format!("{}.rs", name)), code)?;
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/grammars.rs");
    Ok(())
}
