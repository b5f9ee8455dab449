use std::error::Error;

use vergen::{BuildBuilder, CargoBuilder, Emitter};

// Build timestamp and target triple for the startup debug log.
fn main() {
    if let Err(e) = emit_build_info() {
        println!("cargo:warning=build metadata unavailable: {e}");
    }
}

fn emit_build_info() -> Result<(), Box<dyn Error>> {
    let build = BuildBuilder::all_build()?;
    let cargo = CargoBuilder::all_cargo()?;
    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .emit()?;
    Ok(())
}
