//! Puts the memory layout of the selected chip on the linker search path.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let memory_file = if env::var_os("CARGO_FEATURE_RP235XA").is_some() {
        "memory-rp235x.x"
    } else {
        "memory.x"
    };

    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let layout = std::fs::read(memory_file).unwrap();
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(&layout)
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=memory-rp235x.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_RP2040").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    }
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
