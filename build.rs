use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x for the RP2040 (Pico 1) target
    let target = env::var("TARGET").unwrap_or_default();
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    if target.starts_with("thumbv6m") {
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rustc-link-arg-examples=--nmagic");
        println!("cargo:rustc-link-arg-examples=-Tlink.x");
        println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
        println!("cargo:rerun-if-changed=memory.x");
    }

    // 2) Load optional env files
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) Start time shown after power-up; the clock has no battery-backed time
    let start_hours = env_or_default("CLOCK_START_HOURS", "5");
    let start_minutes = env_or_default("CLOCK_START_MINUTES", "0");
    let start_seconds = env_or_default("CLOCK_START_SECONDS", "35");

    for (key, value) in [
        ("CLOCK_START_HOURS", &start_hours),
        ("CLOCK_START_MINUTES", &start_minutes),
        ("CLOCK_START_SECONDS", &start_seconds),
    ] {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            println!("cargo:warning={key}={value:?} is not a plain number; it will be read as 0");
        }
    }

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=CLOCK_START_HOURS={start_hours}");
    println!("cargo:rustc-env=CLOCK_START_MINUTES={start_minutes}");
    println!("cargo:rustc-env=CLOCK_START_SECONDS={start_seconds}");

    println!("cargo:rerun-if-env-changed=CLOCK_START_HOURS");
    println!("cargo:rerun-if-env-changed=CLOCK_START_MINUTES");
    println!("cargo:rerun-if-env-changed=CLOCK_START_SECONDS");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
