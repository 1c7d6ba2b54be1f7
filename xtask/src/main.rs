//! Build automation tasks for the led4-clock project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The Pico 1's RP2040 is the only supported board.
const TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1,arm";
const FIRMWARE_EXAMPLES: [&str; 1] = ["clock_led4"];
const HOST_EXAMPLES: [&str; 1] = ["clock_console"];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for led4-clock project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, firmware library and examples, docs
    CheckAll,
    /// Build the library for the Pico
    Build,
    /// Build a firmware example
    Example {
        /// Example name (e.g., clock_led4)
        #[arg(default_value = "clock_led4")]
        name: String,
    },
    /// Build UF2 firmware file for flashing to Pico
    Uf2 {
        /// Example name (e.g., clock_led4)
        #[arg(default_value = "clock_led4")]
        name: String,
    },
    /// Run the clock against virtual hardware on the host
    Simulate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build => build_lib(),
        Commands::Example { name } => build_example(&name),
        Commands::Uf2 { name } => build_uf2(&name),
        Commands::Simulate => simulate(),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut host_test_cmd = Command::new("cargo");
    host_test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--package", "led4-clock"]);
    if let Some(target) = &host_target {
        host_test_cmd.arg("--target").arg(target);
    }
    if !run_command(&mut host_test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building host examples...".cyan());
    for example in &HOST_EXAMPLES {
        println!("  {}", format!("- {example}").bright_black());
        if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
            "build",
            "--package",
            "led4-clock",
            "--example",
            example,
        ])) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building library (pico1, arm)...".cyan());
    if !run_command(&mut firmware_command(&workspace_root, &["build", "--lib"])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building firmware examples (pico1, arm)...".cyan());
    for example in &FIRMWARE_EXAMPLES {
        println!("  {}", format!("- {example}").bright_black());
        if !run_command(&mut firmware_command(
            &workspace_root,
            &["build", "--example", example],
        )) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(&mut firmware_command(&workspace_root, &["doc", "--no-deps"])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    ExitCode::SUCCESS
}

fn build_lib() -> ExitCode {
    let workspace_root = workspace_root();
    println!(
        "{}",
        format!("Building library with features: {FIRMWARE_FEATURES}").cyan()
    );

    if run_command(&mut firmware_command(&workspace_root, &["build", "--lib"])) {
        println!("{}", "Build successful! ✨".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_example(name: &str) -> ExitCode {
    let workspace_root = workspace_root();
    println!(
        "{}",
        format!("Building example '{name}' with features: {FIRMWARE_FEATURES}").cyan()
    );

    if run_command(&mut firmware_command(
        &workspace_root,
        &["build", "--example", name],
    )) {
        println!("{}", "Build successful! ✨".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_uf2(name: &str) -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", format!("Building UF2 for example '{name}'").cyan());
    println!("  Features: {}", FIRMWARE_FEATURES.bright_black());
    println!("  Target: {}", TARGET.bright_black());

    // Build in release mode for UF2
    if !run_command(&mut firmware_command(
        &workspace_root,
        &["build", "--example", name, "--release"],
    )) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{TARGET}/release/examples/{name}");
    let uf2_path = format!("{name}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn simulate() -> ExitCode {
    let workspace_root = workspace_root();
    println!("{}", "Running clock on virtual hardware...".cyan());

    if run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "run",
        "--package",
        "led4-clock",
        "--example",
        "clock_console",
    ])) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// `cargo <args>` for the Pico target with the firmware features.
fn firmware_command(workspace_root: &std::path::Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root)
        .args(args)
        .args(["--package", "led4-clock", "--target", TARGET])
        .args(["--features", FIRMWARE_FEATURES, "--no-default-features"]);
    cmd
}

fn workspace_root() -> std::path::PathBuf {
    // cargo runs the alias from the workspace root
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if let Some(host) = line.strip_prefix("host: ") {
            return Some(host.trim().to_string());
        }
    }
    None
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
