//! The `arithdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("arithdrill.toml").exists() {
        println!("arithdrill.toml already exists, skipping.");
    } else {
        std::fs::write("arithdrill.toml", SAMPLE_CONFIG)?;
        println!("Created arithdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit arithdrill.toml to pick an operator and digit range");
    println!("  2. Run: arithdrill practice");
    println!("  3. Or:  arithdrill generate --session session.json");
    println!("          arithdrill grade --session session.json --answers 1,2,3");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# arithdrill configuration

# One of "+", "-", "×", "÷" (or add, subtract, multiply, divide)
operator = "+"

# Problems per batch (1-100)
count = 10

# Operand length in digits (1-9, min_digits <= max_digits)
min_digits = 1
max_digits = 2

# Where exports are written, and which formats (csv, html, json)
output_dir = "./arithdrill-results"
formats = ["csv"]
"#;
