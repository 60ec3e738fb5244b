//! Print the role table.

use anyhow::Result;
use colored::Colorize;
use immunobot::prelude::*;

pub fn run() -> Result<()> {
    println!("{}", "Immunobot Roles".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!("  {:>3}  {:<5} {:<12} {}", "id", "label", "group", "binds");

    for role in Role::ALL {
        let binds: Vec<&str> = Role::ALL
            .iter()
            .filter(|other| compatible(role, **other))
            .map(|other| other.label())
            .collect();
        println!(
            "  {:>3}  {:<5} {:<12} {}",
            role.id().to_string().cyan(),
            role.label(),
            role.group(),
            if binds.is_empty() {
                "-".dimmed().to_string()
            } else {
                binds.join(", ")
            }
        );
    }

    Ok(())
}
