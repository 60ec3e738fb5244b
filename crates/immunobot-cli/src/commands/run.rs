//! Run the configured swarm.

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use immunobot::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;

pub fn run(ticks: u64, json: bool, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let mut swarm = config.build_swarm()?;

    if json {
        swarm.run(ticks);
        let out = serde_json::to_string_pretty(&swarm.snapshot())
            .context("Failed to serialize snapshot")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{} Running {} robots for {} ticks...",
        "→".blue(),
        config.layout.len().to_string().cyan(),
        ticks.to_string().cyan()
    );

    let pb = ProgressBar::new(ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    for _ in 0..ticks {
        for event in swarm.tick() {
            if let SwarmEvent::Transitioned { id, role, transition } = event {
                if verbose {
                    pb.println(format!("  {} {} {:?}", id, role, transition));
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    let snapshot = swarm.snapshot();
    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!();
    for robot in &snapshot.robots {
        println!(
            "  {}  {:<4} ({:>6.1}, {:>6.1})  {:<8}  motors {:>3}",
            robot.id,
            robot.agent.role.label(),
            robot.position.x,
            robot.position.y,
            status_label(robot.agent.status),
            robot.body.motors.0,
        );
    }

    let stats = &snapshot.stats;
    println!();
    println!(
        "  Alive: {}  Killing: {}  Dead: {}",
        stats.alive.to_string().green(),
        stats.killing.to_string().yellow(),
        stats.dead.to_string().red()
    );
    println!(
        "  Frames: {} delivered, {} lost, {} corrupted",
        stats.frames_delivered, stats.frames_lost, stats.frames_corrupted
    );

    Ok(())
}

fn status_label(status: CellStatus) -> ColoredString {
    match status {
        CellStatus::Alive => "alive".green(),
        CellStatus::Killing => "killing".yellow(),
        CellStatus::Dead => "dead".red(),
    }
}
