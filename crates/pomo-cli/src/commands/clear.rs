use std::io::{BufRead, Write};

use colored::Colorize;
use pomo_core::{Config, JsonStatStore, StatManager};

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes && !confirm("Are you sure you want to reset all of today's progress? [y/n] (n): ")? {
        println!("{}", "Cancelled.".red().bold());
        return Ok(());
    }

    let config = Config::load()?;
    let manager = StatManager::new(JsonStatStore::open_default(&config)?);
    manager.reset_today()?;
    println!("{}", "Data was successfully reset".green());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
