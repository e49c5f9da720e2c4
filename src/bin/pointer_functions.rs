// Passing pointers to functions, and taking ownership of what comes back.

use pointer_fundamentals::{functions, DemoConfig, DemoError, Narrator};
use std::io::{self, Write};
use std::process;

fn main() {
    run().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
}

fn run() -> Result<(), DemoError> {
    let config = DemoConfig::from_env()?;
    let stdout = io::stdout();
    let mut narrator = Narrator::new(stdout.lock(), config);
    functions::run(&mut narrator)?;
    narrator.into_inner().flush()?;
    Ok(())
}
