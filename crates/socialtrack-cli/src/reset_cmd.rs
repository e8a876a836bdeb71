//! `strack reset` command: wipe the month back to the pristine default.

use std::io::{BufRead, Write};

use anyhow::Result;

use socialtrack_store::MonthStore;

/// Run the reset command. Prompts for confirmation unless `yes` is set.
pub fn run_reset(store: &MonthStore, yes: bool) -> Result<()> {
    if !yes {
        let stdin = std::io::stdin();
        let confirmed = confirm(&mut stdin.lock(), &mut std::io::stdout())?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.reset()?;
    println!("Month data cleared.");
    Ok(())
}

/// Prompt on `output`, read one line from `input`, accept `y` / `yes`.
fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(
        output,
        "This permanently clears all data for the current month. Continue? [y/N] "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
