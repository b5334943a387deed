//! Terminal implementation of the restore prompt

use std::io::{self, BufRead, Write};

use crate::display::format_comparison;
use crate::error::SnapResult;
use crate::restore::{Prompt, RestorePlan};

/// Prompts on stdout and reads answers from stdin
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn show_comparison(&self, plan: &RestorePlan) -> SnapResult<()> {
        println!(
            "Restoring {} to backup {} ({} UTC)",
            plan.option, plan.time_key, plan.date
        );
        println!();
        println!("{}", format_comparison(plan)?);
        println!();
        Ok(())
    }

    fn confirm(&self, question: &str) -> SnapResult<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        let stdin = io::stdin();
        ask(question, &mut stdin.lock(), &mut io::stdout())
    }
}

/// Ask `question` and read a yes/no answer; end of input counts as no
fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> SnapResult<bool> {
    write!(output, "{} [y/n] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
