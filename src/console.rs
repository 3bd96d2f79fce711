// src/console.rs
//! Operator prompts. The pipeline only sees the `Prompter` trait so runs can
//! be scripted.

use anyhow::{Context, Result};
use dialoguer::Input;

pub trait Prompter {
    /// One line of operator input, trimmed
    fn ask(&mut self, prompt: &str, allow_empty: bool) -> Result<String>;

    fn ask_url(&mut self) -> Result<String> {
        self.ask("Enter Career Page URL", false)
    }

    /// `false` once the operator types `stop`
    fn ask_continue(&mut self) -> Result<bool> {
        let choice = self.ask("Press ENTER to continue, or type 'stop'", true)?;
        Ok(!wants_stop(&choice))
    }

    fn ask_resume_count(&mut self) -> Result<usize> {
        let answer = self.ask("How many resumes to generate? (0 to skip)", true)?;
        Ok(parse_resume_count(&answer))
    }
}

pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .with_context(|| format!("Failed to read input for '{}'", prompt))?;
        Ok(answer.trim().to_string())
    }
}

pub fn wants_stop(choice: &str) -> bool {
    choice.trim().eq_ignore_ascii_case("stop")
}

/// Anything that is not a non-negative integer counts as 0
pub fn parse_resume_count(answer: &str) -> usize {
    answer.trim().parse().unwrap_or(0)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompter;
    use super::*;

    #[test]
    fn test_parse_resume_count() {
        assert_eq!(parse_resume_count("3"), 3);
        assert_eq!(parse_resume_count(" 2 \n"), 2);
        assert_eq!(parse_resume_count(""), 0);
        assert_eq!(parse_resume_count("two"), 0);
        assert_eq!(parse_resume_count("-1"), 0);
    }

    #[test]
    fn test_wants_stop() {
        assert!(wants_stop("stop"));
        assert!(wants_stop(" STOP "));
        assert!(!wants_stop(""));
        assert!(!wants_stop("stopped"));
    }

    #[test]
    fn test_provided_prompts() {
        let mut prompter = ScriptedPrompter::new(&["https://acme.io/careers", "", "Stop", "x"]);

        assert_eq!(prompter.ask_url().unwrap(), "https://acme.io/careers");
        assert!(prompter.ask_continue().unwrap());
        assert!(!prompter.ask_continue().unwrap());
        assert_eq!(prompter.ask_resume_count().unwrap(), 0);
        assert!(prompter.ask_url().is_err());
        assert_eq!(prompter.prompts.len(), 5);
    }
}
