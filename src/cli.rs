//! Command-line interface definitions for Gridiron Press.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials are deliberately not CLI arguments; they come from the
//! environment through the configuration loader.

use clap::Parser;

/// Command-line arguments for the article generator.
///
/// # Examples
///
/// ```sh
/// # Generate the default four-section article
/// gridiron_press
///
/// # Generate from a custom prompt
/// gridiron_press --prompt "Write a recap of the divisional round"
///
/// # Tighten the warm-up retry budget
/// gridiron_press --max-retries 2 --max-wait-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Custom prompt that fully replaces the built-in article template
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Maximum number of retries while the model is warming up
    #[arg(long, default_value_t = crate::api::DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// Total seconds to spend waiting for a warming model before giving up
    #[arg(long, default_value_t = crate::api::DEFAULT_MAX_WAIT.as_secs())]
    pub max_wait_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["gridiron_press"]);
        assert!(cli.prompt.is_none());
        assert_eq!(cli.max_retries, 5);
        assert_eq!(cli.max_wait_secs, 180);
    }

    #[test]
    fn test_cli_custom_prompt() {
        let cli = Cli::parse_from(["gridiron_press", "--prompt", "Playoff preview"]);
        assert_eq!(cli.prompt.as_deref(), Some("Playoff preview"));
    }

    #[test]
    fn test_cli_short_flag() {
        let cli = Cli::parse_from(["gridiron_press", "-p", "Draft recap"]);
        assert_eq!(cli.prompt.as_deref(), Some("Draft recap"));
    }

    #[test]
    fn test_cli_retry_overrides() {
        let cli = Cli::parse_from([
            "gridiron_press",
            "--max-retries",
            "2",
            "--max-wait-secs",
            "30",
        ]);
        assert_eq!(cli.max_retries, 2);
        assert_eq!(cli.max_wait_secs, 30);
    }
}
