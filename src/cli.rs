use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gsh")]
#[command(about = "Reuse or start an ssh-agent for the current shell", long_about = None)]
#[command(
    after_help = "Prints shell statements on stdout. Use it as: eval \"$(gsh)\" or eval \"$(gsh kill)\""
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Kill running ssh agents and forget the stored one
    #[command(visible_alias = "k")]
    Kill,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["gsh"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_kill_subcommand() {
        let cli = Cli::try_parse_from(["gsh", "kill"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Kill));
    }

    #[test]
    fn test_kill_alias() {
        let cli = Cli::try_parse_from(["gsh", "k"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Kill));
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["gsh", "kill", "123"]).is_err());
        assert!(Cli::try_parse_from(["gsh", "restart"]).is_err());
        assert!(Cli::try_parse_from(["gsh", "--force"]).is_err());
    }
}
