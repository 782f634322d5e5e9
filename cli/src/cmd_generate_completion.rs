// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::generate;
use clap_complete_nushell::Nushell;

use crate::Cli;

/// Prints a completion script for the `calboard` command tree.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("generate-completion")
            .about("Print a shell completion script for calboard")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Target shell").value_parser(value_parser!(Shell)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let shell = matches.get_one::<Shell>("shell").copied();
        Self {
            shell: shell.unwrap_or(Shell::Bash),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(shell = ?self.shell, "writing completion script");
        self.shell.write_script(&mut Cli::command(), &mut io::stdout());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    /// Writes the completion script for `cmd`, named after its binary.
    pub fn write_script(self, cmd: &mut Command, buf: &mut dyn io::Write) {
        let bin = cmd.get_name().to_string();
        match self.builtin() {
            Some(shell) => generate(shell, cmd, bin, buf),
            None => generate(Nushell, cmd, bin, buf),
        }
    }

    /// Shells covered by `clap_complete` itself; nushell has its own generator.
    fn builtin(self) -> Option<clap_complete::Shell> {
        match self {
            Shell::Bash => Some(clap_complete::Shell::Bash),
            Shell::Elvish => Some(clap_complete::Shell::Elvish),
            Shell::Fish => Some(clap_complete::Shell::Fish),
            Shell::PowerShell => Some(clap_complete::Shell::PowerShell),
            Shell::Zsh => Some(clap_complete::Shell::Zsh),
            Shell::Nushell => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        shell.write_script(&mut Cli::command(), &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bash_script_covers_calboard_subcommands() {
        let out = script(Shell::Bash);
        assert!(out.contains("calboard"));
        for name in ["calendar", "event", "new", "list"] {
            assert!(out.contains(name), "missing {name} in bash completion");
        }
    }

    #[test]
    fn fish_script_offers_top_level_commands() {
        let out = script(Shell::Fish);
        assert!(out.contains("complete -c calboard"));
        assert!(out.contains("calendar"));
        assert!(out.contains("event"));
    }

    #[test]
    fn every_shell_names_the_binary() {
        for shell in Shell::value_variants() {
            assert!(script(*shell).contains("calboard"), "{shell:?}");
        }
    }

    #[test]
    fn parses_shell_through_cli() {
        for (arg, expected) in [
            ("bash", Shell::Bash),
            ("elvish", Shell::Elvish),
            ("fish", Shell::Fish),
            ("nushell", Shell::Nushell),
            ("powershell", Shell::PowerShell),
            ("zsh", Shell::Zsh),
        ] {
            let matches = Cli::command()
                .try_get_matches_from(["calboard", "completion", arg])
                .unwrap();
            let sub = matches.subcommand_matches(CmdGenerateCompletion::NAME).unwrap();
            assert_eq!(CmdGenerateCompletion::from(sub).shell, expected);
        }
    }

    #[test]
    fn keeps_generate_completion_alias() {
        let matches = Cli::command()
            .try_get_matches_from(["calboard", "generate-completion", "zsh"])
            .unwrap();
        let sub = matches.subcommand_matches(CmdGenerateCompletion::NAME).unwrap();
        assert_eq!(CmdGenerateCompletion::from(sub).shell, Shell::Zsh);
    }

    #[test]
    fn rejects_unknown_shell() {
        assert!(
            Cli::command()
                .try_get_matches_from(["calboard", "completion", "tcsh"])
                .is_err()
        );
    }
}
