use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use smartcity_core::gateways::ImageTarget;

#[derive(Parser, Debug)]
#[command(name = "smartcity")]
#[command(about = "Manage the Smart City knowledge graph")]
#[command(version)]
pub struct Args {
    /// Configuration file (default: smartcity.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all records of a kind
    List {
        kind: Kind,
        /// Only show records whose name contains TEXT
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// Create a new record
    Create {
        kind: Kind,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Update an existing record
    Update {
        kind: Kind,
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record
    Delete {
        kind: Kind,
        id: String,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Check the fields of a record without sending it
    Validate {
        kind: Kind,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Show the dashboard counters
    Stats,
    /// Show the stations on the map
    Map,
    /// Log into the dashboard
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the logged-in user
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Ask the assistant a question about the city
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Upload an image and print its URL
    Upload { target: Target, file: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Users,
    Transports,
    Stations,
    Events,
    Zones,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Transport,
    Event,
    Profile,
}

impl From<Target> for ImageTarget {
    fn from(from: Target) -> Self {
        match from {
            Target::Transport => Self::Transport,
            Target::Event => Self::Event,
            Target::Profile => Self::Profile,
        }
    }
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{arg}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{arg}'"));
    }
    Ok((field.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_assignments() {
        assert_eq!(
            parse_assignment("nom=Bus 12").unwrap(),
            ("nom".to_owned(), "Bus 12".to_owned())
        );
        assert_eq!(
            parse_assignment("imageUrl=/a?b=c").unwrap(),
            ("imageUrl".to_owned(), "/a?b=c".to_owned())
        );
        assert_eq!(parse_assignment("age=").unwrap().1, "");
        assert!(parse_assignment("nom").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn parse_create_command() {
        let args = Args::try_parse_from([
            "smartcity",
            "create",
            "transports",
            "--set",
            "nom=Bus 12",
            "--set",
            "capacite=50",
        ])
        .unwrap();
        let Command::Create { kind, fields } = args.command else {
            panic!("unexpected command");
        };
        assert_eq!(kind, Kind::Transports);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_help() {
        use clap::CommandFactory;
        let cli = Args::command();
        for command in cli.get_subcommands() {
            assert!(
                command.get_about().is_some(),
                "'{}' has no help text",
                command.get_name()
            );
        }
    }
}
