use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export scraped organizations as CSV.
#[derive(Parser, Debug)]
#[command(name = "publicbodies")]
#[command(about = "Export scraped public bodies as CSV", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of ~/.publicbodies/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Output CSV in Alaveteli format
    Alaveteli,

    /// Output CSV in Nomenklatura format
    Nomenklatura,

    /// Output CSV in publicbodies.org format
    #[command(alias = "public_bodies")]
    PublicBodies,

    /// Load organization documents (JSON array or NDJSON) into the store
    Import {
        /// Dump to read, or `-` for stdin
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pb_docs::ExportFormat;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_actions() {
        let cli = Cli::try_parse_from(["publicbodies", "alaveteli"]).unwrap();
        assert_eq!(cli.command, Command::Alaveteli);
        assert!(cli.config.is_none());

        for name in ["public-bodies", "public_bodies"] {
            let cli = Cli::try_parse_from(["publicbodies", name]).unwrap();
            assert_eq!(cli.command, Command::PublicBodies);
        }
    }

    #[test]
    fn parses_import_and_config() {
        let cli = Cli::try_parse_from([
            "publicbodies",
            "import",
            "dump.json",
            "--config",
            "/tmp/pb.json",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Import {
                file: PathBuf::from("dump.json")
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pb.json")));
    }

    #[test]
    fn jurisdiction_is_not_a_flag() {
        assert!(
            Cli::try_parse_from(["publicbodies", "nomenklatura", "--jurisdiction", "x"]).is_err()
        );
    }

    #[test]
    fn every_export_format_has_an_action() {
        for format in ExportFormat::ALL {
            assert!(
                Cli::try_parse_from(["publicbodies", format.name()]).is_ok(),
                "no action for {format}"
            );
        }
    }
}
