use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sal_ledger::UpdateField;

#[derive(Parser)]
#[command(
    name = "sal",
    about = "Student Attendance Ledger — monthly attendance records and reports",
    version,
)]
pub struct Cli {
    /// One-shot command; omit it to enter the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path of the attendance CSV file (overrides the config file).
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Path of a TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new attendance record
    Add(AddArgs),
    /// Add present or absent days to an existing record
    Update(UpdateArgs),
    /// Print the full report or one student's report
    Report(ReportArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub roll: i64,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub month: String,
    #[arg(long)]
    pub present: i64,
    #[arg(long)]
    pub absent: i64,
    #[arg(long)]
    pub working_days: i64,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub roll: i64,
    #[arg(long)]
    pub month: String,
    /// Days to add to the chosen counter.
    #[arg(long, allow_hyphen_values = true)]
    pub days: i64,
    /// Counter to adjust.
    #[arg(long, value_enum)]
    pub field: FieldArg,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FieldArg {
    Present,
    Absent,
}

impl From<FieldArg> for UpdateField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Present => UpdateField::Present,
            FieldArg::Absent => UpdateField::Absent,
        }
    }
}

#[derive(Args)]
pub struct ReportArgs {
    /// Restrict the report to one roll number.
    pub roll: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_invocation_enters_menu() {
        let cli = Cli::try_parse_from(["sal"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from([
            "sal", "add", "--roll", "1", "--name", "Asha", "--month", "June",
            "--present", "20", "--absent", "2", "--working-days", "22",
        ])
        .unwrap();
        if let Some(Command::Add(args)) = cli.command {
            assert_eq!(args.roll, 1);
            assert_eq!(args.name, "Asha");
            assert_eq!(args.working_days, 22);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_update_with_negative_days() {
        // Negative deltas parse; the ledger rejects them with a
        // validation error instead of a CLI error.
        let cli = Cli::try_parse_from([
            "sal", "update", "--roll", "1", "--month", "June", "--days", "-3",
            "--field", "present",
        ])
        .unwrap();
        if let Some(Command::Update(args)) = cli.command {
            assert_eq!(args.days, -3);
            assert!(matches!(args.field, FieldArg::Present));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_report_full() {
        let cli = Cli::try_parse_from(["sal", "report"]).unwrap();
        if let Some(Command::Report(args)) = cli.command {
            assert!(args.roll.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_report_individual() {
        let cli = Cli::try_parse_from(["sal", "report", "2"]).unwrap();
        if let Some(Command::Report(args)) = cli.command {
            assert_eq!(args.roll, Some(2));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_data_file_override() {
        let cli = Cli::try_parse_from(["sal", "--data-file", "/tmp/a.csv", "report"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/a.csv")));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["sal", "--format", "json", "report"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["sal", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
