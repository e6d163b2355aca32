use std::path::PathBuf;

use colored::Colorize;

use sal_ledger::AttendanceRecord;
use sal_store::CsvStore;

use crate::app::App;
use crate::cli::{AddArgs, Cli, Command, OutputFormat, ReportArgs, UpdateArgs};
use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::menu::Menu;
use crate::output;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let store = CsvStore::new(&config.data_file);
    let mut app = App::open(Box::new(store))?;

    match cli.command {
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Menu::new(&mut app, stdin.lock(), stdout.lock()).run()?;
            Ok(())
        }
        Some(Command::Add(args)) => cmd_add(&mut app, args),
        Some(Command::Update(args)) => cmd_update(&mut app, args),
        Some(Command::Report(args)) => cmd_report(&app, args, &cli.format),
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = AppConfig::load(&path)?;
    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }
    Ok(config)
}

fn cmd_add(app: &mut App, args: AddArgs) -> anyhow::Result<()> {
    let record = app.add_record(
        args.roll,
        &args.name,
        &args.month,
        args.present,
        args.absent,
        args.working_days,
    )?;
    println!(
        "{} Added {} — {} {}: {:.2}%",
        "✓".green().bold(),
        record.student_name.bold(),
        record.month.yellow(),
        record.roll_number,
        record.percentage,
    );
    Ok(())
}

fn cmd_update(app: &mut App, args: UpdateArgs) -> anyhow::Result<()> {
    let record = app.update_attendance(args.roll, &args.month, args.days, args.field.into())?;
    println!(
        "{} Updated {} {} — present {}, absent {}, {:.2}%",
        "✓".green().bold(),
        record.student_name.bold(),
        record.month.yellow(),
        record.present,
        record.absent,
        record.percentage,
    );
    Ok(())
}

fn cmd_report(app: &App, args: ReportArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let records: Vec<&AttendanceRecord> = match args.roll {
        Some(roll) => app.student_report(roll),
        None => app.full_report().iter().collect(),
    };

    if records.is_empty() {
        match args.roll {
            Some(roll) => println!("No records found for roll number {roll}."),
            None => println!("No records available."),
        }
        return Ok(());
    }

    match format {
        OutputFormat::Text => println!("{}", output::render_table(records.iter().copied())),
        OutputFormat::Json => println!("{}", output::render_json(&records)?),
    }
    Ok(())
}
