use std::io::{self, BufRead, Write};

use colored::Colorize;

use sal_ledger::UpdateField;

use crate::app::App;
use crate::output;

/// Errors raised while reading user input.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Non-numeric input where a number was required.
    #[error("invalid number: {input:?}")]
    InvalidNumber { input: String },

    /// The input stream ended.
    #[error("end of input")]
    Eof,

    /// The input or output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The interactive menu loop: display menu, read a choice, dispatch,
/// repeat until the exit command or end of input.
///
/// Generic over the input and output streams so tests can script a whole
/// session. Parse failures and ledger errors are reported and recovered
/// here; only stream failures propagate.
pub struct Menu<'a, R, W> {
    app: &'a mut App,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(app: &'a mut App, input: R, output: W) -> Self {
        Self { app, input, output }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\nStudent Attendance System")?;
            writeln!(self.output, "1. Add Record")?;
            writeln!(self.output, "2. Update Attendance")?;
            writeln!(self.output, "3. Generate Report")?;
            writeln!(self.output, "4. Exit")?;

            let choice = match self.prompt_line("Choose an option: ") {
                Ok(choice) => choice,
                Err(PromptError::Eof) => break,
                Err(PromptError::Io(err)) => return Err(err),
                Err(PromptError::InvalidNumber { .. }) => unreachable!(),
            };

            let outcome = match choice.as_str() {
                "1" => self.add_record(),
                "2" => self.update_attendance(),
                "3" => self.generate_report(),
                "4" => {
                    writeln!(self.output, "Exiting. Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "{}", "Invalid choice! Please try again.".red())?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(PromptError::Eof) => break,
                Err(PromptError::Io(err)) => return Err(err),
                Err(err @ PromptError::InvalidNumber { .. }) => {
                    writeln!(self.output, "{}", format!("Error: {err}").red())?;
                }
            }
        }
        Ok(())
    }

    fn add_record(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "\nAdd New Record:")?;
        let roll = self.prompt_number("Enter Roll Number: ")?;
        let name = self.prompt_line("Enter Student Name: ")?;
        let month = self.prompt_line("Enter Month: ")?;
        let present = self.prompt_number("Enter classes present: ")?;
        let absent = self.prompt_number("Enter classes absent: ")?;
        let working_days = self.prompt_number("Enter working days: ")?;

        match self
            .app
            .add_record(roll, &name, &month, present, absent, working_days)
        {
            Ok(record) => writeln!(
                self.output,
                "{} Record added: {} — {} {}: {:.2}%",
                "✓".green(),
                record.student_name,
                record.month,
                record.roll_number,
                record.percentage,
            )?,
            Err(err) => writeln!(self.output, "{}", format!("Error: {err}").red())?,
        }
        Ok(())
    }

    fn update_attendance(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "\nUpdate Attendance:")?;
        let roll = self.prompt_number("Enter Roll Number: ")?;
        let month = self.prompt_line("Enter Month: ")?;

        let (working_days, present, absent) = match self.app.get(roll, &month) {
            Some(record) => (record.working_days, record.present, record.absent),
            None => {
                writeln!(self.output, "{}", "No record found!".red())?;
                return Ok(());
            }
        };

        writeln!(
            self.output,
            "\nCurrent Attendance (Working Days: {working_days})"
        )?;
        writeln!(self.output, "Present: {present}")?;
        writeln!(self.output, "Absent: {absent}")?;

        writeln!(self.output, "\nUpdate:")?;
        writeln!(self.output, "1. Add Present")?;
        writeln!(self.output, "2. Add Absent")?;
        let choice = self.prompt_line("Choice: ")?;
        let field = match choice.as_str() {
            "1" => UpdateField::Present,
            "2" => UpdateField::Absent,
            _ => {
                writeln!(self.output, "{}", "Invalid choice!".red())?;
                return Ok(());
            }
        };
        let days = self.prompt_number("Days to add: ")?;

        match self.app.update_attendance(roll, &month, days, field) {
            Ok(record) => writeln!(
                self.output,
                "{} Attendance updated: present {}, absent {}, {:.2}%",
                "✓".green(),
                record.present,
                record.absent,
                record.percentage,
            )?,
            Err(err) => writeln!(self.output, "{}", format!("Error: {err}").red())?,
        }
        Ok(())
    }

    fn generate_report(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "\nAttendance Report:")?;
        if self.app.ledger().is_empty() {
            writeln!(self.output, "No records available!")?;
            return Ok(());
        }

        writeln!(self.output, "1. Full Report")?;
        writeln!(self.output, "2. Individual Report")?;
        let choice = self.prompt_line("Choice: ")?;
        match choice.as_str() {
            "1" => {
                let table = output::render_table(self.app.full_report());
                writeln!(self.output, "{table}")?;
            }
            "2" => {
                let roll = self.prompt_number("Enter Roll Number: ")?;
                let table = {
                    let records = self.app.student_report(roll);
                    if records.is_empty() {
                        None
                    } else {
                        Some(output::render_table(records.into_iter()))
                    }
                };
                match table {
                    Some(table) => writeln!(self.output, "{table}")?,
                    None => writeln!(self.output, "No records found for this roll number!")?,
                }
            }
            _ => writeln!(self.output, "{}", "Invalid choice!".red())?,
        }
        Ok(())
    }

    fn prompt_line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_number(&mut self, label: &str) -> Result<i64, PromptError> {
        let line = self.prompt_line(label)?;
        line.parse()
            .map_err(|_| PromptError::InvalidNumber { input: line.clone() })
    }
}
