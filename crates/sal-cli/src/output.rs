use colored::Colorize;

use sal_ledger::AttendanceRecord;

/// Render records as a fixed-width text table, one row per record.
///
/// Color is applied to whole lines only; coloring individual cells would
/// break the width-based alignment.
pub fn render_table<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> String {
    let header = format!(
        "{:>7}  {:<20}  {:<10}  {:>15}  {:>14}  {:>12}  {:>21}",
        "Roll No",
        "Student Name",
        "Month",
        "Classes Present",
        "Classes Absent",
        "Working Days",
        "Attendance Percentage",
    );

    let mut out = String::new();
    out.push_str(&format!("{}\n", header.bold()));
    for record in records {
        out.push_str(&format!(
            "{:>7}  {:<20}  {:<10}  {:>15}  {:>14}  {:>12}  {:>21.2}\n",
            record.roll_number,
            record.student_name,
            record.month,
            record.present,
            record.absent,
            record.working_days,
            record.percentage,
        ));
    }
    out.trim_end().to_string()
}

/// Render records as pretty-printed JSON.
pub fn render_json(records: &[&AttendanceRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
