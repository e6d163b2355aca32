use std::collections::HashMap;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::record::{percentage, title_case, AttendanceRecord, RecordKey, UpdateField};

/// In-memory attendance ledger.
///
/// Records live in a `Vec` in insertion order; a `(roll number, month)`
/// index maps each key to its position for uniqueness checks and lookups.
/// Records are never deleted, so positions are stable.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: Vec<AttendanceRecord>,
    index: HashMap<RecordKey, usize>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously stored records, preserving order.
    ///
    /// Duplicate `(roll number, month)` pairs are rejected so a hand-edited
    /// file cannot smuggle in conflicting rows.
    pub fn from_records(records: Vec<AttendanceRecord>) -> LedgerResult<Self> {
        let mut ledger = Self::new();
        for record in records {
            ledger.insert(record)?;
        }
        Ok(ledger)
    }

    /// Number of records in the ledger.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Look up the record for `(roll_number, month)`. The month is
    /// title-cased before the lookup.
    pub fn get(&self, roll_number: i64, month: &str) -> Option<&AttendanceRecord> {
        let key = RecordKey::new(roll_number, title_case(month));
        self.index.get(&key).map(|&position| &self.records[position])
    }

    /// Validate and append a new record, returning a copy of it.
    ///
    /// Fails with a [`ValidationError`] when counts are negative or
    /// `present + absent` exceeds the working days, and with
    /// [`LedgerError::Duplicate`] when the `(roll number, month)` pair
    /// already exists. On failure the ledger is unchanged.
    pub fn add_record(
        &mut self,
        roll_number: i64,
        student_name: &str,
        month: &str,
        present: i64,
        absent: i64,
        working_days: i64,
    ) -> LedgerResult<AttendanceRecord> {
        validate_attendance(present, absent, working_days)?;

        let record = AttendanceRecord {
            roll_number,
            student_name: title_case(student_name),
            month: title_case(month),
            present,
            absent,
            working_days,
            percentage: percentage(present, working_days),
        };
        self.insert(record.clone())?;
        debug!(roll_number, month = %record.month, "record added");
        Ok(record)
    }

    /// Add `delta` days to one counter of an existing record, returning a
    /// copy of the updated record.
    ///
    /// Working days stay unchanged; the invariant is re-validated against
    /// the updated counts and the percentage recomputed. A negative delta
    /// is a [`ValidationError`]; a missing record is
    /// [`LedgerError::NotFound`]. On failure the ledger is unchanged.
    pub fn update_attendance(
        &mut self,
        roll_number: i64,
        month: &str,
        delta: i64,
        field: UpdateField,
    ) -> LedgerResult<AttendanceRecord> {
        if delta < 0 {
            return Err(ValidationError::NegativeDelta { delta }.into());
        }

        let month = title_case(month);
        let key = RecordKey::new(roll_number, month.clone());
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => return Err(LedgerError::NotFound { roll_number, month }),
        };

        let current = &self.records[position];
        let (present, absent) = match field {
            UpdateField::Present => (current.present + delta, current.absent),
            UpdateField::Absent => (current.present, current.absent + delta),
        };
        validate_attendance(present, absent, current.working_days)?;

        let record = &mut self.records[position];
        record.present = present;
        record.absent = absent;
        record.percentage = percentage(present, record.working_days);
        debug!(roll_number, month = %record.month, field = %field, delta, "attendance updated");
        Ok(record.clone())
    }

    /// All records in insertion order. An empty slice means the ledger has
    /// no records yet; callers report that distinctly.
    pub fn full_report(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// The ordered subsequence of records for one student. An empty result
    /// means the roll number has no records; it is not an error.
    pub fn student_report(&self, roll_number: i64) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.roll_number == roll_number)
            .collect()
    }

    fn insert(&mut self, record: AttendanceRecord) -> LedgerResult<()> {
        let key = record.key();
        if self.index.contains_key(&key) {
            return Err(LedgerError::Duplicate {
                roll_number: record.roll_number,
                month: record.month,
            });
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
        Ok(())
    }
}

/// Check the attendance invariant: counts are non-negative and
/// `present + absent` never exceeds the working days.
pub fn validate_attendance(
    present: i64,
    absent: i64,
    working_days: i64,
) -> Result<(), ValidationError> {
    if present < 0 || absent < 0 || working_days < 0 {
        return Err(ValidationError::NegativeDays);
    }
    if present + absent > working_days {
        return Err(ValidationError::ExceedsWorkingDays {
            present,
            absent,
            working_days,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_asha() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_record(1, "Asha", "June", 20, 2, 22).unwrap();
        ledger
    }

    #[test]
    fn add_computes_percentage() {
        let ledger = ledger_with_asha();
        let record = ledger.get(1, "June").unwrap();
        assert_eq!(record.student_name, "Asha");
        assert_eq!(record.percentage, 90.91);
    }

    #[test]
    fn add_normalizes_name_and_month() {
        let mut ledger = Ledger::new();
        let record = ledger.add_record(3, "mary anne", "jUNe", 10, 1, 20).unwrap();
        assert_eq!(record.student_name, "Mary Anne");
        assert_eq!(record.month, "June");
    }

    #[test]
    fn add_rejects_exceeding_working_days() {
        let mut ledger = Ledger::new();
        let error = ledger.add_record(1, "Asha", "June", 20, 5, 22).unwrap_err();
        assert_eq!(
            error,
            LedgerError::Validation(ValidationError::ExceedsWorkingDays {
                present: 20,
                absent: 5,
                working_days: 22,
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_rejects_negative_counts() {
        let mut ledger = Ledger::new();
        let error = ledger.add_record(1, "Asha", "June", -1, 0, 22).unwrap_err();
        assert_eq!(error, LedgerError::Validation(ValidationError::NegativeDays));
        assert!(ledger.is_empty());
    }

    #[test]
    fn duplicate_add_rejected_and_ledger_unchanged() {
        let mut ledger = ledger_with_asha();
        // Month normalization means "june" collides with "June".
        let error = ledger.add_record(1, "Asha", "june", 18, 2, 22).unwrap_err();
        assert_eq!(
            error,
            LedgerError::Duplicate {
                roll_number: 1,
                month: "June".into(),
            }
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(1, "June").unwrap().present, 20);
    }

    #[test]
    fn same_roll_different_month_is_allowed() {
        let mut ledger = ledger_with_asha();
        ledger.add_record(1, "Asha", "July", 19, 1, 21).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let mut ledger = Ledger::new();
        let error = ledger
            .update_attendance(7, "June", 1, UpdateField::Present)
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::NotFound {
                roll_number: 7,
                month: "June".into(),
            }
        );
    }

    #[test]
    fn update_rejects_negative_delta() {
        let mut ledger = ledger_with_asha();
        let error = ledger
            .update_attendance(1, "June", -3, UpdateField::Present)
            .unwrap_err();
        assert_eq!(
            error,
            LedgerError::Validation(ValidationError::NegativeDelta { delta: -3 })
        );
        assert_eq!(ledger.get(1, "June").unwrap().present, 20);
    }

    #[test]
    fn update_revalidates_invariant() {
        let mut ledger = ledger_with_asha();
        // 20 + 3 present plus 2 absent exceeds 22 working days.
        let error = ledger
            .update_attendance(1, "June", 3, UpdateField::Present)
            .unwrap_err();
        assert!(matches!(
            error,
            LedgerError::Validation(ValidationError::ExceedsWorkingDays { .. })
        ));
        let record = ledger.get(1, "June").unwrap();
        assert_eq!(record.present, 20);
        assert_eq!(record.percentage, 90.91);
    }

    #[test]
    fn update_zero_delta_is_a_noop() {
        let mut ledger = ledger_with_asha();
        let record = ledger
            .update_attendance(1, "June", 0, UpdateField::Absent)
            .unwrap();
        assert_eq!(record.present, 20);
        assert_eq!(record.absent, 2);
        assert_eq!(record.percentage, 90.91);
    }

    #[test]
    fn update_adds_present_and_recomputes() {
        let mut ledger = Ledger::new();
        ledger.add_record(2, "Ravi", "June", 10, 2, 22).unwrap();
        let record = ledger
            .update_attendance(2, "June", 5, UpdateField::Present)
            .unwrap();
        assert_eq!(record.present, 15);
        assert_eq!(record.working_days, 22);
        assert_eq!(record.percentage, percentage(15, 22));
    }

    #[test]
    fn update_adds_absent_without_touching_present() {
        let mut ledger = ledger_with_asha();
        let record = ledger
            .update_attendance(1, "june", 0, UpdateField::Absent)
            .unwrap();
        assert_eq!(record.absent, 2);
        assert_eq!(record.present, 20);
    }

    #[test]
    fn full_report_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.add_record(2, "Ravi", "June", 18, 2, 22).unwrap();
        ledger.add_record(1, "Asha", "June", 20, 2, 22).unwrap();
        ledger.add_record(2, "Ravi", "July", 19, 1, 21).unwrap();

        let rolls: Vec<i64> = ledger.full_report().iter().map(|r| r.roll_number).collect();
        assert_eq!(rolls, vec![2, 1, 2]);
    }

    #[test]
    fn student_report_filters_in_order() {
        let mut ledger = Ledger::new();
        ledger.add_record(2, "Ravi", "June", 18, 2, 22).unwrap();
        ledger.add_record(1, "Asha", "June", 20, 2, 22).unwrap();
        ledger.add_record(2, "Ravi", "July", 19, 1, 21).unwrap();

        let report = ledger.student_report(2);
        let months: Vec<&str> = report.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["June", "July"]);
    }

    #[test]
    fn student_report_empty_is_not_an_error() {
        let ledger = ledger_with_asha();
        assert!(ledger.student_report(2).is_empty());
    }

    #[test]
    fn from_records_preserves_order_and_indexes() {
        let original = ledger_with_asha();
        let rebuilt = Ledger::from_records(original.records().to_vec()).unwrap();
        assert_eq!(rebuilt.records(), original.records());
        assert!(rebuilt.get(1, "June").is_some());
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let mut records = ledger_with_asha().records().to_vec();
        records.push(records[0].clone());
        let error = Ledger::from_records(records).unwrap_err();
        assert!(matches!(error, LedgerError::Duplicate { .. }));
    }

    #[test]
    fn validate_attendance_boundary() {
        assert!(validate_attendance(20, 2, 22).is_ok());
        assert!(validate_attendance(0, 0, 0).is_ok());
        assert!(validate_attendance(12, 11, 22).is_err());
        assert!(validate_attendance(0, 0, -1).is_err());
    }
}
