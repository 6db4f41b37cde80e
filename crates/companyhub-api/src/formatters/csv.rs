//! CSV output for company and employee resources.
//!
//! One line per record, no header row. Text fields are quoted with
//! embedded quotes doubled.

use companyhub_entity::Company;
use companyhub_service::dto::{CompanyDto, EmployeeDto};

/// A value that can be written as one CSV line.
pub trait CsvRecord {
    /// Append the fields of this record, without the line terminator.
    fn write_fields(&self, out: &mut Vec<String>);
}

/// Quote a text field.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Format records as CSV lines.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    let mut out = String::new();
    for record in records {
        let mut fields = Vec::new();
        record.write_fields(&mut fields);
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

impl CsvRecord for CompanyDto {
    fn write_fields(&self, out: &mut Vec<String>) {
        out.push(self.id.to_string());
        out.push(quote(&self.name));
        out.push(quote(&self.full_address));
    }
}

impl CsvRecord for EmployeeDto {
    fn write_fields(&self, out: &mut Vec<String>) {
        out.push(self.id.to_string());
        out.push(quote(&self.name));
        out.push(self.age.to_string());
        out.push(quote(&self.position));
    }
}

impl CsvRecord for Company {
    fn write_fields(&self, out: &mut Vec<String>) {
        out.push(self.id.to_string());
        out.push(quote(&self.name));
        out.push(quote(&self.address));
        out.push(quote(&self.country));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(quote("Admin \"Solutions\""), "\"Admin \"\"Solutions\"\"\"");
    }

    #[test]
    fn test_one_line_per_record() {
        let id = Uuid::new_v4();
        let companies = vec![CompanyDto {
            id,
            name: "IT_Solutions Ltd".to_string(),
            full_address: "583 Wall Dr. Gwynn Oak, MD 21207 USA".to_string(),
        }];
        assert_eq!(
            to_csv(&companies),
            format!("{id},\"IT_Solutions Ltd\",\"583 Wall Dr. Gwynn Oak, MD 21207 USA\"\r\n")
        );
    }
}
