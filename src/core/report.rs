//! Report construction: joins employees with their resolved department and manager
//! name, orders the rows and renders them.

use crate::core::resolve::HierarchyResolver;
use crate::domain::model::{Employee, OrgSnapshot, Report, ReportRow};
use crate::utils::error::{IdKind, ReportError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const HEADER: [&str; 4] = ["id", "name", "department", "manager"];

pub fn build_report(snapshot: &OrgSnapshot) -> Result<Report> {
    let employees_by_id = index_employees(&snapshot.employees)?;
    let resolver = HierarchyResolver::new(&snapshot.departments_by_head, &employees_by_id);

    let mut rows = snapshot
        .employees
        .iter()
        .map(|employee| {
            let department = resolver.resolve(employee)?.clone();
            let manager_name = employee
                .manager_id
                .and_then(|id| employees_by_id.get(&id))
                .map(|manager| manager.name.clone())
                .unwrap_or_default();

            Ok(ReportRow {
                id: employee.id,
                name: employee.name.clone(),
                department,
                manager_name,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // stable: fully tied rows keep document order
    rows.sort_by(compare_rows);

    Ok(Report { rows })
}

pub fn index_employees(employees: &[Employee]) -> Result<HashMap<i64, &Employee>> {
    let mut by_id = HashMap::with_capacity(employees.len());
    for employee in employees {
        if by_id.insert(employee.id, employee).is_some() {
            return Err(ReportError::DuplicateId {
                kind: IdKind::Employee,
                id: employee.id,
            });
        }
    }
    Ok(by_id)
}

/// Department name, then rows without a manager, then department heads, then employee name.
pub fn compare_rows(a: &ReportRow, b: &ReportRow) -> Ordering {
    a.department
        .name
        .cmp(&b.department.name)
        .then_with(|| b.has_no_manager().cmp(&a.has_no_manager()))
        .then_with(|| b.is_department_head().cmp(&a.is_department_head()))
        .then_with(|| a.name.cmp(&b.name))
}

#[derive(Serialize)]
struct JsonRow<'a> {
    id: i64,
    name: &'a str,
    department: &'a str,
    manager: &'a str,
}

impl Report {
    /// Header line followed by one CSV line per row.
    pub fn lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_record(&HEADER)?);

        for row in &self.rows {
            let id = row.id.to_string();
            lines.push(render_record(&[
                id.as_str(),
                row.name.as_str(),
                row.department.name.as_str(),
                row.manager_name.as_str(),
            ])?);
        }

        Ok(lines)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut csv = self.lines()?.join("\n");
        csv.push('\n');
        Ok(csv)
    }

    pub fn to_json(&self) -> Result<String> {
        let rows: Vec<JsonRow<'_>> = self
            .rows
            .iter()
            .map(|row| JsonRow {
                id: row.id,
                name: &row.name,
                department: &row.department.name,
                manager: &row.manager_name,
            })
            .collect();

        Ok(serde_json::to_string_pretty(&rows)?)
    }
}

/// One CSV record without its terminator, quoted only where a field needs it.
fn render_record(fields: &[&str]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| {
            ReportError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })?;
    let mut line = String::from_utf8(bytes).map_err(|e| {
        ReportError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
