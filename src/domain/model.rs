use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CORPORATE_DEPARTMENT_NAME: &str = "Corporate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub department_head_id: i64,
}

impl Department {
    pub fn new(id: i64, name: impl Into<String>, department_head_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            department_head_id,
        }
    }

    /// Fallback for employees no real department's head can reach.
    pub fn corporate() -> Self {
        Self::new(0, CORPORATE_DEPARTMENT_NAME, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// `None` for an organisational root such as the CEO.
    pub manager_id: Option<i64>,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>, manager_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            manager_id,
        }
    }
}

/// Records pulled out of one input document.
#[derive(Debug, Clone, Default)]
pub struct OrgSnapshot {
    pub departments_by_head: HashMap<i64, Department>,
    /// Document order.
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub id: i64,
    pub name: String,
    pub department: Department,
    pub manager_name: String,
}

impl ReportRow {
    pub fn is_department_head(&self) -> bool {
        self.id == self.department.department_head_id
    }

    pub fn has_no_manager(&self) -> bool {
        self.manager_name.is_empty()
    }
}

/// Ordered report rows, header excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Employee count per department name, in report order.
    pub fn department_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for row in &self.rows {
            match counts.last_mut() {
                Some((name, count)) if *name == row.department.name => *count += 1,
                _ => counts.push((row.department.name.as_str(), 1)),
            }
        }
        counts
    }
}
