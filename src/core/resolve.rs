//! Department resolution by walking an employee's manager chain.

use crate::domain::model::{Department, Employee};
use crate::utils::error::{ReportError, Result};
use std::collections::{HashMap, HashSet};

/// Read-only view over extracted records. Shareable across threads; each
/// [`resolve`](Self::resolve) call keeps its own traversal state.
pub struct HierarchyResolver<'a> {
    departments_by_head: &'a HashMap<i64, Department>,
    employees_by_id: &'a HashMap<i64, &'a Employee>,
    corporate: Department,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(
        departments_by_head: &'a HashMap<i64, Department>,
        employees_by_id: &'a HashMap<i64, &'a Employee>,
    ) -> Self {
        Self {
            departments_by_head,
            employees_by_id,
            corporate: Department::corporate(),
        }
    }

    /// Walks up from `employee` until it reaches a department head (their department)
    /// or an employee without a manager (Corporate).
    pub fn resolve(&self, employee: &Employee) -> Result<&Department> {
        let mut chain = vec![employee.id];
        let mut visited = HashSet::from([employee.id]);
        let mut current = employee;

        loop {
            if let Some(department) = self.departments_by_head.get(&current.id) {
                return Ok(department);
            }

            let Some(manager_id) = current.manager_id else {
                return Ok(&self.corporate);
            };

            let manager = self.employees_by_id.get(&manager_id).ok_or(
                ReportError::DanglingManagerReference {
                    employee_id: current.id,
                    manager_id,
                },
            )?;

            chain.push(manager_id);
            if !visited.insert(manager_id) {
                return Err(ReportError::CyclicManagerChain {
                    employee_id: employee.id,
                    chain,
                });
            }

            current = *manager;
        }
    }
}
