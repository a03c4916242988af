//! Record extraction: reads the `departments` and `employees` collections out of an
//! organisation document.

use crate::domain::model::{Department, Employee, OrgSnapshot};
use crate::utils::error::{IdKind, ReportError, Result};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

pub const DEPARTMENTS: &str = "departments";
pub const EMPLOYEES: &str = "employees";
const DOCUMENT: &str = "document";

/// Parses `document` and returns departments keyed by head id plus employees in document order.
pub fn extract_snapshot(document: &str) -> Result<OrgSnapshot> {
    let root: Value = serde_json::from_str(document)
        .map_err(|e| ReportError::malformed(DOCUMENT, None, format!("invalid JSON: {}", e)))?;

    let root = root
        .as_object()
        .ok_or_else(|| ReportError::malformed(DOCUMENT, None, "root is not an object"))?;

    let departments_by_head = extract_departments(collection(root, DEPARTMENTS)?)?;
    let employees = extract_employees(collection(root, EMPLOYEES)?)?;

    Ok(OrgSnapshot {
        departments_by_head,
        employees,
    })
}

fn collection<'a>(root: &'a Map<String, Value>, name: &str) -> Result<&'a [Value]> {
    match root.get(name) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ReportError::malformed(name, None, "collection is not an array")),
        None => Err(ReportError::malformed(name, None, "collection is missing")),
    }
}

fn extract_departments(items: &[Value]) -> Result<HashMap<i64, Department>> {
    let mut departments_by_head = HashMap::with_capacity(items.len());
    let mut seen_ids = HashSet::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let fields = RecordFields::new(DEPARTMENTS, index, item)?;
        let department = Department::new(
            fields.integer("id")?,
            fields.string("name")?,
            fields.integer("department_head_id")?,
        );

        if !seen_ids.insert(department.id) {
            return Err(ReportError::DuplicateId {
                kind: IdKind::Department,
                id: department.id,
            });
        }
        if departments_by_head.contains_key(&department.department_head_id) {
            return Err(ReportError::DuplicateId {
                kind: IdKind::DepartmentHead,
                id: department.department_head_id,
            });
        }
        departments_by_head.insert(department.department_head_id, department);
    }

    Ok(departments_by_head)
}

fn extract_employees(items: &[Value]) -> Result<Vec<Employee>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let fields = RecordFields::new(EMPLOYEES, index, item)?;
            Ok(Employee::new(
                fields.integer("id")?,
                fields.string("name")?,
                fields.optional_integer("manager_id")?,
            ))
        })
        .collect()
}

/// Typed field access for one record, carrying enough context to report where it failed.
struct RecordFields<'a> {
    collection: &'static str,
    index: usize,
    object: &'a Map<String, Value>,
}

impl<'a> RecordFields<'a> {
    fn new(collection: &'static str, index: usize, item: &'a Value) -> Result<Self> {
        let object = item.as_object().ok_or_else(|| {
            ReportError::malformed(collection, Some(index), "record is not an object")
        })?;
        Ok(Self {
            collection,
            index,
            object,
        })
    }

    fn error(&self, reason: String) -> ReportError {
        ReportError::malformed(self.collection, Some(self.index), reason)
    }

    fn field(&self, key: &str) -> Result<&'a Value> {
        self.object
            .get(key)
            .ok_or_else(|| self.error(format!("missing field '{}'", key)))
    }

    fn integer(&self, key: &str) -> Result<i64> {
        let value = self.field(key)?;
        value
            .as_i64()
            .ok_or_else(|| self.error(format!("field '{}' is not an integer: {}", key, value)))
    }

    /// Integer or explicit `null`; the field itself must be present.
    fn optional_integer(&self, key: &str) -> Result<Option<i64>> {
        match self.field(key)? {
            Value::Null => Ok(None),
            _ => self.integer(key).map(Some),
        }
    }

    fn string(&self, key: &str) -> Result<&'a str> {
        let value = self.field(key)?;
        value
            .as_str()
            .ok_or_else(|| self.error(format!("field '{}' is not a string: {}", key, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_malformed(
        result: Result<OrgSnapshot>,
        expected_collection: &str,
        expected_index: Option<usize>,
    ) {
        match result {
            Err(ReportError::MalformedRecord {
                collection, index, ..
            }) => {
                assert_eq!(collection, expected_collection);
                assert_eq!(index, expected_index);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_extracts_departments_and_employees() {
        let document = json!({
            "employees": [
                {"id": 10, "name": "Alice", "manager_id": null},
                {"id": 11, "name": "Bob", "manager_id": 10}
            ],
            "departments": [
                {"id": 1, "name": "Eng", "department_head_id": 10}
            ]
        })
        .to_string();

        let snapshot = extract_snapshot(&document).unwrap();

        assert_eq!(snapshot.departments_by_head.len(), 1);
        assert_eq!(
            snapshot.departments_by_head.get(&10),
            Some(&Department::new(1, "Eng", 10))
        );
        assert_eq!(
            snapshot.employees,
            vec![
                Employee::new(10, "Alice", None),
                Employee::new(11, "Bob", Some(10)),
            ]
        );
    }

    #[test]
    fn test_tolerates_layout_and_quoting_variation() {
        let document = r#"
        {"departments":[{ "department_head_id" :2,"name":"R, \"D\" }]",
              "id":   5 }],
         "employees" : [
            {"name": "Ann }, {", "manager_id":null,"id":2},
            {
                "id": 3,
                "manager_id":
                    2,
                "name": "Böb"
            }
         ]}"#;

        let snapshot = extract_snapshot(document).unwrap();

        assert_eq!(snapshot.departments_by_head[&2].name, "R, \"D\" }]");
        assert_eq!(snapshot.employees[0], Employee::new(2, "Ann }, {", None));
        assert_eq!(snapshot.employees[1], Employee::new(3, "Böb", Some(2)));
    }

    #[test]
    fn test_empty_collections() {
        let snapshot = extract_snapshot(r#"{"departments": [], "employees": []}"#).unwrap();
        assert!(snapshot.departments_by_head.is_empty());
        assert!(snapshot.employees.is_empty());
    }

    #[test]
    fn test_rejects_invalid_documents() {
        assert_malformed(extract_snapshot(r#"{"departments": [}"#), "document", None);
        assert_malformed(extract_snapshot("[]"), "document", None);
        assert_malformed(extract_snapshot(r#"{"employees": []}"#), "departments", None);
        assert_malformed(
            extract_snapshot(r#"{"departments": [], "employees": {}}"#),
            "employees",
            None,
        );
    }

    #[test]
    fn test_rejects_malformed_records() {
        let missing_name = json!({
            "departments": [],
            "employees": [
                {"id": 1, "name": "A", "manager_id": null},
                {"id": 2, "manager_id": 1}
            ]
        });
        assert_malformed(extract_snapshot(&missing_name.to_string()), "employees", Some(1));

        let missing_manager = json!({
            "departments": [],
            "employees": [{"id": 1, "name": "A"}]
        });
        assert_malformed(extract_snapshot(&missing_manager.to_string()), "employees", Some(0));

        let float_id = json!({
            "departments": [{"id": 1.5, "name": "Eng", "department_head_id": 1}],
            "employees": []
        });
        assert_malformed(extract_snapshot(&float_id.to_string()), "departments", Some(0));

        let string_head = json!({
            "departments": [{"id": 1, "name": "Eng", "department_head_id": "1"}],
            "employees": []
        });
        assert_malformed(extract_snapshot(&string_head.to_string()), "departments", Some(0));

        let not_an_object = json!({"departments": [42], "employees": []});
        assert_malformed(extract_snapshot(&not_an_object.to_string()), "departments", Some(0));
    }

    #[test]
    fn test_rejects_duplicate_department_ids() {
        let document = json!({
            "departments": [
                {"id": 1, "name": "Eng", "department_head_id": 10},
                {"id": 1, "name": "Ops", "department_head_id": 20}
            ],
            "employees": []
        });

        let err = extract_snapshot(&document.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::DuplicateId {
                kind: IdKind::Department,
                id: 1
            }
        ));
    }

    #[test]
    fn test_rejects_shared_department_head() {
        let document = json!({
            "departments": [
                {"id": 1, "name": "Eng", "department_head_id": 10},
                {"id": 2, "name": "Ops", "department_head_id": 10}
            ],
            "employees": []
        });

        let err = extract_snapshot(&document.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::DuplicateId {
                kind: IdKind::DepartmentHead,
                id: 10
            }
        ));
    }
}
