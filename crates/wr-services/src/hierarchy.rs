//! Team hierarchy resolver
//!
//! Employees carry an optional `team_lead_id` back-reference; the resolver
//! walks those edges breadth-first to collect every direct and indirect
//! subordinate of a manager.

use std::collections::{HashMap, HashSet, VecDeque};

use wr_core::traits::Id;
use wr_models::Employee;

/// Collect all transitive subordinates of `manager_id`.
///
/// Traversal is breadth-first starting from direct reports, so the result
/// is in level order; no ordering is guaranteed within a level. The visited
/// set keeps the walk bounded even if the stored `team_lead_id` chain
/// contains a cycle.
pub fn subordinates_of(manager_id: Id, employees: &[Employee]) -> Vec<Employee> {
    // Invert the back-references once: lead -> direct reports
    let mut reports: HashMap<Id, Vec<&Employee>> = HashMap::new();
    for employee in employees {
        if let Some(lead_id) = employee.team_lead_id {
            reports.entry(lead_id).or_default().push(employee);
        }
    }

    let mut visited: HashSet<Id> = HashSet::new();
    visited.insert(manager_id);

    let mut queue: VecDeque<Id> = VecDeque::new();
    queue.push_back(manager_id);

    let mut result = Vec::new();
    while let Some(current) = queue.pop_front() {
        let Some(directs) = reports.get(&current) else {
            continue;
        };
        for report in directs {
            let Some(id) = report.id else {
                continue;
            };
            if visited.insert(id) {
                result.push((*report).clone());
                queue.push_back(id);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: Id, team_lead_id: Option<Id>) -> Employee {
        let mut e = Employee::new(format!("WR-{id:04}"), format!("e{id}@example.com"));
        e.id = Some(id);
        e.team_lead_id = team_lead_id;
        e
    }

    #[test]
    fn test_collects_transitive_reports() {
        // 1 leads 2 and 3; 2 leads 4; 4 leads 5; 6 is unrelated
        let employees = vec![
            employee(1, None),
            employee(2, Some(1)),
            employee(3, Some(1)),
            employee(4, Some(2)),
            employee(5, Some(4)),
            employee(6, None),
        ];

        let team = subordinates_of(1, &employees);
        let ids: Vec<Id> = team.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(&2) && ids.contains(&3) && ids.contains(&4) && ids.contains(&5));
        assert!(!ids.contains(&1));
        assert!(!ids.contains(&6));
    }

    #[test]
    fn test_level_order() {
        let employees = vec![
            employee(2, Some(1)),
            employee(4, Some(2)),
            employee(5, Some(4)),
        ];

        let ids: Vec<Id> = subordinates_of(1, &employees)
            .iter()
            .filter_map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2, 4, 5]);
    }

    #[test]
    fn test_no_reports() {
        let employees = vec![employee(1, None), employee(2, None)];
        assert!(subordinates_of(1, &employees).is_empty());
    }

    #[test]
    fn test_unknown_manager() {
        let employees = vec![employee(2, Some(1))];
        assert!(subordinates_of(99, &employees).is_empty());
    }

    #[test]
    fn test_cycle_through_root_terminates() {
        // 1 and 2 list each other as lead; without the visited set this
        // walk would never finish
        let employees = vec![employee(1, Some(2)), employee(2, Some(1))];

        let ids: Vec<Id> = subordinates_of(1, &employees)
            .iter()
            .filter_map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_duplicate_rows_appear_once() {
        // Corrupted data: the same id stored twice with different leads
        let employees = vec![
            employee(2, Some(1)),
            employee(3, Some(2)),
            employee(2, Some(3)),
        ];

        let mut ids: Vec<Id> = subordinates_of(1, &employees)
            .iter()
            .filter_map(|e| e.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_manager_self_reference_is_ignored() {
        // A manager accidentally listed as their own lead must not recurse
        let employees = vec![employee(1, Some(1)), employee(2, Some(1))];
        let ids: Vec<Id> = subordinates_of(1, &employees)
            .iter()
            .filter_map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }
}
