//! Seed SQL generation
//!
//! Every statement is `INSERT OR IGNORE` against a natural-key unique
//! column, so the seed can be replayed on a database that already holds it,
//! including one seeded from an earlier export. Foreign keys are looked up by
//! department name, course code and teacher code at apply time; the surrogate
//! ids written here are only claimed when still free, otherwise the database
//! assigns the next one. Output depends only on the graph: same graph, same
//! bytes.

use std::collections::HashMap;
use std::fmt::Write;

use crate::constants::NULL;
use crate::model::CourseGraph;

const HEADER: &str = "-- Course review seed data\n-- Generated by import_courses, do not edit by hand\n";

/// Quote a string literal, doubling single quotes
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Decimal rendered with at least one fractional digit
pub fn decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Preferred id, or `NULL` (next free id) when a row already holds it
pub fn id_if_free(table: &str, id: usize) -> String {
    format!(
        "CASE WHEN EXISTS (SELECT 1 FROM {} WHERE id = {}) THEN NULL ELSE {} END",
        table, id, id
    )
}

/// Department foreign key resolved by name, `NULL` when unknown
pub fn department_ref(graph: &CourseGraph, id: Option<u32>) -> String {
    match id.and_then(|id| graph.department_name(id)) {
        Some(name) => format!("(SELECT id FROM departments WHERE name = {})", quote(name)),
        None => NULL.to_string(),
    }
}

/// Surrogate ids handed out in sorted key order, starting at 1
fn surrogate_ids<'a, I>(keys: I) -> HashMap<&'a str, usize>
where
    I: Iterator<Item = &'a String>,
{
    keys.enumerate()
        .map(|(i, key)| (key.as_str(), i + 1))
        .collect()
}

/// Render the seed file for a graph
pub fn seed_sql(graph: &CourseGraph) -> String {
    let teacher_ids = surrogate_ids(graph.teachers.keys());
    let course_ids = surrogate_ids(graph.courses.keys());
    let mut out = String::new();

    out.push_str(HEADER);
    out.push('\n');

    out.push_str("-- departments\n");
    for (id, name) in graph.departments_by_id() {
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "INSERT OR IGNORE INTO departments (id, name) SELECT {}, {};",
            id_if_free("departments", id as usize),
            quote(name)
        );
    }
    out.push('\n');

    out.push_str("-- teachers\n");
    for (code, teacher) in &graph.teachers {
        let _ = writeln!(
            out,
            "INSERT OR IGNORE INTO teachers (id, name, teacher_code, department_id) SELECT {}, {}, {}, {};",
            id_if_free("teachers", teacher_ids[code.as_str()]),
            quote(&teacher.name),
            quote(code),
            department_ref(graph, teacher.department_id)
        );
    }
    out.push('\n');

    out.push_str("-- courses\n");
    for (code, course) in &graph.courses {
        let _ = writeln!(
            out,
            "INSERT OR IGNORE INTO courses (id, course_code, name, category, department_id, credits, hours) SELECT {}, {}, {}, {}, {}, {}, {};",
            id_if_free("courses", course_ids[code.as_str()]),
            quote(code),
            quote(&course.name),
            quote(&course.category),
            department_ref(graph, course.department_id),
            decimal(course.credits),
            course.hours
        );
    }
    out.push('\n');

    out.push_str("-- course_teachers\n");
    for (course_code, teacher_code) in &graph.course_teachers {
        let _ = writeln!(
            out,
            "INSERT OR IGNORE INTO course_teachers (course_id, teacher_id) SELECT c.id, t.id FROM courses c, teachers t WHERE c.course_code = {} AND t.teacher_code = {};",
            quote(course_code),
            quote(teacher_code)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnLayout;
    use crate::model::{Course, Teacher};
    use crate::normalize::normalize;

    fn sample_graph() -> CourseGraph {
        let mut graph = CourseGraph::new();
        graph.departments.insert("法学院".to_string(), 1);
        graph.departments.insert("O'Neil College".to_string(), 2);
        graph.teachers.insert(
            "185450".to_string(),
            Teacher {
                name: "朱奇伟".to_string(),
                department_id: Some(1),
                synthetic: false,
            },
        );
        graph.teachers.insert(
            "1002".to_string(),
            Teacher {
                name: "D'Arcy".to_string(),
                department_id: None,
                synthetic: false,
            },
        );
        graph.courses.insert(
            "FX110010".to_string(),
            Course {
                name: "刑法学".to_string(),
                category: "专业必修".to_string(),
                department_id: Some(1),
                credits: 3.0,
                hours: 48,
            },
        );
        graph.courses.insert(
            "EN100".to_string(),
            Course {
                name: "Writers' Workshop".to_string(),
                category: String::new(),
                department_id: Some(2),
                credits: 1.5,
                hours: 24,
            },
        );
        graph
            .course_teachers
            .insert(("FX110010".to_string(), "185450".to_string()));
        graph
            .course_teachers
            .insert(("FX110010".to_string(), "1002".to_string()));
        graph
            .course_teachers
            .insert(("EN100".to_string(), "1002".to_string()));
        graph
    }

    fn export_row(code: &str, dept: &str, teacher: &str) -> Vec<String> {
        let mut row = vec![String::new(); 12];
        row[1] = code.to_string();
        row[2] = format!("课程{}", code);
        row[3] = "通识".to_string();
        row[4] = dept.to_string();
        row[7] = teacher.to_string();
        row[10] = "2".to_string();
        row[11] = "32".to_string();
        row
    }

    /// Statements between a `-- name` marker and the next blank line
    fn section<'a>(sql: &'a str, name: &str) -> &'a str {
        let marker = format!("-- {}\n", name);
        let start = sql.find(&marker).map(|i| i + marker.len()).unwrap_or(sql.len());
        let rest = &sql[start..];
        &rest[..rest.find("\n\n").unwrap_or(rest.len())]
    }

    #[test]
    fn test_quote_doubles_single_quotes() {
        assert_eq!(quote("O'Neil"), "'O''Neil'");
        assert_eq!(quote("朱奇伟"), "'朱奇伟'");
    }

    #[test]
    fn test_decimal_formatting() {
        assert_eq!(decimal(2.0), "2.0");
        assert_eq!(decimal(1.5), "1.5");
        assert_eq!(decimal(0.0), "0.0");
    }

    #[test]
    fn test_department_ref_by_name() {
        let graph = sample_graph();
        assert_eq!(
            department_ref(&graph, Some(2)),
            "(SELECT id FROM departments WHERE name = 'O''Neil College')"
        );
        assert_eq!(department_ref(&graph, None), "NULL");
        assert_eq!(department_ref(&graph, Some(9)), "NULL");
    }

    #[test]
    fn test_statements_are_idempotent_inserts() {
        let sql = seed_sql(&sample_graph());
        for line in sql.lines().filter(|l| !l.is_empty() && !l.starts_with("--")) {
            assert!(line.starts_with("INSERT OR IGNORE INTO "), "{}", line);
            assert!(line.ends_with(';'), "{}", line);
            assert!(!line.contains(" VALUES "), "{}", line);
        }
    }

    #[test]
    fn test_surrogate_ids_follow_sorted_codes() {
        let sql = seed_sql(&sample_graph());
        assert!(sql.contains(
            "INSERT OR IGNORE INTO courses (id, course_code, name, category, department_id, credits, hours) SELECT CASE WHEN EXISTS (SELECT 1 FROM courses WHERE id = 1) THEN NULL ELSE 1 END, 'EN100', 'Writers'' Workshop', '', (SELECT id FROM departments WHERE name = 'O''Neil College'), 1.5, 24;"
        ));
        assert!(sql.contains(
            "INSERT OR IGNORE INTO courses (id, course_code, name, category, department_id, credits, hours) SELECT CASE WHEN EXISTS (SELECT 1 FROM courses WHERE id = 2) THEN NULL ELSE 2 END, 'FX110010', '刑法学', '专业必修', (SELECT id FROM departments WHERE name = '法学院'), 3.0, 48;"
        ));
        assert!(sql.contains(
            "INSERT OR IGNORE INTO teachers (id, name, teacher_code, department_id) SELECT CASE WHEN EXISTS (SELECT 1 FROM teachers WHERE id = 1) THEN NULL ELSE 1 END, 'D''Arcy', '1002', NULL;"
        ));
        assert!(sql.contains(
            "INSERT OR IGNORE INTO teachers (id, name, teacher_code, department_id) SELECT CASE WHEN EXISTS (SELECT 1 FROM teachers WHERE id = 2) THEN NULL ELSE 2 END, '朱奇伟', '185450', (SELECT id FROM departments WHERE name = '法学院');"
        ));
    }

    #[test]
    fn test_links_resolve_by_natural_key() {
        let sql = seed_sql(&sample_graph());
        let links: Vec<&str> = section(&sql, "course_teachers").lines().collect();
        assert_eq!(
            links,
            vec![
                "INSERT OR IGNORE INTO course_teachers (course_id, teacher_id) SELECT c.id, t.id FROM courses c, teachers t WHERE c.course_code = 'EN100' AND t.teacher_code = '1002';",
                "INSERT OR IGNORE INTO course_teachers (course_id, teacher_id) SELECT c.id, t.id FROM courses c, teachers t WHERE c.course_code = 'FX110010' AND t.teacher_code = '1002';",
                "INSERT OR IGNORE INTO course_teachers (course_id, teacher_id) SELECT c.id, t.id FROM courses c, teachers t WHERE c.course_code = 'FX110010' AND t.teacher_code = '185450';",
            ]
        );
    }

    #[test]
    fn test_departments_in_id_order() {
        let sql = seed_sql(&sample_graph());
        let law = sql.find("ELSE 1 END, '法学院';").unwrap();
        let oneil = sql.find("ELSE 2 END, 'O''Neil College';").unwrap();
        assert!(law < oneil);
    }

    #[test]
    fn test_row_order_does_not_change_entities() {
        let a1 = export_row("A1", "数学系", "张三[1001]");
        let b2 = export_row("B2", "物理系", "李四[1002]");
        let c3 = export_row("C3", "数学系", "王五[1003];张三[1001]");
        let layout = ColumnLayout::default();

        let (forward, _) = normalize(&[a1.clone(), b2.clone(), c3.clone()], &layout).unwrap();
        let (shuffled, _) = normalize(&[b2, c3, a1], &layout).unwrap();
        // department ids follow first sight and differ between the two orders
        assert_ne!(forward.departments, shuffled.departments);

        let forward_sql = seed_sql(&forward);
        let shuffled_sql = seed_sql(&shuffled);
        for name in ["teachers", "courses", "course_teachers"] {
            assert_eq!(section(&forward_sql, name), section(&shuffled_sql, name), "{}", name);
        }

        let courses: Vec<&str> = section(&forward_sql, "courses").lines().collect();
        assert_eq!(courses.len(), 3);
        for (i, code) in ["A1", "B2", "C3"].iter().enumerate() {
            let id = i + 1;
            assert!(
                courses[i].contains(&format!("ELSE {} END, '{}',", id, code)),
                "{}",
                courses[i]
            );
        }
    }
}
