//! Import summary printed after normalization

use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::constants::{UNASSIGNED, UNCATEGORIZED};
use crate::model::CourseGraph;
use crate::normalize::NormalizeStats;

/// Label and course count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub courses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub departments: usize,
    pub teachers: usize,
    pub courses: usize,
    pub course_teachers: usize,
    pub stats: NormalizeStats,
    pub by_department: Vec<Bucket>,
    pub by_category: Vec<Bucket>,
}

impl Summary {
    pub fn new(graph: &CourseGraph, stats: &NormalizeStats) -> Self {
        let mut by_department: HashMap<String, usize> = HashMap::new();
        let mut by_category: HashMap<String, usize> = HashMap::new();

        for course in graph.courses.values() {
            let department = course
                .department_id
                .and_then(|id| graph.department_name(id))
                .unwrap_or(UNASSIGNED);
            *by_department.entry(department.to_string()).or_default() += 1;

            let category = if course.category.is_empty() {
                UNCATEGORIZED
            } else {
                course.category.as_str()
            };
            *by_category.entry(category.to_string()).or_default() += 1;
        }

        Summary {
            departments: graph.departments.len(),
            teachers: graph.teachers.len(),
            courses: graph.courses.len(),
            course_teachers: graph.course_teachers.len(),
            stats: stats.clone(),
            by_department: buckets(by_department),
            by_category: buckets(by_category),
        }
    }

    /// Write the summary through tracing
    pub fn log(&self) {
        info!("Departments:      {}", self.departments);
        info!("Teachers:         {}", self.teachers);
        info!("Courses:          {}", self.courses);
        info!("Course teachers:  {}", self.course_teachers);
        info!(
            "Rows read: {}, without course code: {}, malformed numbers: {}, teachers without code: {}",
            self.stats.rows_seen,
            self.stats.rows_without_course,
            self.stats.malformed_numbers,
            self.stats.synthetic_teachers
        );

        info!("Courses by department:");
        for bucket in &self.by_department {
            info!("  {}: {}", bucket.label, bucket.courses);
        }

        info!("Courses by category:");
        for bucket in &self.by_category {
            info!("  {}: {}", bucket.label, bucket.courses);
        }
    }
}

// Largest first, ties by label
fn buckets(counts: HashMap<String, usize>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, courses)| Bucket { label, courses })
        .collect();
    buckets.sort_by(|a, b| b.courses.cmp(&a.courses).then_with(|| a.label.cmp(&b.label)));
    buckets
}
