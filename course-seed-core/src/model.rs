//! Normalized entity graph
//!
//! Entities are keyed by their natural key: department name, teacher code and
//! course code. Ordered maps keep iteration deterministic for the emitter.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Teacher registered under a registrar (or synthesized) code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
    pub department_id: Option<u32>,
    /// True when the code was derived from the name because the cell had none
    #[serde(default)]
    pub synthetic: bool,
}

/// Course attributes taken from the first row carrying its code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub category: String,
    pub department_id: Option<u32>,
    pub credits: f64,
    pub hours: i64,
}

/// Deduplicated departments, teachers, courses and course-teacher links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseGraph {
    /// Department name to sequential id, ids start at 1
    pub departments: BTreeMap<String, u32>,
    /// Teacher code to teacher
    pub teachers: BTreeMap<String, Teacher>,
    /// Course code to course
    pub courses: BTreeMap<String, Course>,
    /// (course code, teacher code) pairs
    pub course_teachers: BTreeSet<(String, String)>,
}

impl CourseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Departments ordered by id
    pub fn departments_by_id(&self) -> Vec<(u32, &str)> {
        let mut departments: Vec<(u32, &str)> = self
            .departments
            .iter()
            .map(|(name, id)| (*id, name.as_str()))
            .collect();
        departments.sort_by_key(|(id, _)| *id);
        departments
    }

    /// Reverse lookup of a department name
    pub fn department_name(&self, id: u32) -> Option<&str> {
        self.departments
            .iter()
            .find(|(_, did)| **did == id)
            .map(|(name, _)| name.as_str())
    }
}
