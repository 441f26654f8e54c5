//! Row normalization
//!
//! Single pass over the registrar rows. Every entity is registered under its
//! natural key the first time it is seen; later rows for the same key only
//! add course-teacher links.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::layout::ColumnLayout;
use crate::model::{Course, CourseGraph, Teacher};
use crate::teacher::{TeacherParser, TeacherRef};

/// Counters collected while normalizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub rows_seen: usize,
    /// Rows whose course code was blank
    pub rows_without_course: usize,
    /// Non-empty credits/hours cells that did not parse and became 0
    pub malformed_numbers: usize,
    pub synthetic_teachers: usize,
}

/// Builds a `CourseGraph` from raw rows
#[derive(Debug)]
pub struct Normalizer {
    layout: ColumnLayout,
    parser: TeacherParser,
    graph: CourseGraph,
    stats: NormalizeStats,
}

impl Normalizer {
    pub fn new(layout: ColumnLayout) -> Result<Self> {
        Ok(Normalizer {
            layout,
            parser: TeacherParser::new()?,
            graph: CourseGraph::new(),
            stats: NormalizeStats::default(),
        })
    }

    /// Fold one data row (header already removed) into the graph
    pub fn push_row(&mut self, row: &[String]) {
        self.stats.rows_seen += 1;
        // header occupies spreadsheet row 1
        let line = self.stats.rows_seen + 1;

        let department_id = self.register_department(cell(row, self.layout.department));

        let teachers = self.parser.parse(cell(row, self.layout.teacher));
        for teacher in &teachers {
            self.register_teacher(teacher, department_id);
        }

        let course_code = cell(row, self.layout.course_code).trim();
        if course_code.is_empty() {
            self.stats.rows_without_course += 1;
            debug!("Row {}: blank course code, no course created", line);
            return;
        }

        if !self.graph.courses.contains_key(course_code) {
            let credits = match parse_credits(cell(row, self.layout.credits)) {
                Ok(credits) => credits,
                Err(raw) => {
                    self.stats.malformed_numbers += 1;
                    debug!("Row {}: credits '{}' is not a number, using 0", line, raw);
                    0.0
                }
            };
            let hours = match parse_hours(cell(row, self.layout.hours)) {
                Ok(hours) => hours,
                Err(raw) => {
                    self.stats.malformed_numbers += 1;
                    debug!("Row {}: hours '{}' is not a number, using 0", line, raw);
                    0
                }
            };

            let course = Course {
                name: cell(row, self.layout.course_name).trim().to_string(),
                category: cell(row, self.layout.category).trim().to_string(),
                department_id,
                credits,
                hours,
            };
            debug!("Row {}: new course {} ({})", line, course_code, course.name);
            self.graph.courses.insert(course_code.to_string(), course);
        }

        for teacher in teachers {
            self.graph
                .course_teachers
                .insert((course_code.to_string(), teacher.code));
        }
    }

    pub fn finish(self) -> (CourseGraph, NormalizeStats) {
        (self.graph, self.stats)
    }

    fn register_department(&mut self, raw: &str) -> Option<u32> {
        let name = raw.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(id) = self.graph.departments.get(name) {
            return Some(*id);
        }
        let id = self.graph.departments.len() as u32 + 1;
        self.graph.departments.insert(name.to_string(), id);
        Some(id)
    }

    fn register_teacher(&mut self, teacher: &TeacherRef, department_id: Option<u32>) {
        if self.graph.teachers.contains_key(&teacher.code) {
            return;
        }

        // Same printed name on both sides may be one person or two; keep both and flag it
        let namesake = self.graph.teachers.iter().find(|(_, known)| {
            known.name == teacher.name && known.synthetic != teacher.synthetic
        });
        if let Some((code, _)) = namesake {
            warn!(
                "Teacher '{}' appears both with and without a registrar code ({} / {})",
                teacher.name, code, teacher.code
            );
        }

        if teacher.synthetic {
            self.stats.synthetic_teachers += 1;
        }
        self.graph.teachers.insert(
            teacher.code.clone(),
            Teacher {
                name: teacher.name.clone(),
                department_id,
                synthetic: teacher.synthetic,
            },
        );
    }
}

/// Normalize a full sheet of data rows
pub fn normalize<R>(rows: &[R], layout: &ColumnLayout) -> Result<(CourseGraph, NormalizeStats)>
where
    R: AsRef<[String]>,
{
    let mut normalizer = Normalizer::new(layout.clone())?;
    for row in rows {
        normalizer.push_row(row.as_ref());
    }
    Ok(normalizer.finish())
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Credits as a decimal; blank is 0.0, anything else unparseable is returned as `Err`
pub fn parse_credits(raw: &str) -> std::result::Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(trimmed.to_string()),
    }
}

/// Hours as an integer; decimals are truncated toward zero
pub fn parse_hours(raw: &str) -> std::result::Result<i64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(trimmed.to_string()),
    }
}
