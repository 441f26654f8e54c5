//! Column layout of the registrar export
//!
//! The export is positional: each field lives at a fixed column offset. The
//! built-in layout matches the registrar's current export; a YAML file can
//! move individual columns when the registrar reorders the sheet.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    COL_CATEGORY, COL_COURSE_CODE, COL_COURSE_NAME, COL_CREDITS, COL_DEPARTMENT, COL_HOURS,
    COL_TEACHER,
};
use crate::error::{Result, SeedError};

/// Zero based column offsets for every imported field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnLayout {
    pub course_code: usize,
    pub course_name: usize,
    pub category: usize,
    pub department: usize,
    pub teacher: usize,
    pub credits: usize,
    pub hours: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            course_code: COL_COURSE_CODE,
            course_name: COL_COURSE_NAME,
            category: COL_CATEGORY,
            department: COL_DEPARTMENT,
            teacher: COL_TEACHER,
            credits: COL_CREDITS,
            hours: COL_HOURS,
        }
    }
}

impl ColumnLayout {
    /// Parse a layout from YAML; omitted keys keep their default offset
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a layout file, or the built-in layout when no path is configured
    pub fn load(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::default());
        }
        if !Path::new(path).is_file() {
            return Err(SeedError::Config(format!(
                "column layout file not found: {}",
                path
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
