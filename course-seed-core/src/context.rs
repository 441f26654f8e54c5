use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_NAME, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR};

/// Environment context packed in structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    // From COURSE_SEED_INPUT, registrar export to read, default "data/exportResult.xls"
    pub input: String,

    // From COURSE_SEED_OUTPUT_DIR, where schema.sql and seed.sql are written, default "db"
    pub output_dir: String,

    // From COURSE_SEED_SEED_ONLY, write seed.sql only and leave schema.sql alone, default false
    pub seed_only: bool,

    // From COURSE_SEED_COLUMNS_YAML, optional column layout override, default "" (built-in layout)
    pub columns_yaml: String,

    // From COURSE_SEED_SHEET, zero based worksheet index inside the workbook, default 0
    pub sheet_index: usize,

    // From COURSE_SEED_DB_NAME, D1 database name used in the follow-up hints
    pub db_name: String,

    // From COURSE_SEED_DEBUG Debug level: 0-no, 1-log per-row recoveries and parsed rows, default 0
    pub debug: i32,

    // From COURSE_SEED_CTXOUT output all context data (this struct), default false
    pub ctx_out: bool,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            input: DEFAULT_INPUT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            seed_only: false,
            columns_yaml: String::new(),
            sheet_index: 0,
            db_name: DEFAULT_DB_NAME.to_string(),
            debug: 0,
            ctx_out: false,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load context from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a context from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ctx = Self::default();

        if let Some(input) = lookup("COURSE_SEED_INPUT") {
            ctx.input = input;
        }

        if let Some(output_dir) = lookup("COURSE_SEED_OUTPUT_DIR") {
            ctx.output_dir = output_dir;
        }

        if let Some(columns_yaml) = lookup("COURSE_SEED_COLUMNS_YAML") {
            ctx.columns_yaml = columns_yaml;
        }

        if let Some(db_name) = lookup("COURSE_SEED_DB_NAME") {
            ctx.db_name = db_name;
        }

        if let Some(sheet) = lookup("COURSE_SEED_SHEET") {
            ctx.sheet_index = sheet.trim().parse().map_err(|err| {
                anyhow::anyhow!("COURSE_SEED_SHEET must be a sheet index, got '{}': {}", sheet, err)
            })?;
        }

        if let Some(debug) = lookup("COURSE_SEED_DEBUG") {
            ctx.debug = debug.parse().unwrap_or(0);
        }

        // Boolean flags from environment
        ctx.seed_only = lookup("COURSE_SEED_SEED_ONLY").is_some();
        ctx.ctx_out = lookup("COURSE_SEED_CTXOUT").is_some();

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let ctx = Context::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(ctx.input, DEFAULT_INPUT);
        assert_eq!(ctx.output_dir, DEFAULT_OUTPUT_DIR);
        assert_eq!(ctx.db_name, DEFAULT_DB_NAME);
        assert_eq!(ctx.sheet_index, 0);
        assert!(!ctx.seed_only);
        assert!(ctx.columns_yaml.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let ctx = Context::from_lookup(lookup_from(&[
            ("COURSE_SEED_INPUT", "2025-2026.xls"),
            ("COURSE_SEED_OUTPUT_DIR", "out"),
            ("COURSE_SEED_SEED_ONLY", ""),
            ("COURSE_SEED_SHEET", "2"),
            ("COURSE_SEED_DEBUG", "1"),
        ]))
        .unwrap();
        assert_eq!(ctx.input, "2025-2026.xls");
        assert_eq!(ctx.output_dir, "out");
        assert!(ctx.seed_only);
        assert_eq!(ctx.sheet_index, 2);
        assert_eq!(ctx.debug, 1);
    }

    #[test]
    fn test_bad_sheet_index_is_rejected() {
        let result = Context::from_lookup(lookup_from(&[("COURSE_SEED_SHEET", "first")]));
        assert!(result.is_err());
    }
}
