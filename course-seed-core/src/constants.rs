// Constants used throughout the course seed tools

// Default paths and names
pub const DEFAULT_INPUT: &str = "data/exportResult.xls";
pub const DEFAULT_OUTPUT_DIR: &str = "db";
pub const DEFAULT_DB_NAME: &str = "ouc-course-review";
pub const SCHEMA_FILE: &str = "schema.sql";
pub const SEED_FILE: &str = "seed.sql";

// Registrar export column offsets
// 0: course sequence, 5: schedule, 6: class name, 8: enrolled, 9: capacity,
// 12: start week, 13: week count are present in the export but not imported
pub const COL_COURSE_CODE: usize = 1;
pub const COL_COURSE_NAME: usize = 2;
pub const COL_CATEGORY: usize = 3;
pub const COL_DEPARTMENT: usize = 4;
pub const COL_TEACHER: usize = 7;
pub const COL_CREDITS: usize = 10;
pub const COL_HOURS: usize = 11;

// Teacher codes synthesized from names start with this prefix
pub const SYNTHETIC_CODE_PREFIX: &str = "anon-";
pub const SYNTHETIC_CODE_HEX_LEN: usize = 16;

// Summary labels
pub const UNASSIGNED: &str = "(unassigned)";
pub const UNCATEGORIZED: &str = "(uncategorized)";

pub const NULL: &str = "NULL";
