//! Course Seed Core Library
//!
//! Turns the registrar's yearly course export into seed data for the course
//! review database: rows are normalized into departments, teachers, courses
//! and course-teacher links, then rendered as idempotent SQL.

pub mod constants;
pub mod context;
pub mod emit;
pub mod error;
pub mod import;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod sheet;
pub mod summary;
pub mod teacher;

// Re-export commonly used items
pub use context::Context;
pub use error::{Result, SeedError};
pub use import::Import;
pub use layout::ColumnLayout;
pub use model::{Course, CourseGraph, Teacher};
pub use normalize::{normalize, NormalizeStats, Normalizer};
pub use summary::Summary;
