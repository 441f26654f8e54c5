//! Course review database schema (SQLite / Cloudflare D1 dialect)

/// Full schema, safe to apply on an existing database
pub const SCHEMA_SQL: &str = r#"-- Course review database schema
-- Generated by import_courses, do not edit by hand

-- departments
CREATE TABLE IF NOT EXISTS departments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL UNIQUE
);

-- teachers
CREATE TABLE IF NOT EXISTS teachers (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL,
    teacher_code  TEXT    NOT NULL UNIQUE,
    department_id INTEGER,
    FOREIGN KEY (department_id) REFERENCES departments(id)
);
CREATE INDEX IF NOT EXISTS idx_teachers_dept ON teachers(department_id);
CREATE INDEX IF NOT EXISTS idx_teachers_name ON teachers(name);

-- courses, one row per course code
CREATE TABLE IF NOT EXISTS courses (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    course_code   TEXT    NOT NULL UNIQUE,
    name          TEXT    NOT NULL,
    category      TEXT,
    department_id INTEGER,
    credits       REAL    DEFAULT 0,
    hours         INTEGER DEFAULT 0,
    FOREIGN KEY (department_id) REFERENCES departments(id)
);
CREATE INDEX IF NOT EXISTS idx_courses_dept ON courses(department_id);
CREATE INDEX IF NOT EXISTS idx_courses_name ON courses(name);

-- course <-> teacher
CREATE TABLE IF NOT EXISTS course_teachers (
    course_id  INTEGER NOT NULL,
    teacher_id INTEGER NOT NULL,
    PRIMARY KEY (course_id, teacher_id),
    FOREIGN KEY (course_id)  REFERENCES courses(id),
    FOREIGN KEY (teacher_id) REFERENCES teachers(id)
);
CREATE INDEX IF NOT EXISTS idx_course_teachers_teacher ON course_teachers(teacher_id);

-- users (campus email sign-in, no password)
CREATE TABLE IF NOT EXISTS users (
    id         INTEGER  PRIMARY KEY AUTOINCREMENT,
    email      TEXT     NOT NULL UNIQUE,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- course comments, one level of replies
CREATE TABLE IF NOT EXISTS comments (
    id         INTEGER  PRIMARY KEY AUTOINCREMENT,
    course_id  INTEGER  NOT NULL,
    parent_id  INTEGER,
    user_id    INTEGER,
    nickname   TEXT     DEFAULT '匿名用户',
    content    TEXT     NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (course_id) REFERENCES courses(id),
    FOREIGN KEY (parent_id) REFERENCES comments(id),
    FOREIGN KEY (user_id)   REFERENCES users(id)
);
CREATE INDEX IF NOT EXISTS idx_comments_course ON comments(course_id);
CREATE INDEX IF NOT EXISTS idx_comments_parent ON comments(parent_id);

-- course ratings
CREATE TABLE IF NOT EXISTS ratings (
    id         INTEGER  PRIMARY KEY AUTOINCREMENT,
    course_id  INTEGER  NOT NULL,
    user_id    INTEGER,
    score      INTEGER  NOT NULL CHECK(score BETWEEN 1 AND 5),
    ip_hash    TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (course_id) REFERENCES courses(id),
    FOREIGN KEY (user_id)   REFERENCES users(id)
);
CREATE INDEX IF NOT EXISTS idx_ratings_course ON ratings(course_id);

-- teacher comments, one level of replies
CREATE TABLE IF NOT EXISTS teacher_comments (
    id         INTEGER  PRIMARY KEY AUTOINCREMENT,
    teacher_id INTEGER  NOT NULL,
    parent_id  INTEGER,
    user_id    INTEGER,
    nickname   TEXT     DEFAULT '匿名用户',
    content    TEXT     NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (teacher_id) REFERENCES teachers(id),
    FOREIGN KEY (parent_id)  REFERENCES teacher_comments(id),
    FOREIGN KEY (user_id)    REFERENCES users(id)
);
CREATE INDEX IF NOT EXISTS idx_teacher_comments_teacher ON teacher_comments(teacher_id);
CREATE INDEX IF NOT EXISTS idx_teacher_comments_parent  ON teacher_comments(parent_id);

-- teacher ratings
CREATE TABLE IF NOT EXISTS teacher_ratings (
    id         INTEGER  PRIMARY KEY AUTOINCREMENT,
    teacher_id INTEGER  NOT NULL,
    user_id    INTEGER,
    score      INTEGER  NOT NULL CHECK(score BETWEEN 1 AND 5),
    ip_hash    TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (teacher_id) REFERENCES teachers(id),
    FOREIGN KEY (user_id)    REFERENCES users(id)
);
CREATE INDEX IF NOT EXISTS idx_teacher_ratings_teacher ON teacher_ratings(teacher_id);
"#;

/// Tables created by `SCHEMA_SQL`, in creation order
pub const TABLES: [&str; 9] = [
    "departments",
    "teachers",
    "courses",
    "course_teachers",
    "users",
    "comments",
    "ratings",
    "teacher_comments",
    "teacher_ratings",
];
