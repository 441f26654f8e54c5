//! Teacher cell parsing
//!
//! The registrar writes teachers as `name[code]`, several per cell when a
//! course is co-taught. Names without a bracketed code get a code derived
//! from the name itself.

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::constants::{SYNTHETIC_CODE_HEX_LEN, SYNTHETIC_CODE_PREFIX};
use crate::error::Result;

/// One teacher reference parsed out of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherRef {
    pub name: String,
    pub code: String,
    pub synthetic: bool,
}

/// Splits teacher cells into `TeacherRef`s
#[derive(Debug, Clone)]
pub struct TeacherParser {
    separators: Regex,
    token: Regex,
}

impl TeacherParser {
    pub fn new() -> Result<Self> {
        Ok(TeacherParser {
            separators: Regex::new(r"[,;，；/]")?,
            token: Regex::new(r"^(.*?)\s*\[\s*([^\[\]\s]+)\s*\]")?,
        })
    }

    /// Parse every teacher in a cell, in cell order
    pub fn parse(&self, raw: &str) -> Vec<TeacherRef> {
        self.separators
            .split(raw)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| self.parse_token(token))
            .collect()
    }

    fn parse_token(&self, token: &str) -> TeacherRef {
        if let Some(caps) = self.token.captures(token) {
            let code = caps[2].to_string();
            let name = caps[1].trim();
            let name = if name.is_empty() { code.clone() } else { name.to_string() };
            return TeacherRef {
                name,
                code,
                synthetic: false,
            };
        }

        TeacherRef {
            name: token.to_string(),
            code: synthetic_code(token),
            synthetic: true,
        }
    }
}

/// Stable placeholder code for a teacher listed without one
pub fn synthetic_code(name: &str) -> String {
    let digest = hex::encode(Sha256::digest(name.trim().as_bytes()));
    format!("{}{}", SYNTHETIC_CODE_PREFIX, &digest[..SYNTHETIC_CODE_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TeacherParser {
        TeacherParser::new().unwrap()
    }

    #[test]
    fn test_single_teacher_with_code() {
        let refs = parser().parse("朱奇伟[185450]");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "朱奇伟");
        assert_eq!(refs[0].code, "185450");
        assert!(!refs[0].synthetic);
    }

    #[test]
    fn test_multiple_teachers_all_separators() {
        let refs = parser().parse("张三[1001], 李四[1002]；王五[1003];赵六[1004]，钱七[1005]/孙八[1006]");
        let codes: Vec<&str> = refs.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["1001", "1002", "1003", "1004", "1005", "1006"]);
        assert_eq!(refs[1].name, "李四");
    }

    #[test]
    fn test_whitespace_around_code() {
        let refs = parser().parse("  陈明 [ 2040 ] ");
        assert_eq!(refs[0].name, "陈明");
        assert_eq!(refs[0].code, "2040");
    }

    #[test]
    fn test_bare_name_gets_synthetic_code() {
        let refs = parser().parse("外聘教师");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "外聘教师");
        assert!(refs[0].synthetic);
        assert!(refs[0].code.starts_with(SYNTHETIC_CODE_PREFIX));
        assert_eq!(
            refs[0].code.len(),
            SYNTHETIC_CODE_PREFIX.len() + SYNTHETIC_CODE_HEX_LEN
        );
    }

    #[test]
    fn test_synthetic_code_is_stable_and_trimmed() {
        assert_eq!(synthetic_code("外聘教师"), synthetic_code("  外聘教师 "));
        assert_ne!(synthetic_code("外聘教师"), synthetic_code("外聘教授"));
    }

    #[test]
    fn test_code_only_token_uses_code_as_name() {
        let refs = parser().parse("[185450]");
        assert_eq!(refs[0].name, "185450");
        assert_eq!(refs[0].code, "185450");
    }

    #[test]
    fn test_empty_cell_and_empty_tokens() {
        assert!(parser().parse("").is_empty());
        assert!(parser().parse("   ").is_empty());
        assert_eq!(parser().parse("张三[1001],,").len(), 1);
    }
}
