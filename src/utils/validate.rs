//! 输入校验与规范化
//!
//! 返回 `&'static str` 的函数只做校验，`normalize_*` 返回规范化后的值。

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static GRADE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 -]{0,19}$").expect("Invalid grade regex"));

static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{1,10}$").expect("Invalid section regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()-]{6,20}$").expect("Invalid phone regex"));

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,20}$").expect("Invalid subject code regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 规范化邮箱：去空白并转小写
pub fn normalize_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    Ok(email)
}

pub fn normalize_name(name: &str) -> Result<String, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required");
    }
    if name.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(name.to_string())
}

/// 年级：如 `10`、`Grade 7`，原样保留大小写
pub fn normalize_grade_level(grade: &str) -> Result<String, &'static str> {
    let grade = grade.trim();
    if !GRADE_RE.is_match(grade) {
        return Err("Grade level must be 1-20 letters, digits, spaces or hyphens");
    }
    Ok(grade.to_string())
}

/// 班级：字母数字，统一转大写
pub fn normalize_section(section: &str) -> Result<String, &'static str> {
    let section = section.trim();
    if !SECTION_RE.is_match(section) {
        return Err("Section must be 1-10 letters or digits");
    }
    Ok(section.to_uppercase())
}

pub fn normalize_subject_code(code: &str) -> Result<String, &'static str> {
    let code = code.trim();
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("Subject code must be 2-20 letters, digits, underscores or hyphens");
    }
    Ok(code.to_uppercase())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 日期必须为 `YYYY-MM-DD`
pub fn parse_date(date: &str) -> Result<NaiveDate, &'static str> {
    let date = date.trim();
    if date.len() != 10 {
        return Err("Date must use the YYYY-MM-DD format");
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| "Date must use the YYYY-MM-DD format")
}

pub fn validate_date(date: &str) -> Result<(), &'static str> {
    parse_date(date).map(|_| ())
}

/// 时间必须为 `HH:MM`
pub fn validate_time(time: &str) -> Result<(), &'static str> {
    let time = time.trim();
    if time.len() != 5 {
        return Err("Time must use the HH:MM format");
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| "Time must use the HH:MM format")
}

/// 可选文本字段：去空白，空串视为未填写
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = ["password1", "qwerty123", "admin123", "abcd1234", "welcome1"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert_eq!(
            normalize_email("  Jane.Doe@School.EDU ").unwrap(),
            "jane.doe@school.edu"
        );
        assert!(normalize_email("jane@").is_err());
        assert!(normalize_email("no-at-sign.com").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn test_grade_and_section() {
        assert_eq!(normalize_grade_level(" 10 ").unwrap(), "10");
        assert_eq!(normalize_grade_level("Grade 7").unwrap(), "Grade 7");
        assert!(normalize_grade_level("").is_err());
        assert!(normalize_grade_level("10/A").is_err());

        assert_eq!(normalize_section("a").unwrap(), "A");
        assert_eq!(normalize_section("b2").unwrap(), "B2");
        assert!(normalize_section("A B").is_err());
        assert!(normalize_section("").is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(normalize_name("  Ada Lovelace ").unwrap(), "Ada Lovelace");
        assert!(normalize_name("   ").is_err());
        assert!(normalize_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_dates_and_times() {
        assert!(validate_date("2024-02-29").is_ok());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("2024-2-9").is_err());
        assert!(validate_date("29/02/2024").is_err());

        assert!(validate_time("08:30").is_ok());
        assert!(validate_time("8:30").is_err());
        assert!(validate_time("25:00").is_err());
    }

    #[test]
    fn test_subject_code_and_phone() {
        assert_eq!(normalize_subject_code("math-10").unwrap(), "MATH-10");
        assert!(normalize_subject_code("m").is_err());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_trim_optional() {
        assert_eq!(trim_optional(Some("  x ".into())), Some("x".into()));
        assert_eq!(trim_optional(Some("   ".into())), None);
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(!validate_password("Ab1").is_valid);
        assert!(validate_password_simple("Admin123").is_err());
    }
}
