use once_cell::sync::Lazy;

/// 平时成绩取值范围
pub const MIN_GRADE: i32 = 1;
pub const MAX_GRADE: i32 = 5;

// 学期总评允许的等级
static SEMESTER_GRADES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["A", "B", "C", "D", "F", "2", "3", "4", "5"]);

pub fn validate_grade_value(grade: i32) -> Result<(), &'static str> {
    // 成绩范围校验：1 <= x <= 5
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err("Grade must be between 1 and 5");
    }
    Ok(())
}

pub fn validate_semester_grade(grade: &str) -> Result<(), &'static str> {
    let trimmed = grade.trim();
    if trimmed.is_empty() {
        return Err("Semester grade must not be empty");
    }
    if !SEMESTER_GRADES.contains(&trimmed) {
        return Err("Semester grade must be one of: A, B, C, D, F, 2, 3, 4, 5");
    }
    Ok(())
}
