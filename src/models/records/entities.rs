use serde::{Deserialize, Serialize};

// 记录视图模式
//
// 同一 (学生, 学科) 坐标下有两类互斥的记录视图。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    GradesAndAttendance, // 平时成绩与出勤
    SemesterGrades, // 学期总评
}

impl ViewMode {
    pub const GRADES_AND_ATTENDANCE: &'static str = "grades-and-attendance";
    pub const SEMESTER_GRADES: &'static str = "semester-grades";
}

impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ViewMode::GRADES_AND_ATTENDANCE => Ok(ViewMode::GradesAndAttendance),
            ViewMode::SEMESTER_GRADES => Ok(ViewMode::SemesterGrades),
            _ => Err(serde::de::Error::custom(format!(
                "无效的视图模式: '{s}'. 支持的模式: grades-and-attendance, semester-grades"
            ))),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::GradesAndAttendance => write!(f, "{}", ViewMode::GRADES_AND_ATTENDANCE),
            ViewMode::SemesterGrades => write!(f, "{}", ViewMode::SEMESTER_GRADES),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grades-and-attendance" => Ok(ViewMode::GradesAndAttendance),
            "semester-grades" => Ok(ViewMode::SemesterGrades),
            _ => Err(format!("Invalid view mode: {s}")),
        }
    }
}

// 平时成绩与出勤记录
//
// 以 (student, subject) 为键，同一键下允许多条（按课次录入）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeAttendance {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: i32,
    pub has_attended: bool,
}

// 学期总评记录
//
// 与 GradeAttendance 同键，但是独立的一类记录。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemesterGrade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: String,
}

// 当前视图已拉取的记录集合
//
// 每次拉取整体替换，绝不合并。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum RecordSet {
    Attendance(Vec<GradeAttendance>),
    Semester(Vec<SemesterGrade>),
}

impl RecordSet {
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Attendance(records) => records.len(),
            RecordSet::Semester(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 记录集合所属的视图模式
    pub fn view_mode(&self) -> ViewMode {
        match self {
            RecordSet::Attendance(_) => ViewMode::GradesAndAttendance,
            RecordSet::Semester(_) => ViewMode::SemesterGrades,
        }
    }
}
