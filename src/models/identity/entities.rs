use serde::{Deserialize, Serialize};

use super::responses::RoleFlagsResponse;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,     // 未认证访客
    Student,   // 学生
    Professor, // 教师
    Admin,     // 管理员
}

impl Role {
    pub const GUEST: &'static str = "guest";
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";
    pub const ADMIN: &'static str = "admin";
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            Role::GUEST => Ok(Role::Guest),
            Role::STUDENT => Ok(Role::Student),
            Role::PROFESSOR => Ok(Role::Professor),
            Role::ADMIN => Ok(Role::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: guest, student, professor, admin"
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Guest => write!(f, "{}", Role::GUEST),
            Role::Student => write!(f, "{}", Role::STUDENT),
            Role::Professor => write!(f, "{}", Role::PROFESSOR),
            Role::Admin => write!(f, "{}", Role::ADMIN),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Role::Guest),
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

// 会话身份
//
// 每个导航会话解析一次，解析后只读。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    pub authenticated: bool,
}

impl Identity {
    /// 未认证访客身份（解析失败时的兜底值）
    pub fn guest() -> Self {
        Self {
            role: Role::Guest,
            authenticated: false,
        }
    }

    /// 从协作方返回的布尔角色标志推导身份
    ///
    /// 协作方把 admin 和 professor 作为两个独立布尔值返回，
    /// 此处归一为互斥角色，优先级 admin > professor > student。
    pub fn from_flags(flags: &RoleFlagsResponse) -> Self {
        if !flags.authenticated {
            return Self::guest();
        }
        let role = if flags.is_admin {
            Role::Admin
        } else if flags.is_professor {
            Role::Professor
        } else {
            Role::Student
        };
        Self {
            role,
            authenticated: true,
        }
    }

    pub fn is_professor(&self) -> bool {
        self.role == Role::Professor
    }
}
