use serde::{Deserialize, Serialize};

// 角色检查响应（check-is-admin-or-professor）
//
// 协作方以两个独立布尔值报告 admin / professor。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleFlagsResponse {
    pub authenticated: bool,
    pub is_admin: bool,
    pub is_professor: bool,
}
