use serde::{Deserialize, Serialize};

// 学生组实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: i64,
    pub group_name: String,
}
