use serde::{Deserialize, Serialize};

// 学科实体
//
// 学生与学科多对多，选课关系由查询发现，不单独建模。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: i64,
    pub subject_name: String,
}
