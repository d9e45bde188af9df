//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_recordbook_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum RecordBookError {
            $($variant(String),)*
        }

        impl RecordBookError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RecordBookError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RecordBookError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RecordBookError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RecordBookError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RecordBookError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_recordbook_errors! {
    AuthResolution("E001", "Identity Resolution Error"),
    Fetch("E002", "Fetch Error"),
    MutationRefused("E003", "Mutation Refused"),
    Mutation("E004", "Mutation Error"),
    TokenExchange("E005", "Token Exchange Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    ServicePluginNotFound("E010", "Record Service Plugin Not Found"),
}

impl RecordBookError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RecordBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RecordBookError {}

// 为常见的错误类型实现 From trait
impl From<serde_json::Error> for RecordBookError {
    fn from(err: serde_json::Error) -> Self {
        RecordBookError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for RecordBookError {
    fn from(err: chrono::ParseError) -> Self {
        RecordBookError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecordBookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordBookError::auth_resolution("test").code(), "E001");
        assert_eq!(RecordBookError::fetch("test").code(), "E002");
        assert_eq!(RecordBookError::token_exchange("test").code(), "E005");
        assert_eq!(RecordBookError::validation("test").code(), "E006");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            RecordBookError::mutation_refused("test").error_type(),
            "Mutation Refused"
        );
        assert_eq!(
            RecordBookError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = RecordBookError::validation("Invalid grade");
        assert_eq!(err.message(), "Invalid grade");
    }

    #[test]
    fn test_format_simple() {
        let err = RecordBookError::fetch("connection reset");
        let formatted = err.format_simple();
        assert!(formatted.contains("Fetch Error"));
        assert!(formatted.contains("connection reset"));
    }
}
