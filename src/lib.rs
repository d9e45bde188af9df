//! RecordBook - 学籍记录导航核心
//!
//! 面向学籍记录服务的级联导航客户端核心：
//! 一次性身份解析、带过期丢弃的级联选择链、角色守门的记录变更、
//! 以及实时教室的一次性 token 兑换。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `service`: 外部记录服务边界（trait + 进程内实现）
//! - `session`: 导航会话核心（身份解析、级联控制、记录存储、变更守门、教室接入）
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod session;
pub mod utils;
