use std::sync::Arc;

use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{info, warn};

// 从 lib.rs 导入模块
use rust_recordbook_next::config::AppConfig;
use rust_recordbook_next::errors::Result;
use rust_recordbook_next::models::identity::responses::RoleFlagsResponse;
use rust_recordbook_next::models::records::entities::ViewMode;
use rust_recordbook_next::models::records::requests::GradeAttendanceDraft;
use rust_recordbook_next::models::rooms::entities::RoomToken;
use rust_recordbook_next::models::students::entities::Sex;
use rust_recordbook_next::service::memory::MemoryRecordService;
use rust_recordbook_next::session::{NavigationSession, RealtimeClient, RoomAccessBroker};

// 演示用实时客户端：只记录加入动作
struct LoggingRealtimeClient;

#[async_trait::async_trait]
impl RealtimeClient for LoggingRealtimeClient {
    async fn join(&self, server_address: &str, _token: RoomToken) -> Result<()> {
        info!("Joining realtime session at {server_address}");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 启动前预处理 //

    // 初始化配置
    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting {} demo walk, version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    // 填充演示数据：一位 professor 身份，一个组、两名学生、两门学科、一间教室
    let service = Arc::new(MemoryRecordService::new());
    service.set_identity(RoleFlagsResponse {
        authenticated: true,
        is_admin: false,
        is_professor: true,
    });
    let group = service.add_group("Group 571");
    let ivan = service.add_student(
        group.id,
        "Ivan",
        "Petrov",
        Sex::Male,
        chrono::NaiveDate::from_ymd_opt(2003, 5, 14).expect("valid date"),
    );
    let anna = service.add_student(
        group.id,
        "Anna",
        "Sidorova",
        Sex::Female,
        chrono::NaiveDate::from_ymd_opt(2004, 1, 2).expect("valid date"),
    );
    let math = service.add_subject("Mathematics");
    let physics = service.add_subject("Physics");
    service.enroll(ivan.id, math.id);
    service.enroll(ivan.id, physics.id);
    service.enroll(anna.id, math.id);
    let room = service.add_room(math.id, "Lecture hall 1");

    // 会话：身份解析一次，然后走一遍级联
    let session = NavigationSession::new(service.clone());
    let identity = session.resolve_identity().await;
    info!("Session identity: role={}", identity.role);

    session.load_groups().await;
    if let Err(e) = session.select_group(group.id).await {
        warn!("Group selection refused: {e}");
    }
    let snapshot = session.snapshot();
    info!(
        "Cascade settled: student={:?} subject={:?} records={}",
        snapshot.selection.student_id,
        snapshot.selection.subject_id,
        snapshot.store.current().map(|s| s.len()).unwrap_or(0)
    );

    // professor 录入一条平时成绩，存储自动回灌
    let outcome = session
        .insert_grade_attendance(GradeAttendanceDraft {
            grade: 5,
            has_attended: true,
        })
        .await;
    info!("Grade insert outcome: {outcome:?}");

    // 切到学期视图
    if let Err(e) = session.set_view_mode(ViewMode::SemesterGrades).await {
        warn!("View switch refused: {e}");
    }
    let snapshot = session.snapshot();
    info!(
        "Semester view: records={}",
        snapshot.store.current().map(|s| s.len()).unwrap_or(0)
    );

    // 教室接入：兑换一次性 token 并移交给实时客户端
    let broker = RoomAccessBroker::new(
        service,
        Arc::new(LoggingRealtimeClient),
        config.realtime.server_address.clone(),
    );
    let state = broker.request_access(&identity, room.id).await;
    info!("Room access state: {state:?}");
}
