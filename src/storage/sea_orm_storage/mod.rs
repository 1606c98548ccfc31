//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activity;
mod alerts;
mod announcements;
mod assignments;
mod attendance;
mod audit;
mod calendar;
mod grades;
mod schools;
mod students;
mod subjects;
mod submissions;
mod teachers;
mod timetable;
mod users;

use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 内存 SQLite 存储（测试使用）
    ///
    /// 连接池只保留一个永不过期的连接，否则内存数据库会随连接一起消失。
    pub async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| CampusError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::migrate(&db).await?;

        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| CampusError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CampusError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CampusError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 数据库错误转换，唯一约束冲突映射为 Conflict
pub(crate) fn db_error(context: &'static str) -> impl Fn(DbErr) -> CampusError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CampusError::conflict(format!("{context}: 记录已存在"))
        }
        _ => CampusError::database_operation(format!("{context}: {e}")),
    }
}

/// 分页参数规范化（页码从 1 开始，页大小 1..=100）
pub(crate) fn page_and_size(page: Option<u64>, size: Option<u64>) -> (u64, u64) {
    (page.unwrap_or(1).max(1), size.unwrap_or(20).clamp(1, 100))
}

// Storage trait 实现
use crate::models::{
    activity::entities::{ActivityItem, ActivityKind},
    alerts::{
        entities::{AlertSeverity, AlertView, StudentAlert},
        requests::{AlertListQuery, NewAlert},
    },
    announcements::{
        entities::{Announcement, Audience},
        requests::NewAnnouncement,
    },
    assignments::{
        entities::{Assignment, Submission},
        requests::{AssignmentListQuery, AssignmentUpdate, NewAssignment, NewSubmission},
        responses::{AssignmentListResponse, SubmissionWithStudent},
    },
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceQuery, AttendanceUpsert},
    },
    audit::entities::{AuditLog, AuditLogListQuery, AuditLogListResponse, NewAuditLog},
    calendar::{
        entities::CalendarEvent,
        requests::{EventListQuery, NewEvent, UpdateEventRequest},
    },
    grades::{
        entities::{GradeRecord, GradeView},
        requests::{GradeListQuery, NewGrade},
    },
    students::{
        entities::{Student, StudentProfile},
        requests::{StudentListQuery, StudentProfileInput, StudentProfileUpdate},
        responses::StudentListResponse,
    },
    subjects::{
        entities::{Subject, TeacherSubject, TeachingAssignment},
        requests::{AssignTeacherRequest, CreateSubjectRequest, UpdateSubjectRequest},
    },
    teachers::{
        entities::{Teacher, TeacherProfile},
        requests::{TeacherListQuery, TeacherProfileInput, TeacherProfileUpdate},
        responses::TeacherListResponse,
    },
    timetable::{entities::TimetableEntry, requests::TimetableSlotInput},
    users::{
        entities::{School, User},
        requests::{NewUser, UserUpdate},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学校模块
    async fn get_school_by_code(&self, code: &str) -> Result<Option<School>> {
        self.get_school_by_code_impl(code).await
    }

    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    async fn create_school(&self, name: &str, code: &str) -> Result<School> {
        self.create_school_impl(name, code).await
    }

    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, school_id: i64, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(school_id, email).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn update_user(
        &self,
        school_id: i64,
        id: i64,
        update: UserUpdate,
    ) -> Result<Option<User>> {
        self.update_user_impl(school_id, id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 学生模块
    async fn create_student(
        &self,
        user: NewUser,
        profile: StudentProfileInput,
    ) -> Result<Student> {
        self.create_student_impl(user, profile).await
    }

    async fn get_student(&self, school_id: i64, user_id: i64) -> Result<Option<Student>> {
        self.get_student_impl(school_id, user_id).await
    }

    async fn get_student_profile(
        &self,
        school_id: i64,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        self.get_student_profile_impl(school_id, user_id).await
    }

    async fn list_students(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_impl(school_id, query).await
    }

    async fn list_class_students(
        &self,
        school_id: i64,
        grade_level: &str,
        section: Option<&str>,
    ) -> Result<Vec<Student>> {
        self.list_class_students_impl(school_id, grade_level, section)
            .await
    }

    async fn list_active_students(&self, school_id: i64) -> Result<Vec<Student>> {
        self.list_active_students_impl(school_id).await
    }

    async fn update_student(
        &self,
        school_id: i64,
        user_id: i64,
        user: UserUpdate,
        profile: StudentProfileUpdate,
    ) -> Result<Option<Student>> {
        self.update_student_impl(school_id, user_id, user, profile)
            .await
    }

    async fn count_students(&self, school_id: i64) -> Result<u64> {
        self.count_students_impl(school_id).await
    }

    // 教师模块
    async fn create_teacher(
        &self,
        user: NewUser,
        profile: TeacherProfileInput,
    ) -> Result<Teacher> {
        self.create_teacher_impl(user, profile).await
    }

    async fn get_teacher(&self, school_id: i64, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_impl(school_id, user_id).await
    }

    async fn get_teacher_profile(
        &self,
        school_id: i64,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_impl(school_id, user_id).await
    }

    async fn list_teachers(
        &self,
        school_id: i64,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_impl(school_id, query).await
    }

    async fn update_teacher(
        &self,
        school_id: i64,
        user_id: i64,
        user: UserUpdate,
        profile: TeacherProfileUpdate,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(school_id, user_id, user, profile)
            .await
    }

    async fn count_teachers(&self, school_id: i64) -> Result<u64> {
        self.count_teachers_impl(school_id).await
    }

    // 科目模块
    async fn create_subject(&self, school_id: i64, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(school_id, req).await
    }

    async fn get_subject(&self, school_id: i64, id: i64) -> Result<Option<Subject>> {
        self.get_subject_impl(school_id, id).await
    }

    async fn get_subject_by_code(&self, school_id: i64, code: &str) -> Result<Option<Subject>> {
        self.get_subject_by_code_impl(school_id, code).await
    }

    async fn list_subjects(
        &self,
        school_id: i64,
        grade_level: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<Subject>> {
        self.list_subjects_impl(school_id, grade_level, include_inactive)
            .await
    }

    async fn update_subject(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(school_id, id, update).await
    }

    async fn count_subjects(&self, school_id: i64) -> Result<u64> {
        self.count_subjects_impl(school_id).await
    }

    async fn assign_teacher_subject(
        &self,
        school_id: i64,
        subject_id: i64,
        req: AssignTeacherRequest,
    ) -> Result<TeacherSubject> {
        self.assign_teacher_subject_impl(school_id, subject_id, req)
            .await
    }

    async fn list_teaching_assignments(
        &self,
        school_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Vec<(i64, TeachingAssignment)>> {
        self.list_teaching_assignments_impl(school_id, teacher_id)
            .await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment(&self, school_id: i64, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(school_id, id).await
    }

    async fn list_assignments(
        &self,
        school_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_impl(school_id, query).await
    }

    async fn update_assignment(
        &self,
        school_id: i64,
        id: i64,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(school_id, id, update).await
    }

    async fn count_active_assignments(&self, school_id: i64) -> Result<u64> {
        self.count_active_assignments_impl(school_id).await
    }

    async fn list_active_assignments(
        &self,
        school_id: i64,
        grade_level: Option<&str>,
    ) -> Result<Vec<Assignment>> {
        self.list_active_assignments_impl(school_id, grade_level)
            .await
    }

    // 提交模块
    async fn upsert_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.upsert_submission_impl(submission).await
    }

    async fn get_submission(&self, school_id: i64, id: i64) -> Result<Option<Submission>> {
        self.get_submission_impl(school_id, id).await
    }

    async fn get_student_submission(
        &self,
        school_id: i64,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_student_submission_impl(school_id, assignment_id, student_id)
            .await
    }

    async fn list_assignment_submissions(
        &self,
        school_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>> {
        self.list_assignment_submissions_impl(school_id, assignment_id)
            .await
    }

    async fn list_student_submissions(
        &self,
        school_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(school_id, student_id)
            .await
    }

    async fn list_submission_keys(
        &self,
        school_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<(i64, i64)>> {
        self.list_submission_keys_impl(school_id, assignment_ids)
            .await
    }

    async fn review_submission(
        &self,
        school_id: i64,
        id: i64,
        reviewer_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.review_submission_impl(school_id, id, reviewer_id, score, feedback)
            .await
    }

    // 成绩模块
    async fn create_grade(&self, grade: NewGrade) -> Result<GradeRecord> {
        self.create_grade_impl(grade).await
    }

    async fn list_grades(&self, school_id: i64, query: GradeListQuery) -> Result<Vec<GradeView>> {
        self.list_grades_impl(school_id, query).await
    }

    async fn list_grades_for_students(
        &self,
        school_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<GradeRecord>> {
        self.list_grades_for_students_impl(school_id, student_ids)
            .await
    }

    // 考勤模块
    async fn upsert_attendance(
        &self,
        school_id: i64,
        date: &str,
        marked_by: i64,
        records: Vec<AttendanceUpsert>,
    ) -> Result<usize> {
        self.upsert_attendance_impl(school_id, date, marked_by, records)
            .await
    }

    async fn list_attendance(
        &self,
        school_id: i64,
        query: AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(school_id, query).await
    }

    // 校历模块
    async fn create_event(&self, event: NewEvent) -> Result<CalendarEvent> {
        self.create_event_impl(event).await
    }

    async fn get_event(&self, school_id: i64, id: i64) -> Result<Option<CalendarEvent>> {
        self.get_event_impl(school_id, id).await
    }

    async fn list_events(
        &self,
        school_id: i64,
        query: EventListQuery,
    ) -> Result<Vec<CalendarEvent>> {
        self.list_events_impl(school_id, query).await
    }

    async fn update_event(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<CalendarEvent>> {
        self.update_event_impl(school_id, id, update).await
    }

    async fn delete_event(&self, school_id: i64, id: i64) -> Result<bool> {
        self.delete_event_impl(school_id, id).await
    }

    // 课表模块
    async fn get_timetable(
        &self,
        school_id: i64,
        grade_level: &str,
        section: &str,
    ) -> Result<Vec<TimetableEntry>> {
        self.get_timetable_impl(school_id, grade_level, section)
            .await
    }

    async fn replace_timetable(
        &self,
        school_id: i64,
        grade_level: &str,
        section: &str,
        slots: Vec<TimetableSlotInput>,
    ) -> Result<Vec<TimetableEntry>> {
        self.replace_timetable_impl(school_id, grade_level, section, slots)
            .await
    }

    // 预警模块
    async fn create_alert(&self, alert: NewAlert) -> Result<StudentAlert> {
        self.create_alert_impl(alert).await
    }

    async fn list_alerts(&self, school_id: i64, query: AlertListQuery) -> Result<Vec<AlertView>> {
        self.list_alerts_impl(school_id, query).await
    }

    async fn resolve_alert(&self, school_id: i64, id: i64) -> Result<Option<StudentAlert>> {
        self.resolve_alert_impl(school_id, id).await
    }

    async fn count_open_alerts(&self, school_id: i64) -> Result<Vec<(AlertSeverity, u64)>> {
        self.count_open_alerts_impl(school_id).await
    }

    // 公告模块
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        self.create_announcement_impl(announcement).await
    }

    async fn list_announcements(
        &self,
        school_id: i64,
        audiences: &[Audience],
        limit: Option<u64>,
    ) -> Result<Vec<Announcement>> {
        self.list_announcements_impl(school_id, audiences, limit)
            .await
    }

    async fn deactivate_announcement(&self, school_id: i64, id: i64) -> Result<bool> {
        self.deactivate_announcement_impl(school_id, id).await
    }

    // 审计模块
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog> {
        self.create_audit_log_impl(log).await
    }

    async fn list_audit_logs(
        &self,
        school_id: i64,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        self.list_audit_logs_impl(school_id, query).await
    }

    // 动态模块
    async fn recent_activity(
        &self,
        school_id: i64,
        kind: ActivityKind,
        limit: u64,
    ) -> Result<Vec<ActivityItem>> {
        self.recent_activity_impl(school_id, kind, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("campus.db").unwrap(),
            "sqlite://campus.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_page_and_size() {
        assert_eq!(page_and_size(None, None), (1, 20));
        assert_eq!(page_and_size(Some(0), Some(1000)), (1, 100));
    }
}
