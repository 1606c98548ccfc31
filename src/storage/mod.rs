use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层接口
///
/// 除 `get_user_by_id` 和学校查询外，所有方法都以 `school_id` 作为第一个参数，
/// 其他学校的记录一律视为不存在。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学校管理方法
    // 通过代码获取学校
    async fn get_school_by_code(&self, code: &str) -> Result<Option<School>>;
    // 通过ID获取学校
    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>>;
    // 创建学校
    async fn create_school(&self, name: &str, code: &str) -> Result<School>;

    /// 用户管理方法
    // 通过ID获取用户（JWT 校验使用，不限定学校）
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取同校用户
    async fn get_user_by_email(&self, school_id: i64, email: &str) -> Result<Option<User>>;
    // 创建用户（管理员等无档案的账号）
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 更新用户信息
    async fn update_user(&self, school_id: i64, id: i64, update: UserUpdate)
    -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生账号及档案
    async fn create_student(&self, user: NewUser, profile: StudentProfileInput)
    -> Result<Student>;
    // 获取学生
    async fn get_student(&self, school_id: i64, user_id: i64) -> Result<Option<Student>>;
    // 获取学生档案
    async fn get_student_profile(
        &self,
        school_id: i64,
        user_id: i64,
    ) -> Result<Option<StudentProfile>>;
    // 列出学生
    async fn list_students(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 列出某个班级（或整个年级）的在读学生
    async fn list_class_students(
        &self,
        school_id: i64,
        grade_level: &str,
        section: Option<&str>,
    ) -> Result<Vec<Student>>;
    // 全校在读学生
    async fn list_active_students(&self, school_id: i64) -> Result<Vec<Student>>;
    // 更新学生账号及档案
    async fn update_student(
        &self,
        school_id: i64,
        user_id: i64,
        user: UserUpdate,
        profile: StudentProfileUpdate,
    ) -> Result<Option<Student>>;
    // 统计在读学生
    async fn count_students(&self, school_id: i64) -> Result<u64>;

    /// 教师管理方法
    async fn create_teacher(&self, user: NewUser, profile: TeacherProfileInput)
    -> Result<Teacher>;
    async fn get_teacher(&self, school_id: i64, user_id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_profile(
        &self,
        school_id: i64,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>>;
    async fn list_teachers(
        &self,
        school_id: i64,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        school_id: i64,
        user_id: i64,
        user: UserUpdate,
        profile: TeacherProfileUpdate,
    ) -> Result<Option<Teacher>>;
    async fn count_teachers(&self, school_id: i64) -> Result<u64>;

    /// 科目管理方法
    async fn create_subject(&self, school_id: i64, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject(&self, school_id: i64, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_code(&self, school_id: i64, code: &str) -> Result<Option<Subject>>;
    async fn list_subjects(
        &self,
        school_id: i64,
        grade_level: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<Subject>>;
    async fn update_subject(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn count_subjects(&self, school_id: i64) -> Result<u64>;
    // 分配任课教师（相同安排重复分配时返回已有记录）
    async fn assign_teacher_subject(
        &self,
        school_id: i64,
        subject_id: i64,
        req: AssignTeacherRequest,
    ) -> Result<TeacherSubject>;
    // 列出任课安排，可按教师筛选
    async fn list_teaching_assignments(
        &self,
        school_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Vec<(i64, TeachingAssignment)>>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    async fn get_assignment(&self, school_id: i64, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(
        &self,
        school_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        school_id: i64,
        id: i64,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>>;
    async fn count_active_assignments(&self, school_id: i64) -> Result<u64>;
    // 全部进行中的作业（不分页），可按年级筛选
    async fn list_active_assignments(
        &self,
        school_id: i64,
        grade_level: Option<&str>,
    ) -> Result<Vec<Assignment>>;

    /// 作业提交方法
    // 新建或覆盖学生的提交
    async fn upsert_submission(&self, submission: NewSubmission) -> Result<Submission>;
    async fn get_submission(&self, school_id: i64, id: i64) -> Result<Option<Submission>>;
    async fn get_student_submission(
        &self,
        school_id: i64,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_assignment_submissions(
        &self,
        school_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>>;
    async fn list_student_submissions(
        &self,
        school_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>>;
    // 一组作业的提交记录 (作业ID, 学生ID)
    async fn list_submission_keys(
        &self,
        school_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<(i64, i64)>>;
    // 教师人工批改
    async fn review_submission(
        &self,
        school_id: i64,
        id: i64,
        reviewer_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;

    /// 成绩管理方法
    async fn create_grade(&self, grade: NewGrade) -> Result<GradeRecord>;
    async fn list_grades(&self, school_id: i64, query: GradeListQuery) -> Result<Vec<GradeView>>;
    // 一组学生的全部成绩（计算平均分用）
    async fn list_grades_for_students(
        &self,
        school_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<GradeRecord>>;

    /// 考勤管理方法
    // 按学生和日期写入考勤，已存在则覆盖，返回写入条数
    async fn upsert_attendance(
        &self,
        school_id: i64,
        date: &str,
        marked_by: i64,
        records: Vec<AttendanceUpsert>,
    ) -> Result<usize>;
    async fn list_attendance(
        &self,
        school_id: i64,
        query: AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>>;

    /// 校历管理方法
    async fn create_event(&self, event: NewEvent) -> Result<CalendarEvent>;
    async fn get_event(&self, school_id: i64, id: i64) -> Result<Option<CalendarEvent>>;
    async fn list_events(&self, school_id: i64, query: EventListQuery)
    -> Result<Vec<CalendarEvent>>;
    async fn update_event(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<CalendarEvent>>;
    async fn delete_event(&self, school_id: i64, id: i64) -> Result<bool>;

    /// 课表管理方法
    async fn get_timetable(
        &self,
        school_id: i64,
        grade_level: &str,
        section: &str,
    ) -> Result<Vec<TimetableEntry>>;
    // 整体替换班级课表
    async fn replace_timetable(
        &self,
        school_id: i64,
        grade_level: &str,
        section: &str,
        slots: Vec<TimetableSlotInput>,
    ) -> Result<Vec<TimetableEntry>>;

    /// 学生预警方法
    async fn create_alert(&self, alert: NewAlert) -> Result<StudentAlert>;
    async fn list_alerts(&self, school_id: i64, query: AlertListQuery) -> Result<Vec<AlertView>>;
    async fn resolve_alert(&self, school_id: i64, id: i64) -> Result<Option<StudentAlert>>;
    // 按严重程度统计未处理预警
    async fn count_open_alerts(&self, school_id: i64) -> Result<Vec<(AlertSeverity, u64)>>;

    /// 公告管理方法
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    async fn list_announcements(
        &self,
        school_id: i64,
        audiences: &[Audience],
        limit: Option<u64>,
    ) -> Result<Vec<Announcement>>;
    async fn deactivate_announcement(&self, school_id: i64, id: i64) -> Result<bool>;

    /// 审计日志方法
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog>;
    async fn list_audit_logs(
        &self,
        school_id: i64,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse>;

    /// 最近动态（单一类型，按时间倒序）
    async fn recent_activity(
        &self,
        school_id: i64,
        kind: ActivityKind,
        limit: u64,
    ) -> Result<Vec<ActivityItem>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
