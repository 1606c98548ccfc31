use serde::Serialize;

/// 业务错误码
///
/// 与 HTTP 状态码配合使用：千位表示大类，其余位表示具体原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400
    BadRequest = 1000,
    ValidationFailed = 1001,
    InvalidDate = 1002,
    InvalidQuestion = 1003,
    ImportFileMissingColumn = 1010,
    ImportFileParseFailed = 1011,
    ImportFileDataInvalid = 1012,

    // 401
    Unauthorized = 2000,
    AuthFailed = 2001,
    AccountInactive = 2002,

    // 403
    Forbidden = 3000,
    RoleDenied = 3001,
    DepartmentDenied = 3002,
    NotOwner = 3003,

    // 404
    NotFound = 4000,
    StudentNotFound = 4001,
    TeacherNotFound = 4002,
    SubjectNotFound = 4003,
    AssignmentNotFound = 4004,
    SubmissionNotFound = 4005,
    EventNotFound = 4006,
    AnnouncementNotFound = 4007,
    AlertNotFound = 4008,

    // 409
    Conflict = 4090,
    EmailAlreadyExists = 4091,
    SubjectCodeExists = 4092,
    SubmissionLocked = 4093,

    // 429
    RateLimitExceeded = 4290,

    // 500
    InternalServerError = 5000,
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code as i32
    }
}
