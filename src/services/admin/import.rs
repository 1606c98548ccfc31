//! 学生批量导入
//!
//! JSON 与文件（CSV/XLSX）两种入口共用同一条处理流程：
//! 每一行独立处理，并且只会落入 success / updated / duplicates / failed 之一。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Arc;
use tracing::{info, warn};

use super::AdminService;
use super::students::{ValidatedStudent, validate_student_row};
use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    audit::entities::NewAuditLog,
    students::{
        requests::{ImportOptions, ImportStudentRow, ImportStudentsRequest, StudentProfileUpdate},
        responses::{ImportIssue, ImportedRow, StudentImportResponse},
    },
    users::{
        entities::{User, UserRole},
        requests::{NewUser, UserUpdate},
    },
};
use crate::services::{current_user, invalidate_user_cache, record_audit};
use crate::storage::Storage;
use crate::utils::password::{generate_password, hash_password_blocking};
use crate::utils::validate::validate_password_simple;

const REQUIRED_COLUMNS: [&str; 4] = ["name", "email", "grade_level", "section"];

/// 带原始行号的单元格表格，行号从 1 开始
pub(crate) type Table = Vec<(usize, Vec<String>)>;

pub async fn import_students(
    service: &AdminService,
    request: &HttpRequest,
    body: ImportStudentsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    // JSON 行号从 1 开始
    let rows = body
        .students
        .into_iter()
        .enumerate()
        .map(|(index, row)| (index + 1, row))
        .collect();
    let response = run_import(&storage, request, &admin, rows, body.options).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
}

pub async fn import_students_file(
    service: &AdminService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let upload = read_upload(&mut payload, AppConfig::get().import.max_file_size).await?;
    let table = if is_xlsx(&upload.file_name, &upload.bytes) {
        parse_xlsx(&upload.bytes)?
    } else {
        parse_csv(&upload.bytes)?
    };
    let rows = rows_from_table(table)?;

    let response = run_import(&storage, request, &admin, rows, upload.options).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
}

/// 导入主流程，每行带着报告用的行号
pub(crate) async fn run_import(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    admin: &User,
    rows: Vec<(usize, ImportStudentRow)>,
    options: ImportOptions,
) -> Result<StudentImportResponse> {
    let config = AppConfig::get();
    if rows.is_empty() {
        return Err(CampusError::validation("No students to import"));
    }
    if rows.len() > config.import.max_rows {
        return Err(CampusError::validation(format!(
            "At most {} students can be imported at once",
            config.import.max_rows
        )));
    }

    let default_password = match options.default_password.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(password) => {
            validate_password_simple(password)
                .map_err(|e| CampusError::validation(format!("Default password: {e}")))?;
            Some(password.to_string())
        }
    };

    let mut response = StudentImportResponse {
        total: rows.len(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for (row_no, row) in rows {
        let raw_email = row.email.trim().to_lowercase();

        let validated = match validate_student_row(&row) {
            Ok(validated) => validated,
            Err(message) => {
                response.failed.push(issue(row_no, &raw_email, message));
                continue;
            }
        };

        if !seen.insert(validated.email.clone()) {
            response.duplicates.push(issue(
                row_no,
                &validated.email,
                "Email appears earlier in this import",
            ));
            continue;
        }

        if validated.profile.guardian_phone.is_none() && validated.profile.guardian_email.is_none()
        {
            response.warnings.push(issue(
                row_no,
                &validated.email,
                "Missing guardian contact",
            ));
        }

        let existing = match storage
            .get_user_by_email(admin.school_id, &validated.email)
            .await
        {
            Ok(existing) => existing,
            Err(e) => {
                response.failed.push(issue(row_no, &validated.email, e.message()));
                continue;
            }
        };

        match existing {
            Some(_) if !options.update_existing => {
                response.duplicates.push(issue(
                    row_no,
                    &validated.email,
                    "A user with this email already exists",
                ));
            }
            Some(user) if user.role != UserRole::Student => {
                response.failed.push(issue(
                    row_no,
                    &validated.email,
                    "Email belongs to a non-student account",
                ));
            }
            Some(user) => match update_existing(storage, admin, &user, validated).await {
                Ok(imported) => {
                    invalidate_user_cache(request, user.id).await;
                    response.updated.push(imported.with_row(row_no));
                }
                Err(e) => response.failed.push(issue(row_no, &user.email, e.message())),
            },
            None => {
                let email = validated.email.clone();
                match create_new(storage, admin, validated, default_password.as_deref()).await {
                    Ok(imported) => {
                        if imported.temporary_password.is_some() {
                            response.warnings.push(issue(
                                row_no,
                                &email,
                                "Generated temporary password",
                            ));
                        }
                        response.success.push(imported.with_row(row_no));
                    }
                    Err(CampusError::Conflict(_)) => response.duplicates.push(issue(
                        row_no,
                        &email,
                        "A user with this email already exists",
                    )),
                    Err(e) => response.failed.push(issue(row_no, &email, e.message())),
                }
            }
        }
    }

    info!(
        "Student import by admin {}: {} total, {} created, {} updated, {} duplicates, {} failed",
        admin.id,
        response.total,
        response.success.len(),
        response.updated.len(),
        response.duplicates.len(),
        response.failed.len()
    );
    record_audit(
        storage,
        NewAuditLog::new(admin.school_id, admin.id, "student.import", "student").details(json!({
            "total": response.total,
            "success": response.success.len(),
            "updated": response.updated.len(),
            "duplicates": response.duplicates.len(),
            "failed": response.failed.len(),
        })),
    )
    .await;

    Ok(response)
}

fn issue(row: usize, email: &str, message: impl Into<String>) -> ImportIssue {
    ImportIssue {
        row,
        email: email.to_string(),
        message: message.into(),
    }
}

impl ImportedRow {
    fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }
}

async fn create_new(
    storage: &Arc<dyn Storage>,
    admin: &User,
    validated: ValidatedStudent,
    default_password: Option<&str>,
) -> Result<ImportedRow> {
    let (password, temporary_password) = match validated
        .password
        .or_else(|| default_password.map(str::to_string))
    {
        Some(password) => (password, None),
        None => {
            let generated = generate_password(AppConfig::get().import.generated_password_length);
            (generated.clone(), Some(generated))
        }
    };
    let password_hash = hash_password_blocking(password).await?;

    let student = storage
        .create_student(
            NewUser {
                school_id: admin.school_id,
                email: validated.email,
                password_hash,
                role: UserRole::Student,
                name: validated.name,
            },
            validated.profile,
        )
        .await?;

    Ok(ImportedRow {
        row: 0,
        email: student.user.email.clone(),
        student_id: student.id(),
        temporary_password,
    })
}

async fn update_existing(
    storage: &Arc<dyn Storage>,
    admin: &User,
    existing: &User,
    validated: ValidatedStudent,
) -> Result<ImportedRow> {
    // 只有行内显式给出的密码才会覆盖原密码
    let password_hash = match validated.password {
        Some(password) => Some(hash_password_blocking(password).await?),
        None => None,
    };

    let profile = validated.profile;
    let student = storage
        .update_student(
            admin.school_id,
            existing.id,
            UserUpdate {
                name: Some(validated.name),
                password_hash,
                is_active: Some(true),
                ..Default::default()
            },
            StudentProfileUpdate {
                grade_level: Some(profile.grade_level),
                section: Some(profile.section),
                admission_number: profile.admission_number,
                roll_number: profile.roll_number,
                date_of_birth: profile.date_of_birth,
                guardian_name: profile.guardian_name,
                guardian_phone: profile.guardian_phone,
                guardian_email: profile.guardian_email,
            },
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Student profile not found"))?;

    Ok(ImportedRow {
        row: 0,
        email: student.user.email.clone(),
        student_id: student.id(),
        temporary_password: None,
    })
}

struct Upload {
    bytes: Vec<u8>,
    file_name: String,
    options: ImportOptions,
}

/// 读取 multipart：`file` 为文件，`update_existing` / `default_password` 为可选表单字段
///
/// 所有字段合计超过 `max_bytes` 时立即中止。
async fn read_upload(payload: &mut Multipart, max_bytes: usize) -> Result<Upload> {
    let mut upload = Upload {
        bytes: Vec::new(),
        file_name: String::new(),
        options: ImportOptions::default(),
    };
    let mut total_size: usize = 0;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| CampusError::import_parse(format!("Failed to read field: {e}")))?;
        let name = field.name().unwrap_or_default().to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| CampusError::import_parse(format!("Failed to read upload: {e}")))?;
            total_size += chunk.len();
            if total_size > max_bytes {
                warn!("Import upload rejected after {} bytes", total_size);
                return Err(CampusError::import_parse(format!(
                    "Upload exceeds the limit of {max_bytes} bytes"
                )));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "file" => {
                upload.file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("upload.csv")
                    .to_lowercase();
                upload.bytes = data;
            }
            "update_existing" => {
                let value = String::from_utf8_lossy(&data).trim().to_lowercase();
                upload.options.update_existing = matches!(value.as_str(), "true" | "1" | "yes");
            }
            "default_password" => {
                let value = String::from_utf8_lossy(&data).trim().to_string();
                upload.options.default_password = (!value.is_empty()).then_some(value);
            }
            other => warn!("Ignoring unexpected multipart field '{}'", other),
        }
    }

    if upload.bytes.is_empty() {
        return Err(CampusError::import_parse("Missing or empty 'file' field"));
    }
    Ok(upload)
}

// XLSX 是 zip 容器，以 "PK" 开头
fn is_xlsx(file_name: &str, bytes: &[u8]) -> bool {
    file_name.ends_with(".xlsx") || bytes.starts_with(b"PK\x03\x04")
}

/// 记录在文件中的起始行
///
/// csv 会静默跳过空行，记录的位置可能停在前一条记录的换行处，
/// 从该位置跳过连续换行后才是记录本身所在的行。
fn record_line(data: &[u8], pos: &csv::Position) -> usize {
    let skipped = data
        .get(pos.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| matches!(**b, b'\r' | b'\n'))
        .filter(|b| **b == b'\n')
        .count();
    pos.line() as usize + skipped
}

fn parse_csv(data: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let mut table = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(index + 1, |pos| record_line(data, pos));
        table.push((line, record.iter().map(str::to_string).collect()));
    }
    Ok(table)
}

fn parse_xlsx(data: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| CampusError::import_parse(format!("Failed to open XLSX: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CampusError::import_parse("Workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CampusError::import_parse(format!("Failed to read sheet: {e}")))?;

    // 区域可能不从 A1 开始
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    Ok(range
        .rows()
        .enumerate()
        .map(|(index, row)| {
            let cells = row.iter().map(|cell| cell.to_string().trim().to_string()).collect();
            (first_row + index + 1, cells)
        })
        .collect())
}

/// 表头规范化：小写，空格和连字符换成下划线
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// 把首行为表头的表格转换为导入行，跳过空行，保留原始行号
pub(crate) fn rows_from_table(table: Table) -> Result<Vec<(usize, ImportStudentRow)>> {
    let mut iter = table.into_iter();
    let (_, header) = iter
        .next()
        .ok_or_else(|| CampusError::import_parse("File has no header row"))?;
    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !columns.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        return Err(CampusError::import_parse(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }

    let rows = iter
        .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|(line, cells)| {
            let get = |name: &str| -> String {
                columns
                    .get(name)
                    .and_then(|&i| cells.get(i))
                    .map(|c| c.trim().to_string())
                    .unwrap_or_default()
            };
            let opt = |name: &str| -> Option<String> { Some(get(name)).filter(|v| !v.is_empty()) };
            let row = ImportStudentRow {
                name: get("name"),
                email: get("email"),
                grade_level: get("grade_level"),
                section: get("section"),
                admission_number: opt("admission_number"),
                roll_number: opt("roll_number"),
                date_of_birth: opt("date_of_birth"),
                guardian_name: opt("guardian_name"),
                guardian_phone: opt("guardian_phone"),
                guardian_email: opt("guardian_email"),
                password: opt("password"),
            };
            (line, row)
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_table_to_rows() {
        let csv = "Name,Email,Grade Level,Section,Guardian Phone\n\
                   Ada,ada@example.com,10,a,+1 555 0100\n\
                   ,,,,\n\
                   Bob,bob@example.com,10,B,\n";
        let rows = rows_from_table(parse_csv(csv.as_bytes()).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.name, "Ada");
        assert_eq!(rows[0].1.grade_level, "10");
        assert_eq!(rows[0].1.guardian_phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(rows[1].1.guardian_phone, None);
        // 逗号行被跳过，但行号仍按文件计算
        assert_eq!(rows[0].0, 2);
        assert_eq!(rows[1].0, 4);
    }

    #[test]
    fn test_blank_lines_keep_file_line_numbers() {
        let csv = "name,email,grade_level,section\n\
                   Bo,bo@example.com,8,C\n\
                   \n\
                   Cy,cy@example.com,8,C\n";
        let lines: Vec<usize> = rows_from_table(parse_csv(csv.as_bytes()).unwrap())
            .unwrap()
            .into_iter()
            .map(|(line, _)| line)
            .collect();
        assert_eq!(lines, vec![2, 4]);

        let crlf = "name,email,grade_level,section\r\n\r\n\r\nBo,bo@example.com,8,C\r\n";
        let rows = rows_from_table(parse_csv(crlf.as_bytes()).unwrap()).unwrap();
        assert_eq!(rows[0].0, 4);
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let err = rows_from_table(parse_csv(b"name,email\nAda,ada@example.com\n").unwrap())
            .unwrap_err();
        assert!(err.message().contains("grade_level"));
        assert!(err.message().contains("section"));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        assert!(rows_from_table(Table::new()).is_err());
    }

    #[test]
    fn test_xlsx_detection() {
        assert!(is_xlsx("students.xlsx", b"anything"));
        assert!(is_xlsx("upload.csv", b"PK\x03\x04rest"));
        assert!(!is_xlsx("students.csv", b"name,email"));
    }

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("\u{feff}Grade Level"), "grade_level");
        assert_eq!(normalize_header(" date-of-birth "), "date_of_birth");
    }
}
