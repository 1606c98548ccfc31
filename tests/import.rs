#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use campus_next::{config::AppConfig, models::users::entities::User};
use common::{TestContext, auth_cookie};

const BOUNDARY: &str = "campusboundary";

/// 组装只含 CSV 文件与默认密码的 multipart 请求体
fn csv_upload(csv: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"students.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"default_password\"\r\n\r\n\
         Sturdy9Pass\r\n\
         --{BOUNDARY}--\r\n"
    )
}

fn upload_request(admin: &User, payload: String) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/protected/admin/students/import/file")
        .cookie(auth_cookie(admin))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(payload)
}

fn count(body: &Value, bucket: &str) -> usize {
    body["data"][bucket].as_array().map(Vec::len).unwrap_or(0)
}

#[actix_web::test]
async fn test_json_import_sorts_rows_into_buckets() {
    let ctx = TestContext::new("import-json").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    ctx.student(ctx.school.id, "existing@school.edu", "10", "A").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/students/import")
        .cookie(auth_cookie(&admin))
        .set_json(json!({
            "students": [
                { "name": "Lea", "email": "lea@school.edu", "grade_level": "10", "section": "a",
                  "password": "Sturdy9Pass", "guardian_phone": "+1 555 0100" },
                { "name": "Lea Again", "email": "LEA@school.edu", "grade_level": "10", "section": "A" },
                { "name": "Broken", "email": "broken", "grade_level": "10", "section": "A" },
                { "name": "Existing", "email": "existing@school.edu", "grade_level": "11", "section": "A" },
                { "name": "Noor", "email": "noor@school.edu", "grade_level": "10", "section": "B" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(count(&body, "success"), 2);
    assert_eq!(count(&body, "updated"), 0);
    assert_eq!(count(&body, "duplicates"), 2);
    assert_eq!(count(&body, "failed"), 1);

    // JSON 行号从 1 开始
    assert_eq!(body["data"]["failed"][0]["row"], 3);
    assert_eq!(body["data"]["duplicates"][0]["row"], 2);
    assert_eq!(body["data"]["duplicates"][1]["row"], 4);

    // 未提供密码的行会得到临时密码
    let noor = &body["data"]["success"][1];
    assert_eq!(noor["email"], "noor@school.edu");
    assert!(noor["temporary_password"].is_string());
    assert!(body["data"]["success"][0].get("temporary_password").is_none_or(Value::is_null));
}

#[actix_web::test]
async fn test_json_import_updates_existing_when_requested() {
    let ctx = TestContext::new("import-update").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let existing = ctx.student(ctx.school.id, "move@school.edu", "10", "A").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/students/import")
        .cookie(auth_cookie(&admin))
        .set_json(json!({
            "students": [
                { "name": "Moved Student", "email": "move@school.edu", "grade_level": "11", "section": "C" }
            ],
            "options": { "update_existing": true }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(count(&body, "updated"), 1);
    assert_eq!(count(&body, "duplicates"), 0);
    assert_eq!(body["data"]["updated"][0]["student_id"], existing.id());

    let profile = ctx
        .storage
        .get_student_profile(ctx.school.id, existing.id())
        .await
        .expect("query profile")
        .expect("profile exists");
    assert_eq!(profile.grade_level, "11");
    assert_eq!(profile.section, "C");
}

#[actix_web::test]
async fn test_import_rejects_weak_default_password() {
    let ctx = TestContext::new("import-weak").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/students/import")
        .cookie(auth_cookie(&admin))
        .set_json(json!({
            "students": [
                { "name": "Kim", "email": "kim@school.edu", "grade_level": "7", "section": "A" }
            ],
            "options": { "default_password": "short" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_csv_file_import_numbers_rows_after_header() {
    let ctx = TestContext::new("import-csv").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let app = init_app!(ctx);

    let csv = "Name,Email,Grade Level,Section\r\n\
               Bo,bo@school.edu,8,c\r\n\
               ,nameless@school.edu,8,C\r\n";
    let req = upload_request(&admin, csv_upload(csv)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(count(&body, "success"), 1);
    assert_eq!(body["data"]["success"][0]["row"], 2);
    assert_eq!(count(&body, "failed"), 1);
    assert_eq!(body["data"]["failed"][0]["row"], 3);

    let created = ctx
        .storage
        .get_user_by_email(ctx.school.id, "bo@school.edu")
        .await
        .expect("query user");
    assert!(created.is_some());
}

#[actix_web::test]
async fn test_csv_rows_after_blank_line_keep_file_line() {
    let ctx = TestContext::new("import-blank").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let app = init_app!(ctx);

    let csv = "Name,Email,Grade Level,Section\r\n\
               Bo,bo@school.edu,8,C\r\n\
               \r\n\
               Bad,not-an-email,8,C\r\n";
    let req = upload_request(&admin, csv_upload(csv)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["success"][0]["row"], 2);
    assert_eq!(body["data"]["failed"][0]["row"], 4);
}

#[actix_web::test]
async fn test_oversized_upload_is_rejected() {
    let ctx = TestContext::new("import-large").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let app = init_app!(ctx);

    let mut csv = String::from("Name,Email,Grade Level,Section\r\n");
    let limit = AppConfig::get().import.max_file_size;
    let mut index = 0;
    while csv.len() <= limit {
        csv.push_str(&format!("Row {index},row{index}@school.edu,8,C\r\n"));
        index += 1;
    }

    let req = upload_request(&admin, csv_upload(&csv)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 超限时不会导入任何一行
    let created = ctx
        .storage
        .get_user_by_email(ctx.school.id, "row0@school.edu")
        .await
        .expect("query user");
    assert!(created.is_none());
}
