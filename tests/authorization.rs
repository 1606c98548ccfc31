#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use campus_next::models::{
    teachers::entities::Department,
    users::{entities::UserRole, requests::NewUser},
};
use campus_next::utils::password::hash_password;
use common::{TestContext, auth_cookie};

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new("auth-none").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/protected/students/dashboard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_student_cannot_reach_admin_area() {
    let ctx = TestContext::new("auth-role").await;
    let student = ctx.student(ctx.school.id, "kid@school.edu", "10", "A").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/protected/admin/dashboard")
        .cookie(auth_cookie(&student.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn test_department_gate() {
    let ctx = TestContext::new("auth-dept").await;
    let subject_teacher = ctx
        .teacher(ctx.school.id, "math@school.edu", Department::SubjectTeacher, None)
        .await;
    let director = ctx
        .teacher(ctx.school.id, "head@school.edu", Department::Director, None)
        .await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/protected/teachers/director/overview")
        .cookie(auth_cookie(&subject_teacher.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/protected/teachers/director/overview")
        .cookie(auth_cookie(&director.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 通用教师接口不限职能
    let req = test::TestRequest::get()
        .uri("/api/protected/teachers/assignments")
        .cookie(auth_cookie(&subject_teacher.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_class_teacher_without_homeroom_is_forbidden() {
    let ctx = TestContext::new("auth-homeroom").await;
    let teacher = ctx
        .teacher(ctx.school.id, "ct@school.edu", Department::ClassTeacher, None)
        .await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/protected/teachers/class-teacher/students")
        .cookie(auth_cookie(&teacher.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_malformed_payload_is_rejected() {
    let ctx = TestContext::new("auth-json").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/students")
        .cookie(auth_cookie(&admin))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/students")
        .cookie(auth_cookie(&admin))
        .set_json(json!({
            "name": "No Email",
            "email": "not-an-email",
            "grade_level": "10",
            "section": "A"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_sets_cookie_and_me_works() {
    let ctx = TestContext::new("auth-login").await;
    ctx.storage
        .create_user(NewUser {
            school_id: ctx.school.id,
            email: "owner@school.edu".to_string(),
            password_hash: hash_password("Sturdy9Pass").expect("hash"),
            role: UserRole::Admin,
            name: "Owner".to_string(),
        })
        .await
        .expect("create admin");
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "school_code": "AUTH-LOGIN",
            "email": "Owner@School.edu",
            "password": "wrong-Pass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "school_code": "AUTH-LOGIN",
            "email": "Owner@School.edu",
            "password": "Sturdy9Pass"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("auth cookie")
        .into_owned();
    assert!(!cookie.value().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_class_teacher_alert_limited_to_own_class() {
    let ctx = TestContext::new("auth-alert").await;
    let teacher = ctx
        .teacher(
            ctx.school.id,
            "homeroom@school.edu",
            Department::ClassTeacher,
            Some(("9", "A")),
        )
        .await;
    let own = ctx.student(ctx.school.id, "mine@school.edu", "9", "A").await;
    let other = ctx.student(ctx.school.id, "theirs@school.edu", "9", "B").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/teachers/class-teacher/alerts")
        .cookie(auth_cookie(&teacher.user))
        .set_json(json!({
            "student_id": other.id(),
            "alert_type": "behavior",
            "severity": "medium",
            "message": "Disrupted the lesson"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/protected/teachers/class-teacher/alerts")
        .cookie(auth_cookie(&teacher.user))
        .set_json(json!({
            "student_id": own.id(),
            "alert_type": "attendance",
            "severity": "high",
            "message": "Absent three days in a row"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_deactivated_user_is_rejected_on_next_request() {
    let ctx = TestContext::new("auth-deactivate").await;
    let admin = ctx.admin(ctx.school.id, "admin@school.edu").await;
    let student = ctx.student(ctx.school.id, "leaving@school.edu", "10", "A").await;
    let app = init_app!(ctx);

    // 第一次请求把用户写入缓存
    let req = test::TestRequest::get()
        .uri("/api/protected/students/dashboard")
        .cookie(auth_cookie(&student.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/protected/admin/students/{}", student.id()))
        .cookie(auth_cookie(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 原令牌仍未过期，但用户已停用
    let req = test::TestRequest::get()
        .uri("/api/protected/students/dashboard")
        .cookie(auth_cookie(&student.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
