#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use campus_next::models::{
    activity::entities::ActivityKind,
    assignments::{
        entities::{Question, QuestionType},
        requests::NewAssignment,
    },
    subjects::requests::CreateSubjectRequest,
    teachers::entities::Department,
};
use common::{TestContext, auth_cookie};

#[actix_web::test]
async fn test_admin_cannot_see_other_school_student() {
    let ctx = TestContext::new("north").await;
    let south = ctx.add_school("south").await;

    let north_admin = ctx.admin(ctx.school.id, "admin@north.edu").await;
    let south_admin = ctx.admin(south.id, "admin@south.edu").await;
    let student = ctx.student(ctx.school.id, "ana@north.edu", "10", "A").await;
    let app = init_app!(ctx);

    let uri = format!("/api/protected/admin/students/{}", student.id());

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(auth_cookie(&south_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(auth_cookie(&north_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["email"], "ana@north.edu");

    // 列表同样只包含本校学生
    let req = test::TestRequest::get()
        .uri("/api/protected/admin/students")
        .cookie(auth_cookie(&south_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_same_email_allowed_in_different_schools() {
    let ctx = TestContext::new("east").await;
    let west = ctx.add_school("west").await;
    let east_admin = ctx.admin(ctx.school.id, "admin@east.edu").await;
    ctx.student(west.id, "shared@mail.edu", "9", "B").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/students")
        .cookie(auth_cookie(&east_admin))
        .set_json(json!({
            "name": "Shared Mail",
            "email": "shared@mail.edu",
            "grade_level": "9",
            "section": "b"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["student"]["profile"]["section"], "B");
    assert!(body["data"]["temporary_password"].is_string());
}

#[actix_web::test]
async fn test_student_cannot_open_other_school_assignment() {
    let ctx = TestContext::new("alpha").await;
    let beta = ctx.add_school("beta").await;

    let teacher = ctx
        .teacher(ctx.school.id, "t@alpha.edu", Department::SubjectTeacher, None)
        .await;
    let subject = ctx
        .storage
        .create_subject(
            ctx.school.id,
            CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
                grade_level: Some("10".to_string()),
            },
        )
        .await
        .expect("create subject");
    let assignment = ctx
        .storage
        .create_assignment(NewAssignment {
            school_id: ctx.school.id,
            teacher_id: teacher.user.id,
            subject_id: subject.id,
            title: "Fractions".to_string(),
            description: None,
            grade_level: "10".to_string(),
            section: Some("A".to_string()),
            due_date: None,
            total_marks: 1.0,
            questions: vec![Question {
                id: "q1".to_string(),
                question_type: QuestionType::TrueFalse,
                prompt: "1/2 equals 0.5".to_string(),
                options: None,
                correct_answer: Some(json!(true)),
                marks: 1.0,
            }],
        })
        .await
        .expect("create assignment");

    let local = ctx.student(ctx.school.id, "local@alpha.edu", "10", "A").await;
    let outsider = ctx.student(beta.id, "outsider@beta.edu", "10", "A").await;
    let app = init_app!(ctx);

    let uri = format!("/api/protected/students/assignments/{}", assignment.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(auth_cookie(&outsider.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(auth_cookie(&local.user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 学生视图不包含标准答案
    let body: Value = test::read_body_json(resp).await;
    let text = body.to_string();
    assert!(text.contains("Fractions"));
    assert!(!text.contains("correct_answer"));
}

#[actix_web::test]
async fn test_subject_code_unique_within_school() {
    let ctx = TestContext::new("codes-a").await;
    let other = ctx.add_school("codes-b").await;
    let admin = ctx.admin(ctx.school.id, "admin@codes-a.edu").await;
    let other_admin = ctx.admin(other.id, "admin@codes-b.edu").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/subjects")
        .cookie(auth_cookie(&admin))
        .set_json(json!({ "name": "Biology", "code": "bio" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // 编码比较不区分大小写
    let req = test::TestRequest::post()
        .uri("/api/protected/admin/subjects")
        .cookie(auth_cookie(&admin))
        .set_json(json!({ "name": "Biology II", "code": "BIO" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/protected/admin/subjects")
        .cookie(auth_cookie(&other_admin))
        .set_json(json!({ "name": "Biology", "code": "BIO" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_recent_enrolments_break_ties_by_newest_student() {
    let ctx = TestContext::new("activity-order").await;
    ctx.student(ctx.school.id, "first@school.edu", "7", "A").await;
    let second = ctx.student(ctx.school.id, "second@school.edu", "7", "A").await;
    let third = ctx.student(ctx.school.id, "third@school.edu", "7", "A").await;

    let items = ctx
        .storage
        .recent_activity(ctx.school.id, ActivityKind::StudentEnrolled, 2)
        .await
        .expect("recent activity");
    let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![third.id(), second.id()]);
}
