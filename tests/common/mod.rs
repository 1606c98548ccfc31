#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;

use campus_next::cache::{MokaCacheWrapper, ObjectCache};
use campus_next::models::{
    students::{entities::Student, requests::StudentProfileInput},
    teachers::{
        entities::{Department, Teacher},
        requests::TeacherProfileInput,
    },
    users::{
        entities::{School, User, UserRole},
        requests::NewUser,
    },
};
use campus_next::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use campus_next::utils::jwt::JwtUtils;

pub const PASSWORD_HASH: &str = "not-a-real-hash";

/// 初始化测试应用，挂载与生产相同的路由
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.cache.clone()))
                .app_data(
                    actix_web::web::JsonConfig::default().error_handler(
                        campus_next::utils::json_error_handler,
                    ),
                )
                .app_data(
                    actix_web::web::QueryConfig::default().error_handler(
                        campus_next::utils::query_error_handler,
                    ),
                )
                .configure(campus_next::routes::configure_auth_routes)
                .configure(campus_next::routes::configure_protected_routes),
        )
        .await
    };
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub school: School,
}

impl TestContext {
    pub async fn new(school_code: &str) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::new_in_memory()
                .await
                .expect("in-memory database"),
        );
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new());
        let school = storage
            .create_school(&format!("School {school_code}"), school_code)
            .await
            .expect("create school");
        Self {
            storage,
            cache,
            school,
        }
    }

    /// 在同一数据库中再建一所学校
    pub async fn add_school(&self, code: &str) -> School {
        self.storage
            .create_school(&format!("School {code}"), code)
            .await
            .expect("create school")
    }

    pub async fn admin(&self, school_id: i64, email: &str) -> User {
        self.storage
            .create_user(NewUser {
                school_id,
                email: email.to_string(),
                password_hash: PASSWORD_HASH.to_string(),
                role: UserRole::Admin,
                name: "Admin".to_string(),
            })
            .await
            .expect("create admin")
    }

    pub async fn student(&self, school_id: i64, email: &str, grade: &str, section: &str) -> Student {
        self.storage
            .create_student(
                NewUser {
                    school_id,
                    email: email.to_string(),
                    password_hash: PASSWORD_HASH.to_string(),
                    role: UserRole::Student,
                    name: format!("Student {email}"),
                },
                StudentProfileInput {
                    grade_level: grade.to_string(),
                    section: section.to_string(),
                    ..Default::default()
                },
            )
            .await
            .expect("create student")
    }

    pub async fn teacher(
        &self,
        school_id: i64,
        email: &str,
        department: Department,
        homeroom: Option<(&str, &str)>,
    ) -> Teacher {
        self.storage
            .create_teacher(
                NewUser {
                    school_id,
                    email: email.to_string(),
                    password_hash: PASSWORD_HASH.to_string(),
                    role: UserRole::Teacher,
                    name: format!("Teacher {email}"),
                },
                TeacherProfileInput {
                    department,
                    employee_id: None,
                    class_grade: homeroom.map(|(grade, _)| grade.to_string()),
                    class_section: homeroom.map(|(_, section)| section.to_string()),
                    phone: None,
                },
            )
            .await
            .expect("create teacher")
    }
}

/// 为用户签发认证 Cookie
pub fn auth_cookie(user: &User) -> Cookie<'static> {
    let token = JwtUtils::generate_access_token(user.id, user.school_id, &user.role.to_string())
        .expect("generate token");
    JwtUtils::create_auth_cookie(&token)
}
