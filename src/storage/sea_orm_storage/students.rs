use super::users::{apply_user_update, insert_user};
use super::{SeaOrmStorage, db_error, page_and_size};
use crate::entity::student_profiles::{
    ActiveModel, Column, Entity as StudentProfiles, Model as ProfileModel,
};
use crate::entity::users::{self, Entity as Users, Model as UserModel};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    students::{
        entities::{Student, StudentProfile},
        requests::{StudentListQuery, StudentProfileInput, StudentProfileUpdate},
        responses::StudentListResponse,
    },
    users::{
        entities::UserRole,
        requests::{NewUser, UserUpdate},
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait, sea_query::JoinType,
};

fn into_student(row: (ProfileModel, Option<UserModel>)) -> Option<Student> {
    let (profile, user) = row;
    user.map(|u| Student {
        user: u.into_user(),
        profile: profile.into_profile(),
    })
}

impl SeaOrmStorage {
    /// 创建学生（账号和档案在同一事务中写入）
    pub async fn create_student_impl(
        &self,
        user: NewUser,
        profile: StudentProfileInput,
    ) -> Result<Student> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let school_id = user.school_id;
        let user = insert_user(&txn, NewUser { role: UserRole::Student, ..user }).await?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user.id),
            school_id: Set(school_id),
            admission_number: Set(profile.admission_number),
            grade_level: Set(profile.grade_level),
            section: Set(profile.section),
            roll_number: Set(profile.roll_number),
            date_of_birth: Set(profile.date_of_birth),
            guardian_name: Set(profile.guardian_name),
            guardian_phone: Set(profile.guardian_phone),
            guardian_email: Set(profile.guardian_email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let profile = model.insert(&txn).await.map_err(db_error("创建学生档案失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(Student {
            user: user.into_user(),
            profile: profile.into_profile(),
        })
    }

    /// 获取学生
    pub async fn get_student_impl(&self, school_id: i64, user_id: i64) -> Result<Option<Student>> {
        let result = StudentProfiles::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?;

        Ok(result.and_then(into_student))
    }

    /// 获取学生档案
    pub async fn get_student_profile_impl(
        &self,
        school_id: i64,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询学生档案失败"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 分页列出学生
    pub async fn list_students_impl(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = StudentProfiles::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id));

        if !query.include_inactive {
            select = select.filter(users::Column::IsActive.eq(true));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(users::Column::Name.like(contains_pattern(pattern)))
                    .add(users::Column::Email.like(contains_pattern(pattern)))
                    .add(Column::AdmissionNumber.like(contains_pattern(pattern))),
            );
        }

        if let Some(ref grade_level) = query.grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level.as_str()));
        }

        if let Some(ref section) = query.section {
            select = select.filter(Column::Section.eq(section.as_str()));
        }

        select = select
            .order_by_asc(Column::GradeLevel)
            .order_by_asc(Column::Section)
            .order_by_asc(users::Column::Name);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询学生总数失败"))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询学生列表失败"))?;

        Ok(StudentListResponse {
            items: rows.into_iter().filter_map(into_student).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出某个班级的在读学生
    pub async fn list_class_students_impl(
        &self,
        school_id: i64,
        grade_level: &str,
        section: Option<&str>,
    ) -> Result<Vec<Student>> {
        let mut select = StudentProfiles::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::GradeLevel.eq(grade_level))
            .filter(users::Column::IsActive.eq(true));

        if let Some(section) = section {
            select = select.filter(Column::Section.eq(section));
        }

        let rows = select
            .order_by_asc(Column::Section)
            .order_by_asc(Column::RollNumber)
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error("查询班级学生失败"))?;

        Ok(rows.into_iter().filter_map(into_student).collect())
    }

    /// 全校在读学生（按年级、班级排序）
    pub async fn list_active_students_impl(&self, school_id: i64) -> Result<Vec<Student>> {
        let rows = StudentProfiles::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id))
            .filter(users::Column::IsActive.eq(true))
            .order_by_asc(Column::GradeLevel)
            .order_by_asc(Column::Section)
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error("查询在读学生失败"))?;

        Ok(rows.into_iter().filter_map(into_student).collect())
    }

    /// 更新学生账号及档案
    pub async fn update_student_impl(
        &self,
        school_id: i64,
        user_id: i64,
        user: UserUpdate,
        profile: StudentProfileUpdate,
    ) -> Result<Option<Student>> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let Some(existing) = StudentProfiles::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(db_error("查询学生档案失败"))?
        else {
            return Ok(None);
        };

        apply_user_update(&txn, school_id, user_id, user).await?;

        let mut model: ActiveModel = existing.into();
        if let Some(grade_level) = profile.grade_level {
            model.grade_level = Set(grade_level);
        }
        if let Some(section) = profile.section {
            model.section = Set(section);
        }
        if let Some(v) = profile.admission_number {
            model.admission_number = Set(Some(v));
        }
        if let Some(v) = profile.roll_number {
            model.roll_number = Set(Some(v));
        }
        if let Some(v) = profile.date_of_birth {
            model.date_of_birth = Set(Some(v));
        }
        if let Some(v) = profile.guardian_name {
            model.guardian_name = Set(Some(v));
        }
        if let Some(v) = profile.guardian_phone {
            model.guardian_phone = Set(Some(v));
        }
        if let Some(v) = profile.guardian_email {
            model.guardian_email = Set(Some(v));
        }
        if model.is_changed() {
            model.updated_at = Set(chrono::Utc::now().timestamp());
            model.update(&txn).await.map_err(db_error("更新学生档案失败"))?;
        }

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        self.get_student_impl(school_id, user_id).await
    }

    /// 统计在读学生
    pub async fn count_students_impl(&self, school_id: i64) -> Result<u64> {
        StudentProfiles::find()
            .join(JoinType::InnerJoin, crate::entity::student_profiles::Relation::User.def())
            .filter(Column::SchoolId.eq(school_id))
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计学生数量失败"))
    }
}
