use super::users::{apply_user_update, insert_user};
use super::{SeaOrmStorage, db_error, page_and_size};
use crate::entity::teacher_profiles::{
    ActiveModel, Column, Entity as TeacherProfiles, Model as ProfileModel,
};
use crate::entity::users::{self, Entity as Users, Model as UserModel};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    teachers::{
        entities::{Teacher, TeacherProfile},
        requests::{TeacherListQuery, TeacherProfileInput, TeacherProfileUpdate},
        responses::TeacherListResponse,
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

fn into_teacher(row: (ProfileModel, Option<UserModel>)) -> Option<Teacher> {
    let (profile, user) = row;
    user.map(|u| Teacher {
        user: u.into_user(),
        profile: profile.into_profile(),
    })
}

impl SeaOrmStorage {
    /// 创建教师（账号和档案在同一事务中写入）
    pub async fn create_teacher_impl(
        &self,
        user: NewUser,
        profile: TeacherProfileInput,
    ) -> Result<Teacher> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let school_id = user.school_id;
        let user = insert_user(&txn, NewUser { role: UserRole::Teacher, ..user }).await?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user.id),
            school_id: Set(school_id),
            employee_id: Set(profile.employee_id),
            department: Set(profile.department.to_string()),
            class_grade: Set(profile.class_grade),
            class_section: Set(profile.class_section),
            phone: Set(profile.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let profile = model.insert(&txn).await.map_err(db_error("创建教师档案失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(Teacher {
            user: user.into_user(),
            profile: profile.into_profile(),
        })
    }

    pub async fn get_teacher_impl(&self, school_id: i64, user_id: i64) -> Result<Option<Teacher>> {
        let result = TeacherProfiles::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?;

        Ok(result.and_then(into_teacher))
    }

    pub async fn get_teacher_profile_impl(
        &self,
        school_id: i64,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        let result = TeacherProfiles::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询教师档案失败"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 分页列出教师
    pub async fn list_teachers_impl(
        &self,
        school_id: i64,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = TeacherProfiles::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id));

        if !query.include_inactive {
            select = select.filter(users::Column::IsActive.eq(true));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(users::Column::Name.like(contains_pattern(pattern)))
                    .add(users::Column::Email.like(contains_pattern(pattern)))
                    .add(Column::EmployeeId.like(contains_pattern(pattern))),
            );
        }

        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department.to_string()));
        }

        let paginator = select
            .order_by_asc(users::Column::Name)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询教师总数失败"))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询教师列表失败"))?;

        Ok(TeacherListResponse {
            items: rows.into_iter().filter_map(into_teacher).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新教师账号及档案
    pub async fn update_teacher_impl(
        &self,
        school_id: i64,
        user_id: i64,
        user: UserUpdate,
        profile: TeacherProfileUpdate,
    ) -> Result<Option<Teacher>> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let Some(existing) = TeacherProfiles::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(db_error("查询教师档案失败"))?
        else {
            return Ok(None);
        };

        apply_user_update(&txn, school_id, user_id, user).await?;

        let mut model: ActiveModel = existing.into();
        if let Some(department) = profile.department {
            model.department = Set(department.to_string());
        }
        if let Some(v) = profile.employee_id {
            model.employee_id = Set(Some(v));
        }
        if let Some(v) = profile.class_grade {
            model.class_grade = Set(Some(v));
        }
        if let Some(v) = profile.class_section {
            model.class_section = Set(Some(v));
        }
        if let Some(v) = profile.phone {
            model.phone = Set(Some(v));
        }
        if model.is_changed() {
            model.updated_at = Set(chrono::Utc::now().timestamp());
            model.update(&txn).await.map_err(db_error("更新教师档案失败"))?;
        }

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        self.get_teacher_impl(school_id, user_id).await
    }

    /// 统计在职教师
    pub async fn count_teachers_impl(&self, school_id: i64) -> Result<u64> {
        TeacherProfiles::find()
            .join(JoinType::InnerJoin, crate::entity::teacher_profiles::Relation::User.def())
            .filter(Column::SchoolId.eq(school_id))
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计教师数量失败"))
    }
}
