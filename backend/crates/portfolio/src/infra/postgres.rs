//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::audit::{Actor, Audit};
use kernel::id::{ProfileId, ProjectId, SkillId};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entities::{
    NewProfile, NewProject, NewSkill, Profile, Project, Skill, StructuredDescription,
};
use crate::domain::repository::{ProfileRepository, ProjectRepository, SkillRepository};
use crate::domain::value_objects::{ProjectStatus, SkillCategory, SkillLevel};
use crate::error::{PortfolioError, PortfolioResult};

const AUDIT_COLUMNS: &str = "created_at, updated_at, created_by, updated_by, is_deleted";

const PROFILE_COLUMNS: &str = r#"
    id,
    full_name,
    title,
    bio,
    professional_summary,
    experience_years,
    total_projects,
    education_summary,
    cert_summary,
    email,
    phone_number,
    github_url,
    linkedin_url,
    avatar_url
"#;

const PROJECT_COLUMNS: &str = r#"
    id,
    title,
    short_description,
    full_description,
    image_url,
    demo_url,
    github_url,
    review_url,
    video_url,
    gallery,
    technologies,
    category,
    is_featured,
    display_order,
    status,
    project_date
"#;

const SKILL_COLUMNS: &str = "id, name, category, level, priority";

/// A unique-index violation becomes `on_conflict`; anything else stays a database error
fn unique_violation_or(
    err: sqlx::Error,
    on_conflict: impl FnOnce() -> PortfolioError,
) -> PortfolioError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return on_conflict();
        }
    }
    PortfolioError::Database(err)
}

/// PostgreSQL-backed portfolio repository
#[derive(Clone)]
pub struct PgPortfolioRepository {
    pool: PgPool,
}

impl PgPortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_projects(
        &self,
        filter: &str,
        bind: Option<&str>,
    ) -> PortfolioResult<Vec<Project>> {
        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}, {AUDIT_COLUMNS}
            FROM projects
            WHERE is_deleted = false {filter}
            ORDER BY display_order ASC, id ASC
            "#
        );

        let mut query = sqlx::query_as::<_, ProjectRow>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(ProjectRow::into_project).collect()
    }
}

// ============================================================================
// Profile
// ============================================================================

impl ProfileRepository for PgPortfolioRepository {
    async fn find_owner(&self) -> PortfolioResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}, {AUDIT_COLUMNS}
            FROM profile
            WHERE is_deleted = false
            ORDER BY id
            LIMIT 1
            "#
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn find_profile_by_id(&self, id: ProfileId) -> PortfolioResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}, {AUDIT_COLUMNS}
            FROM profile
            WHERE id = $1
              AND is_deleted = false
            "#
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn find_all_profiles(&self) -> PortfolioResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}, {AUDIT_COLUMNS}
            FROM profile
            WHERE is_deleted = false
            ORDER BY id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProfileRow::into_profile).collect())
    }

    async fn count_active_profiles(&self) -> PortfolioResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profile WHERE is_deleted = false")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_profile(
        &self,
        profile: NewProfile,
        actor: &Actor,
    ) -> PortfolioResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO profile (full_name, {AUDIT_COLUMNS})
            VALUES ($1, $2, $2, $3, $3, false)
            RETURNING {PROFILE_COLUMNS}, {AUDIT_COLUMNS}
            "#
        ))
        .bind(&profile.full_name)
        .bind(Utc::now())
        .bind(actor.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(profile_id = row.id, "Profile inserted");

        Ok(row.into_profile())
    }

    async fn update_profile(&self, profile: &Profile, actor: &Actor) -> PortfolioResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE profile
            SET full_name = $2,
                title = $3,
                bio = $4,
                professional_summary = $5,
                experience_years = $6,
                total_projects = $7,
                education_summary = $8,
                cert_summary = $9,
                email = $10,
                phone_number = $11,
                github_url = $12,
                linkedin_url = $13,
                avatar_url = $14,
                updated_at = GREATEST($15, created_at),
                updated_by = $16
            WHERE id = $1
              AND is_deleted = false
            RETURNING {PROFILE_COLUMNS}, {AUDIT_COLUMNS}
            "#
        ))
        .bind(profile.id.value())
        .bind(&profile.full_name)
        .bind(&profile.title)
        .bind(&profile.bio)
        .bind(&profile.professional_summary)
        .bind(&profile.experience_years)
        .bind(&profile.total_projects)
        .bind(&profile.education_summary)
        .bind(&profile.cert_summary)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(&profile.github_url)
        .bind(&profile.linkedin_url)
        .bind(&profile.avatar_url)
        .bind(Utc::now())
        .bind(actor.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileRow::into_profile)
            .ok_or_else(|| PortfolioError::profile_not_found(profile.id))
    }

    async fn soft_delete_profile(&self, id: ProfileId, actor: &Actor) -> PortfolioResult<bool> {
        let result = soft_delete(&self.pool, "profile", id.value(), actor).await?;

        tracing::info!(profile_id = %id, deleted = result, "Profile soft delete");

        Ok(result)
    }
}

// ============================================================================
// Project
// ============================================================================

impl ProjectRepository for PgPortfolioRepository {
    async fn find_all_projects(&self) -> PortfolioResult<Vec<Project>> {
        self.fetch_projects("", None).await
    }

    async fn find_featured_projects(&self) -> PortfolioResult<Vec<Project>> {
        self.fetch_projects("AND is_featured = true", None).await
    }

    async fn find_projects_by_category(&self, category: &str) -> PortfolioResult<Vec<Project>> {
        self.fetch_projects("AND category = $1", Some(category))
            .await
    }

    async fn find_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> PortfolioResult<Vec<Project>> {
        self.fetch_projects("AND status = $1", Some(status.code()))
            .await
    }

    async fn find_project_by_id(&self, id: ProjectId) -> PortfolioResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}, {AUDIT_COLUMNS}
            FROM projects
            WHERE id = $1
              AND is_deleted = false
            "#
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProjectRow::into_project).transpose()
    }

    async fn exists_project_by_title(&self, title: &str) -> PortfolioResult<bool> {
        Ok(title_taken(&self.pool, title, None).await?)
    }

    async fn exists_project_by_title_other_than(
        &self,
        title: &str,
        id: ProjectId,
    ) -> PortfolioResult<bool> {
        Ok(title_taken(&self.pool, title, Some(id.value())).await?)
    }

    async fn insert_project(
        &self,
        project: NewProject,
        actor: &Actor,
    ) -> PortfolioResult<Project> {
        let mut tx = self.pool.begin().await?;

        if title_taken(&mut *tx, &project.title, None).await? {
            return Err(PortfolioError::duplicate_project_title(project.title));
        }

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (
                title,
                short_description,
                full_description,
                image_url,
                demo_url,
                github_url,
                review_url,
                video_url,
                gallery,
                technologies,
                category,
                is_featured,
                display_order,
                status,
                project_date,
                {AUDIT_COLUMNS}
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $16, $17, $17, false
            )
            RETURNING {PROJECT_COLUMNS}, {AUDIT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.short_description)
        .bind(project.full_description.as_ref().map(Json))
        .bind(&project.image_url)
        .bind(&project.demo_url)
        .bind(&project.github_url)
        .bind(&project.review_url)
        .bind(&project.video_url)
        .bind(Json(&project.gallery))
        .bind(project.technologies.as_ref().map(Json))
        .bind(&project.category)
        .bind(project.is_featured)
        .bind(project.display_order)
        .bind(project.status.code())
        .bind(project.project_date)
        .bind(Utc::now())
        .bind(actor.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            unique_violation_or(e, || {
                PortfolioError::duplicate_project_title(project.title.clone())
            })
        })?;

        tx.commit().await?;

        tracing::info!(project_id = row.id, "Project inserted");

        row.into_project()
    }

    async fn update_project(&self, project: &Project, actor: &Actor) -> PortfolioResult<Project> {
        let mut tx = self.pool.begin().await?;

        if title_taken(&mut *tx, &project.title, Some(project.id.value())).await? {
            return Err(PortfolioError::duplicate_project_title(
                project.title.clone(),
            ));
        }

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects
            SET title = $2,
                short_description = $3,
                full_description = $4,
                image_url = $5,
                demo_url = $6,
                github_url = $7,
                review_url = $8,
                video_url = $9,
                gallery = $10,
                technologies = $11,
                category = $12,
                is_featured = $13,
                display_order = $14,
                status = $15,
                project_date = $16,
                updated_at = GREATEST($17, created_at),
                updated_by = $18
            WHERE id = $1
              AND is_deleted = false
            RETURNING {PROJECT_COLUMNS}, {AUDIT_COLUMNS}
            "#
        ))
        .bind(project.id.value())
        .bind(&project.title)
        .bind(&project.short_description)
        .bind(project.full_description.as_ref().map(Json))
        .bind(&project.image_url)
        .bind(&project.demo_url)
        .bind(&project.github_url)
        .bind(&project.review_url)
        .bind(&project.video_url)
        .bind(Json(&project.gallery))
        .bind(project.technologies.as_ref().map(Json))
        .bind(&project.category)
        .bind(project.is_featured)
        .bind(project.display_order)
        .bind(project.status.code())
        .bind(project.project_date)
        .bind(Utc::now())
        .bind(actor.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            unique_violation_or(e, || {
                PortfolioError::duplicate_project_title(project.title.clone())
            })
        })?;

        let Some(row) = row else {
            return Err(PortfolioError::project_not_found(project.id));
        };

        tx.commit().await?;

        tracing::info!(project_id = row.id, "Project updated");

        row.into_project()
    }

    async fn soft_delete_project(&self, id: ProjectId, actor: &Actor) -> PortfolioResult<bool> {
        let result = soft_delete(&self.pool, "projects", id.value(), actor).await?;

        tracing::info!(project_id = %id, deleted = result, "Project soft delete");

        Ok(result)
    }
}

// ============================================================================
// Skill
// ============================================================================

impl SkillRepository for PgPortfolioRepository {
    async fn find_all_skills(&self) -> PortfolioResult<Vec<Skill>> {
        let rows = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            SELECT {SKILL_COLUMNS}, {AUDIT_COLUMNS}
            FROM skills
            WHERE is_deleted = false
            ORDER BY priority ASC, id ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SkillRow::into_skill).collect()
    }

    async fn find_skills_by_category(
        &self,
        category: SkillCategory,
    ) -> PortfolioResult<Vec<Skill>> {
        let rows = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            SELECT {SKILL_COLUMNS}, {AUDIT_COLUMNS}
            FROM skills
            WHERE category = $1
              AND is_deleted = false
            ORDER BY priority ASC, id ASC
            "#
        ))
        .bind(category.code())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SkillRow::into_skill).collect()
    }

    async fn find_skill_by_id(&self, id: SkillId) -> PortfolioResult<Option<Skill>> {
        let row = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            SELECT {SKILL_COLUMNS}, {AUDIT_COLUMNS}
            FROM skills
            WHERE id = $1
              AND is_deleted = false
            "#
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SkillRow::into_skill).transpose()
    }

    async fn exists_skill_by_name(&self, name: &str) -> PortfolioResult<bool> {
        Ok(name_taken(&self.pool, name, None).await?)
    }

    async fn exists_skill_by_name_other_than(
        &self,
        name: &str,
        id: SkillId,
    ) -> PortfolioResult<bool> {
        Ok(name_taken(&self.pool, name, Some(id.value())).await?)
    }

    async fn insert_skill(&self, skill: NewSkill, actor: &Actor) -> PortfolioResult<Skill> {
        let mut tx = self.pool.begin().await?;

        if name_taken(&mut *tx, &skill.name, None).await? {
            return Err(PortfolioError::duplicate_skill_name(skill.name));
        }

        let row = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            INSERT INTO skills (name, category, level, priority, {AUDIT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $5, $6, $6, false)
            RETURNING {SKILL_COLUMNS}, {AUDIT_COLUMNS}
            "#
        ))
        .bind(&skill.name)
        .bind(skill.category.code())
        .bind(skill.level.code())
        .bind(skill.priority)
        .bind(Utc::now())
        .bind(actor.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_violation_or(e, || PortfolioError::duplicate_skill_name(skill.name.clone())))?;

        tx.commit().await?;

        tracing::info!(skill_id = row.id, "Skill inserted");

        row.into_skill()
    }

    async fn update_skill(&self, skill: &Skill, actor: &Actor) -> PortfolioResult<Skill> {
        let mut tx = self.pool.begin().await?;

        if name_taken(&mut *tx, &skill.name, Some(skill.id.value())).await? {
            return Err(PortfolioError::duplicate_skill_name(skill.name.clone()));
        }

        let row = sqlx::query_as::<_, SkillRow>(&format!(
            r#"
            UPDATE skills
            SET name = $2,
                category = $3,
                level = $4,
                priority = $5,
                updated_at = GREATEST($6, created_at),
                updated_by = $7
            WHERE id = $1
              AND is_deleted = false
            RETURNING {SKILL_COLUMNS}, {AUDIT_COLUMNS}
            "#
        ))
        .bind(skill.id.value())
        .bind(&skill.name)
        .bind(skill.category.code())
        .bind(skill.level.code())
        .bind(skill.priority)
        .bind(Utc::now())
        .bind(actor.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| unique_violation_or(e, || PortfolioError::duplicate_skill_name(skill.name.clone())))?;

        let Some(row) = row else {
            return Err(PortfolioError::skill_not_found(skill.id));
        };

        tx.commit().await?;

        tracing::info!(skill_id = row.id, "Skill updated");

        row.into_skill()
    }

    async fn soft_delete_skill(&self, id: SkillId, actor: &Actor) -> PortfolioResult<bool> {
        let result = soft_delete(&self.pool, "skills", id.value(), actor).await?;

        tracing::info!(skill_id = %id, deleted = result, "Skill soft delete");

        Ok(result)
    }
}

// ============================================================================
// Shared statements
// ============================================================================

async fn title_taken<'e, E>(executor: E, title: &str, except: Option<i64>) -> sqlx::Result<bool>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM projects
            WHERE title = $1
              AND is_deleted = false
              AND ($2::BIGINT IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(title)
    .bind(except)
    .fetch_one(executor)
    .await
}

async fn name_taken<'e, E>(executor: E, name: &str, except: Option<i64>) -> sqlx::Result<bool>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM skills
            WHERE name = $1
              AND is_deleted = false
              AND ($2::BIGINT IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(name)
    .bind(except)
    .fetch_one(executor)
    .await
}

/// Flag a row deleted; `table` is always a crate constant
async fn soft_delete(pool: &PgPool, table: &str, id: i64, actor: &Actor) -> sqlx::Result<bool> {
    let result = sqlx::query(&format!(
        r#"
        UPDATE {table}
        SET is_deleted = true,
            updated_at = GREATEST($2, created_at),
            updated_by = $3
        WHERE id = $1
          AND is_deleted = false
        "#
    ))
    .bind(id)
    .bind(Utc::now())
    .bind(actor.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Row Types
// ============================================================================

fn audit(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: String,
    updated_by: String,
    is_deleted: bool,
) -> Audit {
    Audit {
        created_at,
        updated_at,
        created_by,
        updated_by,
        is_deleted,
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    full_name: String,
    title: Option<String>,
    bio: Option<String>,
    professional_summary: Option<String>,
    experience_years: Option<String>,
    total_projects: Option<String>,
    education_summary: Option<String>,
    cert_summary: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    github_url: Option<String>,
    linkedin_url: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: String,
    updated_by: String,
    is_deleted: bool,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            id: ProfileId::new(self.id),
            full_name: self.full_name,
            title: self.title,
            bio: self.bio,
            professional_summary: self.professional_summary,
            experience_years: self.experience_years,
            total_projects: self.total_projects,
            education_summary: self.education_summary,
            cert_summary: self.cert_summary,
            email: self.email,
            phone_number: self.phone_number,
            github_url: self.github_url,
            linkedin_url: self.linkedin_url,
            avatar_url: self.avatar_url,
            audit: audit(
                self.created_at,
                self.updated_at,
                self.created_by,
                self.updated_by,
                self.is_deleted,
            ),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    title: String,
    short_description: Option<String>,
    full_description: Option<Json<StructuredDescription>>,
    image_url: Option<String>,
    demo_url: Option<String>,
    github_url: Option<String>,
    review_url: Option<String>,
    video_url: Option<String>,
    gallery: Option<Json<Vec<String>>>,
    technologies: Option<Json<Vec<String>>>,
    category: Option<String>,
    is_featured: Option<bool>,
    display_order: Option<i32>,
    status: Option<String>,
    project_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: String,
    updated_by: String,
    is_deleted: bool,
}

impl ProjectRow {
    fn into_project(self) -> PortfolioResult<Project> {
        let status = match self.status.as_deref() {
            None | Some("") => ProjectStatus::default(),
            Some(code) => ProjectStatus::from_code(code)
                .map_err(|e| PortfolioError::Internal(format!("Invalid project row: {}", e)))?,
        };

        Ok(Project {
            id: ProjectId::new(self.id),
            title: self.title,
            short_description: self.short_description,
            full_description: self.full_description.map(|Json(d)| d),
            image_url: self.image_url,
            demo_url: self.demo_url,
            github_url: self.github_url,
            review_url: self.review_url,
            video_url: self.video_url,
            gallery: self.gallery.map(|Json(g)| g).unwrap_or_default(),
            technologies: self.technologies.map(|Json(t)| t),
            category: self.category,
            is_featured: self.is_featured.unwrap_or(false),
            display_order: self.display_order.unwrap_or(0),
            status,
            project_date: self.project_date,
            audit: audit(
                self.created_at,
                self.updated_at,
                self.created_by,
                self.updated_by,
                self.is_deleted,
            ),
        })
    }
}

#[derive(sqlx::FromRow)]
struct SkillRow {
    id: i64,
    name: String,
    category: String,
    level: String,
    priority: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: String,
    updated_by: String,
    is_deleted: bool,
}

impl SkillRow {
    fn into_skill(self) -> PortfolioResult<Skill> {
        let invalid = |e: crate::domain::value_objects::UnknownVariant| {
            PortfolioError::Internal(format!("Invalid skill row: {}", e))
        };

        Ok(Skill {
            id: SkillId::new(self.id),
            name: self.name,
            category: SkillCategory::from_code(&self.category).map_err(invalid)?,
            level: SkillLevel::from_code(&self.level).map_err(invalid)?,
            priority: self.priority.unwrap_or(0),
            audit: audit(
                self.created_at,
                self.updated_at,
                self.created_by,
                self.updated_by,
                self.is_deleted,
            ),
        })
    }
}
