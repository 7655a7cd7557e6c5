//! Skill Service
//!
//! Only by-id reads are cached; lists always hit the store.

use std::sync::Arc;

use kernel::audit::Actor;
use kernel::id::SkillId;

use crate::application::cache::{PortfolioCaches, SKILLS_CACHE, id_key};
use crate::domain::entities::{NewSkill, Skill, SkillPatch};
use crate::domain::repository::SkillRepository;
use crate::domain::value_objects::SkillCategory;
use crate::error::{PortfolioError, PortfolioResult};

#[derive(Clone)]
pub struct SkillService<R> {
    repo: Arc<R>,
    caches: Arc<PortfolioCaches>,
}

impl<R> SkillService<R>
where
    R: SkillRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, caches: Arc<PortfolioCaches>) -> Self {
        Self { repo, caches }
    }

    pub async fn get_all_skills(&self) -> PortfolioResult<Vec<Skill>> {
        self.repo.find_all_skills().await
    }

    pub async fn get_skills_by_category(
        &self,
        category: SkillCategory,
    ) -> PortfolioResult<Vec<Skill>> {
        self.repo.find_skills_by_category(category).await
    }

    pub async fn get_skill_by_id(&self, id: SkillId) -> PortfolioResult<Skill> {
        self.caches
            .skills
            .get_or_try_load(&id_key(id), || async {
                self.repo
                    .find_skill_by_id(id)
                    .await?
                    .ok_or_else(|| PortfolioError::skill_not_found(id))
            })
            .await
    }

    pub async fn create_skill(&self, skill: NewSkill, actor: &Actor) -> PortfolioResult<Skill> {
        if self.repo.exists_skill_by_name(&skill.name).await? {
            return Err(PortfolioError::duplicate_skill_name(skill.name));
        }

        let created = self.repo.insert_skill(skill, actor).await?;

        tracing::info!(skill_id = %created.id, name = %created.name, actor = %actor, "Skill created");
        Ok(created)
    }

    pub async fn update_skill(
        &self,
        id: SkillId,
        patch: SkillPatch,
        actor: &Actor,
    ) -> PortfolioResult<Skill> {
        let mut skill = self
            .repo
            .find_skill_by_id(id)
            .await?
            .ok_or_else(|| PortfolioError::skill_not_found(id))?;

        if let Some(name) = skill.renamed_to(&patch) {
            if self.repo.exists_skill_by_name_other_than(name, id).await? {
                return Err(PortfolioError::duplicate_skill_name(name));
            }
        }

        skill.apply(patch);
        let updated = self.repo.update_skill(&skill, actor).await?;
        self.caches.skills.invalidate(&id_key(id)).await;

        tracing::info!(skill_id = %id, actor = %actor, "Skill updated");
        Ok(updated)
    }

    pub async fn delete_skill(&self, id: SkillId, actor: &Actor) -> PortfolioResult<()> {
        if self.repo.find_skill_by_id(id).await?.is_none() {
            return Err(PortfolioError::skill_not_found(id));
        }

        self.repo.soft_delete_skill(id, actor).await?;
        self.caches.skills.invalidate(&id_key(id)).await;

        tracing::info!(skill_id = %id, actor = %actor, "Skill deleted");
        Ok(())
    }

    pub fn refresh_skills_cache(&self) {
        self.caches.evict_all(SKILLS_CACHE);
    }
}
