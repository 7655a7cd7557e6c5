//! Profile Service
//!
//! Owner profile reads are cached under `"owner"`, by-id reads under the id.
//! Every write evicts both keys of the row it touched.

use std::sync::Arc;

use kernel::audit::Actor;
use kernel::id::ProfileId;

use crate::application::cache::{OWNER_KEY, PROFILE_CACHE, PortfolioCaches, id_key};
use crate::domain::entities::{Profile, ProfilePatch};
use crate::domain::repository::ProfileRepository;
use crate::error::{PortfolioError, PortfolioResult};

#[derive(Clone)]
pub struct ProfileService<R> {
    repo: Arc<R>,
    caches: Arc<PortfolioCaches>,
}

impl<R> ProfileService<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, caches: Arc<PortfolioCaches>) -> Self {
        Self { repo, caches }
    }

    pub async fn get_owner_profile(&self) -> PortfolioResult<Profile> {
        self.caches
            .profile
            .get_or_try_load(OWNER_KEY, || async {
                self.repo
                    .find_owner()
                    .await?
                    .ok_or(PortfolioError::OwnerProfileMissing)
            })
            .await
    }

    pub async fn get_profile_by_id(&self, id: ProfileId) -> PortfolioResult<Profile> {
        self.caches
            .profile
            .get_or_try_load(&id_key(id), || async {
                self.repo
                    .find_profile_by_id(id)
                    .await?
                    .ok_or_else(|| PortfolioError::profile_not_found(id))
            })
            .await
    }

    /// Uncached
    pub async fn get_all_profiles(&self) -> PortfolioResult<Vec<Profile>> {
        self.repo.find_all_profiles().await
    }

    pub async fn update_owner_profile(
        &self,
        patch: ProfilePatch,
        actor: &Actor,
    ) -> PortfolioResult<Profile> {
        let mut profile = self
            .repo
            .find_owner()
            .await?
            .ok_or(PortfolioError::OwnerProfileMissing)?;

        profile.apply(patch);
        let updated = self.repo.update_profile(&profile, actor).await?;
        self.evict(updated.id).await;

        tracing::info!(profile_id = %updated.id, actor = %actor, "Owner profile updated");
        Ok(updated)
    }

    pub async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
        actor: &Actor,
    ) -> PortfolioResult<Profile> {
        let mut profile = self
            .repo
            .find_profile_by_id(id)
            .await?
            .ok_or_else(|| PortfolioError::profile_not_found(id))?;

        profile.apply(patch);
        let updated = self.repo.update_profile(&profile, actor).await?;
        self.evict(id).await;

        tracing::info!(profile_id = %id, actor = %actor, "Profile updated");
        Ok(updated)
    }

    pub async fn delete_profile(&self, id: ProfileId, actor: &Actor) -> PortfolioResult<()> {
        if self.repo.find_profile_by_id(id).await?.is_none() {
            return Err(PortfolioError::profile_not_found(id));
        }

        self.repo.soft_delete_profile(id, actor).await?;
        self.evict(id).await;

        tracing::info!(profile_id = %id, actor = %actor, "Profile deleted");
        Ok(())
    }

    pub fn refresh_profile_cache(&self) {
        self.caches.evict_all(PROFILE_CACHE);
    }

    async fn evict(&self, id: ProfileId) {
        self.caches.profile.invalidate(OWNER_KEY).await;
        self.caches.profile.invalidate(&id_key(id)).await;
    }
}
