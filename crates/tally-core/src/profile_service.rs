use tally_domain::{PhotoUpload, PhotoUploaded, ProfileUpdate, UserProfile};
use tracing::info;

use crate::error::CoreResult;
use crate::gateway::BudgetGateway;
use crate::validation;

pub struct ProfileService;

impl ProfileService {
    pub fn load<G: BudgetGateway>(gateway: &G) -> CoreResult<UserProfile> {
        Ok(gateway.fetch_profile()?)
    }

    /// Sends the edit and returns the record as the service stored it.
    pub fn update<G: BudgetGateway>(gateway: &G, update: &ProfileUpdate) -> CoreResult<UserProfile> {
        validation::validate_profile_update(update)?;
        let updated = gateway.update_profile(update)?;
        info!(username = %updated.username, "profile updated");
        Ok(updated)
    }

    /// Uploads a photo and points `profile` at the stored file on success.
    pub fn upload_photo<G: BudgetGateway>(
        gateway: &G,
        profile: &mut UserProfile,
        upload: &PhotoUpload,
    ) -> CoreResult<PhotoUploaded> {
        validation::validate_photo(upload)?;
        let uploaded = gateway.upload_photo(upload)?;
        profile.profile_photo_url = Some(uploaded.file_url.clone());
        info!(file_url = %uploaded.file_url, "profile photo uploaded");
        Ok(uploaded)
    }
}
