use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{Profile, User, UserRole};
use crate::shared::validation::deserialize_patch;

/// Profile fields; on update, given fields are merged into the stored profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileDto {
    #[validate(length(max = 500, message = "Bio must not exceed 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 100, message = "Location must not exceed 100 characters"))]
    pub location: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(length(max = 100, message = "GitHub handle must not exceed 100 characters"))]
    pub github: Option<String>,

    #[validate(length(max = 100, message = "Twitter handle must not exceed 100 characters"))]
    pub twitter: Option<String>,
}

impl ProfileDto {
    pub fn merge_into(self, profile: &mut Profile) {
        if let Some(bio) = self.bio {
            profile.bio = Some(bio);
        }
        if let Some(location) = self.location {
            profile.location = Some(location);
        }
        if let Some(website) = self.website {
            profile.website = Some(website);
        }
        if let Some(github) = self.github {
            profile.github = Some(github);
        }
        if let Some(twitter) = self.twitter {
            profile.twitter = Some(twitter);
        }
    }
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        let mut profile = Profile::default();
        dto.merge_into(&mut profile);
        profile
    }
}

/// Request DTO for creating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,

    /// Defaults to `USER`
    pub role: Option<UserRole>,

    #[validate(nested)]
    pub profile: Option<ProfileDto>,
}

/// Request DTO for a partial user update.
///
/// The email cannot be changed. `null` clears `name` and `image`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserDto {
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<Option<String>>,

    pub role: Option<UserRole>,

    /// Created when the user has none yet
    #[validate(nested)]
    pub profile: Option<ProfileDto>,
}

/// Response DTO for user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            image: u.image,
            role: u.role,
            profile: u.profile,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
