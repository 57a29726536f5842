use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered artisan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub primary_craft: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

/// Sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub primary_craft: String,
    pub profile_picture: Option<String>,
    pub story: Option<String>,
}

impl NewUser {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, primary_craft: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            mobile: None,
            primary_craft: primary_craft.into(),
            profile_picture: None,
            story: None,
        }
    }

    pub(crate) fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: self.full_name,
            email: self.email,
            mobile: self.mobile,
            primary_craft: self.primary_craft,
            profile_picture: self.profile_picture,
            story: self.story,
        }
    }
}

/// Profile edit; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub primary_craft: Option<String>,
    pub profile_picture: Option<String>,
    pub story: Option<String>,
}

impl User {
    pub(crate) fn merge(&self, update: ProfileUpdate) -> User {
        User {
            id: self.id,
            full_name: update.full_name.unwrap_or_else(|| self.full_name.clone()),
            email: update.email.unwrap_or_else(|| self.email.clone()),
            mobile: update.mobile.or_else(|| self.mobile.clone()),
            primary_craft: update.primary_craft.unwrap_or_else(|| self.primary_craft.clone()),
            profile_picture: update.profile_picture.or_else(|| self.profile_picture.clone()),
            story: update.story.or_else(|| self.story.clone()),
        }
    }
}

/// What collaborators may know about whoever is signed in.
pub trait IdentityProvider {
    fn user_id(&self) -> Uuid;

    fn display_name(&self) -> &str;

    fn craft(&self) -> &str;
}

/// The signed-in user. Passed explicitly to every user-scoped operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

impl IdentityProvider for Session {
    fn user_id(&self) -> Uuid {
        self.user.id
    }

    fn display_name(&self) -> &str {
        &self.user.full_name
    }

    fn craft(&self) -> &str {
        &self.user.primary_craft
    }
}
