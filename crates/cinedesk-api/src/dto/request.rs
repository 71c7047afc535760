//! Request DTOs with validation.
//!
//! Shape checks (lengths, formats) live on the DTOs; rules that need the
//! database or span several fields are enforced by the services.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use cinedesk_core::AppResult;
use cinedesk_core::types::parse_required_id;
use cinedesk_entity::episode::UpdateEpisode;
use cinedesk_entity::film::UpdateFilm;
use cinedesk_entity::member::{CreateMember, UpdateMember};
use cinedesk_entity::news::UpdateNews;
use cinedesk_entity::plan::{CreatePlan, UpdatePlan};
use cinedesk_entity::user::UserRole;
use cinedesk_service::catalog::taxonomy::TaxonomyInput;
use cinedesk_service::film::episode::NewEpisode;
use cinedesk_service::film::service::NewFilm;
use cinedesk_service::news::NewArticle;
use cinedesk_service::notification::{NotificationContentInput, NotificationInput};
use cinedesk_service::user::admin::{NewUser, UserChanges};

// ── Auth ─────────────────────────────────────────────────────────

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refreshToken is required"))]
    pub refresh_token: String,
}

// ── Notifications ────────────────────────────────────────────────

/// Notification content as sent by the admin form.
///
/// Required fields default to empty so the service can report them by name
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "message must be at most 5000 characters"))]
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    #[validate(length(max = 500, message = "link must be at most 500 characters"))]
    pub link: Option<String>,
    pub film_id: Option<String>,
    pub episode_id: Option<String>,
    pub review_id: Option<String>,
    pub comment_id: Option<String>,
}

impl From<NotificationContentRequest> for NotificationContentInput {
    fn from(req: NotificationContentRequest) -> Self {
        Self {
            title: req.title,
            message: req.message,
            notification_type: req.notification_type,
            link: req.link,
            film_id: req.film_id,
            episode_id: req.episode_id,
            review_id: req.review_id,
            comment_id: req.comment_id,
        }
    }
}

/// `POST /notifications`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub content: NotificationContentRequest,
    pub sending_type: Option<String>,
    pub sending_user_id: Option<String>,
    pub sending_film_id: Option<String>,
}

impl From<CreateNotificationRequest> for NotificationInput {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            content: req.content.into(),
            sending_type: req.sending_type,
            sending_user_id: req.sending_user_id,
            sending_film_id: req.sending_film_id,
        }
    }
}

// ── Members ──────────────────────────────────────────────────────

/// `POST /members`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub user_id: Option<String>,
    pub kind: String,
    #[validate(length(min = 1, max = 120, message = "stageName must be 1-120 characters"))]
    pub stage_name: String,
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
}

impl CreateMemberRequest {
    pub fn into_create(self) -> AppResult<CreateMember> {
        Ok(CreateMember {
            user_id: parse_required_id("userId", self.user_id.as_deref())?,
            kind: self.kind.parse()?,
            stage_name: self.stage_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
        })
    }
}

/// `PUT /members/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub kind: Option<String>,
    #[validate(length(min = 1, max = 120, message = "stageName must be 1-120 characters"))]
    pub stage_name: Option<String>,
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
}

impl UpdateMemberRequest {
    pub fn into_update(self) -> AppResult<UpdateMember> {
        Ok(UpdateMember {
            kind: self.kind.as_deref().map(str::parse).transpose()?,
            stage_name: self.stage_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
        })
    }
}

// ── Films & episodes ─────────────────────────────────────────────

/// `POST /films`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub film_type: String,
    pub status: Option<String>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 500))]
    pub poster_url: Option<String>,
    #[validate(length(max = 500))]
    pub cover_url: Option<String>,
    #[validate(length(max = 500))]
    pub video_url: Option<String>,
    #[validate(length(max = 500))]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<Uuid>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    #[serde(default)]
    pub actors: Vec<Uuid>,
    #[serde(default)]
    pub translators: Vec<Uuid>,
}

impl CreateFilmRequest {
    pub fn into_new(self) -> AppResult<NewFilm> {
        Ok(NewFilm {
            title: self.title,
            slug: self.slug,
            description: self.description,
            film_type: self.film_type.parse()?,
            status: self.status.as_deref().map(str::parse).transpose()?,
            release_year: self.release_year,
            duration_minutes: self.duration_minutes,
            poster_url: self.poster_url,
            cover_url: self.cover_url,
            video_url: self.video_url,
            trailer_url: self.trailer_url,
            genre_ids: self.genre_ids,
            category_ids: self.category_ids,
            actors: self.actors,
            translators: self.translators,
        })
    }
}

/// `PUT /films/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub film_type: Option<String>,
    pub status: Option<String>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 500))]
    pub poster_url: Option<String>,
    #[validate(length(max = 500))]
    pub cover_url: Option<String>,
    #[validate(length(max = 500))]
    pub video_url: Option<String>,
    #[validate(length(max = 500))]
    pub trailer_url: Option<String>,
    pub genre_ids: Option<Vec<Uuid>>,
    pub category_ids: Option<Vec<Uuid>>,
    pub actors: Option<Vec<Uuid>>,
    pub translators: Option<Vec<Uuid>>,
}

impl UpdateFilmRequest {
    pub fn into_update(self) -> AppResult<UpdateFilm> {
        Ok(UpdateFilm {
            title: self.title,
            slug: self.slug,
            description: self.description,
            film_type: self.film_type.as_deref().map(str::parse).transpose()?,
            status: self.status.as_deref().map(str::parse).transpose()?,
            release_year: self.release_year,
            duration_minutes: self.duration_minutes,
            poster_url: self.poster_url,
            cover_url: self.cover_url,
            video_url: self.video_url,
            trailer_url: self.trailer_url,
            genre_ids: self.genre_ids,
            category_ids: self.category_ids,
            actors: self.actors,
            translators: self.translators,
        })
    }
}

/// `POST /films/{id}/episodes`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEpisodeRequest {
    #[validate(range(min = 1, message = "number must be at least 1"))]
    pub number: i32,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
}

impl From<CreateEpisodeRequest> for NewEpisode {
    fn from(req: CreateEpisodeRequest) -> Self {
        Self {
            number: req.number,
            title: req.title,
            video_url: req.video_url,
            duration_minutes: req.duration_minutes,
        }
    }
}

/// `PUT /episodes/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEpisodeRequest {
    #[validate(range(min = 1, message = "number must be at least 1"))]
    pub number: Option<i32>,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
}

impl From<UpdateEpisodeRequest> for UpdateEpisode {
    fn from(req: UpdateEpisodeRequest) -> Self {
        Self {
            number: req.number,
            title: req.title,
            video_url: req.video_url,
            duration_minutes: req.duration_minutes,
        }
    }
}

// ── Genres & categories ──────────────────────────────────────────

/// Body for creating or updating a genre or category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TaxonomyRequest {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl From<TaxonomyRequest> for TaxonomyInput {
    fn from(req: TaxonomyRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
        }
    }
}

// ── Engagement ───────────────────────────────────────────────────

/// `PUT /comments/{id}/visibility`
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct VisibilityRequest {
    pub hidden: bool,
}

// ── Plans ────────────────────────────────────────────────────────

/// `POST /plans`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "priceCents must not be negative"))]
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[validate(range(min = 1, message = "durationDays must be at least 1"))]
    pub duration_days: i32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CreatePlanRequest> for CreatePlan {
    fn from(req: CreatePlanRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price_cents: req.price_cents,
            currency: req.currency,
            duration_days: req.duration_days,
            features: req.features,
            is_active: req.is_active,
        }
    }
}

/// `PUT /plans/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "priceCents must not be negative"))]
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    #[validate(range(min = 1, message = "durationDays must be at least 1"))]
    pub duration_days: Option<i32>,
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl From<UpdatePlanRequest> for UpdatePlan {
    fn from(req: UpdatePlanRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price_cents: req.price_cents,
            currency: req.currency,
            duration_days: req.duration_days,
            features: req.features,
            is_active: req.is_active,
        }
    }
}

fn default_currency() -> String {
    "VND".to_string()
}

fn default_true() -> bool {
    true
}

// ── News ─────────────────────────────────────────────────────────

/// `POST /news`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    #[validate(length(max = 500))]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl From<CreateNewsRequest> for NewArticle {
    fn from(req: CreateNewsRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            summary: req.summary,
            content: req.content,
            cover_url: req.cover_url,
            is_published: req.is_published,
        }
    }
}

/// `PUT /news/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    #[validate(length(max = 500))]
    pub cover_url: Option<String>,
    pub is_published: Option<bool>,
}

impl From<UpdateNewsRequest> for UpdateNews {
    fn from(req: UpdateNewsRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            summary: req.summary,
            content: req.content,
            cover_url: req.cover_url,
            is_published: req.is_published,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────

/// `POST /users`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub password: String,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

impl CreateUserRequest {
    pub fn into_new(self) -> AppResult<NewUser> {
        Ok(NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            role: self
                .role
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or(UserRole::User),
        })
    }
}

/// `PUT /users/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_changes(self) -> AppResult<UserChanges> {
        Ok(UserChanges {
            email: self.email,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            role: self.role.as_deref().map(str::parse).transpose()?,
            is_active: self.is_active,
            password: self.password,
        })
    }
}

// ── Media ────────────────────────────────────────────────────────

/// `DELETE /media`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMediaRequest {
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_core::error::ErrorKind;
    use cinedesk_entity::member::MemberKind;

    #[test]
    fn test_notification_request_flattens_content() {
        let req: CreateNotificationRequest = serde_json::from_value(serde_json::json!({
            "title": "New episode",
            "message": "Episode 5 is out",
            "type": "episode",
            "episodeId": "00000000-0000-0000-0000-000000000001",
            "sendingType": "film-subscribers",
            "sendingFilmId": "00000000-0000-0000-0000-000000000002"
        }))
        .unwrap();
        let input = NotificationInput::from(req);
        assert_eq!(input.content.notification_type.as_deref(), Some("episode"));
        assert_eq!(input.sending_type.as_deref(), Some("film-subscribers"));
        assert_eq!(
            input.sending_film_id.as_deref(),
            Some("00000000-0000-0000-0000-000000000002")
        );
        assert!(input.content.episode_id.is_some());
    }

    #[test]
    fn test_notification_missing_title_deserializes() {
        let req: CreateNotificationRequest =
            serde_json::from_value(serde_json::json!({"message": "hi"})).unwrap();
        assert!(req.content.title.is_empty());
    }

    #[test]
    fn test_member_request_requires_user() {
        let req = CreateMemberRequest {
            user_id: None,
            kind: "actor".into(),
            stage_name: "Lan".into(),
            bio: None,
            avatar_url: None,
        };
        let err = req.into_create().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "userId is required");
    }

    #[test]
    fn test_member_request_parses_kind() {
        let req = CreateMemberRequest {
            user_id: Some(Uuid::new_v4().to_string()),
            kind: "translator".into(),
            stage_name: "Lan".into(),
            bio: None,
            avatar_url: None,
        };
        assert_eq!(req.into_create().unwrap().kind, MemberKind::Translator);
    }

    #[test]
    fn test_plan_defaults() {
        let req: CreatePlanRequest = serde_json::from_value(serde_json::json!({
            "name": "Premium",
            "priceCents": 99000,
            "durationDays": 30
        }))
        .unwrap();
        assert_eq!(req.currency, "VND");
        assert!(req.is_active);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_user_request_defaults_to_user_role() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "username": "viewer1",
            "password": "secret123"
        }))
        .unwrap();
        assert_eq!(req.into_new().unwrap().role, UserRole::User);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let req = UpdateUserRequest {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
