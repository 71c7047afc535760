//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cinedesk_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordPolicy};
use cinedesk_core::config::AppConfig;
use cinedesk_database::DatabasePool;
use cinedesk_database::repositories::{
    CommentRepository, EpisodeRepository, FilmRepository, MemberRepository, NewsRepository,
    NotificationRepository, PlanRepository, ReviewRepository, SubscriberRepository,
    TaxonomyRepository, UserRepository,
};
use cinedesk_database::stores::{MemberStore, NotificationStore};
use cinedesk_entity::taxonomy::{Category, Genre};
use cinedesk_service::{
    AdminUserService, AuthService, CommentService, EpisodeService, FilmService, MediaService,
    MemberService, NewsService, NotificationService, PlanService, ReviewService,
    TaxonomyService,
};
use cinedesk_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    pub db: DatabasePool,
    pub storage: Arc<StorageManager>,

    // ── Auth ─────────────────────────────────────────────────
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<AdminUserService>,
    pub notification_service: Arc<NotificationService>,
    pub member_service: Arc<MemberService>,
    pub film_service: Arc<FilmService>,
    pub episode_service: Arc<EpisodeService>,
    pub genre_service: Arc<TaxonomyService<Genre>>,
    pub category_service: Arc<TaxonomyService<Category>>,
    pub review_service: Arc<ReviewService>,
    pub comment_service: Arc<CommentService>,
    pub plan_service: Arc<PlanService>,
    pub news_service: Arc<NewsService>,
    pub media_service: Arc<MediaService>,
}

impl AppState {
    /// Wire every service against PostgreSQL.
    pub fn new(config: Arc<AppConfig>, db: DatabasePool, storage: Arc<StorageManager>) -> Self {
        let pool = db.pool().clone();
        let notifications: Arc<dyn NotificationStore> =
            Arc::new(NotificationRepository::new(pool.clone()));
        let members: Arc<dyn MemberStore> = Arc::new(MemberRepository::new(pool));
        Self::with_stores(config, db, storage, notifications, members)
    }

    /// Wire the services, taking the transactional stores from the caller.
    pub fn with_stores(
        config: Arc<AppConfig>,
        db: DatabasePool,
        storage: Arc<StorageManager>,
        notification_store: Arc<dyn NotificationStore>,
        member_store: Arc<dyn MemberStore>,
    ) -> Self {
        let pool = db.pool().clone();

        // ── Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let film_repo = Arc::new(FilmRepository::new(pool.clone()));
        let episode_repo = Arc::new(EpisodeRepository::new(pool.clone()));
        let subscriber_repo = Arc::new(SubscriberRepository::new(pool.clone()));
        let genre_repo = Arc::new(TaxonomyRepository::<Genre>::new(pool.clone()));
        let category_repo = Arc::new(TaxonomyRepository::<Category>::new(pool.clone()));
        let review_repo = Arc::new(ReviewRepository::new(pool.clone()));
        let comment_repo = Arc::new(CommentRepository::new(pool.clone()));
        let plan_repo = Arc::new(PlanRepository::new(pool.clone()));
        let news_repo = Arc::new(NewsRepository::new(pool));

        // ── Auth ─────────────────────────────────────────────
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let hasher = Arc::new(PasswordHasher::new());
        let policy = Arc::new(PasswordPolicy::default());

        Self {
            auth_service: Arc::new(AuthService::new(
                user_repo.clone(),
                hasher.clone(),
                jwt_encoder,
                jwt_decoder.clone(),
            )),
            user_service: Arc::new(AdminUserService::new(user_repo, hasher, policy)),
            notification_service: Arc::new(NotificationService::new(
                notification_store,
                &config.notifications,
            )),
            member_service: Arc::new(MemberService::new(member_store)),
            film_service: Arc::new(FilmService::new(film_repo.clone(), subscriber_repo)),
            episode_service: Arc::new(EpisodeService::new(
                episode_repo.clone(),
                film_repo.clone(),
            )),
            genre_service: Arc::new(TaxonomyService::new(genre_repo)),
            category_service: Arc::new(TaxonomyService::new(category_repo)),
            review_service: Arc::new(ReviewService::new(review_repo)),
            comment_service: Arc::new(CommentService::new(comment_repo)),
            plan_service: Arc::new(PlanService::new(plan_repo)),
            news_service: Arc::new(NewsService::new(news_repo)),
            media_service: Arc::new(MediaService::new(
                storage.clone(),
                film_repo,
                episode_repo,
                &config.storage,
            )),
            jwt_decoder,
            storage,
            db,
            config,
        }
    }
}
