use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::member::MEMBER_EXISTS;
use cinedesk_database::stores::MemberStore;
use cinedesk_entity::film::{Film, FilmStatus, FilmType};
use cinedesk_entity::member::{CreateMember, Member, MemberFilter, MemberRemoval, UpdateMember};

use super::paginate;

#[derive(Debug, Default)]
struct State {
    users: HashSet<Uuid>,
    members: Vec<Member>,
    films: Vec<Film>,
}

/// Member store holding users, members and films in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().await.users.insert(id);
        id
    }

    /// Insert a film crediting the given members and return its id.
    pub async fn add_film(&self, actors: Vec<Uuid>, translators: Vec<Uuid>) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.state.lock().await.films.push(Film {
            id,
            title: "Test film".into(),
            slug: format!("test-film-{}", id.simple()),
            description: None,
            film_type: FilmType::Movie,
            status: FilmStatus::Draft,
            release_year: None,
            duration_minutes: None,
            poster_url: None,
            cover_url: None,
            video_url: None,
            trailer_url: None,
            genre_ids: Vec::new(),
            category_ids: Vec::new(),
            actors,
            translators,
            view_count: 0,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub async fn film(&self, id: Uuid) -> Option<Film> {
        self.state
            .lock()
            .await
            .films
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    pub async fn member_count(&self) -> usize {
        self.state.lock().await.members.len()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.state.lock().await.users.contains(&user_id))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Member>> {
        let state = self.state.lock().await;
        Ok(state.members.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Member>> {
        let state = self.state.lock().await;
        Ok(state.members.iter().find(|m| m.user_id == user_id).cloned())
    }

    async fn list(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Member>> {
        let state = self.state.lock().await;
        let mut matching: Vec<Member> = state
            .members
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.stage_name.cmp(&b.stage_name));
        Ok(paginate(&matching, page))
    }

    async fn create(&self, data: &CreateMember) -> AppResult<Member> {
        let mut state = self.state.lock().await;
        if state.members.iter().any(|m| m.user_id == data.user_id) {
            return Err(AppError::conflict(MEMBER_EXISTS));
        }
        let now = Utc::now();
        let member = Member {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            kind: data.kind,
            stage_name: data.stage_name.clone(),
            bio: data.bio.clone(),
            avatar_url: data.avatar_url.clone(),
            created_at: now,
            updated_at: now,
        };
        state.members.push(member.clone());
        Ok(member)
    }

    async fn update(&self, id: Uuid, data: &UpdateMember) -> AppResult<Option<Member>> {
        let mut state = self.state.lock().await;
        Ok(state.members.iter_mut().find(|m| m.id == id).map(|m| {
            if let Some(kind) = data.kind {
                m.kind = kind;
            }
            if let Some(name) = &data.stage_name {
                m.stage_name = name.clone();
            }
            if data.bio.is_some() {
                m.bio = data.bio.clone();
            }
            if data.avatar_url.is_some() {
                m.avatar_url = data.avatar_url.clone();
            }
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete_and_detach(&self, id: Uuid) -> AppResult<Option<MemberRemoval>> {
        let mut state = self.state.lock().await;
        if !state.members.iter().any(|m| m.id == id) {
            return Ok(None);
        }
        let mut films_detached = 0;
        for film in state.films.iter_mut().filter(|f| f.credits(id)) {
            film.actors.retain(|m| *m != id);
            film.translators.retain(|m| *m != id);
            films_detached += 1;
        }
        state.members.retain(|m| m.id != id);
        Ok(Some(MemberRemoval { films_detached }))
    }
}
