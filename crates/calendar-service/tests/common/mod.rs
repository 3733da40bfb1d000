//! In-memory repository fakes for service tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calendar_common::{CalendarConfig, JwtService};
use calendar_core::entities::{Community, Country, Event, EventImage, EventType, Profile, User};
use calendar_core::lifecycle::filter_attendees;
use calendar_core::traits::{
    CommunityRepository, CountryRepository, EventImageRepository, EventRepository,
    EventTypeRepository, FeedQuery, NewUser, ProfileRepository, RepoResult, UserRepository,
};
use calendar_core::{
    CommunityId, CountryId, DomainError, EventDraft, EventId, EventTypeId, FeedEvent, ImageId,
    UserId,
};
use calendar_service::ServiceContext;
use calendar_storage::InMemoryMediaStore;
use chrono::{DateTime, Utc};

#[derive(Default)]
struct Store {
    next_id: i64,
    users: Vec<(User, String)>,
    events: Vec<Event>,
    participants: HashMap<EventId, Vec<UserId>>,
    attendees: HashMap<EventId, Vec<UserId>>,
    images: Vec<EventImage>,
    countries: Vec<Country>,
    communities: Vec<Community>,
    event_types: Vec<EventType>,
    profiles: HashMap<UserId, Profile>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn active(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id && !e.is_deleted)
    }

    fn active_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id && !e.is_deleted)
    }
}

/// One fake backing every repository trait; clones share state
#[derive(Clone, Default)]
pub struct FakeDb {
    store: Arc<Mutex<Store>>,
}

impl FakeDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str, is_admin: bool) -> User {
        let mut store = self.store.lock().unwrap();
        let id = UserId::new(store.next_id());
        let mut user = User::new(id, username.to_string(), format!("{username}@example.com"));
        user.is_admin = is_admin;
        store.users.push((user.clone(), String::new()));
        user
    }

    pub fn add_country(&self, name: &str) -> Country {
        let mut store = self.store.lock().unwrap();
        let country = Country {
            id: CountryId::new(store.next_id()),
            name: name.to_string(),
        };
        store.countries.push(country.clone());
        country
    }

    pub fn add_community(&self, name: &str) -> Community {
        let mut store = self.store.lock().unwrap();
        let community = Community {
            id: CommunityId::new(store.next_id()),
            name: name.to_string(),
            country_id: None,
        };
        store.communities.push(community.clone());
        community
    }

    pub fn add_event_type(&self, name: &str) -> EventType {
        let mut store = self.store.lock().unwrap();
        let event_type = EventType {
            id: EventTypeId::new(store.next_id()),
            name: name.to_string(),
            description: String::new(),
        };
        store.event_types.push(event_type.clone());
        event_type
    }

    /// Insert an image record without a stored file
    pub fn add_image(
        &self,
        event_id: EventId,
        path: &str,
        uploaded_by: Option<UserId>,
    ) -> EventImage {
        let mut store = self.store.lock().unwrap();
        let image = EventImage {
            id: ImageId::new(store.next_id()),
            event_id,
            file_path: path.to_string(),
            original_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            uploaded_by,
            created_at: Utc::now(),
        };
        store.images.push(image.clone());
        image
    }

    /// Event row including soft-deleted ones
    pub fn raw_event(&self, id: EventId) -> Option<Event> {
        let store = self.store.lock().unwrap();
        store.events.iter().find(|e| e.id == id).cloned()
    }

    pub fn image_count(&self) -> usize {
        self.store.lock().unwrap().images.len()
    }

    pub fn participants(&self, id: EventId) -> Vec<UserId> {
        let store = self.store.lock().unwrap();
        store.participants.get(&id).cloned().unwrap_or_default()
    }

    pub fn attendees(&self, id: EventId) -> Vec<UserId> {
        let store = self.store.lock().unwrap();
        store.attendees.get(&id).cloned().unwrap_or_default()
    }
}

fn apply_draft(event: &mut Event, draft: &EventDraft) {
    event.title = draft.title.trim().to_string();
    event.description = draft.description.clone();
    event.location = draft.location.trim().to_string();
    event.start_time = draft.start_time;
    event.end_time = draft.end_time;
    event.country_id = draft.country_id;
    event.event_type_id = draft.event_type_id;
    event.community_ids = draft.community_ids.clone();
    event.organizer_ids = draft.organizer_ids.clone();
    event.recurrence = draft.recurrence;
    event.updated_at = Utc::now();
}

#[async_trait]
impl UserRepository for FakeDb {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        let store = self.store.lock().unwrap();
        let mut users: Vec<User> = store
            .users
            .iter()
            .filter(|(u, _)| ids.contains(&u.id))
            .map(|(u, _)| u.clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<User>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .filter(|(u, _)| u.email.eq_ignore_ascii_case(email))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .any(|(u, _)| u.username.eq_ignore_ascii_case(username)))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut store = self.store.lock().unwrap();
        let mut created = User::new(
            UserId::new(store.next_id()),
            user.username.clone(),
            user.email.clone(),
        );
        created.first_name = user.first_name.clone();
        created.last_name = user.last_name.clone();
        store.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|(u, hash)| u.id == id && !hash.is_empty())
            .map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl EventRepository for FakeDb {
    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        Ok(self.store.lock().unwrap().active(id).cloned())
    }

    async fn feed(&self, query: &FeedQuery) -> RepoResult<Vec<FeedEvent>> {
        let store = self.store.lock().unwrap();
        let mut out = Vec::new();

        for event in store.events.iter().filter(|e| !e.is_deleted) {
            if query.country_id.is_some_and(|c| event.country_id != Some(c)) {
                continue;
            }
            if let Some(ids) = &query.community_ids {
                // one row per matching community, like a join would produce
                let hits = event.community_ids.iter().filter(|c| ids.contains(c)).count();
                if hits == 0 {
                    continue;
                }
                for _ in 1..hits {
                    out.push(feed_row(&store, event, query.viewer));
                }
            }
            out.push(feed_row(&store, event, query.viewer));
        }

        Ok(out)
    }

    async fn create(&self, owner_id: UserId, draft: &EventDraft) -> RepoResult<Event> {
        let mut store = self.store.lock().unwrap();
        let id = EventId::new(store.next_id());
        let mut event = Event::new(
            id,
            Some(owner_id),
            String::new(),
            draft.start_time,
            draft.end_time,
        );
        apply_draft(&mut event, draft);
        store.events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: EventId, draft: &EventDraft) -> RepoResult<Event> {
        let mut store = self.store.lock().unwrap();
        let event = store.active_mut(id).ok_or(DomainError::EventNotFound(id))?;
        apply_draft(event, draft);
        Ok(event.clone())
    }

    async fn soft_delete(
        &self,
        id: EventId,
        deleted_by: UserId,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let event = store.active_mut(id).ok_or(DomainError::EventNotFound(id))?;
        event.soft_delete(deleted_by, at);
        Ok(())
    }

    async fn add_participant(&self, id: EventId, user_id: UserId) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let list = store.participants.entry(id).or_default();
        if !list.contains(&user_id) {
            list.push(user_id);
        }
        Ok(())
    }

    async fn remove_participant(&self, id: EventId, user_id: UserId) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(list) = store.participants.get_mut(&id) {
            list.retain(|u| *u != user_id);
        }
        Ok(())
    }

    async fn is_participant(&self, id: EventId, user_id: UserId) -> RepoResult<bool> {
        Ok(self.participants(id).contains(&user_id))
    }

    async fn participant_count(&self, id: EventId) -> RepoResult<i64> {
        Ok(self.participants(id).len() as i64)
    }

    async fn participant_ids(&self, id: EventId) -> RepoResult<Vec<UserId>> {
        Ok(self.participants(id))
    }

    async fn attendee_ids(&self, id: EventId) -> RepoResult<Vec<UserId>> {
        Ok(self.attendees(id))
    }

    async fn set_attendees(&self, id: EventId, user_ids: &[UserId]) -> RepoResult<Vec<UserId>> {
        let mut stored = filter_attendees(user_ids, &self.participants(id));
        stored.sort_unstable();
        let mut store = self.store.lock().unwrap();
        store.attendees.insert(id, stored.clone());
        Ok(stored)
    }

    async fn hosted_upcoming(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<Vec<Event>> {
        let store = self.store.lock().unwrap();
        Ok(select(&store, |e| e.is_owner(user_id) && e.end_time >= now, false))
    }

    async fn participating_upcoming(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Event>> {
        let store = self.store.lock().unwrap();
        let joined = store.participants.clone();
        Ok(select(
            &store,
            |e| e.end_time >= now && joined.get(&e.id).is_some_and(|p| p.contains(&user_id)),
            false,
        ))
    }

    async fn participated_past(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Event>> {
        let store = self.store.lock().unwrap();
        let joined = store.participants.clone();
        Ok(select(
            &store,
            |e| e.end_time < now && joined.get(&e.id).is_some_and(|p| p.contains(&user_id)),
            true,
        ))
    }

    async fn organized_past(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<Vec<Event>> {
        let store = self.store.lock().unwrap();
        Ok(select(&store, |e| e.end_time < now && e.is_organizer(user_id), true))
    }
}

fn feed_row(store: &Store, event: &Event, viewer: Option<UserId>) -> FeedEvent {
    let participants = store.participants.get(&event.id).cloned().unwrap_or_default();
    FeedEvent {
        id: event.id,
        title: event.title.clone(),
        description: event.description.clone(),
        location: event.location.clone(),
        start_time: event.start_time,
        end_time: event.end_time,
        recurrence: event.recurrence,
        event_type: event.event_type_id.and_then(|id| {
            store
                .event_types
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
        }),
        participant_count: participants.len() as i64,
        joined: viewer.is_some_and(|v| participants.contains(&v)),
    }
}

fn select(store: &Store, pred: impl Fn(&Event) -> bool, newest_first: bool) -> Vec<Event> {
    let mut events: Vec<Event> = store
        .events
        .iter()
        .filter(|e| !e.is_deleted && pred(e))
        .cloned()
        .collect();
    events.sort_by_key(|e| e.start_time);
    if newest_first {
        events.reverse();
    }
    events
}

#[async_trait]
impl EventImageRepository for FakeDb {
    async fn find_by_event(&self, event_id: EventId) -> RepoResult<Vec<EventImage>> {
        let store = self.store.lock().unwrap();
        let mut images: Vec<EventImage> = store
            .images
            .iter()
            .filter(|i| i.event_id == event_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(images)
    }

    async fn find_in_event(
        &self,
        event_id: EventId,
        ids: &[ImageId],
    ) -> RepoResult<Vec<EventImage>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .images
            .iter()
            .filter(|i| i.event_id == event_id && ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        event_id: EventId,
        file_path: &str,
        original_name: &str,
        uploaded_by: Option<UserId>,
    ) -> RepoResult<EventImage> {
        let mut store = self.store.lock().unwrap();
        let image = EventImage {
            id: ImageId::new(store.next_id()),
            event_id,
            file_path: file_path.to_string(),
            original_name: original_name.to_string(),
            uploaded_by,
            created_at: Utc::now(),
        };
        store.images.push(image.clone());
        Ok(image)
    }

    async fn delete(&self, id: ImageId) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        store.images.retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl CountryRepository for FakeDb {
    async fn list(&self) -> RepoResult<Vec<Country>> {
        let mut countries = self.store.lock().unwrap().countries.clone();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn find_by_id(&self, id: CountryId) -> RepoResult<Option<Country>> {
        let store = self.store.lock().unwrap();
        Ok(store.countries.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, name: &str) -> RepoResult<Country> {
        if self.store.lock().unwrap().countries.iter().any(|c| c.name == name) {
            return Err(DomainError::NameAlreadyExists(name.to_string()));
        }
        Ok(self.add_country(name))
    }
}

#[async_trait]
impl CommunityRepository for FakeDb {
    async fn list(&self) -> RepoResult<Vec<Community>> {
        let mut communities = self.store.lock().unwrap().communities.clone();
        communities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(communities)
    }

    async fn find_by_ids(&self, ids: &[CommunityId]) -> RepoResult<Vec<Community>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .communities
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Community>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .communities
            .iter()
            .filter(|c| names.contains(&c.name))
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str, country_id: Option<CountryId>) -> RepoResult<Community> {
        if self.store.lock().unwrap().communities.iter().any(|c| c.name == name) {
            return Err(DomainError::NameAlreadyExists(name.to_string()));
        }
        let mut store = self.store.lock().unwrap();
        let community = Community {
            id: CommunityId::new(store.next_id()),
            name: name.to_string(),
            country_id,
        };
        store.communities.push(community.clone());
        Ok(community)
    }
}

#[async_trait]
impl EventTypeRepository for FakeDb {
    async fn list(&self) -> RepoResult<Vec<EventType>> {
        let mut types = self.store.lock().unwrap().event_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn find_by_id(&self, id: EventTypeId) -> RepoResult<Option<EventType>> {
        let store = self.store.lock().unwrap();
        Ok(store.event_types.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, name: &str, description: &str) -> RepoResult<EventType> {
        if self.store.lock().unwrap().event_types.iter().any(|t| t.name == name) {
            return Err(DomainError::NameAlreadyExists(name.to_string()));
        }
        let mut event_type = self.add_event_type(name);
        event_type.description = description.to_string();
        let mut store = self.store.lock().unwrap();
        if let Some(stored) = store.event_types.iter_mut().find(|t| t.id == event_type.id) {
            stored.description = event_type.description.clone();
        }
        Ok(event_type)
    }
}

#[async_trait]
impl ProfileRepository for FakeDb {
    async fn get_or_create(&self, user_id: UserId) -> RepoResult<Profile> {
        let mut store = self.store.lock().unwrap();
        Ok(store
            .profiles
            .entry(user_id)
            .or_insert_with(|| Profile::empty(user_id))
            .clone())
    }

    async fn update(&self, profile: &Profile) -> RepoResult<Profile> {
        let mut store = self.store.lock().unwrap();
        store.profiles.insert(profile.user_id, profile.clone());
        Ok(profile.clone())
    }
}

/// Service context over the fakes
pub struct TestEnv {
    pub ctx: ServiceContext,
    pub db: FakeDb,
    pub media: InMemoryMediaStore,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_upload_limit(1024)
    }

    pub fn with_upload_limit(max_upload_bytes: usize) -> Self {
        let db = FakeDb::new();
        let media = InMemoryMediaStore::new();
        let ctx = ServiceContext::builder()
            .user_repo(Arc::new(db.clone()))
            .event_repo(Arc::new(db.clone()))
            .image_repo(Arc::new(db.clone()))
            .country_repo(Arc::new(db.clone()))
            .community_repo(Arc::new(db.clone()))
            .event_type_repo(Arc::new(db.clone()))
            .profile_repo(Arc::new(db.clone()))
            .media_store(Arc::new(media.clone()))
            .jwt_service(Arc::new(JwtService::new("test-secret-key", 900, 604_800)))
            .calendar(CalendarConfig::default())
            .max_upload_bytes(max_upload_bytes)
            .build()
            .expect("context builds");

        Self { ctx, db, media }
    }

    /// The six default region sectors
    pub fn seed_sectors(&self) -> Vec<Community> {
        (1..=6).map(|n| self.db.add_community(&format!("Sector {n}"))).collect()
    }
}
