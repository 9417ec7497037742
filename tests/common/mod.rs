#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use notes_portal::{
    AppConfig, AppState, InMemoryRepository,
    auth::Claims,
    config::Env,
    models::{Note, Principal},
    routes::registry::RouteRegistry,
};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
pub const AUTHOR_ID: Uuid = Uuid::from_u128(1);
pub const READER_ID: Uuid = Uuid::from_u128(2);
pub const NOTE_SLUG: &str = "note-1";

pub fn author() -> Principal {
    Principal {
        id: AUTHOR_ID,
        username: "author".to_string(),
    }
}

pub fn reader() -> Principal {
    Principal {
        id: READER_ID,
        username: "reader".to_string(),
    }
}

pub fn note_by_author() -> Note {
    Note {
        id: Uuid::from_u128(100),
        slug: NOTE_SLUG.to_string(),
        title: "Title".to_string(),
        text: "Text".to_string(),
        author_id: AUTHOR_ID,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

/// Store with two users and one note owned by the author.
pub fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    repo.insert_user(author()).unwrap();
    repo.insert_user(reader()).unwrap();
    repo.insert_note(note_by_author()).unwrap();
    repo
}

pub fn app_state(env: Env, repo: InMemoryRepository) -> AppState {
    let mut config = AppConfig::default();
    config.env = env;
    config.jwt_secret = TEST_JWT_SECRET.to_string();

    AppState {
        repo: Arc::new(repo),
        registry: Arc::new(RouteRegistry::notes().unwrap()),
        config,
    }
}

/// Signs a session token for `user_id` that expires `exp_offset` seconds from now.
pub fn create_token(user_id: Uuid, exp_offset: u64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

/// Same as `create_token`, but already expired well past the default leeway.
pub fn create_expired_token(user_id: Uuid) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = Claims {
        sub: user_id,
        iat: (now - 7200) as usize,
        exp: (now - 3600) as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}
