//! In-memory port implementations for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Ad, NewAd, NewUser, User};
use crate::error::RepoError;
use crate::ports::{
    AdRepository, AuthError, BaseRepository, PasswordService, TokenClaims, TokenKind,
    TokenService, UserRepository,
};
use crate::query::{AdField, AdFilter};

pub fn sample_user(id: i32) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        password_hash: "hash".to_string(),
        phone: None,
        name: None,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct InMemoryAdRepository {
    ads: Mutex<Vec<Ad>>,
    broken: bool,
}

impl InMemoryAdRepository {
    pub fn with_ads(ads: Vec<Ad>) -> Self {
        Self {
            ads: Mutex::new(ads),
            broken: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            ads: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub async fn all(&self) -> Vec<Ad> {
        self.ads.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.broken {
            return Err(RepoError::Connection("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Ad, NewAd, i32> for InMemoryAdRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Ad>, RepoError> {
        self.check()?;
        Ok(self.ads.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, draft: NewAd) -> Result<Ad, RepoError> {
        self.check()?;
        let mut ads = self.ads.lock().unwrap();
        let id = ads.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let ad = Ad {
            id,
            user_id: draft.user_id,
            status: draft.status,
            pet_type: draft.pet_type,
            breed: draft.breed,
            color: draft.color,
            size: draft.size,
            danger: draft.danger,
            features: draft.features,
            nickname: draft.nickname,
            location: draft.location,
            geo_location: draft.geo_location,
            time: draft.time,
            created_at: draft.created_at,
            contact_name: draft.contact_name,
            contact_phone: draft.contact_phone,
            contact_email: draft.contact_email,
            extras: draft.extras,
        };
        ads.push(ad.clone());
        Ok(ad)
    }
}

#[async_trait]
impl AdRepository for InMemoryAdRepository {
    async fn find_recent(&self, filter: &AdFilter, limit: u64) -> Result<Vec<Ad>, RepoError> {
        self.check()?;
        let mut ads: Vec<Ad> = self
            .ads
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches_filter(filter, a))
            .cloned()
            .collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        ads.truncate(limit as usize);
        Ok(ads)
    }
}

/// The conjunction a SQL store applies for `filter`.
fn matches_filter(filter: &AdFilter, ad: &Ad) -> bool {
    filter.predicates().into_iter().all(|(field, expected)| {
        let actual = match field {
            AdField::Status => Some(ad.status.as_str()),
            AdField::Type => Some(ad.pet_type.as_str()),
            AdField::Breed => ad.breed.as_deref(),
            AdField::Size => ad.size.as_deref(),
            AdField::Danger => ad.danger.as_deref(),
        };
        actual == Some(expected)
    })
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl BaseRepository<User, NewUser, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, draft: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == draft.email) {
            return Err(RepoError::Constraint("users.email".to_string()));
        }
        let user = User {
            id: users.len() as i32 + 1,
            email: draft.email,
            password_hash: draft.password_hash,
            phone: draft.phone,
            name: draft.name,
            created_at: draft.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }
}

/// Reversible "hash" so tests stay fast.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}

/// Tokens of the form `<kind>:<user id>`.
pub struct StubTokens;

impl TokenService for StubTokens {
    fn generate_token(&self, user_id: i32, _email: &str, kind: TokenKind) -> Result<String, AuthError> {
        Ok(format!("{kind}:{user_id}"))
    }

    fn validate_token(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AuthError> {
        let (kind, id) = token
            .split_once(':')
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
        if kind != expected.as_str() {
            return Err(AuthError::WrongTokenKind { expected });
        }
        let user_id = id
            .parse()
            .map_err(|_| AuthError::InvalidToken(token.to_string()))?;
        Ok(TokenClaims {
            user_id,
            email: String::new(),
            kind: expected,
            exp: 0,
        })
    }

    fn expiration_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => 300,
            TokenKind::Refresh => 7 * 24 * 3600,
        }
    }
}
