//! The user record and its field rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::id::UserId;

/// A login made only of letters and digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    /// Validate a raw login.
    ///
    /// Empty strings are rejected, as is any character that is neither a
    /// letter nor a digit (Unicode-aware, so `"Иван7"` passes).
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::validation("login must not be empty"));
        }
        if !raw.chars().all(char::is_alphanumeric) {
            return Err(DomainError::validation(
                "login may contain only letters and digits",
            ));
        }
        Ok(Self(raw))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Login {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Login> for String {
    fn from(value: Login) -> Self {
        value.0
    }
}

/// User fields without an identity; the repository assigns one on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub games_played: u32,
    pub current_game_id: Option<Uuid>,
}

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    pub id: UserId,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub games_played: u32,
    pub current_game_id: Option<Uuid>,
}

impl UserEntity {
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            login: draft.login,
            first_name: draft.first_name,
            last_name: draft.last_name,
            games_played: draft.games_played,
            current_game_id: draft.current_game_id,
        }
    }

    /// `"<last> <first>"`, kept verbatim even when one half is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    /// Overwrite every mutable field with the ones from `other`; `id` is kept.
    pub fn overwrite_from(&mut self, other: UserEntity) {
        self.login = other.login;
        self.first_name = other.first_name;
        self.last_name = other.last_name;
        self.games_played = other.games_played;
        self.current_game_id = other.current_game_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_letters_and_digits() {
        assert_eq!(Login::parse("ab1").unwrap().into_inner(), "ab1");
        assert!(Login::parse("Иван7").is_ok());
    }

    #[test]
    fn login_rejects_punctuation_whitespace_and_empty() {
        for bad in ["ab!", "a b", "john.doe", ""] {
            assert!(
                matches!(Login::parse(bad), Err(DomainError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn login_deserialization_runs_validation() {
        let ok: Login = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ok.into_inner(), "abc123");
        assert!(serde_json::from_str::<Login>("\"abc!\"").is_err());
    }

    #[test]
    fn full_name_is_last_then_first() {
        let user = UserEntity::from_draft(
            UserId::new(),
            UserDraft {
                login: "jdoe".into(),
                first_name: "John".into(),
                last_name: "Doe".into(),
                ..UserDraft::default()
            },
        );
        assert_eq!(user.full_name(), "Doe John");
    }

    #[test]
    fn overwrite_keeps_identity() {
        let id = UserId::new();
        let mut stored = UserEntity::from_draft(id, UserDraft { login: "old".into(), ..UserDraft::default() });
        let incoming = UserEntity::from_draft(
            UserId::new(),
            UserDraft {
                login: "new".into(),
                first_name: "A".into(),
                last_name: "B".into(),
                games_played: 3,
                current_game_id: Some(Uuid::nil()),
            },
        );

        stored.overwrite_from(incoming);

        assert_eq!(stored.id, id);
        assert_eq!(stored.login, "new");
        assert_eq!(stored.games_played, 3);
        assert_eq!(stored.current_game_id, Some(Uuid::nil()));
    }
}
