use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roster_core::{Login, PageList, UserDraft, UserEntity, UserId};

use crate::app::errors::ValidationErrors;
use crate::app::negotiate::{EncodeError, Representation};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/users`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CreateUserRequest {
    pub fn into_draft(self) -> Result<UserDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let login = match self.login {
            None => {
                errors.add("Login", "Login is required");
                String::new()
            }
            Some(raw) => match Login::parse(raw) {
                Ok(login) => login.into_inner(),
                Err(_) => {
                    errors.add("Login", "Login may contain only letters and digits");
                    String::new()
                }
            },
        };

        errors.into_result(UserDraft {
            login,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            ..UserDraft::default()
        })
    }
}

/// Body of `PUT /api/users/{id}`. Any `id` in the body is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullUpdateUserRequest {
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub games_played: Option<u32>,
    pub current_game_id: Option<Uuid>,
}

impl FullUpdateUserRequest {
    /// Presence check only; the login character rule applies to creation.
    pub fn into_entity(self, id: UserId) -> Result<UserEntity, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let login = required(&mut errors, "Login", self.login);
        let first_name = required(&mut errors, "FirstName", self.first_name);
        let last_name = required(&mut errors, "LastName", self.last_name);

        errors.into_result(UserEntity::from_draft(
            id,
            UserDraft {
                login,
                first_name,
                last_name,
                games_played: self.games_played.unwrap_or_default(),
                current_game_id: self.current_game_id,
            },
        ))
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.add(field, format!("{field} is required"));
            String::new()
        }
    }
}

/// Query of `GET /api/users`. Values are clamped by the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Read view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub login: String,
    pub full_name: String,
    pub games_played: u32,
    pub current_game_id: Option<Uuid>,
}

impl From<&UserEntity> for UserDto {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            full_name: user.full_name(),
            games_played: user.games_played,
            current_game_id: user.current_game_id,
        }
    }
}

impl Representation for UserDto {
    const XML_ROOT: &'static str = "user";
}

impl Representation for Vec<UserDto> {
    const XML_ROOT: &'static str = "users";

    fn to_xml(&self) -> Result<String, EncodeError> {
        #[derive(Serialize)]
        struct Items<'a> {
            user: &'a [UserDto],
        }

        quick_xml::se::to_string_with_root(Self::XML_ROOT, &Items { user: self })
            .map_err(|e| EncodeError::Xml(e.to_string()))
    }
}

/// Body of 201 responses: the id alone.
impl Representation for UserId {
    const XML_ROOT: &'static str = "id";
}

/// JSON payload of the `X-Pagination` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHeader {
    pub previous_page_link: Option<String>,
    pub next_page_link: Option<String>,
    pub total_count: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u64,
}

impl PaginationHeader {
    /// `link` builds the URI of a page number at the same page size.
    pub fn for_page<T>(page: &PageList<T>, link: impl Fn(u32) -> String) -> Self {
        Self {
            previous_page_link: page.has_previous().then(|| link(page.current_page - 1)),
            next_page_link: page.has_next().then(|| link(page.current_page + 1)),
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::negotiate::ResponseFormat;

    #[test]
    fn create_accepts_alphanumeric_login() {
        let draft = CreateUserRequest {
            login: Some("ab1".into()),
            first_name: Some("Ann".into()),
            last_name: None,
        }
        .into_draft()
        .unwrap();

        assert_eq!(draft.login, "ab1");
        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.last_name, "");
        assert_eq!(draft.games_played, 0);
    }

    #[test]
    fn create_rejects_bad_or_missing_login() {
        for login in [Some("ab!".to_string()), Some(String::new()), None] {
            let errors = CreateUserRequest { login, ..Default::default() }
                .into_draft()
                .unwrap_err();
            assert!(errors.contains("Login"));
        }
    }

    #[test]
    fn update_reports_every_missing_field() {
        let errors = FullUpdateUserRequest::default()
            .into_entity(UserId::new())
            .unwrap_err();
        assert!(errors.contains("Login"));
        assert!(errors.contains("FirstName"));
        assert!(errors.contains("LastName"));
    }

    #[test]
    fn update_does_not_apply_login_charset_rule() {
        let id = UserId::new();
        let entity = FullUpdateUserRequest {
            login: Some("not.alnum".into()),
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            games_played: Some(4),
            current_game_id: None,
        }
        .into_entity(id)
        .unwrap();

        assert_eq!(entity.id, id);
        assert_eq!(entity.login, "not.alnum");
        assert_eq!(entity.games_played, 4);
    }

    #[test]
    fn update_body_id_is_ignored() {
        let body: FullUpdateUserRequest = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "login": "x",
            "firstName": "y",
            "lastName": "z"
        }))
        .unwrap();
        let id = UserId::new();
        assert_eq!(body.into_entity(id).unwrap().id, id);
    }

    #[test]
    fn read_view_is_camel_case_with_full_name() {
        let user = UserEntity::from_draft(
            UserId::new(),
            UserDraft {
                login: "jd".into(),
                first_name: "John".into(),
                last_name: "Doe".into(),
                ..UserDraft::default()
            },
        );
        let json = serde_json::to_value(UserDto::from(&user)).unwrap();

        assert_eq!(json["fullName"], "Doe John");
        assert_eq!(json["gamesPlayed"], 0);
        assert_eq!(json["id"], user.id.to_string());
        assert!(json["currentGameId"].is_null());
    }

    #[test]
    fn user_list_xml_wraps_items() {
        let user = UserEntity::from_draft(
            UserId::new(),
            UserDraft { login: "jd".into(), ..UserDraft::default() },
        );
        let xml = ResponseFormat::Xml.encode(&vec![UserDto::from(&user)]).unwrap();
        assert!(xml.starts_with("<users><user>"));
        assert!(xml.contains("<login>jd</login>"));
    }

    #[test]
    fn pagination_header_links_only_existing_neighbours() {
        let source: Vec<u8> = (0..25).collect();
        let link = |n: u32| format!("/p/{n}");

        let first = PaginationHeader::for_page(&PageList::slice(source.iter(), 25, 1, 10), link);
        assert_eq!(first.previous_page_link, None);
        assert_eq!(first.next_page_link.as_deref(), Some("/p/2"));

        let last = PaginationHeader::for_page(&PageList::slice(source.iter(), 25, 3, 10), link);
        assert_eq!(last.previous_page_link.as_deref(), Some("/p/2"));
        assert_eq!(last.next_page_link, None);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.current_page, 3);

        let json = serde_json::to_value(&last).unwrap();
        assert!(json["nextPageLink"].is_null());
        assert_eq!(json["totalCount"], 25);
    }
}
