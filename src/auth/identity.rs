//! Proxy-injected identity

use axum::http::HeaderMap;

/// Header carrying the authenticated user id
pub const HEADER_USER_ID: &str = "x-auth-user-id";
/// Header carrying the display name
pub const HEADER_USER_NAME: &str = "x-auth-user-name";
/// Header carrying the asserted role
pub const HEADER_ROLE: &str = "x-auth-role";

/// Roles the proxy may assert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

/// Authenticated user attached to the request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Build from proxy headers, `None` when the identity is absent or malformed
    ///
    /// Id and role are mandatory; a missing display name falls back to the id.
    pub fn from_headers(headers: &HeaderMap) -> Option<CurrentUser> {
        let id = headers.get(HEADER_USER_ID)?.to_str().ok()?.trim();
        if id.is_empty() {
            return None;
        }
        let role = Role::parse(headers.get(HEADER_ROLE)?.to_str().ok()?)?;
        let name = headers
            .get(HEADER_USER_NAME)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(id)
            .to_string();

        Some(CurrentUser {
            id: id.to_string(),
            name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(id: &str, name: &str, role: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(HEADER_USER_ID, HeaderValue::from_str(id).unwrap());
        map.insert(HEADER_USER_NAME, HeaderValue::from_str(name).unwrap());
        map.insert(HEADER_ROLE, HeaderValue::from_str(role).unwrap());
        map
    }

    #[test]
    fn test_from_headers_builds_user() {
        let user = CurrentUser::from_headers(&headers("u-1", "Petra", "admin")).unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.name, "Petra");
        assert!(user.is_admin());
    }

    #[test]
    fn test_from_headers_missing_id_is_none() {
        let mut map = headers("u-1", "Petra", "editor");
        map.remove(HEADER_USER_ID);
        assert!(CurrentUser::from_headers(&map).is_none());
    }

    #[test]
    fn test_from_headers_unknown_role_is_none() {
        assert!(CurrentUser::from_headers(&headers("u-1", "Petra", "root")).is_none());
    }

    #[test]
    fn test_from_headers_name_falls_back_to_id() {
        let mut map = headers("u-1", "ignored", "editor");
        map.remove(HEADER_USER_NAME);
        let user = CurrentUser::from_headers(&map).unwrap();
        assert_eq!(user.name, "u-1");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" editor "), Some(Role::Editor));
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse(""), None);
    }
}
