use crate::api::ApiClient;
use crate::core::User;
use crate::error::Result;

/// Read operations on the user collection (admin endpoint)
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    /// Create a service over the given API client
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List user accounts, optionally filtered
    ///
    /// The search term matches username, email, and role server-side.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<User>> {
        self.api.get(&listing_path(search)).await
    }
}

/// Path for the user listing, with the optional search filter encoded in
fn listing_path(search: Option<&str>) -> String {
    match search {
        Some(term) if !term.trim().is_empty() => {
            format!("users/?search={}", urlencoding::encode(term.trim()))
        },
        _ => "users/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_path_encodes_the_search_term() {
        assert_eq!(listing_path(None), "users/");
        assert_eq!(listing_path(Some("   ")), "users/");
        assert_eq!(listing_path(Some("alice")), "users/?search=alice");
        assert_eq!(listing_path(Some("a b")), "users/?search=a%20b");
        assert_eq!(listing_path(Some("a@b.c")), "users/?search=a%40b.c");
    }
}
