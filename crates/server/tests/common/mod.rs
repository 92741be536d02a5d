//! # Common Test Utilities
//!
//! Shared test infrastructure: logging initialization and test fixtures for
//! integration tests.

use std::sync::Once;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Test fixtures for user data
pub struct UserFixture {
    pub id:    uuid::Uuid,
    pub name:  String,
    pub email: String,
}

impl Default for UserFixture {
    fn default() -> Self {
        Self {
            id:    uuid::Uuid::new_v4(),
            name:  "Test User".to_string(),
            email: "test@example.com".to_string(),
        }
    }
}

impl UserFixture {
    /// Create a new user fixture with default values
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Set the user name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the user email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// Test fixtures for project data
pub struct ProjectFixture {
    pub title:           String,
    pub description:     String,
    pub required_skills: Vec<String>,
    pub max_members:     i32,
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self {
            title:           "Test Project".to_string(),
            description:     "A test project for integration tests".to_string(),
            required_skills: vec!["rust".to_string()],
            max_members:     5,
        }
    }
}

impl ProjectFixture {
    /// Create a new project fixture with default values
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Set the project title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the member capacity
    #[must_use]
    pub fn with_max_members(mut self, max_members: i32) -> Self {
        self.max_members = max_members;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_fixture_builder() {
        let fixture = UserFixture::new()
            .with_name("Custom User")
            .with_email("custom@example.com");

        assert_eq!(fixture.name, "Custom User");
        assert_eq!(fixture.email, "custom@example.com");
    }

    #[test]
    fn test_project_fixture_builder() {
        let fixture = ProjectFixture::new()
            .with_title("Custom Project")
            .with_max_members(2);

        assert_eq!(fixture.title, "Custom Project");
        assert_eq!(fixture.max_members, 2);
        assert!(!fixture.required_skills.is_empty());
    }
}
