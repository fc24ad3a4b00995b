#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The user who is logged into the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    /// Cached URL of the uploaded profile image.
    pub profile_image: Option<String>,
}

impl Session {
    pub const fn new(user: SessionUser) -> Self {
        Self {
            user,
            profile_image: None,
        }
    }
}
