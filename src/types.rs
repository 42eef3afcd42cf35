//! Common types and data structures

use serde::{Deserialize, Serialize};

/// Profile shown in the home header and "About Me" card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
}

/// Supported social platforms. Each one has a fixed icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Twitter,
    Linkedin,
    Youtube,
    Instagram,
    Facebook,
    Tiktok,
    Whatsapp,
}

impl SocialPlatform {
    pub fn icon(self) -> &'static str {
        use egui_phosphor::regular as icons;
        match self {
            SocialPlatform::Github => icons::GITHUB_LOGO,
            SocialPlatform::Twitter => icons::TWITTER_LOGO,
            SocialPlatform::Linkedin => icons::LINKEDIN_LOGO,
            SocialPlatform::Youtube => icons::YOUTUBE_LOGO,
            SocialPlatform::Instagram => icons::INSTAGRAM_LOGO,
            SocialPlatform::Facebook => icons::FACEBOOK_LOGO,
            SocialPlatform::Tiktok => icons::TIKTOK_LOGO,
            SocialPlatform::Whatsapp => icons::WHATSAPP_LOGO,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SocialPlatform::Github => "GitHub",
            SocialPlatform::Twitter => "X / Twitter",
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Youtube => "YouTube",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Tiktok => "TikTok",
            SocialPlatform::Whatsapp => "WhatsApp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: SocialPlatform,
    pub url: String,
}

/// Entry in the "Important Links" card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomLink {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl CustomLink {
    pub fn target(&self) -> LinkTarget<'_> {
        LinkTarget::classify(&self.url)
    }
}

/// Where activating a link leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Root-relative path handled by the app router
    Internal(&'a str),
    /// Anything else, opened in the system browser
    External(&'a str),
}

impl<'a> LinkTarget<'a> {
    pub fn classify(url: &'a str) -> Self {
        if url.starts_with('/') {
            LinkTarget::Internal(url)
        } else {
            LinkTarget::External(url)
        }
    }
}

/// Reference to an image: an http(s) URL or a path relative to the assets dir
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// File name used for the on-disk cache of remote images: a readable
    /// tail of the reference plus a digest of the whole of it
    pub fn cache_key(&self) -> String {
        let tail: String = self
            .0
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .take(32)
            .collect();
        let digest = blake3::hash(self.0.as_bytes()).to_hex();
        format!("{}-{}", tail, &digest[..16])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: ImageRef,
    pub live_url: String,
    pub github_url: String,
}

/// Visual theme, persisted under the `theme` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Class name the theme is known by in storage and logs
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// App routes. One view is mounted per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/projects" => Some(Route::Projects),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Projects => "/projects",
        }
    }
}

/// What a view asks the app shell to do after a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Navigate(Route),
    OpenExternal(String),
}

/// Optional external content file, imported into storage at startup
#[derive(Debug, Default, Deserialize)]
pub struct ContentFile {
    pub profile: Option<Profile>,
    pub socials: Option<Vec<SocialLink>>,
    pub links: Option<Vec<CustomLink>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggle_is_an_involution() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(theme.toggled().toggled(), theme);
            assert_ne!(theme.toggled(), theme);
        }
    }

    #[test]
    fn theme_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::from_str::<Theme>("\"dark\"").unwrap(), Theme::Dark);
        assert!(serde_json::from_str::<Theme>("\"sepia\"").is_err());
    }

    #[test]
    fn root_relative_links_are_internal() {
        assert_eq!(LinkTarget::classify("/projects"), LinkTarget::Internal("/projects"));
        assert_eq!(
            LinkTarget::classify("https://example.com/a"),
            LinkTarget::External("https://example.com/a")
        );
        assert_eq!(LinkTarget::classify("projects"), LinkTarget::External("projects"));
    }

    #[test]
    fn routes_resolve_from_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path("/projects"), Some(Route::Projects));
        assert_eq!(Route::from_path("/projects/"), Some(Route::Projects));
        assert_eq!(Route::from_path("/blog"), None);
    }

    #[test]
    fn profile_uses_camel_case_avatar_key() {
        let profile: Profile =
            serde_json::from_str(r#"{"name":"A","bio":"B","avatarUrl":"https://x/y.png"}"#).unwrap();
        assert_eq!(profile.avatar_url, "https://x/y.png");
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let result: Result<Vec<SocialLink>, _> =
            serde_json::from_str(r#"[{"id":"1","platform":"myspace","url":"https://m"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn cache_key_is_filesystem_safe() {
        let image = ImageRef::new("https://avatars.githubusercontent.com/u/83109245?v=4");
        assert!(image.is_remote());
        assert!(!image.cache_key().contains('/'));
        assert!(!image.cache_key().contains('?'));
        assert!(!ImageRef::new("projects/shad-jatra.png").is_remote());
    }

    #[test]
    fn similar_urls_get_distinct_cache_keys() {
        let query = ImageRef::new("https://img.example/a?b");
        let path = ImageRef::new("https://img.example/a/b");
        let underscore = ImageRef::new("https://img.example/a_b");
        assert_ne!(query.cache_key(), path.cache_key());
        assert_ne!(query.cache_key(), underscore.cache_key());
        assert_eq!(query.cache_key(), ImageRef::new("https://img.example/a?b").cache_key());
        assert!(!query.cache_key().contains('.'));
    }
}
