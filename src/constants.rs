//! Application constants and compiled-in content

use crate::types::{CustomLink, ImageRef, Profile, Project, SocialLink, SocialPlatform};
use std::time::Duration;

pub const APP_NAME: &str = "Linkfolio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage keys
pub const KEY_PROFILE: &str = "profile";
pub const KEY_SOCIALS: &str = "socials";
pub const KEY_LINKS: &str = "links";
pub const KEY_THEME: &str = "theme";

/// How long the preloader stays up after mount
pub const PRELOADER_DELAY: Duration = Duration::from_millis(500);

/// Max concurrent image downloads during startup prefetch
pub const PREFETCH_CONCURRENCY: usize = 8;

/// Per-request limits for image downloads
pub const FETCH_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// The startup prefetch counts as finished after this, whatever is still pending
pub const PREFETCH_DEADLINE: Duration = Duration::from_secs(20);

pub fn default_profile() -> Profile {
    Profile {
        name: "Atif Hasan".into(),
        bio: "i'm A web developer from Bangladesh specializing in modern, user-centric web applications."
            .into(),
        avatar_url: "https://avatars.githubusercontent.com/u/83109245?v=4".into(),
    }
}

pub fn default_socials() -> Vec<SocialLink> {
    let social = |id: &str, platform, url: &str| SocialLink {
        id: id.into(),
        platform,
        url: url.into(),
    };
    vec![
        social("1", SocialPlatform::Github, "https://github.com/atifhasan250"),
        social("2", SocialPlatform::Linkedin, "https://www.linkedin.com/in/atifhasan250/"),
        social("3", SocialPlatform::Facebook, "https://www.facebook.com/atifhasan250/"),
        social("4", SocialPlatform::Instagram, "https://www.instagram.com/_atif_hasan_/"),
        social("5", SocialPlatform::Youtube, "https://www.youtube.com/@FRSoftwares"),
        social("6", SocialPlatform::Whatsapp, "https://wa.me/8801754020488"),
    ]
}

pub fn default_links() -> Vec<CustomLink> {
    vec![
        CustomLink {
            id: "1".into(),
            title: "My Portfolio".into(),
            url: "https://atifs-portfolio.vercel.app/".into(),
        },
        CustomLink {
            id: "2".into(),
            title: "My Latest Project".into(),
            url: "/projects".into(),
        },
    ]
}

/// Static project catalog, in display order
pub fn project_catalog() -> Vec<Project> {
    let project = |id: &str, title: &str, description: &str, image: &str, slug: &str| Project {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        image_url: ImageRef::new(image),
        live_url: format!("https://{}.vercel.app/", slug),
        github_url: format!("https://github.com/Atifhasan250/{}", slug),
    };
    vec![
        project(
            "1",
            "Shortened Link",
            "A powerful, easy-to-use URL shortener with custom links, instant redirects, and link previews.",
            "projects/shortened-link.png",
            "shortened-link",
        ),
        project(
            "2",
            "Shad Jatra",
            "Explore the rich flavors of Bangladeshi cuisine. Step-by-step guides in a user-friendly web app.",
            "projects/shad-jatra.png",
            "shad-jatra",
        ),
        project(
            "3",
            "classnote Sorter",
            "Optimize your learning with Classnote Sorter, an AI-powered web app for effortless organization and management of PDF class notes.",
            "projects/classnote-sorter.png",
            "classnote-sorter",
        ),
        project(
            "4",
            "Capital Balance",
            "Track and manage your personal capital with ease. This project is a finance dashboard built with Next.js, React, TypeScript, Tailwind CSS, and Recharts for data visualization.",
            "projects/capital-balance.png",
            "capital-balance",
        ),
    ]
}
