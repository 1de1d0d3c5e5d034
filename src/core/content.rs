//! Static content registry: everything the page says.
//!
//! All records are `&'static`, defined here at compile time and checked
//! once at startup by [`validate`].  Nothing mutates them afterwards.

use thiserror::Error;

/// The person the portfolio is about.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub short_name: &'static str,
    pub full_name: &'static str,
    pub role: &'static str,
    pub tagline: &'static str,
    pub bio: &'static str,
    pub email: &'static str,
    /// Relative to the assets directory.
    pub resume: &'static str,
    /// Relative to the assets directory.
    pub portrait: &'static str,
    pub availability: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub year: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub links: &'static [Link],
    /// Relative to the assets directory.
    pub images: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

pub static PROFILE: Profile = Profile {
    short_name: "Clayton Dale",
    full_name: "Clayton Dale Tambis",
    role: "Web Developer",
    tagline: "A Web Developer",
    bio: "Skilled in designing and developing responsive websites and mobile apps and \
          deeply interested in AI automation and generative AI, exploring how intelligent \
          systems can enhance workflows and user experiences. Motivated to contribute to \
          innovative, forward-thinking projects and grow within a dynamic development team.",
    email: "claytondalet@gmail.com",
    resume: "resume.pdf",
    portrait: "images/profile.jpg",
    availability: "✨ Open to exciting opportunities ✨",
};

pub static PROJECTS: &[Project] = &[
    Project {
        title: "Lakbay",
        year: "2025",
        summary: "Travel itinerary planner with AI suggestions",
        description: "A trip planner that drafts day-by-day itineraries from a short prompt, \
                      then lets travellers rearrange stops on a map. Suggestions come from a \
                      Gemini-backed workflow; itineraries sync through Supabase.",
        tags: &["NEXT.JS", "SUPABASE", "GEMINI"],
        links: &[
            Link {
                label: "Live",
                url: "https://lakbay.example.com",
            },
            Link {
                label: "Source",
                url: "https://github.com/yourprofile/lakbay",
            },
        ],
        images: &[
            "images/projects/lakbay-1.jpg",
            "images/projects/lakbay-2.jpg",
            "images/projects/lakbay-3.jpg",
        ],
    },
    Project {
        title: "Inbox Autopilot",
        year: "2025",
        summary: "n8n workflows that triage and answer support mail",
        description: "A set of n8n automations that classify incoming support email with \
                      OpenAI, draft replies for common questions and route the rest to the \
                      right person with a summary attached.",
        tags: &["N8N", "OPENAI", "AI AUTOMATION"],
        links: &[Link {
            label: "Case study",
            url: "https://github.com/yourprofile/inbox-autopilot",
        }],
        images: &[
            "images/projects/autopilot-1.jpg",
            "images/projects/autopilot-2.jpg",
        ],
    },
    Project {
        title: "Tindahan POS",
        year: "2024",
        summary: "Point of sale for neighbourhood stores",
        description: "A lightweight point-of-sale and inventory app for small retail \
                      stores, with offline-first sales entry, daily reports and low-stock \
                      alerts.",
        tags: &["LARAVEL", "REACT", "RESPONSIVE DESIGN"],
        links: &[Link {
            label: "Source",
            url: "https://github.com/yourprofile/tindahan-pos",
        }],
        images: &[
            "images/projects/pos-1.jpg",
            "images/projects/pos-2.jpg",
            "images/projects/pos-3.jpg",
            "images/projects/pos-4.jpg",
        ],
    },
    Project {
        title: "Campus Chatbot",
        year: "2024",
        summary: "Student help desk assistant",
        description: "A chatbot that answers enrolment and schedule questions from the \
                      student handbook, with hand-off to staff when it is unsure.",
        tags: &["PYTHON", "OPENAI", "GOOGLE CLOUD"],
        links: &[Link {
            label: "Demo",
            url: "https://campus-bot.example.com",
        }],
        images: &["images/projects/chatbot-1.jpg"],
    },
];

/// Lead paragraph under the services heading.
pub const SERVICES_INTRO: &str = "Specialized in creating modern web experiences with a focus on \
                                  clean design, performance, and cutting-edge technology.";

pub static SERVICES: &[Service] = &[
    Service {
        title: "Web Development",
        description: "Building modern, responsive websites and web applications using \
                      cutting-edge technologies.",
        features: &[
            "Full-stack development",
            "Responsive design",
            "Performance optimization",
        ],
    },
    Service {
        title: "AI Integration",
        description: "Implementing intelligent systems and automation using the latest AI \
                      technologies.",
        features: &[
            "OpenAI & Gemini AI integration",
            "Workflow automation",
            "Intelligent chatbots",
        ],
    },
    Service {
        title: "UI/UX Design",
        description: "Creating beautiful, intuitive user interfaces that enhance user \
                      experience.",
        features: &[
            "Modern, minimal design",
            "User-centered approach",
            "Prototyping & wireframing",
            "Interactive animations",
        ],
    },
];

pub static SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "LinkedIn",
        url: "https://linkedin.com/in/yourprofile",
    },
    SocialLink {
        name: "GitHub",
        url: "https://github.com/yourprofile",
    },
    SocialLink {
        name: "Twitter",
        url: "https://twitter.com/yourprofile",
    },
];

pub static TECH_ITEMS: &[&str] = &[
    "NEXT.JS",
    "REACT",
    "TYPESCRIPT",
    "PYTHON",
    "SUPABASE",
    "N8N",
    "GOOGLE CLOUD",
    "OPENAI",
    "GEMINI",
    "LARAVEL",
    "NODE.JS",
    "GENERATIVE AI",
    "AI AUTOMATION",
];

pub static CONCEPTS: &[&str] = &[
    "ARCHITECTURE",
    "SYSTEMS",
    "INTERFACES",
    "ALGORITHMS",
    "PROTOTYPING",
    "DESIGN",
    "PROJECT MANAGEMENT",
    "RESPONSIVE DESIGN",
    "ARTIFICIAL INTELLIGENCE",
    "AUTOMATION",
    "DATABASE MANAGEMENT",
    "UI/UX DESIGN",
];

// ───────────────────────────────────────── validation ────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{kind} #{index}: `{field}` is empty")]
    EmptyField {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("{kind} #{index}: `{url}` is not an http(s) link")]
    BadLink {
        kind: &'static str,
        index: usize,
        url: &'static str,
    },
}

/// Every schema problem in the registry.
pub fn issues() -> Vec<ContentError> {
    let mut out = Vec::new();

    let p = &PROFILE;
    for (field, value) in [
        ("short_name", p.short_name),
        ("full_name", p.full_name),
        ("role", p.role),
        ("bio", p.bio),
        ("email", p.email),
        ("resume", p.resume),
        ("portrait", p.portrait),
    ] {
        require(&mut out, "profile", 0, field, value);
    }
    if !p.email.contains('@') {
        out.push(ContentError::BadLink {
            kind: "profile",
            index: 0,
            url: p.email,
        });
    }

    for (i, project) in PROJECTS.iter().enumerate() {
        require(&mut out, "project", i, "title", project.title);
        require(&mut out, "project", i, "year", project.year);
        require(&mut out, "project", i, "summary", project.summary);
        require(&mut out, "project", i, "description", project.description);
        require_list(&mut out, "project", i, "tags", project.tags);
        for tag in project.tags {
            require(&mut out, "project", i, "tags", tag);
        }
        for image in project.images {
            require(&mut out, "project", i, "images", image);
        }
        for link in project.links {
            require(&mut out, "project", i, "links", link.label);
            require_http(&mut out, "project", i, link.url);
        }
    }

    for (i, service) in SERVICES.iter().enumerate() {
        require(&mut out, "service", i, "title", service.title);
        require(&mut out, "service", i, "description", service.description);
        require_list(&mut out, "service", i, "features", service.features);
    }

    for (i, social) in SOCIAL_LINKS.iter().enumerate() {
        require(&mut out, "social link", i, "name", social.name);
        require_http(&mut out, "social link", i, social.url);
    }

    for (i, label) in TECH_ITEMS.iter().enumerate() {
        require(&mut out, "tech label", i, "label", label);
    }
    for (i, label) in CONCEPTS.iter().enumerate() {
        require(&mut out, "concept", i, "label", label);
    }

    out
}

/// Fail on the first schema problem.
pub fn validate() -> Result<(), ContentError> {
    match issues().into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every image path the page may display (portrait first).
pub fn image_paths() -> Vec<&'static str> {
    let mut paths = vec![PROFILE.portrait];
    for project in PROJECTS {
        paths.extend(project.images.iter().copied());
    }
    paths
}

fn require(
    out: &mut Vec<ContentError>,
    kind: &'static str,
    index: usize,
    field: &'static str,
    value: &str,
) {
    if value.trim().is_empty() {
        out.push(ContentError::EmptyField { kind, index, field });
    }
}

fn require_list(
    out: &mut Vec<ContentError>,
    kind: &'static str,
    index: usize,
    field: &'static str,
    values: &[&str],
) {
    if values.is_empty() {
        out.push(ContentError::EmptyField { kind, index, field });
    }
}

fn require_http(out: &mut Vec<ContentError>, kind: &'static str, index: usize, url: &'static str) {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        out.push(ContentError::BadLink { kind, index, url });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn registry_is_complete() {
        assert_eq!(issues(), Vec::new());
        assert!(validate().is_ok());
    }

    #[test]
    fn every_project_has_tags_and_a_link() {
        for project in PROJECTS {
            assert!(!project.tags.is_empty(), "{}", project.title);
            assert!(!project.links.is_empty(), "{}", project.title);
        }
    }

    #[test]
    fn image_paths_start_with_the_portrait() {
        let paths = image_paths();
        assert_eq!(paths[0], PROFILE.portrait);
        let project_images: usize = PROJECTS.iter().map(|p| p.images.len()).sum();
        assert_eq!(paths.len(), 1 + project_images);
    }

    #[test]
    fn helpers_report_problems() {
        let mut out = Vec::new();
        require(&mut out, "service", 2, "title", "  ");
        require_http(&mut out, "social link", 1, "ftp://nope");
        assert_eq!(
            out,
            vec![
                ContentError::EmptyField {
                    kind: "service",
                    index: 2,
                    field: "title"
                },
                ContentError::BadLink {
                    kind: "social link",
                    index: 1,
                    url: "ftp://nope"
                },
            ]
        );
    }
}
