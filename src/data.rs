//! Static project records rendered on the projects page.
//!
//! The list is compiled in; nothing here is loaded or mutated at runtime.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub short_desc: &'static str,
    /// Covered by a non-disclosure agreement: render a placeholder card face
    /// and no imagery.
    pub nda: bool,
    pub image: Option<&'static str>,
    pub role: Option<&'static str>,
    pub hero_images: &'static [&'static str],
    pub content: &'static [ContentBlock],
    pub links: &'static [ProjectLink],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBlock {
    Text(&'static str),
    Image { src: &'static str, alt: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLink {
    pub label: &'static str,
    pub url: &'static str,
}

/// Source path of the stand-in image; the views swap it for the bundled
/// asset at render time.
pub const PLACEHOLDER_IMAGE: &str = "/assets/images/placeholder.svg";

const PLACEHOLDER: &str = PLACEHOLDER_IMAGE;

pub const PROJECTS: &[Project] = &[
    Project {
        id: "wbt",
        title: "WBT",
        short_desc: "A web-based training platform built for scalable content delivery and learner engagement.",
        nda: false,
        image: None,
        role: Some("Product Manager, Designer & Developer"),
        hero_images: &[PLACEHOLDER, PLACEHOLDER],
        content: &[
            ContentBlock::Text(
                "WBT is a web-based training platform designed to deliver scalable, interactive learning content across large organizations. I led product strategy and contributed directly to the frontend build, working closely with instructional designers and engineers to ship a cohesive experience.",
            ),
            ContentBlock::Text(
                "The platform supports branching scenarios, progress tracking, and responsive delivery across devices. Key challenges included designing a content authoring workflow that non-technical stakeholders could use without sacrificing flexibility for developers.",
            ),
            ContentBlock::Image {
                src: PLACEHOLDER,
                alt: "WBT content authoring interface",
            },
            ContentBlock::Text(
                "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
            ),
            ContentBlock::Image {
                src: PLACEHOLDER,
                alt: "WBT learner dashboard",
            },
            ContentBlock::Text(
                "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
            ),
        ],
        links: &[],
    },
    Project {
        id: "cst",
        title: "CST",
        short_desc: "Enterprise tooling for a Fortune 500 client. Details under NDA.",
        nda: true,
        image: None,
        role: Some("Product Manager"),
        hero_images: &[PLACEHOLDER],
        content: &[
            ContentBlock::Text(
                "This project is covered under a non-disclosure agreement. I can share that it involved building internal tooling for a large enterprise client, with a focus on workflow automation and cross-team data visibility.",
            ),
            ContentBlock::Text(
                "I led discovery, defined the product roadmap, and worked with a distributed engineering team through delivery. Happy to discuss the approach and outcomes in a conversation.",
            ),
        ],
        links: &[],
    },
    Project {
        id: "project-4",
        title: "Project 4",
        short_desc: "Confidential client engagement. Details under NDA.",
        nda: true,
        image: None,
        role: Some("Product Manager & Developer"),
        hero_images: &[],
        content: &[ContentBlock::Text(
            "This project is covered under a non-disclosure agreement. Available to discuss in a conversation.",
        )],
        links: &[],
    },
    Project {
        id: "portfolio-v1",
        title: "Portfolio v1",
        short_desc: "First iteration of my personal portfolio — designed and built from scratch.",
        nda: false,
        image: None,
        role: Some("Designer & Developer"),
        hero_images: &[PLACEHOLDER, PLACEHOLDER, PLACEHOLDER],
        content: &[
            ContentBlock::Text(
                "The first version of my personal portfolio, built to establish a web presence and practice end-to-end design and development. I designed the visual identity, built the layout in vanilla HTML/CSS/JS, and iterated based on feedback.",
            ),
            ContentBlock::Image {
                src: PLACEHOLDER,
                alt: "Portfolio v1 homepage design",
            },
            ContentBlock::Text(
                "This version taught me a lot about the gap between what looks good in a mockup and what actually works in a browser — lessons that directly shaped how I approach the current version.",
            ),
        ],
        links: &[],
    },
];

/// Look up a project by its stable id.
pub fn project_by_id(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = HashSet::new();
        for p in PROJECTS {
            assert!(seen.insert(p.id), "duplicate project id {}", p.id);
        }
    }

    #[test]
    fn lookup_finds_every_project() {
        for p in PROJECTS {
            assert_eq!(project_by_id(p.id).map(|q| q.title), Some(p.title));
        }
    }

    #[test]
    fn nda_projects_still_have_body_copy() {
        for p in PROJECTS.iter().filter(|p| p.nda) {
            assert!(!p.content.is_empty(), "{} has no content blocks", p.id);
        }
    }
}
