//! Static skill taxonomy: technical, domain and soft-skill phrases.
//!
//! Loaded once per process and never mutated. A phrase resolves to exactly one
//! [`SkillCategory`], checked soft → domain → technical, first match wins.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalArea {
    ProgrammingLanguages,
    Frontend,
    Backend,
    Database,
    Devops,
    Tools,
    Concepts,
}

impl TechnicalArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechnicalArea::ProgrammingLanguages => "programming_languages",
            TechnicalArea::Frontend => "frontend",
            TechnicalArea::Backend => "backend",
            TechnicalArea::Database => "database",
            TechnicalArea::Devops => "devops",
            TechnicalArea::Tools => "tools",
            TechnicalArea::Concepts => "concepts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainArea {
    Healthcare,
    Finance,
    Marketing,
    DataScience,
    CyberSecurity,
    Design,
}

impl DomainArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainArea::Healthcare => "healthcare",
            DomainArea::Finance => "finance",
            DomainArea::Marketing => "marketing",
            DomainArea::DataScience => "data_science",
            DomainArea::CyberSecurity => "cyber_security",
            DomainArea::Design => "design",
        }
    }
}

/// The single bucket a skill phrase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "area")]
pub enum SkillCategory {
    Technical(TechnicalArea),
    Domain(DomainArea),
    Soft,
}

const TECHNICAL: &[(TechnicalArea, &[&str])] = &[
    (
        TechnicalArea::ProgrammingLanguages,
        &[
            "javascript", "typescript", "python", "java", "c++", "c#", "php", "ruby", "go",
            "swift", "kotlin", "scala", "rust", "perl", "r", "dart",
        ],
    ),
    (
        TechnicalArea::Frontend,
        &[
            "react", "angular", "vue", "next.js", "html", "css", "sass", "less", "bootstrap",
            "tailwind", "material-ui", "styled-components", "redux", "jquery", "webpack",
            "babel", "dom", "responsive design", "ui/ux", "pwa", "spa",
        ],
    ),
    (
        TechnicalArea::Backend,
        &[
            "node.js", "express", "django", "flask", "spring", "laravel", "rails", "fastapi",
            "graphql", "rest api", "restful", "microservices", "serverless", "asp.net",
        ],
    ),
    (
        TechnicalArea::Database,
        &[
            "sql", "mysql", "postgresql", "mongodb", "firebase", "oracle", "sqlite", "nosql",
            "dynamodb", "redis", "elasticsearch", "cassandra", "neo4j", "couchdb", "mariadb",
        ],
    ),
    (
        TechnicalArea::Devops,
        &[
            "docker", "kubernetes", "jenkins", "ci/cd", "aws", "azure", "gcp", "heroku",
            "vercel", "netlify", "ansible", "terraform", "github actions", "travis",
            "gitlab ci",
        ],
    ),
    (
        TechnicalArea::Tools,
        &[
            "git", "github", "gitlab", "bitbucket", "jira", "confluence", "slack", "npm", "yarn",
            "pip", "gradle", "maven", "jupyter", "postman", "figma", "sketch", "adobe xd",
        ],
    ),
    (
        TechnicalArea::Concepts,
        &[
            "agile", "scrum", "tdd", "bdd", "oop", "functional programming", "algorithms",
            "data structures", "design patterns", "rest", "solid", "mvc", "mvvm", "clean code",
        ],
    ),
];

const DOMAIN: &[(DomainArea, &[&str])] = &[
    (
        DomainArea::Healthcare,
        &[
            "healthcare", "medical", "clinical", "patient care", "hipaa", "ehr", "emr",
            "telemedicine", "health informatics", "healthcare analytics", "public health",
        ],
    ),
    (
        DomainArea::Finance,
        &[
            "finance", "accounting", "banking", "financial analysis", "trading", "investment",
            "portfolio management", "risk assessment", "financial modeling", "stocks", "bonds",
        ],
    ),
    (
        DomainArea::Marketing,
        &[
            "marketing", "advertising", "social media", "seo", "content marketing",
            "brand management", "market research", "digital marketing", "analytics", "crm",
            "customer acquisition",
        ],
    ),
    (
        DomainArea::DataScience,
        &[
            "data science", "machine learning", "deep learning", "neural networks", "nlp",
            "computer vision", "statistics", "big data", "data mining", "data visualization",
            "predictive modeling", "pytorch", "tensorflow",
        ],
    ),
    (
        DomainArea::CyberSecurity,
        &[
            "cyber security", "security", "network security", "penetration testing",
            "ethical hacking", "vulnerability assessment", "firewall", "encryption",
            "incident response", "security audit",
        ],
    ),
    (
        DomainArea::Design,
        &[
            "design", "ux", "ui", "user experience", "user interface", "graphic design",
            "interaction design", "wireframing", "prototyping", "usability testing",
            "design thinking", "accessibility",
        ],
    ),
];

const SOFT: &[&str] = &[
    "communication", "teamwork", "leadership", "problem solving", "critical thinking",
    "time management", "adaptability", "collaboration", "creativity", "attention to detail",
    "project management", "mentoring", "negotiation", "presentation", "stakeholder management",
];

/// Immutable catalog of canonical (lowercase) skill phrases.
#[derive(Debug)]
pub struct SkillTaxonomy {
    technical: &'static [(TechnicalArea, &'static [&'static str])],
    domain: &'static [(DomainArea, &'static [&'static str])],
    soft: &'static [&'static str],
}

pub static TAXONOMY: Lazy<SkillTaxonomy> = Lazy::new(|| SkillTaxonomy {
    technical: TECHNICAL,
    domain: DOMAIN,
    soft: SOFT,
});

impl SkillTaxonomy {
    pub fn technical_skills(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.technical.iter().flat_map(|(_, skills)| skills.iter().copied())
    }

    pub fn domain_skills(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.domain.iter().flat_map(|(_, skills)| skills.iter().copied())
    }

    pub fn soft_skills(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.soft.iter().copied()
    }

    /// Technical, then domain, then soft phrases: the default extraction list.
    pub fn all_skills(&self) -> Vec<&'static str> {
        self.technical_skills()
            .chain(self.domain_skills())
            .chain(self.soft_skills())
            .collect()
    }

    /// Technical categories in declaration order.
    pub fn technical_areas(&self) -> impl Iterator<Item = TechnicalArea> + '_ {
        self.technical.iter().map(|(area, _)| *area)
    }

    /// Domain categories in declaration order.
    pub fn domain_areas(&self) -> impl Iterator<Item = DomainArea> + '_ {
        self.domain.iter().map(|(area, _)| *area)
    }

    /// Resolves a skill (case-insensitive) to its category. Soft skills take
    /// priority over domain skills, which take priority over technical ones.
    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        let skill = skill.to_lowercase();
        let skill = skill.as_str();

        if self.soft.contains(&skill) {
            return Some(SkillCategory::Soft);
        }
        if let Some((area, _)) = self.domain.iter().find(|(_, s)| s.contains(&skill)) {
            return Some(SkillCategory::Domain(*area));
        }
        self.technical
            .iter()
            .find(|(_, s)| s.contains(&skill))
            .map(|(area, _)| SkillCategory::Technical(*area))
    }

    pub fn is_domain_skill(&self, skill: &str) -> bool {
        matches!(self.category_of(skill), Some(SkillCategory::Domain(_)))
    }
}
