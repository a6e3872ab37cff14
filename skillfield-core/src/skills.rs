//! Skill records that seed the playground's entity labels

use crate::error::PlaygroundResult;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    #[serde(default)]
    pub level: u32,
}

impl SkillRecord {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// The labels shown when no fixture is supplied
pub fn default_skills() -> Vec<SkillRecord> {
    [
        ("React", 3),
        ("Next.js", 3),
        ("Node.js", 3),
        ("TypeScript", 2),
        ("Tailwind", 2),
        ("Framer", 2),
        ("Git", 1),
        ("AWS", 2),
        ("Docker", 2),
        ("PostgreSQL", 3),
        ("MongoDB", 2),
        ("Python", 2),
        ("Java", 2),
        ("Figma", 1),
        ("Redux", 2),
        ("GraphQL", 2),
        ("Linux", 2),
        ("Three.js", 2),
    ]
    .into_iter()
    .map(|(name, level)| SkillRecord::new(name, level))
    .collect()
}

#[derive(Debug, Deserialize)]
struct SkillCategory {
    #[serde(default)]
    items: Vec<String>,
}

/// Either a flat list of records or the portfolio's categorized document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SkillsDocument {
    Records(Vec<SkillRecord>),
    Categorized { categories: Vec<SkillCategory> },
}

/// Parse a skills fixture.
///
/// Blank names are dropped and duplicates keep their first occurrence.
pub fn parse_skills_json(source: &str) -> PlaygroundResult<Vec<SkillRecord>> {
    let document: SkillsDocument = serde_json::from_str(source)?;
    let records = match document {
        SkillsDocument::Records(records) => records,
        SkillsDocument::Categorized { categories } => categories
            .into_iter()
            .flat_map(|category| category.items)
            .map(|name| SkillRecord::new(name, 0))
            .collect(),
    };

    let mut seen = HashSet::new();
    let mut skills = Vec::with_capacity(records.len());
    for mut record in records {
        let trimmed = record.name.trim();
        if trimmed.is_empty() {
            warn!("skipping skill with a blank name");
            continue;
        }
        if !seen.insert(trimmed.to_string()) {
            warn!("skipping duplicate skill '{}'", trimmed);
            continue;
        }
        record.name = trimmed.to_string();
        skills.push(record);
    }
    Ok(skills)
}

pub fn load_skills(path: &Path) -> PlaygroundResult<Vec<SkillRecord>> {
    let source = fs::read_to_string(path)?;
    parse_skills_json(&source)
}
