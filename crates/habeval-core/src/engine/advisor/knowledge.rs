use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Number of passages requested per query.
pub const DEFAULT_TOP_K: usize = 2;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Knowledge source unavailable: {0}")]
    Unavailable(String),
}

/// A free-text question for a knowledge source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeQuery {
    pub text: String,
    pub top_k: usize,
    /// Restricts retrieval to passages about this mission, when set.
    pub mission: Option<String>,
}

impl KnowledgeQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top_k: DEFAULT_TOP_K,
            mission: None,
        }
    }

    pub fn for_mission(mut self, mission: Option<&str>) -> Self {
        self.mission = mission.map(str::to_string);
        self
    }
}

/// A document passage an answer was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceRef {
    pub path: String,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct KnowledgeAnswer {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl KnowledgeAnswer {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// External retrieval collaborator consulted by the mission advisor.
pub trait KnowledgeSource: Send + Sync {
    fn query(&self, query: &KnowledgeQuery) -> Result<KnowledgeAnswer, KnowledgeError>;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeFile {
    #[serde(default)]
    entry: Vec<KnowledgeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeEntry {
    mission: Option<String>,
    answer: String,
    #[serde(default)]
    sources: Vec<SourceRef>,
}

/// Pre-written answers read from a TOML file of `[[entry]]` tables.
///
/// A query is answered by the first entry whose `mission` matches the query's
/// mission (case-insensitively), falling back to the first entry without a
/// mission. Queries with nothing to match get an empty answer.
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledge {
    entries: Vec<KnowledgeEntry>,
}

impl StaticKnowledge {
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path_str)
    }

    fn from_toml_str(content: &str, path: &str) -> Result<Self, KnowledgeError> {
        let file: KnowledgeFile = toml::from_str(content).map_err(|e| KnowledgeError::Toml {
            path: path.to_string(),
            source: e,
        })?;
        Ok(Self {
            entries: file.entry,
        })
    }

    /// A source answering every query with the same text.
    pub fn with_answer(answer: impl Into<String>, sources: Vec<SourceRef>) -> Self {
        Self {
            entries: vec![KnowledgeEntry {
                mission: None,
                answer: answer.into(),
                sources,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KnowledgeSource for StaticKnowledge {
    fn query(&self, query: &KnowledgeQuery) -> Result<KnowledgeAnswer, KnowledgeError> {
        let for_mission = query.mission.as_deref().and_then(|mission| {
            self.entries.iter().find(|e| {
                e.mission
                    .as_deref()
                    .is_some_and(|m| m.eq_ignore_ascii_case(mission))
            })
        });
        let entry = for_mission.or_else(|| self.entries.iter().find(|e| e.mission.is_none()));

        Ok(entry
            .map(|e| KnowledgeAnswer {
                text: e.answer.clone(),
                sources: e.sources.iter().take(query.top_k.max(1)).cloned().collect(),
            })
            .unwrap_or_default())
    }
}
