use serde::Serialize;

/// Image entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    /// `repository:tag`
    pub repo_tags: String,
    #[serde(rename = "sizeMB")]
    pub size_mb: u64,
    /// Seconds since epoch, 0 when unknown
    pub created: i64,
}

impl Image {
    pub fn new(id: impl Into<String>, repo_tags: impl Into<String>, size_mb: u64) -> Self {
        Self {
            id: id.into(),
            repo_tags: repo_tags.into(),
            size_mb,
            created: 0,
        }
    }

    pub fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }
}
