use std::collections::HashSet;

/// Maps a client-requested model onto the server-controlled allow-list.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    allowed: HashSet<String>,
    default_model: String,
}

impl ModelSelector {
    pub fn new<I, S>(allowed: I, default_model: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            default_model: default_model.into(),
        }
    }

    /// Returns `requested` if it is allow-listed, otherwise the default model.
    pub fn select<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(model) if self.allowed.contains(model) => model,
            _ => &self.default_model,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}
