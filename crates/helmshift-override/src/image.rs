//! Image reference boundary type
//!
//! Detection and parsing of image strings happen upstream; this type only
//! carries the already-split fields and renders them back out.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registry name Helm charts commonly use in place of `docker.io`.
const DOCKER_HUB_CHART_REGISTRY: &str = "registry.hub.docker.com";

/// A container image reference split into its components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Registry domain (e.g. `docker.io`, `quay.io`, `gcr.io`).
    pub registry: String,

    /// Repository path within the registry.
    pub repository: String,

    /// Image tag (e.g. `latest`, `v1.0.0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Image digest (e.g. `sha256:abc123...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ImageRef {
    pub fn new(registry: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            registry: registry.into(),
            repository: repository.into(),
            tag: None,
            digest: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// Copy of this reference with the registry rewritten to the form Helm
    /// charts expect. Docker Hub is the only special case: charts almost
    /// always spell it `registry.hub.docker.com` rather than `docker.io`.
    pub fn normalized(&self) -> ImageRef {
        let mut result = self.clone();
        if result.registry == "docker.io" {
            result.registry = DOCKER_HUB_CHART_REGISTRY.to_string();
        }
        result
    }

    /// The override map placed at the image's location in the values tree:
    /// `registry` and `repository` always, `tag` and `digest` only when set.
    pub fn override_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("registry".to_string(), Value::String(self.registry.clone()));
        map.insert(
            "repository".to_string(),
            Value::String(self.repository.clone()),
        );
        if let Some(tag) = &self.tag {
            map.insert("tag".to_string(), Value::String(tag.clone()));
        }
        if let Some(digest) = &self.digest {
            map.insert("digest".to_string(), Value::String(digest.clone()));
        }
        Value::Object(map)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // digest pins take precedence over tags
        if let Some(digest) = &self.digest {
            write!(f, "{}/{}@{}", self.registry, self.repository, digest)
        } else if let Some(tag) = &self.tag {
            write!(f, "{}/{}:{}", self.registry, self.repository, tag)
        } else {
            write!(f, "{}/{}", self.registry, self.repository)
        }
    }
}
