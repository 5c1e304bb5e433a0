//! One-shot prompt construction and example prompt loading.

use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Default one-shot example demonstrating the one-sentence summary style.
pub const DEFAULT_EXAMPLE_PROMPT: &str = r#"Example:
Content:
class ExportedBoundingBox(BoundingBox):
    def to_dict(self):
        return {
            "uuid": str(self.uuid),
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "label": self.label.text,
        }

    def to_tuple(self):
        return self.x, self.y, self.width, self.height

    class Meta:
        proxy = True

Summary:
Class ExportedBoundingBox: A proxy model of BoundingBox that represents bounding box annotations in dictionary and tuple forms."#;

/// Build the single user message sent to the provider.
pub fn build_prompt(example: &str, content: &str) -> String {
    format!(
        "{}\nFollowing the example above, please write a one-sentence summary for the following content:\n\nContent:\n{}\n\nSummary:\n",
        example, content
    )
}

/// Resolve prompt file path with support for absolute, tilde, and relative paths
///
/// Path resolution priority:
/// 1. Absolute path
/// 2. Tilde expansion (if starts with `~/`)
/// 3. Relative to current directory (if starts with `./`)
/// 4. Relative to base_dir
pub fn resolve_prompt_path(path: &str, base_dir: &Path) -> Result<PathBuf, ApiError> {
    if Path::new(path).is_absolute() {
        return Ok(PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home =
            std::env::var("HOME").map_err(|_| ApiError::ConfigError("HOME not set".to_string()))?;
        return Ok(PathBuf::from(home).join(rest));
    }
    if let Some(rest) = path.strip_prefix("./") {
        let current_dir = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Failed to get current directory: {}", e))
        })?;
        return Ok(current_dir.join(rest));
    }
    Ok(base_dir.join(path))
}

/// Load the example prompt, falling back to [`DEFAULT_EXAMPLE_PROMPT`] when no path is configured.
pub fn load_example_prompt(path: Option<&str>, base_dir: &Path) -> Result<String, ApiError> {
    let Some(path) = path else {
        return Ok(DEFAULT_EXAMPLE_PROMPT.to_string());
    };
    let resolved = resolve_prompt_path(path, base_dir)?;
    let content = std::fs::read_to_string(&resolved).map_err(|e| {
        ApiError::ConfigError(format!(
            "Failed to read prompt file {}: {}",
            resolved.display(),
            e
        ))
    })?;
    if content.trim().is_empty() {
        return Err(ApiError::ConfigError(format!(
            "Prompt file {} is empty",
            resolved.display()
        )));
    }
    Ok(content.trim_end().to_string())
}
