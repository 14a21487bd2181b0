//! Prompt loader for built-in and YAML prompt definitions.

use crate::defaults::builtin_prompts;
use crate::types::PromptDefinition;
use std::collections::HashMap;
use std::path::Path;
use tradebot_core::{AppError, AppResult};

/// Load a prompt definition by ID from a prompts directory.
///
/// This function looks for a file named `<id>.yml` directly inside
/// `prompts_dir`.
///
/// # Example
/// ```no_run
/// use tradebot_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("prompts"), "trade.direct")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(prompts_dir: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir.join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    if definition.id != prompt_id {
        return Err(AppError::Prompt(format!(
            "Prompt file {:?} declares id '{}'",
            prompt_file, definition.id
        )));
    }

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// List all prompt IDs available as YAML files in a directory.
pub fn list_prompts(prompts_dir: &Path) -> AppResult<Vec<String>> {
    if !prompts_dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompt_ids = Vec::new();

    for entry in walkdir::WalkDir::new(prompts_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                prompt_ids.push(stem.to_string());
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

/// The set of prompts the composer can render.
///
/// Starts from the built-in definitions; any `<id>.yml` in the optional
/// prompts directory replaces the built-in with the same ID.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    prompts: HashMap<String, PromptDefinition>,
}

impl PromptLibrary {
    /// Library with only the built-in prompts.
    pub fn builtin() -> Self {
        let prompts = builtin_prompts()
            .into_iter()
            .map(|def| (def.id.clone(), def))
            .collect();
        Self { prompts }
    }

    /// Built-ins overlaid with the YAML files found in `prompts_dir`.
    pub fn load(prompts_dir: Option<&Path>) -> AppResult<Self> {
        let mut library = Self::builtin();

        let Some(dir) = prompts_dir else {
            return Ok(library);
        };

        for id in list_prompts(dir)? {
            let definition = load_prompt(dir, &id)?;
            if library.prompts.contains_key(&id) {
                tracing::info!("Overriding built-in prompt: {}", id);
            }
            library.prompts.insert(id, definition);
        }

        Ok(library)
    }

    /// Look up a prompt by ID.
    pub fn get(&self, prompt_id: &str) -> AppResult<&PromptDefinition> {
        self.prompts
            .get(prompt_id)
            .ok_or_else(|| AppError::Prompt(format!("Unknown prompt: {}", prompt_id)))
    }

    /// IDs of all prompts in the library, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.prompts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{CONTEXTUAL_PROMPT_ID, DIRECT_PROMPT_ID};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_prompt(dir: &Path, id: &str, valid: bool) -> PathBuf {
        let content = if valid {
            format!(
                r#"
id: {}
title: "Test Prompt"
apiVersion: "1.0"
createdBy: test
behavior:
  tone: professional
  style: concise
template: "Personalizado: {{{{question}}}}"
output:
  format: markdown
"#,
                id
            )
        } else {
            "invalid: yaml: content:".to_string()
        };

        let file_path = dir.join(format!("{}.yml", id));
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn test_load_valid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "test.prompt", true);

        let prompt = load_prompt(temp_dir.path(), "test.prompt").unwrap();
        assert_eq!(prompt.id, "test.prompt");
        assert_eq!(prompt.title, "Test Prompt");
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "invalid", false);

        assert!(load_prompt(temp_dir.path(), "invalid").is_err());
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), "prompt1", true);
        create_test_prompt(temp_dir.path(), "prompt2", true);
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(prompts, vec!["prompt1".to_string(), "prompt2".to_string()]);
    }

    #[test]
    fn test_builtin_library_has_both_prompts() {
        let library = PromptLibrary::builtin();
        assert!(library.get(CONTEXTUAL_PROMPT_ID).is_ok());
        assert!(library.get(DIRECT_PROMPT_ID).is_ok());
        assert!(library.get("missing").is_err());
    }

    #[test]
    fn test_library_without_dir_is_builtin() {
        let library = PromptLibrary::load(None).unwrap();
        assert_eq!(library.ids(), vec![CONTEXTUAL_PROMPT_ID, DIRECT_PROMPT_ID]);
    }

    #[test]
    fn test_yaml_overrides_builtin() {
        let temp_dir = TempDir::new().unwrap();
        create_test_prompt(temp_dir.path(), DIRECT_PROMPT_ID, true);

        let library = PromptLibrary::load(Some(temp_dir.path())).unwrap();
        let direct = library.get(DIRECT_PROMPT_ID).unwrap();
        assert!(direct.template.starts_with("Personalizado"));
        // The other built-in is untouched
        assert!(library
            .get(CONTEXTUAL_PROMPT_ID)
            .unwrap()
            .template
            .contains("retrievedContext"));
    }

    #[test]
    fn test_mismatched_id_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_prompt(temp_dir.path(), "one", true);
        fs::rename(path, temp_dir.path().join("two.yml")).unwrap();

        assert!(PromptLibrary::load(Some(temp_dir.path())).is_err());
    }
}
