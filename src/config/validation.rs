//! Configuration validation
//!
//! Checks a merged configuration (file plus flags) before any input is read:
//! - Rename targets are non-empty
//! - A group rename has group keywords to select entries with
//! - An entry rename has name or resource keywords
//! - Classification rules have keywords and target groups
//! - The designator is a printable character

use super::merge_config::MergeConfig;
use crate::transform::KeywordFilter;
use crate::M3uMergeError;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub context: Option<String>,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: None,
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref ctx) = self.context {
            write!(f, "[{}] {}: {}", ctx, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate an m3u-merge configuration
pub fn validate_config(config: &MergeConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.identity.designator.is_control() || config.identity.designator.is_whitespace() {
        errors.push(ValidationError::new(
            "identity.designator",
            "Designator must be a printable character",
        ));
    }

    if let Some(ref name) = config.rename.name {
        if name.trim().is_empty() {
            errors.push(ValidationError::new("rename.name", "New name cannot be empty"));
        }
        if !KeywordFilter::new(&config.keywords.name).is_set()
            && !KeywordFilter::new(&config.keywords.resource).is_set()
        {
            errors.push(ValidationError::new(
                "rename.name",
                "Renaming entries requires name or resource keywords",
            ));
        }
    }

    if let Some(ref group) = config.rename.group {
        if group.trim().is_empty() {
            errors.push(ValidationError::new("rename.group", "New group cannot be empty"));
        }
        if !KeywordFilter::new(&config.keywords.group).is_set() {
            errors.push(ValidationError::new(
                "keywords.group",
                "Renaming groups requires group keywords",
            ));
        }
    }

    for (index, rule) in config.classify.iter().enumerate() {
        let context = format!("classify #{}", index + 1);
        if rule.keyword.trim().is_empty() {
            errors.push(
                ValidationError::new("keyword", "Keyword cannot be empty").with_context(&context),
            );
        }
        if rule.group.trim().is_empty() {
            errors.push(
                ValidationError::new("group", "Target group cannot be empty")
                    .with_context(&context),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate configuration and return a Result
///
/// A group rename without group keywords is reported as
/// [`M3uMergeError::MissingGroupForRename`]; everything else is folded
/// into a single [`M3uMergeError::Config`].
pub fn validate_config_result(config: &MergeConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        if errors.iter().any(|e| e.field == "keywords.group") {
            return M3uMergeError::MissingGroupForRename;
        }
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        M3uMergeError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ClassifyRule;

    #[test]
    fn test_valid_config() {
        let config = MergeConfig::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_group_rename_without_group_keywords() {
        let mut config = MergeConfig::new();
        config.rename.group = Some("News".to_string());
        config.keywords.group = vec!["  ".to_string()];

        let result = validate_config_result(&config);
        assert!(matches!(result, Err(M3uMergeError::MissingGroupForRename)));
    }

    #[test]
    fn test_name_rename_requires_keywords() {
        let mut config = MergeConfig::new();
        config.rename.name = Some("CNN".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rename.name");

        config.keywords.resource = vec!["cdn".to_string()];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_rename_target() {
        let mut config = MergeConfig::new();
        config.rename.name = Some(" ".to_string());
        config.keywords.name = vec!["cnn".to_string()];

        let result = validate_config_result(&config);
        assert!(matches!(result, Err(M3uMergeError::Config(_))));
    }

    #[test]
    fn test_classify_rule_errors_carry_context() {
        let mut config = MergeConfig::new();
        config.classify = vec![
            ClassifyRule {
                keyword: "CCTV".to_string(),
                group: "CCTV".to_string(),
                numeric: true,
            },
            ClassifyRule {
                keyword: "".to_string(),
                group: "Other".to_string(),
                numeric: false,
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[classify #2] keyword: Keyword cannot be empty");
    }

    #[test]
    fn test_control_designator() {
        let mut config = MergeConfig::new();
        config.identity.designator = '\n';
        assert!(validate_config(&config).is_err());
    }
}
