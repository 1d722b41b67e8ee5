use crate::errors::{RecipeError, RecipeResult};
use crate::images::accepted_extension;

const MAX_NAME_LENGTH: usize = 200;
const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Input validation for recipe and category writes
pub struct ValidationService;

impl ValidationService {
    /// Recipe name: required, trimmed, at most 200 characters
    pub fn validate_recipe_name(name: &str) -> RecipeResult<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(RecipeError::validation("name", "Name is required"));
        }

        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(RecipeError::validation(
                "name",
                format!("Name is too long (max {} characters)", MAX_NAME_LENGTH),
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Recipe content: required, kept verbatim
    pub fn validate_content(content: &str) -> RecipeResult<String> {
        if content.trim().is_empty() {
            return Err(RecipeError::validation("content", "Content is required"));
        }

        Ok(content.to_string())
    }

    /// External URLs are accepted as-is; anything else must reference an
    /// image file with an accepted extension
    pub fn validate_image_url(url: &str) -> RecipeResult<()> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Ok(());
        }

        if accepted_extension(url).is_none() {
            return Err(RecipeError::validation(
                "imageUrl",
                "Image URL must be an http(s) address or a .jpeg, .jpg, .gif or .png file",
            ));
        }

        Ok(())
    }

    pub fn validate_category_name(name: &str) -> RecipeResult<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(RecipeError::validation("name", "Category name is required"));
        }

        if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
            return Err(RecipeError::validation(
                "name",
                format!(
                    "Category name is too long (max {} characters)",
                    MAX_CATEGORY_NAME_LENGTH
                ),
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Blank optional text is stored as absent
    pub fn normalize_optional(value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_name_validation() {
        assert_eq!(
            ValidationService::validate_recipe_name("  Soup ").unwrap(),
            "Soup"
        );

        let err = ValidationService::validate_recipe_name("   ").unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let long = "x".repeat(201);
        assert!(ValidationService::validate_recipe_name(&long).is_err());
    }

    #[test]
    fn test_content_validation() {
        assert!(ValidationService::validate_content("Boil water").is_ok());
        assert_eq!(
            ValidationService::validate_content("").unwrap_err().field(),
            Some("content")
        );
    }

    #[test]
    fn test_image_url_validation() {
        assert!(ValidationService::validate_image_url("https://example.com/pic").is_ok());
        assert!(ValidationService::validate_image_url("uploads/recipe-images/a.JPG").is_ok());

        let err = ValidationService::validate_image_url("uploads/recipe-images/a.bmp").unwrap_err();
        assert_eq!(err.field(), Some("imageUrl"));
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(ValidationService::normalize_optional(None), None);
        assert_eq!(
            ValidationService::normalize_optional(Some("  ".to_string())),
            None
        );
        assert_eq!(
            ValidationService::normalize_optional(Some(" Thai ".to_string())),
            Some("Thai".to_string())
        );
    }
}
