use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("expected a numeric argument, got '{0}'")]
    NotANumber(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("metadata key not found: {0}")]
    MetadataNotFound(String),

    #[error("no matching ingredient found: {0}")]
    IngredientNotFound(String),

    #[error("invalid step index {index}: the recipe has {count} steps")]
    StepOutOfRange { index: usize, count: usize },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("cannot convert between {src} and {dest} without a density")]
    CategoryMismatch { src: String, dest: String },

    #[error("no save path: the recipe was not opened from a file")]
    NoSavePath,

    #[error("malformed recipe file {path}: {reason}")]
    MalformedRecipe { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;
