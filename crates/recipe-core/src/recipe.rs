use crate::error::{RecipeError, Result};
use crate::units::{self, UnitKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// IngredientAmount
// ---------------------------------------------------------------------------

/// An amount plus its unit, serialized as a two-element `[amount, unit]`
/// array in the recipe file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, String)", into = "(f64, String)")]
pub struct IngredientAmount {
    pub amount: f64,
    pub unit: String,
}

impl IngredientAmount {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    pub fn kind(&self) -> Option<UnitKind> {
        units::kind(&self.unit)
    }

    /// Multiply the amount; the unit is untouched. Applies whether or not
    /// the unit is recognized, and negative factors are not rejected.
    pub fn scale(&mut self, factor: f64) {
        self.amount *= factor;
    }

    /// Convert a recognized mass unit to grams or a recognized volume unit
    /// to milliliters. Unrecognized units are left unchanged.
    pub fn to_metric(&mut self) {
        let Some(kind) = self.kind() else { return };
        let base = kind.base();
        if self.unit == base {
            return;
        }
        if let Ok(amount) = units::convert(base, &self.unit, self.amount) {
            self.amount = amount;
            self.unit = base.to_string();
        }
    }
}

impl From<(f64, String)> for IngredientAmount {
    fn from((amount, unit): (f64, String)) -> Self {
        Self { amount, unit }
    }
}

impl From<IngredientAmount> for (f64, String) {
    fn from(a: IngredientAmount) -> Self {
        (a.amount, a.unit)
    }
}

impl fmt::Display for IngredientAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

pub const META_AUTHOR: &str = "author";
pub const META_SERVES: &str = "serves";
pub const META_SRC_URL: &str = "src_url";

/// In-memory recipe. All mutation goes through named operations so the
/// modified flag stays accurate; fields are not public.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    title: String,
    ingredients: BTreeMap<String, IngredientAmount>,
    steps: Vec<String>,
    metadata: BTreeMap<String, Value>,
    #[serde(skip)]
    modified: bool,
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

impl Recipe {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load a recipe from a JSON file. A file that doesn't parse or lacks
    /// any of the four top-level keys is a data error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut recipe: Recipe =
            serde_json::from_str(&data).map_err(|e| RecipeError::MalformedRecipe {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        recipe.source_path = Some(path.to_path_buf());
        recipe.modified = false;
        Ok(recipe)
    }

    /// Load `path` if it exists, otherwise start an empty recipe bound to
    /// it. Open never fails on a merely missing file.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let mut recipe = Self::new();
            recipe.source_path = Some(path.to_path_buf());
            Ok(recipe)
        }
    }

    /// Write the recipe as pretty JSON to `path`, or to `source_path` when
    /// no path is given. Clears the modified flag on success. Saving to an
    /// explicit path does not rebind `source_path`.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let dest = path
            .or(self.source_path.as_deref())
            .ok_or(RecipeError::NoSavePath)?
            .to_path_buf();
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&dest, data.as_bytes())?;
        self.modified = false;
        Ok(dest)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn ingredients(&self) -> &BTreeMap<String, IngredientAmount> {
        &self.ingredients
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// One step by 1-based position.
    pub fn step(&self, number: usize) -> Result<&str> {
        if number == 0 || number > self.steps.len() {
            return Err(RecipeError::StepOutOfRange {
                index: number,
                count: self.steps.len(),
            });
        }
        Ok(&self.steps[number - 1])
    }

    pub fn metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn metadata_keys(&self) -> impl Iterator<Item = &str> {
        self.metadata.keys().map(String::as_str)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.modified = true;
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.set_metadata(META_AUTHOR, Value::from(author.into()));
    }

    pub fn set_serves(&mut self, serves: i64) {
        self.set_metadata(META_SERVES, Value::from(serves));
    }

    pub fn set_src_url(&mut self, url: impl Into<String>) {
        self.set_metadata(META_SRC_URL, Value::from(url.into()));
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
        self.modified = true;
    }

    pub fn remove_metadata(&mut self, key: &str) -> Result<Value> {
        let value = self
            .metadata
            .remove(key)
            .ok_or_else(|| RecipeError::MetadataNotFound(key.to_string()))?;
        self.modified = true;
        Ok(value)
    }

    /// Insert or overwrite an ingredient. The unit is lowercased; the name
    /// is stored as typed, so names differing only in case coexist.
    pub fn add_ingredient(&mut self, name: impl Into<String>, amount: f64, unit: &str) {
        self.ingredients
            .insert(name.into(), IngredientAmount::new(amount, unit.to_lowercase()));
        self.modified = true;
    }

    pub fn remove_ingredient(&mut self, name: &str) -> Result<IngredientAmount> {
        let removed = self
            .ingredients
            .remove(name)
            .ok_or_else(|| RecipeError::IngredientNotFound(name.to_string()))?;
        self.modified = true;
        Ok(removed)
    }

    /// Multiply every ingredient amount by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for amount in self.ingredients.values_mut() {
            amount.scale(factor);
        }
        self.modified = true;
    }

    /// Convert one ingredient (by name) or all ingredients to metric base
    /// units. Unconvertible units are silently left alone; an unknown
    /// ingredient name is a lookup error.
    pub fn to_metric(&mut self, name: Option<&str>) -> Result<()> {
        match name {
            Some(name) => {
                let amount = self
                    .ingredients
                    .get_mut(name)
                    .ok_or_else(|| RecipeError::IngredientNotFound(name.to_string()))?;
                amount.to_metric();
            }
            None => {
                for amount in self.ingredients.values_mut() {
                    amount.to_metric();
                }
            }
        }
        self.modified = true;
        Ok(())
    }

    /// Append a step, or insert it at a 1-based position. Positions past
    /// the end clamp to append.
    pub fn add_step(&mut self, text: impl Into<String>, position: Option<usize>) {
        let text = text.into();
        match position {
            Some(pos) => {
                let idx = pos.saturating_sub(1).min(self.steps.len());
                self.steps.insert(idx, text);
            }
            None => self.steps.push(text),
        }
        self.modified = true;
    }

    /// Remove the step at a 1-based position, or the last step when no
    /// position is given.
    pub fn remove_step(&mut self, position: Option<usize>) -> Result<String> {
        let count = self.steps.len();
        let idx = match position {
            Some(pos) => {
                if pos == 0 || pos > count {
                    return Err(RecipeError::StepOutOfRange { index: pos, count });
                }
                pos - 1
            }
            None => count
                .checked_sub(1)
                .ok_or(RecipeError::StepOutOfRange { index: 0, count })?,
        };
        let removed = self.steps.remove(idx);
        self.modified = true;
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// The recipe as Markdown: title heading, ingredient bullets, numbered
    /// instructions.
    pub fn render_markdown(&self) -> String {
        let mut out = Vec::new();
        out.push(format!("# {}", self.title));
        out.push(String::new());
        out.push("## Ingredients".to_string());
        for (name, amount) in &self.ingredients {
            out.push(format!("- {amount} {name}"));
        }
        out.push(String::new());
        out.push("## Instructions".to_string());
        for (i, step) in self.steps.iter().enumerate() {
            out.push(format!("{}. {step}", i + 1));
        }
        out.join("\n")
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_markdown())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
