//! Canonical budget categories and the shared default ratio table.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{PlannerError, Result};

const RATIO_TOLERANCE: f64 = 1e-9;

/// The closed set of categories the allocator recognises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BudgetCategory {
    Rent,
    Groceries,
    Insurance,
    Transportation,
    Entertainment,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Clothes,
    Other,
    Savings,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 9] = [
        BudgetCategory::Rent,
        BudgetCategory::Groceries,
        BudgetCategory::Insurance,
        BudgetCategory::Transportation,
        BudgetCategory::Entertainment,
        BudgetCategory::DiningOut,
        BudgetCategory::Clothes,
        BudgetCategory::Other,
        BudgetCategory::Savings,
    ];

    /// Display name, identical to the persisted name.
    pub fn name(self) -> &'static str {
        match self {
            BudgetCategory::Rent => "Rent",
            BudgetCategory::Groceries => "Groceries",
            BudgetCategory::Insurance => "Insurance",
            BudgetCategory::Transportation => "Transportation",
            BudgetCategory::Entertainment => "Entertainment",
            BudgetCategory::DiningOut => "Dining Out",
            BudgetCategory::Clothes => "Clothes",
            BudgetCategory::Other => "Other",
            BudgetCategory::Savings => "Savings",
        }
    }

    /// Exact, case-sensitive lookup. Unknown names are not an error.
    pub fn from_name(name: &str) -> Option<BudgetCategory> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static DEFAULT_TABLE: Lazy<CategoryTable> = Lazy::new(|| CategoryTable {
    ratios: [0.30, 0.12, 0.10, 0.15, 0.05, 0.08, 0.05, 0.05, 0.10],
});

/// Ratio of monthly income assigned to each canonical category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    // Indexed in `BudgetCategory::ALL` order.
    ratios: [f64; 9],
}

impl CategoryTable {
    /// Builds a custom table. Every canonical category must be given exactly
    /// once, ratios must be non-negative and sum to 1.0.
    pub fn new(entries: &[(BudgetCategory, f64)]) -> Result<Self> {
        let mut ratios = [None; 9];
        for (category, ratio) in entries {
            if *ratio < 0.0 || !ratio.is_finite() {
                return Err(PlannerError::Validation(format!(
                    "ratio for {} must be a non-negative number",
                    category
                )));
            }
            let slot = &mut ratios[Self::index(*category)];
            if slot.is_some() {
                return Err(PlannerError::Validation(format!(
                    "ratio for {} given more than once",
                    category
                )));
            }
            *slot = Some(*ratio);
        }

        let mut resolved = [0.0; 9];
        for (idx, category) in BudgetCategory::ALL.iter().enumerate() {
            resolved[idx] = ratios[idx].ok_or_else(|| {
                PlannerError::Validation(format!("missing ratio for {}", category))
            })?;
        }
        let sum: f64 = resolved.iter().sum();
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(PlannerError::Validation(format!(
                "category ratios must sum to 1.0, got {}",
                sum
            )));
        }
        Ok(Self { ratios: resolved })
    }

    /// The process-wide default table.
    pub fn default_table() -> &'static CategoryTable {
        &DEFAULT_TABLE
    }

    pub fn ratio(&self, category: BudgetCategory) -> f64 {
        self.ratios[Self::index(category)]
    }

    /// Categories paired with their ratios in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BudgetCategory, f64)> + '_ {
        BudgetCategory::ALL
            .into_iter()
            .zip(self.ratios.iter().copied())
    }

    fn index(category: BudgetCategory) -> usize {
        category as usize
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}
