//! Event category labels and their numeric codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Code for a label outside the fixed table.
pub const UNMAPPED_CATEGORY_CODE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Exhibition,
    Performance,
    GameSports,
    Dessert,
    NoodleTeppanyaki,
    FastFood,
    Drink,
    RiceDish,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Exhibition,
        Category::Performance,
        Category::GameSports,
        Category::Dessert,
        Category::NoodleTeppanyaki,
        Category::FastFood,
        Category::Drink,
        Category::RiceDish,
    ];

    pub fn code(self) -> u8 {
        match self {
            Category::Exhibition => 1,
            Category::Performance => 2,
            Category::GameSports => 3,
            Category::Dessert => 4,
            Category::NoodleTeppanyaki => 5,
            Category::FastFood => 6,
            Category::Drink => 7,
            Category::RiceDish => 8,
        }
    }

    /// Label as it appears on the submission form.
    pub fn form_label(self) -> &'static str {
        match self {
            Category::Exhibition => "展示・体験・販売",
            Category::Performance => "パフォーマンス",
            Category::GameSports => "ゲーム・スポーツ",
            Category::Dessert => "デザート",
            Category::NoodleTeppanyaki => "鉄板・麺類",
            Category::FastFood => "ファストフード",
            Category::Drink => "ドリンク",
            Category::RiceDish => "ご飯もの",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            Category::Exhibition => "exhibition",
            Category::Performance => "performance",
            Category::GameSports => "game_sports",
            Category::Dessert => "dessert",
            Category::NoodleTeppanyaki => "noodle_teppanyaki",
            Category::FastFood => "fast_food",
            Category::Drink => "drink",
            Category::RiceDish => "rice_dish",
        }
    }

    /// Map a submitted label (form label or alias) to a category.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.form_label() == label || c.alias().eq_ignore_ascii_case(label))
    }
}

/// Numeric code for a submitted label; unknown labels map to 0.
pub fn category_code(label: &str) -> u8 {
    Category::from_label(label)
        .map(Category::code)
        .unwrap_or(UNMAPPED_CATEGORY_CODE)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| format!("Unknown category: {}", s))
    }
}
