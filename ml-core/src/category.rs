//! Transaction categories - the closed label set
//!
//! Every label the classifier can emit is one of these variants.
//! Raw labels from training data are standardized through [`Category::from_str`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Bills,
    Income,
    Travel,
    Transfer,
    Insurance,
    Investment,
    Other,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Income,
        Category::Travel,
        Category::Transfer,
        Category::Insurance,
        Category::Investment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Income => "Income",
            Category::Travel => "Travel",
            Category::Transfer => "Transfer",
            Category::Insurance => "Insurance",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label was not a category nor a known synonym
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive, with synonyms folded into their category
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_lowercase().as_str() {
            "food" | "groceries" | "restaurant" | "dining" => Category::Food,
            "transportation" | "transport" | "gas" | "fuel" | "uber" | "lyft" => {
                Category::Transportation
            }
            "entertainment" | "movie" | "streaming" | "gaming" => Category::Entertainment,
            "shopping" | "retail" => Category::Shopping,
            "bills" | "utilities" | "utility" => Category::Bills,
            "income" | "salary" | "paycheck" => Category::Income,
            "travel" | "hotel" | "flight" | "airline" => Category::Travel,
            "transfer" | "atm" => Category::Transfer,
            "insurance" => Category::Insurance,
            "investment" | "stocks" | "retirement" => Category::Investment,
            "other" => Category::Other,
            _ => return Err(UnknownCategory(s.to_string())),
        };
        Ok(category)
    }
}
