//! Expense records as the budget service stores them.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Opaque identifier assigned by the budget service.
///
/// The service may send ids as JSON numbers or strings; both are held as text so
/// they compare and route identically regardless of wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<i32> for ExpenseId {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ExpenseId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ExpenseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(i64),
            Uint(u64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Int(value) => Ok(Self(value.to_string())),
            Wire::Uint(value) => Ok(Self(value.to_string())),
            Wire::Text(value) if value.trim().is_empty() => {
                Err(de::Error::custom("expense id must not be empty"))
            }
            Wire::Text(value) => Ok(Self(value)),
        }
    }
}

/// A single recorded expense. Immutable once created; removed only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub category: String,
    pub amount: f64,
}

impl Expense {
    pub fn new(
        id: impl Into<ExpenseId>,
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            amount,
        }
    }
}

/// Body of a create-expense request. Carries no id; the service assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub amount: f64,
    pub category: String,
}

impl NewExpense {
    pub fn new(name: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            category: category.into(),
        }
    }
}
