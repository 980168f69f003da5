use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            other => Err(anyhow!("Unknown frequency '{}'", other)),
        }
    }
}

/// A recurring user-defined activity tracked for completion.
///
/// `id` is `None` until the store assigns one. Name, description and
/// frequency may change after creation; identity and ownership may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub owner_id: i64,
    pub created_date: NaiveDate,
}

impl Habit {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        frequency: Frequency,
        owner_id: i64,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            frequency,
            owner_id,
            created_date,
        }
    }
}
