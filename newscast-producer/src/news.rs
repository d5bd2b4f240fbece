// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ItemGenerator;
use chrono::{Local, NaiveDate};
use newscast_error::GenerateError;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y/%m/%d";

/// One news story as served to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsItem {
    pub content: String,
    /// Publication date, `YYYY/MM/DD`
    pub date: String,
    pub headline: String,
    pub icon: String,
    pub source: String,
}

/// Generates placeholder stories numbered by sequence.
///
/// Dates come from the local wall clock unless pinned with
/// [`with_date`](Self::with_date).
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsGenerator {
    date: Option<NaiveDate>,
}

impl NewsGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { date: None }
    }

    /// Stamp every story with `date` instead of today's date.
    #[must_use]
    pub const fn with_date(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }

    fn today(&self) -> String {
        self.date
            .unwrap_or_else(|| Local::now().date_naive())
            .format(DATE_FORMAT)
            .to_string()
    }
}

impl ItemGenerator<NewsItem> for NewsGenerator {
    fn generate(&self, sequence: u64) -> Result<NewsItem, GenerateError> {
        Ok(NewsItem {
            content: format!("The content for the news story {sequence}."),
            date: self.today(),
            headline: format!("News story {sequence}"),
            icon: String::new(),
            source: format!("Source {sequence}"),
        })
    }
}
