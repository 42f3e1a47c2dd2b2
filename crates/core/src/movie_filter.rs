//! Movie list filters and the sort-column allow-list.
//!
//! Raw query-string values arrive as [`MovieFilterParams`] and are validated
//! into [`MovieFilters`] before any SQL is assembled. The sort column cannot
//! be a bound parameter, so only identifiers from [`SortColumn`] ever reach
//! the query text.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Movie columns a caller may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Title,
    ReleaseYear,
    Director,
    Rating,
    IsWatched,
}

impl SortColumn {
    /// Every accepted column, in the order they are listed in error messages.
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Id,
        SortColumn::Title,
        SortColumn::ReleaseYear,
        SortColumn::Director,
        SortColumn::Rating,
        SortColumn::IsWatched,
    ];

    /// Public name accepted in `?sort=`.
    pub fn name(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::ReleaseYear => "release_year",
            SortColumn::Director => "director",
            SortColumn::Rating => "rating",
            SortColumn::IsWatched => "is_watched",
        }
    }

    /// Qualified column reference against the `movies m` alias.
    pub fn sql_column(self) -> &'static str {
        match self {
            SortColumn::Id => "m.id",
            SortColumn::Title => "m.title",
            SortColumn::ReleaseYear => "m.release_year",
            SortColumn::Director => "m.director",
            SortColumn::Rating => "m.rating",
            SortColumn::IsWatched => "m.is_watched",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A validated `ORDER BY` clause. A leading `-` on the raw value selects
/// descending order (`?sort=-rating`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl FromStr for MovieSort {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (direction, name) = match trimmed.strip_prefix('-') {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, trimmed),
        };

        let column = SortColumn::from_name(&name.to_ascii_lowercase()).ok_or_else(|| {
            let allowed: Vec<&str> = SortColumn::ALL.iter().map(|c| c.name()).collect();
            CoreError::Validation(format!(
                "Unknown sort column '{name}'. Allowed: {}",
                allowed.join(", ")
            ))
        })?;

        Ok(MovieSort { column, direction })
    }
}

impl fmt::Display for MovieSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == SortDirection::Descending {
            f.write_str("-")?;
        }
        f.write_str(self.column.name())
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Query parameters exactly as received (`?search=&genre_id=&is_watched=&sort=`).
///
/// Empty strings mean "not given".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilterParams {
    pub search: Option<String>,
    pub genre_id: Option<String>,
    pub is_watched: Option<String>,
    pub sort: Option<String>,
}

/// Validated movie list filters. `None` fields contribute no predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilters {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Movie must be associated with this genre.
    pub genre_id: Option<DbId>,
    pub is_watched: Option<bool>,
    pub sort: Option<MovieSort>,
}

impl MovieFilters {
    /// `true` when no predicate and no ordering is requested.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.genre_id.is_none()
            && self.is_watched.is_none()
            && self.sort.is_none()
    }

    /// `ILIKE` pattern for [`search`](Self::search), if present.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }
}

impl TryFrom<MovieFilterParams> for MovieFilters {
    type Error = CoreError;

    fn try_from(params: MovieFilterParams) -> Result<Self, Self::Error> {
        let search = non_empty(params.search);

        let genre_id = non_empty(params.genre_id)
            .map(|raw| {
                raw.parse::<DbId>()
                    .map_err(|_| CoreError::Validation(format!("Invalid genre id '{raw}'")))
            })
            .transpose()?;

        let is_watched = non_empty(params.is_watched)
            .map(|raw| parse_bool_flag(&raw))
            .transpose()?;

        let sort = non_empty(params.sort)
            .map(|raw| raw.parse::<MovieSort>())
            .transpose()?;

        Ok(MovieFilters {
            search,
            genre_id,
            is_watched,
            sort,
        })
    }
}

/// Parse a boolean flag from a query string.
///
/// Accepts `true`/`false`, `t`/`f` and `1`/`0`, case-insensitively.
pub fn parse_bool_flag(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(CoreError::Validation(format!(
            "Invalid boolean value '{raw}'. Expected true or false"
        ))),
    }
}

/// Build a substring `LIKE` pattern, escaping the wildcard characters in
/// `term` so they match literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
