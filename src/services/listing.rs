use sea_orm::{
    ColumnTrait, Condition, DbBackend, Order,
    sea_query::{Expr, ExprTrait, Func, LikeExpr},
};
use serde::Deserialize;

const LIKE_ESCAPE: char = '\\';

/// Sort order offered on every resource page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    DateAsc,
    #[default]
    DateDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// Unknown or missing keys fall back to newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name_asc") => SortKey::NameAsc,
            Some("name_desc") => SortKey::NameDesc,
            Some("date_asc") => SortKey::DateAsc,
            _ => SortKey::DateDesc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::DateDesc => "date_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
            SortKey::DateAsc => "Oldest first",
            SortKey::DateDesc => "Newest first",
        }
    }

    pub fn order<C: ColumnTrait>(self, name: C, created_at: C) -> (C, Order) {
        match self {
            SortKey::NameAsc => (name, Order::Asc),
            SortKey::NameDesc => (name, Order::Desc),
            SortKey::DateAsc => (created_at, Order::Asc),
            SortKey::DateDesc => (created_at, Order::Desc),
        }
    }
}

/// Raw page query string as submitted by the filter form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub q: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: SortKey,
}

impl ListQuery {
    pub fn new(search: Option<&str>, sort: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self {
            search,
            sort: SortKey::parse(sort),
        }
    }

    pub fn from_params(params: &ListParams) -> Self {
        Self::new(params.query.as_deref(), params.sort.as_deref())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Case-insensitive substring match: `LOWER(column) LIKE '%needle%'`.
pub fn contains_ci<C>(column: C, needle: &str) -> Condition
where
    C: ColumnTrait,
{
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
    )
}

/// SQLite's `LOWER` folds ASCII only, so a non-ASCII capital in a stored
/// name would never match there. Those backends filter rows in memory.
pub fn folds_case_in_sql(backend: DbBackend) -> bool {
    !matches!(backend, DbBackend::Sqlite)
}

/// In-memory counterpart of [`contains_ci`], with full Unicode lowercasing.
pub fn matches_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
