/// LIMIT/OFFSET parameters for SQL queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    /// Page-based pagination; `None` unless both page and per_page are at least 1
    pub fn for_page(page: i64, per_page: i64) -> Option<Self> {
        if page < 1 || per_page < 1 {
            return None;
        }

        // Offsets saturate at i64::MAX so they still fit a signed BIGINT
        Some(Self {
            limit: Some(per_page as u64),
            offset: Some((page - 1).saturating_mul(per_page) as u64),
        })
    }

    /// Create pagination with only limit
    pub fn limit_only(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    /// Create pagination with only offset
    pub fn offset_only(offset: u64) -> Self {
        Self {
            limit: None,
            offset: Some(offset),
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }

    /// Calculate total pages given a total count
    pub fn total_pages(&self, total_count: u64) -> u64 {
        match self.limit {
            Some(limit) if limit > 0 => total_count.div_ceil(limit),
            _ => 1,
        }
    }

    /// Get current page number (1-indexed)
    pub fn current_page(&self) -> u64 {
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) if limit > 0 => (offset / limit) + 1,
            _ => 1,
        }
    }
}

/// Loosely coerces a page argument to an integer.
///
/// Text keeps its leading sign and digits (`"12abc"` is 12) and saturates at
/// the `i64` bounds; anything unparseable becomes 0, which downstream treats
/// as "no pagination".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageArg {
    Number(i64),
    Text(String),
}

impl PageArg {
    pub fn as_int(&self) -> i64 {
        match self {
            PageArg::Number(n) => *n,
            PageArg::Text(text) => leading_integer(text),
        }
    }
}

fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }

    let signed = if negative { format!("-{digits}") } else { digits };
    match signed.parse::<i64>() {
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

impl From<i64> for PageArg {
    fn from(value: i64) -> Self {
        PageArg::Number(value)
    }
}

impl From<i32> for PageArg {
    fn from(value: i32) -> Self {
        PageArg::Number(i64::from(value))
    }
}

impl From<u32> for PageArg {
    fn from(value: u32) -> Self {
        PageArg::Number(i64::from(value))
    }
}

impl From<&str> for PageArg {
    fn from(value: &str) -> Self {
        PageArg::Text(value.to_string())
    }
}

impl From<String> for PageArg {
    fn from(value: String) -> Self {
        PageArg::Text(value)
    }
}
