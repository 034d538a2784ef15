/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Currency symbol prefixed to non-zero course prices
pub const CURRENCY_SYMBOL: &str = "$";

/// Label shown instead of a price for free courses
pub const FREE_PRICE_LABEL: &str = "Free";

/// Fallback text for relations that no longer resolve
pub const MISSING_RELATION_LABEL: &str = "N/A";

/// Shown for courses without a category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Minimum accepted password length for user forms
pub const MIN_PASSWORD_LENGTH: u64 = 8;
