//! Default values shared by the engine and the CLI

/// Maximum number of items requested per structured search.
///
/// Results beyond this page are not fetched: pagination is not followed.
pub const SEARCH_PAGE_LIMIT: u32 = 1000;

/// Message set on the result once a sweep has run to completion
pub const COMPLETION_MESSAGE: &str = "LicenseExcluded invoke complete";

/// Default cap on concurrently running region or resource tasks (0 = unbounded)
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;

/// Log level used when `LOG_LEVEL` is unset or unrecognized
pub const DEFAULT_LOG_LEVEL: &str = "info";
