// src/constants.rs

/// API path segment appended to the GitLab base URL when none is configured.
pub const DEFAULT_API_VERSION: &str = "/api/v4";

/// Page size requested from list endpoints. GitLab caps `per_page` at 100.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Largest page size GitLab honours.
pub const MAX_PER_PAGE: u32 = 100;

/// Branch cloned for every project unless configured otherwise.
pub const DEFAULT_BRANCH: &str = "master";

/// Bound on group nesting followed by the tree builder.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Header carrying the GitLab access token.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Response header naming the next page of a paginated listing (empty on the last page).
pub const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Username GitLab accepts alongside a personal or OAuth token in HTTPS clone URLs.
pub const TOKEN_URL_USERNAME: &str = "oauth2";

/// Separator used before the summary section.
pub const SUMMARY_SEPARATOR: &str = "---";
