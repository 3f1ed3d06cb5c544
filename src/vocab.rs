//! Vocabulary constants for Schema.org graphs
//!
//! Well-known fragment ids that identify the singleton roles of a page
//! graph, plus the JSON-LD context every rendered graph carries.

/// JSON-LD `@context` of every rendered graph
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Prefix used to expand short enumeration members (e.g. `InStock`)
pub const SCHEMA_NS: &str = "https://schema.org/";

/// The page being described
pub const WEBPAGE_ID: &str = "#webpage";

/// The site the page belongs to
pub const WEBSITE_ID: &str = "#website";

/// The Organization or Person that owns the site
pub const IDENTITY_ID: &str = "#identity";

/// The identity's logo image
pub const LOGO_ID: &str = "#logo";

pub const BREADCRUMB_ID: &str = "#breadcrumb";
pub const ARTICLE_ID: &str = "#article";
pub const PRODUCT_ID: &str = "#product";
pub const RECIPE_ID: &str = "#recipe";
pub const HOWTO_ID: &str = "#howto";
pub const EVENT_ID: &str = "#event";
pub const SOFTWARE_APP_ID: &str = "#software";

/// Namespaced fragment prefixes for content-hashed ids
pub const PERSON_ID_PREFIX: &str = "#/schema/person/";
pub const ORGANIZATION_ID_PREFIX: &str = "#/schema/organization/";
pub const IMAGE_ID_PREFIX: &str = "#/schema/image/";
pub const VIDEO_ID_PREFIX: &str = "#/schema/video/";
pub const QUESTION_ID_PREFIX: &str = "#/schema/question/";
pub const COMMENT_ID_PREFIX: &str = "#/schema/comment/";
pub const CREATIVE_WORK_ID_PREFIX: &str = "#/schema/creative-work/";
pub const THING_ID_PREFIX: &str = "#/schema/thing/";

/// Maximum headline length accepted by search engines
pub const HEADLINE_MAX_CHARS: usize = 110;

/// Expand a short enumeration member into its schema.org URL.
///
/// `"InStock"` becomes `"https://schema.org/InStock"`; values that already
/// carry a scheme are returned unchanged.
pub fn expand_enum_member(value: &str) -> String {
    if value.contains("://") {
        value.to_string()
    } else {
        format!("{}{}", SCHEMA_NS, value.trim_start_matches('/'))
    }
}
