//! Well-known setting keys.
//!
//! Key names the generation pipeline reads by convention. Lookup is
//! case-insensitive, so these constants exist for discoverability and to
//! avoid typos, not because the spelling matters.

/// The host name used when generating absolute links.
pub const HOST: &str = "Host";

/// The root path prepended to generated links.
pub const LINK_ROOT: &str = "LinkRoot";

/// Whether generated absolute links use the `https` scheme.
pub const LINKS_USE_HTTPS: &str = "LinksUseHttps";

/// The site title.
pub const TITLE: &str = "Title";

/// The site description.
pub const DESCRIPTION: &str = "Description";

/// The directory generated output is written to.
pub const OUTPUT_PATH: &str = "OutputPath";

/// The directory used for intermediate artifacts.
pub const TEMP_PATH: &str = "TempPath";

/// The directory used for the generation cache.
pub const CACHE_PATH: &str = "CachePath";

/// Whether the output directory is cleaned before generation.
pub const CLEAN_OUTPUT_PATH: &str = "CleanOutputPath";

/// The ordered list of pipelines to execute.
pub const PIPELINES: &str = "Pipelines";
