//! Build metadata and algorithm API version accessors, read from the
//! `version.rs` the build script generates.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Date-shaped API version (`YYYYMMDD`) the host and built-ins are built for
pub fn get_api_version() -> u32 {
    ALGORITHM_API_VERSION
}

/// Major part (year) of an API version. Versions sharing a major are compatible.
pub fn major_version(api_version: u32) -> u32 {
    api_version / 10000
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}
