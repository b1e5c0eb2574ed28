//=========================================================================
// Asset Paths
//=========================================================================
//
// Resolves static asset paths against the site's deployment base.
//
// The same build must work at a domain root (`/`), under a project
// sub-path (`/portfolio/`) and from a relative base (`./`). Paths are
// joined with exactly one separator regardless of how either side was
// written.
//
//=========================================================================

//=== Constants ===========================================================

/// Background music track, relative to the base path.
pub const SOUNDTRACK_ASSET: &str = "assets/FutureBossaLofi.mp3";

/// UI click sound, relative to the base path.
pub const CLICK_SOUND_ASSET: &str = "assets/bluearchive-click-sound.mp3";

//=== BasePath ============================================================

/// Deployment base of the site, always stored with a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Normalizes `base` so it ends with exactly one `/`.
    ///
    /// An empty string is treated as the domain root.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.len() > 1 && base.ends_with("//") {
            base.pop();
        }
        if !base.ends_with('/') {
            base.push('/');
        }
        Self(base)
    }

    /// The domain root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// A document-relative base, `./`.
    pub fn relative() -> Self {
        Self("./".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an asset path onto the base.
    ///
    /// # Examples
    ///
    /// ```
    /// use afterglow::core::assets::BasePath;
    ///
    /// assert_eq!(BasePath::root().resolve("assets/a.mp3"), "/assets/a.mp3");
    /// assert_eq!(BasePath::new("/portfolio").resolve("/assets/a.mp3"), "/portfolio/assets/a.mp3");
    /// assert_eq!(BasePath::relative().resolve("assets/a.mp3"), "./assets/a.mp3");
    /// ```
    pub fn resolve(&self, asset: &str) -> String {
        let asset = asset.trim_start_matches("./").trim_start_matches('/');
        format!("{}{}", self.0, asset)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolution() {
        assert_eq!(BasePath::root().resolve(SOUNDTRACK_ASSET), "/assets/FutureBossaLofi.mp3");
    }

    #[test]
    fn sub_path_gets_trailing_slash() {
        let base = BasePath::new("/portfolio");
        assert_eq!(base.as_str(), "/portfolio/");
        assert_eq!(
            base.resolve(SOUNDTRACK_ASSET),
            "/portfolio/assets/FutureBossaLofi.mp3"
        );
    }

    #[test]
    fn duplicate_slashes_are_collapsed() {
        let base = BasePath::new("/portfolio//");
        assert_eq!(base.resolve("/assets/x.mp3"), "/portfolio/assets/x.mp3");
    }

    #[test]
    fn relative_base_keeps_dot() {
        assert_eq!(
            BasePath::relative().resolve(CLICK_SOUND_ASSET),
            "./assets/bluearchive-click-sound.mp3"
        );
        assert_eq!(BasePath::new("./").resolve("./assets/x.mp3"), "./assets/x.mp3");
    }

    #[test]
    fn empty_base_is_root() {
        assert_eq!(BasePath::new(""), BasePath::root());
    }

    #[test]
    fn absolute_url_base() {
        let base = BasePath::new("https://example.github.io/portfolio");
        assert_eq!(
            base.resolve(SOUNDTRACK_ASSET),
            "https://example.github.io/portfolio/assets/FutureBossaLofi.mp3"
        );
    }
}
