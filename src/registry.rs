// ABOUTME: Builds authenticated binary download URLs from a registry host and its netrc token
// ABOUTME: Missing or broken credentials degrade to an unauthenticated URL with a warning

use crate::config::RegistryConfig;
use crate::netrc;
use std::path::Path;

pub const NAVIGATION_NATIVE_NAME: &str = "MapboxNavigationNative";
const NAVIGATION_NATIVE_PATH: &str = "mobile-navigation-native";
const NAVIGATION_NATIVE_FILENAME: &str = "MapboxNavigationNative.xcframework.zip";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryTarget {
    pub name: String,
    pub url: String,
    pub checksum: String,
}

#[derive(Clone, Debug)]
pub struct SdkRegistry {
    config: RegistryConfig,
}

impl SdkRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Password of the first netrc entry for the registry host, if any.
    pub fn netrc_token(&self, netrc_path: &Path) -> Option<String> {
        match netrc::load(Some(netrc_path)) {
            Ok(store) => {
                let token = store.lookup(self.host()).map(str::to_string);
                if token.is_none() {
                    tracing::warn!(
                        "No netrc entry for {} in {}",
                        self.host(),
                        netrc_path.display()
                    );
                }
                token
            }
            Err(e) => {
                tracing::warn!("Could not read credentials for {}: {}", self.host(), e);
                None
            }
        }
    }

    pub fn binary_url(&self, version: &str, path: &str, filename: &str, token: Option<&str>) -> String {
        let mut url = format!(
            "https://{}/{}/{}/releases/{}/packages/{}/{}",
            self.config.host,
            self.config.downloads_path.trim_matches('/'),
            path,
            self.config.platform,
            version,
            filename
        );

        match token {
            Some(token) => {
                url.push_str("?access_token=");
                url.push_str(token);
            }
            None => {
                tracing::warn!(
                    "Token for {} not found; the download will be unauthenticated and may fail with status 401",
                    self.config.host
                );
            }
        }

        url
    }

    pub fn binary_target(
        &self,
        name: &str,
        version: &str,
        path: &str,
        filename: &str,
        checksum: &str,
        token: Option<&str>,
    ) -> BinaryTarget {
        BinaryTarget {
            name: name.to_string(),
            url: self.binary_url(version, path, filename, token),
            checksum: checksum.to_string(),
        }
    }

    pub fn navigation_native_target(&self, version: &str, checksum: &str, token: Option<&str>) -> BinaryTarget {
        self.binary_target(
            NAVIGATION_NATIVE_NAME,
            version,
            NAVIGATION_NATIVE_PATH,
            NAVIGATION_NATIVE_FILENAME,
            checksum,
            token,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn registry() -> SdkRegistry {
        SdkRegistry::new(RegistryConfig::default())
    }

    #[test]
    fn test_binary_url_with_token() {
        let url = registry().binary_url("42.0.1", "mobile-navigation-native", "Native.zip", Some("pk.abc"));

        assert_eq!(
            url,
            "https://api.mapbox.com/downloads/v2/mobile-navigation-native/releases/ios/packages/42.0.1/Native.zip?access_token=pk.abc"
        );
    }

    #[test]
    fn test_binary_url_without_token() {
        init_tracing();

        let url = registry().binary_url("42.0.1", "mobile-navigation-native", "Native.zip", None);

        assert!(!url.contains("access_token"));
        assert!(url.ends_with("/packages/42.0.1/Native.zip"));
    }

    #[test]
    fn test_navigation_native_target() {
        let target = registry().navigation_native_target("42.0.1", "f6ba39b8", Some("t"));

        assert_eq!(target.name, "MapboxNavigationNative");
        assert_eq!(target.checksum, "f6ba39b8");
        assert!(target.url.contains("/mobile-navigation-native/"));
        assert!(target.url.contains("MapboxNavigationNative.xcframework.zip?access_token=t"));
    }

    #[test]
    fn test_custom_registry_config() {
        let registry = SdkRegistry::new(RegistryConfig {
            host: "mirror.example.com".to_string(),
            downloads_path: "/dl/".to_string(),
            platform: "macos".to_string(),
        });

        let url = registry.binary_url("1.0.0", "pkg", "pkg.zip", None);

        assert_eq!(url, "https://mirror.example.com/dl/pkg/releases/macos/packages/1.0.0/pkg.zip");
    }

    #[test]
    fn test_netrc_token_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".netrc");
        fs::write(
            &path,
            "machine github.com login git password gh\nmachine api.mapbox.com login mapbox password sk.token\n",
        )
        .unwrap();

        assert_eq!(registry().netrc_token(&path), Some("sk.token".to_string()));
    }

    #[test]
    fn test_netrc_token_missing_host() {
        init_tracing();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".netrc");
        fs::write(&path, "machine github.com login git password gh\n").unwrap();

        assert_eq!(registry().netrc_token(&path), None);
    }

    #[test]
    fn test_netrc_token_degrades_on_errors() {
        init_tracing();
        let dir = TempDir::new().unwrap();

        assert_eq!(registry().netrc_token(&dir.path().join("missing")), None);

        let malformed = dir.path().join(".netrc");
        fs::write(&malformed, "machine api.mapbox.com login mapbox").unwrap();
        assert_eq!(registry().netrc_token(&malformed), None);
    }
}
