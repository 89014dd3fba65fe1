//! Checkout delivery profile.
//!
//! The checkout-processing endpoint wants a full customer/delivery form every
//! time. The values rarely change for a repeat order, so they ship as
//! compiled-in defaults and can be overridden from a small TOML file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutProfile {
    pub name: String,
    pub address: String,
    /// Site-internal `<id>_<zip>_<city>` value from the city drop-down.
    pub city_list: String,
    pub zip: String,
    pub city: String,
    pub mobile: String,
    pub phone: String,
    pub email: String,
    pub comments: String,
}

impl Default for CheckoutProfile {
    fn default() -> Self {
        Self {
            name: "Burger Hansen".to_string(),
            address: "Hovedgaden 1".to_string(),
            city_list: "30_2750_Ballerup".to_string(),
            zip: "2750".to_string(),
            city: "Ballerup".to_string(),
            mobile: "12345678".to_string(),
            phone: String::new(),
            email: "burger@example.com".to_string(),
            comments: String::new(),
        }
    }
}

impl CheckoutProfile {
    /// Load a profile from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Format(format!("invalid checkout profile: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_overrides_only_present_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"Anna Jensen\"\nmobile = \"87654321\"").unwrap();

        let profile = CheckoutProfile::load(file.path()).unwrap();
        assert_eq!(profile.name, "Anna Jensen");
        assert_eq!(profile.mobile, "87654321");
        assert_eq!(profile.city, "Ballerup");
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = [unterminated").unwrap();

        assert!(matches!(
            CheckoutProfile::load(file.path()),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = CheckoutProfile::load(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
