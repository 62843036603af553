//! Request profiles from a JSON file

use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{InputError, InputResult};
use warmer_config::validation::validate_header_name;
use warmer_engine::Profile;

/// Load the profile list.
///
/// A missing file yields no profiles (the engine then runs its default
/// profile). Entries without a usable name, with non-string values, or with
/// headers or cookies that could not be sent on the wire are skipped with a
/// warning; the order of the remaining entries is kept.
pub fn load_profiles(path: impl AsRef<Path>) -> InputResult<Vec<Profile>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(
            "No profiles file found at {}, using the default profile",
            path.display()
        );
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(entries) = value else {
        return Err(InputError::InvalidProfiles {
            path: path.to_path_buf(),
            found: json_kind(&value).to_string(),
        });
    };

    let mut profiles = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Profile>(entry) {
            Ok(profile) => {
                if let Err(reason) = check_profile(&profile) {
                    warn!("Skipping profile #{}: {}", position + 1, reason);
                    continue;
                }
                debug!(
                    "Loaded profile '{}' ({} headers, {} cookies)",
                    profile.name,
                    profile.headers.len(),
                    profile.cookies.len()
                );
                profiles.push(profile);
            }
            Err(e) => warn!("Skipping profile #{}: {}", position + 1, e),
        }
    }

    Ok(profiles)
}

/// Reject profiles whose headers or cookies cannot form a valid request
fn check_profile(profile: &Profile) -> Result<(), String> {
    if profile.name.trim().is_empty() {
        return Err("empty name".to_string());
    }

    let domain = format!("profile '{}'", profile.name);
    for (name, value) in &profile.headers {
        validate_header_name(name, "header", &domain).map_err(|e| e.to_string())?;
        if value.chars().any(|c| c.is_control() && c != '\t') {
            return Err(format!("header '{}' has control characters in its value", name));
        }
    }

    for (name, value) in &profile.cookies {
        validate_header_name(name, "cookie", &domain).map_err(|e| e.to_string())?;
        if value.chars().any(|c| c.is_control() || c == ';') {
            return Err(format!(
                "cookie '{}' value must not contain control characters or ';'",
                name
            ));
        }
    }

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_profile() {
        let good = Profile::new("mobile")
            .with_header("User-Agent", "Mobile/2.0")
            .with_cookie("region", "eu");
        assert!(check_profile(&good).is_ok());

        assert!(check_profile(&Profile::new(" ")).is_err());
        assert!(check_profile(&Profile::new("a").with_header("Bad Header", "v")).is_err());
        assert!(check_profile(&Profile::new("a").with_header("X-Test", "v\n")).is_err());
        assert!(check_profile(&Profile::new("a").with_cookie("sid", "a;b")).is_err());
        assert!(check_profile(&Profile::new("a").with_cookie("bad name", "v")).is_err());
    }
}
