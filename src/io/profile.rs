//! Read profile JSON files.
//!
//! A profile file is a JSON object with any subset of the six attributes, in
//! any order. Missing fields are reported when the profile is completed, so a
//! file can be combined with CLI flags that fill the gaps.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::ProfileInput;
use crate::error::AppError;

pub fn read_profile_json(path: &Path) -> Result<ProfileInput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open profile JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid profile JSON '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Region;

    #[test]
    fn reads_partial_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{"region": "southeast", "age": 61}"#).unwrap();

        let input = read_profile_json(&path).unwrap();
        assert_eq!(input.age, Some(61));
        assert_eq!(input.region.as_deref(), Some(Region::Southeast.as_str()));
        assert_eq!(input.bmi, None);
    }

    #[test]
    fn malformed_file_is_a_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, "{ age: ").unwrap();
        assert_eq!(read_profile_json(&path).unwrap_err().exit_code(), 2);
    }
}
