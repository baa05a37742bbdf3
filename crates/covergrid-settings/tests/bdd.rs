//! BDD-style scenario tests for covergrid-settings.
//!
//! Each test follows Given / When / Then structure over real files.

use std::io::Write;

use covergrid_settings::*;
use covergrid_types::Point;
use tempfile::Builder;

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

mod settings_files {
    use super::*;

    #[test]
    fn toml_settings_file_is_loaded() {
        // Given: a TOML settings file raising the enumeration limit
        let file = temp_file(".toml", "enumeration_limit = 1000\n");
        // When: we load it
        let settings = CountSettings::from_file(file.path()).unwrap();
        // Then: the limit applies and the strategy keeps its default
        assert_eq!(settings.limit(), Some(1000));
        assert_eq!(settings.strategy, Strategy::Hybrid);
    }

    #[test]
    fn json_settings_file_can_disable_the_limit() {
        // Given: a JSON settings file asking for unbounded enumeration
        let file = temp_file(".json", r#"{"unbounded_enumeration": true}"#);
        // When: we load it
        let settings = CountSettings::from_file(file.path()).unwrap();
        // Then: there is no limit
        assert_eq!(settings.limit(), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        // Given: a path that does not exist
        let path = std::path::Path::new("definitely/not/here.toml");
        // When: we load it
        let err = CountSettings::from_file(path).unwrap_err();
        // Then: the error is an I/O error
        assert!(matches!(err, SettingsError::IoError(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        // Given: a TOML file with a type error
        let file = temp_file(".toml", "enumeration_limit = \"lots\"\n");
        // When / Then: loading fails with a TOML error
        assert!(matches!(
            CountSettings::from_file(file.path()),
            Err(SettingsError::TomlError(_))
        ));
    }
}

mod request_files {
    use super::*;

    #[test]
    fn toml_request_is_loaded() {
        // Given: a request file in TOML
        let file = temp_file(
            ".toml",
            "width = 10\nheight = 10\nthreshold = 3\nmarkers = [[0, 0], [9, 9]]\n",
        );
        // When: we read it
        let req = read_request(file.path()).unwrap();
        // Then: every field is populated
        assert_eq!(req.width, 10);
        assert_eq!(req.height, 10);
        assert_eq!(req.threshold, 3);
        assert_eq!(req.markers, vec![Point::new(0, 0), Point::new(9, 9)]);
    }

    #[test]
    fn json_request_keeps_out_of_range_markers_for_normalization() {
        // Given: a JSON request whose markers are raw and unvalidated
        let file = temp_file(
            ".json",
            r#"{"width": 10, "height": 10, "threshold": 3, "markers": [[15, 15], [-1, 2], [1, 1]]}"#,
        );
        // When: we read it
        let req = read_request(file.path()).unwrap();
        // Then: nothing is filtered at load time
        assert_eq!(req.markers.len(), 3);
    }

    #[test]
    fn request_with_unknown_extension_is_rejected() {
        // Given: a request file with a .txt extension
        let file = temp_file(".txt", "width = 1");
        // When / Then: the format is rejected before reading
        assert!(matches!(
            read_request(file.path()),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }
}
