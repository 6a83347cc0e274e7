//! rsharp_options: parse options and language feature gating.
//!
//! Parse options are an immutable value handed to the scanner and parser.
//! They can be built in code or loaded from a JSON file using the same
//! camelCase layout a project file uses.

use rsharp_diagnostics::{messages, DiagnosticMessage};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Errors produced while building parse options from external input.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("unknown language version '{0}'")]
    UnknownLanguageVersion(String),
    #[error("malformed options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read options file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// C# language version. Ordered: later versions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanguageVersion {
    CSharp1,
    CSharp2,
    CSharp3,
    CSharp4,
    CSharp5,
    CSharp6,
    CSharp7,
    CSharp7_1,
    CSharp7_2,
    CSharp7_3,
    CSharp8,
    CSharp9,
    CSharp10,
    CSharp11,
    CSharp12,
    Preview,
}

impl LanguageVersion {
    /// The newest released version; `latest` and `default` resolve to it.
    pub const LATEST: LanguageVersion = LanguageVersion::CSharp12;

    /// The display form used in diagnostics (`7.3`, `10.0`, `preview`).
    pub fn display_name(self) -> &'static str {
        match self {
            LanguageVersion::CSharp1 => "1",
            LanguageVersion::CSharp2 => "2",
            LanguageVersion::CSharp3 => "3",
            LanguageVersion::CSharp4 => "4",
            LanguageVersion::CSharp5 => "5",
            LanguageVersion::CSharp6 => "6",
            LanguageVersion::CSharp7 => "7.0",
            LanguageVersion::CSharp7_1 => "7.1",
            LanguageVersion::CSharp7_2 => "7.2",
            LanguageVersion::CSharp7_3 => "7.3",
            LanguageVersion::CSharp8 => "8.0",
            LanguageVersion::CSharp9 => "9.0",
            LanguageVersion::CSharp10 => "10.0",
            LanguageVersion::CSharp11 => "11.0",
            LanguageVersion::CSharp12 => "12.0",
            LanguageVersion::Preview => "preview",
        }
    }

    /// The message reported when a feature is used under this version and
    /// the feature needs a newer one.
    pub fn feature_unavailable_message(self) -> &'static DiagnosticMessage {
        match self {
            LanguageVersion::CSharp1 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION1,
            LanguageVersion::CSharp2 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION2,
            LanguageVersion::CSharp3 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION3,
            LanguageVersion::CSharp4 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION4,
            LanguageVersion::CSharp5 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION5,
            LanguageVersion::CSharp6 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION6,
            LanguageVersion::CSharp7 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION7,
            LanguageVersion::CSharp7_1 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION7_1,
            LanguageVersion::CSharp7_2 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION7_2,
            LanguageVersion::CSharp7_3 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION7_3,
            LanguageVersion::CSharp8 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION8,
            LanguageVersion::CSharp9 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION9,
            LanguageVersion::CSharp10 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION10,
            LanguageVersion::CSharp11 => &messages::FEATURE_NOT_AVAILABLE_IN_VERSION11,
            LanguageVersion::CSharp12 | LanguageVersion::Preview => {
                &messages::FEATURE_NOT_AVAILABLE_IN_VERSION12
            }
        }
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        LanguageVersion::LATEST
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for LanguageVersion {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = match s.trim().to_ascii_lowercase().as_str() {
            "1" | "1.0" | "iso-1" => LanguageVersion::CSharp1,
            "2" | "2.0" | "iso-2" => LanguageVersion::CSharp2,
            "3" | "3.0" => LanguageVersion::CSharp3,
            "4" | "4.0" => LanguageVersion::CSharp4,
            "5" | "5.0" => LanguageVersion::CSharp5,
            "6" | "6.0" => LanguageVersion::CSharp6,
            "7" | "7.0" => LanguageVersion::CSharp7,
            "7.1" => LanguageVersion::CSharp7_1,
            "7.2" => LanguageVersion::CSharp7_2,
            "7.3" => LanguageVersion::CSharp7_3,
            "8" | "8.0" => LanguageVersion::CSharp8,
            "9" | "9.0" => LanguageVersion::CSharp9,
            "10" | "10.0" => LanguageVersion::CSharp10,
            "11" | "11.0" => LanguageVersion::CSharp11,
            "12" | "12.0" | "latest" | "latestmajor" | "default" => LanguageVersion::LATEST,
            "preview" => LanguageVersion::Preview,
            _ => return Err(OptionsError::UnknownLanguageVersion(s.to_string())),
        };
        Ok(version)
    }
}

impl Serialize for LanguageVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for LanguageVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether the source is a regular file or a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceCodeKind {
    #[default]
    Regular,
    Script,
}

/// How documentation comments are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentationMode {
    None,
    #[default]
    Parse,
    Diagnose,
}

/// Language features gated by version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    AutoPropertyInitializer,
    InterpolatedStrings,
    Tuples,
    RefLocalsReturns,
    ThrowExpressions,
    DefaultLiteral,
    ReadOnlyReferences,
    ReadonlyMembers,
    NullableReferenceTypes,
    DefaultTypeParameterConstraint,
    ImplicitObjectCreation,
    InitOnlySetters,
    FileScopedNamespaces,
    GlobalUsingDirective,
    UnsignedRightShift,
    CheckedUserDefinedOperators,
    RequiredMembers,
    FileTypes,
}

impl Feature {
    /// The user-facing feature name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Feature::AutoPropertyInitializer => "auto property initializer",
            Feature::InterpolatedStrings => "interpolated strings",
            Feature::Tuples => "tuples",
            Feature::RefLocalsReturns => "byref locals and returns",
            Feature::ThrowExpressions => "throw expression",
            Feature::DefaultLiteral => "default literal",
            Feature::ReadOnlyReferences => "readonly references",
            Feature::ReadonlyMembers => "readonly members",
            Feature::NullableReferenceTypes => "nullable reference types",
            Feature::DefaultTypeParameterConstraint => "default type parameter constraints",
            Feature::ImplicitObjectCreation => "target-typed object creation",
            Feature::InitOnlySetters => "init-only setters",
            Feature::FileScopedNamespaces => "file-scoped namespace",
            Feature::GlobalUsingDirective => "global using directive",
            Feature::UnsignedRightShift => "unsigned right shift",
            Feature::CheckedUserDefinedOperators => "checked user-defined operators",
            Feature::RequiredMembers => "required members",
            Feature::FileTypes => "file types",
        }
    }

    pub fn required_version(self) -> LanguageVersion {
        match self {
            Feature::AutoPropertyInitializer | Feature::InterpolatedStrings => {
                LanguageVersion::CSharp6
            }
            Feature::Tuples | Feature::RefLocalsReturns | Feature::ThrowExpressions => {
                LanguageVersion::CSharp7
            }
            Feature::DefaultLiteral => LanguageVersion::CSharp7_1,
            Feature::ReadOnlyReferences => LanguageVersion::CSharp7_2,
            Feature::ReadonlyMembers | Feature::NullableReferenceTypes => LanguageVersion::CSharp8,
            Feature::DefaultTypeParameterConstraint
            | Feature::ImplicitObjectCreation
            | Feature::InitOnlySetters => LanguageVersion::CSharp9,
            Feature::FileScopedNamespaces | Feature::GlobalUsingDirective => {
                LanguageVersion::CSharp10
            }
            Feature::UnsignedRightShift
            | Feature::CheckedUserDefinedOperators
            | Feature::RequiredMembers
            | Feature::FileTypes => LanguageVersion::CSharp11,
        }
    }
}

/// Options controlling a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    pub language_version: LanguageVersion,
    pub documentation_mode: DocumentationMode,
    pub kind: SourceCodeKind,
    pub preprocessor_symbols: Vec<String>,
}

impl ParseOptions {
    /// Regular source at the latest released version.
    pub fn regular() -> Self {
        Self::default()
    }

    /// Regular source with preview features enabled.
    pub fn preview() -> Self {
        Self::default().with_language_version(LanguageVersion::Preview)
    }

    pub fn with_language_version(mut self, version: LanguageVersion) -> Self {
        self.language_version = version;
        self
    }

    pub fn with_kind(mut self, kind: SourceCodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_documentation_mode(mut self, mode: DocumentationMode) -> Self {
        self.documentation_mode = mode;
        self
    }

    pub fn with_preprocessor_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preprocessor_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.language_version >= feature.required_version()
    }

    /// Parse options from a JSON document.
    pub fn from_json(content: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_version_parsing() {
        assert_eq!("7.3".parse::<LanguageVersion>().unwrap(), LanguageVersion::CSharp7_3);
        assert_eq!("10".parse::<LanguageVersion>().unwrap(), LanguageVersion::CSharp10);
        assert_eq!("latest".parse::<LanguageVersion>().unwrap(), LanguageVersion::LATEST);
        assert_eq!("Preview".parse::<LanguageVersion>().unwrap(), LanguageVersion::Preview);
        assert!(matches!(
            "13.5".parse::<LanguageVersion>(),
            Err(OptionsError::UnknownLanguageVersion(v)) if v == "13.5"
        ));
    }

    #[test]
    fn test_language_version_ordering() {
        assert!(LanguageVersion::CSharp7_3 < LanguageVersion::CSharp8);
        assert!(LanguageVersion::Preview > LanguageVersion::LATEST);
        assert_eq!(LanguageVersion::CSharp10.to_string(), "10.0");
    }

    #[test]
    fn test_feature_gating() {
        let old = ParseOptions::regular().with_language_version(LanguageVersion::CSharp9);
        assert!(old.is_feature_enabled(Feature::InitOnlySetters));
        assert!(!old.is_feature_enabled(Feature::FileScopedNamespaces));
        assert!(ParseOptions::preview().is_feature_enabled(Feature::FileTypes));
    }

    #[test]
    fn test_feature_unavailable_message_follows_current_version() {
        assert_eq!(LanguageVersion::CSharp7_3.feature_unavailable_message().code, 8370);
        assert_eq!(LanguageVersion::CSharp9.feature_unavailable_message().code, 8773);
    }

    #[test]
    fn test_parse_options_from_json() {
        let options = ParseOptions::from_json(
            r#"{ "languageVersion": "9", "kind": "Script", "preprocessorSymbols": ["DEBUG"] }"#,
        )
        .unwrap();
        assert_eq!(options.language_version, LanguageVersion::CSharp9);
        assert_eq!(options.kind, SourceCodeKind::Script);
        assert_eq!(options.documentation_mode, DocumentationMode::Parse);
        assert_eq!(options.preprocessor_symbols, vec!["DEBUG".to_string()]);
    }

    #[test]
    fn test_parse_options_json_round_trip() {
        let options = ParseOptions::preview()
            .with_kind(SourceCodeKind::Script)
            .with_preprocessor_symbols(["A", "B"]);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"languageVersion\":\"preview\""));
        assert_eq!(ParseOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_parse_options_bad_version_is_json_error() {
        let err = ParseOptions::from_json(r#"{ "languageVersion": "99" }"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
    }

    #[test]
    fn test_parse_options_missing_file() {
        let err = ParseOptions::from_file("/nonexistent/rsharp.json").unwrap_err();
        assert!(err.to_string().starts_with("cannot read options file"));
    }
}
