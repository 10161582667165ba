use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel identifier for licenses that could not be determined.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// A dependency to detect a license for. At most one of `license_id` and
/// `license_text` is usually set; `license_id` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyInput {
    pub name: String,
    pub version: Option<String>,
    pub license_id: Option<String>,
    pub license_text: Option<String>,
}

/// A standalone license-like file to run text detection over.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInput {
    pub filename: String,
    pub content: String,
}

/// Input document for detection: dependencies, files, or both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectInput {
    pub dependencies: Option<Vec<DependencyInput>>,
    pub files: Option<Vec<FileInput>>,
}

/// Self-reported reliability of a license determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// How a detected license was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseSource {
    /// Explicit identifier from dependency metadata.
    DependencyMetadata,
    /// Matched against provided license text.
    LicenseTextAnalysis,
    /// No identifier and no text were supplied.
    NoData,
    /// Text detection over a named file.
    File(String),
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::DependencyMetadata => write!(f, "dependency_metadata"),
            LicenseSource::LicenseTextAnalysis => write!(f, "license_text_analysis"),
            LicenseSource::NoData => write!(f, "no_data"),
            LicenseSource::File(name) => write!(f, "file:{}", name),
        }
    }
}

// Wire form is the display string ("dependency_metadata", "file:<name>", ...).
impl Serialize for LicenseSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LicenseSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "dependency_metadata" => LicenseSource::DependencyMetadata,
            "license_text_analysis" => LicenseSource::LicenseTextAnalysis,
            "no_data" => LicenseSource::NoData,
            other => match other.strip_prefix("file:") {
                Some(name) => LicenseSource::File(name.to_string()),
                None => {
                    return Err(serde::de::Error::custom(format!(
                        "unknown license source: {other}"
                    )))
                }
            },
        })
    }
}

/// One resolved license determination. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedLicense {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub license_id: String,
    pub confidence: Confidence,
    pub source: LicenseSource,
}

/// Output of [`crate::detect::detect`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionReport {
    pub detected: Vec<DetectedLicense>,
    pub warnings: Vec<String>,
}

/// A license to evaluate against policy, typically built from a
/// [`DetectedLicense`].
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseInfo {
    pub name: Option<String>,
    pub license_id: String,
}

impl From<&DetectedLicense> for LicenseInfo {
    fn from(d: &DetectedLicense) -> Self {
        LicenseInfo {
            name: Some(d.name.clone()),
            license_id: d.license_id.clone(),
        }
    }
}

/// Compliance policy. A pure input value; absent fields impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Policy {
    pub allowed: Option<Vec<String>>,
    pub denied: Option<Vec<String>>,
    pub copyleft_ok: Option<bool>,
}

/// One policy breach. An evaluated license produces at most one violation.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub name: String,
    pub license_id: String,
    pub reason: String,
}

/// Output of [`crate::policy::evaluate`].
#[derive(Debug, Clone, Serialize)]
pub struct CompatReport {
    pub compatible: bool,
    pub violations: Vec<Violation>,
    pub warnings: Vec<String>,
}
