use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Which definition tree an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    System,
    Module,
}

impl PackageType {
    /// Processing order: systems before modules.
    pub const ALL: [PackageType; 2] = [PackageType::System, PackageType::Module];

    /// Name of the definition root directory for this type.
    pub fn directory(&self) -> &'static str {
        match self {
            PackageType::System => "systems",
            PackageType::Module => "modules",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageType::System => write!(f, "system"),
            PackageType::Module => write!(f, "module"),
        }
    }
}

/// Raw contents of a `<name>/<name>.yaml` descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct Descriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub repository: Option<String>,
    /// Manifest URL.
    pub package: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub media: Vec<String>,
}

impl Descriptor {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }
}

/// A loaded local package definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub id: String,
    pub name: String,
    pub package_type: PackageType,
    pub content: Option<serde_json::Value>,
    pub repository: Option<String>,
    pub package: String,
    pub authors: Option<Vec<String>>,
    pub media: Vec<String>,
    /// Directory of the definition relative to the source root, e.g. `systems/sys1`.
    pub path: PathBuf,
}

impl Definition {
    pub fn from_descriptor(descriptor: Descriptor, path: PathBuf, package_type: PackageType) -> Self {
        Self {
            id: descriptor.id,
            name: descriptor.name,
            package_type,
            content: descriptor.content,
            repository: descriptor.repository,
            package: descriptor.package,
            authors: descriptor.authors,
            media: descriptor.media,
            path,
        }
    }
}

/// Remote manifest document. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub download: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub authors: Option<Vec<String>>,
}

impl Manifest {
    /// A manifest can be published only with a non-empty version and download.
    pub fn is_complete(&self) -> bool {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.version) && present(&self.download)
    }
}

/// Strings and numbers are kept as text; any other JSON shape reads as absent.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Accepts a single author, a list of names, or a list of `{ name: ... }`
/// entries. Entries without a usable name are dropped.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    fn author_name(value: Value) -> Option<String> {
        match value {
            Value::String(name) => Some(name),
            Value::Object(mut fields) => match fields.remove("name") {
                Some(Value::String(name)) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    let authors = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => entries.into_iter().filter_map(author_name).collect(),
        Some(value) => author_name(value).into_iter().collect(),
        None => Vec::new(),
    };

    Ok(if authors.is_empty() { None } else { Some(authors) })
}

/// One entry of the published catalog. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub version: String,
    pub download: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    /// Public URLs of the published media, in descriptor order.
    #[serde(default)]
    pub media: Vec<String>,
}
