use crate::domain::model::{Definition, Manifest, Package};

/// Combines a local definition with its remote manifest.
///
/// Identity fields come from the definition, descriptive fields from the
/// manifest. Authors listed in the definition win over the manifest's.
/// `media` is left empty for the asset publisher to fill in.
pub fn create_package(definition: &Definition, manifest: &Manifest) -> Package {
    Package {
        id: definition.id.clone(),
        name: definition.name.clone(),
        package_type: definition.package_type,
        content: definition.content.clone(),
        repository: definition.repository.clone(),
        description: manifest.description.clone(),
        category: manifest.category.clone(),
        version: manifest.version.clone().unwrap_or_default(),
        download: manifest.download.clone().unwrap_or_default(),
        website: manifest.website.clone(),
        authors: definition
            .authors
            .clone()
            .or_else(|| manifest.authors.clone()),
        media: Vec::new(),
    }
}
