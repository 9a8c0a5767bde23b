use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ICON: &str = "audio-volume-high";

/// Either an absolute image path or a name from the active icon theme.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

impl Default for IconName {
    fn default() -> Self {
        Self::new(DEFAULT_ICON)
    }
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_ref());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_ref())
        .with_size(256)
        .with_scale(1)
        .find()
}

/// Decodes the icon once so drawing never touches the filesystem.
pub fn load_icon(icon_name: &IconName) -> Option<Pixbuf> {
    let Some(path) = find_icon_path(icon_name) else {
        log::warn!("Icon '{}' not found, drawing without it", icon_name);
        return None;
    };

    Pixbuf::from_file(&path)
        .inspect_err(|e| log::warn!("Failed to decode icon {}: {}", path.display(), e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_resolves_to_nothing() {
        assert_eq!(find_icon_path(&IconName::new("")), None);
    }

    #[test]
    fn test_missing_absolute_path_is_not_looked_up() {
        let name = IconName::new("/nonexistent/voicedial/icon.png");
        assert_eq!(find_icon_path(&name), None);
        assert!(load_icon(&name).is_none());
    }

    #[test]
    fn test_default_is_theme_icon() {
        assert_eq!(IconName::default().as_str(), DEFAULT_ICON);
    }
}
