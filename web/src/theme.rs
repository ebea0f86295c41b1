use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub(crate) const fn toggled(self) -> Self {
        use Theme::*;
        match self {
            Light => Dark,
            Dark => Light,
        }
    }

    fn update_html(theme: Option<Self>) {
        let Some(html) = gloo::utils::document().document_element() else {
            log::error!("document has no root element");
            return;
        };
        let result = match theme {
            Some(theme) => {
                log::debug!("theme-scheme: {}", theme.scheme());
                html.set_attribute(Self::ATTR_NAME, theme.scheme())
            }
            None => {
                log::debug!("no theme preference");
                html.remove_attribute(Self::ATTR_NAME)
            }
        };
        if let Err(err) = result {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    pub(crate) fn init() {
        Self::update_html(LocalOrDefault::local_or_default());
    }

    /// Switches to the other scheme and remembers the choice.
    pub(crate) fn toggle() -> Self {
        let current: Option<Self> = LocalOrDefault::local_or_default();
        let next = current.unwrap_or_default().toggled();
        Some(next).local_save();
        Self::update_html(Some(next));
        next
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "concentration:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
