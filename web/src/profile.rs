use crate::utils::*;
use concentration_core::GameMode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct PlayerName(String);

impl StorageKey for PlayerName {
    const KEY: &'static str = "concentration:player";
}

impl StorageKey for GameMode {
    const KEY: &'static str = "concentration:mode";
}

/// Who is playing and in which mode, as captured by the login form.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Profile {
    pub player: String,
    pub mode: GameMode,
}

impl Profile {
    /// Builds a profile from raw form input; the name must not be blank.
    pub(crate) fn from_form(name: &str, mode: GameMode) -> Option<Self> {
        let name = name.trim();
        is_valid_name(name).then(|| Self {
            player: name.to_owned(),
            mode,
        })
    }

    pub(crate) fn load() -> Option<Self> {
        let stored: Option<PlayerName> = LocalOrDefault::local_or_default();
        let PlayerName(player) = stored?;
        Some(Self {
            player,
            mode: Self::last_mode(),
        })
    }

    pub(crate) fn save(&self) {
        Some(PlayerName(self.player.clone())).local_save();
        Some(self.mode).local_save();
    }

    /// Forgets the player but keeps the last mode as the form default.
    pub(crate) fn forget() {
        Option::<PlayerName>::None.local_save();
    }

    pub(crate) fn last_mode() -> GameMode {
        Option::<GameMode>::local_or_default().unwrap_or_default()
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(is_valid_name("Ana"));
        assert_eq!(Profile::from_form(" \t", GameMode::Timed), None);
    }

    #[test]
    fn form_input_is_trimmed() {
        assert_eq!(
            Profile::from_form("  Ana ", GameMode::Timed),
            Some(Profile {
                player: "Ana".to_owned(),
                mode: GameMode::Timed,
            })
        );
    }

    #[test]
    fn storage_keys_use_project_namespace() {
        assert_eq!(<PlayerName as StorageKey>::KEY, "concentration:player");
        assert_eq!(<GameMode as StorageKey>::KEY, "concentration:mode");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use gloo::storage::{LocalStorage, Storage};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear_storage() {
        LocalStorage::delete(<PlayerName as StorageKey>::KEY);
        LocalStorage::delete(<GameMode as StorageKey>::KEY);
    }

    #[wasm_bindgen_test]
    fn saved_profile_loads_back() {
        clear_storage();
        assert_eq!(Profile::load(), None);

        let profile = Profile::from_form("Ana", GameMode::Timed).unwrap();
        profile.save();

        let stored: String = LocalStorage::get("concentration:player").unwrap();
        assert_eq!(stored, "Ana");
        let stored: GameMode = LocalStorage::get("concentration:mode").unwrap();
        assert_eq!(stored, GameMode::Timed);
        assert_eq!(Profile::load(), Some(profile));
    }

    #[wasm_bindgen_test]
    fn forget_keeps_last_mode() {
        clear_storage();
        assert_eq!(Profile::last_mode(), GameMode::Normal);

        Profile::from_form("Ana", GameMode::Timed).unwrap().save();
        Profile::forget();

        assert_eq!(Profile::load(), None);
        assert_eq!(Profile::last_mode(), GameMode::Timed);
        clear_storage();
    }
}
