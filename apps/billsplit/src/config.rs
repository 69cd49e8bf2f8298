use std::{fs, path::Path};

use anyhow::{bail, Context};
use meal_client::DEFAULT_MEAL_API_URL;
use shared::domain::{FriendCount, SplitMode};
use splitter::policy::parse_friend_count;
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub meal_api_url: String,
    pub friends: FriendCount,
    pub split_mode: SplitMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meal_api_url: DEFAULT_MEAL_API_URL.into(),
            friends: FriendCount::default(),
            split_mode: SplitMode::Even,
        }
    }
}

/// Defaults, then the TOML file at `path` if readable, then the environment.
pub fn load_settings(path: &Path) -> Settings {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

fn load_settings_with_env(path: &Path, var: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, var);

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "ignoring unparsable config file");
            return;
        }
    };
    let get = |key: &str| {
        file_cfg.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    };

    if let Some(v) = get("meal_api_url") {
        settings.meal_api_url = v;
    }
    if let Some(v) = get("friends") {
        set_friends(settings, &v);
    }
    if let Some(v) = get("split_mode") {
        set_split_mode(settings, &v);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("BILLSPLIT_MEAL_API_URL") {
        settings.meal_api_url = v;
    }
    if let Some(v) = var("APP__MEAL_API_URL") {
        settings.meal_api_url = v;
    }

    if let Some(v) = var("BILLSPLIT_FRIENDS") {
        set_friends(settings, &v);
    }
    if let Some(v) = var("APP__FRIENDS") {
        set_friends(settings, &v);
    }

    if let Some(v) = var("BILLSPLIT_SPLIT_MODE") {
        set_split_mode(settings, &v);
    }
    if let Some(v) = var("APP__SPLIT_MODE") {
        set_split_mode(settings, &v);
    }
}

fn set_friends(settings: &mut Settings, raw: &str) {
    match parse_friend_count(raw) {
        Ok(friends) => settings.friends = friends,
        Err(err) => warn!(value = raw, error = %err, "ignoring configured friend count"),
    }
}

fn set_split_mode(settings: &mut Settings, raw: &str) {
    match raw.parse::<SplitMode>() {
        Ok(mode) => settings.split_mode = mode,
        Err(err) => warn!(value = raw, error = %err, "ignoring configured split mode"),
    }
}

pub fn validate_meal_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid meal suggestion url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("meal suggestion url must be http or https, got '{raw}'");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file(
            &mut settings,
            "meal_api_url = \"http://localhost:9000/api/\"\nfriends = 4\nsplit_mode = \"proportional\"\n",
        );
        assert_eq!(settings.meal_api_url, "http://localhost:9000/api/");
        assert_eq!(settings.friends.get(), 4);
        assert_eq!(settings.split_mode, SplitMode::Proportional);
    }

    #[test]
    fn app_prefixed_env_wins_over_named_env() {
        let mut settings = Settings::default();
        apply_env(
            &mut settings,
            env_from(&[("BILLSPLIT_FRIENDS", "3"), ("APP__FRIENDS", "5")]),
        );
        assert_eq!(settings.friends.get(), 5);
    }

    #[test]
    fn bad_values_are_ignored() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "friends = 0\nsplit_mode = \"thirds\"\n");
        apply_env(&mut settings, env_from(&[("BILLSPLIT_FRIENDS", "lots")]));
        assert_eq!(settings, Settings::default());

        apply_file(&mut settings, "this is not toml = = =");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("billsplit_config_test_{suffix}.toml"));
        fs::write(&path, "split_mode = \"two-person\"\nfriends = \"2\"\n").expect("write");

        let settings = load_settings_with_env(&path, env_from(&[]));
        assert_eq!(settings.split_mode, SplitMode::TwoPerson);
        assert_eq!(settings.friends.get(), 2);

        let settings = load_settings_with_env(&path, env_from(&[("APP__FRIENDS", "6")]));
        assert_eq!(settings.split_mode, SplitMode::TwoPerson);
        assert_eq!(settings.friends.get(), 6);

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn meal_url_must_be_http() {
        assert!(validate_meal_url("https://foodish-api.com/api/").is_ok());
        assert!(validate_meal_url("ftp://foodish-api.com/api/").is_err());
        assert!(validate_meal_url("not a url").is_err());
    }
}
