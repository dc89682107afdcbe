use super::*;
use observer::RootMargin;
use serde::{Deserialize, Serialize};

/// Class names the behaviors toggle. The page stylesheet keys off these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub active: String,
    pub scrolled: String,
    pub visible: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            active: "active".into(),
            scrolled: "scrolled".into(),
            visible: "fade-in".into(),
        }
    }
}

/// Every constant the page behaviors depend on.
///
/// Missing keys in TOML fall back to [`BehaviorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub navbar_scroll_threshold: f64,
    pub active_link_offset: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub skills_threshold: f64,
    pub typing_text: String,
    pub typing_start_delay_ms: i64,
    pub typing_interval_ms: i64,
    pub skill_fill_delay_ms: i64,
    pub debounce_ms: i64,
    pub loader_visible_ms: i64,
    pub loader_fade_ms: i64,
    pub toast_message: String,
    pub toast_visible_ms: i64,
    pub toast_fade_ms: i64,
    pub parallax_factor: f64,
    pub card_lift_px: f64,
    pub owner_name: String,
    pub owner_email: String,
    pub preload_images: Vec<String>,
    pub timeline_stagger_s: f64,
    pub viewport_height: f64,
    pub timer_step_limit: usize,
    pub classes: ClassNames,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: 50.0,
            active_link_offset: 200.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".into(),
            skills_threshold: 0.5,
            typing_text: "Senior Backend Engineer".into(),
            typing_start_delay_ms: 500,
            typing_interval_ms: 100,
            skill_fill_delay_ms: 200,
            debounce_ms: 100,
            loader_visible_ms: 1000,
            loader_fade_ms: 300,
            toast_message: "Email copied to clipboard!".into(),
            toast_visible_ms: 2000,
            toast_fade_ms: 300,
            parallax_factor: 0.5,
            card_lift_px: 10.0,
            owner_name: "Anirudh Singla".into(),
            owner_email: "anirudhsingla8@gmail.com".into(),
            preload_images: Vec::new(),
            timeline_stagger_s: 0.1,
            viewport_height: 800.0,
            timer_step_limit: 10_000,
            classes: ClassNames::default(),
        }
    }
}

impl BehaviorConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(src).map_err(|err| Error::Config(format!("invalid TOML: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| Error::Config(format!("cannot serialize: {err}")))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("reveal_threshold", self.reveal_threshold),
            ("skills_threshold", self.skills_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        for (name, value) in [
            ("navbar_scroll_threshold", self.navbar_scroll_threshold),
            ("active_link_offset", self.active_link_offset),
            ("parallax_factor", self.parallax_factor),
            ("card_lift_px", self.card_lift_px),
            ("timeline_stagger_s", self.timeline_stagger_s),
            ("viewport_height", self.viewport_height),
        ] {
            if !value.is_finite() {
                return Err(Error::Config(format!("{name} must be finite, got {value}")));
            }
        }

        if self.viewport_height < 0.0 {
            return Err(Error::Config(format!(
                "viewport_height must not be negative, got {}",
                self.viewport_height
            )));
        }

        for (name, value) in [
            ("typing_start_delay_ms", self.typing_start_delay_ms),
            ("typing_interval_ms", self.typing_interval_ms),
            ("skill_fill_delay_ms", self.skill_fill_delay_ms),
            ("debounce_ms", self.debounce_ms),
            ("loader_visible_ms", self.loader_visible_ms),
            ("loader_fade_ms", self.loader_fade_ms),
            ("toast_visible_ms", self.toast_visible_ms),
            ("toast_fade_ms", self.toast_fade_ms),
        ] {
            if value < 0 {
                return Err(Error::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.timer_step_limit == 0 {
            return Err(Error::Config(
                "timer_step_limit requires at least 1 step".into(),
            ));
        }

        let classes = &self.classes;
        for (name, value) in [
            ("classes.active", &classes.active),
            ("classes.scrolled", &classes.scrolled),
            ("classes.visible", &classes.visible),
        ] {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "{name} must be a single class name, got {value:?}"
                )));
            }
        }

        self.reveal_margin()?;
        Ok(())
    }

    pub(crate) fn reveal_margin(&self) -> Result<RootMargin> {
        RootMargin::parse(&self.reveal_root_margin)
    }
}
