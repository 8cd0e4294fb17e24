use serde::{Deserialize, Serialize};

/// The experiment assignment for this installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentFlags {
    pub show_new_user_watermark: bool,
    pub open_untitled_file: bool,
    pub enable_welcome_page: bool,
    pub merge_quick_links: bool,
}

/// Values used when randomisation is suppressed or nothing was assigned.
pub const DEFAULT_EXPERIMENTS: ExperimentFlags = ExperimentFlags {
    show_new_user_watermark: false,
    open_untitled_file: true,
    enable_welcome_page: true,
    merge_quick_links: false,
};

impl Default for ExperimentFlags {
    fn default() -> Self {
        DEFAULT_EXPERIMENTS
    }
}

impl ExperimentFlags {
    /// Every key in `overrides` that is set replaces the current value.
    pub fn with_overrides(mut self, overrides: &ExperimentOverrides) -> Self {
        if let Some(v) = overrides.show_new_user_watermark {
            self.show_new_user_watermark = v;
        }
        if let Some(v) = overrides.open_untitled_file {
            self.open_untitled_file = v;
        }
        if let Some(v) = overrides.enable_welcome_page {
            self.enable_welcome_page = v;
        }
        if let Some(v) = overrides.merge_quick_links {
            self.merge_quick_links = v;
        }
        self
    }
}

/// Partial flag record sourced from `telemetry.experiments`. Unknown keys
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_new_user_watermark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_untitled_file: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_welcome_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_quick_links: Option<bool>,
}
