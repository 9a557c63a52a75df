use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub steiner: SteinerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridConfig {
    #[serde(default = "default_grid_size")]
    pub size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_grid_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SteinerConfig {
    /// Run the Hanan pseudo-node search; `false` keeps the plain MST.
    #[serde(default = "default_augment")]
    pub augment: bool,
    /// Upper bound on committed pseudo-nodes, 0 = unlimited.
    #[serde(default)]
    pub max_passes: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SteinerConfig {
    fn default() -> Self {
        Self {
            augment: default_augment(),
            max_passes: 0,
            parallel: default_parallel(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_input_suffix")]
    pub input_suffix: String,
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    #[serde(default = "default_horizontal_layer")]
    pub horizontal_layer: String,
    #[serde(default = "default_vertical_layer")]
    pub vertical_layer: String,
    #[serde(default = "default_pin_layer")]
    pub pin_layer: String,
    #[serde(default = "default_pin_via_layer")]
    pub pin_via_layer: String,
    #[serde(default = "default_via_layer")]
    pub via_layer: String,
    #[serde(default = "default_verify")]
    pub verify: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            input_suffix: default_input_suffix(),
            output_suffix: default_output_suffix(),
            horizontal_layer: default_horizontal_layer(),
            vertical_layer: default_vertical_layer(),
            pin_layer: default_pin_layer(),
            pin_via_layer: default_pin_via_layer(),
            via_layer: default_via_layer(),
            verify: default_verify(),
        }
    }
}

impl OutputConfig {
    /// `net.xml` -> `net_out.xml`; inputs without the suffix get it appended.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let name = input.to_string_lossy();
        let stem = name
            .strip_suffix(self.input_suffix.as_str())
            .filter(|_| !self.input_suffix.is_empty())
            .unwrap_or(name.as_ref());
        PathBuf::from(format!("{}{}", stem, self.output_suffix))
    }
}

fn default_grid_size() -> u32 {
    150
}

fn default_augment() -> bool {
    true
}

fn default_parallel() -> bool {
    true
}

fn default_input_suffix() -> String {
    ".xml".to_string()
}

fn default_output_suffix() -> String {
    "_out.xml".to_string()
}

fn default_horizontal_layer() -> String {
    "m2".to_string()
}

fn default_vertical_layer() -> String {
    "m3".to_string()
}

fn default_pin_layer() -> String {
    "pins".to_string()
}

fn default_pin_via_layer() -> String {
    "pins_m2".to_string()
}

fn default_via_layer() -> String {
    "m2_m3".to_string()
}

fn default_verify() -> bool {
    true
}
