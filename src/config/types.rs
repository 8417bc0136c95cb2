use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::generator::StateMap;

/// Contents of a state file.
///
/// ```toml
/// exclude = ["legacy"]
///
/// [state]
/// cat = "meow"
/// user_profile = { name = "", age = 0 }
/// legacy = 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    /// Slices declared in `state` but skipped by generation.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Slice name to default value, in file order.
    #[serde(default)]
    pub state: Map<String, Value>,
}

impl StateFile {
    /// Builds the generator input, marking excluded slices.
    pub fn to_state_map(&self) -> StateMap {
        let mut map = StateMap::new();
        for (name, default) in &self.state {
            if self.exclude.iter().any(|excluded| excluded == name) {
                map.exclude(name.clone());
            } else {
                map.insert(name.clone(), default.clone());
            }
        }
        map
    }
}
