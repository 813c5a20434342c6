use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};

/// Tool selector visibility table, in declaration order
///
/// A tool may appear only once; a repeated name is a parse error rather
/// than a silent overwrite.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct StTools(IndexMap<String, ToolVisibility>);

/// Selector flags for one tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolVisibility {
    /// Tool can be selected
    pub enabled: bool,
    /// Tool is pre-selected
    pub default: bool,
}

impl StTools {
    pub fn get(&self, tool: &str) -> Option<&ToolVisibility> {
        self.0.get(tool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToolVisibility)> {
        self.0.iter().map(|(name, visibility)| (name.as_str(), visibility))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tools offered in the selector
    pub fn enabled(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, visibility)| visibility.enabled)
            .map(|(name, _)| name)
            .collect()
    }

    /// Tools selected when the UI starts
    ///
    /// A tool flagged `default` but not `enabled` cannot be used and is
    /// left out.
    pub fn defaults(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, visibility)| visibility.enabled && visibility.default)
            .map(|(name, _)| name)
            .collect()
    }
}

impl<'de> Deserialize<'de> for StTools {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StToolsVisitor;

        impl<'de> Visitor<'de> for StToolsVisitor {
            type Value = StTools;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of tool names to selector flags")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StTools, A::Error> {
                let mut tools = IndexMap::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((name, visibility)) = map.next_entry::<String, ToolVisibility>()? {
                    if tools.contains_key(&name) {
                        return Err(de::Error::custom(format!("duplicate tool \"{name}\" in st_tools")));
                    }
                    tools.insert(name, visibility);
                }

                Ok(StTools(tools))
            }
        }

        deserializer.deserialize_map(StToolsVisitor)
    }
}

impl FromIterator<(String, ToolVisibility)> for StTools {
    fn from_iter<I: IntoIterator<Item = (String, ToolVisibility)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
