//! Decoded property snapshot of a configuration object
use crate::bus_client::PropertyMap;

/// Metadata of one configuration object, decoded from its property map
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigProperties {
    /// Display name
    pub name: String,

    /// Validity flag as reported - None if the service never sent one
    pub valid: Option<bool>,

    /// Whether the owner may still mutate the object
    pub readonly: bool,

    /// Whether the object survives past single use
    pub persistent: bool,

    /// Whether the object is consumed after one fetch
    pub single_use: bool,
}

impl ConfigProperties {
    /// Decode from a full property map. Unknown keys and values of the
    /// wrong tag are ignored so maps from newer services still decode.
    pub fn from_map(map: &PropertyMap) -> Self {
        let mut props = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "name" => {
                    if let Some(s) = value.as_str() {
                        props.name = s.to_string();
                    }
                }
                "valid" => {
                    if let Some(b) = value.as_bool() {
                        props.valid = Some(b);
                    }
                }
                "readonly" => {
                    if let Some(b) = value.as_bool() {
                        props.readonly = b;
                    }
                }
                "persistent" => {
                    if let Some(b) = value.as_bool() {
                        props.persistent = b;
                    }
                }
                "single_use" => {
                    if let Some(b) = value.as_bool() {
                        props.single_use = b;
                    }
                }
                _ => {}
            }
        }

        props
    }

    /// Usage mode shown to the user, derived from single_use
    pub fn usage(&self) -> &'static str {
        if self.single_use {
            "Once"
        } else {
            "Multiple times"
        }
    }
}
