/*
 * Copyright 2024 Thaddeus Treloar
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::{
    collections::HashMap,
    io::{self, Read},
};

use tracing::warn;

use crate::util::hash::KeyHasher;

use super::SelectorConfig;

pub(super) const KEY_HASHER: &str = "key.hasher";

const KNOWN_FIELDS: [&str; 1] = [KEY_HASHER];

const DEFAULT_FIELDS: [(&str, &str); 1] = [(KEY_HASHER, "murmur2")];

#[derive(Debug, Clone, Default, derive_more::From)]
pub struct SelectorConfigBuilder {
    pub(crate) config_map: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SelectorConfigError {
    #[error("SelectorConfigError::InvalidValue: '{}' is not a valid value for '{}'", value, key)]
    InvalidValue {
        key: &'static str,
        value: String,
    },
    #[error("SelectorConfigError::ReadConfigError: {0}")]
    ReadConfigError(#[from] io::Error),
    #[error("SelectorConfigError::ParseConfigError: {0}")]
    ParseConfigError(#[from] serde_json::Error),
}

impl SelectorConfigBuilder {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    /// Reads a flat JSON object of string keys and values, e.g.
    /// `{"key.hasher": "crc32"}`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SelectorConfigError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        let config_map = serde_json::from_str::<HashMap<String, String>>(&raw)?;

        Ok(Self::from(config_map))
    }

    pub fn contains<'a, K: Into<&'a str>>(&self, key: K) -> bool {
        self.config_map.contains_key(key.into())
    }

    pub fn get<'a, K: Into<&'a str>>(&self, key: K) -> Option<&str> {
        self.config_map.get(key.into()).map(String::as_str)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.config_map.insert(key.into(), value.into());

        self
    }

    pub fn remove<'a, K: Into<&'a str>>(&mut self, key: K) -> &mut Self {
        self.config_map.remove(key.into());

        self
    }

    pub fn key_hasher(&mut self, key_hasher: KeyHasher) -> &mut Self {
        self.set(KEY_HASHER, key_hasher.name())
    }

    fn set_missing_defaults(mut self) -> Self {
        let missing_defaults = DEFAULT_FIELDS
            .into_iter()
            .filter(|(name, _)| !self.config_map.contains_key(*name))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<Vec<_>>();

        self.config_map.extend(missing_defaults);

        self
    }

    fn clean_config(mut self) -> Self {
        self.config_map.retain(|key, _| {
            let known = KNOWN_FIELDS.contains(&key.as_str());

            if !known {
                warn!("Unknown config '{}' set for partition selector. Ignoring.", key);
            }

            known
        });

        self
    }

    fn parse_key_hasher(&self) -> Result<KeyHasher, SelectorConfigError> {
        let value = self.config_map.get(KEY_HASHER).map(String::as_str).unwrap_or_default();

        value
            .parse::<KeyHasher>()
            .map_err(|_| SelectorConfigError::InvalidValue {
                key: KEY_HASHER,
                value: value.to_owned(),
            })
    }

    pub fn build(self) -> Result<SelectorConfig, SelectorConfigError> {
        let cleaned = self.clean_config().set_missing_defaults();

        Ok(SelectorConfig {
            key_hasher: cleaned.parse_key_hasher()?,
        })
    }
}

impl From<&HashMap<String, String>> for SelectorConfigBuilder {
    fn from(config_map: &HashMap<String, String>) -> Self {
        Self {
            config_map: config_map.clone(),
        }
    }
}
