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

use crate::util::hash::KeyHasher;

use self::builder::{SelectorConfigBuilder, SelectorConfigError};

pub mod builder;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectorConfig {
    key_hasher: KeyHasher,
}

impl SelectorConfig {
    pub fn builder() -> SelectorConfigBuilder {
        SelectorConfigBuilder::new()
    }

    pub fn key_hasher(&self) -> KeyHasher {
        self.key_hasher
    }
}

impl From<KeyHasher> for SelectorConfig {
    fn from(key_hasher: KeyHasher) -> Self {
        Self { key_hasher }
    }
}

impl TryFrom<SelectorConfigBuilder> for SelectorConfig {
    type Error = SelectorConfigError;

    fn try_from(builder: SelectorConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
