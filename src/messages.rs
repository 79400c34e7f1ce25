//! Status and instruction texts shown next to the simulation.

use csv::ReaderBuilder;
use dogma_protocol::{StatusKey, StatusView};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

pub const DEFAULT_LANGUAGE: &str = "en";

/// A status key plus the values for its placeholders. Set on every stage transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub key: StatusKey,
    pub params: BTreeMap<String, String>,
}

impl StatusMessage {
    pub fn new(key: StatusKey) -> Self {
        Self {
            key,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn view(&self, catalog: &MessageCatalog, language: &str) -> StatusView {
        StatusView {
            key: self.key,
            params: self.params.clone(),
            status: catalog.status(self, language),
            instructions: catalog.instructions(self, language),
        }
    }
}

pub struct MessageCatalog {
    values: HashMap<String, String>,
    languages: Vec<String>,
}

impl MessageCatalog {
    pub fn from_text(csv_text: &str) -> Result<Self, csv::Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_text.as_bytes());

        let mut languages: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
        let _ = languages.remove(0); // key column

        let mut values = HashMap::new();
        for record in rdr.records() {
            let record = record?;
            let mut fields = record.iter();
            let Some(key) = fields.next() else {
                continue;
            };
            for (language, text) in languages.iter().zip(fields) {
                values.insert(format!("{language}:{key}"), text.to_string());
            }
        }
        Ok(Self { values, languages })
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn supports(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// Looks up `key`, falling back to English and then to the key itself.
    pub fn get(&self, language: &str, key: &str) -> String {
        if let Some(text) = self.values.get(&format!("{language}:{key}")) {
            return text.to_owned();
        }
        if let Some(text) = self.values.get(&format!("{DEFAULT_LANGUAGE}:{key}")) {
            return text.to_owned();
        }
        warn!("Message {key} not found");
        key.to_string()
    }

    pub fn status(&self, message: &StatusMessage, language: &str) -> String {
        let key = format!("status_{}", message.key.catalog_key());
        Self::fill(self.get(language, &key), &message.params)
    }

    pub fn instructions(&self, message: &StatusMessage, language: &str) -> String {
        let key = format!("instr_{}", message.key.catalog_key());
        Self::fill(self.get(language, &key), &message.params)
    }

    fn fill(mut text: String, params: &BTreeMap<String, String>) -> String {
        for (name, value) in params {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let text = include_str!("../assets/messages.csv");
        Self::from_text(text).expect("Could not read messages.csv")
    }
}
