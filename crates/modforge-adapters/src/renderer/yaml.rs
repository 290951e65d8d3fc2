//! Config YAML documents.

use modforge_core::domain::{ConfigBlock, ConfigValue};
use serde_yaml::{Mapping, Value};

use super::RenderError;

/// Serialize one config block as a single-key YAML document.
pub(crate) fn block_document(block: &ConfigBlock) -> Result<String, RenderError> {
    let mut entries = Mapping::new();
    for (key, value) in block.entries {
        let value = match *value {
            ConfigValue::Str(s) => Value::String(s.to_string()),
            ConfigValue::Int(n) => Value::Number(n.into()),
        };
        entries.insert(Value::String((*key).to_string()), value);
    }

    let mut doc = Mapping::new();
    doc.insert(Value::String(block.key.to_string()), Value::Mapping(entries));

    serde_yaml::to_string(&doc).map_err(|source| RenderError::Yaml {
        key: block.key.to_string(),
        source,
    })
}

/// Concatenate documents, separated by a blank line.
pub(crate) fn join_documents(blocks: &[ConfigBlock]) -> Result<String, RenderError> {
    let docs = blocks
        .iter()
        .map(block_document)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(docs.join("\n"))
}
