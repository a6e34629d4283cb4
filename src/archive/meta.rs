//! ZHFST `index.xml` metadata (spec section 6.2), parsed with `serde-xml-rs` exactly as
//! the teacher parses it.

use serde::Deserialize;

use crate::error::ArchiveError;

#[derive(Deserialize, Debug, Clone)]
pub struct SpellerMetadata {
    pub info: SpellerMetadataInfo,
    pub acceptor: SpellerMetadataAcceptor,
    pub errmodel: SpellerMetadataErrmodel,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpellerMetadataInfo {
    pub locale: String,
    pub title: String,
    pub description: String,
    pub producer: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpellerMetadataAcceptor {
    #[serde(rename = "type", default)]
    pub type_: String,
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpellerMetadataErrmodel {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl SpellerMetadata {
    pub fn from_str(string: &str) -> Result<SpellerMetadata, ArchiveError> {
        SpellerMetadata::from_bytes(string.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<SpellerMetadata, ArchiveError> {
        use serde_xml_rs::{deserialize, ParserConfig};

        let reader = ParserConfig::new()
            .trim_whitespace(true)
            .ignore_comments(true)
            .coalesce_characters(true)
            .create_reader(bytes)
            .into_inner();

        deserialize(reader).map_err(ArchiveError::Metadata)
    }
}
