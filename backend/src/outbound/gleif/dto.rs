//! DTOs for decoding GLEIF lookup responses.
//!
//! A lookup answers with a JSON array of LEI records. Only the first record's
//! legal name is read; text nodes carry their value under a `$` key.

use serde::Deserialize;

use crate::domain::ports::LegalEntity;

#[derive(Debug, Deserialize)]
pub(super) struct LeiRecordDto {
    #[serde(rename = "Entity")]
    pub(super) entity: EntityDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct EntityDto {
    #[serde(rename = "LegalName")]
    pub(super) legal_name: TextNodeDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct TextNodeDto {
    #[serde(rename = "$")]
    pub(super) value: String,
}

impl From<LeiRecordDto> for LegalEntity {
    fn from(record: LeiRecordDto) -> Self {
        Self {
            legal_name: record.entity.legal_name.value,
        }
    }
}
