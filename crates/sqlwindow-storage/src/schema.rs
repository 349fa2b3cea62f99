use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FieldMode {
    #[default]
    Nullable,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub mode: FieldMode,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType, mode: FieldMode) -> Self {
        Self {
            name: name.into(),
            data_type,
            mode,
        }
    }

    pub fn nullable(name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(name, data_type, FieldMode::Nullable)
    }

    pub fn required(name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(name, data_type, FieldMode::Required)
    }

    pub fn is_nullable(&self) -> bool {
        self.mode == FieldMode::Nullable
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_at(&self, index: usize) -> Result<&Field> {
        self.fields
            .get(index)
            .ok_or_else(|| Error::column_not_found(format!("#{}", index)))
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(&field.name) {
                return Err(Error::schema_mismatch(format!(
                    "Duplicate field name: {}",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// Same field names and types in the same order. Modes are ignored.
    pub fn is_compatible_with(&self, other: &Schema) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.data_type == b.data_type)
    }
}
