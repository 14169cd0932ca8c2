//! Datos de referencia de solo lectura: convenios y cursos.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::LocalizedText;

/// Elemento identificable de un conjunto de referencia.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: String,
    pub partner: LocalizedText,
    pub scope: LocalizedText,
    pub signed_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: LocalizedText,
    pub department: LocalizedText,
    pub hours: u32,
}

impl Identified for Agreement {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Course {
    fn id(&self) -> &str {
        &self.id
    }
}
