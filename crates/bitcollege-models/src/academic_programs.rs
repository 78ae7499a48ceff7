//! Academic program domain models and DTOs.
//!
//! Students and courses point at their program by ID; a program does not
//! hold them.

use bitcollege_core::{DomainError, EntityRules, ensure_valid};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::AcademicProgramId;

/// An academic program such as "BIT - Business Information Technology".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AcademicProgram {
    pub id: AcademicProgramId,
    #[validate(length(min = 1, message = "program_acronym is required"))]
    pub program_acronym: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAcademicProgram {
    pub program_acronym: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAcademicProgram {
    pub program_acronym: Option<String>,
    pub description: Option<String>,
}

impl AcademicProgram {
    pub fn new(dto: NewAcademicProgram) -> Result<Self, DomainError> {
        let program = Self {
            id: AcademicProgramId::new(),
            program_acronym: dto.program_acronym,
            description: dto.description,
        };
        ensure_valid(&program)?;
        Ok(program)
    }

    pub fn apply_update(&mut self, dto: UpdateAcademicProgram) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        if let Some(program_acronym) = dto.program_acronym {
            candidate.program_acronym = program_acronym;
        }
        if let Some(description) = dto.description {
            candidate.description = description;
        }
        ensure_valid(&candidate)?;
        *self = candidate;
        Ok(())
    }
}

impl EntityRules for AcademicProgram {}
