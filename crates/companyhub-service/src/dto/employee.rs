//! Employee DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use companyhub_entity::Employee;

use super::validation::not_blank;
use crate::shaping::Identifiable;

/// Employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    /// Employee id.
    pub id: Uuid,
    /// Employee name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Job title.
    pub position: String,
}

impl From<&Employee> for EmployeeDto {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            age: employee.age,
            position: employee.position.clone(),
        }
    }
}

impl Identifiable for EmployeeDto {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Payload for creating an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForCreationDto {
    /// Employee name.
    #[validate(
        required(message = "Employee name is a required field."),
        custom(function = "not_blank", message = "Employee name is a required field."),
        length(max = 30, message = "Maximum length for the Name is 30 characters.")
    )]
    pub name: Option<String>,
    /// Age in years.
    #[validate(
        required(message = "Age is a required field."),
        range(min = 18, message = "Age is required and it can't be lower than 18")
    )]
    pub age: Option<i32>,
    /// Job title.
    #[validate(
        required(message = "Position is a required field."),
        custom(function = "not_blank", message = "Position is a required field."),
        length(max = 20, message = "Maximum length for the Position is 20 characters.")
    )]
    pub position: Option<String>,
}

impl EmployeeForCreationDto {
    /// Build the employee entity from a validated payload.
    pub fn into_entity(self, company_id: Uuid) -> Employee {
        Employee::new(
            company_id,
            self.name.unwrap_or_default(),
            self.age.unwrap_or_default(),
            self.position.unwrap_or_default(),
        )
    }
}

/// Payload for replacing or patching an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForUpdateDto {
    /// Employee name.
    #[validate(
        required(message = "Employee name is a required field."),
        custom(function = "not_blank", message = "Employee name is a required field."),
        length(max = 30, message = "Maximum length for the Name is 30 characters.")
    )]
    pub name: Option<String>,
    /// Age in years.
    #[validate(
        required(message = "Age is a required field."),
        range(min = 18, message = "Age is required and it can't be lower than 18")
    )]
    pub age: Option<i32>,
    /// Job title.
    #[validate(
        required(message = "Position is a required field."),
        custom(function = "not_blank", message = "Position is a required field."),
        length(max = 20, message = "Maximum length for the Position is 20 characters.")
    )]
    pub position: Option<String>,
}

impl EmployeeForUpdateDto {
    /// Copy the validated fields onto `employee`.
    pub fn apply_to(self, employee: &mut Employee) {
        employee.name = self.name.unwrap_or_default();
        employee.age = self.age.unwrap_or_default();
        employee.position = self.position.unwrap_or_default();
    }
}

impl From<&Employee> for EmployeeForUpdateDto {
    fn from(employee: &Employee) -> Self {
        Self {
            name: Some(employee.name.clone()),
            age: Some(employee.age),
            position: Some(employee.position.clone()),
        }
    }
}
