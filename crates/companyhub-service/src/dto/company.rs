//! Company DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use companyhub_entity::{Company, Employee};

use super::employee::EmployeeForCreationDto;
use super::validation::not_blank;
use crate::shaping::Identifiable;

/// Company as returned by the v1 API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    /// Company id.
    pub id: Uuid,
    /// Company name.
    pub name: String,
    /// Address followed by country.
    pub full_address: String,
}

impl From<&Company> for CompanyDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            full_address: company.full_address(),
        }
    }
}

impl Identifiable for CompanyDto {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Payload for creating a company, optionally with its first employees.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForCreationDto {
    /// Company name.
    #[validate(
        required(message = "Company name is a required field."),
        custom(function = "not_blank", message = "Company name is a required field."),
        length(max = 60, message = "Maximum length for the Name is 60 characters.")
    )]
    pub name: Option<String>,
    /// Street address.
    #[validate(
        required(message = "Company address is a required field."),
        custom(function = "not_blank", message = "Company address is a required field."),
        length(max = 60, message = "Maximum length for the Address is 60 characters.")
    )]
    pub address: Option<String>,
    /// Country.
    #[validate(
        required(message = "Country is a required field."),
        custom(function = "not_blank", message = "Country is a required field.")
    )]
    pub country: Option<String>,
    /// Employees created together with the company.
    #[validate(nested)]
    pub employees: Option<Vec<EmployeeForCreationDto>>,
}

impl CompanyForCreationDto {
    /// Build the company entity and its employees from a validated payload.
    pub fn into_entities(self) -> (Company, Vec<Employee>) {
        let company = Company::new(
            self.name.unwrap_or_default(),
            self.address.unwrap_or_default(),
            self.country.unwrap_or_default(),
        );
        let employees = self
            .employees
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.into_entity(company.id))
            .collect();
        (company, employees)
    }
}

/// Payload for replacing a company; listed employees are added to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForUpdateDto {
    /// Company name.
    #[validate(
        required(message = "Company name is a required field."),
        custom(function = "not_blank", message = "Company name is a required field."),
        length(max = 60, message = "Maximum length for the Name is 60 characters.")
    )]
    pub name: Option<String>,
    /// Street address.
    #[validate(
        required(message = "Company address is a required field."),
        custom(function = "not_blank", message = "Company address is a required field."),
        length(max = 60, message = "Maximum length for the Address is 60 characters.")
    )]
    pub address: Option<String>,
    /// Country.
    #[validate(
        required(message = "Country is a required field."),
        custom(function = "not_blank", message = "Country is a required field.")
    )]
    pub country: Option<String>,
    /// Employees to add to the company.
    #[validate(nested)]
    pub employees: Option<Vec<EmployeeForCreationDto>>,
}

impl CompanyForUpdateDto {
    /// Copy the validated fields onto `company`, returning the employees to add.
    pub fn apply_to(self, company: &mut Company) -> Vec<Employee> {
        company.name = self.name.unwrap_or_default();
        company.address = self.address.unwrap_or_default();
        company.country = self.country.unwrap_or_default();
        self.employees
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.into_entity(company.id))
            .collect()
    }
}

impl From<&Company> for CompanyForUpdateDto {
    fn from(company: &Company) -> Self {
        Self {
            name: Some(company.name.clone()),
            address: Some(company.address.clone()),
            country: Some(company.country.clone()),
            employees: None,
        }
    }
}
