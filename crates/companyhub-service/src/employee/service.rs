//! Employee service: listing, lookup and changes scoped to one company.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_core::types::PagedList;
use companyhub_database::{CompanyRepository, EmployeeRepository};
use companyhub_entity::Employee;

use crate::company::service::company_not_found;
use crate::dto::{EmployeeDto, EmployeeForCreationDto, EmployeeForUpdateDto, validate_dto};
use crate::parameters::EmployeeParameters;
use crate::patch::JsonPatchDocument;

/// Handles employee use cases.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    /// Company repository, for existence checks.
    company_repo: Arc<dyn CompanyRepository>,
    /// Employee repository.
    employee_repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    /// Creates a new employee service.
    pub fn new(
        company_repo: Arc<dyn CompanyRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            company_repo,
            employee_repo,
        }
    }

    async fn ensure_company(&self, company_id: Uuid) -> AppResult<()> {
        match self.company_repo.get_company(company_id).await? {
            Some(_) => Ok(()),
            None => Err(company_not_found(company_id)),
        }
    }

    async fn get_employee_entity(&self, company_id: Uuid, id: Uuid) -> AppResult<Employee> {
        self.ensure_company(company_id).await?;
        match self.employee_repo.get_employee(company_id, id).await? {
            Some(employee) => Ok(employee),
            None => {
                info!("Employee with id: {id} doesn't exist in the database.");
                Err(AppError::not_found(format!(
                    "Employee with id: {id} doesn't exist in the database."
                )))
            }
        }
    }

    /// One filtered, searched and sorted page of a company's employees.
    pub async fn get_employees(
        &self,
        company_id: Uuid,
        params: &EmployeeParameters,
    ) -> AppResult<PagedList<EmployeeDto>> {
        let query = params.to_query()?;
        self.ensure_company(company_id).await?;

        let page = self.employee_repo.get_employees(company_id, &query).await?;
        Ok(page.map(|e| EmployeeDto::from(&e)))
    }

    /// A single employee of a company.
    pub async fn get_employee(&self, company_id: Uuid, id: Uuid) -> AppResult<EmployeeDto> {
        let employee = self.get_employee_entity(company_id, id).await?;
        Ok(EmployeeDto::from(&employee))
    }

    /// Create an employee for a company.
    pub async fn create_employee_for_company(
        &self,
        company_id: Uuid,
        dto: EmployeeForCreationDto,
    ) -> AppResult<EmployeeDto> {
        self.ensure_company(company_id).await?;
        validate_dto(&dto, "EmployeeForCreationDto")?;

        let employee = self
            .employee_repo
            .create_employee_for_company(company_id, &dto.into_entity(company_id))
            .await?;

        info!(company_id = %company_id, employee_id = %employee.id, "Employee created");
        Ok(EmployeeDto::from(&employee))
    }

    /// Replace an employee's fields.
    pub async fn update_employee_for_company(
        &self,
        company_id: Uuid,
        id: Uuid,
        dto: EmployeeForUpdateDto,
    ) -> AppResult<()> {
        let mut employee = self.get_employee_entity(company_id, id).await?;
        validate_dto(&dto, "EmployeeForUpdateDto")?;

        dto.apply_to(&mut employee);
        self.employee_repo.update_employee(&employee).await?;

        info!(company_id = %company_id, employee_id = %id, "Employee updated");
        Ok(())
    }

    /// Apply a JSON Patch to an employee.
    pub async fn partially_update_employee_for_company(
        &self,
        company_id: Uuid,
        id: Uuid,
        patch: &JsonPatchDocument,
    ) -> AppResult<()> {
        let mut employee = self.get_employee_entity(company_id, id).await?;

        let patched = patch.apply_to(&EmployeeForUpdateDto::from(&employee))?;
        validate_dto(&patched, "patch document")?;

        patched.apply_to(&mut employee);
        self.employee_repo.update_employee(&employee).await?;

        info!(company_id = %company_id, employee_id = %id, "Employee patched");
        Ok(())
    }

    /// Delete an employee of a company.
    pub async fn delete_employee_for_company(&self, company_id: Uuid, id: Uuid) -> AppResult<()> {
        let employee = self.get_employee_entity(company_id, id).await?;
        self.employee_repo.delete_employee(&employee).await?;

        info!(company_id = %company_id, employee_id = %id, "Employee deleted");
        Ok(())
    }
}
