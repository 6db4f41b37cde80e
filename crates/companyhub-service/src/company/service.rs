//! Company service: listing, lookup, creation, update and deletion.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_core::types::PagedList;
use companyhub_database::CompanyRepository;
use companyhub_entity::Company;

use crate::dto::{CompanyDto, CompanyForCreationDto, CompanyForUpdateDto, validate_dto};
use crate::parameters::CompanyParameters;
use crate::patch::JsonPatchDocument;

/// Handles company use cases.
#[derive(Debug, Clone)]
pub struct CompanyService {
    /// Company repository.
    company_repo: Arc<dyn CompanyRepository>,
}

/// Build the not-found error for a missing company, logging it.
pub(crate) fn company_not_found(id: Uuid) -> AppError {
    info!("Company with id: {id} doesn't exist in the database.");
    AppError::not_found(format!("Company with id: {id} doesn't exist in the database."))
}

impl CompanyService {
    /// Creates a new company service.
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    /// One page of companies as DTOs.
    pub async fn get_companies(&self, params: &CompanyParameters) -> AppResult<PagedList<CompanyDto>> {
        let page = self.company_repo.get_all_companies(&params.to_query()).await?;
        Ok(page.map(|c| CompanyDto::from(&c)))
    }

    /// One page of full company entities.
    pub async fn get_companies_full(&self, params: &CompanyParameters) -> AppResult<PagedList<Company>> {
        self.company_repo.get_all_companies(&params.to_query()).await
    }

    /// Load a company entity or fail with not-found.
    pub async fn get_company_entity(&self, id: Uuid) -> AppResult<Company> {
        self.company_repo
            .get_company(id)
            .await?
            .ok_or_else(|| company_not_found(id))
    }

    /// Fail with not-found unless the company exists.
    pub async fn ensure_exists(&self, id: Uuid) -> AppResult<()> {
        self.get_company_entity(id).await.map(|_| ())
    }

    /// A single company as a DTO.
    pub async fn get_company(&self, id: Uuid) -> AppResult<CompanyDto> {
        let company = self.get_company_entity(id).await?;
        Ok(CompanyDto::from(&company))
    }

    /// Every listed company; fails if any id is unknown.
    pub async fn get_companies_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<CompanyDto>> {
        if ids.is_empty() {
            return Err(AppError::validation("Parameter ids is null"));
        }

        let companies = self.company_repo.get_companies_by_ids(ids).await?;
        let mut unique = ids.to_vec();
        unique.sort();
        unique.dedup();
        if unique.len() != companies.len() {
            error!("Some ids are not valid in a collection");
            return Err(AppError::not_found("Some ids are not valid in a collection"));
        }

        Ok(companies.iter().map(CompanyDto::from).collect())
    }

    /// Create a company together with any listed employees.
    pub async fn create_company(&self, dto: CompanyForCreationDto) -> AppResult<CompanyDto> {
        validate_dto(&dto, "CompanyForCreationDto")?;
        let (company, employees) = dto.into_entities();
        self.company_repo.create_company(&company, &employees).await?;

        info!(company_id = %company.id, employees = employees.len(), "Company created");
        Ok(CompanyDto::from(&company))
    }

    /// Create several companies in one unit.
    ///
    /// Returns the created DTOs and the comma-separated id list.
    pub async fn create_company_collection(
        &self,
        dtos: Vec<CompanyForCreationDto>,
    ) -> AppResult<(Vec<CompanyDto>, String)> {
        if dtos.is_empty() {
            error!("Company collection sent from client is empty.");
            return Err(AppError::validation("Company collection is empty"));
        }
        for dto in &dtos {
            validate_dto(dto, "CompanyForCreationDto")?;
        }

        let entities: Vec<_> = dtos.into_iter().map(|d| d.into_entities()).collect();
        self.company_repo.create_companies(&entities).await?;

        let created: Vec<CompanyDto> = entities.iter().map(|(c, _)| CompanyDto::from(c)).collect();
        let ids = created
            .iter()
            .map(|c| c.id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        info!(count = created.len(), "Company collection created");
        Ok((created, ids))
    }

    /// Replace a company's fields and add any listed employees.
    pub async fn update_company(&self, id: Uuid, dto: CompanyForUpdateDto) -> AppResult<()> {
        let mut company = self.get_company_entity(id).await?;
        validate_dto(&dto, "CompanyForUpdateDto")?;

        let new_employees = dto.apply_to(&mut company);
        self.company_repo.update_company(&company, &new_employees).await?;

        info!(company_id = %id, "Company updated");
        Ok(())
    }

    /// Apply a JSON Patch to a company.
    pub async fn partially_update_company(
        &self,
        id: Uuid,
        patch: &JsonPatchDocument,
    ) -> AppResult<()> {
        let mut company = self.get_company_entity(id).await?;

        let patched = patch.apply_to(&CompanyForUpdateDto::from(&company))?;
        validate_dto(&patched, "patch document")?;

        let new_employees = patched.apply_to(&mut company);
        self.company_repo.update_company(&company, &new_employees).await?;

        info!(company_id = %id, "Company patched");
        Ok(())
    }

    /// Delete a company and its employees.
    pub async fn delete_company(&self, id: Uuid) -> AppResult<()> {
        self.ensure_exists(id).await?;
        self.company_repo.delete_company(id).await?;

        info!(company_id = %id, "Company deleted");
        Ok(())
    }
}
