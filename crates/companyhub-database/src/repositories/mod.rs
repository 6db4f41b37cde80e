//! Repository contracts and their PostgreSQL implementations.
//!
//! Services only see the traits; the concrete backend is chosen by
//! [`crate::RepositoryManager`].

pub mod company;
pub mod employee;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use companyhub_core::result::AppResult;
use companyhub_core::types::{PageRequest, PagedList, SortField};
use companyhub_entity::user::CreateUser;
use companyhub_entity::{Company, Employee, Role, User};

pub use company::PgCompanyRepository;
pub use employee::PgEmployeeRepository;
pub use user::PgUserRepository;

/// Query options for listing companies.
#[derive(Debug, Clone, Default)]
pub struct CompanyQuery {
    /// Requested page.
    pub page: PageRequest,
    /// Sort order; empty means by name.
    pub order_by: Vec<SortField>,
}

/// Query options for listing employees of a company.
#[derive(Debug, Clone)]
pub struct EmployeeQuery {
    /// Requested page.
    pub page: PageRequest,
    /// Inclusive lower age bound.
    pub min_age: u32,
    /// Inclusive upper age bound.
    pub max_age: u32,
    /// Case-insensitive substring the name must contain.
    pub search_term: Option<String>,
    /// Sort order; empty means by name.
    pub order_by: Vec<SortField>,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            page: PageRequest::default(),
            min_age: 0,
            max_age: u32::MAX,
            search_term: None,
            order_by: Vec::new(),
        }
    }
}

impl EmployeeQuery {
    /// Normalized search term, `None` when blank.
    pub fn search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

/// Keep the sort fields naming a column in `allowed`, falling back to
/// ascending by name when none remain.
pub(crate) fn sanitize_order(order_by: &[SortField], allowed: &[&str]) -> Vec<SortField> {
    let fields: Vec<SortField> = order_by
        .iter()
        .filter(|f| allowed.contains(&f.field.as_str()))
        .cloned()
        .collect();
    if fields.is_empty() {
        vec![SortField::asc("name")]
    } else {
        fields
    }
}

/// Persistence operations on companies.
#[async_trait]
pub trait CompanyRepository: Send + Sync + std::fmt::Debug {
    /// List one page of companies.
    async fn get_all_companies(&self, query: &CompanyQuery) -> AppResult<PagedList<Company>>;

    /// Find a company by id.
    async fn get_company(&self, id: Uuid) -> AppResult<Option<Company>>;

    /// Find every company whose id is in `ids`. Missing ids are skipped.
    async fn get_companies_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Company>>;

    /// Persist a company together with its initial employees in one unit.
    async fn create_company(&self, company: &Company, employees: &[Employee]) -> AppResult<()>;

    /// Persist several companies with their employees in one unit.
    async fn create_companies(&self, companies: &[(Company, Vec<Employee>)]) -> AppResult<()>;

    /// Overwrite a company's fields and add `new_employees` to it.
    async fn update_company(&self, company: &Company, new_employees: &[Employee])
    -> AppResult<()>;

    /// Delete a company and all of its employees.
    async fn delete_company(&self, id: Uuid) -> AppResult<()>;
}

/// Persistence operations on employees.
#[async_trait]
pub trait EmployeeRepository: Send + Sync + std::fmt::Debug {
    /// Filter, search, sort and page the employees of a company.
    async fn get_employees(
        &self,
        company_id: Uuid,
        query: &EmployeeQuery,
    ) -> AppResult<PagedList<Employee>>;

    /// Find an employee that belongs to the given company.
    async fn get_employee(&self, company_id: Uuid, employee_id: Uuid)
    -> AppResult<Option<Employee>>;

    /// Persist a new employee; `company_id` overrides the employee's own.
    async fn create_employee_for_company(
        &self,
        company_id: Uuid,
        employee: &Employee,
    ) -> AppResult<Employee>;

    /// Overwrite an employee's fields.
    async fn update_employee(&self, employee: &Employee) -> AppResult<()>;

    /// Delete an employee.
    async fn delete_employee(&self, employee: &Employee) -> AppResult<()>;
}

/// Persistence operations on users and roles.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Find a user by login name, ignoring case.
    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user and assign it the given roles.
    ///
    /// Fails with a conflict on a duplicate user name or email.
    async fn create_user(&self, data: &CreateUser, roles: &[Role]) -> AppResult<User>;

    /// Roles assigned to a user.
    async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>>;

    /// Every role known to the store.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;
}
