//! In-memory repository backend.
//!
//! Selected with `database.provider = "memory"`. All three repository
//! traits are implemented over one [`MemoryStore`] so that company
//! deletes cascade to employees exactly as the foreign key does in
//! PostgreSQL.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_core::types::{PagedList, SortDirection, SortField};
use companyhub_entity::user::CreateUser;
use companyhub_entity::{Company, Employee, Role, User};

use crate::repositories::{
    CompanyQuery, CompanyRepository, EmployeeQuery, EmployeeRepository, UserRepository,
    sanitize_order,
};

#[derive(Debug, Default)]
struct Tables {
    companies: HashMap<Uuid, Company>,
    employees: HashMap<Uuid, Employee>,
    users: HashMap<Uuid, User>,
    user_roles: HashMap<Uuid, Vec<Role>>,
}

/// Shared in-memory tables behind the repository traits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample companies and employees.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for (company, employees) in seed_data() {
            for employee in employees {
                tables.employees.insert(employee.id, employee);
            }
            tables.companies.insert(company.id, company);
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }
}

fn seed_uuid(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap_or_else(|_| Uuid::nil())
}

/// The sample rows also inserted by the seed migration.
pub fn seed_data() -> Vec<(Company, Vec<Employee>)> {
    let it_solutions = Company {
        id: seed_uuid("c9d4c053-49b6-410c-bc78-2d54a9991870"),
        name: "IT_Solutions Ltd".to_string(),
        address: "583 Wall Dr. Gwynn Oak, MD 21207".to_string(),
        country: "USA".to_string(),
    };
    let admin_solutions = Company {
        id: seed_uuid("3d490a70-94ce-4d15-9494-5248280c2ce3"),
        name: "Admin_Solutions Ltd".to_string(),
        address: "312 Forest Avenue, BF 923".to_string(),
        country: "USA".to_string(),
    };

    let employee = |id: &str, name: &str, age: i32, position: &str, company_id: Uuid| Employee {
        id: seed_uuid(id),
        name: name.to_string(),
        age,
        position: position.to_string(),
        company_id,
    };

    vec![
        (
            it_solutions.clone(),
            vec![
                employee(
                    "80abbca8-664d-4b20-b5de-024705497d4a",
                    "Sam Raiden",
                    26,
                    "Software developer",
                    it_solutions.id,
                ),
                employee(
                    "86dba8c0-d178-41e7-938c-ed49778fb52a",
                    "Jana McLeaf",
                    30,
                    "Software developer",
                    it_solutions.id,
                ),
            ],
        ),
        (
            admin_solutions.clone(),
            vec![employee(
                "021ca3c1-0deb-4afd-ae94-2159a8479811",
                "Kane Miller",
                35,
                "Administrator",
                admin_solutions.id,
            )],
        ),
    ]
}

fn compare_companies(a: &Company, b: &Company, field: &str) -> Ordering {
    match field {
        "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        "address" => a.address.to_lowercase().cmp(&b.address.to_lowercase()),
        "country" => a.country.to_lowercase().cmp(&b.country.to_lowercase()),
        _ => Ordering::Equal,
    }
}

/// Chain per-field comparisons, breaking ties by id.
fn sort_by_fields<T>(
    items: &mut [T],
    order: &[SortField],
    compare: impl Fn(&T, &T, &str) -> Ordering,
    id: impl Fn(&T) -> Uuid,
) {
    items.sort_by(|a, b| {
        order
            .iter()
            .map(|f| {
                let ord = compare(a, b, &f.field);
                match f.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| id(a).cmp(&id(b)))
    });
}

fn company_missing(id: Uuid) -> AppError {
    AppError::not_found(format!("Company with id: {id} doesn't exist in the database."))
}

fn employee_missing(id: Uuid) -> AppError {
    AppError::not_found(format!("Employee with id: {id} doesn't exist in the database."))
}

fn ensure_new_ids(tables: &Tables, companies: &[(Company, Vec<Employee>)]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for (company, employees) in companies {
        if tables.companies.contains_key(&company.id) || !seen.insert(company.id) {
            return Err(AppError::conflict(format!(
                "Company {} already exists",
                company.id
            )));
        }
        for employee in employees {
            if tables.employees.contains_key(&employee.id) || !seen.insert(employee.id) {
                return Err(AppError::conflict(format!(
                    "Employee {} already exists",
                    employee.id
                )));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn get_all_companies(&self, query: &CompanyQuery) -> AppResult<PagedList<Company>> {
        let tables = self.tables.read().await;
        let mut companies: Vec<Company> = tables.companies.values().cloned().collect();
        let order = sanitize_order(&query.order_by, Company::SORTABLE_FIELDS);
        sort_by_fields(&mut companies, &order, compare_companies, |c| c.id);
        Ok(PagedList::to_paged_list(companies, query.page))
    }

    async fn get_company(&self, id: Uuid) -> AppResult<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn get_companies_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Company>> {
        let tables = self.tables.read().await;
        let mut companies: Vec<Company> = tables
            .companies
            .values()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect();
        sort_by_fields(
            &mut companies,
            &[SortField::asc("name")],
            compare_companies,
            |c| c.id,
        );
        Ok(companies)
    }

    async fn create_company(&self, company: &Company, employees: &[Employee]) -> AppResult<()> {
        self.create_companies(&[(company.clone(), employees.to_vec())])
            .await
    }

    async fn create_companies(&self, companies: &[(Company, Vec<Employee>)]) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        ensure_new_ids(&tables, companies)?;
        for (company, employees) in companies {
            tables.companies.insert(company.id, company.clone());
            for employee in employees {
                let mut employee = employee.clone();
                employee.company_id = company.id;
                tables.employees.insert(employee.id, employee);
            }
        }
        Ok(())
    }

    async fn update_company(
        &self,
        company: &Company,
        new_employees: &[Employee],
    ) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.companies.contains_key(&company.id) {
            return Err(company_missing(company.id));
        }
        if let Some(taken) = new_employees
            .iter()
            .find(|e| tables.employees.contains_key(&e.id))
        {
            return Err(AppError::conflict(format!(
                "Employee {} already exists",
                taken.id
            )));
        }
        tables.companies.insert(company.id, company.clone());
        for employee in new_employees {
            let mut employee = employee.clone();
            employee.company_id = company.id;
            tables.employees.insert(employee.id, employee);
        }
        Ok(())
    }

    async fn delete_company(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.companies.remove(&id).is_none() {
            return Err(company_missing(id));
        }
        tables.employees.retain(|_, e| e.company_id != id);
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn get_employees(
        &self,
        company_id: Uuid,
        query: &EmployeeQuery,
    ) -> AppResult<PagedList<Employee>> {
        let tables = self.tables.read().await;
        let search = query.search();
        let min_age = i64::from(query.min_age);
        let max_age = i64::from(query.max_age);

        let mut employees: Vec<Employee> = tables
            .employees
            .values()
            .filter(|e| e.company_id == company_id)
            .filter(|e| (min_age..=max_age).contains(&i64::from(e.age)))
            .filter(|e| match &search {
                Some(term) => e.name.to_lowercase().contains(term.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        let order = sanitize_order(&query.order_by, Employee::SORTABLE_FIELDS);
        sort_by_fields(&mut employees, &order, Employee::compare_by, |e| e.id);
        Ok(PagedList::to_paged_list(employees, query.page))
    }

    async fn get_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Option<Employee>> {
        Ok(self
            .tables
            .read()
            .await
            .employees
            .get(&employee_id)
            .filter(|e| e.company_id == company_id)
            .cloned())
    }

    async fn create_employee_for_company(
        &self,
        company_id: Uuid,
        employee: &Employee,
    ) -> AppResult<Employee> {
        let mut tables = self.tables.write().await;
        if !tables.companies.contains_key(&company_id) {
            return Err(company_missing(company_id));
        }
        if tables.employees.contains_key(&employee.id) {
            return Err(AppError::conflict(format!(
                "Employee {} already exists",
                employee.id
            )));
        }
        let mut employee = employee.clone();
        employee.company_id = company_id;
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update_employee(&self, employee: &Employee) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        match tables.employees.get_mut(&employee.id) {
            Some(existing) if existing.company_id == employee.company_id => {
                *existing = employee.clone();
                Ok(())
            }
            _ => Err(employee_missing(employee.id)),
        }
    }

    async fn delete_employee(&self, employee: &Employee) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        match tables.employees.get(&employee.id) {
            Some(existing) if existing.company_id == employee.company_id => {
                tables.employees.remove(&employee.id);
                Ok(())
            }
            _ => Err(employee_missing(employee.id)),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.user_name.eq_ignore_ascii_case(user_name))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn create_user(&self, data: &CreateUser, roles: &[Role]) -> AppResult<User> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .values()
            .any(|u| u.user_name.eq_ignore_ascii_case(&data.user_name))
        {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken.",
                data.user_name
            )));
        }
        if let Some(email) = data.email.as_deref() {
            let taken = tables.users.values().any(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            });
            if taken {
                return Err(AppError::conflict("Email is already taken."));
            }
        }

        let user = User::from_create(data.clone());
        let mut assigned: Vec<Role> = Vec::new();
        for role in roles {
            if !assigned.contains(role) {
                assigned.push(*role);
            }
        }
        tables.user_roles.insert(user.id, assigned);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        Ok(self
            .tables
            .read()
            .await
            .user_roles
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(Role::ALL.to_vec())
    }
}
