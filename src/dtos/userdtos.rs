// dtos/userdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{User, UserRole, UserStatus};

/// Query-string shape of the user listing endpoint. Blank strings are
/// treated as absent; role/status/sort values are validated before any
/// query executes.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,

    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,

    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(rename = "minRating")]
    pub min_rating: Option<f64>,

    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(rename = "maxRating")]
    pub max_rating: Option<f64>,

    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,

    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

/// One recognized filter, mapped to exactly one parameterized SQL
/// predicate. Unrecognized input never reaches the query builder.
#[derive(Debug, Clone, PartialEq)]
pub enum UserPredicate {
    Search(String),
    Role(UserRole),
    Status(UserStatus),
    City(String),
    Country(String),
    MinRating(f64),
    MaxRating(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortBy {
    CreatedAt,
    UpdatedAt,
    Name,
    Email,
    City,
    Country,
    Rating,
    TotalProjects,
    HourlyRate,
}

impl UserSortBy {
    /// Allow-listed sort columns; anything else is rejected upstream.
    pub fn parse(value: &str) -> Option<UserSortBy> {
        match value {
            "created_at" => Some(UserSortBy::CreatedAt),
            "updated_at" => Some(UserSortBy::UpdatedAt),
            "name" => Some(UserSortBy::Name),
            "email" => Some(UserSortBy::Email),
            "city" => Some(UserSortBy::City),
            "country" => Some(UserSortBy::Country),
            "rating" => Some(UserSortBy::Rating),
            "total_projects" => Some(UserSortBy::TotalProjects),
            "hourly_rate" => Some(UserSortBy::HourlyRate),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            UserSortBy::CreatedAt => "created_at",
            UserSortBy::UpdatedAt => "updated_at",
            UserSortBy::Name => "name",
            UserSortBy::Email => "email",
            UserSortBy::City => "city",
            UserSortBy::Country => "country",
            UserSortBy::Rating => "rating",
            UserSortBy::TotalProjects => "total_projects",
            UserSortBy::HourlyRate => "hourly_rate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<SortOrder> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// The validated, typed form of a listing request.
#[derive(Debug, Clone)]
pub struct UserListFilter {
    pub page: u32,
    pub limit: u32,
    pub predicates: Vec<UserPredicate>,
    pub sort_by: UserSortBy,
    pub sort_order: SortOrder,
}

impl UserListFilter {
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

fn normalize(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl UserQueryDto {
    /// Lower the wire shape into typed predicates. Returns the offending
    /// input as an error message when a value is malformed.
    pub fn to_filter(&self) -> Result<UserListFilter, String> {
        let mut predicates = Vec::new();

        if let Some(search) = normalize(&self.search) {
            predicates.push(UserPredicate::Search(search.to_string()));
        }
        if let Some(role) = normalize(&self.role) {
            let role = UserRole::from_str(role)
                .ok_or_else(|| format!("unknown role filter: {}", role))?;
            predicates.push(UserPredicate::Role(role));
        }
        if let Some(status) = normalize(&self.status) {
            let status = UserStatus::from_str(status)
                .ok_or_else(|| format!("unknown status filter: {}", status))?;
            predicates.push(UserPredicate::Status(status));
        }
        if let Some(city) = normalize(&self.city) {
            predicates.push(UserPredicate::City(city.to_string()));
        }
        if let Some(country) = normalize(&self.country) {
            predicates.push(UserPredicate::Country(country.to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            predicates.push(UserPredicate::MinRating(min_rating));
        }
        if let Some(max_rating) = self.max_rating {
            predicates.push(UserPredicate::MaxRating(max_rating));
        }

        let sort_by = match normalize(&self.sort_by) {
            Some(raw) => UserSortBy::parse(raw)
                .ok_or_else(|| format!("unsortable column: {}", raw))?,
            None => UserSortBy::CreatedAt,
        };
        let sort_order = match normalize(&self.sort_order) {
            Some(raw) => SortOrder::parse(raw)
                .ok_or_else(|| format!("invalid sort order: {}", raw))?,
            None => SortOrder::Desc,
        };

        Ok(UserListFilter {
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(10).max(1),
            predicates,
            sort_by,
            sort_order,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let limit_i64 = limit as i64;
        let total_pages = (total + limit_i64 - 1) / limit_i64;
        Pagination {
            page,
            limit,
            total,
            total_pages,
            has_next: (page as i64) * limit_i64 < total,
            has_prev: page > 1,
        }
    }
}

/// User as exposed over the wire: everything except the password hash.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilterUserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
    pub skills: Vec<String>,
    pub rating: f64,
    pub total_projects: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            status: user.status.to_str().to_string(),
            city: user.city.clone(),
            country: user.country.clone(),
            bio: user.bio.clone(),
            hourly_rate: user.hourly_rate,
            skills: user.skills.clone().unwrap_or_default(),
            rating: user.rating,
            total_projects: user.total_projects,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub data: Vec<FilterUserDto>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_given() {
        let filter = UserQueryDto::default().to_filter().unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert!(filter.predicates.is_empty());
        assert_eq!(filter.sort_by, UserSortBy::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn blank_strings_are_absent_filters() {
        let dto = UserQueryDto {
            search: Some("   ".to_string()),
            role: Some("".to_string()),
            city: Some(" ".to_string()),
            sort_by: Some("".to_string()),
            sort_order: Some("".to_string()),
            ..Default::default()
        };
        let filter = dto.to_filter().unwrap();
        assert!(filter.predicates.is_empty());
        assert_eq!(filter.sort_by, UserSortBy::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn recognized_filters_become_predicates() {
        let dto = UserQueryDto {
            search: Some("rust".to_string()),
            role: Some("freelancer".to_string()),
            status: Some("active".to_string()),
            city: Some("Kyiv".to_string()),
            country: Some("Ukraine".to_string()),
            min_rating: Some(3.5),
            max_rating: Some(5.0),
            sort_by: Some("rating".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let filter = dto.to_filter().unwrap();
        assert_eq!(filter.predicates.len(), 7);
        assert_eq!(
            filter.predicates[1],
            UserPredicate::Role(UserRole::Freelancer)
        );
        assert_eq!(filter.sort_by, UserSortBy::Rating);
        assert_eq!(filter.sort_order, SortOrder::Asc);
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let dto = UserQueryDto {
            sort_by: Some("password; DROP TABLE users".to_string()),
            ..Default::default()
        };
        assert!(dto.to_filter().is_err());
    }

    #[test]
    fn unknown_role_and_order_are_rejected() {
        let dto = UserQueryDto {
            role: Some("superuser".to_string()),
            ..Default::default()
        };
        assert!(dto.to_filter().is_err());

        let dto = UserQueryDto {
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(dto.to_filter().is_err());
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let dto = UserQueryDto {
            page: Some(3),
            limit: Some(25),
            ..Default::default()
        };
        assert_eq!(dto.to_filter().unwrap().offset(), 50);
    }

    #[test]
    fn pagination_math() {
        // 25 matching users, second page of 10
        let meta = Pagination::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = Pagination::new(3, 10, 25);
        assert!(!last.has_next);
        assert!(last.has_prev);

        let empty = Pagination::new(1, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }
}
