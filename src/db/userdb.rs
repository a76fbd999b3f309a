// db/userdb.rs
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::db::DBClient;
use crate::dtos::userdtos::{UserListFilter, UserPredicate};
use crate::models::usermodel::User;

const USER_COLUMNS: &str = "id, name, email, password, role, status, \
     city, country, bio, hourly_rate, skills, rating, total_projects, \
     created_at, updated_at";

#[async_trait]
pub trait UserExt {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, sqlx::Error>;

    /// Filtered, sorted, paginated listing. Returns the page of users
    /// together with the total count of rows matching the predicates
    /// before pagination.
    async fn list_users(
        &self,
        filter: &UserListFilter,
    ) -> Result<(Vec<User>, i64), sqlx::Error>;
}

/// Appends each predicate as one parameterized clause, AND-combined.
/// Sort column and direction never pass through here; they are pushed
/// from allow-listed enums only.
fn apply_predicates(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[UserPredicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            UserPredicate::Search(term) => {
                let pattern = format!("%{}%", term);
                qb.push("(name ILIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" OR email ILIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" OR bio ILIKE ");
                qb.push_bind(pattern);
                qb.push(")");
            }
            UserPredicate::Role(role) => {
                qb.push("role = ");
                qb.push_bind(*role);
            }
            UserPredicate::Status(status) => {
                qb.push("status = ");
                qb.push_bind(*status);
            }
            UserPredicate::City(city) => {
                qb.push("city = ");
                qb.push_bind(city.clone());
            }
            UserPredicate::Country(country) => {
                qb.push("country = ");
                qb.push_bind(country.clone());
            }
            UserPredicate::MinRating(min) => {
                qb.push("rating >= ");
                qb.push_bind(*min);
            }
            UserPredicate::MaxRating(max) => {
                qb.push("rating <= ");
                qb.push_bind(*max);
            }
        }
    }
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_users(
        &self,
        filter: &UserListFilter,
    ) -> Result<(Vec<User>, i64), sqlx::Error> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM users");
        apply_predicates(&mut count_qb, &filter.predicates);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
        apply_predicates(&mut qb, &filter.predicates);
        qb.push(" ORDER BY ");
        qb.push(filter.sort_by.column());
        qb.push(" ");
        qb.push(filter.sort_order.as_sql());
        qb.push(" LIMIT ");
        qb.push_bind(filter.limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset());

        let users = qb
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::userdtos::{SortOrder, UserQueryDto, UserSortBy};
    use crate::models::usermodel::{UserRole, UserStatus};

    fn sql_for(predicates: &[UserPredicate]) -> String {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM users");
        apply_predicates(&mut qb, predicates);
        qb.sql().to_string()
    }

    #[test]
    fn no_predicates_means_no_where_clause() {
        assert_eq!(sql_for(&[]), "SELECT COUNT(*) FROM users");
    }

    #[test]
    fn predicates_are_parameterized_and_and_combined() {
        let sql = sql_for(&[
            UserPredicate::Search("rust".into()),
            UserPredicate::Role(UserRole::Freelancer),
            UserPredicate::Status(UserStatus::Active),
            UserPredicate::MinRating(3.0),
        ]);
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM users WHERE \
             (name ILIKE $1 OR email ILIKE $2 OR bio ILIKE $3) \
             AND role = $4 AND status = $5 AND rating >= $6"
        );
        // the search term itself never appears in the SQL text
        assert!(!sql.contains("rust"));
    }

    #[test]
    fn listing_sql_orders_by_allow_listed_column_only() {
        let dto = UserQueryDto {
            city: Some("Kyiv".to_string()),
            sort_by: Some("rating".to_string()),
            sort_order: Some("ASC".to_string()),
            ..Default::default()
        };
        let filter = dto.to_filter().unwrap();
        assert_eq!(filter.sort_by, UserSortBy::Rating);
        assert_eq!(filter.sort_order, SortOrder::Asc);

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
        apply_predicates(&mut qb, &filter.predicates);
        qb.push(" ORDER BY ");
        qb.push(filter.sort_by.column());
        qb.push(" ");
        qb.push(filter.sort_order.as_sql());
        let sql = qb.sql().to_string();
        assert!(sql.ends_with("WHERE city = $1 ORDER BY rating ASC"));
    }
}
