// service/provision_service.rs
//
// Declarative provisioning of the database-side derived objects: the
// analytics views, the stored routines, and the audit tables with their
// triggers. Each object is a (name, kind, drop statements, create
// statements) record; reconciliation executes drop-if-exists then
// create per object and reports per-object outcomes. Failures do not
// roll back objects already installed in the same run.
//
// Reconcile is an administrative action and is not safe to race
// against itself; callers must not invoke it concurrently.
use std::sync::Arc;

use serde::Serialize;

use crate::db::db::DBClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Table,
    Function,
    View,
    Trigger,
}

/// One server-side object, fully described by its DDL. `drop` runs
/// first and every statement in it is an IF EXISTS form, so a missing
/// object never fails the pass.
#[derive(Debug, Clone)]
pub struct DerivedObject {
    pub name: &'static str,
    pub kind: ObjectKind,
    pub drop: &'static [&'static str],
    pub create: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionOutcome {
    pub name: &'static str,
    pub kind: ObjectKind,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ProvisionReport {
    pub outcomes: Vec<ProvisionOutcome>,
}

impl ProvisionReport {
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.created)
    }

    pub fn message(&self) -> String {
        let failed: Vec<&str> = self
            .outcomes
            .iter()
            .filter(|o| !o.created)
            .map(|o| o.name)
            .collect();
        if failed.is_empty() {
            format!("all {} database objects created", self.outcomes.len())
        } else {
            format!("failed objects: {}", failed.join(", "))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProvisionService {
    db_client: Arc<DBClient>,
}

impl ProvisionService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Drops and recreates every derived object, in dependency order
    /// (audit tables, routines, views, then triggers). Running it twice
    /// leaves exactly one instance of each object.
    pub async fn reconcile(&self) -> ProvisionReport {
        let mut outcomes = Vec::new();

        for object in derived_objects() {
            match self.apply(&object).await {
                Ok(()) => {
                    tracing::info!(name = object.name, "derived object created");
                    outcomes.push(ProvisionOutcome {
                        name: object.name,
                        kind: object.kind,
                        created: true,
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::error!(name = object.name, error = %e, "derived object failed");
                    outcomes.push(ProvisionOutcome {
                        name: object.name,
                        kind: object.kind,
                        created: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        ProvisionReport { outcomes }
    }

    async fn apply(&self, object: &DerivedObject) -> Result<(), sqlx::Error> {
        for statement in object.drop {
            sqlx::query(statement).execute(&self.db_client.pool).await?;
        }
        for statement in object.create {
            sqlx::query(statement).execute(&self.db_client.pool).await?;
        }
        Ok(())
    }
}

/// The full object inventory, ordered so that every object only depends
/// on base tables or on objects earlier in the list.
pub fn derived_objects() -> Vec<DerivedObject> {
    vec![
        // -- audit tables ------------------------------------------------
        DerivedObject {
            name: "project_status_log",
            kind: ObjectKind::Table,
            drop: &[],
            create: &[
                r#"
                CREATE TABLE IF NOT EXISTS project_status_log (
                    id SERIAL PRIMARY KEY,
                    project_id INTEGER NOT NULL REFERENCES projects(id),
                    old_status project_status NOT NULL,
                    new_status project_status NOT NULL,
                    changed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                "CREATE INDEX IF NOT EXISTS idx_project_status_log_project_id \
                 ON project_status_log(project_id)",
                "CREATE INDEX IF NOT EXISTS idx_project_status_log_changed_at \
                 ON project_status_log(changed_at)",
            ],
        },
        DerivedObject {
            name: "bid_status_log",
            kind: ObjectKind::Table,
            drop: &[],
            create: &[
                r#"
                CREATE TABLE IF NOT EXISTS bid_status_log (
                    id SERIAL PRIMARY KEY,
                    bid_id INTEGER NOT NULL REFERENCES bids(id),
                    old_status bid_status NOT NULL,
                    new_status bid_status NOT NULL,
                    changed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                "CREATE INDEX IF NOT EXISTS idx_bid_status_log_bid_id \
                 ON bid_status_log(bid_id)",
                "CREATE INDEX IF NOT EXISTS idx_bid_status_log_changed_at \
                 ON bid_status_log(changed_at)",
            ],
        },
        // -- routines ----------------------------------------------------
        DerivedObject {
            name: "recompute_user_rating",
            kind: ObjectKind::Function,
            drop: &["DROP FUNCTION IF EXISTS recompute_user_rating(INTEGER)"],
            create: &[r#"
                CREATE FUNCTION recompute_user_rating(p_user_id INTEGER)
                RETURNS TABLE(
                    user_id INTEGER,
                    new_rating DOUBLE PRECISION,
                    review_count BIGINT
                ) AS $$
                DECLARE
                    v_avg DOUBLE PRECISION;
                    v_count BIGINT;
                BEGIN
                    SELECT COALESCE(AVG(r.rating), 0), COUNT(*)
                    INTO v_avg, v_count
                    FROM reviews r
                    WHERE r.reviewed_id = p_user_id;

                    v_avg := ROUND(v_avg::numeric, 2)::float8;

                    UPDATE users u
                    SET rating = v_avg,
                        updated_at = NOW()
                    WHERE u.id = p_user_id;

                    RETURN QUERY SELECT p_user_id, v_avg, v_count;
                END;
                $$ LANGUAGE plpgsql
            "#],
        },
        DerivedObject {
            name: "get_project_statistics",
            kind: ObjectKind::Function,
            drop: &["DROP FUNCTION IF EXISTS get_project_statistics(INTEGER)"],
            create: &[r#"
                CREATE FUNCTION get_project_statistics(p_project_id INTEGER)
                RETURNS TABLE(
                    title VARCHAR,
                    budget DOUBLE PRECISION,
                    status project_status,
                    project_type project_type,
                    client_name VARCHAR,
                    freelancer_name VARCHAR,
                    total_bids BIGINT,
                    avg_bid_amount DOUBLE PRECISION,
                    review_count BIGINT,
                    avg_rating DOUBLE PRECISION
                ) AS $$
                    SELECT p.title, p.budget, p.status, p.project_type,
                           c.name, f.name,
                           COUNT(DISTINCT b.id),
                           COALESCE(AVG(b.amount), 0),
                           COUNT(DISTINCT r.id),
                           COALESCE(AVG(r.rating), 0)
                    FROM projects p
                    LEFT JOIN users c ON p.client_id = c.id
                    LEFT JOIN users f ON p.freelancer_id = f.id
                    LEFT JOIN bids b ON b.project_id = p.id
                    LEFT JOIN reviews r ON r.project_id = p.id
                    WHERE p.id = p_project_id
                    GROUP BY p.id, c.name, f.name
                $$ LANGUAGE sql STABLE
            "#],
        },
        DerivedObject {
            name: "get_client_avg_budget",
            kind: ObjectKind::Function,
            drop: &["DROP FUNCTION IF EXISTS get_client_avg_budget(INTEGER)"],
            create: &[r#"
                CREATE FUNCTION get_client_avg_budget(p_client_id INTEGER)
                RETURNS TABLE(
                    client_id INTEGER,
                    project_count BIGINT,
                    total_budget DOUBLE PRECISION,
                    avg_budget DOUBLE PRECISION
                ) AS $$
                    SELECT p_client_id,
                           COUNT(*),
                           COALESCE(SUM(p.budget), 0),
                           COALESCE(AVG(p.budget), 0)
                    FROM projects p
                    WHERE p.client_id = p_client_id
                $$ LANGUAGE sql STABLE
            "#],
        },
        DerivedObject {
            name: "get_freelancer_success_rate",
            kind: ObjectKind::Function,
            drop: &["DROP FUNCTION IF EXISTS get_freelancer_success_rate(INTEGER)"],
            create: &[r#"
                CREATE FUNCTION get_freelancer_success_rate(p_freelancer_id INTEGER)
                RETURNS TABLE(
                    freelancer_id INTEGER,
                    total_bids BIGINT,
                    accepted_bids BIGINT,
                    success_rate DOUBLE PRECISION
                ) AS $$
                    SELECT p_freelancer_id,
                           COUNT(*),
                           COUNT(*) FILTER (WHERE b.status = 'accepted'::bid_status),
                           CASE WHEN COUNT(*) > 0
                                THEN ROUND((COUNT(*) FILTER (WHERE b.status = 'accepted'::bid_status))::numeric
                                           / COUNT(*) * 100, 2)::float8
                                ELSE 0
                           END
                    FROM bids b
                    WHERE b.freelancer_id = p_freelancer_id
                $$ LANGUAGE sql STABLE
            "#],
        },
        // -- views -------------------------------------------------------
        DerivedObject {
            name: "v_active_projects",
            kind: ObjectKind::View,
            drop: &["DROP VIEW IF EXISTS v_active_projects"],
            create: &[r#"
                CREATE VIEW v_active_projects AS
                SELECT p.id,
                       p.title,
                       p.description,
                       p.budget,
                       p.project_type,
                       p.status,
                       p.created_at,
                       p.deadline,
                       u.name AS client_name,
                       u.email AS client_email,
                       u.city AS client_city,
                       u.country AS client_country,
                       (SELECT COUNT(*) FROM bids b
                         WHERE b.project_id = p.id) AS bid_count,
                       (SELECT COUNT(*) FROM bids b
                         WHERE b.project_id = p.id
                           AND b.status = 'pending'::bid_status) AS pending_bids
                FROM projects p
                JOIN users u ON p.client_id = u.id
                WHERE p.status IN ('open'::project_status, 'in_progress'::project_status)
            "#],
        },
        DerivedObject {
            name: "v_top_freelancers",
            kind: ObjectKind::View,
            drop: &["DROP VIEW IF EXISTS v_top_freelancers"],
            create: &[r#"
                CREATE VIEW v_top_freelancers AS
                SELECT u.id,
                       u.name,
                       u.email,
                       u.city,
                       u.country,
                       u.hourly_rate,
                       u.rating,
                       u.skills,
                       COUNT(DISTINCT p.id) AS completed_projects,
                       COALESCE(AVG(r.rating), 0)::float8 AS avg_review_rating,
                       COUNT(DISTINCT r.id) AS review_count,
                       COUNT(DISTINCT b.id) AS total_bids,
                       COUNT(DISTINCT b.id) FILTER (WHERE b.status = 'accepted'::bid_status) AS accepted_bids
                FROM users u
                LEFT JOIN projects p
                       ON u.id = p.freelancer_id AND p.status = 'completed'::project_status
                LEFT JOIN reviews r ON u.id = r.reviewed_id
                LEFT JOIN bids b ON u.id = b.freelancer_id
                WHERE u.role = 'freelancer'::user_role
                  AND u.status = 'active'::user_status
                GROUP BY u.id
                HAVING u.rating >= 3.0
                ORDER BY u.rating DESC, completed_projects DESC
            "#],
        },
        DerivedObject {
            name: "v_client_stats",
            kind: ObjectKind::View,
            drop: &["DROP VIEW IF EXISTS v_client_stats"],
            create: &[r#"
                CREATE VIEW v_client_stats AS
                SELECT u.id,
                       u.name,
                       u.email,
                       u.city,
                       u.country,
                       u.rating,
                       COUNT(DISTINCT p.id) AS total_projects,
                       COALESCE(SUM(p.budget), 0)::float8 AS total_budget,
                       COALESCE(AVG(p.budget), 0)::float8 AS avg_project_budget,
                       COUNT(DISTINCT CASE WHEN p.status = 'completed'::project_status
                                           THEN p.id END) AS completed_projects,
                       (SELECT COUNT(*) FROM reviews r
                         WHERE r.reviewer_id = u.id) AS reviews_given
                FROM users u
                LEFT JOIN projects p ON u.id = p.client_id
                WHERE u.role = 'client'::user_role
                GROUP BY u.id
                ORDER BY total_budget DESC
            "#],
        },
        // -- triggers ----------------------------------------------------
        DerivedObject {
            name: "tr_projects_count_insert",
            kind: ObjectKind::Trigger,
            drop: &["DROP TRIGGER IF EXISTS tr_projects_count_insert ON projects"],
            create: &[
                r#"
                CREATE OR REPLACE FUNCTION trg_increment_client_projects() RETURNS trigger AS $$
                BEGIN
                    UPDATE users
                    SET total_projects = total_projects + 1
                    WHERE id = NEW.client_id;
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql
                "#,
                r#"
                CREATE TRIGGER tr_projects_count_insert
                AFTER INSERT ON projects
                FOR EACH ROW
                EXECUTE FUNCTION trg_increment_client_projects()
                "#,
            ],
        },
        DerivedObject {
            name: "tr_log_project_status_change",
            kind: ObjectKind::Trigger,
            drop: &["DROP TRIGGER IF EXISTS tr_log_project_status_change ON projects"],
            create: &[
                r#"
                CREATE OR REPLACE FUNCTION trg_log_project_status_change() RETURNS trigger AS $$
                BEGIN
                    IF OLD.status <> NEW.status THEN
                        INSERT INTO project_status_log (project_id, old_status, new_status)
                        VALUES (NEW.id, OLD.status, NEW.status);
                    END IF;
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql
                "#,
                r#"
                CREATE TRIGGER tr_log_project_status_change
                AFTER UPDATE ON projects
                FOR EACH ROW
                EXECUTE FUNCTION trg_log_project_status_change()
                "#,
            ],
        },
        DerivedObject {
            name: "tr_log_bid_status_change",
            kind: ObjectKind::Trigger,
            drop: &["DROP TRIGGER IF EXISTS tr_log_bid_status_change ON bids"],
            create: &[
                r#"
                CREATE OR REPLACE FUNCTION trg_log_bid_status_change() RETURNS trigger AS $$
                BEGIN
                    IF OLD.status <> NEW.status THEN
                        INSERT INTO bid_status_log (bid_id, old_status, new_status)
                        VALUES (NEW.id, OLD.status, NEW.status);
                    END IF;
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql
                "#,
                r#"
                CREATE TRIGGER tr_log_bid_status_change
                AFTER UPDATE ON bids
                FOR EACH ROW
                EXECUTE FUNCTION trg_log_bid_status_change()
                "#,
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn object_names_are_unique() {
        let objects = derived_objects();
        let names: HashSet<&str> = objects.iter().map(|o| o.name).collect();
        assert_eq!(names.len(), objects.len());
    }

    #[test]
    fn inventory_matches_the_expected_shape() {
        let objects = derived_objects();
        let count = |kind: ObjectKind| objects.iter().filter(|o| o.kind == kind).count();
        assert_eq!(count(ObjectKind::Table), 2);
        assert_eq!(count(ObjectKind::Function), 4);
        assert_eq!(count(ObjectKind::View), 3);
        assert_eq!(count(ObjectKind::Trigger), 3);
    }

    #[test]
    fn every_drop_statement_is_if_exists() {
        for object in derived_objects() {
            for statement in object.drop {
                assert!(
                    statement.contains("IF EXISTS"),
                    "{} drop is not idempotent",
                    object.name
                );
            }
        }
    }

    #[test]
    fn tables_use_if_not_exists_instead_of_drops() {
        for object in derived_objects() {
            if object.kind == ObjectKind::Table {
                assert!(object.drop.is_empty());
                assert!(object.create[0].contains("IF NOT EXISTS"));
            }
        }
    }

    #[test]
    fn views_and_functions_are_dropped_before_create() {
        for object in derived_objects() {
            match object.kind {
                ObjectKind::View => {
                    assert!(object.drop[0].starts_with("DROP VIEW IF EXISTS"));
                    assert!(object.create[0].trim_start().starts_with("CREATE VIEW"));
                }
                ObjectKind::Function => {
                    assert!(object.drop[0].starts_with("DROP FUNCTION IF EXISTS"));
                    assert!(object.create[0].trim_start().starts_with("CREATE FUNCTION"));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn triggers_install_their_function_first() {
        for object in derived_objects() {
            if object.kind == ObjectKind::Trigger {
                assert_eq!(object.create.len(), 2);
                assert!(object.create[0]
                    .trim_start()
                    .starts_with("CREATE OR REPLACE FUNCTION"));
                assert!(object.create[1].trim_start().starts_with("CREATE TRIGGER"));
                assert!(object.drop[0].starts_with("DROP TRIGGER IF EXISTS"));
            }
        }
    }

    #[test]
    fn audit_tables_precede_their_triggers() {
        let objects = derived_objects();
        let position =
            |name: &str| objects.iter().position(|o| o.name == name).unwrap();
        assert!(position("project_status_log") < position("tr_log_project_status_change"));
        assert!(position("bid_status_log") < position("tr_log_bid_status_change"));
    }

    #[test]
    fn routine_parameters_are_distinct_from_column_names() {
        // every routine argument is p_-prefixed so comparisons are real
        // correlations, never self-referential
        for object in derived_objects() {
            if object.kind == ObjectKind::Function {
                assert!(
                    object.create[0].contains("(p_"),
                    "{} does not use a p_-prefixed parameter",
                    object.name
                );
            }
        }
    }

    #[test]
    fn report_message_names_failed_objects() {
        let report = ProvisionReport {
            outcomes: vec![
                ProvisionOutcome {
                    name: "v_client_stats",
                    kind: ObjectKind::View,
                    created: true,
                    error: None,
                },
                ProvisionOutcome {
                    name: "tr_log_bid_status_change",
                    kind: ObjectKind::Trigger,
                    created: false,
                    error: Some("relation bid_status_log does not exist".into()),
                },
            ],
        };
        assert!(!report.succeeded());
        assert!(report.message().contains("tr_log_bid_status_change"));

        let ok = ProvisionReport {
            outcomes: vec![ProvisionOutcome {
                name: "v_client_stats",
                kind: ObjectKind::View,
                created: true,
                error: None,
            }],
        };
        assert!(ok.succeeded());
        assert!(ok.message().contains("1 database objects"));
    }
}
