//! Task persistence over a Postgres pool.
//!
//! Statements are assembled from a [`QueryDescriptor`] by concatenating its
//! rendered parts in the fixed order filter, then pagination, then order;
//! the descriptor's values are only ever bound positionally, never
//! interpolated.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use query_engine_sql::sql::ast::Value;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use crate::error::Error;
use crate::task::Task;

const SELECT_TASKS: &str =
    "select id, name, description, category, status, duedate, created from tasks";

#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tasks table when it doesn't exist yet.
    pub async fn ensure_schema(&self) -> Result<(), Error> {
        sqlx::query(
            "create table if not exists tasks (
                id bigserial primary key,
                name text not null,
                description text not null default '',
                category text not null default '',
                status text not null default 'pending',
                duedate timestamptz,
                created timestamptz not null default now()
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Run a tasks query described by `descriptor`.
    pub async fn select_tasks(&self, descriptor: &QueryDescriptor) -> Result<Vec<Task>, Error> {
        let (statement, values) = build_select_statement(descriptor);
        tracing::debug!(statement = %statement, "executing query");

        let query = bind_values(sqlx::query(&statement), values);
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(task_from_row).collect()
    }

    /// Fetch one task by id. `None` when the row doesn't exist.
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, Error> {
        let statement = format!("{SELECT_TASKS} where id = $1");
        tracing::debug!(statement = %statement, id, "executing query");

        let row = sqlx::query(&statement)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(task_from_row).transpose()
    }

    /// Insert a task; id and creation time come back from the database.
    pub async fn create_task(&self, task: &Task) -> Result<Task, Error> {
        let row = sqlx::query(
            "insert into tasks (name, description, category, status, duedate)
             values ($1, $2, $3, $4, $5)
             returning id, created",
        )
        .bind(&task.name)
        .bind(&task.description)
        .bind(&task.category)
        .bind(task.status.as_str())
        .bind(task.due_date)
        .fetch_one(&self.pool)
        .await?;

        let mut created = task.clone();
        created.id = row.try_get("id")?;
        created.created = row.try_get("created")?;
        Ok(created)
    }

    /// Update a task's mutable fields by id.
    pub async fn update_task(&self, task: &Task) -> Result<Task, Error> {
        sqlx::query(
            "update tasks set
                name = $1,
                description = $2,
                category = $3,
                status = $4,
                duedate = $5
             where id = $6",
        )
        .bind(&task.name)
        .bind(&task.description)
        .bind(&task.category)
        .bind(task.status.as_str())
        .bind(task.due_date)
        .bind(task.id)
        .execute(&self.pool)
        .await?;
        Ok(task.clone())
    }

    /// Physically delete a task by id.
    pub async fn delete_task(&self, id: i64) -> Result<(), Error> {
        sqlx::query("delete from tasks where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Assemble the final SELECT statement and the values to bind to it.
fn build_select_statement(descriptor: &QueryDescriptor) -> (String, Vec<Value>) {
    let mut statement = String::from(SELECT_TASKS);

    let where_sql = descriptor.where_sql();
    if !where_sql.sql.is_empty() {
        statement.push_str(" where ");
        statement.push_str(&where_sql.sql);
    }
    let pagination = descriptor.pagination_sql();
    if !pagination.is_empty() {
        statement.push(' ');
        statement.push_str(&pagination);
    }
    let order_by = descriptor.order_by_sql();
    if !order_by.is_empty() {
        statement.push_str(" order by ");
        statement.push_str(&order_by);
    }
    (statement, where_sql.params)
}

fn bind_values(
    query: Query<'_, Postgres, PgArguments>,
    values: Vec<Value>,
) -> Query<'_, Postgres, PgArguments> {
    values.into_iter().fold(query, |query, value| match value {
        Value::Int(i) => query.bind(i),
        Value::Bool(b) => query.bind(b),
        Value::Text(t) => query.bind(t),
    })
}

fn task_from_row(row: &PgRow) -> Result<Task, Error> {
    let status: String = row.try_get("status")?;
    Ok(Task {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        status: status.parse()?,
        due_date: row.try_get("duedate")?,
        created: row.try_get("created")?,
    })
}
