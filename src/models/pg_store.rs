use diesel::dsl::{Eq, Filter};
use diesel::prelude::*;

use super::{
    todo_model::{TodoItem, TodoStore},
    Pool,
};
use crate::api::{dtos::todo::UpdateTodoRequest, errors::TodoApiError};
use crate::schema::todos::dsl;

type OwnedTodo<'a> =
    Filter<Filter<dsl::todos, Eq<dsl::user_id, &'a str>>, Eq<dsl::todo_id, &'a str>>;

/// The single row `todo_id` of `owner`; rows of other users never match
fn owned_todo<'a>(owner: &'a str, item_id: &'a str) -> OwnedTodo<'a> {
    dsl::todos
        .filter(dsl::user_id.eq(owner))
        .filter(dsl::todo_id.eq(item_id))
}

/// `TodoStore` backed by the `todos` table in Postgres
pub struct PgTodoStore {
    pool: Pool,
}

impl PgTodoStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl TodoStore for PgTodoStore {
    fn insert(&self, item: &TodoItem) -> Result<(), TodoApiError> {
        let conn = &self.pool.get()?;

        diesel::insert_into(dsl::todos).values(item).execute(conn)?;

        Ok(())
    }

    fn list_for_user(&self, owner: &str) -> Result<Vec<TodoItem>, TodoApiError> {
        let conn = &self.pool.get()?;

        let items = dsl::todos
            .filter(dsl::user_id.eq(owner))
            .order((dsl::created_at.asc(), dsl::todo_id.asc()))
            .load::<TodoItem>(conn)?;

        Ok(items)
    }

    fn update(
        &self,
        owner: &str,
        item_id: &str,
        changes: &UpdateTodoRequest,
    ) -> Result<bool, TodoApiError> {
        let conn = &self.pool.get()?;

        // diesel refuses an empty changeset, so only check the row exists
        if changes.is_empty() {
            let matched: i64 = owned_todo(owner, item_id).count().get_result(conn)?;
            return Ok(matched > 0);
        }

        let update_count = diesel::update(owned_todo(owner, item_id))
            .set(changes)
            .execute(conn)?;

        Ok(update_count > 0)
    }

    fn delete(&self, owner: &str, item_id: &str) -> Result<bool, TodoApiError> {
        let conn = &self.pool.get()?;

        let delete_count = diesel::delete(owned_todo(owner, item_id)).execute(conn)?;

        Ok(delete_count > 0)
    }
}

#[cfg(test)]
mod pg_store_test {
    use super::owned_todo;
    use crate::api::dtos::todo::UpdateTodoRequest;
    use diesel::{debug_query, pg::Pg, prelude::*};

    const OWNED_WHERE: &str = r#"WHERE "todos"."user_id" = $1 AND "todos"."todo_id" = $2"#;

    #[test]
    fn test_delete_is_scoped_to_owner() {
        let query = diesel::delete(owned_todo("alice", "123"));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.starts_with(r#"DELETE FROM "todos""#), "{}", sql);
        assert!(sql.contains(OWNED_WHERE), "{}", sql);
        assert!(sql.contains(r#"["alice", "123"]"#), "{}", sql);
    }

    #[test]
    fn test_update_sets_only_present_fields() {
        let changes = UpdateTodoRequest {
            done: Some(true),
            ..Default::default()
        };
        let query = diesel::update(owned_todo("alice", "123")).set(&changes);
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.starts_with(r#"UPDATE "todos" SET "done" = $1"#), "{}", sql);
        assert!(!sql.contains(r#""name""#), "{}", sql);
        assert!(!sql.contains(r#""due_date""#), "{}", sql);
        assert!(
            sql.contains(r#""todos"."user_id" = $2 AND "todos"."todo_id" = $3"#),
            "{}",
            sql
        );
    }

    #[test]
    fn test_empty_update_only_counts() {
        let query = owned_todo("alice", "123").count();
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.starts_with("SELECT COUNT(*) FROM \"todos\""), "{}", sql);
        assert!(sql.contains(OWNED_WHERE), "{}", sql);
    }
}
