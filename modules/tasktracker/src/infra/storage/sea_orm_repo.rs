//! SeaORM-backed implementation of the repository port.
//!
//! Generic over the connection so it can run on a `DatabaseConnection` or
//! inside an outer transaction. Cascading deletes open their own transaction
//! (a savepoint when the connection already is one).

use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    TransactionTrait,
};

use crate::contract::model::{Project, Task, User};
use crate::domain::repo::TaskTrackerRepository;
use crate::infra::storage::entity::{project, task, user};
use crate::infra::storage::mapper;

/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn tasks_from_rows(rows: Vec<task::Model>) -> anyhow::Result<Vec<Task>> {
    rows.into_iter().map(mapper::task_to_contract).collect()
}

#[async_trait::async_trait]
impl<C> TaskTrackerRepository for SeaOrmRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn find_user(&self, id: &str) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_user failed")?;
        Ok(found.map(mapper::user_to_contract))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let rows = user::Entity::find()
            .all(&self.conn)
            .await
            .context("list_users failed")?;
        Ok(rows.into_iter().map(mapper::user_to_contract).collect())
    }

    async fn find_users(&self, ids: &[String]) -> anyhow::Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("find_users failed")?;
        Ok(rows.into_iter().map(mapper::user_to_contract).collect())
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("email_exists failed")?;
        Ok(count > 0)
    }

    async fn insert_user(&self, u: User) -> anyhow::Result<()> {
        let _ = mapper::user_to_active(u)
            .insert(&self.conn)
            .await
            .context("insert_user failed")?;
        Ok(())
    }

    async fn update_user(&self, u: User) -> anyhow::Result<()> {
        let _ = mapper::user_to_active(u)
            .update(&self.conn)
            .await
            .context("update_user failed")?;
        Ok(())
    }

    async fn delete_user_detaching(&self, id: &str) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await.context("begin failed")?;

        project::Entity::update_many()
            .col_expr(project::Column::OwnerId, Expr::value(Option::<String>::None))
            .filter(project::Column::OwnerId.eq(id))
            .exec(&txn)
            .await
            .context("detach owned projects failed")?;

        task::Entity::update_many()
            .col_expr(task::Column::AssignedToId, Expr::value(Option::<String>::None))
            .filter(task::Column::AssignedToId.eq(id))
            .exec(&txn)
            .await
            .context("detach assigned tasks failed")?;

        let res = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete_user failed")?;

        txn.commit().await.context("commit failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn find_project(&self, id: &str) -> anyhow::Result<Option<Project>> {
        let found = project::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_project failed")?;
        Ok(found.map(mapper::project_to_contract))
    }

    async fn list_projects(&self) -> anyhow::Result<Vec<Project>> {
        let rows = project::Entity::find()
            .all(&self.conn)
            .await
            .context("list_projects failed")?;
        Ok(rows.into_iter().map(mapper::project_to_contract).collect())
    }

    async fn find_projects(&self, ids: &[String]) -> anyhow::Result<Vec<Project>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = project::Entity::find()
            .filter(project::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("find_projects failed")?;
        Ok(rows.into_iter().map(mapper::project_to_contract).collect())
    }

    async fn count_projects(&self) -> anyhow::Result<u64> {
        project::Entity::find()
            .count(&self.conn)
            .await
            .context("count_projects failed")
    }

    async fn insert_project(&self, p: Project) -> anyhow::Result<()> {
        let _ = mapper::project_to_active(p)
            .insert(&self.conn)
            .await
            .context("insert_project failed")?;
        Ok(())
    }

    async fn update_project(&self, p: Project) -> anyhow::Result<()> {
        let _ = mapper::project_to_active(p)
            .update(&self.conn)
            .await
            .context("update_project failed")?;
        Ok(())
    }

    async fn delete_project_cascading(&self, id: &str) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await.context("begin failed")?;

        let removed_tasks = task::Entity::delete_many()
            .filter(task::Column::ProjectId.eq(id))
            .exec(&txn)
            .await
            .context("delete project tasks failed")?;

        let res = project::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete_project failed")?;

        txn.commit().await.context("commit failed")?;
        tracing::debug!(
            project_id = %id,
            tasks = removed_tasks.rows_affected,
            "removed project tasks"
        );
        Ok(res.rows_affected > 0)
    }

    async fn find_task(&self, id: &str) -> anyhow::Result<Option<Task>> {
        let found = task::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_task failed")?;
        found.map(mapper::task_to_contract).transpose()
    }

    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
        let rows = task::Entity::find()
            .all(&self.conn)
            .await
            .context("list_tasks failed")?;
        tasks_from_rows(rows)
    }

    async fn list_tasks_for_projects(&self, project_ids: &[String]) -> anyhow::Result<Vec<Task>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = task::Entity::find()
            .filter(task::Column::ProjectId.is_in(project_ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("list_tasks_for_projects failed")?;
        tasks_from_rows(rows)
    }

    async fn insert_task(&self, t: Task) -> anyhow::Result<()> {
        let _ = mapper::task_to_active(t)
            .insert(&self.conn)
            .await
            .context("insert_task failed")?;
        Ok(())
    }

    async fn update_task(&self, t: Task) -> anyhow::Result<()> {
        let _ = mapper::task_to_active(t)
            .update(&self.conn)
            .await
            .context("update_task failed")?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> anyhow::Result<bool> {
        let res = task::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete_task failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_batch(
        &self,
        users: Vec<User>,
        projects: Vec<Project>,
        tasks: Vec<Task>,
    ) -> anyhow::Result<()> {
        let txn = self.conn.begin().await.context("begin failed")?;

        for u in users {
            let _ = mapper::user_to_active(u)
                .insert(&txn)
                .await
                .context("insert_batch users failed")?;
        }
        for p in projects {
            let _ = mapper::project_to_active(p)
                .insert(&txn)
                .await
                .context("insert_batch projects failed")?;
        }
        for t in tasks {
            let _ = mapper::task_to_active(t)
                .insert(&txn)
                .await
                .context("insert_batch tasks failed")?;
        }

        txn.commit().await.context("commit failed")?;
        Ok(())
    }
}
