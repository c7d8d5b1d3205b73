use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Connection as _, QueryBuilder, Sqlite};

use fithub_domain::{
    Delete,
    Update,
    Insert,
    Query,
    Retrieve,
    Member,
    MemberFilter,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

/// Human readable id for a stored member.
pub fn unique_id_for(id: u32) -> String {
    format!("FH{}", 10000 + id)
}

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                unique_id,
                name,
                age,
                date_of_birth,
                phone,
                email,
                address,
                emergency_contact,
                height,
                weight,
                body_fat,
                subscription_type,
                subscription_start,
                subscription_end,
                payment_status
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(unique_id) = filter.unique_id.clone() {
            qry.push(" AND unique_id = ").push_bind(unique_id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(email) = filter.email.clone() {
            qry.push(" AND email = ")
                .push_bind(email)
                .push(" COLLATE NOCASE");
        }
        if let Some(status) = filter.payment_status {
            qry.push(" AND payment_status = ").push_bind(status);
        }
        qry.push(" ORDER BY id");

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let mut members: Vec<Member> = self.query(&filter).await?;
        let member = members
            .pop()
            .ok_or(QueryError::MissingRecord("member", member_id))?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    /// Insert a member. Without a unique id, one is
    /// assigned from the new row id.
    async fn insert(&self, member: Member) -> Result<Member> {
        let unique_id = Some(member.unique_id.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut tx = conn.begin().await?;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    unique_id,
                    name,
                    age,
                    date_of_birth,
                    phone,
                    email,
                    address,
                    emergency_contact,
                    height,
                    weight,
                    body_fat,
                    subscription_type,
                    subscription_start,
                    subscription_end,
                    payment_status
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(unique_id.clone())
                .push_bind(&member.name)
                .push_bind(member.age)
                .push_bind(member.date_of_birth)
                .push_bind(&member.phone)
                .push_bind(&member.email)
                .push_bind(&member.address)
                .push_bind(&member.emergency_contact)
                .push_bind(member.height)
                .push_bind(member.weight)
                .push_bind(member.body_fat)
                .push_bind(member.subscription_type)
                .push_bind(member.subscription_start)
                .push_bind(member.subscription_end)
                .push_bind(member.payment_status);

            let insert: Id<u32> = qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *tx)
                .await?;

            // The row and its unique id are written together or not at all
            if unique_id.is_none() {
                QueryBuilder::<Sqlite>::new("UPDATE members SET unique_id = ")
                    .push_bind(unique_id_for(insert.id))
                    .push(" WHERE id = ")
                    .push_bind(insert.id)
                    .build()
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            insert
        };
        tracing::info!(member_id = insert.id, "member inserted");
        let member: Member = self.retrieve(insert.id).await?;
        Ok(member)
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member. The unique id is immutable.
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            let result = QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", age = ")
                .push_bind(member.age)
                .push(", date_of_birth = ")
                .push_bind(member.date_of_birth)
                .push(", phone = ")
                .push_bind(&member.phone)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", address = ")
                .push_bind(&member.address)
                .push(", emergency_contact = ")
                .push_bind(&member.emergency_contact)
                .push(", height = ")
                .push_bind(member.height)
                .push(", weight = ")
                .push_bind(member.weight)
                .push(", body_fat = ")
                .push_bind(member.body_fat)
                .push(", subscription_type = ")
                .push_bind(member.subscription_type)
                .push(", subscription_start = ")
                .push_bind(member.subscription_start)
                .push(", subscription_end = ")
                .push_bind(member.subscription_end)
                .push(", payment_status = ")
                .push_bind(member.payment_status)
                .push(", updated_at = CURRENT_TIMESTAMP")
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
            if result.rows_affected() == 0 {
                return Err(QueryError::MissingRecord("member", member.id).into());
            }
        }
        tracing::info!(member_id = member.id, "member updated");
        let member: Member = self.retrieve(member.id).await?;
        Ok(member)
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member, the stored sections go with it.
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        tracing::info!(member_id = member.id, "member deleted");
        Ok(())
    }
}
