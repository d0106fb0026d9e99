use diesel::prelude::*;

use crate::domain::saved_resource::SavedResource;
use crate::domain::types::{ResourceId, UserId};
use crate::models::saved_resource::NewSavedResource;
use crate::repository::{
    DieselRepository, RepositoryResult, SavedResourceReader, SavedResourceWriter,
};
use crate::schema::saved_resources;

/// Associations owned by `user_id`; `None` selects the anonymous slot.
fn saved_by(
    user_id: Option<UserId>,
) -> saved_resources::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let query = saved_resources::table.into_boxed();
    match user_id {
        Some(user_id) => query.filter(saved_resources::user_id.eq(user_id.get())),
        None => query.filter(saved_resources::user_id.is_null()),
    }
}

impl SavedResourceReader for DieselRepository {
    fn list_saved_resource_ids(
        &self,
        user_id: Option<UserId>,
    ) -> RepositoryResult<Vec<ResourceId>> {
        let mut conn = self.conn()?;

        let ids = saved_by(user_id)
            .select(saved_resources::resource_id)
            .order(saved_resources::rowid.desc())
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(ResourceId::new)
            .collect::<Result<Vec<ResourceId>, _>>()?;

        Ok(ids)
    }

    fn is_resource_saved(
        &self,
        resource_id: ResourceId,
        user_id: Option<UserId>,
    ) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let count = saved_by(user_id)
            .filter(saved_resources::resource_id.eq(resource_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count > 0)
    }
}

impl SavedResourceWriter for DieselRepository {
    fn save_resource(&self, saved: &SavedResource) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = diesel::insert_into(saved_resources::table)
            .values(NewSavedResource::from(saved))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn unsave_resource(&self, saved: &SavedResource) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let for_resource =
            saved_resources::table.filter(saved_resources::resource_id.eq(saved.resource_id.get()));

        let affected = match saved.user_id {
            Some(user_id) => diesel::delete(
                for_resource.filter(saved_resources::user_id.eq(user_id.get())),
            )
            .execute(&mut conn)?,
            None => diesel::delete(for_resource.filter(saved_resources::user_id.is_null()))
                .execute(&mut conn)?,
        };

        Ok(affected)
    }
}
