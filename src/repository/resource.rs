use diesel::prelude::*;

use crate::db::{fold_case, lower_unicode};
use crate::domain::resource::{NewResource, Resource, ResourceUpdate};
use crate::domain::types::ResourceId;
use crate::models::resource::{
    NewResource as DbNewResource, Resource as DbResource, ResourceChangeset,
};
use crate::repository::{
    DieselRepository, RepositoryResult, ResourceListQuery, ResourceReader, ResourceWriter,
};

/// Wraps a search string in `%` after escaping LIKE metacharacters with a backslash.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl ResourceReader for DieselRepository {
    fn list_resources(
        &self,
        query: ResourceListQuery,
    ) -> RepositoryResult<(usize, Vec<Resource>)> {
        use crate::schema::resources;

        let mut conn = self.conn()?;

        let pattern = query
            .search
            .as_deref()
            .map(|search| like_pattern(&fold_case(search)));
        let statuses: Vec<&'static str> = query.statuses.iter().map(|s| s.as_str()).collect();

        let query_builder = || {
            let mut items = resources::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category) = query.category {
                items = items.filter(resources::category.eq(category.as_str()));
            }

            if let Some(zipcode) = &query.zipcode {
                items = items.filter(resources::zipcode.eq(zipcode.as_str()));
            }

            if !statuses.is_empty() {
                items = items.filter(resources::status.eq_any(statuses.clone()));
            }

            if let Some(since) = query.updated_since {
                items = items.filter(resources::last_updated.ge(since));
            }

            // Both sides are folded, so LIKE's ASCII-only case rule never applies.
            if let Some(pattern) = &pattern {
                items = items.filter(
                    lower_unicode(resources::organization.nullable())
                        .like(pattern.clone())
                        .escape('\\')
                        .or(lower_unicode(resources::program)
                            .like(pattern.clone())
                            .escape('\\'))
                        .or(lower_unicode(resources::category.nullable())
                            .like(pattern.clone())
                            .escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            let offset = match pagination.offset() {
                Some(offset) if offset < total => offset,
                _ => return Ok((total, vec![])),
            };
            items = items
                .offset(offset as i64)
                .limit(i64::try_from(pagination.limit()).unwrap_or(i64::MAX));
        }

        let items = items
            .order((resources::last_updated.desc(), resources::id.desc()))
            .load::<DbResource>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Resource>, _>>()?;

        Ok((total, items))
    }

    fn get_resource_by_id(&self, id: ResourceId) -> RepositoryResult<Option<Resource>> {
        use crate::schema::resources;

        let mut conn = self.conn()?;

        let resource = resources::table
            .find(id.get())
            .first::<DbResource>(&mut conn)
            .optional()?;

        let resource = resource.map(TryInto::try_into).transpose()?;
        Ok(resource)
    }

    fn get_resources_by_ids(&self, ids: &[ResourceId]) -> RepositoryResult<Vec<Resource>> {
        use crate::schema::resources;

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let items = resources::table
            .filter(resources::id.eq_any(ids))
            .order((resources::last_updated.desc(), resources::id.desc()))
            .load::<DbResource>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Resource>, _>>()?;

        Ok(items)
    }
}

impl ResourceWriter for DieselRepository {
    fn create_resource(&self, resource: &NewResource) -> RepositoryResult<Resource> {
        use crate::schema::resources;

        let mut conn = self.conn()?;
        let db_resource = DbNewResource::try_from(resource)?;

        let created = diesel::insert_into(resources::table)
            .values(db_resource)
            .get_result::<DbResource>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_resource(
        &self,
        id: ResourceId,
        update: &ResourceUpdate,
    ) -> RepositoryResult<Option<Resource>> {
        use crate::schema::resources;

        let mut conn = self.conn()?;
        let changeset = ResourceChangeset::try_from(update)?;

        let updated = diesel::update(resources::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbResource>(&mut conn)
            .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }
}
