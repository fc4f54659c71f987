use std::collections::HashMap;
use std::thread;

use diesel::prelude::*;

use crate::domain::software::{NewSoftware, Software, SoftwareUpdate};
use crate::domain::types::{CategoryId, SoftwareId, SoftwareName, SubCategoryId};
use crate::models::software::{
    NewSoftware as DbNewSoftware, Software as DbSoftware, SoftwareUpdate as DbSoftwareUpdate,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, SoftwareListQuery, SoftwareReader, SoftwareWriter, like_pattern,
};

impl SoftwareReader for DieselRepository {
    fn list_software(
        &self,
        query: SoftwareListQuery,
    ) -> RepositoryResult<(usize, Vec<Software>)> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = softwares::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(subcategory_id) = query.subcategory_id {
                items = items.filter(softwares::subcategory_id.eq(subcategory_id.get()));
            }

            if let Some(category_id) = query.category_id {
                items = items.filter(softwares::category_id.eq(category_id.get()));
            }

            if let Some(search) = &query.search {
                items = items.filter(softwares::name.like(like_pattern(search)).escape('\\'));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((softwares::name.asc(), softwares::id.asc()))
            .load::<DbSoftware>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Software>, _>>()?;

        Ok((total, items))
    }

    fn get_software_by_id(&self, id: SoftwareId) -> RepositoryResult<Option<Software>> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let software = softwares::table
            .filter(softwares::id.eq(id.get()))
            .first::<DbSoftware>(&mut conn)
            .optional()?;

        Ok(software.map(TryInto::try_into).transpose()?)
    }

    fn get_software_by_name(
        &self,
        name: &SoftwareName,
        subcategory_id: SubCategoryId,
    ) -> RepositoryResult<Option<Software>> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let software = softwares::table
            .filter(softwares::name.eq(name.as_str()))
            .filter(softwares::subcategory_id.eq(subcategory_id.get()))
            .first::<DbSoftware>(&mut conn)
            .optional()?;

        Ok(software.map(TryInto::try_into).transpose()?)
    }

    fn top_software(
        &self,
        subcategory_id: SubCategoryId,
        limit: usize,
    ) -> RepositoryResult<Vec<Software>> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let items = softwares::table
            .filter(softwares::subcategory_id.eq(subcategory_id.get()))
            .order((softwares::score.desc(), softwares::id.asc()))
            .limit(limit as i64)
            .load::<DbSoftware>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Software>, _>>()?;

        Ok(items)
    }

    fn top_software_for_subcategories(
        &self,
        subcategory_ids: &[SubCategoryId],
        limit: usize,
    ) -> RepositoryResult<HashMap<SubCategoryId, Vec<Software>>> {
        // One worker per subcategory in the page, each with its own pooled
        // connection, joined before returning. Workers block on pool
        // checkout when the page is larger than the pool.
        let results = thread::scope(|scope| {
            let handles: Vec<_> = subcategory_ids
                .iter()
                .map(|&subcategory_id| {
                    let repo = self.clone();
                    scope.spawn(move || {
                        repo.top_software(subcategory_id, limit)
                            .map(|items| (subcategory_id, items))
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(RepositoryError::WorkerFailure)))
                .collect::<RepositoryResult<Vec<_>>>()
        })?;

        Ok(results.into_iter().collect())
    }
}

impl SoftwareWriter for DieselRepository {
    fn create_software(&self, software: &NewSoftware) -> RepositoryResult<Software> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;
        let db_software: DbNewSoftware = software.clone().into();

        let created = diesel::insert_into(softwares::table)
            .values(db_software)
            .get_result::<DbSoftware>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_software(
        &self,
        id: SoftwareId,
        update: &SoftwareUpdate,
    ) -> RepositoryResult<Option<Software>> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;
        let changeset: DbSoftwareUpdate = update.clone().into();

        let updated = diesel::update(softwares::table.filter(softwares::id.eq(id.get())))
            .set(changeset)
            .get_result::<DbSoftware>(&mut conn)
            .optional()?;

        Ok(updated.map(TryInto::try_into).transpose()?)
    }

    fn delete_software(&self, id: SoftwareId) -> RepositoryResult<usize> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let affected = diesel::delete(softwares::table.filter(softwares::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_software_by_subcategory(
        &self,
        subcategory_id: SubCategoryId,
    ) -> RepositoryResult<usize> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            softwares::table.filter(softwares::subcategory_id.eq(subcategory_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_software_by_category(&self, category_id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::softwares;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            softwares::table.filter(softwares::category_id.eq(category_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
