use diesel::dsl::avg;
use diesel::prelude::*;

use crate::domain::subcategory::{
    NewSubCategory, SubCategory, SubCategoryRank, SubCategoryUpdate,
};
use crate::domain::types::{CategoryId, SortDirection, SubCategoryId, SubCategoryName};
use crate::models::subcategory::{
    NewSubCategory as DbNewSubCategory, SubCategory as DbSubCategory,
    SubCategoryUpdate as DbSubCategoryUpdate,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, SubCategoryListQuery, SubCategoryReader, SubCategoryWriter, like_pattern,
};

impl SubCategoryReader for DieselRepository {
    fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<SubCategory>)> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = subcategories::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(subcategories::category_id.eq(category_id.get()));
            }

            if let Some(search) = &query.search {
                // SQLite LIKE is case-insensitive for ASCII, giving the
                // substring semantics the search endpoints need. The term is
                // escaped so `%` and `_` match literally.
                items = items
                    .filter(subcategories::name.like(like_pattern(search)).escape('\\'));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        // Ties on name fall back to insertion order for a stable paging view.
        let items = match query.sort {
            SortDirection::Asc => {
                items.order((subcategories::name.asc(), subcategories::id.asc()))
            }
            SortDirection::Desc => {
                items.order((subcategories::name.desc(), subcategories::id.asc()))
            }
        };

        let items = items
            .load::<DbSubCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubCategory>, _>>()?;

        Ok((total, items))
    }

    fn get_subcategory_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let subcategory = subcategories::table
            .filter(subcategories::id.eq(id.get()))
            .first::<DbSubCategory>(&mut conn)
            .optional()?;

        Ok(subcategory.map(TryInto::try_into).transpose()?)
    }

    fn get_subcategory_by_name(
        &self,
        name: &SubCategoryName,
        category_id: CategoryId,
    ) -> RepositoryResult<Option<SubCategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let subcategory = subcategories::table
            .filter(subcategories::name.eq(name.as_str()))
            .filter(subcategories::category_id.eq(category_id.get()))
            .first::<DbSubCategory>(&mut conn)
            .optional()?;

        Ok(subcategory.map(TryInto::try_into).transpose()?)
    }

    fn top_subcategories(&self, limit: usize) -> RepositoryResult<Vec<SubCategoryRank>> {
        use crate::schema::{softwares, subcategories};

        let mut conn = self.conn()?;

        // LEFT JOIN keeps software-less subcategories in the ranking with a
        // NULL mean; SQLite sorts NULLs after every value in DESC order.
        let rows = subcategories::table
            .left_join(softwares::table)
            .group_by((subcategories::id, subcategories::name))
            .select((
                subcategories::id,
                subcategories::name,
                avg(softwares::score.nullable()),
            ))
            .order((
                avg(softwares::score.nullable()).desc(),
                subcategories::name.asc(),
            ))
            .limit(limit as i64)
            .load::<(i32, String, Option<f64>)>(&mut conn)?;

        let ranks = rows
            .into_iter()
            .map(|(id, name, average_score)| {
                Ok(SubCategoryRank {
                    id: SubCategoryId::new(id)?,
                    name: SubCategoryName::new(name)?,
                    average_score,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(ranks)
    }
}

impl SubCategoryWriter for DieselRepository {
    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;
        let db_subcategory: DbNewSubCategory = subcategory.clone().into();

        let created = diesel::insert_into(subcategories::table)
            .values(db_subcategory)
            .get_result::<DbSubCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_subcategory(
        &self,
        id: SubCategoryId,
        update: &SubCategoryUpdate,
    ) -> RepositoryResult<Option<SubCategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;
        let changeset: DbSubCategoryUpdate = update.clone().into();

        let updated = diesel::update(subcategories::table.filter(subcategories::id.eq(id.get())))
            .set(changeset)
            .get_result::<DbSubCategory>(&mut conn)
            .optional()?;

        Ok(updated.map(TryInto::try_into).transpose()?)
    }

    fn delete_subcategory(&self, id: SubCategoryId) -> RepositoryResult<usize> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(subcategories::table.filter(subcategories::id.eq(id.get())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
