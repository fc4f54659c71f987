use serde::Serialize;

use crate::dto::software::SoftwareSummaryDto;
use crate::dto::subcategories::SubCategorySummaryDto;

/// Combined result of one catalog-wide name search.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultsDto {
    pub sub_categories: Vec<SubCategorySummaryDto>,
    pub software: Vec<SoftwareSummaryDto>,
}
