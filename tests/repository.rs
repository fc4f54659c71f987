mod common;

use chrono::Utc;
use software_catalog::blobstore::FsBlobStore;
use software_catalog::domain::category::{Category, CategoryUpdate, NewCategory};
use software_catalog::domain::software::{ImageRef, NewSoftware, Software, SoftwareUpdate};
use software_catalog::domain::subcategory::{NewSubCategory, SubCategory};
use software_catalog::domain::types::{
    CategoryId, CategoryName, Description, ImageId, ImageUrl, Score, SoftwareName,
    SortDirection, SubCategoryName,
};
use software_catalog::pagination::{SUBCATEGORIES_PER_PAGE, TOP_SOFTWARE_LIMIT};
use software_catalog::repository::errors::RepositoryError;
use software_catalog::repository::{
    CategoryReader, CategoryWriter, DieselRepository, SoftwareListQuery, SoftwareReader,
    SoftwareWriter, SubCategoryListQuery, SubCategoryReader, SubCategoryWriter,
};
use software_catalog::services;

use crate::common::TestDb;

fn create_category(repo: &DieselRepository, name: &str) -> Category {
    let now = Utc::now().naive_utc();
    repo.create_category(&NewCategory {
        name: CategoryName::new(name).unwrap(),
        description: Description::new(format!("{name} tools")).unwrap(),
        created_at: now,
        updated_at: now,
    })
    .unwrap()
}

fn create_subcategory(repo: &DieselRepository, category_id: CategoryId, name: &str) -> SubCategory {
    repo.create_subcategory(&NewSubCategory {
        category_id,
        name: SubCategoryName::new(name).unwrap(),
        description: Description::new(format!("{name} and friends")).unwrap(),
        created_at: Utc::now().naive_utc(),
    })
    .unwrap()
}

fn create_software(
    repo: &DieselRepository,
    subcategory: &SubCategory,
    name: &str,
    score: f64,
) -> Software {
    repo.create_software(&NewSoftware {
        subcategory_id: subcategory.id,
        category_id: subcategory.category_id,
        name: SoftwareName::new(name).unwrap(),
        description: Description::new(format!("{name} description")).unwrap(),
        score: Score::new(score).unwrap(),
        image: ImageRef {
            id: ImageId::new(format!("seed-{name}.png")).unwrap(),
            url: ImageUrl::new(format!("https://media.test/seed-{name}.png")).unwrap(),
        },
        created_at: Utc::now().naive_utc(),
    })
    .unwrap()
}

#[test]
fn test_category_crud() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = create_category(&repo, "Development");
    assert_eq!(created.name, "Development");

    let fetched = repo.get_category_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);

    let updated = repo
        .update_category(
            created.id,
            &CategoryUpdate {
                name: Some(CategoryName::new("Dev Tools").unwrap()),
                description: None,
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Dev Tools");
    assert_eq!(updated.description, created.description);

    assert_eq!(repo.delete_category(created.id).unwrap(), 1);
    assert!(repo.get_category_by_id(created.id).unwrap().is_none());
}

#[test]
fn test_categories_list_name_ascending() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    create_category(&repo, "Security");
    create_category(&repo, "Development");
    create_category(&repo, "Networking");

    let names: Vec<String> = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Development", "Networking", "Security"]);
}

#[test]
fn test_duplicate_subcategory_name_is_a_conflict() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let development = create_category(&repo, "Development");
    let security = create_category(&repo, "Security");
    create_subcategory(&repo, development.id, "Editors");

    let duplicate = repo.create_subcategory(&NewSubCategory {
        category_id: development.id,
        name: SubCategoryName::new("Editors").unwrap(),
        description: Description::new("another take").unwrap(),
        created_at: Utc::now().naive_utc(),
    });
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));

    // The index scopes uniqueness to the category.
    create_subcategory(&repo, security.id, "Editors");
}

#[test]
fn test_duplicate_software_name_is_a_conflict() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let subcategory = create_subcategory(&repo, category.id, "Editors");
    create_software(&repo, &subcategory, "Helix", 9.0);

    let duplicate = repo.create_software(&NewSoftware {
        subcategory_id: subcategory.id,
        category_id: category.id,
        name: SoftwareName::new("Helix").unwrap(),
        description: Description::new("again").unwrap(),
        score: Score::new(5.0).unwrap(),
        image: ImageRef {
            id: ImageId::new("dup.png").unwrap(),
            url: ImageUrl::new("https://media.test/dup.png").unwrap(),
        },
        created_at: Utc::now().naive_utc(),
    });
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
}

#[test]
fn test_subcategory_pagination_and_sort() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    for n in 1..=50 {
        create_subcategory(&repo, category.id, &format!("Subcategory {n:02}"));
    }

    let (total, page_two) = repo
        .list_subcategories(
            SubCategoryListQuery::default().paginate(2, SUBCATEGORIES_PER_PAGE),
        )
        .unwrap();
    assert_eq!(total, 50);
    assert_eq!(page_two.len(), SUBCATEGORIES_PER_PAGE);
    assert_eq!(page_two[0].name, "Subcategory 25");
    assert_eq!(page_two[23].name, "Subcategory 48");

    let (_, descending) = repo
        .list_subcategories(
            SubCategoryListQuery::default()
                .sort(SortDirection::Desc)
                .paginate(1, SUBCATEGORIES_PER_PAGE),
        )
        .unwrap();
    assert_eq!(descending[0].name, "Subcategory 50");

    // Page zero degrades to the first page.
    let (_, page_zero) = repo
        .list_subcategories(
            SubCategoryListQuery::default().paginate(0, SUBCATEGORIES_PER_PAGE),
        )
        .unwrap();
    assert_eq!(page_zero[0].name, "Subcategory 01");
}

#[test]
fn test_search_matches_substrings_case_insensitively() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let abacus = create_subcategory(&repo, category.id, "Abacus Tools");
    create_subcategory(&repo, category.id, "Crabby Shells");
    create_subcategory(&repo, category.id, "Editors");
    create_software(&repo, &abacus, "Abacus", 7.0);
    create_software(&repo, &abacus, "Slide Rule", 5.0);

    let (total, matches) = repo
        .list_subcategories(SubCategoryListQuery::default().search("ab"))
        .unwrap();
    assert_eq!(total, 2);
    let names: Vec<&str> = matches.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Abacus Tools", "Crabby Shells"]);

    let (total, matches) = repo
        .list_software(SoftwareListQuery::default().search("AB"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].name, "Abacus");
}

#[test]
fn test_search_treats_like_wildcards_as_literals() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    create_subcategory(&repo, category.id, "Progress 100%");
    create_subcategory(&repo, category.id, "1000 Tools");
    create_subcategory(&repo, category.id, "Percent_Tools");

    // `%` in the term must not act as a wildcard.
    let (total, matches) = repo
        .list_subcategories(SubCategoryListQuery::default().search("100%"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].name, "Progress 100%");

    // Neither must `_`, which would otherwise match any character.
    let (total, matches) = repo
        .list_subcategories(SubCategoryListQuery::default().search("_"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].name, "Percent_Tools");
}

#[test]
fn test_top_software_is_score_descending_and_capped() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let subcategory = create_subcategory(&repo, category.id, "Editors");
    for (n, score) in (1..=8).zip([3.0, 7.0, 5.0, 9.0, 1.0, 8.0, 6.0, 4.0]) {
        create_software(&repo, &subcategory, &format!("Tool {n}"), score);
    }

    let top = repo.top_software(subcategory.id, TOP_SOFTWARE_LIMIT).unwrap();
    let scores: Vec<f64> = top.iter().map(|s| s.score.get()).collect();
    assert_eq!(scores, vec![9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
}

#[test]
fn test_top_software_fan_out_covers_every_subcategory() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let editors = create_subcategory(&repo, category.id, "Editors");
    let shells = create_subcategory(&repo, category.id, "Shells");
    let empty = create_subcategory(&repo, category.id, "Debuggers");
    create_software(&repo, &editors, "Helix", 9.0);
    create_software(&repo, &editors, "Nano", 6.0);
    create_software(&repo, &shells, "Fish", 8.0);

    let top = repo
        .top_software_for_subcategories(&[editors.id, shells.id, empty.id], 4)
        .unwrap();
    assert_eq!(top[&editors.id].len(), 2);
    assert_eq!(top[&editors.id][0].name, "Helix");
    assert_eq!(top[&shells.id].len(), 1);
    assert!(top[&empty.id].is_empty());
}

#[test]
fn test_top_subcategories_rank_by_mean_with_unscored_last() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let alpha = create_subcategory(&repo, category.id, "Alpha");
    let beta = create_subcategory(&repo, category.id, "Beta");
    create_subcategory(&repo, category.id, "Gamma");
    create_software(&repo, &alpha, "One", 8.0);
    create_software(&repo, &alpha, "Two", 6.0);
    create_software(&repo, &beta, "Three", 9.0);

    let ranks = repo.top_subcategories(8).unwrap();
    let names: Vec<&str> = ranks.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
    assert_eq!(ranks[0].average_score, Some(9.0));
    assert_eq!(ranks[1].average_score, Some(7.0));
    assert_eq!(ranks[2].average_score, None);
}

#[test]
fn test_software_partial_update() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let subcategory = create_subcategory(&repo, category.id, "Editors");
    let software = create_software(&repo, &subcategory, "Helix", 9.0);

    let updated = repo
        .update_software(
            software.id,
            &SoftwareUpdate {
                score: Some(Score::new(9.5).unwrap()),
                ..SoftwareUpdate::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.score, 9.5);
    assert_eq!(updated.name, software.name);
    assert_eq!(updated.image, software.image);
}

#[test]
fn test_cascade_delete_clears_the_whole_subtree() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let media = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(media.path(), "https://media.test").unwrap();

    let category = create_category(&repo, "Development");
    let editors = create_subcategory(&repo, category.id, "Editors");
    let shells = create_subcategory(&repo, category.id, "Shells");
    create_software(&repo, &editors, "Helix", 9.0);
    create_software(&repo, &editors, "Nano", 6.0);
    create_software(&repo, &shells, "Fish", 8.0);
    let untouched = create_category(&repo, "Security");
    let scanners = create_subcategory(&repo, untouched.id, "Scanners");
    create_software(&repo, &scanners, "Nmap", 9.0);

    services::categories::delete_category(category.id.get(), &repo, &store).unwrap();

    assert!(repo.get_category_by_id(category.id).unwrap().is_none());
    let (total, _) = repo
        .list_subcategories(SubCategoryListQuery::default().category(category.id))
        .unwrap();
    assert_eq!(total, 0);
    let (total, _) = repo
        .list_software(SoftwareListQuery::default().category(category.id))
        .unwrap();
    assert_eq!(total, 0);

    // The neighbouring category keeps its records.
    assert!(repo.get_category_by_id(untouched.id).unwrap().is_some());
    let (total, _) = repo
        .list_software(SoftwareListQuery::default().category(untouched.id))
        .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_delete_software_by_scope() {
    let test_db = TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = create_category(&repo, "Development");
    let editors = create_subcategory(&repo, category.id, "Editors");
    let shells = create_subcategory(&repo, category.id, "Shells");
    create_software(&repo, &editors, "Helix", 9.0);
    create_software(&repo, &editors, "Nano", 6.0);
    create_software(&repo, &shells, "Fish", 8.0);

    assert_eq!(repo.delete_software_by_subcategory(editors.id).unwrap(), 2);
    assert_eq!(repo.delete_software_by_category(category.id).unwrap(), 1);
    let (total, _) = repo.list_software(SoftwareListQuery::default()).unwrap();
    assert_eq!(total, 0);
}
